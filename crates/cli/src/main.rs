use clap::Parser;

mod args;
mod check;

use args::{Cli, Command};

/// Process exit codes.
mod exit_codes {
    pub const ALLOWED: i32 = 0;
    pub const DENIED: i32 = 1;
    pub const CONFIG_ERROR: i32 = 2;
}

fn main() {
    let cli = Cli::parse();
    routeguard_observability::init(cli.log_format);

    let code = match cli.cmd {
        Command::Check(args) => exit_code(&check::run(args)),
    };
    std::process::exit(code);
}

fn exit_code(result: &anyhow::Result<bool>) -> i32 {
    match result {
        Ok(true) => exit_codes::ALLOWED,
        Ok(false) => exit_codes::DENIED,
        Err(e) => {
            tracing::error!(error = ?e, "check failed");
            eprintln!("fatal: {e:?}");
            exit_codes::CONFIG_ERROR
        }
    }
}

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use routeguard_observability::LogFormat;

#[derive(Parser)]
#[command(name = "routeguard", version, about = "Check role-protected route navigation")]
pub struct Cli {
    /// Log output format (json or compact)
    #[arg(long, global = true, default_value = "compact", value_parser = parse_log_format)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one navigation against a route table and print the decision
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Route table (JSON object keyed by path)
    #[arg(long)]
    pub routes: PathBuf,

    /// Path to navigate to
    #[arg(long)]
    pub path: String,

    /// Role held by the session (repeatable; omit for an anonymous session)
    #[arg(long = "role")]
    pub roles: Vec<String>,

    /// Optional JSON config document (signInPath / forbiddenPath)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Sign-in redirect path
    #[arg(long, env = "ROUTEGUARD_SIGN_IN_PATH")]
    pub sign_in_path: Option<String>,

    /// Forbidden redirect path
    #[arg(long, env = "ROUTEGUARD_FORBIDDEN_PATH")]
    pub forbidden_path: Option<String>,
}

fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    LogFormat::parse(s).ok_or_else(|| format!("unknown log format '{s}' (expected json or compact)"))
}

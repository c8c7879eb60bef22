use anyhow::{Context, Result};
use tracing::info;

use routeguard_auth::{Authorizer, ConfigPatch, GuardConfig, RecordingNavigator, Role, RoleList};
use routeguard_core::RoutePath;
use routeguard_router::{NavigationGuard, RouteTable};

use crate::args::CheckArgs;

/// Run one navigation; returns whether it was allowed.
pub fn run(args: CheckArgs) -> Result<bool> {
    let routes_json = std::fs::read_to_string(&args.routes)
        .with_context(|| format!("failed to read route table {}", args.routes.display()))?;
    let routes = RouteTable::from_json(&routes_json).context("invalid route table")?;

    let config = build_config(&args)?;
    let path = RoutePath::new(args.path.as_str()).context("invalid --path")?;

    let guard = NavigationGuard::new(&routes, config, RecordingNavigator::new())
        .context("failed to register route authorizers")?;

    let explanation = guard.explain(&path);
    let allowed = guard.navigate(&path);

    info!(
        path = %path,
        allowed,
        active = ?guard.navigator().current(),
        "navigation checked"
    );

    println!("{}", serde_json::to_string_pretty(&explanation)?);
    Ok(allowed)
}

fn build_config(args: &CheckArgs) -> Result<GuardConfig> {
    let roles: RoleList = args.roles.iter().cloned().map(Role::new).collect();
    let mut config = GuardConfig::new();
    config.configure(ConfigPatch::new().with_authorizer(Authorizer::fixed(roles)));

    if let Some(file) = &args.config {
        let raw = std::fs::read_to_string(file)
            .with_context(|| format!("failed to read config {}", file.display()))?;
        let doc: serde_json::Value =
            serde_json::from_str(&raw).with_context(|| format!("invalid JSON in {}", file.display()))?;
        config.configure_from_value(&doc);
    }

    // Flags and environment win over the config document.
    config.configure(ConfigPatch {
        authorizer: None,
        sign_in_path: args.sign_in_path.clone(),
        forbidden_path: args.forbidden_path.clone(),
    });

    Ok(config)
}

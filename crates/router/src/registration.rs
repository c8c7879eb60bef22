//! Startup pass that attaches the session-role authorizer to routes.

use tracing::{debug, info};

use routeguard_auth::{GuardConfig, Resolvers};
use routeguard_core::{GuardError, GuardResult};

use crate::table::RouteTable;

/// Return a copy of `table` in which every `auth`-carrying route has an
/// `authorizer` resolver.
///
/// Routes that already carry their own authorizer keep it. Routes without
/// `auth` are copied untouched. Fails before looking at any route when the
/// configuration has no authorizer.
pub fn register_authorizers(table: &RouteTable, config: &GuardConfig) -> GuardResult<RouteTable> {
    let Some(global) = config.authorizer() else {
        return Err(GuardError::configuration(
            "an authorizer must be configured before routes are registered",
        ));
    };

    let mut attached = 0usize;
    let mut overridden = 0usize;

    let registered = table
        .iter()
        .map(|(path, route)| {
            let mut route = route.clone();
            if route.auth.is_some() {
                let resolve = route.resolve.get_or_insert_with(Resolvers::default);
                if resolve.authorizer.is_some() {
                    debug!(target: "routeguard", %path, "route keeps its own authorizer");
                    overridden += 1;
                } else {
                    resolve.authorizer = Some(global.clone());
                    attached += 1;
                }
            }
            (path.clone(), route)
        })
        .collect::<RouteTable>();

    info!(
        target: "routeguard",
        routes = registered.len(),
        attached,
        overridden,
        "registered route authorizers"
    );

    Ok(registered)
}

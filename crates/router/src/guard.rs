//! Pre-navigation hook.

use tracing::debug;

use routeguard_auth::{
    authorize, explain, AuthorizationExplanation, GuardConfig, Navigator, RoleList, Route,
};
use routeguard_core::{GuardResult, RoutePath};

use crate::registration::register_authorizers;
use crate::table::RouteTable;

/// Runs the authorization hook before each navigation.
///
/// Before a protected route is activated the route's authorizer is asked
/// for the session roles, which are then checked by [`authorize`]. Paths
/// missing from the table are treated as unprotected.
pub struct NavigationGuard<N> {
    routes: RouteTable,
    config: GuardConfig,
    navigator: N,
}

impl<N: Navigator> NavigationGuard<N> {
    /// Register authorizers on `routes` and build the guard.
    pub fn new(routes: &RouteTable, config: GuardConfig, navigator: N) -> GuardResult<Self> {
        let routes = register_authorizers(routes, &config)?;
        Ok(Self {
            routes,
            config,
            navigator,
        })
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Try to navigate to `path`. Returns whether the path was activated.
    pub fn navigate(&self, path: &RoutePath) -> bool {
        let Some(route) = self.routes.get(path) else {
            debug!(target: "routeguard", %path, "unknown route, treating as unprotected");
            self.navigator.set_path(path.as_str());
            return true;
        };

        let roles = session_roles(route);
        if authorize(route, &roles, &self.config, &self.navigator) {
            self.navigator.set_path(path.as_str());
            true
        } else {
            false
        }
    }

    /// Explain what [`NavigationGuard::navigate`] would do, without navigating.
    pub fn explain(&self, path: &RoutePath) -> AuthorizationExplanation {
        let open = Route::open();
        let route = self.routes.get(path).unwrap_or(&open);
        explain(Some(path), route, &session_roles(route), &self.config)
    }
}

/// Only routes with `auth` carry a resolver; everything else runs without
/// asking for roles.
fn session_roles(route: &Route) -> RoleList {
    route
        .authorizer()
        .map(|authorizer| authorizer.resolve())
        .unwrap_or_default()
}

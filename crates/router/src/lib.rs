//! `routeguard-router` — glue between a routing system and the policy.
//!
//! Registration attaches the session-role authorizer to protected routes at
//! startup; the navigation guard runs the pre-activation hook on every
//! navigation.

pub mod guard;
pub mod registration;
pub mod table;

pub use guard::NavigationGuard;
pub use registration::register_authorizers;
pub use table::RouteTable;

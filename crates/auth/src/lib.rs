//! `routeguard-auth` — pure route authorization policy.
//!
//! This crate is intentionally decoupled from any routing framework: it reads
//! route metadata, compares roles and tells a [`Navigator`] where to go.

pub mod config;
pub mod navigator;
pub mod policy;
pub mod roles;
pub mod route;

pub use config::{Authorizer, AuthorizerInput, ConfigPatch, GuardConfig, RoleResolver};
pub use navigator::{Navigator, RecordingNavigator};
pub use policy::{
    authorize, can_sign_in, decide, explain, is_allowed, AuthorizationExplanation, Decision,
    DenialKind, DenialReason,
};
pub use roles::{to_role_list, Role, RoleList, RoleSpec};
pub use route::{Resolvers, Route, RouteAuth};

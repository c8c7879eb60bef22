//! `routeguard-core` — shared primitives for the route guard crates.
//!
//! This crate contains **pure** building blocks (no routing or IO concerns).

pub mod error;
pub mod path;

pub use error::{GuardError, GuardResult};
pub use path::RoutePath;

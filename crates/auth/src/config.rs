//! Guard configuration: the session-role authorizer and redirect targets.
//!
//! Configuration is an explicit value built once at bootstrap and handed to
//! the policy and the route registration step by reference.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::roles::RoleList;

/// Environment variable holding the sign-in redirect path.
pub const SIGN_IN_PATH_ENV: &str = "ROUTEGUARD_SIGN_IN_PATH";

/// Environment variable holding the forbidden redirect path.
pub const FORBIDDEN_PATH_ENV: &str = "ROUTEGUARD_FORBIDDEN_PATH";

/// Resolves the roles held by the current session.
///
/// Implemented by the host application; the guard only calls it.
pub trait RoleResolver: Send + Sync {
    fn resolve(&self) -> RoleList;
}

impl<F> RoleResolver for F
where
    F: Fn() -> RoleList + Send + Sync,
{
    fn resolve(&self) -> RoleList {
        self()
    }
}

/// A sequence of resolvers acts as one: roles are merged in order, first
/// occurrence wins.
impl RoleResolver for Vec<Authorizer> {
    fn resolve(&self) -> RoleList {
        let mut roles = RoleList::empty();
        for authorizer in self {
            roles.extend_unique(authorizer.resolve().iter().cloned());
        }
        roles
    }
}

/// Shared handle to a session-role resolver.
///
/// Equality is identity: two handles are equal when they point at the same
/// resolver instance.
#[derive(Clone)]
pub struct Authorizer(Arc<dyn RoleResolver>);

impl Authorizer {
    pub fn new(resolver: impl RoleResolver + 'static) -> Self {
        Self(Arc::new(resolver))
    }

    /// Resolver that always yields the given roles.
    pub fn fixed(roles: impl Into<RoleList>) -> Self {
        let roles = roles.into();
        Self::new(move || roles.clone())
    }

    /// Resolver built from a sequence of resolvers.
    pub fn chain(authorizers: Vec<Authorizer>) -> Self {
        Self::new(authorizers)
    }

    pub fn resolve(&self) -> RoleList {
        self.0.resolve()
    }
}

impl core::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Authorizer")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

impl PartialEq for Authorizer {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Authorizer {}

/// Shapes accepted for the `authorizer` field of a [`ConfigPatch`].
#[derive(Debug, Clone)]
pub enum AuthorizerInput {
    Single(Authorizer),
    Sequence(Vec<Authorizer>),
}

impl AuthorizerInput {
    fn into_authorizer(self) -> Authorizer {
        match self {
            Self::Single(authorizer) => authorizer,
            Self::Sequence(authorizers) => Authorizer::chain(authorizers),
        }
    }
}

impl From<Authorizer> for AuthorizerInput {
    fn from(value: Authorizer) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<Authorizer>> for AuthorizerInput {
    fn from(value: Vec<Authorizer>) -> Self {
        Self::Sequence(value)
    }
}

/// Partial configuration update. `None` fields leave the current value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigPatch {
    pub authorizer: Option<AuthorizerInput>,
    pub sign_in_path: Option<String>,
    pub forbidden_path: Option<String>,
}

impl ConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authorizer(mut self, authorizer: impl Into<AuthorizerInput>) -> Self {
        self.authorizer = Some(authorizer.into());
        self
    }

    pub fn with_sign_in_path(mut self, path: impl Into<String>) -> Self {
        self.sign_in_path = Some(path.into());
        self
    }

    pub fn with_forbidden_path(mut self, path: impl Into<String>) -> Self {
        self.forbidden_path = Some(path.into());
        self
    }

    /// Read the path fields from a loosely typed document.
    ///
    /// Accepts `signInPath`/`forbiddenPath` as well as their snake_case
    /// spellings. Fields that are not strings are skipped. An `authorizer`
    /// key cannot carry a callable and is always skipped.
    pub fn from_value(value: &Value) -> Self {
        let mut patch = Self::default();
        let Some(obj) = value.as_object() else {
            debug!(target: "routeguard", "ignoring non-object configuration document");
            return patch;
        };

        let string_field = |camel: &str, snake: &str| {
            obj.get(camel)
                .or_else(|| obj.get(snake))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        patch.sign_in_path = string_field("signInPath", "sign_in_path");
        patch.forbidden_path = string_field("forbiddenPath", "forbidden_path");

        if obj.contains_key("authorizer") {
            debug!(target: "routeguard", "ignoring 'authorizer' in configuration document");
        }

        patch
    }
}

/// Guard configuration.
///
/// # Invariants
/// - `authorizer` must be set before routes are registered.
/// - Fields only ever change through [`GuardConfig::configure`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardConfig {
    authorizer: Option<Authorizer>,
    sign_in_path: Option<String>,
    forbidden_path: Option<String>,
}

impl GuardConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        config.configure(ConfigPatch {
            authorizer: None,
            sign_in_path: lookup(SIGN_IN_PATH_ENV),
            forbidden_path: lookup(FORBIDDEN_PATH_ENV),
        });
        config
    }

    /// Merge a partial update into this configuration.
    ///
    /// Later calls only overwrite the fields they actually supply.
    pub fn configure(&mut self, patch: ConfigPatch) -> &mut Self {
        if let Some(authorizer) = patch.authorizer {
            self.authorizer = Some(authorizer.into_authorizer());
        }
        if let Some(path) = patch.sign_in_path {
            self.sign_in_path = Some(path);
        }
        if let Some(path) = patch.forbidden_path {
            self.forbidden_path = Some(path);
        }
        self
    }

    /// Merge a loosely typed document (see [`ConfigPatch::from_value`]).
    pub fn configure_from_value(&mut self, value: &Value) -> &mut Self {
        self.configure(ConfigPatch::from_value(value))
    }

    /// Builder-style [`GuardConfig::configure`].
    pub fn with(mut self, patch: ConfigPatch) -> Self {
        self.configure(patch);
        self
    }

    pub fn authorizer(&self) -> Option<&Authorizer> {
        self.authorizer.as_ref()
    }

    /// Sign-in redirect target. Empty strings count as unset.
    pub fn sign_in_path(&self) -> Option<&str> {
        self.sign_in_path.as_deref().filter(|p| !p.is_empty())
    }

    /// Forbidden redirect target. Empty strings count as unset.
    pub fn forbidden_path(&self) -> Option<&str> {
        self.forbidden_path.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn configure_sets_supplied_fields() {
        let authorizer = Authorizer::fixed(["USER"]);
        let config = GuardConfig::new().with(
            ConfigPatch::new()
                .with_authorizer(authorizer.clone())
                .with_sign_in_path("/users/sign-in")
                .with_forbidden_path("/forbidden"),
        );

        assert_eq!(config.authorizer(), Some(&authorizer));
        assert_eq!(config.sign_in_path(), Some("/users/sign-in"));
        assert_eq!(config.forbidden_path(), Some("/forbidden"));
    }

    #[test]
    fn partial_update_preserves_missing_fields() {
        let f = Authorizer::fixed(["ADMIN"]);
        let mut config = GuardConfig::new();
        config.configure(
            ConfigPatch::new()
                .with_authorizer(f.clone())
                .with_forbidden_path("/403"),
        );
        config.configure(ConfigPatch::new().with_sign_in_path("/login"));

        assert_eq!(config.authorizer(), Some(&f));
        assert_eq!(config.sign_in_path(), Some("/login"));
        assert_eq!(config.forbidden_path(), Some("/403"));
    }

    #[test]
    fn configure_twice_with_same_payload_is_idempotent() {
        let f = Authorizer::fixed(["ADMIN"]);
        let patch = ConfigPatch::new()
            .with_authorizer(f)
            .with_sign_in_path("/login")
            .with_forbidden_path("/403");

        let mut once = GuardConfig::new();
        once.configure(patch.clone());

        let mut twice = GuardConfig::new();
        twice.configure(patch.clone()).configure(patch);

        assert_eq!(once, twice);
    }

    #[test]
    fn sequence_authorizer_merges_roles_in_order() {
        let chain = AuthorizerInput::from(vec![
            Authorizer::fixed(["USER"]),
            Authorizer::fixed(["ADMIN", "USER"]),
        ]);
        let config = GuardConfig::new().with(ConfigPatch {
            authorizer: Some(chain),
            ..ConfigPatch::default()
        });

        let roles = config.authorizer().unwrap().resolve();
        assert_eq!(roles.to_strings(), vec!["USER", "ADMIN"]);
    }

    #[test]
    fn value_patch_ignores_wrong_shapes() {
        let mut config = GuardConfig::new();
        config.configure_from_value(&json!({
            "signInPath": "/login",
            "forbiddenPath": "/403",
        }));
        config.configure_from_value(&json!({
            "signInPath": 42,
            "forbiddenPath": ["/nope"],
            "authorizer": "not callable",
        }));

        assert_eq!(config.sign_in_path(), Some("/login"));
        assert_eq!(config.forbidden_path(), Some("/403"));
        assert!(config.authorizer().is_none());
    }

    #[test]
    fn value_patch_accepts_snake_case_keys() {
        let patch = ConfigPatch::from_value(&json!({ "sign_in_path": "/in" }));
        assert_eq!(patch.sign_in_path.as_deref(), Some("/in"));
        assert!(patch.forbidden_path.is_none());
    }

    #[test]
    fn non_object_document_is_ignored() {
        let mut config = GuardConfig::new().with(ConfigPatch::new().with_sign_in_path("/login"));
        config.configure_from_value(&json!("/elsewhere"));
        assert_eq!(config.sign_in_path(), Some("/login"));
    }

    #[test]
    fn environment_lookup_fills_paths() {
        let config = GuardConfig::from_lookup(|key| match key {
            SIGN_IN_PATH_ENV => Some("/env/sign-in".to_string()),
            _ => None,
        });
        assert_eq!(config.sign_in_path(), Some("/env/sign-in"));
        assert!(config.forbidden_path().is_none());
        assert!(config.authorizer().is_none());
    }

    #[test]
    fn empty_paths_count_as_unset() {
        let config = GuardConfig::new().with(ConfigPatch::new().with_sign_in_path(""));
        assert!(config.sign_in_path().is_none());
    }
}

//! Navigation path newtype.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::GuardError;

/// An absolute navigation path such as `/users/sign-in`.
///
/// Paths are compared verbatim; no normalization of trailing slashes or
/// query strings happens at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePath(String);

impl RoutePath {
    pub fn new(path: impl Into<String>) -> Result<Self, GuardError> {
        let path = path.into();
        if path.is_empty() {
            return Err(GuardError::invalid_path("path must not be empty"));
        }
        if !path.starts_with('/') {
            return Err(GuardError::invalid_path(format!(
                "path '{path}' must start with '/'"
            )));
        }
        if path.chars().any(char::is_whitespace) {
            return Err(GuardError::invalid_path(format!(
                "path '{path}' must not contain whitespace"
            )));
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RoutePath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RoutePath {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoutePath {
    type Error = GuardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoutePath> for String {
    fn from(value: RoutePath) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_paths() {
        let path: RoutePath = "/users/sign-in".parse().unwrap();
        assert_eq!(path.as_str(), "/users/sign-in");
        assert_eq!(path.to_string(), "/users/sign-in");
    }

    #[test]
    fn rejects_relative_and_empty_paths() {
        assert!(matches!(RoutePath::new(""), Err(GuardError::InvalidPath(_))));
        assert!(matches!(RoutePath::new("admin"), Err(GuardError::InvalidPath(_))));
        assert!(matches!(RoutePath::new("/a b"), Err(GuardError::InvalidPath(_))));
    }

    #[test]
    fn deserializes_through_validation() {
        let ok: RoutePath = serde_json::from_str("\"/403\"").unwrap();
        assert_eq!(ok.as_str(), "/403");

        let err = serde_json::from_str::<RoutePath>("\"403\"");
        assert!(err.is_err());
    }
}

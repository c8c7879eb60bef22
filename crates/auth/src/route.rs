//! Route metadata read by the policy.

use serde::{Deserialize, Deserializer, Serialize};

use crate::config::Authorizer;
use crate::roles::{RoleList, RoleSpec};

/// Role protection attached to a route.
///
/// A present `auth` with no `allows` still marks the route as one that gets
/// an authorizer resolver, but does not restrict access. A bare `""` counts
/// as no `allows`; `[]` keeps the route protected and admits nobody.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteAuth {
    #[serde(
        default,
        deserialize_with = "deserialize_allows",
        skip_serializing_if = "Option::is_none"
    )]
    pub allows: Option<RoleList>,
}

fn deserialize_allows<'de, D>(deserializer: D) -> Result<Option<RoleList>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RoleSpec>::deserialize(deserializer)? {
        None => None,
        Some(RoleSpec::One(role)) if role.is_empty() => None,
        Some(spec) => Some(spec.into()),
    })
}

impl RouteAuth {
    pub fn allows(roles: impl Into<RoleList>) -> Self {
        Self {
            allows: Some(roles.into()),
        }
    }
}

/// Pre-activation resolvers attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolvers {
    pub authorizer: Option<Authorizer>,
}

/// A navigation target as the routing system describes it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<RouteAuth>,

    #[serde(skip)]
    pub resolve: Option<Resolvers>,
}

impl Route {
    /// A route with no role protection.
    pub fn open() -> Self {
        Self::default()
    }

    /// A route restricted to the given role(s).
    pub fn protected(allows: impl Into<RoleList>) -> Self {
        Self {
            auth: Some(RouteAuth::allows(allows)),
            resolve: None,
        }
    }

    /// Attach a route-specific authorizer, overriding the global one.
    pub fn with_authorizer(mut self, authorizer: Authorizer) -> Self {
        self.resolve.get_or_insert_with(Resolvers::default).authorizer = Some(authorizer);
        self
    }

    /// Roles required to enter this route, if it is protected.
    pub fn required_roles(&self) -> Option<&RoleList> {
        self.auth.as_ref().and_then(|auth| auth.allows.as_ref())
    }

    /// The authorizer resolver attached to this route, if any.
    pub fn authorizer(&self) -> Option<&Authorizer> {
        self.resolve.as_ref().and_then(|r| r.authorizer.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_route_descriptors() {
        let route: Route = serde_json::from_str(r#"{ "auth": { "allows": "ADMIN" } }"#).unwrap();
        assert_eq!(route.required_roles(), Some(&RoleList::from("ADMIN")));

        let bare_auth: Route = serde_json::from_str(r#"{ "auth": {} }"#).unwrap();
        assert!(bare_auth.auth.is_some());
        assert!(bare_auth.required_roles().is_none());

        let open: Route = serde_json::from_str("{}").unwrap();
        assert_eq!(open, Route::open());
    }

    #[test]
    fn empty_string_allows_is_unprotected_but_empty_array_is_not() {
        use crate::policy::is_allowed;

        let blank: Route = serde_json::from_str(r#"{ "auth": { "allows": "" } }"#).unwrap();
        assert!(blank.auth.is_some());
        assert!(blank.required_roles().is_none());
        assert!(is_allowed(&blank, &RoleList::from("USER")));
        assert!(is_allowed(&blank, &RoleList::empty()));

        let none: Route = serde_json::from_str(r#"{ "auth": { "allows": [] } }"#).unwrap();
        assert_eq!(none.required_roles(), Some(&RoleList::empty()));
        assert!(!is_allowed(&none, &RoleList::from("USER")));

        let null: Route = serde_json::from_str(r#"{ "auth": { "allows": null } }"#).unwrap();
        assert!(null.required_roles().is_none());
    }

    #[test]
    fn with_authorizer_creates_resolver_container() {
        let authorizer = Authorizer::fixed(["ADMIN"]);
        let route = Route::protected("ADMIN").with_authorizer(authorizer.clone());
        assert_eq!(route.authorizer(), Some(&authorizer));
    }
}

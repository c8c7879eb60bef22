use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for route protection.
///
/// Roles are intentionally opaque strings at this layer; the guard only ever
/// compares them for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Role {
    fn from(value: &'static str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Role value as it appears on the wire: a bare identifier or a sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleSpec {
    One(Role),
    Many(Vec<Role>),
}

/// Canonical, ordered sequence of roles.
///
/// Every comparison in the policy goes through this type. An absent role
/// value, `[]` and empty identifiers all normalize to the empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RoleSpec", into = "Vec<Role>")]
pub struct RoleList(Vec<Role>);

impl RoleList {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    /// First role of `self` (in order) that `other` also contains.
    pub fn first_match<'a>(&'a self, other: &RoleList) -> Option<&'a Role> {
        self.0.iter().find(|role| other.contains(role))
    }

    /// Append roles not already present, keeping first-seen order.
    pub fn extend_unique(&mut self, roles: impl IntoIterator<Item = Role>) {
        for role in roles {
            if !role.is_empty() && !self.0.contains(&role) {
                self.0.push(role);
            }
        }
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|r| r.as_str().to_string()).collect()
    }
}

/// Normalize a role value into the canonical [`RoleList`].
///
/// A bare identifier becomes a one-element list, `None` becomes the empty
/// list and empty identifiers are dropped. Order is preserved.
///
/// Dropping empty identifiers means a session holding only `[""]` counts as
/// holding no roles and is sent to sign-in, not to the forbidden page as a
/// plain length check on the raw list would do.
pub fn to_role_list(value: Option<RoleSpec>) -> RoleList {
    let roles = match value {
        None => Vec::new(),
        Some(RoleSpec::One(role)) => vec![role],
        Some(RoleSpec::Many(roles)) => roles,
    };
    RoleList(roles.into_iter().filter(|r| !r.is_empty()).collect())
}

impl From<RoleSpec> for RoleList {
    fn from(value: RoleSpec) -> Self {
        to_role_list(Some(value))
    }
}

impl From<Option<RoleSpec>> for RoleList {
    fn from(value: Option<RoleSpec>) -> Self {
        to_role_list(value)
    }
}

impl From<RoleList> for Vec<Role> {
    fn from(value: RoleList) -> Self {
        value.0
    }
}

impl From<Vec<Role>> for RoleList {
    fn from(value: Vec<Role>) -> Self {
        to_role_list(Some(RoleSpec::Many(value)))
    }
}

impl From<Role> for RoleList {
    fn from(value: Role) -> Self {
        to_role_list(Some(RoleSpec::One(value)))
    }
}

impl From<&'static str> for RoleList {
    fn from(value: &'static str) -> Self {
        Role::new(value).into()
    }
}

impl<const N: usize> From<[&'static str; N]> for RoleList {
    fn from(value: [&'static str; N]) -> Self {
        value.into_iter().map(Role::new).collect::<Vec<_>>().into()
    }
}

impl FromIterator<Role> for RoleList {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl<'a> IntoIterator for &'a RoleList {
    type Item = &'a Role;
    type IntoIter = core::slice::Iter<'a, Role>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_identifier_becomes_one_element_list() {
        let list = to_role_list(Some(RoleSpec::One(Role::new("ADMIN"))));
        assert_eq!(list.to_strings(), vec!["ADMIN"]);
    }

    #[test]
    fn absent_and_empty_values_normalize_to_empty_list() {
        assert!(to_role_list(None).is_empty());
        assert!(to_role_list(Some(RoleSpec::Many(vec![]))).is_empty());
        assert!(to_role_list(Some(RoleSpec::One(Role::new("")))).is_empty());
    }

    #[test]
    fn list_of_only_empty_identifiers_counts_as_no_roles() {
        let list: RoleList = serde_json::from_str("[\"\"]").unwrap();
        assert!(list.is_empty());
        assert!(crate::policy::can_sign_in(&crate::route::Route::open(), &list));
    }

    #[test]
    fn order_is_preserved() {
        let list = RoleList::from(["USER", "ADMIN", "AUDITOR"]);
        assert_eq!(list.to_strings(), vec!["USER", "ADMIN", "AUDITOR"]);
    }

    #[test]
    fn deserializes_string_or_array() {
        let one: RoleList = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(one, RoleList::from("ADMIN"));

        let many: RoleList = serde_json::from_str("[\"ADMIN\",\"USER\"]").unwrap();
        assert_eq!(many, RoleList::from(["ADMIN", "USER"]));

        // Serializes back in the canonical (array) shape.
        assert_eq!(serde_json::to_string(&one).unwrap(), "[\"ADMIN\"]");
    }

    #[test]
    fn first_match_scans_in_own_order() {
        let held = RoleList::from(["USER", "ADMIN"]);
        let required = RoleList::from(["ADMIN", "USER"]);
        assert_eq!(held.first_match(&required).map(Role::as_str), Some("USER"));
    }

    #[test]
    fn extend_unique_skips_duplicates() {
        let mut list = RoleList::from(["USER"]);
        list.extend_unique(vec![Role::new("USER"), Role::new("ADMIN"), Role::new("")]);
        assert_eq!(list.to_strings(), vec!["USER", "ADMIN"]);
    }
}

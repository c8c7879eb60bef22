//! Route table owned by the host routing system.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use routeguard_auth::Route;
use routeguard_core::{GuardResult, RoutePath};

/// Mapping of path → route descriptor.
///
/// Serialized as a JSON object keyed by path, e.g.
/// `{ "/admin": { "auth": { "allows": "ADMIN" } }, "/": {} }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: BTreeMap<RoutePath, Route>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> GuardResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style insert.
    pub fn with_route(mut self, path: RoutePath, route: Route) -> Self {
        self.insert(path, route);
        self
    }

    pub fn insert(&mut self, path: RoutePath, route: Route) -> Option<Route> {
        self.routes.insert(path, route)
    }

    pub fn get(&self, path: &RoutePath) -> Option<&Route> {
        self.routes.get(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RoutePath, &Route)> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl FromIterator<(RoutePath, Route)> for RouteTable {
    fn from_iter<T: IntoIterator<Item = (RoutePath, Route)>>(iter: T) -> Self {
        Self {
            routes: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routeguard_auth::RoleList;
    use routeguard_core::GuardError;

    #[test]
    fn loads_table_from_json() {
        let table = RouteTable::from_json(
            r#"{
                "/": {},
                "/admin": { "auth": { "allows": "ADMIN" } },
                "/reports": { "auth": { "allows": ["ADMIN", "AUDITOR"] } }
            }"#,
        )
        .unwrap();

        assert_eq!(table.len(), 3);
        let reports = table.get(&RoutePath::new("/reports").unwrap()).unwrap();
        assert_eq!(reports.required_roles(), Some(&RoleList::from(["ADMIN", "AUDITOR"])));
    }

    #[test]
    fn rejects_relative_route_keys() {
        let err = RouteTable::from_json(r#"{ "admin": {} }"#).unwrap_err();
        assert!(matches!(err, GuardError::Serialization(_)));
    }
}

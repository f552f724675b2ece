//! The closed set of routes a build produces

use indexmap::IndexMap;
use serde::Serialize;

use crate::helpers::post_path;

/// What a route renders
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    /// The post list
    Index,
    /// One post detail page
    Post { uid: String },
}

/// Every route of the site, in generation order
///
/// Built once from the identifiers the API reports; anything not in the
/// table is not a page of the site.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: IndexMap<String, Route>,
}

impl RouteTable {
    /// The index route plus one detail route per uid
    pub fn from_identifiers<I, S>(uids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut routes = IndexMap::new();
        routes.insert(String::new(), Route::Index);

        for uid in uids {
            let uid = uid.into();
            let path = post_path(&uid);
            if routes.insert(path.clone(), Route::Post { uid }).is_some() {
                tracing::warn!("Duplicate route {}", path);
            }
        }

        Self { routes }
    }

    /// Route for a path relative to the site root
    pub fn resolve(&self, path: &str) -> Option<&Route> {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            return self.routes.get("");
        }
        let path = if path.ends_with('/') {
            path.to_string()
        } else {
            format!("{}/", path)
        };
        self.routes.get(&path)
    }

    /// Whether a detail page exists for `uid`
    pub fn contains_post(&self, uid: &str) -> bool {
        self.routes.contains_key(&post_path(uid))
    }

    /// Uids of every detail route, in order
    pub fn post_uids(&self) -> impl Iterator<Item = &str> {
        self.routes.values().filter_map(|r| match r {
            Route::Post { uid } => Some(uid.as_str()),
            Route::Index => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Route)> {
        self.routes.iter().map(|(p, r)| (p.as_str(), r))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_closed() {
        let table = RouteTable::from_identifiers(["hello", "world"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.resolve("/"), Some(&Route::Index));
        assert_eq!(
            table.resolve("/post/hello/"),
            Some(&Route::Post {
                uid: "hello".to_string()
            })
        );
        assert!(table.resolve("post/world").is_some());
        assert!(table.resolve("/post/unknown/").is_none());
        assert!(table.contains_post("world"));
        assert!(!table.contains_post("unknown"));
    }

    #[test]
    fn test_post_uids_keep_order_and_dedupe() {
        let table = RouteTable::from_identifiers(["b", "a", "b"]);
        let uids: Vec<_> = table.post_uids().collect();
        assert_eq!(uids, ["b", "a"]);
    }
}

//! Route table planning: derive, order, and check route files.
//!
//! # Design Decisions
//! - Stable sort by level; equal levels keep discovery order
//! - Two files deriving the same URL path are rejected before anything is
//!   loaded, since the router would otherwise panic or shadow one of them

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;
use thiserror::Error;

use crate::routing::path::RouteFile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("route files `{first}` and `{second}` both map to `{url_path}`")]
    DuplicateUrlPath {
        url_path: String,
        first: String,
        second: String,
    },
}

/// Route files in mount order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<RouteFile>,
}

impl RouteTable {
    /// Derive a route for each file and order them for mounting.
    pub fn plan<I, P>(files: I, extensions: &[String]) -> Result<Self, PlanError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        let mut routes: Vec<RouteFile> = files
            .into_iter()
            .map(|f| RouteFile::from_relative_path(f.as_ref(), extensions))
            .collect();
        routes.sort_by_key(|r| r.level);

        let mut seen: HashMap<&str, &str> = HashMap::with_capacity(routes.len());
        for route in &routes {
            if let Some(first) = seen.insert(&route.url_path, &route.file_path) {
                return Err(PlanError::DuplicateUrlPath {
                    url_path: route.url_path.clone(),
                    first: first.to_string(),
                    second: route.file_path.clone(),
                });
            }
        }

        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[RouteFile] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteFile> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn into_routes(self) -> Vec<RouteFile> {
        self.routes
    }

    /// Emit one log line per planned route.
    pub fn log(&self) {
        for route in &self.routes {
            tracing::info!(
                target: "file_router::routes",
                mount_level = route.level,
                url_path = %route.url_path,
                file = %route.file_path,
                "Planned route"
            );
        }
    }

    /// Aligned text table: level, URL path, file.
    pub fn render(&self) -> String {
        let url_width = self
            .routes
            .iter()
            .map(|r| r.url_path.len())
            .chain(std::iter::once("URL".len()))
            .max()
            .unwrap_or(0);

        let mut out = String::new();
        let _ = writeln!(out, "{:<5}  {:<url_width$}  FILE", "LEVEL", "URL");
        for route in &self.routes {
            let _ = writeln!(
                out,
                "{:<5}  {:<url_width$}  {}",
                route.level, route.url_path, route.file_path
            );
        }
        out
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteFile;
    type IntoIter = std::slice::Iter<'a, RouteFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts() -> Vec<String> {
        vec!["ts".to_string()]
    }

    fn urls(table: &RouteTable) -> Vec<&str> {
        table.iter().map(|r| r.url_path.as_str()).collect()
    }

    #[test]
    fn test_orders_by_level() {
        let table = RouteTable::plan(
            ["admin/users.ts", "json.ts", "index.ts", "admin/index.ts"],
            &exts(),
        )
        .unwrap();

        assert_eq!(urls(&table), vec!["/", "/json", "/admin", "/admin/users"]);
        let levels: Vec<_> = table.iter().map(|r| r.level).collect();
        assert_eq!(levels, vec![0, 1, 1, 2]);
    }

    #[test]
    fn test_sort_is_stable() {
        let table = RouteTable::plan(["zeta.ts", "b/index.ts", "alpha.ts", "a/index.ts"], &exts())
            .unwrap();
        assert_eq!(urls(&table), vec!["/zeta", "/b", "/alpha", "/a"]);
    }

    #[test]
    fn test_duplicate_url_path_rejected() {
        let err = RouteTable::plan(["admin.ts", "admin/index.ts"], &exts()).unwrap_err();
        assert_eq!(
            err,
            PlanError::DuplicateUrlPath {
                url_path: "/admin".to_string(),
                first: "admin.ts".to_string(),
                second: "admin/index.ts".to_string(),
            }
        );
    }

    #[test]
    fn test_duplicate_across_extensions() {
        let exts = vec!["ts".to_string(), "tsx".to_string()];
        assert!(RouteTable::plan(["page.ts", "page.tsx"], &exts).is_err());
    }

    #[test]
    fn test_empty_plan() {
        let table = RouteTable::plan(Vec::<String>::new(), &exts()).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_render() {
        let table = RouteTable::plan(["index.ts", "admin/users.ts"], &exts()).unwrap();
        let rendered = table.render();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "LEVEL  URL           FILE");
        assert_eq!(lines[1], "0      /             index.ts");
        assert_eq!(lines[2], "2      /admin/users  admin/users.ts");
    }

    #[test]
    fn test_serializes_as_array() {
        let table = RouteTable::plan(["index.ts"], &exts()).unwrap();
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "file_path": "index.ts", "url_path": "/", "level": 0 }])
        );
    }
}

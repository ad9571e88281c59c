//! File path → URL path derivation.
//!
//! # Rules
//! - `index.<ext>` at the root → `/`, level 0
//! - `dir/index.<ext>` → `/dir`, level = segments − 1
//! - anything else → `/` + path with the extension stripped, level = segments
//!
//! Lower levels mount first. Dynamic segments (`{id}`) are not considered
//! by the level rule.

use serde::{Deserialize, Serialize};

const INDEX_STEM: &str = "index";

/// A discovered route file with its derived URL path and mount level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFile {
    /// Path relative to the base directory, `/`-separated.
    pub file_path: String,
    pub url_path: String,
    pub level: usize,
}

impl RouteFile {
    /// Derive URL path and level for a relative file path.
    pub fn from_relative_path(file_path: &str, extensions: &[String]) -> Self {
        let normalized = normalize(file_path);
        let segments: Vec<&str> = normalized.split('/').collect();
        let last = segments.len() - 1;

        let is_index = strip_extension(segments[last], extensions) == Some(INDEX_STEM);
        let is_root_index = is_index && segments.len() == 1;

        let (url_path, level) = if is_root_index {
            ("/".to_string(), 0)
        } else if is_index {
            (format!("/{}", segments[..last].join("/")), segments.len() - 1)
        } else {
            let mut parts = segments.clone();
            if let Some(stem) = strip_extension(segments[last], extensions) {
                parts[last] = stem;
            }
            (format!("/{}", parts.join("/")), segments.len())
        };

        Self {
            file_path: normalized,
            url_path,
            level,
        }
    }

    /// Index files sit one level above their segment count.
    pub fn is_index(&self) -> bool {
        self.level + 1 == self.segment_count()
    }

    fn segment_count(&self) -> usize {
        self.file_path.split('/').count()
    }
}

/// Registry key for a route file: its relative path without the extension.
pub fn module_key(file_path: &str, extensions: &[String]) -> String {
    let normalized = normalize(file_path);
    match normalized.rsplit_once('/') {
        Some((dir, name)) => match strip_extension(name, extensions) {
            Some(stem) => format!("{dir}/{stem}"),
            None => normalized,
        },
        None => match strip_extension(&normalized, extensions) {
            Some(stem) => stem.to_string(),
            None => normalized,
        },
    }
}

/// Strip a recognised extension from a file name, if present.
fn strip_extension<'a>(name: &'a str, extensions: &[String]) -> Option<&'a str> {
    extensions.iter().find_map(|ext| {
        name.strip_suffix(ext.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
    })
}

fn normalize(file_path: &str) -> String {
    let replaced = file_path.replace('\\', "/");
    replaced
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts() -> Vec<String> {
        ["ts", "js", "tsx", "jsx"].iter().map(|s| s.to_string()).collect()
    }

    fn route(path: &str) -> RouteFile {
        RouteFile::from_relative_path(path, &ts())
    }

    #[test]
    fn test_root_index() {
        let r = route("index.ts");
        assert_eq!(r.url_path, "/");
        assert_eq!(r.level, 0);
        assert!(r.is_index());
    }

    #[test]
    fn test_root_file() {
        let r = route("json.ts");
        assert_eq!(r.url_path, "/json");
        assert_eq!(r.level, 1);
        assert!(!r.is_index());
    }

    #[test]
    fn test_nested_index() {
        let r = route("admin/index.ts");
        assert_eq!(r.url_path, "/admin");
        assert_eq!(r.level, 1);
        assert!(r.is_index());
    }

    #[test]
    fn test_nested_file() {
        let r = route("admin/users.ts");
        assert_eq!(r.url_path, "/admin/users");
        assert_eq!(r.level, 2);
    }

    #[test]
    fn test_deep_index_and_file() {
        let r = route("a/b/c/index.tsx");
        assert_eq!(r.url_path, "/a/b/c");
        assert_eq!(r.level, 3);

        let r = route("a/b/c/d.jsx");
        assert_eq!(r.url_path, "/a/b/c/d");
        assert_eq!(r.level, 4);
    }

    #[test]
    fn test_index_needs_recognised_extension() {
        let r = route("admin/index.md");
        assert_eq!(r.url_path, "/admin/index.md");
        assert_eq!(r.level, 2);

        let r = route("admin/indexes.ts");
        assert_eq!(r.url_path, "/admin/indexes");
    }

    #[test]
    fn test_only_final_extension_is_stripped() {
        let r = route("v1.ts/users.ts");
        assert_eq!(r.url_path, "/v1.ts/users");

        let r = route("users.spec.ts");
        assert_eq!(r.url_path, "/users.spec");
    }

    #[test]
    fn test_backslashes_normalised() {
        let r = route("admin\\users.ts");
        assert_eq!(r.file_path, "admin/users.ts");
        assert_eq!(r.url_path, "/admin/users");
    }

    #[test]
    fn test_rust_extension() {
        let r = RouteFile::from_relative_path("admin/index.rs", &["rs".to_string()]);
        assert_eq!(r.url_path, "/admin");
        assert_eq!(r.level, 1);
    }

    #[test]
    fn test_module_key() {
        assert_eq!(module_key("index.tsx", &ts()), "index");
        assert_eq!(module_key("admin/users.ts", &ts()), "admin/users");
        assert_eq!(module_key("./admin\\users.ts", &ts()), "admin/users");
        assert_eq!(module_key("notes.md", &ts()), "notes.md");
    }
}

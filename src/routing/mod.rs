//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Discovered files (relative paths)
//!     → path.rs (url path + level per file)
//!     → plan.rs (stable sort by level, reject duplicate url paths)
//!     → registry.rs (module key → RouteDescriptor)
//!     → descriptor.rs (fresh sub-router, setup, middlewares)
//!     → assembler.rs (mount sub-router at url path, in order)
//!     → Return: the caller's app router, populated
//! ```
//!
//! # Design Decisions
//! - Mount order is the table order; nothing runs concurrently
//! - `/` merges into the app router, every other path nests
//! - Sub-routers never share middleware; each file's chain wraps only its
//!   own endpoints

pub mod assembler;
pub mod descriptor;
pub mod group;
pub mod middleware;
pub mod path;
pub mod plan;
pub mod registry;
pub mod watcher;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use axum::Router;

pub use assembler::{apply_file_routers, plan_routes, AssembleError, AssemblySummary};
pub use descriptor::{file_route, file_route_with, RouteDescriptor};
pub use group::{route_group, route_group_with};
pub use middleware::Middleware;
pub use path::RouteFile;
pub use plan::{PlanError, RouteTable};
pub use registry::{LoadError, RegistryError, RouteRegistry};
pub use watcher::RouteTableWatcher;

/// Error type for user-supplied setup functions and loaders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Attach `child` to `parent` under `prefix`.
///
/// The root prefix merges, since axum does not nest at `/`.
pub(crate) fn mount<S>(parent: Router<S>, prefix: &str, child: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        parent.merge(child)
    } else if prefix.starts_with('/') {
        parent.nest(prefix, child)
    } else {
        parent.nest(&format!("/{prefix}"), child)
    }
}

/// Like [`mount`], but reports overlapping routes instead of panicking.
///
/// `parent` is left untouched; on success the combined router is returned.
pub(crate) fn try_mount<S>(parent: &Router<S>, prefix: &str, child: Router<S>) -> Result<Router<S>, String>
where
    S: Clone + Send + Sync + 'static,
{
    panic::catch_unwind(AssertUnwindSafe(|| mount(parent.clone(), prefix, child)))
        .map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "router rejected the mount".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;

    #[test]
    fn test_try_mount_reports_overlap_and_keeps_parent() {
        let parent: Router = Router::new().route("/json", get(|| async { "index" }));
        let child: Router = Router::new().route("/", get(|| async { "json" }));

        assert!(try_mount(&parent, "/json", child).is_err());
        assert!(try_mount(&parent, "/other", Router::new().route("/", get(|| async { "x" }))).is_ok());
    }
}

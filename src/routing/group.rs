//! Route groups: a set of endpoints under one base path.
//!
//! Useful inside a route file's setup to carve out a sub-tree with its own
//! middlewares, or to build a router by hand outside file discovery.

use axum::Router;

use crate::routing::middleware::{wrap, Middleware};
use crate::routing::mount;

/// Build a router whose endpoints live under `path`.
pub fn route_group<S, F>(path: &str, setup: F) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    F: FnOnce(Router<S>) -> Router<S>,
{
    route_group_with(path, Vec::new(), setup)
}

/// Build a router whose endpoints live under `path`, each wrapped by
/// `middlewares` in list order. An empty list behaves like [`route_group`].
pub fn route_group_with<S, F>(path: &str, middlewares: Vec<Middleware<S>>, setup: F) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    F: FnOnce(Router<S>) -> Router<S>,
{
    let router = wrap(setup(Router::new()), &middlewares);
    mount(Router::new(), path, router)
}

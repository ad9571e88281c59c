//! Filesystem-driven route composition for axum.
//!
//! Route files under a base directory are discovered by glob, each is given
//! a URL path derived from its file path, and the matching route modules
//! are mounted onto one application router in a deterministic order.

pub mod config;
pub mod discovery;
pub mod observability;
pub mod routing;

pub use config::FileRouterOptions;
pub use routing::{
    apply_file_routers, file_route, file_route_with, plan_routes, route_group, route_group_with,
    AssembleError, AssemblySummary, BoxError, Middleware, RouteDescriptor, RouteFile,
    RouteRegistry, RouteTable,
};

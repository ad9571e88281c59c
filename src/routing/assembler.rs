//! Router assembly: discover, plan, load, and mount route files.
//!
//! # Responsibilities
//! - Turn options into a planned route table
//! - Load each route module in table order
//! - Build one isolated sub-router per file and mount it on the app router
//!
//! # Design Decisions
//! - Strictly sequential: each file is loaded, set up, and mounted before
//!   the next file's module is loaded, because mount order decides which
//!   prefix wins
//! - First failure aborts; routes mounted before it stay mounted
//! - A sub-router whose endpoints overlap routes already on the app router
//!   is a mount error, and the app router is left as it was
//! - The app router is borrowed exclusively for the whole run

use std::path::PathBuf;

use axum::Router;
use thiserror::Error;

use crate::config::{validate_options, FileRouterOptions, ValidationError};
use crate::discovery::{discover, DiscoveryError};
use crate::routing::path::module_key;
use crate::routing::plan::{PlanError, RouteTable};
use crate::routing::registry::{LoadError, RouteRegistry};
use crate::routing::{try_mount, BoxError};

/// Why an assembly run stopped.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("invalid file router options: {}", join_errors(.0))]
    InvalidOptions(Vec<ValidationError>),

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error("failed to load route file {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: LoadError,
    },

    #[error("route file {} failed to register its endpoints: {source}", .path.display())]
    Setup {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("route file {} overlaps existing routes at `{url_path}`: {reason}", .path.display())]
    Mount {
        url_path: String,
        path: PathBuf,
        reason: String,
    },
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of a successful assembly run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblySummary {
    /// Every planned route, in mount order.
    pub table: RouteTable,
    /// Number of sub-routers mounted.
    pub mounted: usize,
    pub dry_run: bool,
}

/// Validate options, discover files, and plan the route table.
///
/// Never loads a module.
pub fn plan_routes(options: &FileRouterOptions) -> Result<RouteTable, AssembleError> {
    validate_options(options).map_err(AssembleError::InvalidOptions)?;
    let files = discover(options)?;
    Ok(RouteTable::plan(&files, &options.extensions)?)
}

/// Mount every route file matched by `options` onto `app`.
///
/// On error, `app` keeps the sub-routers mounted before the failing file.
pub async fn apply_file_routers<S>(
    app: &mut Router<S>,
    registry: &RouteRegistry<S>,
    options: &FileRouterOptions,
) -> Result<AssemblySummary, AssembleError>
where
    S: Clone + Send + Sync + 'static,
{
    let table = plan_routes(options)?;

    if options.debug {
        table.log();
    }
    if options.dry_run {
        tracing::info!(routes = table.len(), "Dry run, nothing mounted");
        return Ok(AssemblySummary {
            table,
            mounted: 0,
            dry_run: true,
        });
    }

    let base = options.base_dir();
    let timeout = options.load_timeout_duration();
    let mut mounted = 0;

    for route in &table {
        let path = base.join(&route.file_path);
        let key = module_key(&route.file_path, &options.extensions);

        let descriptor = registry
            .load(&key, timeout)
            .await
            .map_err(|source| AssembleError::Load {
                path: path.clone(),
                source,
            })?;
        let middlewares = descriptor.middlewares().len();
        let sub_router = descriptor
            .build()
            .map_err(|source| AssembleError::Setup {
                path: path.clone(),
                source,
            })?;

        *app = try_mount(app, &route.url_path, sub_router).map_err(|reason| {
            AssembleError::Mount {
                url_path: route.url_path.clone(),
                path,
                reason,
            }
        })?;
        mounted += 1;

        tracing::debug!(
            url_path = %route.url_path,
            file = %route.file_path,
            module = %key,
            middlewares,
            "Route mounted"
        );
    }

    tracing::info!(mounted, "File routes mounted");
    Ok(AssemblySummary {
        table,
        mounted,
        dry_run: false,
    })
}

//! Route file discovery subsystem.
//!
//! # Data Flow
//! ```text
//! FileRouterOptions (pattern, ignore, cwd)
//!     → glob.rs (compile patterns to anchored regexes)
//!     → walk.rs (recursive walk of cwd, sorted per directory)
//!     → Vec<String> of `/`-separated relative paths
//! ```
//!
//! # Design Decisions
//! - Synchronous: discovery runs to completion before anything is loaded
//! - Patterns are compiled before the walk so a bad pattern never touches disk
//! - Discovery order is deterministic but not a contract; callers sort

pub mod glob;
pub mod walk;

use std::path::PathBuf;

use thiserror::Error;

pub use glob::{Glob, GlobSet};
pub use walk::discover;

/// Failure to enumerate route files. Nothing is mounted when this occurs.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("invalid glob pattern `{pattern}`: {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("base directory {} does not exist or is not a directory", .path.display())]
    BaseDir { path: PathBuf },

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: jwalk::Error,
    },

    #[error("path {} is not valid UTF-8", .path.display())]
    NonUtf8Path { path: PathBuf },
}

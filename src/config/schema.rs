//! Configuration schema definitions.
//!
//! This module defines the option set accepted by the file router.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Options for one assembly run.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileRouterOptions {
    /// Glob patterns selecting route files, relative to `cwd`.
    pub pattern: Vec<String>,

    /// Base directory for discovery and module lookup.
    /// Defaults to the process working directory.
    pub cwd: Option<PathBuf>,

    /// Plan the route table but never load or mount anything.
    pub dry_run: bool,

    /// Log the planned route table before mounting.
    pub debug: bool,

    /// Recognised source extensions, without the leading dot.
    pub extensions: Vec<String>,

    /// Glob patterns excluded from discovery.
    pub ignore: Vec<String>,

    /// Let wildcards match names starting with `.`.
    pub dot: bool,

    /// Descend into symlinked directories. Symlinked files are always
    /// considered.
    pub follow_symlinks: bool,

    /// Maximum number of path segments below `cwd`.
    pub max_depth: Option<usize>,

    /// Per-module load timeout in milliseconds. Absent means no limit.
    pub load_timeout_ms: Option<u64>,
}

impl Default for FileRouterOptions {
    fn default() -> Self {
        Self {
            pattern: Vec::new(),
            cwd: None,
            dry_run: false,
            debug: false,
            extensions: vec!["rs".to_string()],
            ignore: Vec::new(),
            dot: false,
            follow_symlinks: false,
            max_depth: None,
            load_timeout_ms: None,
        }
    }
}

impl FileRouterOptions {
    /// Create options for the given glob patterns.
    pub fn new<I, P>(patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            pattern: patterns.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Replace the recognised source extensions.
    pub fn extensions<I, E>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    pub fn ignore<I, P>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.ignore = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-module load timeout, rounded up to whole milliseconds.
    pub fn load_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_nanos().div_ceil(1_000_000);
        self.load_timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    /// Directory discovery starts from.
    pub fn base_dir(&self) -> PathBuf {
        self.cwd.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Configured load timeout, if any.
    pub fn load_timeout_duration(&self) -> Option<Duration> {
        self.load_timeout_ms.map(Duration::from_millis)
    }
}

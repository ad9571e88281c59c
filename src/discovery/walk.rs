//! Directory walk producing the candidate route file list.

use std::path::{Component, Path};

use jwalk::WalkDir;

use crate::config::FileRouterOptions;
use crate::discovery::glob::GlobSet;
use crate::discovery::DiscoveryError;

/// Enumerate files under `options.base_dir()` matching `options.pattern`.
///
/// Paths are returned relative to the base directory, `/`-separated, in
/// walk order (depth-first, names sorted per directory). A file matched by
/// several patterns appears once.
pub fn discover(options: &FileRouterOptions) -> Result<Vec<String>, DiscoveryError> {
    let include = GlobSet::new(&options.pattern)?;
    let exclude = GlobSet::new(&options.ignore)?;
    let base = options.base_dir();

    if !base.is_dir() {
        return Err(DiscoveryError::BaseDir { path: base });
    }

    let mut walk = WalkDir::new(&base)
        .sort(true)
        .skip_hidden(false)
        .follow_links(options.follow_symlinks);
    if let Some(depth) = options.max_depth {
        walk = walk.max_depth(depth);
    }

    let mut files = Vec::new();
    for entry in walk {
        let entry = entry.map_err(|source| DiscoveryError::Walk {
            path: base.clone(),
            source,
        })?;
        let path = entry.path();
        let file_type = entry.file_type();
        if !(file_type.is_file() || (file_type.is_symlink() && path.is_file())) {
            continue;
        }

        let relative = relative_key(&path, &base)?;
        if include.matches(&relative, options.dot) && !exclude.matches(&relative, options.dot) {
            files.push(relative);
        }
    }

    tracing::debug!(
        base = %base.display(),
        count = files.len(),
        "Route files discovered"
    );
    Ok(files)
}

/// Join the components of `path` below `base` with `/`.
fn relative_key(path: &Path, base: &Path) -> Result<String, DiscoveryError> {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let mut segments = Vec::new();
    for component in relative.components() {
        if let Component::Normal(name) = component {
            let name = name.to_str().ok_or_else(|| DiscoveryError::NonUtf8Path {
                path: path.to_path_buf(),
            })?;
            segments.push(name);
        }
    }
    Ok(segments.join("/"))
}

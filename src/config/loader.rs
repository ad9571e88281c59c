//! Option loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::FileRouterOptions;
use crate::config::validation::{validate_options, ValidationError};

/// Error type for option loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load and validate file router options from a TOML file.
///
/// Relative `cwd` values are resolved against the directory holding the file.
pub fn load_options(path: &Path) -> Result<FileRouterOptions, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let mut options: FileRouterOptions = toml::from_str(&content).map_err(ConfigError::Parse)?;

    validate_options(&options).map_err(ConfigError::Validation)?;

    if let (Some(cwd), Some(parent)) = (options.cwd.as_ref(), path.parent()) {
        if cwd.is_relative() {
            options.cwd = Some(parent.join(cwd));
        }
    }

    Ok(options)
}

//! Option validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject option sets that can never produce a route table
//! - Validate value ranges (depth and timeout > 0)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FileRouterOptions → Result<(), Vec<ValidationError>>
//! - Glob syntax is checked later by discovery, which owns the pattern compiler

use thiserror::Error;

use crate::config::schema::FileRouterOptions;

/// A single semantic problem with a set of options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("pattern must list at least one glob")]
    NoPatterns,

    #[error("pattern #{index} is blank")]
    BlankPattern { index: usize },

    #[error("extensions must list at least one source extension")]
    NoExtensions,

    #[error("extension `{extension}` must not start with a dot or be blank")]
    InvalidExtension { extension: String },

    #[error("max_depth must be greater than zero")]
    ZeroDepth,

    #[error("load_timeout_ms must be greater than zero")]
    ZeroTimeout,
}

/// Check every semantic rule and collect all violations.
pub fn validate_options(options: &FileRouterOptions) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if options.pattern.is_empty() {
        errors.push(ValidationError::NoPatterns);
    }
    for (index, pattern) in options.pattern.iter().enumerate() {
        if pattern.trim().is_empty() {
            errors.push(ValidationError::BlankPattern { index });
        }
    }

    if options.extensions.is_empty() {
        errors.push(ValidationError::NoExtensions);
    }
    for extension in &options.extensions {
        if extension.trim().is_empty() || extension.starts_with('.') {
            errors.push(ValidationError::InvalidExtension {
                extension: extension.clone(),
            });
        }
    }

    if options.max_depth == Some(0) {
        errors.push(ValidationError::ZeroDepth);
    }
    if options.load_timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_options() {
        let options = FileRouterOptions::new(["**/*.rs"]);
        assert!(validate_options(&options).is_ok());
    }

    #[test]
    fn test_missing_pattern() {
        let options = FileRouterOptions::default();
        assert_eq!(
            validate_options(&options),
            Err(vec![ValidationError::NoPatterns])
        );
    }

    #[test]
    fn test_collects_all_errors() {
        let mut options = FileRouterOptions::new(["**/*.rs", "  "]).extensions([".rs"]);
        options.max_depth = Some(0);
        options.load_timeout_ms = Some(0);

        let errors = validate_options(&options).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BlankPattern { index: 1 },
                ValidationError::InvalidExtension {
                    extension: ".rs".to_string()
                },
                ValidationError::ZeroDepth,
                ValidationError::ZeroTimeout,
            ]
        );
    }

    #[test]
    fn test_empty_extensions() {
        let options = FileRouterOptions::new(["*"]).extensions(Vec::<String>::new());
        assert_eq!(
            validate_options(&options),
            Err(vec![ValidationError::NoExtensions])
        );
    }
}

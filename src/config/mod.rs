//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! options file (TOML) or builder calls
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → FileRouterOptions (validated, immutable)
//!     → borrowed by discovery and the assembler
//! ```
//!
//! # Design Decisions
//! - Options are immutable for the duration of one assembly run
//! - All fields except `pattern` have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_options, ConfigError};
pub use schema::FileRouterOptions;
pub use validation::{validate_options, ValidationError};

//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! discovery, planning, assembly
//!     → tracing events (structured fields: url_path, file, module)
//!     → logging.rs (subscriber, filter, stderr formatter)
//! ```
//!
//! # Design Decisions
//! - Library code only emits events; installing a subscriber is the
//!   binary's job
//! - The planned route table is logged under its own target,
//!   `file_router::routes`, so it can be filtered independently

pub mod logging;

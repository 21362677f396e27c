//! Shared types for the Flair libraries
//!
//! This crate contains the error taxonomy, string helpers and logging
//! bootstrap used by the resource and configuration crates.

pub mod error;
pub mod logging;
pub mod strings;

// Re-export commonly used types
pub use error::{
    ConfigError, ErrorKind, ErrorParams, FlairError, PropertiesError, ResourceError, Result,
};
pub use logging::{init_logging, LoggingError, LoggingSettings};
pub use strings::{is_blank, not_blank};

//! Freebies Core - Foundation types, error handling, configuration, and logging.
//!
//! This crate provides the shared foundation used by the other Freebies crates:
//! - Application configuration (database location, logging)
//! - A single error type covering configuration, storage, and model errors
//! - Structured logging with tracing
//! - Platform data directory lookup
//! - Common constants

pub mod config;
pub mod error;
pub mod logging;
pub mod platform;
pub mod constants;

// Re-export commonly used items at the crate root
pub use config::AppConfig;
pub use error::{FbError, FbResult};
pub use logging::{init_logging, init_logging_from};
pub use platform::Platform;

//! Freebies Models - Database schema, entity models, and queries.
//!
//! This crate owns all data persistence: SQLite database initialization,
//! the Company / Dev / Freebie models, and the foreign-key lookups that
//! connect them.

pub mod db;
pub mod schema;
pub mod models;
pub mod queries;

// Re-export key types
pub use db::{Database, DbPool, DatabaseStats};
pub use models::company::Company;
pub use models::dev::{Dev, Transfer};
pub use models::freebie::Freebie;
pub use queries::SortDirection;

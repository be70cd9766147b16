//! Global error types for the Freebies application.
//!
//! All error categories across the workspace are unified into a single
//! `FbError` enum with conversions from underlying library errors.

use thiserror::Error;

/// Convenience type alias for Results using FbError.
pub type FbResult<T> = Result<T, FbError>;

/// Unified error type covering all error categories in Freebies.
#[derive(Error, Debug)]
pub enum FbError {
    // -- Configuration errors --
    /// Failed to load or parse application configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// A required configuration value is missing.
    #[error("missing configuration: {0}")]
    MissingConfig(String),

    // -- Database errors --
    /// SQLite database error.
    #[error("database error: {0}")]
    Database(String),

    /// A NOT NULL, UNIQUE, or FOREIGN KEY constraint rejected a write.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Database connection pool error.
    #[error("connection pool error: {0}")]
    Pool(String),

    /// Database integrity check failed.
    #[error("database integrity check failed: {0}")]
    IntegrityCheck(String),

    // -- Model errors --
    /// The entity has no identifier yet, so it cannot be referenced.
    #[error("{0} has not been saved")]
    NotPersisted(&'static str),

    /// No row with the given identifier.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind ("company", "dev", "freebie").
        entity: &'static str,
        /// Identifier that was looked up.
        id: i64,
    },

    /// A freebie reference is unset or points at a missing row.
    #[error("freebie '{item_name}' has no resolvable {reference}")]
    UnresolvedReference {
        /// Item name of the freebie being rendered.
        item_name: String,
        /// Which reference failed: "dev" or "company".
        reference: &'static str,
    },

    // -- File/IO errors --
    /// File system operation failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    // -- Generic --
    /// An unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Wrapping anyhow errors for interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<serde_json::Error> for FbError {
    fn from(e: serde_json::Error) -> Self {
        FbError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for FbError {
    fn from(e: toml::de::Error) -> Self {
        FbError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fb_error_display() {
        let err = FbError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn test_not_found_display() {
        let err = FbError::NotFound { entity: "dev", id: 7 };
        assert_eq!(err.to_string(), "dev 7 not found");
    }

    #[test]
    fn test_unresolved_reference_display() {
        let err = FbError::UnresolvedReference {
            item_name: "Sticker".into(),
            reference: "company",
        };
        assert_eq!(err.to_string(), "freebie 'Sticker' has no resolvable company");
    }

    #[test]
    fn test_toml_error_converts_to_config() {
        let parse: Result<toml::Value, _> = toml::from_str("not = [valid");
        let err: FbError = parse.unwrap_err().into();
        assert!(matches!(err, FbError::Config(_)));
    }
}

//! Application-wide constants.

/// Application name, also used as the data directory name.
pub const APP_NAME: &str = "Freebies";

/// Application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the SQLite database inside the data directory.
pub const DB_FILE_NAME: &str = "freebies.db";

/// File name of the TOML configuration inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Base name for rotated log files.
pub const LOG_FILE_NAME: &str = "freebies.log";

/// SQLite busy timeout applied to every pooled connection, in milliseconds.
pub const DB_BUSY_TIMEOUT_MS: u32 = 5_000;

/// Table names, in dependency order (referenced tables first).
pub mod tables {
    pub const COMPANIES: &str = "companies";
    pub const DEVS: &str = "devs";
    pub const FREEBIES: &str = "freebies";

    /// All entity tables.
    pub const ALL: &[&str] = &[COMPANIES, DEVS, FREEBIES];
}

//! Database initialization, connection pooling, and lifecycle management.
//!
//! Uses SQLite (optionally in WAL mode) with r2d2 connection pooling.
//! Foreign keys are enforced on every pooled connection.

use std::path::Path;
use std::sync::Arc;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{Connection, ErrorCode};
use tracing::{info, warn, error};

use fb_core::config::{AppConfig, DatabaseConfig};
use fb_core::constants::{tables, DB_BUSY_TIMEOUT_MS};
use fb_core::error::{FbError, FbResult};

use crate::schema;

/// Type alias for the SQLite connection pool.
pub type DbPool = Pool<SqliteConnectionManager>;

/// Map a SQLite error onto the workspace error type.
///
/// Constraint failures (NOT NULL, FOREIGN KEY, UNIQUE) become
/// `FbError::Constraint`; everything else is `FbError::Database`.
pub fn map_db_err(e: rusqlite::Error) -> FbError {
    match e {
        rusqlite::Error::SqliteFailure(ref err, _) if err.code == ErrorCode::ConstraintViolation => {
            FbError::Constraint(e.to_string())
        }
        other => FbError::Database(other.to_string()),
    }
}

/// Database wrapper providing initialization, pooling, and lifecycle management.
#[derive(Clone)]
pub struct Database {
    pool: Arc<DbPool>,
}

impl Database {
    /// Initialize the database at the given path with the provided configuration.
    ///
    /// This:
    /// 1. Creates the database file and parent directories if needed
    /// 2. Sets up connection pooling with per-connection pragmas
    /// 3. Runs an integrity check if configured
    /// 4. Creates the schema tables
    pub fn init(db_path: &Path, config: &DatabaseConfig) -> FbResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        info!("initializing database at {}", db_path.display());

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_customizer(Box::new(ConnectionCustomizer {
                wal_mode: config.wal_mode,
            }))
            .build(manager)
            .map_err(|e| FbError::Pool(e.to_string()))?;

        let db = Self {
            pool: Arc::new(pool),
        };

        if config.integrity_check_on_startup {
            db.run_integrity_check()?;
        }

        {
            let conn = db.conn()?;
            schema::create_tables(&conn)?;
        }

        info!("database initialized successfully");
        Ok(db)
    }

    /// Open the database described by an application config.
    pub fn open(config: &AppConfig) -> FbResult<Self> {
        let path = config.effective_db_path()?;
        Self::init(&path, &config.database)
    }

    /// Get a connection from the pool.
    pub fn conn(&self) -> FbResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool.get().map_err(|e| FbError::Pool(e.to_string()))
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Run a SQLite integrity check.
    pub fn run_integrity_check(&self) -> FbResult<()> {
        let conn = self.conn()?;
        let result: String = conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))
            .map_err(map_db_err)?;

        if result != "ok" {
            error!("database integrity check failed: {result}");
            return Err(FbError::IntegrityCheck(result));
        }

        info!("database integrity check passed");
        Ok(())
    }

    /// Execute a function within a database transaction.
    ///
    /// The transaction commits only if `f` returns `Ok`; otherwise it is
    /// rolled back when dropped.
    pub fn transaction<T, F>(&self, f: F) -> FbResult<T>
    where
        F: FnOnce(&Connection) -> FbResult<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(map_db_err)?;

        let result = f(&tx)?;

        tx.commit().map_err(map_db_err)?;

        Ok(result)
    }

    /// Get database statistics (row counts per table).
    pub fn stats(&self) -> FbResult<DatabaseStats> {
        let conn = self.conn()?;

        let count = |table: &str| -> FbResult<i64> {
            let sql = format!("SELECT COUNT(*) FROM {table}");
            conn.query_row(&sql, [], |row| row.get(0)).map_err(map_db_err)
        };

        Ok(DatabaseStats {
            companies: count(tables::COMPANIES)?,
            devs: count(tables::DEVS)?,
            freebies: count(tables::FREEBIES)?,
        })
    }

    /// Reset the database by dropping and recreating all tables.
    pub fn reset(&self) -> FbResult<()> {
        warn!("resetting database - all data will be lost");
        let conn = self.conn()?;
        schema::drop_tables(&conn)?;
        schema::create_tables(&conn)?;
        info!("database reset complete");
        Ok(())
    }
}

/// Database row count statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseStats {
    pub companies: i64,
    pub devs: i64,
    pub freebies: i64,
}

impl std::fmt::Display for DatabaseStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "companies={}, devs={}, freebies={}",
            self.companies, self.devs, self.freebies
        )
    }
}

/// r2d2 connection customizer that applies PRAGMA settings.
#[derive(Debug)]
struct ConnectionCustomizer {
    wal_mode: bool,
}

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionCustomizer {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        if self.wal_mode {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }

        conn.execute_batch(&format!(
            "PRAGMA synchronous=NORMAL;
             PRAGMA busy_timeout={DB_BUSY_TIMEOUT_MS};
             PRAGMA foreign_keys=ON;"
        ))?;

        Ok(())
    }
}

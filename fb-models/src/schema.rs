//! Database schema definitions and table creation.
//!
//! Three tables: `companies`, `devs`, and `freebies`, where each freebie
//! carries foreign keys into the other two. Foreign-key constraints are named
//! `fk_<table>_<column>_<referred_table>`.

use rusqlite::Connection;
use fb_core::error::{FbError, FbResult};
use tracing::info;

/// Create all database tables and indexes if they do not exist.
pub fn create_tables(conn: &Connection) -> FbResult<()> {
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| FbError::Database(format!("failed to create schema: {e}")))?;
    info!("database schema verified");
    Ok(())
}

/// Drop all tables (used for database reset).
pub fn drop_tables(conn: &Connection) -> FbResult<()> {
    conn.execute_batch(
        "DROP TABLE IF EXISTS freebies;
         DROP TABLE IF EXISTS devs;
         DROP TABLE IF EXISTS companies;",
    )
    .map_err(|e| FbError::Database(format!("failed to drop tables: {e}")))?;
    Ok(())
}

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS companies (
    id                              INTEGER PRIMARY KEY AUTOINCREMENT,
    name                            TEXT NOT NULL,
    founding_year                   INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_companies_founding_year ON companies(founding_year);

CREATE TABLE IF NOT EXISTS devs (
    id                              INTEGER PRIMARY KEY AUTOINCREMENT,
    name                            TEXT NOT NULL
);

-- dev_id / company_id stay nullable so rows can exist transiently unlinked.
CREATE TABLE IF NOT EXISTS freebies (
    id                              INTEGER PRIMARY KEY AUTOINCREMENT,
    item_name                       TEXT NOT NULL,
    value                           INTEGER NOT NULL,
    dev_id                          INTEGER
        CONSTRAINT fk_freebies_dev_id_devs REFERENCES devs(id),
    company_id                      INTEGER
        CONSTRAINT fk_freebies_company_id_companies REFERENCES companies(id)
);

CREATE INDEX IF NOT EXISTS idx_freebies_dev_id ON freebies(dev_id);
CREATE INDEX IF NOT EXISTS idx_freebies_company_id ON freebies(company_id);
CREATE INDEX IF NOT EXISTS idx_freebies_dev_item ON freebies(dev_id, item_name);
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use fb_core::constants::tables;

    fn object_exists(conn: &Connection, kind: &str, name: &str) -> bool {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
                [kind, name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_create_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        for table in tables::ALL {
            assert!(object_exists(&conn, "table", table), "table {table} should exist");
        }
    }

    #[test]
    fn test_create_tables_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        create_tables(&conn).unwrap();
    }

    #[test]
    fn test_drop_and_recreate() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();
        drop_tables(&conn).unwrap();
        assert!(!object_exists(&conn, "table", "freebies"));
        create_tables(&conn).unwrap();
        assert!(object_exists(&conn, "table", "freebies"));
    }

    #[test]
    fn test_indexes_created() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        for idx in ["idx_freebies_dev_id", "idx_freebies_company_id", "idx_companies_founding_year"] {
            assert!(object_exists(&conn, "index", idx), "index {idx} should exist");
        }
    }

    #[test]
    fn test_not_null_columns_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        create_tables(&conn).unwrap();

        assert!(conn.execute("INSERT INTO companies (name) VALUES ('Hooli')", []).is_err());
        assert!(conn.execute("INSERT INTO devs (name) VALUES (NULL)", []).is_err());
        assert!(conn.execute("INSERT INTO freebies (item_name) VALUES ('Mug')", []).is_err());
    }
}

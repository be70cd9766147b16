//! Entity model definitions.

pub mod company;
pub mod dev;
pub mod freebie;

/// In-memory connection with foreign keys on and the schema created.
#[cfg(test)]
pub(crate) fn test_conn() -> rusqlite::Connection {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("PRAGMA foreign_keys=ON;").unwrap();
    crate::schema::create_tables(&conn).unwrap();
    conn
}

//! Dev entity model and ownership transfer.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, warn};
use fb_core::error::{FbError, FbResult};

use crate::db::map_db_err;
use crate::queries;
use super::freebie::Freebie;

/// A developer who receives freebies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dev {
    pub id: Option<i64>,
    pub name: String,
}

/// Outcome of [`Dev::give_away`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    /// The freebie now belongs to the target dev.
    Transferred,
    /// The giving dev did not own the freebie; nothing changed.
    NotOwner,
}

impl Transfer {
    /// Whether ownership actually changed hands.
    pub fn is_transferred(&self) -> bool {
        matches!(self, Transfer::Transferred)
    }
}

impl Dev {
    /// Create an unsaved dev.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Construct a Dev from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    /// Find a dev by its database ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> FbResult<Option<Self>> {
        conn.query_row("SELECT * FROM devs WHERE id = ?1", [id], Self::from_row)
            .optional()
            .map_err(map_db_err)
    }

    /// All devs in insertion order.
    pub fn all(conn: &Connection) -> FbResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM devs ORDER BY id")
            .map_err(map_db_err)?;
        let rows = stmt.query_map([], Self::from_row).map_err(map_db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_db_err)
    }

    /// Delete a dev by its database ID.
    ///
    /// Fails with a constraint error while freebies still reference it.
    pub fn delete(conn: &Connection, id: i64) -> FbResult<bool> {
        let changed = conn
            .execute("DELETE FROM devs WHERE id = ?1", [id])
            .map_err(map_db_err)?;
        Ok(changed > 0)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Whether this dev owns at least one freebie named exactly `item_name`.
    ///
    /// Fails with `NotPersisted` for an unsaved dev, like [`Dev::freebies`].
    pub fn received_one(&self, conn: &Connection, item_name: &str) -> FbResult<bool> {
        let id = self.id.ok_or(FbError::NotPersisted("dev"))?;
        Ok(queries::count_freebies_by_dev_and_item(conn, id, item_name)? > 0)
    }

    /// Hand `freebie` to `target` if this dev currently owns it.
    ///
    /// Ownership is checked against the stored row, not the in-memory
    /// `freebie.dev_id`. On success `freebie.dev_id` is updated to match.
    pub fn give_away(
        &self,
        conn: &Connection,
        target: &Dev,
        freebie: &mut Freebie,
    ) -> FbResult<Transfer> {
        let owner_id = self.id.ok_or(FbError::NotPersisted("dev"))?;
        let target_id = target.id.ok_or(FbError::NotPersisted("dev"))?;
        let freebie_id = freebie.id.ok_or(FbError::NotPersisted("freebie"))?;

        let changed = conn
            .execute(
                "UPDATE freebies SET dev_id = ?1 WHERE id = ?2 AND dev_id = ?3",
                params![target_id, freebie_id, owner_id],
            )
            .map_err(map_db_err)?;

        if changed == 0 {
            if Freebie::find_by_id(conn, freebie_id)?.is_none() {
                return Err(FbError::NotFound { entity: "freebie", id: freebie_id });
            }
            warn!(dev = %self.name, freebie_id, "give_away refused: dev does not own freebie");
            return Ok(Transfer::NotOwner);
        }

        freebie.dev_id = Some(target_id);
        debug!(from = %self.name, to = %target.name, freebie_id, "freebie transferred");
        Ok(Transfer::Transferred)
    }

    /// All freebies this dev currently owns.
    ///
    /// Fails with `NotPersisted` for an unsaved dev.
    pub fn freebies(&self, conn: &Connection) -> FbResult<Vec<Freebie>> {
        let id = self.id.ok_or(FbError::NotPersisted("dev"))?;
        queries::freebies_by_dev(conn, id)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Insert this dev, or update it if it already has an ID.
    /// Returns the database ID.
    pub fn save(&mut self, conn: &Connection) -> FbResult<i64> {
        if let Some(id) = self.id {
            let changed = conn
                .execute("UPDATE devs SET name = ?1 WHERE id = ?2", params![self.name, id])
                .map_err(map_db_err)?;
            if changed == 0 {
                return Err(FbError::NotFound { entity: "dev", id });
            }
            return Ok(id);
        }

        conn.execute("INSERT INTO devs (name) VALUES (?1)", [&self.name])
            .map_err(map_db_err)?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        debug!(id, name = %self.name, "dev saved");
        Ok(id)
    }
}

impl std::fmt::Display for Dev {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Dev {}>", self.name)
    }
}

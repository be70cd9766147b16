//! Freebie entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;
use fb_core::error::{FbError, FbResult};

use crate::db::map_db_err;
use super::company::Company;
use super::dev::Dev;

/// A gift item given by a company to a dev.
///
/// `dev_id` and `company_id` are only `None` for rows that were written
/// without going through [`Company::give_freebie`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Freebie {
    pub id: Option<i64>,
    pub item_name: String,
    pub value: i64,
    pub dev_id: Option<i64>,
    pub company_id: Option<i64>,
}

impl Freebie {
    /// Construct a Freebie from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            item_name: row.get("item_name")?,
            value: row.get("value")?,
            dev_id: row.get("dev_id")?,
            company_id: row.get("company_id")?,
        })
    }

    /// Find a freebie by its database ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> FbResult<Option<Self>> {
        conn.query_row("SELECT * FROM freebies WHERE id = ?1", [id], Self::from_row)
            .optional()
            .map_err(map_db_err)
    }

    /// Delete a freebie by its database ID.
    pub fn delete(conn: &Connection, id: i64) -> FbResult<bool> {
        let changed = conn
            .execute("DELETE FROM freebies WHERE id = ?1", [id])
            .map_err(map_db_err)?;
        Ok(changed > 0)
    }

    /// Load the owning dev, if the reference is set and resolves.
    pub fn dev(&self, conn: &Connection) -> FbResult<Option<Dev>> {
        match self.dev_id {
            Some(id) => Dev::find_by_id(conn, id),
            None => Ok(None),
        }
    }

    /// Load the giving company, if the reference is set and resolves.
    pub fn company(&self, conn: &Connection) -> FbResult<Option<Company>> {
        match self.company_id {
            Some(id) => Company::find_by_id(conn, id),
            None => Ok(None),
        }
    }

    /// Render `"<dev> owns a <item> from <company>"`.
    pub fn print_details(&self, conn: &Connection) -> FbResult<String> {
        let dev = self.dev(conn)?.ok_or_else(|| self.unresolved("dev"))?;
        let company = self.company(conn)?.ok_or_else(|| self.unresolved("company"))?;
        Ok(format!("{} owns a {} from {}", dev.name, self.item_name, company.name))
    }

    fn unresolved(&self, reference: &'static str) -> FbError {
        FbError::UnresolvedReference {
            item_name: self.item_name.clone(),
            reference,
        }
    }

    /// Insert this freebie, or update it if it already has an ID.
    /// Returns the database ID.
    ///
    /// Updates only write `item_name` and `value`. The stored references are
    /// read back into `dev_id` / `company_id`; ownership changes go through
    /// [`Dev::give_away`].
    pub fn save(&mut self, conn: &Connection) -> FbResult<i64> {
        if let Some(id) = self.id {
            let refs: Option<(Option<i64>, Option<i64>)> = conn
                .query_row(
                    "UPDATE freebies SET item_name = ?1, value = ?2 WHERE id = ?3
                     RETURNING dev_id, company_id",
                    params![self.item_name, self.value, id],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()
                .map_err(map_db_err)?;
            let Some((dev_id, company_id)) = refs else {
                return Err(FbError::NotFound { entity: "freebie", id });
            };
            self.dev_id = dev_id;
            self.company_id = company_id;
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO freebies (item_name, value, dev_id, company_id) VALUES (?1, ?2, ?3, ?4)",
            params![self.item_name, self.value, self.dev_id, self.company_id],
        )
        .map_err(map_db_err)?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        debug!(id, item = %self.item_name, "freebie saved");
        Ok(id)
    }
}

impl std::fmt::Display for Freebie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Freebie {} - Value: {}>", self.item_name, self.value)
    }
}

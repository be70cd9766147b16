//! Company entity model.

use serde::{Deserialize, Serialize};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;
use fb_core::error::{FbError, FbResult};

use crate::db::map_db_err;
use crate::queries::{self, SortDirection};
use super::dev::Dev;
use super::freebie::Freebie;

/// A company that hands out freebies.
///
/// Freebies reference their company through `Freebie::company_id`; the
/// company itself holds no back-pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: Option<i64>,
    pub name: String,
    pub founding_year: i32,
}

impl Company {
    /// Create an unsaved company.
    pub fn new(name: impl Into<String>, founding_year: i32) -> Self {
        Self {
            id: None,
            name: name.into(),
            founding_year,
        }
    }

    /// Construct a Company from a database row.
    pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            founding_year: row.get("founding_year")?,
        })
    }

    // ─── Static finders ──────────────────────────────────────────────────

    /// Find a company by its database ID.
    pub fn find_by_id(conn: &Connection, id: i64) -> FbResult<Option<Self>> {
        conn.query_row("SELECT * FROM companies WHERE id = ?1", [id], Self::from_row)
            .optional()
            .map_err(map_db_err)
    }

    /// All companies in insertion order.
    pub fn all(conn: &Connection) -> FbResult<Vec<Self>> {
        let mut stmt = conn
            .prepare("SELECT * FROM companies ORDER BY id")
            .map_err(map_db_err)?;
        let rows = stmt.query_map([], Self::from_row).map_err(map_db_err)?;
        rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_db_err)
    }

    /// All companies sorted by founding year, ties broken by ID.
    pub fn by_founding_year(conn: &Connection, direction: SortDirection) -> FbResult<Vec<Self>> {
        queries::list_companies_by_founding_year(conn, direction)
    }

    /// The company with the earliest founding year, or `None` if there are
    /// no companies. Ties go to the lowest ID.
    pub fn oldest_company(conn: &Connection) -> FbResult<Option<Self>> {
        conn.query_row(
            "SELECT * FROM companies ORDER BY founding_year ASC, id ASC LIMIT 1",
            [],
            Self::from_row,
        )
        .optional()
        .map_err(map_db_err)
    }

    /// Delete a company by its database ID.
    ///
    /// Fails with a constraint error while freebies still reference it.
    pub fn delete(conn: &Connection, id: i64) -> FbResult<bool> {
        let changed = conn
            .execute("DELETE FROM companies WHERE id = ?1", [id])
            .map_err(map_db_err)?;
        Ok(changed > 0)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Create and persist a freebie given by this company to `dev`.
    ///
    /// Both this company and `dev` must already be saved.
    pub fn give_freebie(
        &self,
        conn: &Connection,
        dev: &Dev,
        item_name: impl Into<String>,
        value: i64,
    ) -> FbResult<Freebie> {
        let company_id = self.id.ok_or(FbError::NotPersisted("company"))?;
        let dev_id = dev.id.ok_or(FbError::NotPersisted("dev"))?;

        let mut freebie = Freebie {
            id: None,
            item_name: item_name.into(),
            value,
            dev_id: Some(dev_id),
            company_id: Some(company_id),
        };
        freebie.save(conn)?;

        debug!(company = %self.name, dev = %dev.name, item = %freebie.item_name, "freebie given");
        Ok(freebie)
    }

    /// All freebies this company has given.
    pub fn freebies(&self, conn: &Connection) -> FbResult<Vec<Freebie>> {
        let id = self.id.ok_or(FbError::NotPersisted("company"))?;
        queries::freebies_by_company(conn, id)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    /// Insert this company, or update it if it already has an ID.
    /// Returns the database ID.
    pub fn save(&mut self, conn: &Connection) -> FbResult<i64> {
        if let Some(id) = self.id {
            let changed = conn
                .execute(
                    "UPDATE companies SET name = ?1, founding_year = ?2 WHERE id = ?3",
                    params![self.name, self.founding_year, id],
                )
                .map_err(map_db_err)?;
            if changed == 0 {
                return Err(FbError::NotFound { entity: "company", id });
            }
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO companies (name, founding_year) VALUES (?1, ?2)",
            params![self.name, self.founding_year],
        )
        .map_err(map_db_err)?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        debug!(id, name = %self.name, "company saved");
        Ok(id)
    }
}

impl std::fmt::Display for Company {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Company {}>", self.name)
    }
}

//! Query functions over the freebie relationships.
//!
//! Relationships are resolved through the foreign-key columns on `freebies`
//! (each backed by an index) rather than through back-pointers on the
//! parent entities. All queries use parameterized SQL.

use rusqlite::{params, Connection};
use fb_core::error::FbResult;

use crate::db::map_db_err;
use crate::models::company::Company;
use crate::models::freebie::Freebie;

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn as_sql(&self) -> &str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Freebies currently owned by `dev_id`, oldest first.
pub fn freebies_by_dev(conn: &Connection, dev_id: i64) -> FbResult<Vec<Freebie>> {
    let mut stmt = conn
        .prepare("SELECT * FROM freebies WHERE dev_id = ?1 ORDER BY id")
        .map_err(map_db_err)?;
    let rows = stmt.query_map([dev_id], Freebie::from_row).map_err(map_db_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_db_err)
}

/// Freebies given by `company_id`, oldest first.
pub fn freebies_by_company(conn: &Connection, company_id: i64) -> FbResult<Vec<Freebie>> {
    let mut stmt = conn
        .prepare("SELECT * FROM freebies WHERE company_id = ?1 ORDER BY id")
        .map_err(map_db_err)?;
    let rows = stmt.query_map([company_id], Freebie::from_row).map_err(map_db_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_db_err)
}

/// Number of freebies owned by `dev_id` whose item name is exactly `item_name`.
pub fn count_freebies_by_dev_and_item(
    conn: &Connection,
    dev_id: i64,
    item_name: &str,
) -> FbResult<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM freebies WHERE dev_id = ?1 AND item_name = ?2",
        params![dev_id, item_name],
        |row| row.get(0),
    )
    .map_err(map_db_err)
}

/// All companies ordered by founding year, ties broken by ascending ID.
pub fn list_companies_by_founding_year(
    conn: &Connection,
    direction: SortDirection,
) -> FbResult<Vec<Company>> {
    let sql = format!(
        "SELECT * FROM companies ORDER BY founding_year {}, id ASC",
        direction.as_sql()
    );
    let mut stmt = conn.prepare(&sql).map_err(map_db_err)?;
    let rows = stmt.query_map([], Company::from_row).map_err(map_db_err)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_db_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dev::Dev;
    use crate::models::test_conn;

    #[test]
    fn test_freebies_by_company_and_dev() {
        let conn = test_conn();
        let mut hooli = Company::new("Hooli", 2005);
        let mut raviga = Company::new("Raviga", 1998);
        hooli.save(&conn).unwrap();
        raviga.save(&conn).unwrap();
        let mut dev = Dev::new("Dinesh");
        dev.save(&conn).unwrap();

        hooli.give_freebie(&conn, &dev, "Sticker", 0).unwrap();
        raviga.give_freebie(&conn, &dev, "Mug", 8).unwrap();
        hooli.give_freebie(&conn, &dev, "Hoodie", 40).unwrap();

        let hooli_items: Vec<String> = freebies_by_company(&conn, hooli.id.unwrap())
            .unwrap()
            .into_iter()
            .map(|f| f.item_name)
            .collect();
        assert_eq!(hooli_items, vec!["Sticker", "Hoodie"]);
        assert_eq!(freebies_by_dev(&conn, dev.id.unwrap()).unwrap().len(), 3);
    }

    #[test]
    fn test_count_is_exact_match() {
        let conn = test_conn();
        let mut company = Company::new("Hooli", 2005);
        company.save(&conn).unwrap();
        let mut dev = Dev::new("Gilfoyle");
        dev.save(&conn).unwrap();
        company.give_freebie(&conn, &dev, "Sticker", 0).unwrap();
        company.give_freebie(&conn, &dev, "Sticker", 0).unwrap();
        company.give_freebie(&conn, &dev, "Sticker pack", 2).unwrap();

        let id = dev.id.unwrap();
        assert_eq!(count_freebies_by_dev_and_item(&conn, id, "Sticker").unwrap(), 2);
        assert_eq!(count_freebies_by_dev_and_item(&conn, id, "Stick").unwrap(), 0);
    }

    #[test]
    fn test_list_companies_by_founding_year() {
        let conn = test_conn();
        for (name, year) in [("A", 1990), ("B", 1985), ("C", 2001)] {
            Company::new(name, year).save(&conn).unwrap();
        }

        let asc: Vec<String> = list_companies_by_founding_year(&conn, SortDirection::Asc)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(asc, vec!["B", "A", "C"]);

        let desc = list_companies_by_founding_year(&conn, SortDirection::Desc).unwrap();
        assert_eq!(desc[0].name, "C");
    }

    #[test]
    fn test_empty_results() {
        let conn = test_conn();
        assert!(freebies_by_dev(&conn, 1).unwrap().is_empty());
        assert!(freebies_by_company(&conn, 1).unwrap().is_empty());
        assert!(list_companies_by_founding_year(&conn, SortDirection::Asc).unwrap().is_empty());
    }
}

//! Shared test utilities for integration tests.

use fb_core::config::{AppConfig, DatabaseConfig};
use fb_models::{Company, Database, Dev};
use tempfile::TempDir;

/// Create a temporary database with the full schema applied.
/// Returns the Database and the TempDir (must be held alive for the duration of the test).
pub fn create_test_db() -> (Database, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let path = dir.path().join("test.db");
    let config = DatabaseConfig::default();
    let db = Database::init(&path, &config).expect("failed to init test database");
    (db, dir)
}

/// Create a default test configuration pointing at a database inside `dir`.
#[allow(dead_code)]
pub fn create_test_config(dir: &TempDir) -> AppConfig {
    let mut config = AppConfig::default();
    config.database.path = dir.path().join("configured.db").display().to_string();
    config.logging.directory = dir.path().join("logs").display().to_string();
    config
}

/// Sample data created by [`seed_test_data`].
#[allow(dead_code)]
pub struct Seeded {
    pub companies: Vec<Company>,
    pub devs: Vec<Dev>,
}

/// Seed the database with a small, realistic data set.
///
/// Creates:
/// - 3 companies (Hooli 2005, Pied Piper 2014, Raviga 1998)
/// - 3 devs (Bertram, Dinesh, Gilfoyle)
/// - 5 freebies spread across them
pub fn seed_test_data(db: &Database) -> Seeded {
    let conn = db.conn().expect("failed to get connection for seeding");

    let mut companies: Vec<Company> = [("Hooli", 2005), ("Pied Piper", 2014), ("Raviga", 1998)]
        .into_iter()
        .map(|(name, year)| Company::new(name, year))
        .collect();
    for company in &mut companies {
        company.save(&conn).expect("failed to insert company");
    }

    let mut devs: Vec<Dev> = ["Bertram", "Dinesh", "Gilfoyle"]
        .into_iter()
        .map(Dev::new)
        .collect();
    for dev in &mut devs {
        dev.save(&conn).expect("failed to insert dev");
    }

    let gifts = [
        (0, 0, "Sticker", 0),
        (0, 1, "Hoodie", 40),
        (1, 1, "Sticker", 0),
        (2, 2, "Mug", 8),
        (1, 2, "Laptop bag", 60),
    ];
    for (company, dev, item, value) in gifts {
        companies[company]
            .give_freebie(&conn, &devs[dev], item, value)
            .expect("failed to insert freebie");
    }

    Seeded { companies, devs }
}

//! SQL schema definitions for the climate SQLite store.
//!
//! The store is normally produced outside this workspace, so the schema
//! serves two purposes: [`create_schema`] builds a fresh store for the
//! `import` command and tests, and [`verify_schema`] checks an existing
//! store at startup so a mismatch fails before the server binds.

use rusqlite::Connection;
use std::collections::HashSet;
use thiserror::Error;

/// Table holding daily precipitation and temperature readings.
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Table holding station metadata.
pub const STATION_TABLE: &str = "stations";

/// Columns every store must provide, per table.
pub const EXPECTED_COLUMNS: &[(&str, &[&str])] = &[
    (MEASUREMENT_TABLE, &["station", "date", "prcp", "tobs"]),
    (
        STATION_TABLE,
        &["station", "name", "latitude", "longitude", "elevation"],
    ),
];

/// Returns the full SQL schema as a single batch string.
///
/// - `measurement` - one row per station and date (`prcp`, `tobs` nullable)
/// - `stations` - station metadata
///
/// Dates are stored as ISO `YYYY-MM-DD` text so range filters compare
/// lexicographically. A station appears once in `stations` and at most once
/// per date in `measurement`, so loading the same export twice replaces
/// rows instead of duplicating them.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS measurement (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        date TEXT NOT NULL,
        prcp REAL,
        tobs REAL,
        UNIQUE (station, date)
    );
    CREATE INDEX IF NOT EXISTS idx_measurement_date ON measurement(date);

    CREATE TABLE IF NOT EXISTS stations (
        id INTEGER PRIMARY KEY,
        station TEXT NOT NULL,
        name TEXT NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        elevation REAL NOT NULL,
        UNIQUE (station)
    );
    "#
}

/// Mismatch between a store and [`EXPECTED_COLUMNS`].
#[derive(Error, Debug, PartialEq)]
pub enum SchemaError {
    #[error("table '{0}' not found in store")]
    MissingTable(String),

    #[error("table '{table}' is missing column '{column}'")]
    MissingColumn { table: String, column: String },
}

/// Check that every expected table and column exists.
///
/// Extra tables and columns are allowed. Column types are not compared,
/// SQLite's dynamic typing makes declared types advisory anyway.
pub fn verify_schema(conn: &Connection) -> anyhow::Result<()> {
    for (table, columns) in EXPECTED_COLUMNS {
        let present = table_columns(conn, table)?;
        if present.is_empty() {
            return Err(SchemaError::MissingTable(table.to_string()).into());
        }
        for column in columns.iter() {
            if !present.contains(*column) {
                return Err(SchemaError::MissingColumn {
                    table: table.to_string(),
                    column: column.to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<HashSet<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<HashSet<_>, _>>()?;
    Ok(names)
}

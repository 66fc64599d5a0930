//! SQLite data access layer for Hawaii weather-station measurements.
//!
//! This crate owns everything between the HTTP handlers and the store file:
//! the expected schema, a CSV loader for building a store, typed result
//! models and one query method per API route.
//!
//! # Architecture
//!
//! - [`Database`] holds only the store path and is cheap to clone and share
//!   across threads.
//! - Every query opens its own read-only connection and drops it before
//!   returning, so concurrent requests never serialize on one handle.
//! - Rows are mapped into the typed structs in [`models`] at the query site.
//!
//! # Usage
//!
//! ```rust,no_run
//! use climate_db::Database;
//!
//! let db = Database::open("hawaii.sqlite").unwrap();
//! let stations = db.query_stations().unwrap();
//! let rain = db.query_precipitation("2016-08-23").unwrap();
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `measurement` - daily precipitation and temperature per station
//! - `stations` - station metadata

pub mod schema;
mod loader;
mod queries;
pub mod models;

use anyhow::Context;
use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Handle to a climate store on disk.
///
/// Cloning shares the path only; connections are acquired per call.
#[derive(Clone, Debug)]
pub struct Database {
    path: Arc<PathBuf>,
}

impl Database {
    /// Open an existing store for querying.
    ///
    /// Fails if the file does not exist or its tables do not match
    /// [`schema::EXPECTED_COLUMNS`].
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            anyhow::bail!("database file {} not found", path.display());
        }
        let db = Self {
            path: Arc::new(path.to_path_buf()),
        };
        let conn = db.connection()?;
        schema::verify_schema(&conn)
            .with_context(|| format!("schema check failed for {}", path.display()))?;
        log::info!("db: opened {}", path.display());
        Ok(db)
    }

    /// Create a store (or reuse an existing file) with the full schema applied.
    pub fn create(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        conn.execute_batch(schema::create_schema())?;
        log::info!("db: schema applied to {}", path.display());
        Ok(Self {
            path: Arc::new(path.to_path_buf()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Acquire a read-only connection scoped to the caller.
    fn connection(&self) -> anyhow::Result<Connection> {
        let conn = Connection::open_with_flags(
            self.path.as_path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("failed to open {}", self.path.display()))?;
        Ok(conn)
    }

    /// Acquire a writable connection for the loader.
    fn writer(&self) -> anyhow::Result<Connection> {
        let conn = Connection::open(self.path.as_path())
            .with_context(|| format!("failed to open {} for writing", self.path.display()))?;
        Ok(conn)
    }
}

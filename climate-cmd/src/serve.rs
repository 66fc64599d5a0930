//! `serve`: open the store, check it, and run the HTTP API.

use climate_api::ServerConfig;
use climate_db::Database;
use log::{info, warn};
use std::path::Path;

pub async fn run_serve(database: &Path, config: ServerConfig) -> anyhow::Result<()> {
    let db = Database::open(database)?;
    describe(&db)?;
    climate_api::serve(db, config).await
}

/// Log what the store contains before accepting requests.
fn describe(db: &Database) -> anyhow::Result<()> {
    let counts = db.count_rows()?;
    info!(
        "Store {} has {} stations and {} measurements",
        db.path().display(),
        counts.stations,
        counts.measurements
    );
    match db.query_date_range()? {
        Some((first, last)) => info!("Measurements span {} to {}", first, last),
        None => warn!("Store has no measurements; every route will return empty results"),
    }
    Ok(())
}

//! `import`: build a store from CSV exports.

use anyhow::Context;
use climate_db::Database;
use log::info;
use std::path::Path;

/// Create the store at `database`, or refresh an existing one, from both CSV files.
///
/// Re-importing the same exports leaves the row counts unchanged.
pub fn run_import(
    database: &Path,
    stations_csv: &Path,
    measurements_csv: &Path,
) -> anyhow::Result<()> {
    let stations = std::fs::read_to_string(stations_csv)
        .with_context(|| format!("failed to read {}", stations_csv.display()))?;
    let measurements = std::fs::read_to_string(measurements_csv)
        .with_context(|| format!("failed to read {}", measurements_csv.display()))?;

    let db = Database::create(database)?;
    db.load_stations(&stations)?;
    db.load_measurements(&measurements)?;

    let counts = db.count_rows()?;
    info!(
        "Import complete. {} now holds {} stations and {} measurements",
        database.display(),
        counts.stations,
        counts.measurements
    );
    Ok(())
}

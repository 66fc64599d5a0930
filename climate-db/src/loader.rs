//! CSV data loading for building a climate store.
//!
//! # CSV Formats
//!
//! - **Stations** (has headers): `station,name,latitude,longitude,elevation`
//! - **Measurements** (has headers): `station,date,prcp,tobs`
//!
//! Each load runs inside a single transaction. Rows whose key (station, or
//! station and date) already exists replace the stored row.

use crate::models::RowCounts;
use crate::Database;
use rusqlite::params;

impl Database {
    /// Load station metadata from a CSV string.
    ///
    /// # Example CSV
    /// ```text
    /// station,name,latitude,longitude,elevation
    /// USC00519397,"WAIKIKI 717.2, HI US",21.2716,-157.8168,3.0
    /// ```
    pub fn load_stations(&self, csv_data: &str) -> anyhow::Result<u32> {
        let mut conn = self.writer()?;
        let tx = conn.transaction()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO stations (station, name, latitude, longitude, elevation)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let station = r.get(0).unwrap_or("").trim();
                let name = r.get(1).unwrap_or("").trim();
                let latitude: f64 = r.get(2).unwrap_or("").trim().parse()?;
                let longitude: f64 = r.get(3).unwrap_or("").trim().parse()?;
                let elevation: f64 = r.get(4).unwrap_or("").trim().parse()?;

                if station.is_empty() {
                    anyhow::bail!("station row {} has no identifier", count + 1);
                }

                stmt.execute(params![station, name, latitude, longitude, elevation])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} stations", count);
        Ok(count)
    }

    /// Load measurements from a CSV string.
    ///
    /// Empty or non-numeric `prcp`/`tobs` values are stored as NULL. Rows
    /// without a station or date are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// station,date,prcp,tobs
    /// USC00519397,2010-01-01,0.08,65
    /// USC00519397,2010-01-02,,63
    /// ```
    pub fn load_measurements(&self, csv_data: &str) -> anyhow::Result<u32> {
        let mut conn = self.writer()?;
        let tx = conn.transaction()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut count = 0u32;
        let mut skipped = 0u32;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO measurement (station, date, prcp, tobs)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for result in rdr.records() {
                let r = result?;
                let station = r.get(0).unwrap_or("").trim();
                let date = r.get(1).unwrap_or("").trim();
                let prcp: Option<f64> = r.get(2).and_then(|s| s.trim().parse().ok());
                let tobs: Option<f64> = r.get(3).and_then(|s| s.trim().parse().ok());

                if station.is_empty() || date.is_empty() {
                    skipped += 1;
                    continue;
                }

                stmt.execute(params![station, date, prcp, tobs])?;
                count += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "loader: Loaded {} measurements, skipped {} without station or date",
            count,
            skipped
        );
        Ok(count)
    }

    /// Count rows in both tables.
    pub fn count_rows(&self) -> anyhow::Result<RowCounts> {
        let conn = self.connection()?;
        let measurements =
            conn.query_row("SELECT COUNT(*) FROM measurement", [], |row| row.get(0))?;
        let stations = conn.query_row("SELECT COUNT(*) FROM stations", [], |row| row.get(0))?;
        Ok(RowCounts {
            measurements,
            stations,
        })
    }
}

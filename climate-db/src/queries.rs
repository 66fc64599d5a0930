//! Typed query methods backing the API routes.
//!
//! Date bounds are plain strings compared against the stored ISO text, so a
//! bound that is not an ISO date simply matches nothing (or everything) and
//! never raises an error here.

use crate::models::{
    Precipitation, StationInfo, TemperatureObservation, TemperatureRange, TemperatureStats,
};
use crate::Database;
use rusqlite::params;

impl Database {
    /// Precipitation readings strictly after `since`, oldest first.
    ///
    /// One entry per row; dates repeat when several stations reported.
    pub fn query_precipitation(&self, since: &str) -> anyhow::Result<Vec<Precipitation>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT date, prcp FROM measurement
             WHERE date > ?1
             ORDER BY date",
        )?;
        let rows = stmt
            .query_map(params![since], |row| {
                Ok(Precipitation {
                    date: row.get(0)?,
                    prcp: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_precipitation returned {} records",
            rows.len()
        );
        Ok(rows)
    }

    /// All station rows.
    pub fn query_stations(&self) -> anyhow::Result<Vec<StationInfo>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT station, name, latitude, longitude, elevation FROM stations
             ORDER BY station",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(StationInfo {
                    station: row.get(0)?,
                    name: row.get(1)?,
                    latitude: row.get(2)?,
                    longitude: row.get(3)?,
                    elevation: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_stations returned {} records", rows.len());
        Ok(rows)
    }

    /// One temperature observation per date strictly after `since`.
    ///
    /// Rows are grouped by date; when several stations reported on the same
    /// day SQLite picks one of them. Results are ordered by station, then date.
    pub fn query_tobs(&self, since: &str) -> anyhow::Result<Vec<TemperatureObservation>> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT station, date, tobs FROM measurement
             WHERE date > ?1
             GROUP BY date
             ORDER BY station, date",
        )?;
        let rows = stmt
            .query_map(params![since], |row| {
                Ok(TemperatureObservation {
                    station: row.get(0)?,
                    date: row.get(1)?,
                    tobs: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!("query: query_tobs returned {} records", rows.len());
        Ok(rows)
    }

    /// Min, max and average `tobs` for dates in `range` (inclusive).
    ///
    /// Always returns exactly one record; its fields are `None` when no
    /// non-null `tobs` matched.
    pub fn query_temperature_stats(
        &self,
        range: &TemperatureRange,
    ) -> anyhow::Result<TemperatureStats> {
        let conn = self.connection()?;
        let map_row = |row: &rusqlite::Row<'_>| -> rusqlite::Result<TemperatureStats> {
            Ok(TemperatureStats {
                minimum: row.get(0)?,
                maximum: row.get(1)?,
                average: row.get(2)?,
            })
        };
        let stats = match &range.end {
            Some(end) => conn.query_row(
                "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement
                 WHERE date >= ?1 AND date <= ?2",
                params![range.start, end],
                map_row,
            )?,
            None => conn.query_row(
                "SELECT MIN(tobs), MAX(tobs), AVG(tobs) FROM measurement
                 WHERE date >= ?1",
                params![range.start],
                map_row,
            )?,
        };
        log::info!(
            "query: query_temperature_stats({} .. {}) -> {:?}",
            range.start,
            range.end.as_deref().unwrap_or("end"),
            stats
        );
        Ok(stats)
    }

    /// The (min, max) measurement dates, `None` for an empty store.
    pub fn query_date_range(&self) -> anyhow::Result<Option<(String, String)>> {
        let conn = self.connection()?;
        let (min_date, max_date) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM measurement",
            [],
            |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            },
        )?;
        Ok(min_date.zip(max_date))
    }
}

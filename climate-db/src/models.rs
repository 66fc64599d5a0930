//! Query result model structs.
//!
//! Each struct is built at the data-access boundary and serializes to the
//! exact JSON object the API returns for its route.

use serde::Serialize;

/// One precipitation reading, as returned by `/api/v1.0/precipitation`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Precipitation {
    pub date: String,
    /// Precipitation in inches; `None` when the station did not report.
    pub prcp: Option<f64>,
}

/// Station metadata, as returned by `/api/v1.0/stations`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StationInfo {
    /// Station identifier (e.g. "USC00519397").
    pub station: String,
    pub name: String,
    /// Coordinates and elevation are `None` when the store has NULLs there;
    /// stores built elsewhere need not declare these columns NOT NULL.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Elevation in feet.
    pub elevation: Option<f64>,
}

/// A temperature observation, as returned by `/api/v1.0/tobs`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperatureObservation {
    pub station: String,
    pub date: String,
    pub tobs: Option<f64>,
}

/// Min/max/average of `tobs` over a date filter.
///
/// All three fields are `None` when no row matched, mirroring SQL aggregate
/// semantics over an empty set.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TemperatureStats {
    #[serde(rename = "Minimum Temp")]
    pub minimum: Option<f64>,
    #[serde(rename = "Maximum Temp")]
    pub maximum: Option<f64>,
    #[serde(rename = "Average Temp")]
    pub average: Option<f64>,
}

/// Inclusive date filter for [`TemperatureStats`] queries.
///
/// Bounds are compared as strings against the stored ISO dates.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureRange {
    pub start: String,
    pub end: Option<String>,
}

impl TemperatureRange {
    pub fn from_start(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }
}

/// Row counts per table, logged at startup and after imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCounts {
    pub measurements: i64,
    pub stations: i64,
}

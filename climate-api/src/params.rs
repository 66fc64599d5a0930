//! Path parameters for the temperature routes.
//!
//! Parameters are captured as raw strings and turned into a
//! [`TemperatureRange`] before any query is built. Outside strict mode the
//! strings pass through untouched: a value that is not an ISO date then
//! matches nothing and the route answers with null statistics.

use climate_db::models::TemperatureRange;
use climate_utils::dates::is_iso_date;
use serde::Deserialize;

use crate::error::ApiError;

/// `/api/v1.0/temp/{start}`
#[derive(Debug, Clone, Deserialize)]
pub struct StartParams {
    pub start: String,
}

/// `/api/v1.0/temp/{start}/{end}`
#[derive(Debug, Clone, Deserialize)]
pub struct RangeParams {
    pub start: String,
    pub end: String,
}

impl StartParams {
    pub fn into_range(self, strict: bool) -> Result<TemperatureRange, ApiError> {
        if strict {
            check_date("start", &self.start)?;
        }
        Ok(TemperatureRange::from_start(self.start))
    }
}

impl RangeParams {
    pub fn into_range(self, strict: bool) -> Result<TemperatureRange, ApiError> {
        if strict {
            check_date("start", &self.start)?;
            check_date("end", &self.end)?;
        }
        Ok(TemperatureRange::between(self.start, self.end))
    }
}

fn check_date(param: &'static str, value: &str) -> Result<(), ApiError> {
    if is_iso_date(value) {
        Ok(())
    } else {
        Err(ApiError::InvalidDate {
            param,
            value: value.to_string(),
        })
    }
}

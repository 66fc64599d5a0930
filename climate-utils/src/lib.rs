//! Shared utility functions for the climate API crates.

/// Date utility functions
pub mod dates {
    use chrono::{Duration, NaiveDate};

    /// Last date of the Hawaii dataset; "last year" queries count back from here.
    pub const DEFAULT_REFERENCE_DATE: &str = "2017-08-23";

    /// Length of the trailing window used by the precipitation and tobs routes.
    pub const WINDOW_DAYS: i64 = 365;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// True if `s` is a real calendar date written as "YYYY-MM-DD".
    ///
    /// chrono accepts unpadded fields ("2017-8-1"), which would not compare
    /// correctly against the stored strings, so the length is checked too.
    pub fn is_iso_date(s: &str) -> bool {
        s.len() == 10 && parse_date(s).is_ok()
    }

    /// The reference date the API uses when none is configured.
    pub fn default_reference_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2017, 8, 23).expect("valid constant date")
    }

    /// Lower bound (exclusive) of the trailing window: `reference` minus 365 days.
    pub fn window_start(reference: &NaiveDate) -> NaiveDate {
        *reference - Duration::days(WINDOW_DAYS)
    }

}

//! Command implementations for the climate CLI.
//!
//! Provides subcommands for serving the JSON API over an existing store
//! and for building a store from CSV exports.

use chrono::NaiveDate;
use clap::Subcommand;
use climate_utils::dates::DEFAULT_REFERENCE_DATE;
use std::net::SocketAddr;
use std::path::PathBuf;

pub mod import;
pub mod serve;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the read-only JSON API
    Serve {
        /// Path to the SQLite store
        #[arg(short, long, default_value = "hawaii.sqlite")]
        database: PathBuf,

        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:5000")]
        bind: SocketAddr,

        /// "Last year" routes cover the 365 days up to this date (YYYY-MM-DD)
        #[arg(long, default_value = DEFAULT_REFERENCE_DATE, value_parser = parse_reference_date)]
        reference_date: NaiveDate,

        /// Answer non-ISO start/end dates with 400 instead of empty results
        #[arg(long)]
        strict_dates: bool,
    },

    /// Build a SQLite store from station and measurement CSV exports
    Import {
        /// Path to the SQLite store (created if missing)
        #[arg(short, long, default_value = "hawaii.sqlite")]
        database: PathBuf,

        /// Station CSV: station,name,latitude,longitude,elevation
        #[arg(short = 's', long)]
        stations_csv: PathBuf,

        /// Measurement CSV: station,date,prcp,tobs
        #[arg(short = 'm', long)]
        measurements_csv: PathBuf,
    },
}

fn parse_reference_date(s: &str) -> Result<NaiveDate, String> {
    climate_utils::dates::parse_date(s).map_err(|e| format!("{}: {}", s, e))
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve {
            database,
            bind,
            reference_date,
            strict_dates,
        } => {
            let config = climate_api::ServerConfig {
                bind,
                reference_date,
                strict_dates,
            };
            serve::run_serve(&database, config).await
        }
        Command::Import {
            database,
            stations_csv,
            measurements_csv,
        } => import::run_import(&database, &stations_csv, &measurements_csv),
    }
}

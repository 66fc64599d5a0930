//! Read-only JSON API over Hawaii weather-station measurements.
//!
//! One axum [`Router`] maps each route to a single query on
//! [`climate_db::Database`]:
//!
//! | Route | Query |
//! |---|---|
//! | `/` | route listing |
//! | `/api/v1.0/precipitation` | precipitation after the window start |
//! | `/api/v1.0/stations` | all stations |
//! | `/api/v1.0/tobs` | one temperature observation per date after the window start |
//! | `/api/v1.0/temp/{start}` | min/avg/max tobs from `start` |
//! | `/api/v1.0/temp/{start}/{end}` | min/avg/max tobs between `start` and `end` |
//!
//! Queries are blocking rusqlite calls, so handlers run them on the blocking
//! pool through [`AppState::run`].

pub mod error;
mod logging;
pub mod params;
pub mod routes;

use anyhow::Context;
use axum::{middleware, routing::get, Router};
use chrono::NaiveDate;
use climate_db::Database;
use climate_utils::dates;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::error::ApiError;

/// Startup settings for the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// "Last year" routes cover the 365 days up to this date.
    pub reference_date: NaiveDate,
    /// Reject `start`/`end` values that are not `YYYY-MM-DD` dates with 400
    /// instead of answering with empty results.
    pub strict_dates: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 5000)),
            reference_date: dates::default_reference_date(),
            strict_dates: false,
        }
    }
}

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    db: Database,
    window_start: Arc<str>,
    strict_dates: bool,
}

impl AppState {
    pub fn new(db: Database, config: &ServerConfig) -> Self {
        let window_start = dates::format_date(&dates::window_start(&config.reference_date));
        Self {
            db,
            window_start: window_start.into(),
            strict_dates: config.strict_dates,
        }
    }

    /// Exclusive lower bound for the precipitation and tobs routes.
    pub fn window_start(&self) -> &str {
        &self.window_start
    }

    pub fn strict_dates(&self) -> bool {
        self.strict_dates
    }

    /// Run one blocking query against the store off the async runtime.
    pub async fn run<T, F>(&self, query: F) -> Result<T, ApiError>
    where
        F: FnOnce(&Database) -> anyhow::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        let result = tokio::task::spawn_blocking(move || query(&db)).await?;
        Ok(result?)
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::welcome))
        .route("/api/v1.0/precipitation", get(routes::precipitation))
        .route("/api/v1.0/stations", get(routes::stations))
        .route("/api/v1.0/tobs", get(routes::tobs))
        .route("/api/v1.0/temp/{start}", get(routes::temp_from))
        .route("/api/v1.0/temp/{start}/{end}", get(routes::temp_between))
        .layer(middleware::from_fn(logging::log_requests))
        .with_state(state)
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(db: Database, config: ServerConfig) -> anyhow::Result<()> {
    let state = AppState::new(db, &config);
    log::info!(
        "Reference date {}, window start {}, strict dates {}",
        config.reference_date,
        state.window_start(),
        state.strict_dates()
    );

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;
    log::info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for Ctrl-C: {}", e);
    }
    log::info!("Shutdown requested");
}

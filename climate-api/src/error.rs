//! Error types for the HTTP layer.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// The store could not be opened or the query failed
    #[error("store query failed: {0:#}")]
    Store(#[from] anyhow::Error),

    /// The blocking query task panicked or was cancelled
    #[error("query task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// A date path parameter is not `YYYY-MM-DD` (strict mode only)
    #[error("invalid {param} date '{value}', expected YYYY-MM-DD")]
    InvalidDate { param: &'static str, value: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidDate { .. } => StatusCode::BAD_REQUEST,
            ApiError::Store(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            log::error!("request failed: {}", self);
            "internal server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

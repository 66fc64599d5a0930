//! Request logging middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log method, path, status and latency of every request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    if status.is_server_error() {
        log::error!("{} {} -> {} in {:?}", method, path, status.as_u16(), started.elapsed());
    } else {
        log::info!("{} {} -> {} in {:?}", method, path, status.as_u16(), started.elapsed());
    }
    response
}

//! One log line per request.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Logs method, path, status and latency. Server errors log at `warn`;
/// their cause is logged separately by `AppError`.
pub async fn logging_middleware(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis();

    if status.is_server_error() {
        warn!(target: "http", %method, %path, status = status.as_u16(), elapsed_ms, "request failed");
    } else {
        info!(target: "http", %method, %path, status = status.as_u16(), elapsed_ms, "request served");
    }
    response
}

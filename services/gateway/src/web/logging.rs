//! services/gateway/src/web/logging.rs

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, Instrument};
use uuid::Uuid;

/// Logs method, uri, status and latency of every request under a fresh request id.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let uri = req.uri().clone();
    let started = Instant::now();
    let span = tracing::info_span!("request", %request_id, %method, %uri);

    let response = next.run(req).instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = response.status().as_u16(),
            latency_ms = started.elapsed().as_millis() as u64,
            "request completed"
        )
    });
    response
}

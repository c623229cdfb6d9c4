use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::services::metrics::get_metrics;

/// Greeting served on the root path. Static, identical on every request.
pub const GREETING: &str = "Hello from greeter-service!";

pub async fn greeting() -> &'static str {
    GREETING
}

pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "greeter-service",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

use axum::{Router, middleware::from_fn, routing::get};
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use tower_http::trace::TraceLayer;

use crate::handlers::{greeting, health_check, metrics_endpoint};

pub fn build_router() -> Router {
    Router::new()
        .route("/", get(greeting))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(request_id_middleware))
}

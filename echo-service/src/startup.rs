//! Application startup and lifecycle management.

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    signature::{SignatureConfig, signature_validation_middleware},
    tracing::request_id_middleware,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::EchoConfig;
use crate::handlers::{health_check, metrics_endpoint, readiness_check, receive_callback};
use crate::services::providers::{LineProvider, MockReplyProvider, ReplyProvider};

/// Shared application state.
///
/// The provider is built once at startup from explicit configuration and
/// shared read-only across requests.
#[derive(Clone)]
pub struct AppState {
    pub config: EchoConfig,
    pub signature: SignatureConfig,
    pub reply_provider: Arc<dyn ReplyProvider>,
}

impl AsRef<SignatureConfig> for AppState {
    fn as_ref(&self) -> &SignatureConfig {
        &self.signature
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/webhook",
            post(receive_callback).layer(from_fn_with_state(
                state.clone(),
                signature_validation_middleware::<AppState>,
            )),
        )
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    ///
    /// Binds the listener immediately (port 0 = random port for testing).
    pub async fn build(config: EchoConfig) -> Result<Self, AppError> {
        let reply_provider: Arc<dyn ReplyProvider> = if config.line.enabled {
            tracing::info!("LINE reply provider initialized");
            Arc::new(LineProvider::new(config.line.clone()))
        } else {
            tracing::info!("LINE provider disabled, using mock reply provider");
            Arc::new(MockReplyProvider::new())
        };

        let signature = SignatureConfig {
            channel_secret: config.line.channel_secret.clone(),
        };

        let state = AppState {
            config: config.clone(),
            signature,
            reply_provider,
        };

        let addr = SocketAddr::from(([0, 0, 0, 0], config.common.port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("echo-service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until stopped.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);
        axum::serve(self.listener, router).await
    }
}

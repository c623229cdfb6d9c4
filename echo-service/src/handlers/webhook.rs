use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use futures::future::join_all;

use crate::models::CallbackRequest;
use crate::services::dispatch::{dispatch_event, join_batch};
use crate::services::metrics::{record_batch, record_dispatch};
use crate::startup::AppState;

/// Webhook callback endpoint.
///
/// The signature middleware has verified and re-buffered the body before this
/// handler runs. Every event in the batch is dispatched concurrently; the
/// response waits for all dispatches to settle, then reports all-or-nothing:
/// 200 with the ordered receipt array, or 500 with an empty body if any
/// delivery failed.
#[tracing::instrument(skip(state, payload), fields(event_count = payload.events.len()))]
pub async fn receive_callback(
    State(state): State<AppState>,
    Json(payload): Json<CallbackRequest>,
) -> Response {
    let provider = state.reply_provider.as_ref();

    let results = join_all(
        payload
            .events
            .iter()
            .map(|event| dispatch_event(provider, event)),
    )
    .await;

    match join_batch(results) {
        Ok(receipts) => {
            for receipt in &receipts {
                record_dispatch(if receipt.is_some() {
                    "delivered"
                } else {
                    "skipped"
                });
            }
            record_batch("ok");
            (StatusCode::OK, Json(receipts)).into_response()
        }
        Err(e) => {
            record_batch("failed");
            tracing::error!(error = %e, "Reply delivery failed, failing the whole batch");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

//! Event dispatch: decides which inbound events get echoed and joins
//! per-event outcomes into one batch result.

use crate::models::{InboundEvent, OutboundReply};
use crate::services::providers::{ProviderError, ReplyProvider, ReplyReceipt};

/// Outcome of dispatching one inbound event.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// Event did not match the text-message shape; nothing was sent.
    Skipped,
    /// Exactly one reply was delivered for the event.
    Delivered(ReplyReceipt),
}

/// Process one inbound event.
///
/// Only `message` events carrying a `text` message are echoed; everything
/// else is skipped without touching the reply API. The echoed text is the
/// inbound text, unmodified. Delivery failures are not retried here; they
/// surface at the batch join.
pub async fn dispatch_event(
    provider: &dyn ReplyProvider,
    event: &InboundEvent,
) -> Result<DispatchOutcome, ProviderError> {
    let text = match &event.message {
        Some(message) if event.event_type == "message" && message.message_type == "text" => {
            message.text.clone()
        }
        _ => {
            tracing::debug!(event_type = %event.event_type, "Event skipped");
            return Ok(DispatchOutcome::Skipped);
        }
    };

    let echo = OutboundReply::text(text);
    let receipt = provider.reply(&event.reply_token, &[echo]).await?;
    Ok(DispatchOutcome::Delivered(receipt))
}

/// Batch join policy: all-or-nothing.
///
/// Skips count as success. Any delivery failure fails the whole batch, even
/// though replies already delivered for other events are not rolled back.
/// On success the receipts keep the input order, `None` marking skipped
/// positions.
pub fn join_batch(
    results: Vec<Result<DispatchOutcome, ProviderError>>,
) -> Result<Vec<Option<ReplyReceipt>>, ProviderError> {
    results
        .into_iter()
        .map(|result| {
            result.map(|outcome| match outcome {
                DispatchOutcome::Delivered(receipt) => Some(receipt),
                DispatchOutcome::Skipped => None,
            })
        })
        .collect()
}

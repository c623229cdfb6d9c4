pub mod line;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::models::OutboundReply;

pub use line::{LineProvider, MockReplyProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not enabled: {0}")]
    NotEnabled(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Send error: {0}")]
    SendFailed(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),
}

/// Acknowledgement from the reply API for one delivered reply.
#[derive(Debug, Clone, Serialize)]
pub struct ReplyReceipt {
    /// Request ID assigned by the platform, when it provides one.
    pub request_id: Option<String>,
}

/// Sends reply messages to the conversation turn identified by a reply token.
///
/// Implementations hold their credentials read-only and are safe for
/// unsynchronized concurrent use.
#[async_trait]
pub trait ReplyProvider: Send + Sync {
    async fn reply(
        &self,
        reply_token: &str,
        messages: &[OutboundReply],
    ) -> Result<ReplyReceipt, ProviderError>;
    async fn health_check(&self) -> Result<(), ProviderError>;
    fn is_enabled(&self) -> bool;
}

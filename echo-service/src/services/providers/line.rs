//! Messaging API reply client.
//!
//! Implements the reply endpoint of the platform's Messaging API plus a mock
//! used in tests and when the provider is disabled.

use super::{ProviderError, ReplyProvider, ReplyReceipt};
use crate::config::LineConfig;
use crate::models::OutboundReply;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::Serialize;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct LineProvider {
    config: LineConfig,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    #[serde(rename = "replyToken")]
    reply_token: &'a str,
    messages: &'a [OutboundReply],
}

impl LineProvider {
    pub fn new(config: LineConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl ReplyProvider for LineProvider {
    async fn reply(
        &self,
        reply_token: &str,
        messages: &[OutboundReply],
    ) -> Result<ReplyReceipt, ProviderError> {
        if !self.config.enabled {
            return Err(ProviderError::NotEnabled(
                "LINE reply provider is not enabled".to_string(),
            ));
        }

        let request = ReplyRequest {
            reply_token,
            messages,
        };

        let url = format!("{}/v2/bot/message/reply", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.config.channel_access_token.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Connection(format!("Failed to reach reply API: {}", e)))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-line-request-id")
            .and_then(|h| h.to_str().ok())
            .map(|s| s.to_string());

        if status.is_success() {
            tracing::info!(
                reply_token = %reply_token,
                message_count = messages.len(),
                request_id = ?request_id,
                "Reply delivered"
            );
            return Ok(ReplyReceipt { request_id });
        }

        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ProviderError::Authentication(format!(
                    "Reply API rejected credentials ({}): {}",
                    status, body
                )))
            }
            StatusCode::TOO_MANY_REQUESTS => Err(ProviderError::RateLimited(format!(
                "Reply API rate limit: {}",
                body
            ))),
            _ => Err(ProviderError::SendFailed(format!(
                "Reply API returned error status {}: {}",
                status, body
            ))),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        if !self.config.enabled {
            return Ok(());
        }

        if self.config.channel_access_token.expose_secret().is_empty() {
            return Err(ProviderError::Configuration(
                "channel_access_token is not configured".to_string(),
            ));
        }

        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.config.enabled
    }
}

/// Mock reply provider for testing.
pub struct MockReplyProvider {
    send_count: AtomicU64,
    sent: Mutex<Vec<RecordedReply>>,
    fail_tokens: Mutex<Vec<String>>,
}

/// One reply captured by the mock.
#[derive(Debug, Clone)]
pub struct RecordedReply {
    pub reply_token: String,
    pub messages: Vec<OutboundReply>,
}

impl MockReplyProvider {
    pub fn new() -> Self {
        Self {
            send_count: AtomicU64::new(0),
            sent: Mutex::new(Vec::new()),
            fail_tokens: Mutex::new(Vec::new()),
        }
    }

    /// Make every reply addressed to `reply_token` fail with a send error.
    pub fn fail_for(&self, reply_token: &str) {
        self.fail_tokens.lock().unwrap().push(reply_token.to_string());
    }

    pub fn send_count(&self) -> u64 {
        self.send_count.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<RecordedReply> {
        self.sent.lock().unwrap().clone()
    }
}

impl Default for MockReplyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplyProvider for MockReplyProvider {
    async fn reply(
        &self,
        reply_token: &str,
        messages: &[OutboundReply],
    ) -> Result<ReplyReceipt, ProviderError> {
        if self
            .fail_tokens
            .lock()
            .unwrap()
            .iter()
            .any(|t| t == reply_token)
        {
            return Err(ProviderError::SendFailed(format!(
                "forced failure for reply token {}",
                reply_token
            )));
        }

        let count = self.send_count.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().unwrap().push(RecordedReply {
            reply_token: reply_token.to_string(),
            messages: messages.to_vec(),
        });

        tracing::info!(
            reply_token = %reply_token,
            message_count = messages.len(),
            "[MOCK] Reply would be delivered"
        );

        Ok(ReplyReceipt {
            request_id: Some(format!("mock-reply-{}", count)),
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_request_serializes_with_wire_field_names() {
        let messages = vec![OutboundReply::text("hi")];
        let request = ReplyRequest {
            reply_token: "tok",
            messages: &messages,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "replyToken": "tok",
                "messages": [{ "type": "text", "text": "hi" }]
            })
        );
    }
}

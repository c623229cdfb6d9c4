use serde::{Deserialize, Serialize};

/// One webhook delivery from the platform: a batch of events addressed to
/// this bot.
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackRequest {
    /// Bot user ID the events were delivered to.
    #[serde(default)]
    pub destination: Option<String>,
    pub events: Vec<InboundEvent>,
}

/// A single event in a webhook batch.
///
/// Only the fields the relay acts on are modeled; events carry more, but the
/// platform owns the shape and we do not re-validate it here.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    /// Present when `event_type` is `message`.
    #[serde(default)]
    pub message: Option<MessagePayload>,
    /// Opaque single-use token addressing the reply to this event's
    /// conversation turn. Not validated locally; the reply API rejects
    /// missing or expired tokens.
    #[serde(default, rename = "replyToken")]
    pub reply_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessagePayload {
    #[serde(rename = "type")]
    pub message_type: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Populated for text messages only.
    #[serde(default)]
    pub text: String,
}

/// Message sent back through the reply API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundReply {
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: String,
}

impl OutboundReply {
    /// Build a text reply carrying `text` unmodified.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            message_type: "text".to_string(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn callback_request_parses_platform_payload() {
        let raw = r#"{
            "destination": "U0123456789abcdef",
            "events": [
                {
                    "type": "message",
                    "replyToken": "0f3779fba3b349968c5d07db31eab56f",
                    "message": { "id": "325708", "type": "text", "text": "Hello, world" }
                },
                { "type": "follow", "replyToken": "8cf9239d56244f4197887e939187e19e" }
            ]
        }"#;

        let request: CallbackRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.destination.as_deref(), Some("U0123456789abcdef"));
        assert_eq!(request.events.len(), 2);

        let first = &request.events[0];
        assert_eq!(first.event_type, "message");
        assert_eq!(first.reply_token, "0f3779fba3b349968c5d07db31eab56f");
        assert_eq!(first.message.as_ref().unwrap().text, "Hello, world");

        let second = &request.events[1];
        assert_eq!(second.event_type, "follow");
        assert!(second.message.is_none());
    }

    #[test]
    fn outbound_reply_serializes_with_wire_field_names() {
        let reply = OutboundReply::text("echo");
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "text", "text": "echo" }));
    }
}

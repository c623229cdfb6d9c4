pub mod event;

pub use event::{CallbackRequest, InboundEvent, MessagePayload, OutboundReply};

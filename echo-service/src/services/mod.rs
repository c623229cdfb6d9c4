pub mod dispatch;
pub mod metrics;
pub mod providers;

pub use dispatch::{DispatchOutcome, dispatch_event, join_batch};
pub use providers::{LineProvider, MockReplyProvider, ProviderError, ReplyProvider, ReplyReceipt};

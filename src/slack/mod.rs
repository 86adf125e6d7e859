//! All Slack-specific functionality

pub mod client;

use async_trait::async_trait;

use crate::core::models::MessageRef;
use crate::errors::AgentError;

pub use client::SlackClient;

/// The two Web API calls the handlers need.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Post `text` to `channel` (inside `thread_ts` when given) and return a
    /// reference to the new message.
    async fn post_message(
        &self,
        channel: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<MessageRef, AgentError>;

    /// Replace the text of a message posted earlier.
    async fn update_message(&self, message: &MessageRef, text: &str) -> Result<(), AgentError>;
}

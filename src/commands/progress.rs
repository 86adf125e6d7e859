//! Two-phase replies: post a progress message, then update it in place.

use std::future::Future;
use tracing::{error, warn};

use crate::core::AgentServices;
use crate::core::models::{InboundEvent, MessageRef};
use crate::errors::AgentError;

/// Post the transient progress message. A failure here is not fatal; the
/// final text is then sent as a fresh reply.
pub async fn start(
    services: &AgentServices,
    event: &InboundEvent,
    text: &str,
) -> Option<MessageRef> {
    match services
        .chat
        .post_message(&event.channel, event.thread_ts.as_deref(), text)
        .await
    {
        Ok(message) => Some(message),
        Err(e) => {
            warn!("Failed to post progress message: {}", e);
            None
        }
    }
}

/// Replace the progress message with `text`, or post it fresh when there is
/// no progress message to replace.
///
/// # Errors
///
/// Returns an error if the final reply cannot be delivered.
pub async fn finish(
    services: &AgentServices,
    event: &InboundEvent,
    progress: Option<&MessageRef>,
    text: &str,
) -> Result<(), AgentError> {
    if let Some(message) = progress {
        match services.chat.update_message(message, text).await {
            Ok(()) => return Ok(()),
            Err(e) => warn!("Failed to update progress message, posting instead: {}", e),
        }
    }

    services
        .chat
        .post_message(&event.channel, event.thread_ts.as_deref(), text)
        .await
        .map(|_| ())
}

/// Run `work` between a progress message and its in-place update.
///
/// Errors from `work` are logged and rendered with `on_error`; they never
/// escape this function.
///
/// # Errors
///
/// Returns an error only if the final reply cannot be delivered.
pub async fn run<Fut, E>(
    services: &AgentServices,
    event: &InboundEvent,
    progress_text: &str,
    work: Fut,
    on_error: E,
) -> Result<(), AgentError>
where
    Fut: Future<Output = Result<String, AgentError>>,
    E: FnOnce(&AgentError) -> String,
{
    let progress = start(services, event, progress_text).await;

    let text = match work.await {
        Ok(text) => text,
        Err(e) => {
            error!(channel = %event.channel, "Command failed: {}", e);
            on_error(&e)
        }
    };

    finish(services, event, progress.as_ref(), &text).await
}

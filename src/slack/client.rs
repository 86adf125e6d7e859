//! Slack API client module
//!
//! Encapsulates the Slack Web API calls with retry logic and error handling.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use slack_morphism::hyper_tokio::{SlackClientHyperConnector, SlackHyperClient};
use slack_morphism::prelude::SlackApiChatPostMessageRequest;
use slack_morphism::{SlackApiToken, SlackApiTokenValue, SlackChannelId, SlackMessageContent, SlackTs};
use std::time::Duration;
use tokio_retry::strategy::jitter;
use tokio_retry::{Retry, RetryIf, strategy::ExponentialBackoff};
use tracing::warn;

use super::ChatClient;
use crate::core::models::MessageRef;
use crate::errors::AgentError;

const SLACK_API_BASE: &str = "https://slack.com/api";

// Build the Slack client connector safely without panicking.
// If connector construction fails, store None and surface an AgentError at call sites.
static SLACK_CLIENT: std::sync::LazyLock<Option<SlackHyperClient>> =
    std::sync::LazyLock::new(|| match SlackClientHyperConnector::new() {
        Ok(connector) => Some(SlackHyperClient::new(connector)),
        Err(e) => {
            warn!("Failed to create Slack HTTP connector: {}", e);
            None
        }
    });

static HTTP_CLIENT: std::sync::LazyLock<Client> = std::sync::LazyLock::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
});

/// Build the JSON payload for `chat.update`.
#[must_use]
fn build_update_payload(message: &MessageRef, text: &str) -> Value {
    json!({
        "channel": message.channel,
        "ts": message.ts,
        "text": text,
    })
}

/// Turn a Slack Web API JSON body into `Ok(())` or the reported error.
fn check_api_response(method: &str, body: &Value) -> Result<(), AgentError> {
    if body.get("ok").and_then(Value::as_bool).unwrap_or(false) {
        return Ok(());
    }

    Err(AgentError::SlackApiError(format!(
        "{method} error: {}",
        body.get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    )))
}

/// Slack API client with retry logic and error handling
pub struct SlackClient {
    token: SlackApiToken,
}

impl SlackClient {
    #[must_use]
    pub fn new(token: String) -> Self {
        Self {
            token: SlackApiToken::new(SlackApiTokenValue::new(token)),
        }
    }

    #[must_use]
    pub fn token(&self) -> &SlackApiToken {
        &self.token
    }

    fn backoff() -> impl Iterator<Item = Duration> {
        ExponentialBackoff::from_millis(100).map(jitter).take(3)
    }

    async fn with_retry<F, Fut, T>(&self, operation: F) -> Result<T, AgentError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, AgentError>> + Send,
        T: Send,
    {
        Retry::start(Self::backoff(), operation).await
    }

    /// Like [`Self::with_retry`], but only retries errors for which `retryable` holds.
    async fn with_retry_if<F, Fut, T>(
        &self,
        operation: F,
        retryable: fn(&AgentError) -> bool,
    ) -> Result<T, AgentError>
    where
        F: FnMut() -> Fut + Send,
        Fut: std::future::Future<Output = Result<T, AgentError>> + Send,
        T: Send,
    {
        RetryIf::start(Self::backoff(), operation, retryable).await
    }
}

/// A post is only retried when Slack refused it outright. Any other failure may
/// come after Slack already accepted the message, and retrying would post it twice.
fn is_retryable_post(error: &AgentError) -> bool {
    matches!(error, AgentError::RateLimited(_))
}

#[async_trait]
impl ChatClient for SlackClient {
    /// Post a message. Only rate-limited attempts are retried.
    ///
    /// # Errors
    ///
    /// Returns an error if the connector is unavailable or Slack rejects the post.
    async fn post_message(
        &self,
        channel: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<MessageRef, AgentError> {
        let post = || async move {
            let session = SLACK_CLIENT
                .as_ref()
                .ok_or_else(|| {
                    AgentError::SlackApiError("Slack HTTP connector not initialized".to_string())
                })?
                .open_session(&self.token);

            let mut post_req = SlackApiChatPostMessageRequest::new(
                SlackChannelId(channel.to_string()),
                SlackMessageContent::new().with_text(text.to_string()),
            );
            if let Some(ts) = thread_ts {
                post_req = post_req.with_thread_ts(SlackTs(ts.to_string()));
            }

            let resp = session.chat_post_message(&post_req).await?;

            Ok::<_, AgentError>(MessageRef {
                channel: resp.channel.0,
                ts: resp.ts.0,
            })
        };

        self.with_retry_if(post, is_retryable_post).await
    }

    /// Update an existing message via Slack's `chat.update` API.
    ///
    /// # Errors
    ///
    /// Returns an error if the Slack API request or response parsing fails.
    async fn update_message(&self, message: &MessageRef, text: &str) -> Result<(), AgentError> {
        let payload = build_update_payload(message, text);
        let payload = &payload;

        self.with_retry(|| async move {
            let resp = HTTP_CLIENT
                .post(format!("{SLACK_API_BASE}/chat.update"))
                .bearer_auth(&self.token.token_value.0)
                .json(payload)
                .send()
                .await
                .map_err(|e| AgentError::HttpError(format!("Failed to update message: {e}")))?;

            if !resp.status().is_success() {
                return Err(AgentError::SlackApiError(format!(
                    "chat.update HTTP {}",
                    resp.status()
                )));
            }

            let body: Value = resp.json().await.map_err(|e| {
                AgentError::HttpError(format!("chat.update JSON parse error: {e}"))
            })?;

            check_api_response("chat.update", &body)
        })
        .await
    }
}

use slack_morphism::errors::SlackClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to parse Slack event: {0}")]
    ParseError(String),

    #[error("Failed to access Slack API: {0}")]
    SlackApiError(String),

    #[error("Slack API rate limited: {0}")]
    RateLimited(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to access object storage: {0}")]
    ObjectStoreError(String),

    #[error("Failed to query knowledge base: {0}")]
    KnowledgeBaseError(String),

    #[error("Failed to access deduplication store: {0}")]
    DedupStoreError(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<SlackClientError> for AgentError {
    fn from(error: SlackClientError) -> Self {
        match error {
            SlackClientError::RateLimitError(_) => AgentError::RateLimited(error.to_string()),
            _ => AgentError::SlackApiError(error.to_string()),
        }
    }
}

impl From<reqwest::Error> for AgentError {
    fn from(error: reqwest::Error) -> Self {
        AgentError::HttpError(error.to_string())
    }
}

use slack_ai_agent::errors::AgentError;
use slack_morphism::errors::{SlackClientApiError, SlackClientError, SlackRateLimitError};
use std::error::Error;

#[test]
fn test_agent_error_implements_error_trait() {
    fn assert_error<T: Error>(_: &T) {}

    let error = AgentError::ParseError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_agent_error_display() {
    let error = AgentError::SlackApiError("API failed".to_string());
    assert_eq!(format!("{error}"), "Failed to access Slack API: API failed");

    let error = AgentError::KnowledgeBaseError("ThrottlingException".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to query knowledge base: ThrottlingException"
    );

    let error = AgentError::DedupStoreError("ResourceNotFound".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access deduplication store: ResourceNotFound"
    );

    let error = AgentError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );
}

#[test]
fn test_slack_api_error_converts_to_slack_api_error() {
    let err = SlackClientError::ApiError(SlackClientApiError::new(
        "channel_not_found".to_string(),
    ));

    match AgentError::from(err) {
        AgentError::SlackApiError(msg) => assert!(msg.contains("channel_not_found")),
        other => panic!("Expected SlackApiError, got: {other:?}"),
    }
}

#[test]
fn test_slack_rate_limit_converts_to_rate_limited() {
    let err = SlackClientError::RateLimitError(
        SlackRateLimitError::new().with_code("ratelimited".to_string()),
    );

    let converted = AgentError::from(err);
    assert!(matches!(converted, AgentError::RateLimited(ref msg) if msg.contains("ratelimited")));
    assert!(format!("{converted}").starts_with("Slack API rate limited: "));
}

#[tokio::test]
async fn test_reqwest_error_converts_to_http_error() {
    // Unparseable URL fails inside reqwest before any network access
    let err = reqwest::Client::new()
        .get("http://[::1")
        .send()
        .await
        .unwrap_err();

    match AgentError::from(err) {
        AgentError::HttpError(msg) => assert!(!msg.is_empty()),
        other => panic!("Expected HttpError, got: {other:?}"),
    }
}

/// Slack AI agent - a Slack app that answers mentions with S3 and Bedrock lookups.
///
/// This crate implements a single API Lambda behind API Gateway that:
/// 1. Verifies Slack's request signature and handles the Events API handshake
/// 2. Suppresses redelivered events through a DynamoDB conditional write
/// 3. Routes `app_mention` text to one command (list files, presign a URL,
///    ask the knowledge base, greet, help) and replies in Slack
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - SSM Parameter Store for the Slack secrets and resource names
/// - DynamoDB (with TTL) as the deduplication table
/// - S3 for object listing and presigned download URLs
/// - Bedrock Agent Runtime `RetrieveAndGenerate` for knowledge-base answers
/// - slack-morphism for Slack API interactions
///
/// # Example
///
/// ```no_run
/// use slack_ai_agent::commands::{Command, classify};
///
/// // Set up structured logging
/// slack_ai_agent::setup_logging();
///
/// assert_eq!(classify("<@U0BOT> hello there"), Command::Greet);
/// assert_eq!(
///     classify("<@U0BOT> ask What is our SLA?"),
///     Command::Ask { query: "What is our SLA?".to_string() }
/// );
/// ```
pub mod api;
pub mod aws;
pub mod commands;
pub mod core;
pub mod errors;
pub mod slack;
pub mod utils;

pub use errors::AgentError;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. The level comes from `RUST_LOG` and defaults
/// to `info`. Calling it more than once is harmless; later calls are ignored.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// slack_ai_agent::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

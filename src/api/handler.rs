//! API Lambda handler - verifies the request, then delegates to the event handler.
//!
//! This module handles:
//! - Request validation (headers, body, signature)
//! - Event callbacks (delegated to `event_handler` module)
//! - The error boundary that turns any failure into a 500 JSON response

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use tracing::{error, info};

use super::{event_handler, helpers, parsing, signature};
use crate::aws;
use crate::core::AgentServices;
use crate::core::config::{self, RuntimeSettings};
use crate::errors::AgentError;

pub use self::function_handler as handler;

/// Lambda handler for the API entrypoint.
///
/// Never returns `Err`: every failure on the request path is logged and
/// answered with a 500 JSON body.
///
/// # Errors
///
/// The `Result` is required by `lambda_runtime`; it is always `Ok`.
#[tracing::instrument(level = "info", skip(event), fields(request_id = %event.context.request_id))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(into_response(process(&event.payload).await))
}

/// The error boundary: an `Ok` response passes through, any error becomes a
/// generic 500 so no internal detail reaches the caller.
#[must_use]
pub fn into_response(result: Result<Value, AgentError>) -> Value {
    match result {
        Ok(response) => response,
        Err(e) => {
            error!("Request failed: {}", e);
            helpers::err_response(500, "Internal server error")
        }
    }
}

async fn process(payload: &Value) -> Result<Value, AgentError> {
    let settings = RuntimeSettings::from_env()?;
    let source = aws::parameter_source().await;
    let app_config = config::get_config(&source, &settings).await?;
    let services = aws::services(app_config, &settings).await;

    handle_request(services, &app_config.slack_signing_secret, payload).await
}

/// Validate and route one API Gateway proxy request.
///
/// # Errors
///
/// Returns an error for failures the caller must turn into a 500: dedup store
/// errors and undeliverable Slack replies. Client errors (missing headers,
/// bad signature) are returned as `Ok` 4xx responses.
pub async fn handle_request(
    services: &AgentServices,
    signing_secret: &str,
    payload: &Value,
) -> Result<Value, AgentError> {
    // ========================================================================
    // Extract and validate headers
    // ========================================================================

    let Some(headers) = payload.get("headers") else {
        error!("Request missing headers");
        return Ok(helpers::err_response(400, "Missing headers"));
    };

    let body = match parsing::extract_body(payload) {
        Ok(b) => b,
        Err(e) => {
            error!("{}", e);
            return Ok(helpers::err_response(400, "Invalid body"));
        }
    };

    // ========================================================================
    // Verify Slack signature
    // ========================================================================

    if let Err(response) = verify_signature(&body, headers, signing_secret) {
        return Ok(response);
    }

    if let Some(retry) = parsing::get_header_value(headers, "X-Slack-Retry-Num") {
        let reason = parsing::get_header_value(headers, "X-Slack-Retry-Reason").unwrap_or("");
        info!(retry_num = %retry, retry_reason = %reason, "Slack redelivery");
    }

    // ========================================================================
    // Route to the Events API handler
    // ========================================================================

    let json_body: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            error!("Body is not JSON: {}", e);
            return Ok(helpers::err_response(400, "Body is not JSON"));
        }
    };

    event_handler::handle_event_callback(services, &json_body).await
}

fn verify_signature(body: &str, headers: &Value, signing_secret: &str) -> Result<(), Value> {
    let Some(sig) = parsing::get_header_value(headers, "X-Slack-Signature") else {
        error!("Missing X-Slack-Signature header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Signature header",
        ));
    };

    let Some(timestamp) = parsing::get_header_value(headers, "X-Slack-Request-Timestamp") else {
        error!("Missing X-Slack-Request-Timestamp header");
        return Err(helpers::err_response(
            401,
            "Missing X-Slack-Request-Timestamp header",
        ));
    };

    if !signature::verify_slack_signature(body, timestamp, sig, signing_secret) {
        error!("Slack signature verification failed");
        return Err(helpers::err_response(401, "Invalid Slack signature"));
    }

    Ok(())
}

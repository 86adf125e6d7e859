//! Handler for Slack Events API callbacks.
//!
//! This module processes `event_callback` payloads:
//! - `app_mention` - a user mentioned the bot; deduplicated, then dispatched
//! - anything else - acknowledged without side effects

use serde_json::{Value, json};
use tracing::{info, warn};

use super::helpers::{ok_empty, ok_json};
use super::parsing::{parse_inbound_event, v_str};
use crate::commands;
use crate::core::AgentServices;
use crate::core::dedup::event_key;
use crate::errors::AgentError;

/// Handle the JSON body of a verified Events API request.
///
/// # Errors
///
/// Returns an error if the dedup store fails or the final Slack reply cannot
/// be delivered. Duplicate deliveries are not errors; they are acknowledged
/// with a 200 and not dispatched.
pub async fn handle_event_callback(
    services: &AgentServices,
    json_body: &Value,
) -> Result<Value, AgentError> {
    let body_type = v_str(json_body, &["type"]).unwrap_or("");

    // URL verification handshake
    if body_type == "url_verification" {
        let challenge = v_str(json_body, &["challenge"]).unwrap_or("");
        return Ok(ok_json(&json!({ "challenge": challenge })));
    }

    if body_type != "event_callback" {
        return Ok(ok_empty());
    }

    let Some(event) = json_body.get("event") else {
        warn!("event_callback without an event object");
        return Ok(ok_empty());
    };

    let event_type = v_str(event, &["type"]).unwrap_or("");
    info!(event_type = %event_type, "Processing event callback");

    if event_type != "app_mention" {
        return Ok(ok_empty());
    }

    // Ignore bot-authored events to avoid reply loops
    if event.get("bot_id").is_some() {
        return Ok(ok_empty());
    }

    let inbound = parse_inbound_event(event)?;
    let key = event_key(&inbound);

    if !services.dedup.try_claim(&key).await? {
        info!(event_key = %key, "Duplicate delivery, skipping");
        return Ok(ok_json(&json!({ "ok": true, "duplicate": true })));
    }

    commands::dispatch(services, &inbound).await?;

    Ok(ok_json(&json!({ "ok": true })))
}

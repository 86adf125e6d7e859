use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::Value;

use crate::core::models::InboundEvent;
use crate::errors::AgentError;

pub fn v_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut cur = root;
    for key in path {
        cur = cur.get(*key)?;
    }
    Some(cur)
}

pub fn v_str<'a>(root: &'a Value, path: &[&str]) -> Option<&'a str> {
    v_path(root, path).and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

/// Raw request body, base64-decoded when API Gateway flagged it as encoded.
///
/// # Errors
///
/// Returns `ParseError` if the body is missing, not a string, or not valid
/// base64/UTF-8 when flagged as encoded.
pub fn extract_body(payload: &Value) -> Result<String, AgentError> {
    let body = payload
        .get("body")
        .ok_or_else(|| AgentError::ParseError("Missing body".to_string()))?
        .as_str()
        .ok_or_else(|| AgentError::ParseError("Invalid body format".to_string()))?;

    let encoded = payload
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    if !encoded {
        return Ok(body.to_string());
    }

    let bytes = STANDARD
        .decode(body)
        .map_err(|e| AgentError::ParseError(format!("Invalid base64 body: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AgentError::ParseError(format!("Invalid UTF-8 body: {e}")))
}

/// Parse the `event` object of an `event_callback` body.
///
/// # Errors
///
/// Returns `ParseError` if the `event` object is missing or malformed.
pub fn parse_inbound_event(event: &Value) -> Result<InboundEvent, AgentError> {
    serde_json::from_value(event.clone())
        .map_err(|e| AgentError::ParseError(format!("Invalid event payload: {e}")))
}

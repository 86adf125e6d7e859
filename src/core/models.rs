use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The fields of a Slack `event` object this app acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEvent {
    #[serde(default)]
    pub channel: String,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub ts: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thread_ts: Option<String>,
}

/// Reference to a message the bot already posted, used to update it in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRef {
    pub channel: String,
    pub ts: String,
}

/// One entry of an S3 listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectSummary {
    pub key: String,
    pub size_bytes: i64,
    pub last_modified: Option<DateTime<Utc>>,
}

/// Row written to the deduplication table on the first delivery of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupRecord {
    pub event_key: String,
    /// Expiry in epoch seconds, swept by the table's TTL.
    pub ttl: i64,
    /// RFC 3339 insertion time, kept for auditing.
    pub timestamp: String,
}

impl DedupRecord {
    #[must_use]
    pub fn new(event_key: &str, now: DateTime<Utc>, ttl_secs: i64) -> Self {
        Self {
            event_key: event_key.to_string(),
            ttl: now.timestamp() + ttl_secs,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

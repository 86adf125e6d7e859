//! Deduplication gate for redelivered Slack events.
//!
//! Slack retries a delivery when the ack is slow. Each event is claimed once
//! through an insert-if-absent write; later claims inside the TTL window see
//! the existing record and are skipped.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::models::{DedupRecord, InboundEvent};
use crate::errors::AgentError;

/// Lifetime of a claim in seconds.
pub const DEDUP_TTL_SECS: i64 = 300;

/// Stable key naming one logical event.
#[must_use]
pub fn event_key(event: &InboundEvent) -> String {
    format!("{}:{}:{}", event.channel, event.ts, event.user)
}

#[async_trait]
pub trait DedupStore: Send + Sync {
    /// Returns `Ok(true)` for the first claim of `event_key`, `Ok(false)` when
    /// the key is already held. Any other store failure is an error.
    async fn try_claim(&self, event_key: &str) -> Result<bool, AgentError>;
}

type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Process-local store with the same contract as the DynamoDB table.
///
/// Expired records are dropped on the next claim, the way the table's TTL
/// sweep would eventually remove them.
pub struct MemoryDedupStore {
    records: Mutex<HashMap<String, DedupRecord>>,
    clock: Clock,
}

impl MemoryDedupStore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(|| Utc::now().timestamp()))
    }

    /// Build a store whose notion of "now" (epoch seconds) comes from `clock`.
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            clock,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryDedupStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DedupStore for MemoryDedupStore {
    async fn try_claim(&self, event_key: &str) -> Result<bool, AgentError> {
        let now = (self.clock)();
        let mut records = self
            .records
            .lock()
            .map_err(|e| AgentError::DedupStoreError(format!("lock poisoned: {e}")))?;

        records.retain(|_, record| record.ttl > now);

        if records.contains_key(event_key) {
            return Ok(false);
        }

        let inserted_at = chrono::DateTime::from_timestamp(now, 0).unwrap_or_else(Utc::now);
        records.insert(
            event_key.to_string(),
            DedupRecord::new(event_key, inserted_at, DEDUP_TTL_SECS),
        );
        Ok(true)
    }
}

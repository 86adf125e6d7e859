use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use tracing::{debug, info};

use crate::core::dedup::{DEDUP_TTL_SECS, DedupStore};
use crate::core::models::DedupRecord;
use crate::errors::AgentError;

const CLAIM_CONDITION: &str = "attribute_not_exists(eventKey)";

/// Dedup gate backed by a DynamoDB table with TTL enabled on `ttl`.
#[derive(Debug, Clone)]
pub struct DynamoDedupStore {
    client: DynamoDbClient,
    table_name: String,
}

impl DynamoDedupStore {
    #[must_use]
    pub fn new(client: DynamoDbClient, table_name: String) -> Self {
        Self { client, table_name }
    }
}

#[async_trait]
impl DedupStore for DynamoDedupStore {
    async fn try_claim(&self, event_key: &str) -> Result<bool, AgentError> {
        let record = DedupRecord::new(event_key, Utc::now(), DEDUP_TTL_SECS);

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .item("eventKey", AttributeValue::S(record.event_key.clone()))
            .item("ttl", AttributeValue::N(record.ttl.to_string()))
            .item("timestamp", AttributeValue::S(record.timestamp.clone()))
            .condition_expression(CLAIM_CONDITION)
            .send()
            .await;

        match result {
            Ok(_) => {
                debug!(event_key = %event_key, ttl = record.ttl, "Claimed event");
                Ok(true)
            }
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(PutItemError::is_conditional_check_failed_exception) =>
            {
                info!(event_key = %event_key, "Event already claimed");
                Ok(false)
            }
            Err(e) => Err(AgentError::DedupStoreError(format!(
                "dynamodb put_item {}: {e}",
                self.table_name
            ))),
        }
    }
}

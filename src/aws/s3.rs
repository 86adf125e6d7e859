use async_trait::async_trait;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::presigning::PresigningConfig;
use chrono::DateTime;
use std::time::Duration;

use crate::core::ObjectStore;
use crate::core::models::ObjectSummary;
use crate::errors::AgentError;

/// Listing and URL signing against one bucket.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
}

impl S3ObjectStore {
    #[must_use]
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list_objects(&self, max_keys: i32) -> Result<Vec<ObjectSummary>, AgentError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(max_keys)
            .send()
            .await
            .map_err(|e| {
                AgentError::ObjectStoreError(format!("s3 list_objects_v2 {}: {e}", self.bucket))
            })?;

        Ok(output
            .contents()
            .iter()
            .filter_map(|object| {
                let key = object.key()?.to_string();
                Some(ObjectSummary {
                    key,
                    size_bytes: object.size().unwrap_or(0),
                    last_modified: object
                        .last_modified()
                        .and_then(|t| DateTime::from_timestamp(t.secs(), 0)),
                })
            })
            .collect())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, AgentError> {
        let presigning = PresigningConfig::expires_in(expires_in)
            .map_err(|e| AgentError::ObjectStoreError(format!("presigning config: {e}")))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| AgentError::ObjectStoreError(format!("s3 presign {key}: {e}")))?;

        Ok(request.uri().to_string())
    }
}

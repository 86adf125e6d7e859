use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::dedup::DedupStore;
use super::models::ObjectSummary;
use crate::errors::AgentError;
use crate::slack::ChatClient;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket this store lists and signs against.
    fn bucket(&self) -> &str;

    /// List at most `max_keys` objects.
    async fn list_objects(&self, max_keys: i32) -> Result<Vec<ObjectSummary>, AgentError>;

    /// Presign a GET for `key`, valid for `expires_in`.
    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, AgentError>;
}

#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    /// Run a retrieve-and-generate query. `Ok(None)` means the service answered
    /// without any generated text.
    async fn query(&self, question: &str) -> Result<Option<String>, AgentError>;
}

/// Everything a command handler may talk to.
#[derive(Clone)]
pub struct AgentServices {
    pub chat: Arc<dyn ChatClient>,
    pub dedup: Arc<dyn DedupStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub knowledge_base: Arc<dyn KnowledgeBase>,
    /// Upper bound on a single knowledge-base call.
    pub knowledge_base_timeout: Duration,
}

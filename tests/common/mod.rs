#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use slack_ai_agent::AgentError;
use slack_ai_agent::api::signature::compute_signature;
use slack_ai_agent::core::dedup::{DedupStore, MemoryDedupStore};
use slack_ai_agent::core::models::{MessageRef, ObjectSummary};
use slack_ai_agent::core::{AgentServices, KnowledgeBase, ObjectStore};
use slack_ai_agent::slack::ChatClient;

pub const SIGNING_SECRET: &str = "test-signing-secret";

/// One outbound Slack call, as seen by the recording client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCall {
    Post {
        channel: String,
        thread_ts: Option<String>,
        text: String,
    },
    Update {
        channel: String,
        ts: String,
        text: String,
    },
}

impl ChatCall {
    pub fn text(&self) -> &str {
        match self {
            ChatCall::Post { text, .. } | ChatCall::Update { text, .. } => text,
        }
    }
}

#[derive(Default)]
pub struct RecordingChat {
    pub calls: Mutex<Vec<ChatCall>>,
    pub fail_posts: Mutex<bool>,
}

impl RecordingChat {
    pub fn calls(&self) -> Vec<ChatCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatClient for RecordingChat {
    async fn post_message(
        &self,
        channel: &str,
        thread_ts: Option<&str>,
        text: &str,
    ) -> Result<MessageRef, AgentError> {
        if *self.fail_posts.lock().unwrap() {
            return Err(AgentError::SlackApiError("channel_not_found".to_string()));
        }
        let mut calls = self.calls.lock().unwrap();
        calls.push(ChatCall::Post {
            channel: channel.to_string(),
            thread_ts: thread_ts.map(ToString::to_string),
            text: text.to_string(),
        });
        Ok(MessageRef {
            channel: channel.to_string(),
            ts: format!("200.{}", calls.len()),
        })
    }

    async fn update_message(&self, message: &MessageRef, text: &str) -> Result<(), AgentError> {
        self.calls.lock().unwrap().push(ChatCall::Update {
            channel: message.channel.clone(),
            ts: message.ts.clone(),
            text: text.to_string(),
        });
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeObjectStore {
    pub objects: Mutex<Vec<ObjectSummary>>,
    pub fail: Mutex<bool>,
    pub list_calls: AtomicUsize,
    pub presign_calls: AtomicUsize,
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    fn bucket(&self) -> &str {
        "docs-bucket"
    }

    async fn list_objects(&self, max_keys: i32) -> Result<Vec<ObjectSummary>, AgentError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail.lock().unwrap() {
            return Err(AgentError::ObjectStoreError("AccessDenied".to_string()));
        }
        let objects = self.objects.lock().unwrap();
        Ok(objects
            .iter()
            .take(usize::try_from(max_keys).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn presign_get(&self, key: &str, expires_in: Duration) -> Result<String, AgentError> {
        self.presign_calls.fetch_add(1, Ordering::SeqCst);
        if *self.fail.lock().unwrap() {
            return Err(AgentError::ObjectStoreError("NoSuchKey".to_string()));
        }
        Ok(format!(
            "https://docs-bucket.s3.amazonaws.com/{key}?X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }
}

pub enum KbBehavior {
    Answer(String),
    NoText,
    Fail,
    Hang,
}

pub struct FakeKnowledgeBase {
    pub behavior: Mutex<KbBehavior>,
    pub calls: AtomicUsize,
    pub last_query: Mutex<Option<String>>,
}

impl FakeKnowledgeBase {
    pub fn answering(text: &str) -> Self {
        Self {
            behavior: Mutex::new(KbBehavior::Answer(text.to_string())),
            calls: AtomicUsize::new(0),
            last_query: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KnowledgeBase for FakeKnowledgeBase {
    async fn query(&self, question: &str) -> Result<Option<String>, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(question.to_string());

        let hang = matches!(*self.behavior.lock().unwrap(), KbBehavior::Hang);
        if hang {
            tokio::time::sleep(Duration::from_secs(60)).await;
        }

        match &*self.behavior.lock().unwrap() {
            KbBehavior::Answer(text) => Ok(Some(text.clone())),
            KbBehavior::NoText | KbBehavior::Hang => Ok(None),
            KbBehavior::Fail => Err(AgentError::KnowledgeBaseError(
                "ThrottlingException".to_string(),
            )),
        }
    }
}

/// Dedup store whose backend is unreachable: every claim fails.
pub struct FailingDedupStore;

#[async_trait]
impl DedupStore for FailingDedupStore {
    async fn try_claim(&self, _event_key: &str) -> Result<bool, AgentError> {
        Err(AgentError::DedupStoreError(
            "ResourceNotFoundException: table not found".to_string(),
        ))
    }
}

pub struct Harness {
    pub chat: Arc<RecordingChat>,
    pub objects: Arc<FakeObjectStore>,
    pub knowledge_base: Arc<FakeKnowledgeBase>,
    pub dedup: Arc<MemoryDedupStore>,
    pub services: AgentServices,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(5))
    }

    pub fn with_timeout(knowledge_base_timeout: Duration) -> Self {
        let chat = Arc::new(RecordingChat::default());
        let objects = Arc::new(FakeObjectStore::default());
        let knowledge_base = Arc::new(FakeKnowledgeBase::answering(
            "X is the internal project tracker.",
        ));
        let dedup = Arc::new(MemoryDedupStore::new());

        let services = AgentServices {
            chat: chat.clone(),
            dedup: dedup.clone(),
            objects: objects.clone(),
            knowledge_base: knowledge_base.clone(),
            knowledge_base_timeout,
        };

        Self {
            chat,
            objects,
            knowledge_base,
            dedup,
            services,
        }
    }
}

pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
}

pub fn mention_body(text: &str, channel: &str, user: &str, ts: &str) -> Value {
    json!({
        "type": "event_callback",
        "event": {
            "type": "app_mention",
            "text": text,
            "channel": channel,
            "user": user,
            "ts": ts
        }
    })
}

/// API Gateway proxy event carrying `body`, signed with [`SIGNING_SECRET`].
pub fn signed_request(body: &Value) -> Value {
    let body = body.to_string();
    let timestamp = now_secs().to_string();
    let signature = compute_signature(&timestamp, &body, SIGNING_SECRET);

    json!({
        "httpMethod": "POST",
        "path": "/slack/events",
        "headers": {
            "Content-Type": "application/json",
            "X-Slack-Request-Timestamp": timestamp,
            "X-Slack-Signature": signature
        },
        "body": body,
        "isBase64Encoded": false
    })
}

pub fn response_body(response: &Value) -> Value {
    serde_json::from_str(response["body"].as_str().unwrap()).unwrap()
}

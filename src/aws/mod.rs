//! AWS-backed implementations of the service traits

pub mod bedrock;
pub mod dynamodb;
pub mod s3;
pub mod ssm;

use aws_config::SdkConfig;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::core::AgentServices;
use crate::core::config::{AppConfig, RuntimeSettings};
use crate::slack::SlackClient;

pub use bedrock::BedrockKnowledgeBase;
pub use dynamodb::DynamoDedupStore;
pub use s3::S3ObjectStore;
pub use ssm::SsmParameterSource;

static SHARED_CONFIG: Lazy<OnceCell<SdkConfig>> = Lazy::new(OnceCell::new);
static SERVICES: Lazy<OnceCell<AgentServices>> = Lazy::new(OnceCell::new);

/// Shared SDK configuration, resolved once per process.
pub async fn shared_config() -> &'static SdkConfig {
    SHARED_CONFIG
        .get_or_init(|| async { aws_config::from_env().load().await })
        .await
}

pub async fn parameter_source() -> SsmParameterSource {
    SsmParameterSource::new(aws_sdk_ssm::Client::new(shared_config().await))
}

/// Production wiring of the handler services, built once per process.
pub async fn services(config: &AppConfig, settings: &RuntimeSettings) -> &'static AgentServices {
    SERVICES
        .get_or_init(|| async move {
            let shared = shared_config().await;
            AgentServices {
                chat: Arc::new(SlackClient::new(config.slack_bot_token.clone())),
                dedup: Arc::new(DynamoDedupStore::new(
                    aws_sdk_dynamodb::Client::new(shared),
                    settings.dedup_table_name.clone(),
                )),
                objects: Arc::new(S3ObjectStore::new(
                    aws_sdk_s3::Client::new(shared),
                    config.bucket_name.clone(),
                )),
                knowledge_base: Arc::new(BedrockKnowledgeBase::new(
                    aws_sdk_bedrockagentruntime::Client::new(shared),
                    config.knowledge_base_id.clone(),
                    settings.knowledge_base_model_arn.clone(),
                )),
                knowledge_base_timeout: settings.knowledge_base_timeout,
            }
        })
        .await
}

use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::Client as BedrockAgentClient;
use aws_sdk_bedrockagentruntime::types::{
    KnowledgeBaseRetrieveAndGenerateConfiguration, RetrieveAndGenerateConfiguration,
    RetrieveAndGenerateInput, RetrieveAndGenerateType,
};
use tracing::debug;

use crate::core::KnowledgeBase;
use crate::errors::AgentError;

/// `RetrieveAndGenerate` against one knowledge base and one model.
#[derive(Debug, Clone)]
pub struct BedrockKnowledgeBase {
    client: BedrockAgentClient,
    knowledge_base_id: String,
    model_arn: String,
}

impl BedrockKnowledgeBase {
    #[must_use]
    pub fn new(client: BedrockAgentClient, knowledge_base_id: String, model_arn: String) -> Self {
        Self {
            client,
            knowledge_base_id,
            model_arn,
        }
    }

    fn build_error(e: impl std::fmt::Display) -> AgentError {
        AgentError::KnowledgeBaseError(format!("request build: {e}"))
    }
}

#[async_trait]
impl KnowledgeBase for BedrockKnowledgeBase {
    async fn query(&self, question: &str) -> Result<Option<String>, AgentError> {
        let input = RetrieveAndGenerateInput::builder()
            .text(question)
            .build()
            .map_err(Self::build_error)?;

        let kb_config = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(&self.knowledge_base_id)
            .model_arn(&self.model_arn)
            .build()
            .map_err(Self::build_error)?;

        let config = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(kb_config)
            .build()
            .map_err(Self::build_error)?;

        let resp = self
            .client
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(config)
            .send()
            .await
            .map_err(|e| {
                AgentError::KnowledgeBaseError(format!(
                    "bedrock retrieve_and_generate {}: {e}",
                    self.knowledge_base_id
                ))
            })?;

        debug!(knowledge_base_id = %self.knowledge_base_id, "Knowledge base answered");

        Ok(resp
            .output()
            .map(|output| output.text().to_string())
            .filter(|text| !text.trim().is_empty()))
    }
}

use async_trait::async_trait;
use aws_sdk_ssm::Client as SsmClient;
use aws_sdk_ssm::operation::get_parameter::GetParameterError;

use crate::core::config::ParameterSource;
use crate::errors::AgentError;

/// Parameter Store lookups with decryption enabled.
#[derive(Debug, Clone)]
pub struct SsmParameterSource {
    client: SsmClient,
}

impl SsmParameterSource {
    #[must_use]
    pub fn new(client: SsmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterSource for SsmParameterSource {
    async fn get_parameter(&self, name: &str) -> Result<Option<String>, AgentError> {
        match self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
        {
            Ok(resp) => Ok(resp
                .parameter
                .and_then(|param| param.value)
                .filter(|value| !value.is_empty())),
            Err(e) => {
                if e
                    .as_service_error()
                    .is_some_and(GetParameterError::is_parameter_not_found)
                {
                    Ok(None)
                } else {
                    Err(AgentError::ConfigError(format!("ssm get_parameter {name}: {e}")))
                }
            }
        }
    }
}

use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::env;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::info;

use crate::errors::AgentError;

pub const DEFAULT_PARAMETER_PREFIX: &str = "/slack-ai-agent/";
pub const DEFAULT_DEDUP_TABLE_NAME: &str = "slack-ai-agent-dedup";
pub const DEFAULT_REGION: &str = "ap-northeast-1";
pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-haiku-20240307-v1:0";
pub const DEFAULT_KNOWLEDGE_BASE_TIMEOUT_SECS: u64 = 20;

pub const PARAM_BOT_TOKEN: &str = "bot-token";
pub const PARAM_SIGNING_SECRET: &str = "signing-secret";
pub const PARAM_BUCKET: &str = "s3-bucket";
pub const PARAM_KNOWLEDGE_BASE_ID: &str = "knowledge-base-id";

/// Secrets and resource names fetched from Parameter Store.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub slack_bot_token: String,
    pub slack_signing_secret: String,
    pub bucket_name: String,
    pub knowledge_base_id: String,
}

/// Non-secret settings taken from the Lambda environment.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub parameter_prefix: String,
    pub dedup_table_name: String,
    pub knowledge_base_model_arn: String,
    pub knowledge_base_timeout: Duration,
}

impl RuntimeSettings {
    /// # Errors
    ///
    /// Returns an error if `KNOWLEDGE_BASE_TIMEOUT_SECS` is set but not a
    /// positive integer.
    pub fn from_env() -> Result<Self, AgentError> {
        let region = env::var("AWS_REGION").unwrap_or_else(|_| DEFAULT_REGION.to_string());

        let knowledge_base_timeout = match env::var("KNOWLEDGE_BASE_TIMEOUT_SECS") {
            Ok(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AgentError::ConfigError(format!(
                        "KNOWLEDGE_BASE_TIMEOUT_SECS: invalid value '{raw}'"
                    )));
                }
            },
            Err(_) => Duration::from_secs(DEFAULT_KNOWLEDGE_BASE_TIMEOUT_SECS),
        };

        Ok(Self {
            parameter_prefix: normalize_prefix(
                &env::var("PARAMETER_PREFIX")
                    .unwrap_or_else(|_| DEFAULT_PARAMETER_PREFIX.to_string()),
            ),
            dedup_table_name: env::var("DEDUP_TABLE_NAME")
                .unwrap_or_else(|_| DEFAULT_DEDUP_TABLE_NAME.to_string()),
            knowledge_base_model_arn: env::var("KNOWLEDGE_BASE_MODEL_ARN")
                .unwrap_or_else(|_| default_model_arn(&region)),
            knowledge_base_timeout,
        })
    }
}

#[must_use]
pub fn default_model_arn(region: &str) -> String {
    format!("arn:aws:bedrock:{region}::foundation-model/{DEFAULT_MODEL_ID}")
}

fn normalize_prefix(prefix: &str) -> String {
    let mut p = prefix.trim().to_string();
    if !p.ends_with('/') {
        p.push('/');
    }
    p
}

/// Remote key/value source for secrets.
#[async_trait]
pub trait ParameterSource: Send + Sync {
    /// Fetch one parameter by full name. `Ok(None)` means it does not exist.
    async fn get_parameter(&self, name: &str) -> Result<Option<String>, AgentError>;
}

async fn fetch_required(
    source: &dyn ParameterSource,
    prefix: &str,
    key: &str,
) -> Result<String, AgentError> {
    let name = format!("{prefix}{key}");
    match source.get_parameter(&name).await? {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AgentError::ConfigError(format!("{name}: missing or empty"))),
    }
}

/// Fetch all four parameters concurrently. Any failure fails the whole load.
///
/// # Errors
///
/// Returns `ConfigError` if a parameter is missing or empty, or the error of
/// the first failed lookup.
pub async fn load_config(
    source: &dyn ParameterSource,
    prefix: &str,
) -> Result<AppConfig, AgentError> {
    let (slack_bot_token, slack_signing_secret, bucket_name, knowledge_base_id) = tokio::try_join!(
        fetch_required(source, prefix, PARAM_BOT_TOKEN),
        fetch_required(source, prefix, PARAM_SIGNING_SECRET),
        fetch_required(source, prefix, PARAM_BUCKET),
        fetch_required(source, prefix, PARAM_KNOWLEDGE_BASE_ID),
    )?;

    Ok(AppConfig {
        slack_bot_token,
        slack_signing_secret,
        bucket_name,
        knowledge_base_id,
    })
}

/// Write-once holder for [`AppConfig`].
///
/// A failed load leaves the cell empty so the next call tries again; a
/// successful load is kept for the life of the process.
pub struct ConfigCache {
    cell: OnceCell<AppConfig>,
}

impl ConfigCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// # Errors
    ///
    /// Propagates the loader error when the cache is still empty.
    pub async fn get_or_load(
        &self,
        source: &dyn ParameterSource,
        prefix: &str,
    ) -> Result<&AppConfig, AgentError> {
        self.cell
            .get_or_try_init(|| async {
                let config = load_config(source, prefix).await?;
                info!(prefix = %prefix, "Loaded configuration from parameter store");
                Ok::<_, AgentError>(config)
            })
            .await
    }

    #[must_use]
    pub fn get(&self) -> Option<&AppConfig> {
        self.cell.get()
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}

static APP_CONFIG: Lazy<ConfigCache> = Lazy::new(ConfigCache::new);

/// Process-wide configuration, loaded on first use.
///
/// # Errors
///
/// Returns `ConfigError` (or the lookup error) if the first load fails.
pub async fn get_config(
    source: &dyn ParameterSource,
    settings: &RuntimeSettings,
) -> Result<&'static AppConfig, AgentError> {
    APP_CONFIG
        .get_or_load(source, &settings.parameter_prefix)
        .await
}

//! Chat-completion clients used by the analyzer

use crate::config::{AnalysisSettings, AzureDeployment, Config};
use crate::error::{AnalyzerError, Result};
use async_openai::config::AzureConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use log::debug;
use std::time::Duration;

/// Backoff that gives up after the first failed request
fn single_attempt() -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

/// A single-turn chat model
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one system and one user message and returns the reply text
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Chat completions against an Azure OpenAI deployment
pub struct AzureChatModel {
    client: Client<AzureConfig>,
    deployment: String,
    temperature: f32,
    max_tokens: u32,
}

impl AzureChatModel {
    /// Creates a client for a fully specified deployment
    pub fn new(deployment: &AzureDeployment, settings: &AnalysisSettings) -> Self {
        let config = AzureConfig::new()
            .with_api_base(&deployment.endpoint)
            .with_api_key(&deployment.api_key)
            .with_deployment_id(&deployment.deployment)
            .with_api_version(&deployment.api_version);

        Self {
            client: Client::with_config(config).with_backoff(single_attempt()),
            deployment: deployment.deployment.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }

    /// Creates a client from the application configuration
    ///
    /// Fails with a config error when endpoint, key or deployment is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let deployment = config.azure.require()?;
        Ok(Self::new(&deployment, &config.analysis))
    }
}

#[async_trait]
impl ChatModel for AzureChatModel {
    // Older Azure API versions only understand `max_tokens`
    #[allow(deprecated)]
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let messages: Vec<ChatCompletionRequestMessage> = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system)
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user)
                .build()?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.deployment.as_str())
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()?;

        debug!("Requesting completion from deployment {}", self.deployment);
        let response = self.client.chat().create(request).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AnalyzerError::LLM("Completion contained no message content".into()))
    }
}

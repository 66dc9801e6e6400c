use anyhow::Result;
use async_trait::async_trait;

pub mod api_key;
pub mod openai;

pub use api_key::ApiKey;

#[derive(Debug, Clone)]
pub enum LLMProvider {
    OpenAI,
}

/// A single two-turn chat completion: one system message, one user message.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[async_trait]
pub trait LLMService {
    /// Sends `request` authorised by `api_key` and returns the content of the
    /// first completion choice exactly as the service produced it.
    async fn complete(&self, api_key: &ApiKey, request: &CompletionRequest) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct LLMClientConfig {
    /// Overrides the provider's default endpoint, e.g. for a proxy.
    pub api_base: Option<String>,
}

pub struct LLMClient {
    service: Box<dyn LLMService + Send + Sync>,
}

impl LLMClient {
    pub fn new(provider: LLMProvider, config: Option<LLMClientConfig>) -> Self {
        let config = config.unwrap_or_default();
        let service: Box<dyn LLMService + Send + Sync> = match provider {
            LLMProvider::OpenAI => Box::new(openai::OpenAIService::new(config.api_base)),
        };

        Self { service }
    }

    pub fn with_service(service: Box<dyn LLMService + Send + Sync>) -> Self {
        Self { service }
    }

    pub async fn complete(&self, api_key: &ApiKey, request: &CompletionRequest) -> Result<String> {
        tracing::debug!(
            model = %request.model,
            user_prompt_len = request.user_prompt.len(),
            "Executing chat completion"
        );

        // Errors are reported by the caller.
        let content = self.service.complete(api_key, request).await?;
        tracing::debug!(content_len = content.len(), "Chat completion finished");

        Ok(content)
    }
}

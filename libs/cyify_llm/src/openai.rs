use std::time::Duration;

use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;

use crate::{ApiKey, CompletionRequest, LLMService};

pub struct OpenAIService {
    api_base: Option<String>,
}

impl OpenAIService {
    pub fn new(api_base: Option<String>) -> Self {
        Self { api_base }
    }

    // A client per call: the key belongs to the caller's session.
    fn client(&self, api_key: &ApiKey) -> Client<OpenAIConfig> {
        let mut config = OpenAIConfig::new().with_api_key(api_key.as_str());
        if let Some(api_base) = &self.api_base {
            config = config.with_api_base(api_base.as_str());
        }

        Client::with_config(config).with_backoff(single_attempt())
    }
}

/// async-openai retries rate-limited requests on its own; one request per
/// transform means that retry loop has to stop after the first attempt.
fn single_attempt() -> backoff::ExponentialBackoff {
    backoff::ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build()
}

#[allow(deprecated)]
fn build_request(request: &CompletionRequest) -> Result<CreateChatCompletionRequest> {
    let messages: Vec<ChatCompletionRequestMessage> = vec![
        ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_prompt.as_str())
            .build()?
            .into(),
        ChatCompletionRequestUserMessageArgs::default()
            .content(request.user_prompt.as_str())
            .build()?
            .into(),
    ];

    CreateChatCompletionRequestArgs::default()
        .model(request.model.as_str())
        .messages(messages)
        .temperature(request.temperature)
        .max_tokens(request.max_tokens)
        .build()
        .context("Failed to build chat completion request")
}

#[async_trait]
impl LLMService for OpenAIService {
    async fn complete(&self, api_key: &ApiKey, request: &CompletionRequest) -> Result<String> {
        let chat_request = build_request(request)?;

        let response = self.client(api_key).chat().create(chat_request).await?;

        if let Some(usage) = &response.usage {
            tracing::info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "OpenAI usage"
            );
        }

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .context("Invalid response format from OpenAI: no message content")
    }
}

use std::sync::Arc;

use cyify_llm::{ApiKey, LLMClient};

use super::style_check::StyleReport;
use crate::core::error::TransformError;
use crate::prompts::text_transformer_prompt::TextTransformerPrompt;

#[derive(Clone)]
pub struct TextTransformerService {
    llm_client: Arc<LLMClient>,
}

impl TextTransformerService {
    pub fn new(llm_client: Arc<LLMClient>) -> Self {
        Self { llm_client }
    }

    /// Validates, then makes exactly one completion call. Blank input is
    /// checked before the key, and neither failure reaches the network.
    pub async fn transform(
        &self,
        text: &str,
        api_key: Option<&ApiKey>,
    ) -> Result<String, TransformError> {
        if text.trim().is_empty() {
            return Err(TransformError::MissingInput);
        }

        let api_key = api_key
            .filter(|key| !key.is_empty())
            .ok_or(TransformError::MissingCredential)?;

        let request = TextTransformerPrompt::get_request(text);
        let response = self.llm_client.complete(api_key, &request).await?;
        let transformed = response.trim().to_string();

        let report = StyleReport::inspect(&transformed);
        if !report.conforms() {
            tracing::warn!(
                leading_words = report.leading_words.len(),
                "Transformed text does not open with five single-word lines"
            );
        }

        Ok(transformed)
    }
}

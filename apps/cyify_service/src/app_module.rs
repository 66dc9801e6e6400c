use std::sync::Arc;

use cyify_llm::LLMClient;

use crate::core::config::Settings;
use crate::credentials::CredentialResolver;
use crate::session::SessionStore;
use crate::text_transformer::TextTransformerService;

#[derive(Clone)]
pub struct AppService {
    pub text_transformer_service: TextTransformerService,
}

impl AppService {
    pub fn new(llm_client: LLMClient) -> Self {
        let text_transformer_service = TextTransformerService::new(Arc::new(llm_client));

        Self {
            text_transformer_service,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub service: AppService,
    pub sessions: SessionStore,
    pub credentials: CredentialResolver,
}

impl AppState {
    pub fn new(settings: &Settings, llm_client: LLMClient, credentials: CredentialResolver) -> Self {
        Self {
            service: AppService::new(llm_client),
            sessions: SessionStore::new(settings.session_idle_timeout),
            credentials,
        }
    }
}

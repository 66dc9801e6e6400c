use std::sync::Arc;

use cyify_llm::ApiKey;

use super::secret_store::SecretStore;

pub const API_KEY_NAME: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    Environment,
    SecretStore,
    UserEntry,
}

impl CredentialSource {
    pub fn describe(self) -> &'static str {
        match self {
            CredentialSource::Environment => "Using API key from environment variables",
            CredentialSource::SecretStore => "Using API key from secrets",
            CredentialSource::UserEntry => "Your API key is needed to use the OpenAI service",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedCredential {
    pub source: CredentialSource,
    pub api_key: Option<ApiKey>,
}

impl Default for ResolvedCredential {
    fn default() -> Self {
        Self {
            source: CredentialSource::UserEntry,
            api_key: None,
        }
    }
}

/// Looks the API key up in the environment, then the secret store. When
/// neither has it the session falls back to asking the user.
#[derive(Clone)]
pub struct CredentialResolver {
    environment: Arc<dyn SecretStore>,
    secret_store: Arc<dyn SecretStore>,
}

impl CredentialResolver {
    pub fn new(environment: Arc<dyn SecretStore>, secret_store: Arc<dyn SecretStore>) -> Self {
        Self {
            environment,
            secret_store,
        }
    }

    pub fn resolve(&self) -> ResolvedCredential {
        let sources = [
            (CredentialSource::Environment, &self.environment),
            (CredentialSource::SecretStore, &self.secret_store),
        ];

        for (source, store) in sources {
            if let Some(api_key) = store
                .get(API_KEY_NAME)
                .as_deref()
                .and_then(ApiKey::from_input)
            {
                tracing::debug!(?source, "Resolved API key");
                return ResolvedCredential {
                    source,
                    api_key: Some(api_key),
                };
            }
        }

        tracing::debug!("No API key configured, waiting for user entry");
        ResolvedCredential::default()
    }
}

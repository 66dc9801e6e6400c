use std::{
    env,
    net::{Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use cyify_llm::LLMClientConfig;

use crate::core::error::ConfigError;

const DEFAULT_ENVIRONMENT: &str = "dev";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_SECRETS_FILE: &str = "secrets.toml";
const DEFAULT_SESSION_IDLE_TIMEOUT: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone)]
pub struct Settings {
    pub environment: String,
    pub port: u16,
    pub secrets_file: PathBuf,
    /// Alternate OpenAI-compatible endpoint, e.g. a proxy.
    pub openai_api_base: Option<String>,
    pub session_idle_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            port: DEFAULT_PORT,
            secrets_file: PathBuf::from(DEFAULT_SECRETS_FILE),
            openai_api_base: None,
            session_idle_timeout: DEFAULT_SESSION_IDLE_TIMEOUT,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads `APP_ENVIRONMENT`, `PORT`, `SECRETS_FILE` and `OPENAI_API_BASE`
    /// through `lookup`, falling back to defaults for anything unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(environment) = lookup("APP_ENVIRONMENT") {
            settings.environment = environment;
        }

        if let Some(port) = lookup("PORT") {
            settings.port = port.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("PORT must be a port number, got {:?}", port))
            })?;
        }

        if let Some(secrets_file) = lookup("SECRETS_FILE") {
            settings.secrets_file = PathBuf::from(secrets_file);
        }

        settings.openai_api_base = lookup("OPENAI_API_BASE")
            .map(|base| base.trim().to_string())
            .filter(|base| !base.is_empty());

        Ok(settings)
    }

    pub fn is_dev(&self) -> bool {
        self.environment == DEFAULT_ENVIRONMENT
    }

    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    pub fn llm_client_config(&self) -> LLMClientConfig {
        LLMClientConfig {
            api_base: self.openai_api_base.clone(),
        }
    }
}

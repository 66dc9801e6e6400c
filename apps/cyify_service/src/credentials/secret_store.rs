use std::{collections::HashMap, env, fmt, fs, path::Path};

use crate::core::error::ConfigError;

/// A read-only source of named secrets.
pub trait SecretStore: Send + Sync {
    fn get(&self, name: &str) -> Option<String>;
}

/// The process environment.
pub struct EnvironmentSecrets;

impl SecretStore for EnvironmentSecrets {
    fn get(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }
}

impl SecretStore for HashMap<String, String> {
    fn get(&self, name: &str) -> Option<String> {
        HashMap::get(self, name).cloned()
    }
}

/// Hosting secret store backed by a flat TOML file of string values, e.g.
///
/// ```toml
/// OPENAI_API_KEY = "sk-..."
/// ```
#[derive(Default, Clone)]
pub struct TomlSecretStore {
    values: HashMap<String, String>,
}

impl TomlSecretStore {
    /// A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No secrets file found");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            ConfigError::Loading(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let store = Self::parse(&contents)?;
        tracing::info!(
            path = %path.display(),
            secrets = store.values.len(),
            "Loaded secrets file"
        );

        Ok(store)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(contents)?;

        let values = table
            .into_iter()
            .filter_map(|(name, value)| match value {
                toml::Value::String(secret) => Some((name, secret)),
                _ => None,
            })
            .collect();

        Ok(Self { values })
    }
}

impl SecretStore for TomlSecretStore {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

impl fmt::Debug for TomlSecretStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TomlSecretStore")
            .field("names", &self.values.keys().collect::<Vec<_>>())
            .finish()
    }
}

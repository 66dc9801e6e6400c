pub mod credential_resolver;
pub mod secret_store;

pub use credential_resolver::{CredentialResolver, CredentialSource, ResolvedCredential};
pub use secret_store::{EnvironmentSecrets, SecretStore, TomlSecretStore};

use std::sync::Arc;

use anyhow::Context;
use cyify_llm::{LLMClient, LLMProvider};
use cyify_service::{
    app_module::AppState,
    app_router::application,
    core::config::Settings,
    credentials::{CredentialResolver, EnvironmentSecrets, TomlSecretStore},
};
use dotenvy::dotenv;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let settings = Settings::from_env()?;
    init_tracing(&settings)?;

    let secret_store = TomlSecretStore::load(&settings.secrets_file)?;
    let credentials =
        CredentialResolver::new(Arc::new(EnvironmentSecrets), Arc::new(secret_store));
    let llm_client = LLMClient::new(LLMProvider::OpenAI, Some(settings.llm_client_config()));

    let state = AppState::new(&settings, llm_client, credentials);
    let app = application(state);

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("unable to bind {}", address))?;

    tracing::info!("Server started, listening on {}", address);
    axum::serve(listener, app)
        .await
        .context("server terminated unexpectedly")?;

    Ok(())
}

fn init_tracing(settings: &Settings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber_builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_level(true)
        .with_span_events(FmtSpan::CLOSE);

    if settings.is_dev() {
        tracing::subscriber::set_global_default(
            subscriber_builder.pretty().with_ansi(true).finish(),
        )
        .context("setting dev subscriber failed")?;
    } else {
        tracing::subscriber::set_global_default(
            subscriber_builder.json().with_ansi(false).finish(),
        )
        .context("setting prod subscriber failed")?;
    }

    Ok(())
}

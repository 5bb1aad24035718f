use std::sync::Arc;

use mostrador_agent::orchestrator::TurnOrchestrator;
use mostrador_core::config::{AppConfig, ConfigError, LoadOptions};
use mostrador_core::session::InMemorySessionStore;
use mostrador_providers::{OpenAiCompletionClient, ShopifyCatalogGateway};
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub orchestrator: Arc<TurnOrchestrator>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("http client construction failed: {0}")]
    HttpClient(#[source] reqwest::Error),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(
        event_name = "system.bootstrap.start",
        correlation_id = "bootstrap",
        "starting application bootstrap"
    );

    let sessions = Arc::new(InMemorySessionStore::new(
        config.chat.max_history,
        config.chat.session_capacity,
    ));
    let completion =
        Arc::new(OpenAiCompletionClient::new(&config.llm).map_err(BootstrapError::HttpClient)?);
    let catalog =
        Arc::new(ShopifyCatalogGateway::new(&config.shop).map_err(BootstrapError::HttpClient)?);

    let orchestrator =
        Arc::new(TurnOrchestrator::new(&config, sessions, completion, catalog));

    info!(
        event_name = "system.bootstrap.ready",
        correlation_id = "bootstrap",
        model = %config.llm.model,
        "orchestrator wired to completion and catalog providers"
    );

    Ok(Application { config, orchestrator })
}

//! Composition root: wires the secret service, the Gemini client and the
//! workshop use case together.

use anyhow::{Result, anyhow};
use scribe_application::{WorkshopEvent, WorkshopUseCase, event_channel};
use scribe_core::config::{ModelConfig, PipelineConfig};
use scribe_core::generation::GenerativeService;
use scribe_core::secret::SecretService;
use scribe_core::session::SessionStore;
use scribe_infrastructure::SecretServiceImpl;
use scribe_interaction::GeminiApiClient;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Settings for [`bootstrap`].
#[derive(Debug, Clone, Default)]
pub struct BootstrapOptions {
    pub models: ModelConfig,
    pub pipeline: PipelineConfig,
    /// Overrides the API root, e.g. for a proxy
    pub base_url: Option<String>,
}

pub struct WorkshopBootstrap {
    pub usecase: WorkshopUseCase,
    pub events: UnboundedReceiver<WorkshopEvent>,
}

/// Builds the application from the default secret sources.
pub async fn bootstrap(options: BootstrapOptions) -> Result<WorkshopBootstrap> {
    let secrets = SecretServiceImpl::default()
        .map_err(|e| anyhow!("Failed to locate secret file: {}", e))?;
    bootstrap_with_secrets(&secrets, options).await
}

/// Builds the application with the given secret source.
pub async fn bootstrap_with_secrets(
    secrets: &dyn SecretService,
    options: BootstrapOptions,
) -> Result<WorkshopBootstrap> {
    let api_key = secrets
        .gemini_api_key()
        .await
        .map_err(|e| anyhow!("Failed to resolve Gemini API key: {}", e))?;

    let mut client = GeminiApiClient::new(api_key).with_models(options.models);
    if let Some(base_url) = options.base_url {
        client = client.with_base_url(base_url);
    }
    tracing::info!(
        "[Bootstrap] Using models vision={} reasoning={} fast={} speech={}",
        client.models().vision,
        client.models().reasoning,
        client.models().fast,
        client.models().speech
    );

    Ok(bootstrap_with_service(Arc::new(client), options.pipeline))
}

/// Builds the application around an existing generation service.
pub fn bootstrap_with_service(
    service: Arc<dyn GenerativeService>,
    pipeline: PipelineConfig,
) -> WorkshopBootstrap {
    let (sink, events) = event_channel();
    let usecase = WorkshopUseCase::with_parts(service, SessionStore::new(), sink, pipeline);
    WorkshopBootstrap { usecase, events }
}

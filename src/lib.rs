pub(crate) mod api;
pub(crate) mod core;
pub(crate) mod schemas;
pub(crate) mod services;
pub(crate) mod store;
pub(crate) mod tasks;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::core::{config::Settings, state::AppState, telemetry};
use crate::services::ai_engine::{AiEngineService, GenerationBackend};
use crate::services::text_extract::MarkerExtractService;
use crate::store::Store;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings)?;
    core::metrics::init(&settings)?;

    let generation = Arc::new(AiEngineService::from_settings(&settings)?);
    let extractor = Arc::new(MarkerExtractService::from_settings(&settings)?);

    if !generation.is_configured() {
        tracing::warn!("Generation backend has no API key; batches will produce fallback records");
    }

    let state = AppState::new(settings, Store::new(), generation, extractor);
    let app = api::router::router(state.clone());
    let listener = tokio::net::TcpListener::bind(state.settings().server_addr()).await?;

    tracing::info!(
        host = %state.settings().server_host(),
        port = state.settings().server_port(),
        environment = %state.settings().runtime().environment.as_str(),
        "ExamPrep Engine API listening"
    );

    axum::serve(listener, app).with_graceful_shutdown(core::shutdown::shutdown_signal()).await?;

    Ok(())
}

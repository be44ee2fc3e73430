use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::collections::HashMap;

use crate::core::metrics;
use crate::core::state::AppState;
use crate::schemas::{HealthResponse, RootResponse};
use crate::services::ai_engine::GenerationBackend;
use crate::services::text_extract::TextExtractor;

pub(crate) async fn root(State(state): State<AppState>) -> Json<RootResponse> {
    let response = RootResponse {
        message: "ExamPrep Engine API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        docs_url: format!("{}/docs", state.settings().api().api_v1_str),
    };

    Json(response)
}

pub(crate) async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut status = "healthy".to_string();
    let mut components = HashMap::new();

    if state.generation().is_configured() {
        components.insert("generation_backend".to_string(), "configured".to_string());
    } else {
        components.insert("generation_backend".to_string(), "unconfigured".to_string());
        status = "degraded".to_string();
    }

    if state.extractor().is_configured() {
        components.insert("text_extractor".to_string(), "configured".to_string());
    } else {
        components.insert("text_extractor".to_string(), "unconfigured".to_string());
        status = "degraded".to_string();
    }

    let records = state.store().analyses().len()
        + state.store().questions().len()
        + state.store().explanations().len()
        + state.store().mappings().len();
    components.insert("store".to_string(), format!("{records} records"));

    Json(HealthResponse { service: "examprep-engine".to_string(), status, components })
}

pub(crate) async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    if !state.settings().telemetry().prometheus_enabled {
        return StatusCode::NOT_FOUND.into_response();
    }

    match metrics::render() {
        Some(body) => ([(axum::http::header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
            .into_response(),
        None => StatusCode::SERVICE_UNAVAILABLE.into_response(),
    }
}

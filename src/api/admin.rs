//! Admin panel: dataset registry, system users, AI model catalog and
//! component status.

use std::collections::HashMap;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::core::time::rfc3339_now;
use crate::schemas::admin::{
    DatasetCreate, DatasetListResponse, ModelListResponse, SystemStatusResponse, UserListResponse,
};
use crate::services::ai_engine::GenerationBackend;
use crate::services::text_extract::TextExtractor;
use crate::store::seed;
use crate::store::types::{DatasetStatus, ExamDataset};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/datasets", get(list_datasets).post(create_dataset))
        .route("/users", get(list_users))
        .route("/models", get(list_models))
        .route("/status", get(system_status))
}

async fn list_datasets(State(state): State<AppState>) -> Json<DatasetListResponse> {
    let items = state.store().datasets();
    let total_count = items.len();
    Json(DatasetListResponse { items, total_count })
}

async fn create_dataset(
    State(state): State<AppState>,
    Json(payload): Json<DatasetCreate>,
) -> Result<(StatusCode, Json<ExamDataset>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let dataset = ExamDataset {
        id: Uuid::new_v4().to_string(),
        name: payload.name,
        papers: payload.papers,
        questions: payload.questions,
        status: DatasetStatus::Active,
        last_updated: rfc3339_now(),
    };

    state.store().add_dataset(dataset.clone());
    state
        .store()
        .push_activity("Dataset Registered".to_string(), format!("{} added", dataset.name));

    Ok((StatusCode::CREATED, Json(dataset)))
}

async fn list_users() -> Json<UserListResponse> {
    let items = seed::system_users();
    let total_count = items.len();
    Json(UserListResponse { items, total_count })
}

async fn list_models() -> Json<ModelListResponse> {
    let items = seed::ai_models();
    let total_count = items.len();
    Json(ModelListResponse { items, total_count })
}

async fn system_status(State(state): State<AppState>) -> Json<SystemStatusResponse> {
    let mut components = HashMap::new();
    components.insert(
        "ai_engine".to_string(),
        if state.generation().is_configured() { "active" } else { "unconfigured" }.to_string(),
    );
    components.insert(
        "text_extractor".to_string(),
        if state.extractor().is_configured() { "active" } else { "unconfigured" }.to_string(),
    );
    components.insert("store".to_string(), "active".to_string());
    components.insert("api".to_string(), "active".to_string());

    Json(SystemStatusResponse { components })
}

#[cfg(test)]
mod tests;

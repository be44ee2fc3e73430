use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::date_today;
use crate::schemas::generator::GenerateBatchRequest;
use crate::schemas::{BatchAccepted, CollectionResponse};
use crate::services::batch::{BatchProgress, BatchSnapshot};
use crate::services::reports::{self, FileDownload};
use crate::store::types::{GenerationParams, QuestionRecord};
use crate::tasks::generation;

pub(super) async fn submit_batch(
    State(state): State<AppState>,
    Json(payload): Json<GenerateBatchRequest>,
) -> Result<(StatusCode, Json<BatchAccepted>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    validation::validate_class_level(&payload.class_level)?;
    validation::validate_subject(&payload.subject)?;
    validation::validate_target_exam(&payload.target_exam)?;
    validation::validate_question_type(&payload.question_type)?;
    if let Some(board) = payload.board.as_deref().filter(|value| !value.is_empty()) {
        validation::validate_board(board)?;
    }

    let max_questions = state.settings().batch().max_questions_per_batch as u32;
    if payload.quantity > max_questions {
        return Err(ApiError::BadRequest(format!(
            "A batch may request at most {max_questions} questions"
        )));
    }

    let params = GenerationParams {
        class_level: payload.class_level.clone(),
        board: payload
            .board
            .as_deref()
            .filter(|value| !value.is_empty())
            .map(|value| value.to_ascii_lowercase()),
        subject: payload.subject.to_ascii_lowercase(),
        exam_type: payload.target_exam.to_ascii_lowercase(),
        question_type: payload.question_type.to_ascii_lowercase(),
        topic: payload.topic.clone().filter(|value| !value.trim().is_empty()),
        difficulty_percent: payload.difficulty_percent,
        time_limit_minutes: payload.time_limit_minutes,
    };

    let batch_id = Uuid::new_v4().to_string();
    if !state.store().questions().begin_batch(&batch_id) {
        return Err(ApiError::Conflict(
            "A question generation batch is already in progress".to_string(),
        ));
    }

    let progress = BatchProgress::new(batch_id.clone(), generation::PANEL, payload.quantity);
    state.store().register_batch(progress.clone());

    tracing::info!(
        batch_id = %batch_id,
        quantity = payload.quantity,
        "Starting question generation batch"
    );
    tokio::spawn(generation::run_generation_batch(state, progress, params, payload.quantity));

    Ok((
        StatusCode::ACCEPTED,
        Json(BatchAccepted { batch_id, panel: generation::PANEL, total_items: payload.quantity }),
    ))
}

pub(super) async fn batch_status(
    Path(batch_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<BatchSnapshot>, ApiError> {
    let progress = state
        .store()
        .batch(&batch_id)
        .filter(|progress| progress.panel() == generation::PANEL)
        .ok_or_else(|| ApiError::NotFound(format!("Batch '{batch_id}' not found")))?;

    Ok(Json(progress.snapshot()))
}

pub(super) async fn list_questions(
    State(state): State<AppState>,
) -> Json<CollectionResponse<QuestionRecord>> {
    Json(CollectionResponse::new(state.store().questions().records()))
}

pub(super) async fn download_batch(
    Path(batch_id): Path<String>,
    State(state): State<AppState>,
) -> Result<FileDownload, ApiError> {
    let records: Vec<QuestionRecord> = state
        .store()
        .questions()
        .records()
        .into_iter()
        .filter(|record| record.batch_id == batch_id)
        .collect();

    if records.is_empty() {
        return Err(ApiError::NotFound(format!("No questions found for batch '{batch_id}'")));
    }

    Ok(reports::question_paper(&records, &date_today()))
}

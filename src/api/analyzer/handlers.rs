use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use base64::Engine as _;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::date_today;
use crate::schemas::analyzer::AnalyzeBatchRequest;
use crate::schemas::{BatchAccepted, CollectionResponse};
use crate::services::batch::{BatchProgress, BatchSnapshot};
use crate::services::reports::{self, FileDownload};
use crate::store::types::{AnalysisParams, AnalysisRecord};
use crate::tasks::analysis::{self, PaperWorkItem};

pub(super) async fn submit_batch(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeBatchRequest>,
) -> Result<(StatusCode, Json<BatchAccepted>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let params = validate_params(&payload.exam_type, &payload.year, &payload.subject)?;

    let mut files = Vec::with_capacity(payload.files.len());
    for upload in &payload.files {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(upload.content_base64.as_bytes())
            .map_err(|_| {
                ApiError::BadRequest(format!("File '{}' is not valid base64", upload.filename))
            })?;
        files.push(PaperWorkItem { filename: upload.filename.clone(), bytes });
    }

    let accepted = start_batch(state, params, files)?;
    Ok((StatusCode::ACCEPTED, Json(accepted)))
}

pub(super) async fn submit_batch_multipart(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<BatchAccepted>), ApiError> {
    let mut exam_type = None;
    let mut year = None;
    let mut subject = None;
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "exam_type" | "examType" => exam_type = Some(read_text(field, &name).await?),
            "year" => year = Some(read_text(field, &name).await?),
            "subject" => subject = Some(read_text(field, &name).await?),
            "files" | "file" => {
                let filename = field
                    .file_name()
                    .map(|value| value.to_string())
                    .filter(|value| !value.is_empty())
                    .ok_or_else(|| {
                        ApiError::BadRequest("Uploaded file part is missing a filename".to_string())
                    })?;
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read file '{filename}': {e}"))
                })?;
                files.push(PaperWorkItem { filename, bytes: bytes.to_vec() });
            }
            _ => {}
        }
    }

    let exam_type = require_field(exam_type, "exam_type")?;
    let year = require_field(year, "year")?;
    let subject = require_field(subject, "subject")?;
    if files.is_empty() {
        return Err(ApiError::BadRequest("At least one paper file is required".to_string()));
    }

    let params = validate_params(&exam_type, &year, &subject)?;
    let accepted = start_batch(state, params, files)?;
    Ok((StatusCode::ACCEPTED, Json(accepted)))
}

pub(super) async fn batch_status(
    Path(batch_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<BatchSnapshot>, ApiError> {
    let progress = state
        .store()
        .batch(&batch_id)
        .filter(|progress| progress.panel() == analysis::PANEL)
        .ok_or_else(|| ApiError::NotFound(format!("Batch '{batch_id}' not found")))?;

    Ok(Json(progress.snapshot()))
}

pub(super) async fn list_analyses(
    State(state): State<AppState>,
) -> Json<CollectionResponse<AnalysisRecord>> {
    Json(CollectionResponse::new(state.store().analyses().records()))
}

pub(super) async fn download_report(
    Path(analysis_id): Path<String>,
    State(state): State<AppState>,
) -> Result<FileDownload, ApiError> {
    let record = state
        .store()
        .analyses()
        .records()
        .into_iter()
        .find(|record| record.id == analysis_id)
        .ok_or_else(|| ApiError::NotFound(format!("Analysis '{analysis_id}' not found")))?;

    Ok(reports::analysis_report(&record, &date_today()))
}

fn validate_params(
    exam_type: &str,
    year: &str,
    subject: &str,
) -> Result<AnalysisParams, ApiError> {
    validation::validate_exam_type(exam_type)?;
    validation::validate_year(year)?;
    validation::validate_subject(subject)?;

    Ok(AnalysisParams {
        exam_type: exam_type.to_ascii_lowercase(),
        year: year.to_string(),
        subject: subject.to_ascii_lowercase(),
    })
}

/// Validates the file set and spawns the batch task. Everything that can
/// reject must reject here, before any external call is issued.
fn start_batch(
    state: AppState,
    params: AnalysisParams,
    files: Vec<PaperWorkItem>,
) -> Result<BatchAccepted, ApiError> {
    let max_files = state.settings().batch().max_files_per_batch as usize;
    if files.len() > max_files {
        return Err(ApiError::BadRequest(format!(
            "A batch may contain at most {max_files} files"
        )));
    }

    for file in &files {
        validation::validate_paper_filename(&file.filename, state.settings())?;
        validation::validate_paper_size(&file.filename, file.bytes.len(), state.settings())?;
    }

    let batch_id = Uuid::new_v4().to_string();
    if !state.store().analyses().begin_batch(&batch_id) {
        return Err(ApiError::Conflict(
            "A paper analysis batch is already in progress".to_string(),
        ));
    }

    let total_items = files.len() as u32;
    let progress = BatchProgress::new(batch_id.clone(), analysis::PANEL, total_items);
    state.store().register_batch(progress.clone());

    tracing::info!(batch_id = %batch_id, files = total_items, "Starting paper analysis batch");
    tokio::spawn(analysis::run_analysis_batch(state, progress, params, files));

    Ok(BatchAccepted { batch_id, panel: analysis::PANEL, total_items })
}

async fn read_text(field: axum::extract::multipart::Field<'_>, name: &str) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read field '{name}': {e}")))
}

fn require_field(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::BadRequest(format!("Field '{name}' is required")))
}

//! Syllabus mapper panel: maps a school curriculum onto a competitive exam
//! syllabus with one structured generation call.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::{date_today, rfc3339_now};
use crate::schemas::mapper::MapSyllabusRequest;
use crate::schemas::CollectionResponse;
use crate::services::ai_engine::GenerationBackend;
use crate::services::reports::{self, FileDownload};
use crate::store::catalog;
use crate::store::types::{
    ItemStatus, MappingInsights, MappingParams, MappingRecord, OverlapStatus, SourceInput,
    SyllabusGap, SyllabusMapping, TopicOverlap,
};
use crate::store::UsageCounters;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/mappings", post(create_mapping).get(list_mappings))
        .route("/mappings/:mapping_id/report", get(download_report))
}

async fn create_mapping(
    State(state): State<AppState>,
    Json(payload): Json<MapSyllabusRequest>,
) -> Result<(StatusCode, Json<MappingRecord>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validation::validate_class_level(&payload.class_level)?;
    validation::validate_board(&payload.board)?;
    validation::validate_subject(&payload.subject)?;
    validation::validate_target_exam(&payload.target_exam)?;

    let params = MappingParams {
        class_level: payload.class_level.clone(),
        board: payload.board.to_ascii_lowercase(),
        subject: payload.subject.to_ascii_lowercase(),
        exam_type: payload.target_exam.to_ascii_lowercase(),
    };

    let prompt = mapping_prompt(&params);
    let insights = match state.generation().generate_structured(&prompt, &mapping_schema()).await
    {
        Ok(value) => serde_json::from_value::<MappingInsights>(value).map_err(anyhow::Error::from),
        Err(err) => Err(err),
    };

    let (insights, status, failure_reason) = match insights {
        Ok(insights) => (insights, ItemStatus::Completed, None),
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "Syllabus mapping failed; substituting fallback");
            (fallback_insights(&params), ItemStatus::Failed, Some(format!("{err:#}")))
        }
    };

    let record = MappingRecord {
        id: Uuid::new_v4().to_string(),
        batch_id: Uuid::new_v4().to_string(),
        source: SourceInput::Slot { index: 0 },
        params: params.clone(),
        status,
        result: SyllabusMapping {
            school_curriculum: school_curriculum_label(&params),
            target_exam: catalog::exam_display_name(&params.exam_type),
            insights,
        },
        failure_reason,
        created_at: rfc3339_now(),
    };

    state.store().mappings().append(record.clone());
    UsageCounters::bump(&state.store().counters().syllabus_mappings, 1);
    state.store().push_activity(
        format!("{} Syllabus Mapping", params.board.to_uppercase()),
        format!(
            "{} Class {} mapped to {}",
            catalog::capitalize(&params.subject),
            params.class_level,
            catalog::exam_display_name(&params.exam_type)
        ),
    );

    Ok((StatusCode::CREATED, Json(record)))
}

async fn list_mappings(State(state): State<AppState>) -> Json<CollectionResponse<MappingRecord>> {
    Json(CollectionResponse::new(state.store().mappings().records()))
}

async fn download_report(
    Path(mapping_id): Path<String>,
    State(state): State<AppState>,
) -> Result<FileDownload, ApiError> {
    let record = state
        .store()
        .mappings()
        .records()
        .into_iter()
        .find(|record| record.id == mapping_id)
        .ok_or_else(|| ApiError::NotFound(format!("Mapping '{mapping_id}' not found")))?;

    Ok(reports::mapping_report(&record, &date_today()))
}

fn school_curriculum_label(params: &MappingParams) -> String {
    format!(
        "Class {} {} {}",
        params.class_level,
        params.board.to_uppercase(),
        catalog::capitalize(&params.subject)
    )
}

fn mapping_prompt(params: &MappingParams) -> String {
    format!(
        "Map the school curriculum '{curriculum}' onto the {exam} syllabus. Report the \
overall overlap percentage, the overlapping topics (school topic, matching exam topic, \
overlap percentage, status 'complete' or 'partial'), the knowledge gaps (topic, importance \
High/Medium/Low, exam weightage as a percentage string), and 3-5 study recommendations.",
        curriculum = school_curriculum_label(params),
        exam = catalog::exam_display_name(&params.exam_type),
    )
}

fn mapping_schema() -> Value {
    json!({
        "title": "syllabus_mapping",
        "type": "object",
        "required": ["overlap_percentage", "overlapping_topics", "gaps"],
        "properties": {
            "overlap_percentage": {"type": "integer", "minimum": 0, "maximum": 100},
            "overlapping_topics": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["school_topic", "exam_topic", "overlap", "status"],
                    "properties": {
                        "school_topic": {"type": "string"},
                        "exam_topic": {"type": "string"},
                        "overlap": {"type": "integer"},
                        "status": {"type": "string", "enum": ["complete", "partial"]}
                    }
                }
            },
            "gaps": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["topic", "importance", "exam_weightage"],
                    "properties": {
                        "topic": {"type": "string"},
                        "importance": {"type": "string"},
                        "exam_weightage": {"type": "string"}
                    }
                }
            },
            "recommendations": {"type": "array", "items": {"type": "string"}}
        }
    })
}

/// Deterministic placeholder shown when the mapping call fails: a single
/// full-curriculum row marked partial, no claimed gaps.
fn fallback_insights(params: &MappingParams) -> MappingInsights {
    MappingInsights {
        overlap_percentage: 50,
        overlapping_topics: vec![TopicOverlap {
            school_topic: format!("{} (full curriculum)", catalog::capitalize(&params.subject)),
            exam_topic: format!(
                "{} {}",
                catalog::exam_display_name(&params.exam_type),
                catalog::capitalize(&params.subject)
            ),
            overlap: 50,
            status: OverlapStatus::Partial,
        }],
        gaps: vec![SyllabusGap {
            topic: "Automatic mapping unavailable".to_string(),
            importance: "Unknown".to_string(),
            exam_weightage: "n/a".to_string(),
        }],
        recommendations: vec![
            "The syllabus mapping service was unavailable; retry to get a detailed breakdown"
                .to_string(),
        ],
    }
}

#[cfg(test)]
mod tests;

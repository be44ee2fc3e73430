//! Explanation engine panel: one question in, three explanation styles out
//! (kid-friendly, conceptual, advanced), each generated independently and
//! each degrading to a deterministic placeholder on failure.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use futures::future::join_all;
use uuid::Uuid;
use validator::Validate;

use crate::api::errors::ApiError;
use crate::api::validation;
use crate::core::state::AppState;
use crate::core::time::rfc3339_now;
use crate::schemas::explanations::ExplainRequest;
use crate::schemas::CollectionResponse;
use crate::services::ai_engine::GenerationBackend;
use crate::store::catalog;
use crate::store::types::{
    ExplanationParams, ExplanationRecord, ExplanationSet, ItemStatus, SourceInput,
};
use crate::store::UsageCounters;

const STYLES: [&str; 3] = ["kid-friendly", "conceptual", "advanced"];
const EXPLANATION_MAX_TOKENS: u32 = 1200;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(generate).get(list))
}

async fn generate(
    State(state): State<AppState>,
    Json(payload): Json<ExplainRequest>,
) -> Result<(StatusCode, Json<ExplanationRecord>), ApiError> {
    payload.validate().map_err(|e| ApiError::BadRequest(e.to_string()))?;
    validation::validate_class_level(&payload.class_level)?;
    validation::validate_target_exam(&payload.target_exam)?;

    let params = ExplanationParams {
        class_level: payload.class_level.clone(),
        exam_type: payload.target_exam.to_ascii_lowercase(),
    };

    let style_futures = STYLES.iter().copied().map(|style| {
        let state = state.clone();
        let question = payload.question.clone();
        let params = params.clone();
        async move {
            let prompt = style_prompt(style, &question, &params);
            state.generation().generate_text(&prompt, EXPLANATION_MAX_TOKENS).await
        }
    });

    let results = join_all(style_futures).await;

    let mut texts = Vec::with_capacity(STYLES.len());
    let mut failed_styles = Vec::new();
    for (style, result) in STYLES.iter().copied().zip(results) {
        match result {
            Ok(text) => texts.push(text),
            Err(err) => {
                tracing::warn!(style, error = %format!("{err:#}"), "Explanation style failed; substituting fallback");
                texts.push(fallback_explanation(style));
                failed_styles.push(style);
            }
        }
    }

    let status =
        if failed_styles.is_empty() { ItemStatus::Completed } else { ItemStatus::Failed };
    let failure_reason = if failed_styles.is_empty() {
        None
    } else {
        Some(format!("Fallback used for styles: {}", failed_styles.join(", ")))
    };

    let record = ExplanationRecord {
        id: Uuid::new_v4().to_string(),
        batch_id: Uuid::new_v4().to_string(),
        source: SourceInput::Slot { index: 0 },
        params,
        status,
        result: ExplanationSet {
            question: payload.question.clone(),
            kid_friendly: texts[0].clone(),
            conceptual: texts[1].clone(),
            advanced: texts[2].clone(),
        },
        failure_reason,
        created_at: rfc3339_now(),
    };

    state.store().explanations().append(record.clone());
    UsageCounters::bump(
        &state.store().counters().explanations_created,
        STYLES.len() as u64,
    );
    state.store().push_activity(
        format!("{} Explanations", catalog::exam_display_name(&record.params.exam_type)),
        "Kid-friendly, conceptual and advanced explanations generated".to_string(),
    );

    Ok((StatusCode::CREATED, Json(record)))
}

async fn list(State(state): State<AppState>) -> Json<CollectionResponse<ExplanationRecord>> {
    Json(CollectionResponse::new(state.store().explanations().records()))
}

fn style_prompt(style: &str, question: &str, params: &ExplanationParams) -> String {
    let audience = match style {
        "kid-friendly" => {
            "an 8-12 year old, using a playful analogy and simple language".to_string()
        }
        "conceptual" => format!(
            "a Class {} student, connecting school concepts to competitive exam expectations",
            params.class_level
        ),
        _ => format!(
            "an advanced candidate for {}, focusing on exam strategy and time-saving techniques",
            catalog::exam_display_name(&params.exam_type)
        ),
    };

    format!("Explain the following question for {audience}.\n\nQuestion: {question}")
}

fn fallback_explanation(style: &str) -> String {
    format!(
        "An automatic {style} explanation could not be generated for this question. \
Revisit the underlying concept, work through the problem step by step, and try again."
    )
}

#[cfg(test)]
mod tests;

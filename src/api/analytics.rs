//! Analytics panel: usage figures assembled from the seeded baselines and
//! the live counters.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::core::state::AppState;
use crate::schemas::analytics::{AnalyticsOverviewResponse, OverallStats};
use crate::store::{seed, UsageCounters};

const RANGES: &[&str] = &["24h", "7d", "30d", "90d"];

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/overview", get(overview))
}

#[derive(Debug, Deserialize)]
struct OverviewQuery {
    range: Option<String>,
}

async fn overview(
    Query(query): Query<OverviewQuery>,
    State(state): State<AppState>,
) -> Result<Json<AnalyticsOverviewResponse>, ApiError> {
    let range = query.range.unwrap_or_else(|| "7d".to_string());
    if !RANGES.contains(&range.as_str()) {
        return Err(ApiError::BadRequest(format!("Unknown range '{range}'")));
    }

    Ok(Json(AnalyticsOverviewResponse {
        range,
        overall: overall_stats(&state),
        subject_performance: seed::subject_performance(),
        exam_type_distribution: seed::exam_type_distribution(),
        difficulty_analysis: seed::difficulty_analysis(),
        top_topics: seed::top_topics(),
        recent_activity: state.store().recent_activity(10),
    }))
}

pub(crate) fn overall_stats(state: &AppState) -> OverallStats {
    let counters = state.store().counters();
    OverallStats {
        papers_analyzed: UsageCounters::get(&counters.papers_analyzed),
        questions_generated: UsageCounters::get(&counters.questions_generated),
        explanations_created: UsageCounters::get(&counters.explanations_created),
        syllabus_mappings: UsageCounters::get(&counters.syllabus_mappings),
        exports_completed: UsageCounters::get(&counters.exports_completed),
        average_processing_time: seed::AVERAGE_PROCESSING_TIME.to_string(),
    }
}

#[cfg(test)]
mod tests;

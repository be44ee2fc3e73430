//! Dashboard overview panel: headline stats plus the recent-activity feed.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::analytics;
use crate::core::state::AppState;
use crate::schemas::analytics::DashboardOverviewResponse;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/overview", get(overview))
}

async fn overview(State(state): State<AppState>) -> Json<DashboardOverviewResponse> {
    Json(DashboardOverviewResponse {
        stats: analytics::overall_stats(&state),
        recent_activity: state.store().recent_activity(8),
    })
}

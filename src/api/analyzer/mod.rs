mod handlers;

use axum::{routing::get, routing::post, Router};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/batches", post(handlers::submit_batch))
        .route("/batches/upload", post(handlers::submit_batch_multipart))
        .route("/batches/:batch_id", get(handlers::batch_status))
        .route("/analyses", get(handlers::list_analyses))
        .route("/analyses/:analysis_id/report", get(handlers::download_report))
}

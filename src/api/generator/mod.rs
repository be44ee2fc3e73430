mod handlers;

use axum::{routing::get, routing::post, Router};

use crate::core::state::AppState;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/batches", post(handlers::submit_batch))
        .route("/batches/:batch_id", get(handlers::batch_status))
        .route("/batches/:batch_id/download", get(handlers::download_batch))
        .route("/questions", get(handlers::list_questions))
}

#[cfg(test)]
mod tests;

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::store::seed;
use crate::test_support;

#[tokio::test]
async fn overview_reports_seeded_baselines() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/analytics/overview", None))
        .await
        .expect("overview");
    assert_eq!(response.status(), StatusCode::OK);
    let overview = test_support::read_json(response).await;

    assert_eq!(overview["range"], "7d");
    assert_eq!(overview["overall"]["questions_generated"], seed::BASELINE_QUESTIONS_GENERATED);
    assert_eq!(overview["overall"]["papers_analyzed"], seed::BASELINE_PAPERS_ANALYZED);
    assert_eq!(overview["subject_performance"].as_array().unwrap().len(), 4);
    assert_eq!(overview["exam_type_distribution"].as_array().unwrap().len(), 5);
    assert_eq!(overview["top_topics"].as_array().unwrap().len(), 5);
    assert!(!overview["recent_activity"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_range_is_rejected() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/analytics/overview?range=1y",
            None,
        ))
        .await
        .expect("overview");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn counters_track_completed_generation_batches() {
    let ctx = test_support::setup_test_context().await;

    let payload = json!({
        "class_level": "11",
        "subject": "mathematics",
        "target_exam": "jee-main",
        "quantity": 2
    });
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/generator/batches", Some(payload)))
        .await
        .expect("submit batch");
    let accepted = test_support::read_json(response).await;
    let batch_id = accepted["batch_id"].as_str().expect("batch id").to_string();
    test_support::wait_for_batch(&ctx, &format!("/api/v1/generator/batches/{batch_id}")).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/analytics/overview?range=24h",
            None,
        ))
        .await
        .expect("overview");
    let overview = test_support::read_json(response).await;
    assert_eq!(
        overview["overall"]["questions_generated"],
        seed::BASELINE_QUESTIONS_GENERATED + 2
    );
}

#[tokio::test]
async fn dashboard_overview_shares_the_same_stats_and_activity() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/dashboard/overview", None))
        .await
        .expect("dashboard overview");
    assert_eq!(response.status(), StatusCode::OK);
    let overview = test_support::read_json(response).await;

    assert_eq!(overview["stats"]["papers_analyzed"], seed::BASELINE_PAPERS_ANALYZED);
    assert_eq!(overview["stats"]["average_processing_time"], seed::AVERAGE_PROCESSING_TIME);
    let activity = overview["recent_activity"].as_array().expect("activity");
    assert!(!activity.is_empty() && activity.len() <= 8);
}

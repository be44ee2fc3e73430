use axum::http::{header, Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

fn mapping_payload() -> serde_json::Value {
    json!({
        "class_level": "11",
        "board": "cbse",
        "subject": "mathematics",
        "target_exam": "jee-main"
    })
}

#[tokio::test]
async fn mapping_is_created_from_the_structured_response() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/mapper/mappings", Some(mapping_payload())))
        .await
        .expect("create mapping");
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = test_support::read_json(response).await;

    assert_eq!(record["status"], "completed");
    assert_eq!(record["result"]["school_curriculum"], "Class 11 CBSE Mathematics");
    assert_eq!(record["result"]["target_exam"], "JEE Main");
    assert_eq!(record["result"]["overlap_percentage"], 78);
    assert_eq!(record["result"]["gaps"][0]["topic"], "Complex Numbers");
}

#[tokio::test]
async fn backend_failure_degrades_to_the_fallback_mapping() {
    let ctx = test_support::setup_test_context().await;
    ctx.generation.fail_when_prompt_contains("Map the school curriculum");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/mapper/mappings", Some(mapping_payload())))
        .await
        .expect("create mapping");
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = test_support::read_json(response).await;

    assert_eq!(record["status"], "failed");
    assert_eq!(record["result"]["overlap_percentage"], 50);
    assert_eq!(record["result"]["gaps"][0]["topic"], "Automatic mapping unavailable");
    assert!(record["failure_reason"].is_string());
}

#[tokio::test]
async fn missing_board_is_rejected_before_any_call() {
    let ctx = test_support::setup_test_context().await;

    let mut payload = mapping_payload();
    payload["board"] = json!("");
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/mapper/mappings", Some(payload)))
        .await
        .expect("create mapping");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.generation.call_count(), 0);
}

#[tokio::test]
async fn mapping_report_downloads_as_text() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/mapper/mappings", Some(mapping_payload())))
        .await
        .expect("create mapping");
    let record = test_support::read_json(response).await;
    let mapping_id = record["id"].as_str().expect("mapping id").to_string();

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/mapper/mappings/{mapping_id}/report"),
            None,
        ))
        .await
        .expect("download report");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok()),
        Some("text/plain")
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let text = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(text.contains("Syllabus Mapping Report"));
    assert!(text.contains("OVERLAPPING TOPICS"));
    assert!(text.contains("KNOWLEDGE GAPS"));
}

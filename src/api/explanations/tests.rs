use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

fn explain_payload() -> serde_json::Value {
    json!({
        "question": "What is the derivative of f(x) = x³ + 2x² - 5x + 3?",
        "class_level": "11",
        "target_exam": "jee-main"
    })
}

#[tokio::test]
async fn generates_three_styles_and_appends_one_record() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/explanations", Some(explain_payload())))
        .await
        .expect("generate explanations");
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = test_support::read_json(response).await;

    assert_eq!(record["status"], "completed");
    for style in ["kid_friendly", "conceptual", "advanced"] {
        assert!(!record["result"][style].as_str().unwrap().is_empty());
    }
    assert_eq!(ctx.generation.call_count(), 3);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/explanations", None))
        .await
        .expect("list explanations");
    let list = test_support::read_json(response).await;
    assert_eq!(list["total_count"], 1);
}

#[tokio::test]
async fn failed_style_gets_a_fallback_while_the_others_survive() {
    let ctx = test_support::setup_test_context().await;
    ctx.generation.fail_when_prompt_contains("8-12 year old");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/explanations", Some(explain_payload())))
        .await
        .expect("generate explanations");
    assert_eq!(response.status(), StatusCode::CREATED);
    let record = test_support::read_json(response).await;

    assert_eq!(record["status"], "failed");
    assert!(record["failure_reason"].as_str().unwrap().contains("kid-friendly"));
    assert!(record["result"]["kid_friendly"]
        .as_str()
        .unwrap()
        .contains("could not be generated"));
    assert!(record["result"]["conceptual"].as_str().unwrap().starts_with("Scripted"));
    assert!(record["result"]["advanced"].as_str().unwrap().starts_with("Scripted"));
}

#[tokio::test]
async fn empty_question_is_rejected_before_any_call() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/explanations",
            Some(json!({"question": ""})),
        ))
        .await
        .expect("generate explanations");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.generation.call_count(), 0);
}

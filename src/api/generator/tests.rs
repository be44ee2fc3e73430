use axum::http::{header, Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

fn generate_payload(quantity: u32) -> serde_json::Value {
    json!({
        "class_level": "11",
        "board": "cbse",
        "subject": "mathematics",
        "target_exam": "jee-main",
        "question_type": "mcq",
        "topic": "Calculus",
        "quantity": quantity,
        "difficulty_percent": 50,
        "time_limit_minutes": 30
    })
}

async fn submit_and_wait(ctx: &test_support::TestContext, quantity: u32) -> String {
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/generator/batches",
            Some(generate_payload(quantity)),
        ))
        .await
        .expect("submit batch");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let accepted = test_support::read_json(response).await;
    let batch_id = accepted["batch_id"].as_str().expect("batch id").to_string();

    let snapshot =
        test_support::wait_for_batch(ctx, &format!("/api/v1/generator/batches/{batch_id}")).await;
    assert_eq!(snapshot["state"], "completed");
    assert_eq!(snapshot["percent"], 100);

    batch_id
}

#[tokio::test]
async fn batch_of_n_yields_exactly_n_records_in_slot_order() {
    let ctx = test_support::setup_test_context().await;

    let batch_id = submit_and_wait(&ctx, 5).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/generator/questions", None))
        .await
        .expect("list questions");
    let list = test_support::read_json(response).await;
    assert_eq!(list["total_count"], 5);

    let items = list["items"].as_array().expect("items");
    for (index, item) in items.iter().enumerate() {
        assert_eq!(item["batch_id"], batch_id.as_str());
        assert_eq!(item["source"]["index"], index as u64);
        assert_eq!(item["status"], "completed");
        assert_eq!(item["result"]["options"].as_array().unwrap().len(), 4);
    }
}

#[tokio::test]
async fn induced_failures_still_yield_n_records_with_fallback_payloads() {
    let ctx = test_support::setup_test_context().await;
    ctx.generation.fail_call(1);
    ctx.generation.fail_call(3);

    submit_and_wait(&ctx, 5).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/generator/questions", None))
        .await
        .expect("list questions");
    let list = test_support::read_json(response).await;
    assert_eq!(list["total_count"], 5);

    let items = list["items"].as_array().expect("items");
    let failed: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item["status"] == "failed")
        .map(|(index, _)| index)
        .collect();
    assert_eq!(failed, vec![1, 3]);

    for index in failed {
        let result = &items[index]["result"];
        assert!(result["question"].as_str().unwrap().contains("Practice question"));
        assert_eq!(result["options"].as_array().unwrap().len(), 4);
        assert_eq!(result["topic"], "Calculus");
        assert!(items[index]["failure_reason"].is_string());
    }
}

#[tokio::test]
async fn missing_required_field_issues_no_calls() {
    let ctx = test_support::setup_test_context().await;

    let mut payload = generate_payload(5);
    payload["class_level"] = json!("");
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/generator/batches", Some(payload)))
        .await
        .expect("submit batch");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.generation.call_count(), 0);

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/generator/questions", None))
        .await
        .expect("list questions");
    let list = test_support::read_json(response).await;
    assert_eq!(list["total_count"], 0);
}

#[tokio::test]
async fn unknown_target_exam_is_rejected() {
    let ctx = test_support::setup_test_context().await;

    let mut payload = generate_payload(5);
    payload["target_exam"] = json!("gre");
    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::POST, "/api/v1/generator/batches", Some(payload)))
        .await
        .expect("submit batch");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.generation.call_count(), 0);
}

#[tokio::test]
async fn quantity_above_the_cap_is_rejected() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/generator/batches",
            Some(generate_payload(101)),
        ))
        .await
        .expect("submit batch");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.generation.call_count(), 0);
}

#[tokio::test]
async fn question_paper_downloads_with_marked_answers() {
    let ctx = test_support::setup_test_context().await;

    let batch_id = submit_and_wait(&ctx, 2).await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            &format!("/api/v1/generator/batches/{batch_id}/download"),
            None,
        ))
        .await
        .expect("download batch");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok()),
        Some("text/plain")
    );

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let text = String::from_utf8(body.to_vec()).expect("utf8");
    assert!(text.contains("Question 1:"));
    assert!(text.contains("Question 2:"));
    assert!(text.contains("Correct Answer: A."));
    assert!(text.contains("Target Exam: JEE Main"));
}

#[tokio::test]
async fn download_for_unknown_batch_returns_404() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::GET,
            "/api/v1/generator/batches/nope/download",
            None,
        ))
        .await
        .expect("download batch");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use crate::test_support;

#[tokio::test]
async fn datasets_start_seeded_and_accept_new_entries() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/admin/datasets", None))
        .await
        .expect("list datasets");
    assert_eq!(response.status(), StatusCode::OK);
    let list = test_support::read_json(response).await;
    assert_eq!(list["total_count"], 4);
    assert_eq!(list["items"][0]["name"], "JEE Main 2024");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/admin/datasets",
            Some(json!({"name": "CBSE Boards 2025", "papers": 6, "questions": 420})),
        ))
        .await
        .expect("create dataset");
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = test_support::read_json(response).await;
    assert_eq!(created["status"], "active");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/admin/datasets", None))
        .await
        .expect("list datasets");
    let list = test_support::read_json(response).await;
    assert_eq!(list["total_count"], 5);
    assert_eq!(list["items"][0]["name"], "CBSE Boards 2025");
}

#[tokio::test]
async fn invalid_dataset_is_rejected() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(
            Method::POST,
            "/api/v1/admin/datasets",
            Some(json!({"name": "Empty", "papers": 0, "questions": 10})),
        ))
        .await
        .expect("create dataset");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_and_models_are_listed_from_the_registry() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/admin/users", None))
        .await
        .expect("list users");
    let users = test_support::read_json(response).await;
    assert_eq!(users["total_count"], 4);
    assert_eq!(users["items"][0]["role"], "admin");

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/admin/models", None))
        .await
        .expect("list models");
    let models = test_support::read_json(response).await;
    assert_eq!(models["total_count"], 4);
    assert!(models["items"]
        .as_array()
        .unwrap()
        .iter()
        .any(|model| model["name"] == "Paper Analyzer"));
}

#[tokio::test]
async fn system_status_reports_every_component() {
    let ctx = test_support::setup_test_context().await;

    let response = ctx
        .app
        .clone()
        .oneshot(test_support::json_request(Method::GET, "/api/v1/admin/status", None))
        .await
        .expect("system status");
    assert_eq!(response.status(), StatusCode::OK);
    let status = test_support::read_json(response).await;

    for component in ["ai_engine", "text_extractor", "store", "api"] {
        assert_eq!(status["components"][component], "active");
    }
}

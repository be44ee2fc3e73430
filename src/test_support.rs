use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    Router,
};
use base64::Engine as _;
use serde_json::{json, Value};
use tokio::sync::{watch, Mutex as AsyncMutex, OwnedMutexGuard};
use tower::ServiceExt;

use crate::api;
use crate::core::{config::Settings, state::AppState};
use crate::services::ai_engine::GenerationBackend;
use crate::services::text_extract::TextExtractor;
use crate::store::Store;

pub(crate) struct TestContext {
    pub(crate) state: AppState,
    pub(crate) app: Router,
    pub(crate) generation: Arc<ScriptedGeneration>,
    pub(crate) extractor: Arc<ScriptedExtractor>,
    _guard: OwnedMutexGuard<()>,
}

pub(crate) async fn env_lock() -> OwnedMutexGuard<()> {
    static LOCK: OnceLock<Arc<AsyncMutex<()>>> = OnceLock::new();
    let lock = LOCK.get_or_init(|| Arc::new(AsyncMutex::new(()))).clone();
    lock.lock_owned().await
}

pub(crate) fn set_test_env() {
    std::env::set_var("EXAMPREP_ENV", "test");
    std::env::set_var("EXAMPREP_STRICT_CONFIG", "0");
    std::env::set_var("PROMETHEUS_ENABLED", "0");
    std::env::remove_var("OPENAI_API_KEY");
    std::env::remove_var("EXTRACT_API_KEY");
    std::env::remove_var("BACKEND_CORS_ORIGINS");
    std::env::remove_var("ALLOWED_PAPER_EXTENSIONS");
    std::env::remove_var("MAX_FILES_PER_BATCH");
    std::env::remove_var("MAX_QUESTIONS_PER_BATCH");
    std::env::remove_var("MAX_UPLOAD_SIZE_MB");
}

pub(crate) async fn setup_test_context() -> TestContext {
    let guard = env_lock().await;
    set_test_env();

    let settings = Settings::load().expect("settings");
    let generation = Arc::new(ScriptedGeneration::new());
    let extractor = Arc::new(ScriptedExtractor::new());

    let state = AppState::new(settings, Store::new(), generation.clone(), extractor.clone());
    let app = api::router::router(state.clone());

    TestContext { state, app, generation, extractor, _guard: guard }
}

/// Scripted stand-in for the generation backend: deterministic canned
/// payloads keyed by the schema's `title`, with injectable per-call and
/// per-prompt failures and an optional gate that holds calls open.
pub(crate) struct ScriptedGeneration {
    calls: AtomicUsize,
    fail_markers: Mutex<Vec<String>>,
    fail_calls: Mutex<Vec<usize>>,
    structured_override: Mutex<Option<Value>>,
    gate: Mutex<Option<watch::Receiver<bool>>>,
}

impl ScriptedGeneration {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_markers: Mutex::new(Vec::new()),
            fail_calls: Mutex::new(Vec::new()),
            structured_override: Mutex::new(None),
            gate: Mutex::new(None),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every call whose prompt contains `marker` fails.
    pub(crate) fn fail_when_prompt_contains(&self, marker: &str) {
        self.fail_markers.lock().expect("lock").push(marker.to_string());
    }

    /// The `index`-th call (zero-based, across both capabilities) fails.
    pub(crate) fn fail_call(&self, index: usize) {
        self.fail_calls.lock().expect("lock").push(index);
    }

    /// Replaces the canned structured payload, e.g. with a value that only
    /// partially conforms to the requested schema.
    pub(crate) fn set_structured_override(&self, value: Value) {
        *self.structured_override.lock().expect("lock") = Some(value);
    }

    /// Holds every subsequent call open until `true` is sent.
    pub(crate) fn install_gate(&self) -> watch::Sender<bool> {
        let (tx, rx) = watch::channel(false);
        *self.gate.lock().expect("lock") = Some(rx);
        tx
    }

    async fn admit(&self, prompt: &str) -> Result<()> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);

        let receiver = self.gate.lock().expect("lock").clone();
        if let Some(mut rx) = receiver {
            loop {
                if *rx.borrow() {
                    break;
                }
                if rx.changed().await.is_err() {
                    break;
                }
            }
        }

        if self.fail_calls.lock().expect("lock").contains(&index) {
            anyhow::bail!("scripted failure for call {index}");
        }

        let markers = self.fail_markers.lock().expect("lock").clone();
        if let Some(marker) = markers.iter().find(|marker| prompt.contains(marker.as_str())) {
            anyhow::bail!("scripted failure for prompt marker '{marker}'");
        }

        Ok(())
    }
}

#[async_trait]
impl GenerationBackend for ScriptedGeneration {
    async fn generate_text(&self, prompt: &str, _max_tokens: u32) -> Result<String> {
        self.admit(prompt).await?;
        let preview: String = prompt.chars().take(48).collect();
        Ok(format!("Scripted explanation for: {preview}"))
    }

    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<Value> {
        self.admit(prompt).await?;

        if let Some(value) = self.structured_override.lock().expect("lock").clone() {
            return Ok(value);
        }

        match schema.get("title").and_then(Value::as_str) {
            Some("paper_analysis") => Ok(json!({
                "paper_name": "JEE Main 2024 - Physics",
                "total_questions": 90,
                "topics": [
                    {"name": "Mechanics", "count": 22, "percentage": 24},
                    {"name": "Electromagnetism", "count": 20, "percentage": 22},
                    {"name": "Thermodynamics", "count": 48, "percentage": 54}
                ],
                "difficulty": {"easy": 30, "medium": 45, "hard": 25},
                "marking_scheme": "+4 for correct, -1 for incorrect",
                "insights": ["Question patterns extracted", "Topic weightage analysis completed"]
            })),
            Some("generated_question") => Ok(json!({
                "question": "What is the derivative of f(x) = x³ + 2x² - 5x + 3?",
                "options": ["3x² + 4x - 5", "3x² + 4x + 5", "x³ + 4x - 5", "3x + 4x² - 5"],
                "correct": 0,
                "topic": "Calculus",
                "difficulty": "medium"
            })),
            Some("syllabus_mapping") => Ok(json!({
                "overlap_percentage": 78,
                "overlapping_topics": [
                    {
                        "school_topic": "Quadratic Equations",
                        "exam_topic": "Quadratic Equations & Inequalities",
                        "overlap": 95,
                        "status": "complete"
                    }
                ],
                "gaps": [
                    {"topic": "Complex Numbers", "importance": "High", "exam_weightage": "8%"}
                ],
                "recommendations": ["Focus on Complex Numbers"]
            })),
            other => anyhow::bail!("scripted backend has no payload for schema {other:?}"),
        }
    }

    fn is_configured(&self) -> bool {
        true
    }
}

/// Scripted stand-in for the text extractor.
pub(crate) struct ScriptedExtractor {
    calls: AtomicUsize,
    fail_filenames: Mutex<Vec<String>>,
}

impl ScriptedExtractor {
    fn new() -> Self {
        Self { calls: AtomicUsize::new(0), fail_filenames: Mutex::new(Vec::new()) }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_for_filename(&self, filename: &str) {
        self.fail_filenames.lock().expect("lock").push(filename.to_string());
    }
}

#[async_trait]
impl TextExtractor for ScriptedExtractor {
    async fn extract_text(&self, filename: &str, _bytes: &[u8]) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let failures = self.fail_filenames.lock().expect("lock").clone();
        if failures.iter().any(|entry| entry == filename) {
            anyhow::bail!("scripted extraction failure for '{filename}'");
        }
        Ok(format!("Extracted text of {filename}"))
    }

    fn is_configured(&self) -> bool {
        true
    }
}

pub(crate) fn b64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

pub(crate) fn json_request(method: Method, uri: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder().method(method).uri(uri);

    if let Some(body) = body {
        let bytes = serde_json::to_vec(&body).expect("serialize body");
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .expect("request body")
    } else {
        builder.body(Body::empty()).expect("request body")
    }
}

pub(crate) async fn read_json(response: axum::response::Response<Body>) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.expect("response body");
    serde_json::from_slice(&body).unwrap_or_else(|err| {
        let body_text = String::from_utf8_lossy(&body);
        panic!("json parse: {err}; body: {body_text}");
    })
}

/// Polls a batch-status endpoint until the batch leaves the running state.
pub(crate) async fn wait_for_batch(ctx: &TestContext, uri: &str) -> Value {
    for _ in 0..500 {
        let response = ctx
            .app
            .clone()
            .oneshot(json_request(Method::GET, uri, None))
            .await
            .expect("batch status");
        let snapshot = read_json(response).await;
        if snapshot["state"] != "running" {
            return snapshot;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("batch at {uri} did not settle in time");
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

use crate::core::config::Settings;

/// The generation capabilities the panels depend on. Every call is
/// fallible and latency-bearing; callers convert failures into fallback
/// records instead of propagating them.
#[async_trait]
pub(crate) trait GenerationBackend: Send + Sync {
    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> Result<String>;

    /// Asks for a JSON value conforming to `schema`. The returned value may
    /// still only partially conform; callers must treat a shape mismatch as
    /// a per-item failure.
    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<Value>;

    fn is_configured(&self) -> bool;
}

const STRUCTURED_SYSTEM_PROMPT: &str = "You are the generation engine of an exam-preparation \
platform. Respond with a single JSON object that conforms to the JSON schema supplied in the \
user message. Use lowercase values wherever the schema lists an enumeration. Do not wrap the \
object in markdown fences or add commentary.";

const TEXT_SYSTEM_PROMPT: &str = "You are the generation engine of an exam-preparation \
platform. Answer with plain text only, ready to show to a student.";

#[derive(Debug, Clone)]
pub(crate) struct AiEngineService {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl AiEngineService {
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.ai().ai_request_timeout);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(30))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: settings.ai().openai_api_key.clone(),
            base_url: settings.ai().openai_base_url.trim_end_matches('/').to_string(),
            model: settings.ai().ai_model.clone(),
            max_tokens: settings.ai().ai_max_tokens,
            temperature: settings.ai().ai_temperature,
        })
    }

    /// One chat-completion round trip. Deliberately a single attempt: a
    /// failed work item is fallback-filled by the caller, never retried.
    async fn chat_completion(&self, payload: Value) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Failed to call generation API")?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);
        if !status.is_success() {
            anyhow::bail!("Generation API error (status {status}): {body}");
        }

        let content = body
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|value| value.as_str())
            .context("Missing generation response content")?;

        Ok(content.to_string())
    }
}

#[async_trait]
impl GenerationBackend for AiEngineService {
    async fn generate_text(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": TEXT_SYSTEM_PROMPT},
                {"role": "user", "content": prompt}
            ],
            "max_completion_tokens": max_tokens.min(self.max_tokens),
            "temperature": self.temperature,
        });

        let content = self.chat_completion(payload).await?;
        Ok(content.trim().to_string())
    }

    async fn generate_structured(&self, prompt: &str, schema: &Value) -> Result<Value> {
        let user_prompt = format!(
            "{prompt}\n\nJSON schema the response object must conform to:\n{}",
            serde_json::to_string_pretty(schema).unwrap_or_default()
        );

        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": STRUCTURED_SYSTEM_PROMPT},
                {"role": "user", "content": user_prompt}
            ],
            "max_completion_tokens": self.max_tokens,
            "temperature": self.temperature,
            "response_format": {"type": "json_object"}
        });

        let content = self.chat_completion(payload).await?;
        serde_json::from_str(&content).context("Failed to parse generation JSON")
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

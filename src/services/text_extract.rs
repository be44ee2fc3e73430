use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

use crate::core::config::Settings;

/// Extracts the textual content of an uploaded paper. May fail on network
/// or format errors; the batch workflow turns such failures into fallback
/// records.
#[async_trait]
pub(crate) trait TextExtractor: Send + Sync {
    async fn extract_text(&self, filename: &str, bytes: &[u8]) -> Result<String>;

    fn is_configured(&self) -> bool;
}

/// Client for a marker-style OCR API: one multipart submission returning a
/// check URL, then polling until the conversion completes.
#[derive(Debug, Clone)]
pub(crate) struct MarkerExtractService {
    client: Client,
    api_key: String,
    base_url: String,
    output_format: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl MarkerExtractService {
    pub(crate) fn from_settings(settings: &Settings) -> Result<Self> {
        let timeout = Duration::from_secs(settings.extract().timeout_seconds);
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(20))
            .timeout(timeout)
            .build()
            .context("Failed to build extraction HTTP client")?;

        Ok(Self {
            client,
            api_key: settings.extract().api_key.clone(),
            base_url: settings.extract().base_url.trim_end_matches('/').to_string(),
            output_format: settings.extract().output_format.clone(),
            poll_interval: Duration::from_secs(settings.extract().poll_interval_seconds),
            max_poll_attempts: settings.extract().max_poll_attempts,
        })
    }

    async fn submit(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let endpoint = format!("{}/marker", self.base_url);
        let part = Part::bytes(bytes.to_vec()).file_name(filename.to_string());
        let form = Form::new()
            .part("file", part)
            .text("output_format", self.output_format.clone());

        let response = self
            .client
            .post(&endpoint)
            .header("X-Api-Key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .context("Failed to call extraction API")?;

        let status = response.status();
        let body: Value =
            response.json().await.context("Failed to read extraction submit response")?;

        if !status.is_success() {
            anyhow::bail!(
                "Extraction submit failed (status {status}): {}",
                extract_error_message(&body)
            );
        }

        if body.get("success").and_then(Value::as_bool).is_some_and(|value| !value) {
            anyhow::bail!(
                "Extraction submit returned success=false: {}",
                extract_error_message(&body)
            );
        }

        check_url(&self.base_url, &body)
            .context("Extraction submit response missing request reference")
    }

    async fn poll(&self, check_url: &str) -> Result<String> {
        for attempt in 0..self.max_poll_attempts {
            let response = self
                .client
                .get(check_url)
                .header("X-Api-Key", &self.api_key)
                .send()
                .await
                .context("Failed to call extraction result endpoint")?;

            let status_code = response.status();
            let body: Value =
                response.json().await.context("Failed to read extraction poll response")?;

            if !status_code.is_success() {
                anyhow::bail!(
                    "Extraction poll failed (status {status_code}): {}",
                    extract_error_message(&body)
                );
            }

            let job_status = body
                .get("status")
                .and_then(Value::as_str)
                .map(|value| value.to_ascii_lowercase())
                .unwrap_or_else(|| "unknown".to_string());

            if job_status == "complete" || job_status == "completed" {
                return extracted_markdown(&body)
                    .context("Extraction result carried no text content");
            }

            if job_status == "failed" || job_status == "error" {
                anyhow::bail!("Extraction job failed: {}", extract_error_message(&body));
            }

            if attempt + 1 < self.max_poll_attempts {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        anyhow::bail!("Extraction polling timed out after {} attempts", self.max_poll_attempts)
    }
}

#[async_trait]
impl TextExtractor for MarkerExtractService {
    async fn extract_text(&self, filename: &str, bytes: &[u8]) -> Result<String> {
        let check_url = self.submit(filename, bytes).await?;
        self.poll(&check_url).await
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}

fn check_url(base_url: &str, payload: &Value) -> Option<String> {
    if let Some(raw) = payload.get("request_check_url").and_then(Value::as_str) {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            return Some(raw.to_string());
        }
        let normalized_base = format!("{}/", base_url.trim_end_matches('/'));
        return reqwest::Url::parse(&normalized_base)
            .ok()
            .and_then(|base| base.join(raw).ok())
            .map(|url| url.to_string());
    }

    payload
        .get("request_id")
        .and_then(Value::as_str)
        .map(|id| format!("{base_url}/marker/{id}"))
}

fn extracted_markdown(payload: &Value) -> Option<String> {
    let container = payload.get("result").unwrap_or(payload);
    container
        .get("markdown")
        .and_then(Value::as_str)
        .or_else(|| payload.get("markdown").and_then(Value::as_str))
        .map(|value| value.to_string())
}

fn extract_error_message(payload: &Value) -> String {
    if let Some(detail) = payload.get("detail").and_then(Value::as_str) {
        return detail.to_string();
    }

    payload
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| payload.get("error").and_then(Value::as_str))
        .unwrap_or("unknown_error")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn check_url_prefers_absolute_reference() {
        let payload = json!({"request_check_url": "https://ocr.example/marker/abc"});
        assert_eq!(
            check_url("https://ocr.example/api", &payload),
            Some("https://ocr.example/marker/abc".to_string())
        );
    }

    #[test]
    fn check_url_joins_relative_reference() {
        let payload = json!({"request_check_url": "marker/abc"});
        assert_eq!(
            check_url("https://ocr.example/api", &payload),
            Some("https://ocr.example/api/marker/abc".to_string())
        );
    }

    #[test]
    fn check_url_falls_back_to_request_id() {
        let payload = json!({"request_id": "abc"});
        assert_eq!(
            check_url("https://ocr.example/api", &payload),
            Some("https://ocr.example/api/marker/abc".to_string())
        );
    }

    #[test]
    fn extracted_markdown_reads_nested_result() {
        let payload = json!({"result": {"markdown": "# Paper"}});
        assert_eq!(extracted_markdown(&payload), Some("# Paper".to_string()));
    }
}

//! Google Gemini `generateContent` backend.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::backend::GenerativeBackend;
use crate::error::{PredictionError, Result};

pub const DEFAULT_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Clone)]
pub struct GeminiBackend {
    client: reqwest::Client,
    endpoint: String,
    headers: HeaderMap,
}

impl GeminiBackend {
    /// Fails with `NotConfigured` when the key is blank.
    pub fn new(endpoint: impl Into<String>, api_key: &str, timeout: Duration) -> Result<Self> {
        let key = api_key.trim();
        if key.is_empty() {
            return Err(PredictionError::NotConfigured);
        }

        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(key)
            .map_err(|_| PredictionError::NotConfigured)?;
        key_value.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            headers,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn request_body(prompt: &str) -> GenerateRequest<'_> {
    GenerateRequest {
        contents: vec![Content {
            parts: vec![Part { text: prompt }],
        }],
    }
}

/// `candidates[0].content.parts[0].text`
pub fn extract_candidate_text(body: &Value) -> Result<String> {
    body.pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            PredictionError::MalformedResponse(
                "missing candidates[0].content.parts[0].text".to_string(),
            )
        })
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<String> {
        debug!(endpoint = %self.endpoint, prompt_len = prompt.len(), "gemini request");

        let resp = self
            .client
            .post(&self.endpoint)
            .headers(self.headers.clone())
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PredictionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: Value = resp
            .json()
            .await
            .map_err(|e| PredictionError::MalformedResponse(format!("body is not JSON: {e}")))?;
        let text = extract_candidate_text(&body)?;
        debug!(reply_len = text.len(), "gemini reply");
        Ok(text)
    }
}

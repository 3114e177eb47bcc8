//! Google Gemini text generator.
//!
//! Calls the `generateContent` endpoint of the Gemini API with a single user
//! turn and joins the text parts of the first candidate.
//!
//! # Authentication
//!
//! Uses an explicit key, else `GEMINI_API_KEY`, else `GOOGLE_API_KEY`. A
//! generator without a key reports itself unavailable and never touches the
//! network.

use std::time::Duration;

use serde_json::Value;

use crate::config::SynthConfig;
use crate::llms::generator::{GenerationError, TextGenerator};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

// ---------------------------------------------------------------------------
// GeminiGenerator
// ---------------------------------------------------------------------------

/// Blocking Gemini client with a fixed per-call timeout and no retries.
///
/// # Example
///
/// ```ignore
/// let generator = GeminiGenerator::new("gemini-2.0-flash", None)
///     .with_timeout(Duration::from_secs(30));
/// let text = generator.generate("Write a post about remote work")?;
/// ```
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    model: String,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
    temperature: Option<f64>,
}

impl GeminiGenerator {
    /// Create a generator; `api_key` falls back to the environment.
    pub fn new(model: impl Into<String>, api_key: Option<String>) -> Self {
        let api_key = api_key
            .filter(|k| !k.trim().is_empty())
            .or_else(api_key_from_env);

        Self {
            model: model.into(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
            temperature: None,
        }
    }

    pub fn from_config(config: &SynthConfig) -> Self {
        Self::new(config.model.clone(), config.api_key.clone()).with_timeout(config.timeout())
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Override the API root, e.g. for a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn generation_config(&self) -> Value {
        let mut config = serde_json::Map::new();
        if let Some(temp) = self.temperature {
            config.insert("temperature".to_string(), serde_json::json!(temp));
        }
        Value::Object(config)
    }

    /// Request body for a single-turn prompt.
    pub fn build_request_body(&self, prompt: &str) -> Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": self.generation_config(),
        })
    }

    /// Extract the joined text parts of the first candidate.
    pub fn parse_response(response: &Value) -> Result<String, GenerationError> {
        if let Some(error) = response.get("error") {
            let msg = error
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown Gemini API error");
            return Err(GenerationError::Response(format!("Gemini API error: {msg}")));
        }

        let candidate = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|c| c.first())
            .ok_or_else(|| GenerationError::Response("No candidates in Gemini response".into()))?;

        let parts = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
            .ok_or_else(|| GenerationError::Response("No content.parts in Gemini response".into()))?;

        let text: String = parts
            .iter()
            .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
            .collect();

        if text.trim().is_empty() {
            return Err(GenerationError::Response("Gemini returned no text".into()));
        }
        Ok(text)
    }

    async fn agenerate(&self, api_key: &str, prompt: &str) -> Result<String, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let response = client
            .post(self.api_endpoint())
            .header("content-type", "application/json")
            .query(&[("key", api_key)])
            .json(&self.build_request_body(prompt))
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| self.transport_error(e))?;

        if !status.is_success() {
            return Err(GenerationError::Request(format!(
                "Gemini API error ({}): {}",
                status,
                truncate(&response_text, 500)
            )));
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            GenerationError::Response(format!(
                "Failed to parse Gemini response: {} - Body: {}",
                e,
                truncate(&response_text, 500)
            ))
        })?;

        if let Some(usage) = response_json.get("usageMetadata") {
            log::debug!("Gemini usage: {}", usage);
        }

        Self::parse_response(&response_json)
    }

    fn transport_error(&self, e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout(self.timeout)
        } else {
            GenerationError::Request(e.to_string())
        }
    }
}

impl TextGenerator for GeminiGenerator {
    fn name(&self) -> &str {
        "gemini"
    }

    /// Blocks on a private current-thread runtime. Call it from a plain
    /// thread or a blocking-pool thread (`spawn_blocking`), never directly
    /// from an async task.
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            GenerationError::Unavailable(
                "Gemini API key not set. Set GEMINI_API_KEY or GOOGLE_API_KEY environment variable."
                    .into(),
            )
        })?;

        log::debug!(
            "GeminiGenerator.generate: model={}, prompt_chars={}",
            self.model,
            prompt.chars().count()
        );

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| GenerationError::Request(e.to_string()))?;
        rt.block_on(self.agenerate(api_key, prompt))
    }
}

fn api_key_from_env() -> Option<String> {
    API_KEY_VARS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}


/// Local stand-in for the Gemini API.
#[cfg(test)]
pub(crate) mod testing {
    use std::time::Duration;

    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::Value;

    /// A `generateContent` reply with a single text part.
    pub(crate) fn reply(text: &str) -> Value {
        serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] }
            }],
            "usageMetadata": { "totalTokenCount": 12 }
        })
    }

    /// Serve `body` with `status` for every model, after an optional delay.
    /// Returns the base URL to pass to `with_base_url`.
    pub(crate) async fn mock_server(
        status: StatusCode,
        body: Value,
        delay: Option<Duration>,
    ) -> String {
        let app = Router::new().route(
            "/v1beta/models/:model",
            post(move || {
                let body = body.clone();
                async move {
                    if let Some(delay) = delay {
                        tokio::time::sleep(delay).await;
                    }
                    (status, Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1beta")
    }
}

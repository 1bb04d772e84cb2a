use std::time::Duration;

use serde::{Deserialize, Serialize};

use skald_core::SkaldConfig;

// ── Protocol ──

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    format: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

/// Generation parameters forwarded verbatim to the service.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_predict: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

// ── Errors ──

/// What went wrong talking to the inference service. Callers degrade to
/// deterministic behavior on either variant; the split exists so logs can
/// tell a dead endpoint from a misbehaving model.
#[derive(Debug, thiserror::Error)]
pub enum InferError {
    #[error("inference request failed: {0}")]
    Http(#[from] ureq::Error),
    #[error("inference response malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

// ── Client ──

/// Synchronous client for `POST <endpoint>/api/generate`.
///
/// One agent with a global timeout; a hung service surfaces as an error
/// within `timeout_secs` rather than stalling the pipeline.
pub struct InferenceClient {
    endpoint: String,
    model: String,
    agent: ureq::Agent,
}

impl InferenceClient {
    pub fn new(config: &SkaldConfig) -> Self {
        Self::with_endpoint(&config.inference_endpoint, &config.model, config.timeout_secs)
    }

    pub fn with_endpoint(endpoint: &str, model: &str, timeout_secs: u64) -> Self {
        let agent = ureq::Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout_secs)))
            .build()
            .new_agent();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            agent,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Free-text generation.
    pub fn generate(&self, prompt: &str) -> Result<String, InferError> {
        self.call(prompt, None, None)
    }

    /// JSON-constrained generation with explicit sampling parameters.
    pub fn generate_json(
        &self,
        prompt: &str,
        options: GenerateOptions,
    ) -> Result<String, InferError> {
        self.call(prompt, Some("json"), Some(options))
    }

    fn call(
        &self,
        prompt: &str,
        format: Option<&str>,
        options: Option<GenerateOptions>,
    ) -> Result<String, InferError> {
        let url = format!("{}/api/generate", self.endpoint);
        let body = serde_json::to_string(&GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            format,
            options,
        })?;
        let mut res = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .send(body)?;
        let text = res.body_mut().read_to_string()?;
        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        Ok(parsed.response)
    }
}

// ── Tests ──

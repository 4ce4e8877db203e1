//! Gemini API client.

use crate::parse::parse_generated_json;
use crate::types::{GenerateRequest, GenerateResponse};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::config::{GeneratorConfig, API_KEY_ENV};
use shared::StrategyError;
use std::time::Duration;
use tracing::{debug, warn};

/// Source of generated JSON objects
///
/// One request per call: no retry, no caching. Callers serialize their own
/// requests.
#[async_trait]
pub trait Generator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Value, StrategyError>;
}

/// Gemini `generateContent` client
pub struct GeminiClient {
    /// HTTP client
    client: Client,
    /// API base URL
    base_url: String,
    /// Model name
    model: String,
    /// API key
    api_key: String,
}

impl GeminiClient {
    /// Create a new client from configuration
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let api_key = config.resolved_api_key().ok_or_else(|| {
            anyhow!(
                "No generator API key: set generator.api_key or {}",
                API_KEY_ENV
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("content-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    async fn request_text(&self, prompt: &str) -> Result<String, StrategyError> {
        let url = self.endpoint();
        debug!(url = %url, prompt_chars = prompt.len(), "Calling generator");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::json_prompt(prompt))
            .send()
            .await
            .map_err(|e| StrategyError::GenerationUnavailable(format!("request error: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = %status, error = %error_text, "Generator request failed");
            return Err(StrategyError::GenerationUnavailable(format!(
                "status {}",
                status
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            StrategyError::GenerationUnavailable(format!("unreadable envelope: {}", e))
        })?;

        body.first_text()
            .map(str::to_string)
            .ok_or_else(|| StrategyError::GenerationUnavailable("empty candidate list".to_string()))
    }
}

#[async_trait]
impl Generator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<Value, StrategyError> {
        let text = self.request_text(prompt).await?;
        let parsed = parse_generated_json(&text);
        if let Err(e) = &parsed {
            warn!(error = %e, "Generator returned unusable text");
        }
        parsed
    }
}

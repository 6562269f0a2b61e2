//! Generative-text backend seam.
//!
//! The orchestrator treats the backend as unreliable by contract: timeouts
//! and transport failures degrade to the canned-response table, and quota
//! exhaustion is a distinguished error surfaced to the user.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::error::AgentError;

/// Produces a completion for a fully assembled prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, AgentError>;
}

#[derive(Serialize)]
struct CompletionBody<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Deserialize)]
struct CompletionResponse {
    text: String,
}

/// HTTP client for the hosted completion endpoint.
pub struct HttpTextGenerator {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl HttpTextGenerator {
    /// Build a generator from settings. Returns None when no provider URL is
    /// configured — the orchestrator then runs canned-only.
    pub fn from_settings(settings: &Settings) -> Result<Option<Self>, AgentError> {
        let Some(ref base_url) = settings.provider_url else {
            return Ok(None);
        };
        let http = reqwest::Client::builder()
            .timeout(settings.provider_timeout)
            .build()?;
        Ok(Some(HttpTextGenerator {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: settings.provider_api_key.clone(),
            model: settings.provider_model.clone(),
        }))
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn complete(&self, prompt: &str) -> Result<String, AgentError> {
        let url = format!("{}/v1/complete", self.base_url);
        let body = CompletionBody {
            model: &self.model,
            prompt,
        };

        let mut request = self.http.post(&url).json(&body);
        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AgentError::Quota);
        }
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(AgentError::Provider(format!(
                "completion endpoint returned {}: {}",
                status, detail
            )));
        }

        let parsed: CompletionResponse = response.json().await?;
        Ok(parsed.text)
    }
}

use log::warn;
use reqwest::Client;
use serde_json::json;

use crate::error::{ExtractorError, Result};

const DEFAULT_HOST: &str = "http://localhost:11434";

/// Hard-coded last resort when neither the requested model nor the
/// configured default can be resolved.
pub const LAST_RESORT_MODEL: &str = "gemma3";

/// Client for a local Ollama server.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    default_model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            default_model: default_model.into(),
        }
    }

    /// Reads `OLLAMA_HOST` and `OLLAMA_MODEL` from the environment, with the
    /// stock local defaults.
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        let model =
            std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| LAST_RESORT_MODEL.to_string());
        Self::new(host, model)
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// Sends a single-turn chat request and returns the raw response text.
    ///
    /// Name-fallback contract: if the requested model is unavailable, retry
    /// against the configured default, then against [`LAST_RESORT_MODEL`].
    /// Any failure other than an unresolvable model name propagates as-is.
    pub async fn chat(&self, prompt: &str, model: Option<&str>) -> Result<String> {
        let requested = model.unwrap_or(&self.default_model);
        let chain = fallback_chain(requested, &self.default_model);
        let mut last_missing = requested.to_string();

        for candidate in &chain {
            match self.chat_once(prompt, candidate).await {
                Ok(text) => return Ok(text),
                Err(ExtractorError::ModelUnavailable(name)) => {
                    warn!("Model '{}' not found, trying next fallback", name);
                    last_missing = name;
                }
                Err(e) => return Err(e),
            }
        }

        Err(ExtractorError::ModelUnavailable(last_missing))
    }

    async fn chat_once(&self, prompt: &str, model: &str) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url.trim_end_matches('/'));
        let payload = json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
            "stream": false,
        });

        let res = self.client.post(&url).json(&payload).send().await?;
        let status = res.status();

        if !status.is_success() {
            let error_text = res.text().await.unwrap_or_default();
            if error_text.to_lowercase().contains("not found") {
                return Err(ExtractorError::ModelUnavailable(model.to_string()));
            }
            return Err(ExtractorError::Model(format!(
                "Ollama API error (status {}): {}",
                status, error_text
            )));
        }

        let body: serde_json::Value = res.json().await?;
        body.get("message")
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ExtractorError::Model("Ollama response missing message content".to_string())
            })
    }
}

/// Candidate order for the name-fallback contract: requested model, then the
/// configured default, then the hard-coded last resort, duplicates removed.
fn fallback_chain(requested: &str, default_model: &str) -> Vec<String> {
    let mut chain = vec![requested.to_string()];
    for candidate in [default_model, LAST_RESORT_MODEL] {
        if !chain.iter().any(|existing| existing == candidate) {
            chain.push(candidate.to_string());
        }
    }
    chain
}

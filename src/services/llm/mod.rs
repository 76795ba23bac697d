//! LLM provider clients.
//!
//! Both backends are plain text-in/text-out: send one user prompt, get the
//! first text segment of the reply back.

pub mod anthropic;
#[cfg(test)]
pub mod fake;
pub mod openai;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::config::{GenerationSettings, ProviderSettings, Settings};
use crate::domain::AiProvider;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to decode provider reply: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Provider reply contained no text")]
    EmptyReply,
}

/// A generative model reachable with a single prompt.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Per-call sampling parameters plus connection details.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl ClientConfig {
    pub fn new(provider: &ProviderSettings, generation: &GenerationSettings) -> Self {
        Self {
            api_key: provider.api_key.clone(),
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            model: provider.model.clone(),
            max_tokens: generation.max_tokens,
            temperature: generation.temperature,
        }
    }
}

/// Providers configured at startup, looked up by the request's selection.
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<AiProvider, Arc<dyn CompletionProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from settings, sharing one HTTP client.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let http = build_http_client(settings.generation.timeout_seconds)?;
        let mut registry = Self::new();

        if let Some(anthropic) = &settings.anthropic {
            let config = ClientConfig::new(anthropic, &settings.generation);
            tracing::info!(model = %config.model, "Claude provider configured");
            registry.register(AiProvider::Claude, AnthropicClient::new(http.clone(), config));
        }

        if let Some(openai) = &settings.openai {
            let config = ClientConfig::new(openai, &settings.generation);
            tracing::info!(model = %config.model, "OpenAI provider configured");
            registry.register(AiProvider::OpenAi, OpenAiClient::new(http.clone(), config));
        }

        Ok(registry)
    }

    pub fn register(&mut self, provider: AiProvider, client: impl CompletionProvider + 'static) {
        self.providers.insert(provider, Arc::new(client));
    }

    pub fn get(&self, provider: AiProvider) -> Option<Arc<dyn CompletionProvider>> {
        self.providers.get(&provider).cloned()
    }

    pub fn is_configured(&self, provider: AiProvider) -> bool {
        self.providers.contains_key(&provider)
    }
}

fn build_http_client(timeout_seconds: u64) -> anyhow::Result<Client> {
    use anyhow::Context;

    Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .context("Failed to create HTTP client")
}

/// Map a non-2xx reply to [`ProviderError::Status`], keeping the body for the log.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ProviderError::Status { status, body })
}

/// Check the status, then decode the body. Transport failures stay `Http`;
/// a body that is not the expected JSON is `Decode`.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ProviderError> {
    let body = check_status(response).await?.text().await?;
    Ok(serde_json::from_str(&body)?)
}

//! Anthropic Messages API client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{read_json, ClientConfig, CompletionProvider, ProviderError};

const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct AnthropicClient {
    client: Client,
    config: ClientConfig,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: [UserMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

impl AnthropicClient {
    pub fn new(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            messages: [UserMessage {
                role: "user",
                content: prompt,
            }],
        }
    }
}

/// Text of the first content block; non-text first blocks count as empty.
fn first_text(response: MessagesResponse) -> Result<String, ProviderError> {
    response
        .content
        .into_iter()
        .next()
        .filter(|block| block.block_type == "text")
        .and_then(|block| block.text)
        .ok_or(ProviderError::EmptyReply)
}

#[async_trait]
impl CompletionProvider for AnthropicClient {
    fn name(&self) -> &'static str {
        "claude"
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!("{}/v1/messages", self.config.base_url);
        debug!(url = %url, prompt_len = prompt.len(), "Claude request");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let response: MessagesResponse = read_json(response).await?;
        first_text(response)
    }
}

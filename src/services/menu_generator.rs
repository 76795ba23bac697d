//! Menu generation: prompt, one provider call, extraction and validation.

use thiserror::Error;
use tracing::{info, instrument};

use crate::domain::{AiProvider, GeneratedMenu, GenerationRequest};

use super::extract::parse_menu;
use super::llm::{ProviderError, ProviderRegistry};
use super::prompt::{build_prompt, PromptStyle};

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Provider {0} is not configured")]
    ProviderNotConfigured(AiProvider),

    #[error("Provider call failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Reply contained no parseable JSON object: {0}")]
    UnparsableResponse(String),

    #[error("Reply did not contain a usable dish list: {0}")]
    InvalidMenu(String),
}

/// Generates menus through whichever provider a request selects.
///
/// Holds no per-call state; concurrent calls are independent. Each call is
/// a single attempt and retrying is left to the caller.
#[derive(Clone)]
pub struct MenuGenerator {
    providers: ProviderRegistry,
}

impl MenuGenerator {
    pub fn new(providers: ProviderRegistry) -> Self {
        Self { providers }
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    #[instrument(skip(self, request), fields(provider = %request.provider, dish_count = request.dish_count))]
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedMenu, GenerationError> {
        let provider = self
            .providers
            .get(request.provider)
            .ok_or(GenerationError::ProviderNotConfigured(request.provider))?;

        let prompt = build_prompt(request, PromptStyle::from(request.provider));
        let reply = provider.complete(&prompt).await?;

        let menu = parse_menu(&reply)?;
        info!(
            provider = provider.name(),
            dishes = menu.dishes.len(),
            "Menu generated"
        );

        Ok(menu)
    }
}

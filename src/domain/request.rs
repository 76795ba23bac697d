//! Inbound request DTOs and the normalized generation request.

use serde::{Deserialize, Serialize};

use super::lenient;

pub const DEFAULT_DISH_COUNT: i64 = 3;
pub const DEFAULT_SHOPPING_BUDGET: i64 = 500;

/// A fridge entry as stored by the UI.
#[derive(Debug, Clone, Deserialize)]
pub struct FridgeItem {
    #[allow(dead_code)]
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default, deserialize_with = "lenient::text")]
    pub quantity: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub unit: String,
}

/// Selectable LLM backends. The first variant is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    Claude,
    #[serde(rename = "openai")]
    OpenAi,
}

impl AiProvider {
    /// `"openai"` selects OpenAI; anything else, including no value, selects Claude.
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some("openai") => Self::OpenAi,
            _ => Self::Claude,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::OpenAi => "openai",
        }
    }
}

impl std::fmt::Display for AiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Household settings snapshot sent with each request.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdSettings {
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub adults: Option<i64>,
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub children: Option<i64>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub ai_provider: Option<String>,
}

/// Raw body of `POST /api/generate-menu`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMenuBody {
    #[serde(default)]
    pub fridge_items: Option<Vec<FridgeItem>>,
    #[serde(default)]
    pub settings: Option<HouseholdSettings>,
    #[serde(default)]
    pub user_comment: Option<String>,
    /// Number or numeric text; anything unparsable reads as absent.
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub dish_count: Option<i64>,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub enable_shopping: bool,
    #[serde(default, deserialize_with = "lenient::optional_int")]
    pub shopping_budget: Option<i64>,
}

/// An available ingredient as it appears in the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

/// Normalized input to menu generation. Built per call, never shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub ingredients: Vec<Ingredient>,
    pub adults: u32,
    pub children: u32,
    pub allergies: Vec<String>,
    /// Trimmed; `None` when blank.
    pub comment: Option<String>,
    /// Not range-checked; values <= 0 are passed through to the prompt.
    pub dish_count: i64,
    pub enable_shopping: bool,
    pub shopping_budget: i64,
    pub provider: AiProvider,
}

//! Generated menu types.
//!
//! These mirror the JSON schema the model is asked to produce. Decoding is
//! tolerant for everything except the dish list; see `services::extract`.

use serde::{Deserialize, Deserializer, Serialize};

use super::lenient;

/// One recipe within a generated menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    pub name: String,
    /// Minutes.
    #[serde(default, deserialize_with = "lenient::number")]
    pub cooking_time: u32,
    #[serde(default, deserialize_with = "lenient::number")]
    pub calories: u32,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub recipe: Vec<String>,
}

/// An ingredient the model proposes buying in shopping mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    /// Yen.
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: u32,
    #[serde(default, deserialize_with = "lenient::text")]
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "簡単")]
    Easy,
    #[serde(rename = "普通")]
    Normal,
    #[serde(rename = "少し手間")]
    Involved,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Normal, Self::Involved];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Easy => "簡単",
            Self::Normal => "普通",
            Self::Involved => "少し手間",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|d| d.label() == label)
    }
}

/// A validated menu returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedMenu {
    pub dishes: Vec<Dish>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_time: u32,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_calories: u32,
    #[serde(
        default,
        deserialize_with = "difficulty_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<Difficulty>,
    #[serde(default, deserialize_with = "lenient::strings")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub reasoning: String,
    #[serde(
        default,
        deserialize_with = "shopping_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub shopping_list: Option<Vec<ShoppingItem>>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_shopping_cost: Option<u32>,

    // Legacy three-course view for older clients
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub main_dish: Option<Dish>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub side_dish: Option<Dish>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub soup: Option<Dish>,
}

impl GeneratedMenu {
    /// Expose a three-dish menu as main/side/soup; any other size clears them.
    pub fn project_legacy_courses(&mut self) {
        match self.dishes.as_slice() {
            [main, side, soup] => {
                self.main_dish = Some(main.clone());
                self.side_dish = Some(side.clone());
                self.soup = Some(soup.clone());
            }
            _ => {
                self.main_dish = None;
                self.side_dish = None;
                self.soup = None;
            }
        }
    }
}

fn difficulty_label<'de, D>(deserializer: D) -> Result<Option<Difficulty>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(Difficulty::from_label))
}

fn shopping_list<'de, D>(deserializer: D) -> Result<Option<Vec<ShoppingItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    })
}

/// Response envelope for the generate endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateMenuResponse {
    pub menu: GeneratedMenu,
}

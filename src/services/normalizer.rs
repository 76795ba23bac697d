//! Request normalization ahead of menu generation.

use thiserror::Error;

use crate::domain::request::{DEFAULT_DISH_COUNT, DEFAULT_SHOPPING_BUDGET};
use crate::domain::{AiProvider, GenerateMenuBody, GenerationRequest, Ingredient};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("必要なデータが不足しています")]
    MissingData,

    #[error("利用可能な食材がありません。冷蔵庫の中身を確認してください。")]
    NoAvailableIngredients,
}

/// Turn a raw request body into a [`GenerationRequest`].
///
/// The budget is expected to be clamped by the UI already and is not range-checked here.
pub fn normalize(body: GenerateMenuBody) -> Result<GenerationRequest, NormalizeError> {
    let (Some(fridge_items), Some(settings)) = (body.fridge_items, body.settings) else {
        return Err(NormalizeError::MissingData);
    };

    let ingredients: Vec<Ingredient> = fridge_items
        .into_iter()
        .filter(|item| item.available)
        .map(|item| Ingredient {
            name: item.name,
            quantity: item.quantity,
            unit: item.unit,
        })
        .collect();

    if ingredients.is_empty() {
        return Err(NormalizeError::NoAvailableIngredients);
    }

    let mut allergies: Vec<String> = Vec::with_capacity(settings.allergies.len());
    for label in settings.allergies {
        let label = label.trim();
        if !label.is_empty() && !allergies.iter().any(|seen| seen == label) {
            allergies.push(label.to_string());
        }
    }

    let comment = body
        .user_comment
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let dish_count = body.dish_count.unwrap_or(DEFAULT_DISH_COUNT);

    // Falsy budgets (absent, 0, false, unparsable) take the default
    let shopping_budget = body
        .shopping_budget
        .filter(|budget| *budget != 0)
        .unwrap_or(DEFAULT_SHOPPING_BUDGET);

    Ok(GenerationRequest {
        ingredients,
        adults: headcount(settings.adults),
        children: headcount(settings.children),
        allergies,
        comment,
        dish_count,
        enable_shopping: body.enable_shopping,
        shopping_budget,
        provider: AiProvider::from_label(settings.ai_provider.as_deref()),
    })
}

fn headcount(value: Option<i64>) -> u32 {
    value.and_then(|n| u32::try_from(n).ok()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn body(value: Value) -> GenerateMenuBody {
        serde_json::from_value(value).unwrap()
    }

    fn base() -> Value {
        json!({
            "fridgeItems": [
                { "id": "1", "name": "鶏肉", "available": true, "quantity": "300", "unit": "g" },
                { "id": "3", "name": "牛肉", "available": false, "quantity": "0", "unit": "g" },
                { "id": "4", "name": "卵", "available": true, "quantity": "6", "unit": "個" }
            ],
            "settings": { "adults": "2", "children": "1", "allergies": [] }
        })
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert_eq!(normalize(body(json!({}))), Err(NormalizeError::MissingData));
        assert_eq!(
            normalize(body(json!({ "fridgeItems": [] }))),
            Err(NormalizeError::MissingData)
        );
        assert_eq!(
            normalize(body(json!({ "settings": {} }))),
            Err(NormalizeError::MissingData)
        );
    }

    #[test]
    fn zero_available_ingredients_is_rejected() {
        let mut value = base();
        value["fridgeItems"] = json!([
            { "id": "3", "name": "牛肉", "available": false, "quantity": "0", "unit": "g" }
        ]);
        assert_eq!(normalize(body(value)), Err(NormalizeError::NoAvailableIngredients));

        let mut value = base();
        value["fridgeItems"] = json!([]);
        assert_eq!(normalize(body(value)), Err(NormalizeError::NoAvailableIngredients));
    }

    #[test]
    fn only_available_items_are_kept() {
        let request = normalize(body(base())).unwrap();
        let names: Vec<_> = request.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["鶏肉", "卵"]);
        assert_eq!(request.adults, 2);
        assert_eq!(request.children, 1);
    }

    #[test]
    fn defaults_apply_when_optional_fields_are_absent() {
        let request = normalize(body(base())).unwrap();
        assert_eq!(request.dish_count, 3);
        assert_eq!(request.shopping_budget, 500);
        assert!(!request.enable_shopping);
        assert_eq!(request.comment, None);
        assert_eq!(request.provider, AiProvider::Claude);
    }

    #[test]
    fn dish_count_parsing() {
        for (input, expected) in [(json!("abc"), 3), (json!("5"), 5), (json!(2), 2), (json!(0), 0)] {
            let mut value = base();
            value["dishCount"] = input.clone();
            assert_eq!(normalize(body(value)).unwrap().dish_count, expected, "{input}");
        }
    }

    #[test]
    fn non_numeric_dish_count_falls_back_to_default() {
        for input in [json!(true), json!(false), json!(null), json!({})] {
            let mut value = base();
            value["dishCount"] = input.clone();
            assert_eq!(normalize(body(value)).unwrap().dish_count, 3, "{input}");
        }
    }

    #[test]
    fn non_numeric_budget_falls_back_to_default() {
        for input in [json!(false), json!(true), json!(null), json!({}), json!("")] {
            let mut value = base();
            value["enableShopping"] = json!(true);
            value["shoppingBudget"] = input.clone();
            let request = normalize(body(value)).unwrap();
            assert_eq!(request.shopping_budget, 500, "{input}");
            assert!(request.enable_shopping);
        }
    }

    #[test]
    fn falsy_budget_falls_back_to_default() {
        let mut value = base();
        value["enableShopping"] = json!(true);
        value["shoppingBudget"] = json!(0);
        assert_eq!(normalize(body(value.clone())).unwrap().shopping_budget, 500);

        value["shoppingBudget"] = json!(1200);
        let request = normalize(body(value)).unwrap();
        assert_eq!(request.shopping_budget, 1200);
        assert!(request.enable_shopping);
    }

    #[test]
    fn comment_is_trimmed_and_blank_dropped() {
        let mut value = base();
        value["userComment"] = json!("   ");
        assert_eq!(normalize(body(value.clone())).unwrap().comment, None);

        value["userComment"] = json!("  魚料理が食べたい \n");
        assert_eq!(
            normalize(body(value)).unwrap().comment.as_deref(),
            Some("魚料理が食べたい")
        );
    }

    #[test]
    fn allergies_are_deduplicated_in_order() {
        let mut value = base();
        value["settings"]["allergies"] = json!(["卵", " 小麦 ", "卵", ""]);
        value["settings"]["aiProvider"] = json!("openai");
        let request = normalize(body(value)).unwrap();
        assert_eq!(request.allergies, vec!["卵".to_string(), "小麦".to_string()]);
        assert_eq!(request.provider, AiProvider::OpenAi);
    }
}

//! Prompt construction for menu generation.
//!
//! Rendering is pure: the same [`GenerationRequest`] always yields the same text.

use crate::domain::{AiProvider, Difficulty, GenerationRequest};

/// Seasonings treated as always on hand when shopping is disabled.
pub const PANTRY_SEASONINGS: [&str; 7] = ["醤油", "味噌", "塩", "砂糖", "酢", "油", "だしの素"];

pub const MAX_TOTAL_COOKING_MINUTES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStyle {
    Standard,
    /// Adds flavour, texture and recipe-detail requirements.
    Detailed,
}

impl From<AiProvider> for PromptStyle {
    fn from(provider: AiProvider) -> Self {
        match provider {
            AiProvider::Claude => Self::Standard,
            AiProvider::OpenAi => Self::Detailed,
        }
    }
}

pub fn dish_description(count: i64) -> String {
    match count {
        1 => "料理1品".to_string(),
        2 => "料理2品".to_string(),
        3 => "献立（主菜1品、副菜1品、汁物1品）".to_string(),
        n => format!("料理{n}品"),
    }
}

pub fn build_prompt(request: &GenerationRequest, style: PromptStyle) -> String {
    let ingredients = request
        .ingredients
        .iter()
        .map(|i| format!("{}（{}{}）", i.name, i.quantity, i.unit))
        .collect::<Vec<_>>()
        .join("、");

    let family = format!("大人{}人、子供{}人", request.adults, request.children);

    let allergies = if request.allergies.is_empty() {
        "アレルギーなし".to_string()
    } else {
        format!("アレルギー: {}", request.allergies.join("、"))
    };

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "\nあなたは経験豊富な料理研究家です。以下の条件で、今日の夕食の{}を提案してください。\n",
        dish_description(request.dish_count)
    ));
    prompt.push_str(&format!("\n【利用可能な食材】\n{ingredients}\n"));
    prompt.push_str(&format!("\n【家族構成】\n{family}\n"));
    prompt.push_str(&format!("\n【アレルギー情報】\n{allergies}\n"));

    if let Some(comment) = request.comment.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("\n【ユーザーからのリクエスト】\n{comment}\n"));
    }

    if request.enable_shopping {
        prompt.push_str(&format!(
            "\n【買い足し設定】\n予算: {}円以内で追加食材を購入可能\n",
            request.shopping_budget
        ));
    }

    prompt.push_str("\n【重要な制約】\n");
    prompt.push_str(&constraints(request));

    prompt.push_str("\n【要件】\n");
    prompt.push_str(&format!(
        "- 主婦が作りやすい現実的な料理\n\
         - 調理時間は合計{MAX_TOTAL_COOKING_MINUTES}分以内\n\
         - 栄養バランスを考慮\n\
         - 家族全員が食べられる料理\n\
         - 利用可能な食材を最大限活用\n\
         - 毎回違った料理や調理法を提案する\n\
         - 季節感や時間帯を考慮した料理を心がける\n"
    ));

    if style == PromptStyle::Detailed {
        prompt.push_str(
            "\n【料理の質に関する要件】\n\
             - 甘味・塩味・酸味・うま味のバランスが取れた組み合わせにする\n\
             - 柔らかいもの・シャキシャキしたものなど食感に変化をつける\n\
             - 彩りがよく見た目にも食欲をそそる献立にする\n\
             \n【レシピの詳細度】\n\
             - 材料ごとに具体的な分量（g、個、大さじ等）を明記する\n\
             - 料理初心者でも迷わないよう、手順を一つずつ具体的に書く\n\
             - 各手順に火加減（弱火・中火・強火）と加熱時間の目安を含める\n",
        );
    }

    prompt.push_str("\n【回答形式】\n以下のJSON形式で回答してください：\n\n");
    prompt.push_str(&schema_example(request.enable_shopping));

    prompt.push_str("\n\n※dishesには指定された品数分の料理を含めてください。");
    if request.enable_shopping {
        prompt.push_str(
            "\n※買い足し設定が有効な場合は、shoppingListに必要な追加食材とその価格を含めてください。",
        );
    }

    let labels = Difficulty::ALL
        .iter()
        .map(|d| format!("「{}」", d.label()))
        .collect::<String>();
    prompt.push_str(&format!("\n\n難易度は{labels}から選択してください。\n"));

    prompt
}

fn constraints(request: &GenerationRequest) -> String {
    let seasonings = format!("基本調味料（{}など）は使用可能とします", PANTRY_SEASONINGS.join("、"));

    if request.enable_shopping {
        format!(
            "- 【利用可能な食材】を優先的に使用し、必要に応じて{}円以内で追加食材を購入してください\n\
             - {seasonings}\n\
             - 追加購入する食材は現実的な価格設定で、合計金額が予算内に収まるようにしてください\n",
            request.shopping_budget
        )
    } else {
        format!(
            "- 【利用可能な食材】に記載された食材のみを使用してください\n\
             - {seasonings}\n\
             - 記載されていない食材は一切使用しないでください\n\
             - やむを得ず追加が必要な場合は、理由欄で説明してください\n"
        )
    }
}

fn schema_example(enable_shopping: bool) -> String {
    let shopping = if enable_shopping {
        r#",
  "shoppingList": [
    {
      "name": "追加食材名",
      "price": 150,
      "reason": "この食材を追加する理由"
    }
  ],
  "totalShoppingCost": 150"#
    } else {
        ""
    };

    format!(
        r#"{{
  "dishes": [
    {{
      "name": "料理名1",
      "cookingTime": 15,
      "calories": 300,
      "ingredients": ["食材1", "食材2"],
      "recipe": ["手順1", "手順2", "手順3"]
    }},
    {{
      "name": "料理名2",
      "cookingTime": 10,
      "calories": 50,
      "ingredients": ["食材1", "食材2"],
      "recipe": ["手順1", "手順2"]
    }}
  ],
  "totalTime": 25,
  "totalCalories": 350,
  "difficulty": "簡単",
  "tags": ["家族向け", "栄養満点"],
  "reasoning": "この献立を提案した理由を簡潔に説明"{shopping}
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Ingredient;

    fn request() -> GenerationRequest {
        GenerationRequest {
            ingredients: vec![
                Ingredient {
                    name: "鶏肉".into(),
                    quantity: "300".into(),
                    unit: "g".into(),
                },
                Ingredient {
                    name: "キャベツ".into(),
                    quantity: "1/2".into(),
                    unit: "玉".into(),
                },
            ],
            adults: 2,
            children: 1,
            allergies: vec![],
            comment: None,
            dish_count: 3,
            enable_shopping: false,
            shopping_budget: 500,
            provider: AiProvider::Claude,
        }
    }

    #[test]
    fn renders_ingredients_family_and_allergies() {
        let prompt = build_prompt(&request(), PromptStyle::Standard);
        assert!(prompt.contains("鶏肉（300g）、キャベツ（1/2玉）"));
        assert!(prompt.contains("大人2人、子供1人"));
        assert!(prompt.contains("アレルギーなし"));

        let mut req = request();
        req.allergies = vec!["卵".into(), "えび".into()];
        let prompt = build_prompt(&req, PromptStyle::Standard);
        assert!(prompt.contains("アレルギー: 卵、えび"));
        assert!(!prompt.contains("アレルギーなし"));
    }

    #[test]
    fn comment_block_only_when_comment_present() {
        let prompt = build_prompt(&request(), PromptStyle::Standard);
        assert!(!prompt.contains("【ユーザーからのリクエスト】"));

        let mut req = request();
        req.comment = Some("   ".into());
        assert!(!build_prompt(&req, PromptStyle::Standard).contains("【ユーザーからのリクエスト】"));

        req.comment = Some("さっぱりしたもの".into());
        let prompt = build_prompt(&req, PromptStyle::Standard);
        assert!(prompt.contains("【ユーザーからのリクエスト】\nさっぱりしたもの\n"));
    }

    #[test]
    fn shopping_block_only_in_shopping_mode() {
        let prompt = build_prompt(&request(), PromptStyle::Standard);
        assert!(!prompt.contains("【買い足し設定】"));
        assert!(!prompt.contains("shoppingList"));
        assert!(prompt.contains("記載されていない食材は一切使用しないでください"));
        assert!(prompt.contains("だしの素"));

        let mut req = request();
        req.enable_shopping = true;
        req.shopping_budget = 800;
        let prompt = build_prompt(&req, PromptStyle::Standard);
        assert!(prompt.contains("【買い足し設定】\n予算: 800円以内"));
        assert!(prompt.contains("\"totalShoppingCost\": 150"));
        assert!(prompt.contains("合計金額が予算内に収まる"));
        assert!(!prompt.contains("一切使用しないでください"));
    }

    #[test]
    fn dish_descriptions_by_count() {
        assert_eq!(dish_description(1), "料理1品");
        assert_eq!(dish_description(2), "料理2品");
        assert_eq!(dish_description(3), "献立（主菜1品、副菜1品、汁物1品）");
        assert_eq!(dish_description(5), "料理5品");

        let mut req = request();
        req.dish_count = 4;
        assert!(build_prompt(&req, PromptStyle::Standard).contains("今日の夕食の料理4品を提案"));
    }

    #[test]
    fn detailed_style_adds_recipe_requirements() {
        let standard = build_prompt(&request(), PromptStyle::Standard);
        let detailed = build_prompt(&request(), PromptStyle::Detailed);
        assert!(!standard.contains("【レシピの詳細度】"));
        assert!(detailed.contains("【レシピの詳細度】"));
        assert!(detailed.contains("火加減"));
        assert!(detailed.starts_with(&standard[..standard.find("【回答形式】").unwrap()]));
    }

    #[test]
    fn ends_with_difficulty_labels() {
        let prompt = build_prompt(&request(), PromptStyle::Standard);
        assert!(prompt.contains("調理時間は合計30分以内"));
        assert!(prompt.trim_end().ends_with("難易度は「簡単」「普通」「少し手間」から選択してください。"));
        assert_eq!(prompt, build_prompt(&request(), PromptStyle::Standard));
    }
}

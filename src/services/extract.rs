//! Recover a typed menu from a model's free-text reply.
//!
//! Extraction (finding the JSON) and validation (checking its shape) are
//! kept separate so each can be tested against raw strings.

use serde_json::Value;
use tracing::warn;

use crate::domain::GeneratedMenu;

use super::menu_generator::GenerationError;

/// Characters of the raw reply kept in logs when it cannot be used.
const REPLY_EXCERPT_CHARS: usize = 500;

/// Slice from the first `{` to the last `}` of the reply.
///
/// Models tend to wrap the JSON in prose, so everything outside that span is ignored.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse and validate a reply into a [`GeneratedMenu`].
///
/// Only the dish list is load-bearing: it must be a non-empty array of
/// named dishes. Every other field decodes leniently.
pub fn parse_menu(reply: &str) -> Result<GeneratedMenu, GenerationError> {
    validate(reply).map_err(|e| {
        warn!(error = %e, reply = %excerpt(reply), "Unusable provider reply");
        e
    })
}

fn validate(reply: &str) -> Result<GeneratedMenu, GenerationError> {
    let json = extract_json_object(reply).ok_or_else(|| {
        GenerationError::UnparsableResponse("no '{' ... '}' span in reply".to_string())
    })?;
    let value: Value = serde_json::from_str(json)
        .map_err(|e| GenerationError::UnparsableResponse(e.to_string()))?;

    match value.get("dishes") {
        Some(Value::Array(dishes)) if !dishes.is_empty() => {}
        Some(Value::Array(_)) => {
            return Err(GenerationError::InvalidMenu("dishes is empty".to_string()))
        }
        Some(_) => {
            return Err(GenerationError::InvalidMenu("dishes is not an array".to_string()))
        }
        None => return Err(GenerationError::InvalidMenu("dishes is missing".to_string())),
    }

    let mut menu: GeneratedMenu =
        serde_json::from_value(value).map_err(|e| GenerationError::InvalidMenu(e.to_string()))?;
    menu.project_legacy_courses();

    Ok(menu)
}

/// Leading part of a reply, cut on a character boundary.
fn excerpt(reply: &str) -> &str {
    match reply.char_indices().nth(REPLY_EXCERPT_CHARS) {
        Some((end, _)) => &reply[..end],
        None => reply,
    }
}

//! Menu generation endpoint.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::{GenerateMenuBody, GenerateMenuResponse};
use crate::error::ApiResult;
use crate::services::{normalize, NormalizeError};

/// Propose a menu from the available fridge items.
///
/// POST /api/generate-menu
pub async fn generate_menu(
    State(state): State<Arc<AppState>>,
    body: Result<Json<GenerateMenuBody>, JsonRejection>,
) -> ApiResult<Json<GenerateMenuResponse>> {
    let Json(body) = body.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable menu request body");
        NormalizeError::MissingData
    })?;

    let request = normalize(body)?;
    tracing::debug!(
        ingredients = request.ingredients.len(),
        provider = %request.provider,
        shopping = request.enable_shopping,
        "Generating menu"
    );

    let menu = state.menu_generator.generate(&request).await?;

    Ok(Json(GenerateMenuResponse { menu }))
}

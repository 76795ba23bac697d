//! Unified API error handling
//!
//! Provides consistent error responses across all endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{GenerationError, NormalizeError};

/// Shown for every generation-stage failure; the cause only goes to the log.
pub const MENU_GENERATION_FAILED_MESSAGE: &str =
    "献立作成中にエラーが発生しました。しばらく時間をおいて再度お試しください。";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(#[from] NormalizeError),

    #[error("Menu generation failed")]
    MenuGenerationFailed(#[from] GenerationError),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MenuGenerationFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(NormalizeError::MissingData) => "MISSING_DATA",
            Self::BadRequest(NormalizeError::NoAvailableIngredients) => "NO_AVAILABLE_INGREDIENTS",
            Self::MenuGenerationFailed(_) => "MENU_GENERATION_FAILED",
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::BadRequest(e) => e.to_string(),
            // Don't leak provider or parsing details
            Self::MenuGenerationFailed(_) => MENU_GENERATION_FAILED_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::MenuGenerationFailed(e) => {
                tracing::error!(error = %e, cause = ?e, "Menu generation failed");
            }
            Self::BadRequest(e) => {
                tracing::warn!(error = %e, "Rejected menu request");
            }
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.public_message(),
            code: self.error_code().to_string(),
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

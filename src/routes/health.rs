use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::app::AppState;
use crate::domain::AiProvider;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub providers: ProviderHealth,
}

#[derive(Serialize)]
pub struct ProviderHealth {
    pub claude: String,
    pub openai: String,
}

/// Health check endpoint - public
///
/// Reports which providers are configured; no provider is called.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let providers = state.menu_generator.providers();
    let describe = |provider| {
        if providers.is_configured(provider) {
            "configured".to_string()
        } else {
            "disabled".to_string()
        }
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        providers: ProviderHealth {
            claude: describe(AiProvider::Claude),
            openai: describe(AiProvider::OpenAi),
        },
    })
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::app::{create_app, AppState};
    use crate::config::Settings;
    use crate::domain::AiProvider;
    use crate::services::llm::fake::FakeProvider;
    use crate::services::{MenuGenerator, ProviderRegistry};

    #[tokio::test]
    async fn reports_configured_providers() -> Result<(), Box<dyn std::error::Error>> {
        let mut registry = ProviderRegistry::new();
        registry.register(AiProvider::Claude, FakeProvider::replying("{}"));
        let app = create_app(AppState::new(Settings::for_tests(), MenuGenerator::new(registry)));

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));

        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let health: serde_json::Value = serde_json::from_slice(&body)?;
        assert_eq!(health["status"], "healthy");
        assert_eq!(health["providers"]["claude"], "configured");
        assert_eq!(health["providers"]["openai"], "disabled");

        Ok(())
    }
}

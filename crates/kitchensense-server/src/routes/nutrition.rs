//! Nutrition tracking route.
//! Matches POST /nutrition from the FastAPI service.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use kitchensense_core::Error;
use serde::Deserialize;
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/nutrition", post(track_nutrition))
}

#[derive(Debug, Deserialize)]
pub struct NutritionRequest {
    #[serde(default)]
    pub meal: String,
}

/// POST /nutrition — `{ "meal": "..." }` to `{ "nutrition": { ... } }`.
async fn track_nutrition(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NutritionRequest>,
) -> impl IntoResponse {
    let request_id = Uuid::new_v4();
    let span = info_span!("nutrition", %request_id);

    // Resolution runs on its own task so a provider panic becomes a 500.
    let task = tokio::spawn(
        async move { state.pipeline.resolve_detailed(&req.meal).await }.instrument(span),
    );
    let result = task
        .await
        .unwrap_or_else(|e| Err(Error::Internal(format!("nutrition task failed: {}", e))));

    match result {
        Ok(resolution) => (
            StatusCode::OK,
            Json(serde_json::json!({ "nutrition": resolution.totals })),
        ),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                error!(%request_id, "Nutrition tracking failed: {}", e);
            }
            (status, Json(serde_json::json!({ "error": e.to_string() })))
        }
    }
}

fn status_for(err: &Error) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::build_router;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use kitchensense_core::{Result, ServiceConfig};
    use kitchensense_nutrition::{
        IngredientMatch, NutrientItem, NutritionProvider, ParsedIngredient,
    };
    use std::time::Duration;
    use tower::ServiceExt;

    /// Provider whose bulk parse always returns the same two nutrients.
    struct FixedProvider {
        configured: bool,
    }

    #[async_trait]
    impl NutritionProvider for FixedProvider {
        fn is_configured(&self) -> bool {
            self.configured
        }

        async fn parse_ingredients(&self, _text: &str, _servings: u32) -> Result<Vec<ParsedIngredient>> {
            Ok(vec![ParsedIngredient {
                name: "oats".into(),
                nutrients: vec![
                    NutrientItem::new("Calories", 389.04),
                    NutrientItem::new("Fiber", 10.66),
                ],
            }])
        }

        async fn search_ingredient(&self, _name: &str) -> Result<Option<IngredientMatch>> {
            Ok(None)
        }

        async fn ingredient_info(&self, _id: u64, _amount_grams: f64) -> Result<Vec<NutrientItem>> {
            Ok(Vec::new())
        }
    }

    /// Provider whose bulk parse panics.
    struct PanickingProvider;

    #[async_trait]
    impl NutritionProvider for PanickingProvider {
        fn is_configured(&self) -> bool {
            true
        }

        async fn parse_ingredients(&self, _text: &str, _servings: u32) -> Result<Vec<ParsedIngredient>> {
            panic!("provider bug");
        }

        async fn search_ingredient(&self, _name: &str) -> Result<Option<IngredientMatch>> {
            Ok(None)
        }

        async fn ingredient_info(&self, _id: u64, _amount_grams: f64) -> Result<Vec<NutrientItem>> {
            Ok(Vec::new())
        }
    }

    fn app_with(provider: Arc<dyn NutritionProvider>) -> Router {
        let mut config = ServiceConfig::from_lookup(|_| None);
        config.provider.pacing = Duration::ZERO;
        build_router(Arc::new(AppState::with_provider(config, provider)))
    }

    fn app(configured: bool) -> Router {
        app_with(Arc::new(FixedProvider { configured }))
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_nutrition_ok() {
        let (status, body) = post_json(app(true), "/nutrition", r#"{"meal": "100 g oats"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["nutrition"]["calories"], 389.0);
        assert_eq!(body["nutrition"]["fiber_g"], 10.7);
        assert_eq!(body["nutrition"]["fat_g"], 0.0);
    }

    #[tokio::test]
    async fn test_nutrition_under_dashboard_prefix() {
        let (status, body) =
            post_json(app(true), "/api/smart-kitchen/nutrition", r#"{"meal": "oats"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["nutrition"].is_object());
    }

    #[tokio::test]
    async fn test_empty_meal_is_bad_request() {
        let (status, body) = post_json(app(true), "/nutrition", r#"{"meal": "   "}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("empty"));

        let (status, _) = post_json(app(true), "/nutrition", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_api_key_is_server_error() {
        let (status, body) = post_json(app(false), "/nutrition", r#"{"meal": "oats"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Configuration error"));
    }

    #[tokio::test]
    async fn test_provider_panic_is_internal_error() {
        let (status, body) =
            post_json(app_with(Arc::new(PanickingProvider)), "/nutrition", r#"{"meal": "oats"}"#)
                .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Internal error"));
    }
}

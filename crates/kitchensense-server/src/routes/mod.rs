//! HTTP route handlers.

pub mod health;
pub mod nutrition;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
///
/// Nutrition is served both at the root and under the dashboard's
/// `/api/smart-kitchen` prefix.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(nutrition::routes())
        .merge(health::routes())
        .nest("/api/smart-kitchen", nutrition::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

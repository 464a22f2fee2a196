//! Shared application state.

use std::sync::Arc;

use kitchensense_core::ServiceConfig;
use kitchensense_nutrition::{NutritionPipeline, NutritionProvider, PipelineOptions, SpoonacularClient};

/// Shared application state accessible from all route handlers.
///
/// Built once at startup and never mutated.
pub struct AppState {
    pub config: ServiceConfig,
    pub pipeline: NutritionPipeline,
}

impl AppState {
    /// State backed by the Spoonacular API.
    pub fn new(config: ServiceConfig) -> Self {
        let provider = Arc::new(SpoonacularClient::new(&config.provider));
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: ServiceConfig, provider: Arc<dyn NutritionProvider>) -> Self {
        let options = PipelineOptions {
            pacing: config.provider.pacing,
            ..Default::default()
        };
        Self {
            pipeline: NutritionPipeline::new(provider, options),
            config,
        }
    }

    pub fn provider_configured(&self) -> bool {
        self.pipeline.provider().is_configured()
    }
}

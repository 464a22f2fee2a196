//! External nutrition data provider abstraction.
//!
//! The `NutritionProvider` trait covers the three lookups the pipeline needs.
//! Implementations:
//! - `SpoonacularClient`: Spoonacular REST API over HTTPS

use async_trait::async_trait;
use kitchensense_core::Result;

use crate::types::{IngredientMatch, NutrientItem, ParsedIngredient};

#[async_trait]
pub trait NutritionProvider: Send + Sync {
    /// Whether the provider has the credentials it needs.
    fn is_configured(&self) -> bool;

    /// Parse a whole ingredient list in one call, with nutrition per item.
    async fn parse_ingredients(&self, text: &str, servings: u32) -> Result<Vec<ParsedIngredient>>;

    /// Best single match for an ingredient name, if any.
    async fn search_ingredient(&self, name: &str) -> Result<Option<IngredientMatch>>;

    /// Nutrients for `amount_grams` of the given ingredient.
    async fn ingredient_info(&self, id: u64, amount_grams: f64) -> Result<Vec<NutrientItem>>;
}

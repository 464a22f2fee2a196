//! Nutrition aggregation for free-text meals.
//!
//! Parses meal descriptions, queries an external nutrition provider (bulk
//! parse first, per-ingredient lookups as fallback) and folds the results
//! into five-bucket totals.

pub mod extract;
pub mod pipeline;
pub mod provider;
pub mod quantity;
pub mod spoonacular;
pub mod totals;
pub mod types;

pub use pipeline::{NutritionPipeline, PipelineOptions, Resolution, Strategy};
pub use provider::NutritionProvider;
pub use quantity::{parse as parse_quantity, split_meal_text, ParsedQuantity};
pub use spoonacular::SpoonacularClient;
pub use totals::{Bucket, NutrientTotals};
pub use types::*;

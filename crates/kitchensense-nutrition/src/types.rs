//! Provider-facing nutrition types.

use serde::{Deserialize, Serialize};

/// One nutrient observation reported by the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientItem {
    pub name: String,
    pub amount: f64,
}

impl NutrientItem {
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// One ingredient from a bulk ingredient-parse response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedIngredient {
    pub name: String,
    pub nutrients: Vec<NutrientItem>,
}

/// Best search hit for an ingredient name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientMatch {
    pub id: u64,
    pub name: String,
}

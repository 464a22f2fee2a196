//! Nutrition resolution pipeline.
//!
//! Bulk parse first; if that yields nothing usable, fall back to a paced
//! per-ingredient search-then-lookup loop. Individual lookup misses are
//! logged and skipped. An all-zero result is a valid answer.

use std::sync::Arc;
use std::time::{Duration, Instant};

use kitchensense_core::{Error, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::extract::extract;
use crate::provider::NutritionProvider;
use crate::quantity::{self, split_meal_text};
use crate::totals::NutrientTotals;

/// Grams assumed when a fragment has no usable quantity.
pub const DEFAULT_GRAMS: f64 = 100.0;

/// Tunables for a pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Pause after each successfully resolved fallback fragment.
    pub pacing: Duration,
    pub default_grams: f64,
    /// Servings passed to the bulk parse call.
    pub servings: u32,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            pacing: Duration::from_millis(kitchensense_core::config::DEFAULT_PACING_MS),
            default_grams: DEFAULT_GRAMS,
            servings: 1,
        }
    }
}

/// Which strategy produced the final totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Bulk,
    Sequential,
    /// Neither strategy found any nutrient data.
    NoData,
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bulk => write!(f, "bulk"),
            Self::Sequential => write!(f, "sequential"),
            Self::NoData => write!(f, "nodata"),
        }
    }
}

/// Outcome of resolving one meal.
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    /// Totals rounded to one decimal place.
    pub totals: NutrientTotals,
    pub strategy: Strategy,
    /// Fallback fragments that contributed nutrients.
    pub matched: usize,
    /// Fallback fragments skipped after a lookup miss.
    pub skipped: usize,
    #[serde(rename = "durationMs")]
    pub duration_ms: u64,
}

pub struct NutritionPipeline {
    provider: Arc<dyn NutritionProvider>,
    options: PipelineOptions,
}

impl NutritionPipeline {
    pub fn new(provider: Arc<dyn NutritionProvider>, options: PipelineOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &Arc<dyn NutritionProvider> {
        &self.provider
    }

    /// Resolve meal text to rounded nutrient totals.
    pub async fn resolve(&self, meal_text: &str) -> Result<NutrientTotals> {
        self.resolve_detailed(meal_text).await.map(|r| r.totals)
    }

    /// Resolve meal text and report how the totals were obtained.
    pub async fn resolve_detailed(&self, meal_text: &str) -> Result<Resolution> {
        let start = Instant::now();
        let meal_text = meal_text.trim();

        if meal_text.is_empty() {
            return Err(Error::InvalidInput("Meal text cannot be empty".into()));
        }
        if !self.provider.is_configured() {
            return Err(Error::Config("Nutrition provider API key is not configured".into()));
        }

        if let Some(totals) = self.try_bulk(meal_text).await {
            let resolution = Resolution {
                totals: totals.rounded(),
                strategy: Strategy::Bulk,
                matched: 0,
                skipped: 0,
                duration_ms: start.elapsed().as_millis() as u64,
            };
            info!(
                "Resolved nutrition via bulk parse in {}ms",
                resolution.duration_ms
            );
            return Ok(resolution);
        }

        let (totals, matched, skipped) = self.resolve_sequential(meal_text).await;
        let strategy = if totals.has_data() {
            Strategy::Sequential
        } else {
            info!("No nutrition data found for meal");
            Strategy::NoData
        };

        let resolution = Resolution {
            totals: totals.rounded(),
            strategy,
            matched,
            skipped,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "Resolved nutrition via {} fallback: matched={}, skipped={}, duration={}ms",
            strategy, matched, skipped, resolution.duration_ms
        );
        Ok(resolution)
    }

    /// Bulk parse. `None` means "fall back": error, empty, or all-zero.
    async fn try_bulk(&self, meal_text: &str) -> Option<NutrientTotals> {
        let parsed = match self
            .provider
            .parse_ingredients(meal_text, self.options.servings)
            .await
        {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Bulk ingredient parse failed, falling back: {}", e);
                return None;
            }
        };

        if parsed.is_empty() {
            debug!("Bulk parse returned no ingredients, falling back");
            return None;
        }

        let totals: NutrientTotals = parsed.iter().map(|p| extract(&p.nutrients)).sum();
        if totals.is_zero() {
            debug!(
                "Bulk parse returned {} ingredients with no nutrients, falling back",
                parsed.len()
            );
            return None;
        }

        Some(totals)
    }

    /// Per-fragment search then lookup. Returns (totals, matched, skipped).
    async fn resolve_sequential(&self, meal_text: &str) -> (NutrientTotals, usize, usize) {
        let mut totals = NutrientTotals::zero();
        let mut matched = 0;
        let mut skipped = 0;

        for fragment in split_meal_text(meal_text) {
            let parsed = quantity::parse(fragment);
            let grams = match parsed.amount_grams {
                Some(g) if g > 0.0 => g,
                _ => self.options.default_grams,
            };

            let ingredient = match self.provider.search_ingredient(&parsed.name).await {
                Ok(Some(m)) => m,
                Ok(None) => {
                    warn!("No ingredient match for '{}', skipping", parsed.name);
                    skipped += 1;
                    continue;
                }
                Err(e) => {
                    warn!("Ingredient search failed for '{}': {}", parsed.name, e);
                    skipped += 1;
                    continue;
                }
            };

            let nutrients = match self.provider.ingredient_info(ingredient.id, grams).await {
                Ok(nutrients) => nutrients,
                Err(e) => {
                    warn!(
                        "Ingredient info failed for '{}' (id {}): {}",
                        ingredient.name, ingredient.id, e
                    );
                    skipped += 1;
                    continue;
                }
            };

            debug!(
                "Matched '{}' -> '{}' ({}g)",
                parsed.name, ingredient.name, grams
            );
            totals += extract(&nutrients);
            matched += 1;

            if !self.options.pacing.is_zero() {
                tokio::time::sleep(self.options.pacing).await;
            }
        }

        (totals, matched, skipped)
    }
}

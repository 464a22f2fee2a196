//! Free-text ingredient quantity parsing.
//!
//! Turns fragments like "2 cups spinach" or "1/2 cup rice" into a mass in
//! grams plus a normalized ingredient name. Volume units use fixed
//! gram-equivalents (`ml` is taken as 1:1), so results are approximate.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const GRAMS_PER_KG: f64 = 1000.0;
pub const GRAMS_PER_TBSP: f64 = 15.0;
pub const GRAMS_PER_TSP: f64 = 5.0;
pub const GRAMS_PER_CUP: f64 = 240.0;

/// Result of parsing one ingredient fragment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedQuantity {
    /// Mass in grams, `None` when no number was recognized.
    pub amount_grams: Option<f64>,
    /// Lowercase ingredient name.
    pub name: String,
}

// <number-or-fraction> <unit>? <rest>. Fractions come first so "1/2" is not read as "1".
// Only the spoon abbreviations may carry a trailing period ("2 tsp. sugar").
static UNIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d+/\d+|\d+(?:\.\d+)?) ?(?:(grams|gram|g|kilogram|kg|ml|cups|cup)\b|(tbsp|tsp)\b\.?)? ?(.*)$",
    )
    .unwrap()
});
static SIMPLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(?:\.\d+)?) (.+)$").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static FRAGMENT_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\n]+").unwrap());

/// Parse a single ingredient fragment. Never fails; unknown input keeps the
/// whole normalized fragment as the name.
pub fn parse(fragment: &str) -> ParsedQuantity {
    let normalized = normalize(fragment);

    if let Some(caps) = UNIT_RE.captures(&normalized) {
        let rest = caps.get(4).map(|m| m.as_str().trim()).unwrap_or("");
        let name = if rest.is_empty() {
            normalized.clone()
        } else {
            rest.to_string()
        };

        if let Some(quantity) = parse_number(&caps[1]) {
            let amount = match caps.get(2).or_else(|| caps.get(3)) {
                Some(unit) => to_grams(quantity, unit.as_str()),
                None => quantity,
            };
            return ParsedQuantity {
                amount_grams: Some(amount),
                name,
            };
        }
    }

    if let Some(caps) = SIMPLE_RE.captures(&normalized) {
        if let Ok(quantity) = caps[1].parse::<f64>() {
            return ParsedQuantity {
                amount_grams: Some(quantity),
                name: caps[2].trim().to_string(),
            };
        }
    }

    ParsedQuantity {
        amount_grams: None,
        name: normalized,
    }
}

/// Split raw meal text into trimmed, non-empty ingredient fragments.
pub fn split_meal_text(meal_text: &str) -> Vec<&str> {
    FRAGMENT_SPLIT_RE
        .split(meal_text)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect()
}

fn normalize(fragment: &str) -> String {
    WHITESPACE_RE
        .replace_all(fragment.trim(), " ")
        .to_lowercase()
}

/// Decimal or `a/b` fraction. Zero denominators yield `None`.
fn parse_number(raw: &str) -> Option<f64> {
    match raw.split_once('/') {
        Some((num, den)) => {
            let num: f64 = num.parse().ok()?;
            let den: f64 = den.parse().ok()?;
            if den == 0.0 {
                None
            } else {
                Some(num / den)
            }
        }
        None => raw.parse().ok(),
    }
}

fn to_grams(quantity: f64, unit: &str) -> f64 {
    match unit {
        "kg" | "kilogram" => quantity * GRAMS_PER_KG,
        "tbsp" => quantity * GRAMS_PER_TBSP,
        "tsp" => quantity * GRAMS_PER_TSP,
        "cup" | "cups" => quantity * GRAMS_PER_CUP,
        // g, gram, grams, ml
        _ => quantity,
    }
}

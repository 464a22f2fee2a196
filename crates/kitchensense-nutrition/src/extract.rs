//! Nutrient extraction: classify provider nutrient names into buckets.

use serde_json::Value;

use crate::totals::{Bucket, NutrientTotals};
use crate::types::NutrientItem;

/// How a rule compares against a lowercased nutrient name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameMatch {
    Contains(&'static str),
    Exact(&'static str),
}

impl NameMatch {
    fn matches(&self, lowered: &str) -> bool {
        match self {
            NameMatch::Contains(needle) => lowered.contains(needle),
            NameMatch::Exact(expected) => lowered == *expected,
        }
    }
}

/// Classification rules, evaluated in order; the first match wins.
///
/// Fat is an exact match, so "Total Fat" or "Saturated Fat" land nowhere.
pub const RULES: &[(NameMatch, Bucket)] = &[
    (NameMatch::Contains("calories"), Bucket::Calories),
    (NameMatch::Contains("protein"), Bucket::ProteinG),
    (NameMatch::Contains("carbohydrates"), Bucket::CarbsG),
    (NameMatch::Exact("fat"), Bucket::FatG),
    (NameMatch::Contains("fiber"), Bucket::FiberG),
];

/// Bucket for a nutrient name, or `None` if no rule applies.
pub fn classify(name: &str) -> Option<Bucket> {
    let lowered = name.to_lowercase();
    RULES
        .iter()
        .find(|(rule, _)| rule.matches(&lowered))
        .map(|(_, bucket)| *bucket)
}

/// Sum a nutrient list into fresh totals. Unclassified items are ignored.
pub fn extract(items: &[NutrientItem]) -> NutrientTotals {
    let mut totals = NutrientTotals::zero();
    for item in items {
        if let Some(bucket) = classify(&item.name) {
            totals.add_to(bucket, usable_amount(item.amount));
        }
    }
    totals
}

/// Read `nutrition.nutrients` from a provider object.
///
/// Missing objects or arrays give an empty list; entries without a string
/// `name` are dropped; a missing or non-numeric `amount` becomes 0.
pub fn nutrients_from_json(value: &Value) -> Vec<NutrientItem> {
    let Some(nutrients) = value
        .get("nutrition")
        .and_then(|n| n.get("nutrients"))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    nutrients
        .iter()
        .filter_map(|n| {
            let name = n.get("name")?.as_str()?;
            let amount = n.get("amount").and_then(Value::as_f64).unwrap_or(0.0);
            Some(NutrientItem::new(name, amount))
        })
        .collect()
}

/// Negative and non-finite amounts count as 0.
fn usable_amount(amount: f64) -> f64 {
    if amount.is_finite() {
        amount.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fat_requires_exact_name() {
        let items = vec![
            NutrientItem::new("Calories", 200.0),
            NutrientItem::new("Protein", 10.0),
            NutrientItem::new("Total Fat", 0.0),
        ];
        let totals = extract(&items);
        assert_eq!(
            totals,
            NutrientTotals {
                calories: 200.0,
                protein_g: 10.0,
                carbs_g: 0.0,
                fat_g: 0.0,
                fiber_g: 0.0,
            }
        );
    }

    #[test]
    fn test_total_fat_with_amount_is_ignored() {
        let totals = extract(&[NutrientItem::new("Total Fat", 12.0), NutrientItem::new("FAT", 3.0)]);
        assert_eq!(totals.fat_g, 3.0);
    }

    #[test]
    fn test_substring_and_case_insensitive() {
        let items = vec![
            NutrientItem::new("Net Carbohydrates", 20.0),
            NutrientItem::new("Carbohydrates", 25.0),
            NutrientItem::new("Dietary FIBER", 4.0),
            NutrientItem::new("Sugar", 9.0),
        ];
        let totals = extract(&items);
        assert_eq!(totals.carbs_g, 45.0);
        assert_eq!(totals.fiber_g, 4.0);
        assert_eq!(totals.calories, 0.0);
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(classify("Calories from Protein"), Some(Bucket::Calories));
        assert_eq!(classify("Vitamin C"), None);
        assert_eq!(classify("Saturated Fat"), None);
    }

    #[test]
    fn test_negative_and_non_finite_amounts_count_as_zero() {
        let items = vec![
            NutrientItem::new("Protein", -4.0),
            NutrientItem::new("Calories", f64::NAN),
            NutrientItem::new("Calories", f64::INFINITY),
            NutrientItem::new("Calories", 50.0),
            NutrientItem::new("Fiber", -0.5),
        ];
        let totals = extract(&items);
        assert_eq!(totals.protein_g, 0.0);
        assert_eq!(totals.calories, 50.0);
        assert_eq!(totals.fiber_g, 0.0);
    }

    #[test]
    fn test_empty_items() {
        assert!(extract(&[]).is_zero());
    }

    #[test]
    fn test_nutrients_from_json() {
        let value = json!({
            "name": "spinach",
            "nutrition": {
                "nutrients": [
                    {"name": "Calories", "amount": 23, "unit": "kcal"},
                    {"name": "Protein", "amount": "lots"},
                    {"name": "Fiber"},
                    {"amount": 5.0},
                    {"name": "Fat", "amount": 0.4}
                ]
            }
        });
        let items = nutrients_from_json(&value);
        assert_eq!(
            items,
            vec![
                NutrientItem::new("Calories", 23.0),
                NutrientItem::new("Protein", 0.0),
                NutrientItem::new("Fiber", 0.0),
                NutrientItem::new("Fat", 0.4),
            ]
        );
    }

    #[test]
    fn test_nutrients_from_malformed_json() {
        assert!(nutrients_from_json(&json!({})).is_empty());
        assert!(nutrients_from_json(&json!({"nutrition": null})).is_empty());
        assert!(nutrients_from_json(&json!({"nutrition": {"nutrients": "none"}})).is_empty());
        assert!(nutrients_from_json(&json!([1, 2, 3])).is_empty());
    }
}

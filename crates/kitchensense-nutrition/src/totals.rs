//! Canonical five-bucket nutrient totals and their aggregation.

use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Accumulated nutrients for a meal. All five buckets are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutrientTotals {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub fiber_g: f64,
}

/// One of the five nutrient buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Calories,
    ProteinG,
    CarbsG,
    FatG,
    FiberG,
}

impl NutrientTotals {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Key-wise sum of two totals.
    pub fn merge(self, other: Self) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein_g: self.protein_g + other.protein_g,
            carbs_g: self.carbs_g + other.carbs_g,
            fat_g: self.fat_g + other.fat_g,
            fiber_g: self.fiber_g + other.fiber_g,
        }
    }

    /// Add an amount to a single bucket.
    pub fn add_to(&mut self, bucket: Bucket, amount: f64) {
        *self.bucket_mut(bucket) += amount;
    }

    pub fn get(&self, bucket: Bucket) -> f64 {
        match bucket {
            Bucket::Calories => self.calories,
            Bucket::ProteinG => self.protein_g,
            Bucket::CarbsG => self.carbs_g,
            Bucket::FatG => self.fat_g,
            Bucket::FiberG => self.fiber_g,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut f64 {
        match bucket {
            Bucket::Calories => &mut self.calories,
            Bucket::ProteinG => &mut self.protein_g,
            Bucket::CarbsG => &mut self.carbs_g,
            Bucket::FatG => &mut self.fat_g,
            Bucket::FiberG => &mut self.fiber_g,
        }
    }

    /// True when at least one bucket is non-zero.
    pub fn has_data(&self) -> bool {
        !self.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.calories == 0.0
            && self.protein_g == 0.0
            && self.carbs_g == 0.0
            && self.fat_g == 0.0
            && self.fiber_g == 0.0
    }

    /// Copy with every bucket rounded to one decimal place.
    pub fn rounded(&self) -> Self {
        Self {
            calories: round1(self.calories),
            protein_g: round1(self.protein_g),
            carbs_g: round1(self.carbs_g),
            fat_g: round1(self.fat_g),
            fiber_g: round1(self.fiber_g),
        }
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl Add for NutrientTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.merge(rhs)
    }
}

impl AddAssign for NutrientTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.merge(rhs);
    }
}

impl Sum for NutrientTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Self::merge)
    }
}

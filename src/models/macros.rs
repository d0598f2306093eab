//! Macro-nutrient profile
//!
//! Shared by catalog entries, scaled ingredients, and recipe totals.

use serde::{Deserialize, Serialize};

/// Macro-nutrient content of a quantity of food
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroProfile {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
}

impl MacroProfile {
    /// Create a new profile with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn new(calories: f64, protein: f64, carbs: f64, fat: f64) -> Self {
        Self {
            calories,
            protein,
            carbs,
            fat,
        }
    }

    /// Scale every value by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
        }
    }

    /// Add another profile to this one
    pub fn add(&self, other: &MacroProfile) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
        }
    }

    /// True when every value is finite and non-negative
    pub fn is_valid(&self) -> bool {
        [self.calories, self.protein, self.carbs, self.fat]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }

    /// Largest absolute difference across the four values
    pub fn max_abs_diff(&self, other: &MacroProfile) -> f64 {
        [
            self.calories - other.calories,
            self.protein - other.protein,
            self.carbs - other.carbs,
            self.fat - other.fat,
        ]
        .iter()
        .fold(0.0_f64, |acc, d| acc.max(d.abs()))
    }
}

impl std::ops::Add for MacroProfile {
    type Output = MacroProfile;

    fn add(self, other: MacroProfile) -> MacroProfile {
        MacroProfile::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for MacroProfile {
    type Output = MacroProfile;

    fn mul(self, multiplier: f64) -> MacroProfile {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for MacroProfile {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(MacroProfile::zero(), |acc, m| acc + m)
    }
}

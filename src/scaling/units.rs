//! Unit and category types
//!
//! Reference data attached to every catalog ingredient. Both enums are
//! keys into the smart rounding policy.

use serde::{Deserialize, Serialize};

/// How an ingredient is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientUnit {
    /// Whole items (a cucumber, a chicken breast) - never shown fractionally
    Whole,
    /// Volume measures (cups, tbsp)
    Volume,
    /// Weight measures (g, oz)
    Weight,
    /// Countable portions that may be split (a medium tomato, a squeeze)
    Count,
}

impl IngredientUnit {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "whole" => Some(IngredientUnit::Whole),
            "volume" => Some(IngredientUnit::Volume),
            "weight" => Some(IngredientUnit::Weight),
            "count" => Some(IngredientUnit::Count),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientUnit::Whole => "whole",
            IngredientUnit::Volume => "volume",
            IngredientUnit::Weight => "weight",
            IngredientUnit::Count => "count",
        }
    }
}

/// Culinary role of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Protein,
    Vegetable,
    Fruit,
    Grain,
    Dairy,
    Fat,
    Acid,
    Seasoning,
    Other,
}

impl IngredientCategory {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "protein" => Some(IngredientCategory::Protein),
            "vegetable" => Some(IngredientCategory::Vegetable),
            "fruit" => Some(IngredientCategory::Fruit),
            "grain" => Some(IngredientCategory::Grain),
            "dairy" => Some(IngredientCategory::Dairy),
            "fat" => Some(IngredientCategory::Fat),
            "acid" => Some(IngredientCategory::Acid),
            "seasoning" => Some(IngredientCategory::Seasoning),
            "other" => Some(IngredientCategory::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientCategory::Protein => "protein",
            IngredientCategory::Vegetable => "vegetable",
            IngredientCategory::Fruit => "fruit",
            IngredientCategory::Grain => "grain",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Fat => "fat",
            IngredientCategory::Acid => "acid",
            IngredientCategory::Seasoning => "seasoning",
            IngredientCategory::Other => "other",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_from_str() {
        assert_eq!(IngredientUnit::from_str("whole"), Some(IngredientUnit::Whole));
        assert_eq!(IngredientUnit::from_str(" Volume "), Some(IngredientUnit::Volume));
        assert_eq!(IngredientUnit::from_str("cups"), None);
    }

    #[test]
    fn test_category_round_trips_through_as_str() {
        for category in [
            IngredientCategory::Protein,
            IngredientCategory::Vegetable,
            IngredientCategory::Fat,
            IngredientCategory::Acid,
            IngredientCategory::Other,
        ] {
            assert_eq!(IngredientCategory::from_str(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&IngredientUnit::Whole).unwrap();
        assert_eq!(json, "\"whole\"");
        let parsed: IngredientCategory = serde_json::from_str("\"protein\"").unwrap();
        assert_eq!(parsed, IngredientCategory::Protein);
    }
}

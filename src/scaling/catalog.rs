//! Ingredient catalog
//!
//! Static reference data: ingredient specs, the display table used by the
//! landing page, and the named base recipes. Loaded once at startup from
//! JSON embedded in the binary and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::{ScaleError, ScaleResult};
use super::units::{IngredientCategory, IngredientUnit};
use crate::models::MacroProfile;

/// Catalog JSON compiled into the binary
pub const EMBEDDED_CATALOG: &str = include_str!("catalog.json");

/// Catalog loading error types
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog entry '{id}': {reason}")]
    InvalidEntry { id: String, reason: String },
}

/// Reference definition of one ingredient at its base (unscaled) amount
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientSpec {
    /// Human display name (e.g., "chicken breasts")
    pub name: String,
    pub base_quantity: f64,
    pub base_weight_grams: f64,
    pub unit: IngredientUnit,
    /// Unit as shown to the reader (e.g., "cups", "tbsp", "medium")
    pub unit_label: String,
    pub category: IngredientCategory,
    /// Macros contained in the base quantity
    #[serde(default)]
    pub macros: MacroProfile,
}

/// Row of the landing-page ingredient table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayIngredient {
    pub name: String,
    pub key: String,
    /// Which rounding policy the row demonstrates
    pub note: String,
}

/// A named base recipe built from catalog ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDefinition {
    pub id: String,
    pub title: String,
    pub servings: f64,
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    ingredients: BTreeMap<String, IngredientSpec>,
    #[serde(default)]
    display: Vec<DisplayIngredient>,
    #[serde(default)]
    recipes: Vec<RecipeDefinition>,
}

/// Immutable mapping from ingredient id to its spec
#[derive(Debug, Clone)]
pub struct Catalog {
    ingredients: BTreeMap<String, IngredientSpec>,
    display: Vec<DisplayIngredient>,
    recipes: Vec<RecipeDefinition>,
}

impl Catalog {
    /// Load the catalog compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Parse and validate a catalog document
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let catalog = Self {
            ingredients: file.ingredients,
            display: file.display,
            recipes: file.recipes,
        };
        catalog.validate()?;

        tracing::debug!(
            ingredients = catalog.ingredients.len(),
            recipes = catalog.recipes.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let invalid = |id: &str, reason: &str| CatalogError::InvalidEntry {
            id: id.to_string(),
            reason: reason.to_string(),
        };

        for (id, spec) in &self.ingredients {
            if !(spec.base_quantity.is_finite() && spec.base_quantity > 0.0) {
                return Err(invalid(id, "base_quantity must be greater than 0"));
            }
            if !(spec.base_weight_grams.is_finite() && spec.base_weight_grams > 0.0) {
                return Err(invalid(id, "base_weight_grams must be greater than 0"));
            }
            if !spec.macros.is_valid() {
                return Err(invalid(id, "macros must be finite and non-negative"));
            }
        }

        for row in &self.display {
            if !self.ingredients.contains_key(&row.key) {
                return Err(invalid(&row.key, "display row references unknown ingredient"));
            }
        }

        for recipe in &self.recipes {
            if !(recipe.servings.is_finite() && recipe.servings > 0.0) {
                return Err(invalid(&recipe.id, "recipe servings must be greater than 0"));
            }
            if let Some(missing) = recipe
                .ingredients
                .iter()
                .find(|id| !self.ingredients.contains_key(id.as_str()))
            {
                return Err(invalid(
                    &recipe.id,
                    &format!("recipe references unknown ingredient '{}'", missing),
                ));
            }
        }

        Ok(())
    }

    /// Look up an ingredient spec by id
    pub fn lookup(&self, id: &str) -> ScaleResult<&IngredientSpec> {
        self.ingredients
            .get(id)
            .ok_or_else(|| ScaleError::UnknownIngredient(id.to_string()))
    }

    /// All ingredients, ordered by id
    pub fn ingredients(&self) -> impl Iterator<Item = (&str, &IngredientSpec)> {
        self.ingredients.iter().map(|(id, spec)| (id.as_str(), spec))
    }

    pub fn len(&self) -> usize {
        self.ingredients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    pub fn display_ingredients(&self) -> &[DisplayIngredient] {
        &self.display
    }

    pub fn recipes(&self) -> &[RecipeDefinition] {
        &self.recipes
    }

    /// Find a named recipe by id
    pub fn recipe(&self, id: &str) -> Option<&RecipeDefinition> {
        self.recipes.iter().find(|r| r.id == id)
    }
}

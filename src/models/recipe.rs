//! Recipe models
//!
//! Scaling input (`BaseRecipe`) and output (`RecipeResult`) types.

use serde::{Deserialize, Serialize};

use super::MacroProfile;
use crate::scaling::{Catalog, RecipeDefinition, ScaleResult};

/// One line of a base recipe
///
/// Quantity, weight and macros fall back to the catalog entry when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseIngredient {
    pub id: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub weight_grams: Option<f64>,
    /// Macros contained in `quantity` of the ingredient
    #[serde(default)]
    pub macros: Option<MacroProfile>,
}

impl BaseIngredient {
    /// A line that takes everything from the catalog
    pub fn from_catalog(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            quantity: None,
            weight_grams: None,
            macros: None,
        }
    }
}

/// Ingredient list and serving count at which quantities are defined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseRecipe {
    #[serde(default)]
    pub title: Option<String>,
    pub servings: f64,
    pub ingredients: Vec<BaseIngredient>,
}

impl BaseRecipe {
    /// Build a base recipe from a named catalog recipe
    ///
    /// Fails with `UnknownIngredient` if the definition names an id the
    /// catalog does not hold.
    pub fn from_definition(catalog: &Catalog, definition: &RecipeDefinition) -> ScaleResult<Self> {
        let ingredients = definition
            .ingredients
            .iter()
            .map(|id| catalog.lookup(id).map(|_| BaseIngredient::from_catalog(id.as_str())))
            .collect::<ScaleResult<Vec<_>>>()?;

        Ok(Self {
            title: Some(definition.title.clone()),
            servings: definition.servings,
            ingredients,
        })
    }
}

/// One ingredient after scaling, rounding and formatting
///
/// `scaled_quantity` is the raw value; `display_quantity` is its rounded
/// copy and `formatted_quantity` is rendered from that copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScaledIngredient {
    pub id: String,
    pub display_name: String,
    pub unit_label: String,
    pub scaled_quantity: f64,
    pub display_quantity: f64,
    pub formatted_quantity: String,
    pub scaled_weight_grams: f64,
    pub formatted_weight: String,
    pub macros: MacroProfile,
}

/// A full scaled recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub servings: f64,
    pub scale_factor: f64,
    pub ingredients: Vec<ScaledIngredient>,
    /// Sum of the unrounded per-ingredient macros
    pub totals: MacroProfile,
}

//! Recipe scaling tools
//!
//! Catalog browsing and scaling entry points exposed over MCP.

use serde::Serialize;
use thiserror::Error;

use crate::models::{BaseIngredient, BaseRecipe, MacroProfile, RecipeResult};
use crate::scaling::{
    format_quantity as format_display, scale_recipe as scale_base_recipe, smart_round, Catalog,
    DisplayIngredient, IngredientCategory, IngredientUnit, ScaleError,
};

/// Errors from the scaling tools
#[derive(Debug, Error)]
pub enum ScaleToolError {
    #[error("Recipe not found: '{0}'")]
    RecipeNotFound(String),

    #[error("Either recipe_id or ingredients must be provided")]
    MissingRecipe,

    #[error("Unknown unit '{0}' (expected whole, volume, weight or count)")]
    UnknownUnit(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(String),

    #[error(transparent)]
    Scale(#[from] ScaleError),
}

impl ScaleToolError {
    /// Stable machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            ScaleToolError::RecipeNotFound(_) => "recipe_not_found",
            ScaleToolError::MissingRecipe => "missing_recipe",
            ScaleToolError::UnknownUnit(_) => "unknown_unit",
            ScaleToolError::UnknownCategory(_) => "unknown_category",
            ScaleToolError::Scale(ScaleError::InvalidServings(_)) => "invalid_servings",
            ScaleToolError::Scale(ScaleError::UnknownIngredient(_)) => "unknown_ingredient",
            ScaleToolError::Scale(ScaleError::InvalidQuantity(_)) => "invalid_quantity",
        }
    }
}

/// Error payload returned to the client
#[derive(Debug, Serialize)]
pub struct ScaleErrorResponse {
    pub error: String,
    pub kind: &'static str,
}

impl From<&ScaleToolError> for ScaleErrorResponse {
    fn from(err: &ScaleToolError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

/// Catalog ingredient summary
#[derive(Debug, Serialize)]
pub struct IngredientSummary {
    pub id: String,
    pub name: String,
    pub base_quantity: f64,
    pub base_weight_grams: f64,
    pub unit: IngredientUnit,
    pub unit_label: String,
    pub category: IngredientCategory,
    pub macros: MacroProfile,
}

/// Response for list_ingredients
#[derive(Debug, Serialize)]
pub struct ListIngredientsResponse {
    pub ingredients: Vec<IngredientSummary>,
    pub count: usize,
}

/// Recipe summary for listing
#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: String,
    pub title: String,
    pub servings: f64,
    pub ingredient_count: usize,
    pub instructions: Vec<String>,
}

/// Response for list_recipes
#[derive(Debug, Serialize)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
    pub count: usize,
}

/// Response for format_quantity
#[derive(Debug, Serialize)]
pub struct FormatQuantityResponse {
    pub quantity: f64,
    pub display_quantity: f64,
    pub formatted: String,
}

/// What to scale: a named catalog recipe or explicit lines
#[derive(Debug, Clone, Default)]
pub struct ScaleRequest {
    pub recipe_id: Option<String>,
    pub base_servings: Option<f64>,
    pub ingredients: Option<Vec<BaseIngredient>>,
    pub target_servings: f64,
}

pub fn list_ingredients(catalog: &Catalog) -> ListIngredientsResponse {
    let ingredients: Vec<IngredientSummary> = catalog
        .ingredients()
        .map(|(id, spec)| IngredientSummary {
            id: id.to_string(),
            name: spec.name.clone(),
            base_quantity: spec.base_quantity,
            base_weight_grams: spec.base_weight_grams,
            unit: spec.unit,
            unit_label: spec.unit_label.clone(),
            category: spec.category,
            macros: spec.macros,
        })
        .collect();

    ListIngredientsResponse {
        count: ingredients.len(),
        ingredients,
    }
}

pub fn list_display_ingredients(catalog: &Catalog) -> Vec<DisplayIngredient> {
    catalog.display_ingredients().to_vec()
}

pub fn list_recipes(catalog: &Catalog) -> ListRecipesResponse {
    let recipes: Vec<RecipeSummary> = catalog
        .recipes()
        .iter()
        .map(|r| RecipeSummary {
            id: r.id.clone(),
            title: r.title.clone(),
            servings: r.servings,
            ingredient_count: r.ingredients.len(),
            instructions: r.instructions.clone(),
        })
        .collect();

    ListRecipesResponse {
        count: recipes.len(),
        recipes,
    }
}

/// Resolve a request into the base recipe it names
///
/// Explicit lines win over a recipe id. With a recipe id, `base_servings`
/// overrides the recipe's own serving count.
fn resolve_base_recipe(catalog: &Catalog, request: &ScaleRequest) -> Result<BaseRecipe, ScaleToolError> {
    if let Some(lines) = &request.ingredients {
        return Ok(BaseRecipe {
            title: None,
            servings: request.base_servings.unwrap_or(1.0),
            ingredients: lines.clone(),
        });
    }

    let recipe_id = request.recipe_id.as_deref().ok_or(ScaleToolError::MissingRecipe)?;
    let definition = catalog
        .recipe(recipe_id)
        .ok_or_else(|| ScaleToolError::RecipeNotFound(recipe_id.to_string()))?;

    let mut recipe = BaseRecipe::from_definition(catalog, definition)?;
    if let Some(servings) = request.base_servings {
        recipe.servings = servings;
    }
    Ok(recipe)
}

/// Scale a catalog recipe or an explicit ingredient list
pub fn scale_recipe(catalog: &Catalog, request: &ScaleRequest) -> Result<RecipeResult, ScaleToolError> {
    let recipe = resolve_base_recipe(catalog, request)?;
    Ok(scale_base_recipe(catalog, &recipe, request.target_servings)?)
}

/// Round (when unit and category are given) and format a quantity
pub fn format_quantity(
    quantity: f64,
    unit: Option<&str>,
    category: Option<&str>,
) -> Result<FormatQuantityResponse, ScaleToolError> {
    let display_quantity = match (unit, category) {
        (Some(unit), Some(category)) => {
            let unit = IngredientUnit::from_str(unit)
                .ok_or_else(|| ScaleToolError::UnknownUnit(unit.to_string()))?;
            let category = IngredientCategory::from_str(category)
                .ok_or_else(|| ScaleToolError::UnknownCategory(category.to_string()))?;
            smart_round(quantity, unit, category)
        }
        _ => quantity,
    };

    Ok(FormatQuantityResponse {
        quantity,
        display_quantity,
        formatted: format_display(display_quantity)?,
    })
}

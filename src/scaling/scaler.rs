//! Recipe scaling
//!
//! Composes catalog lookup, linear scaling, smart rounding and fraction
//! formatting into one all-or-nothing transform.

use super::catalog::{Catalog, IngredientSpec};
use super::error::{ScaleError, ScaleResult};
use super::format::{format_quantity, format_weight};
use super::rounding::smart_round;
use crate::models::{BaseIngredient, BaseRecipe, MacroProfile, RecipeResult, ScaledIngredient};

/// Ratio between target and base servings
///
/// Both counts must be finite and greater than zero.
pub fn scale_factor(base_servings: f64, target_servings: f64) -> ScaleResult<f64> {
    for servings in [base_servings, target_servings] {
        if !servings.is_finite() || servings <= 0.0 {
            return Err(ScaleError::InvalidServings(servings));
        }
    }
    Ok(target_servings / base_servings)
}

/// Scale a base recipe to `target_servings`
///
/// Quantities, weights and macros are all multiplied by the same factor.
/// Totals are summed from the unrounded per-ingredient macros, so display
/// rounding never reaches them. Any invalid line fails the whole call.
pub fn scale_recipe(
    catalog: &Catalog,
    recipe: &BaseRecipe,
    target_servings: f64,
) -> ScaleResult<RecipeResult> {
    let factor = scale_factor(recipe.servings, target_servings)?;

    let ingredients = recipe
        .ingredients
        .iter()
        .map(|line| scale_ingredient(catalog, line, factor))
        .collect::<ScaleResult<Vec<_>>>()?;

    let totals: MacroProfile = ingredients.iter().map(|i| i.macros).sum();

    tracing::debug!(
        base_servings = recipe.servings,
        target_servings,
        factor,
        ingredients = ingredients.len(),
        calories = totals.calories,
        "Scaled recipe"
    );

    Ok(RecipeResult {
        title: recipe.title.clone(),
        servings: target_servings,
        scale_factor: factor,
        ingredients,
        totals,
    })
}

/// Scale a single recipe line by an already validated factor
pub fn scale_ingredient(
    catalog: &Catalog,
    line: &BaseIngredient,
    factor: f64,
) -> ScaleResult<ScaledIngredient> {
    let spec = catalog.lookup(&line.id)?;
    let base = resolve_line(spec, line)?;

    let scaled_quantity = base.quantity * factor;
    let scaled_weight_grams = base.weight_grams * factor;
    let macros = base.macros.scale(factor);

    let display_quantity = smart_round(scaled_quantity, spec.unit, spec.category);
    let formatted_quantity = format_quantity(display_quantity)?;
    let formatted_weight = format_weight(scaled_weight_grams)?;

    tracing::debug!(
        id = %line.id,
        scaled_quantity,
        display_quantity,
        formatted = %formatted_quantity,
        "Scaled ingredient"
    );

    Ok(ScaledIngredient {
        id: line.id.clone(),
        display_name: spec.name.clone(),
        unit_label: spec.unit_label.clone(),
        scaled_quantity,
        display_quantity,
        formatted_quantity,
        scaled_weight_grams,
        formatted_weight,
        macros,
    })
}

/// Base amounts of one line after catalog fallback
#[derive(Debug, Clone, Copy)]
struct ResolvedLine {
    quantity: f64,
    weight_grams: f64,
    macros: MacroProfile,
}

/// Fill missing line values from the catalog spec
///
/// When only the quantity is overridden, weight and macros follow it
/// proportionally from the spec's base amount.
fn resolve_line(spec: &IngredientSpec, line: &BaseIngredient) -> ScaleResult<ResolvedLine> {
    let quantity = check_amount(line.quantity.unwrap_or(spec.base_quantity))?;
    let ratio = quantity / spec.base_quantity;

    let weight_grams = match line.weight_grams {
        Some(grams) => check_amount(grams)?,
        None => spec.base_weight_grams * ratio,
    };

    let macros = match line.macros {
        Some(macros) => {
            for value in [macros.calories, macros.protein, macros.carbs, macros.fat] {
                check_amount(value)?;
            }
            macros
        }
        None => spec.macros.scale(ratio),
    };

    Ok(ResolvedLine {
        quantity,
        weight_grams,
        macros,
    })
}

fn check_amount(value: f64) -> ScaleResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ScaleError::InvalidQuantity(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    fn salad(catalog: &Catalog) -> BaseRecipe {
        let definition = catalog.recipe("mediterranean-chicken-salad").unwrap();
        BaseRecipe::from_definition(catalog, definition).unwrap()
    }

    fn single(id: &str) -> BaseRecipe {
        BaseRecipe {
            title: None,
            servings: 2.0,
            ingredients: vec![BaseIngredient::from_catalog(id)],
        }
    }

    #[test]
    fn test_scale_factor() {
        assert_eq!(scale_factor(2.0, 3.0).unwrap(), 1.5);
        assert_eq!(scale_factor(4.0, 1.0).unwrap(), 0.25);
    }

    #[test]
    fn test_scale_factor_rejects_invalid_servings() {
        assert_eq!(scale_factor(2.0, 0.0), Err(ScaleError::InvalidServings(0.0)));
        assert_eq!(scale_factor(2.0, -1.0), Err(ScaleError::InvalidServings(-1.0)));
        assert_eq!(scale_factor(0.0, 2.0), Err(ScaleError::InvalidServings(0.0)));
        assert!(scale_factor(2.0, f64::NAN).is_err());
        assert!(scale_factor(f64::INFINITY, 2.0).is_err());
    }

    #[test]
    fn test_chicken_breast_scenario() {
        let catalog = catalog();
        let result = scale_recipe(&catalog, &single("chicken-breast"), 3.0).unwrap();

        assert_eq!(result.scale_factor, 1.5);
        let chicken = &result.ingredients[0];
        assert!((chicken.scaled_quantity - 3.0).abs() < TOLERANCE);
        assert_eq!(chicken.display_quantity, 3.0);
        assert_eq!(chicken.formatted_quantity, "3");
        assert!((chicken.scaled_weight_grams - 600.0).abs() < TOLERANCE);
        assert_eq!(chicken.formatted_weight, "600g");
        assert_eq!(chicken.display_name, "chicken breasts");
    }

    #[test]
    fn test_totals_equal_sum_of_ingredient_macros() {
        let catalog = catalog();
        let result = scale_recipe(&catalog, &salad(&catalog), 5.0).unwrap();
        let summed: MacroProfile = result.ingredients.iter().map(|i| i.macros).sum();
        assert!(result.totals.max_abs_diff(&summed) < TOLERANCE);
    }

    #[test]
    fn test_totals_scale_linearly() {
        let catalog = catalog();
        let recipe = salad(&catalog);
        let base = scale_recipe(&catalog, &recipe, 3.0).unwrap();

        for k in [0.5, 2.0, 7.0 / 3.0, 10.0] {
            let scaled = scale_recipe(&catalog, &recipe, 3.0 * k).unwrap();
            let expected = base.totals * k;
            assert!(
                scaled.totals.max_abs_diff(&expected) < 1e-6,
                "k = {}: {:?} vs {:?}",
                k,
                scaled.totals,
                expected
            );
        }
    }

    #[test]
    fn test_rounding_does_not_leak_into_totals() {
        let catalog = catalog();
        // Half a cucumber per 2 servings, scaled to 3: raw 0.75, shown as 1
        let result = scale_recipe(&catalog, &single("cucumber"), 3.0).unwrap();
        let cucumber = &result.ingredients[0];
        assert_eq!(cucumber.display_quantity, 1.0);
        assert!((cucumber.scaled_quantity - 0.75).abs() < TOLERANCE);

        let spec = catalog.lookup("cucumber").unwrap();
        let per_unit = spec.macros.scale(1.0 / spec.base_quantity);
        let naive = per_unit * cucumber.display_quantity;
        let exact = per_unit * cucumber.scaled_quantity;

        assert!(result.totals.max_abs_diff(&exact) < TOLERANCE);
        assert!(result.totals.max_abs_diff(&naive) > 1.0);
    }

    #[test]
    fn test_salad_formatting_at_three_servings() {
        let catalog = catalog();
        let result = scale_recipe(&catalog, &salad(&catalog), 3.0).unwrap();
        let formatted: Vec<(&str, &str)> = result
            .ingredients
            .iter()
            .map(|i| (i.id.as_str(), i.formatted_quantity.as_str()))
            .collect();

        assert_eq!(
            formatted,
            [
                ("chicken-breast", "3"),
                ("mixed-greens", "6"),
                ("cucumber", "1"),
                ("tomato", "1 ½"),
                ("red-onion", ""),
                ("olive-oil", "3"),
                ("lemon-juice", "1 ½"),
            ]
        );
        assert_eq!(result.servings, 3.0);
    }

    #[test]
    fn test_small_amounts_use_eighths() {
        let catalog = catalog();
        // 2 tbsp oil for 2 servings scaled to 1/2 serving: 0.5 tbsp
        let result = scale_recipe(&catalog, &single("olive-oil"), 0.5).unwrap();
        assert_eq!(result.ingredients[0].formatted_quantity, "½");

        // 1 squeeze of lemon for 2 servings scaled to 1 serving
        let result = scale_recipe(&catalog, &single("lemon-juice"), 1.0).unwrap();
        assert_eq!(result.ingredients[0].formatted_quantity, "½");
    }

    #[test]
    fn test_unknown_ingredient_fails_whole_recipe() {
        let catalog = catalog();
        let mut recipe = salad(&catalog);
        recipe.ingredients.push(BaseIngredient::from_catalog("saffron"));

        assert_eq!(
            scale_recipe(&catalog, &recipe, 4.0),
            Err(ScaleError::UnknownIngredient("saffron".to_string()))
        );
    }

    #[test]
    fn test_invalid_servings_fail_before_ingredients() {
        let catalog = catalog();
        // An unknown id would fail too; servings must be checked first
        let recipe = single("saffron");
        assert_eq!(
            scale_recipe(&catalog, &recipe, 0.0),
            Err(ScaleError::InvalidServings(0.0))
        );
        assert_eq!(
            scale_recipe(&catalog, &recipe, -2.0),
            Err(ScaleError::InvalidServings(-2.0))
        );
    }

    #[test]
    fn test_quantity_override_carries_weight_and_macros() {
        let catalog = catalog();
        let recipe = BaseRecipe {
            title: None,
            servings: 2.0,
            ingredients: vec![BaseIngredient {
                id: "olive-oil".to_string(),
                quantity: Some(1.0),
                weight_grams: None,
                macros: None,
            }],
        };
        let result = scale_recipe(&catalog, &recipe, 2.0).unwrap();
        let oil = &result.ingredients[0];
        assert!((oil.scaled_weight_grams - 14.0).abs() < TOLERANCE);
        assert!((oil.macros.calories - 124.0).abs() < TOLERANCE);
        assert_eq!(oil.formatted_quantity, "1");
    }

    #[test]
    fn test_explicit_macros_are_used() {
        let catalog = catalog();
        let recipe = BaseRecipe {
            title: None,
            servings: 1.0,
            ingredients: vec![BaseIngredient {
                id: "tomato".to_string(),
                quantity: Some(1.0),
                weight_grams: Some(200.0),
                macros: Some(MacroProfile::new(40.0, 2.0, 8.0, 0.5)),
            }],
        };
        let result = scale_recipe(&catalog, &recipe, 2.0).unwrap();
        assert_eq!(result.totals, MacroProfile::new(80.0, 4.0, 16.0, 1.0));
        assert_eq!(result.ingredients[0].formatted_weight, "400g");
    }

    #[test]
    fn test_negative_line_quantity_is_rejected() {
        let catalog = catalog();
        let recipe = BaseRecipe {
            title: None,
            servings: 2.0,
            ingredients: vec![BaseIngredient {
                id: "tomato".to_string(),
                quantity: Some(-1.0),
                weight_grams: None,
                macros: None,
            }],
        };
        assert_eq!(
            scale_recipe(&catalog, &recipe, 2.0),
            Err(ScaleError::InvalidQuantity(-1.0))
        );
    }

    #[test]
    fn test_zero_quantity_is_kept_with_empty_string() {
        let catalog = catalog();
        let recipe = BaseRecipe {
            title: None,
            servings: 2.0,
            ingredients: vec![BaseIngredient {
                id: "lemon-juice".to_string(),
                quantity: Some(0.0),
                weight_grams: None,
                macros: None,
            }],
        };
        let result = scale_recipe(&catalog, &recipe, 4.0).unwrap();
        assert_eq!(result.ingredients.len(), 1);
        assert_eq!(result.ingredients[0].formatted_quantity, "");
        assert_eq!(result.totals, MacroProfile::zero());
    }

    #[test]
    fn test_scaling_is_deterministic() {
        let catalog = catalog();
        let recipe = salad(&catalog);
        let first = scale_recipe(&catalog, &recipe, 7.0).unwrap();
        let second = scale_recipe(&catalog, &recipe, 7.0).unwrap();
        assert_eq!(first, second);
    }
}

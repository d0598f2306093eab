//! Utility to print the landing-page recipe scaled to a serving count
//!
//! Usage: scale_demo [servings] [recipe_id]

use servings::models::BaseRecipe;
use servings::scaling::{scale_recipe, Catalog};

const DEFAULT_RECIPE: &str = "mediterranean-chicken-salad";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let target: f64 = match args.next() {
        Some(s) => s.parse().map_err(|_| format!("Invalid servings: '{}'", s))?,
        None => 4.0,
    };
    let recipe_id = args.next().unwrap_or_else(|| DEFAULT_RECIPE.to_string());

    let catalog = Catalog::embedded()?;
    let definition = catalog
        .recipe(&recipe_id)
        .ok_or_else(|| format!("Recipe not found: '{}'", recipe_id))?;
    let base = BaseRecipe::from_definition(&catalog, definition)?;
    let result = scale_recipe(&catalog, &base, target)?;

    println!("{} ({} -> {} servings)", definition.title, base.servings, result.servings);
    for ingredient in &result.ingredients {
        if ingredient.formatted_quantity.is_empty() {
            println!("  -      {} (under one, {})", ingredient.display_name, ingredient.formatted_weight);
            continue;
        }
        println!(
            "  {:<6} {} {} ({})",
            ingredient.formatted_quantity,
            ingredient.unit_label,
            ingredient.display_name,
            ingredient.formatted_weight
        );
    }
    println!(
        "Totals: {:.0} kcal | {:.1}g protein | {:.1}g carbs | {:.1}g fat",
        result.totals.calories, result.totals.protein, result.totals.carbs, result.totals.fat
    );

    Ok(())
}

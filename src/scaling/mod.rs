//! Recipe scaling engine
//!
//! Pure, synchronous transform from a base recipe and a target serving
//! count to a scaled, rounded and formatted ingredient list with macro
//! totals. The catalog is the only shared input and is read-only.

pub mod catalog;
pub mod error;
pub mod format;
pub mod rounding;
pub mod scaler;
pub mod units;

pub use catalog::{Catalog, CatalogError, DisplayIngredient, IngredientSpec, RecipeDefinition};
pub use error::{ScaleError, ScaleResult};
pub use format::{format_quantity, format_weight};
pub use rounding::smart_round;
pub use scaler::{scale_factor, scale_ingredient, scale_recipe};
pub use units::{IngredientCategory, IngredientUnit};

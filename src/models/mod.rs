//! Data models
//!
//! Scaling input/output entities and the subscriber record.

mod macros;
mod recipe;
mod subscriber;

pub use macros::MacroProfile;
pub use recipe::{BaseIngredient, BaseRecipe, RecipeResult, ScaledIngredient};
pub use subscriber::Subscriber;

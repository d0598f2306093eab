//! Scaling error types

use thiserror::Error;

/// Errors that abort a scaling call
///
/// A call that returns one of these produced no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScaleError {
    /// A serving count was zero, negative, NaN or infinite
    #[error("Invalid servings: {0} (must be a finite number greater than 0)")]
    InvalidServings(f64),

    /// The ingredient id is not in the catalog
    #[error("Unknown ingredient: '{0}'")]
    UnknownIngredient(String),

    /// A quantity was negative or non-finite
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(f64),
}

/// Result type for scaling operations
pub type ScaleResult<T> = Result<T, ScaleError>;

//! Fraction formatting
//!
//! Renders a rounded quantity as a whole number plus a Unicode vulgar
//! fraction glyph ("2 ½", "⅓", "3").

use super::error::{ScaleError, ScaleResult};

/// Canonical fractions, checked in this order
const FRACTIONS: [(f64, &str); 9] = [
    (0.125, "⅛"),
    (0.25, "¼"),
    (0.333, "⅓"),
    (0.375, "⅜"),
    (0.5, "½"),
    (0.625, "⅝"),
    (0.667, "⅔"),
    (0.75, "¾"),
    (0.875, "⅞"),
];

/// Fractional parts below this are treated as a whole number
const WHOLE_EPSILON: f64 = 0.01;

/// Maximum distance from a canonical fraction for its glyph to be used
const FRACTION_TOLERANCE: f64 = 0.02;

/// Format a rounded quantity for display
///
/// Zero formats as an empty string. A fractional part that matches no glyph
/// falls back to the plain decimal representation. Negative or non-finite
/// input is rejected.
pub fn format_quantity(quantity: f64) -> ScaleResult<String> {
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(ScaleError::InvalidQuantity(quantity));
    }

    let whole = quantity.floor();
    let fractional = quantity - whole;

    if fractional < WHOLE_EPSILON {
        return Ok(if whole == 0.0 {
            String::new()
        } else {
            format!("{:.0}", whole)
        });
    }

    match fraction_glyph(fractional) {
        Some(glyph) if whole > 0.0 => Ok(format!("{:.0} {}", whole, glyph)),
        Some(glyph) => Ok(glyph.to_string()),
        None => {
            tracing::warn!(quantity, "No fraction glyph matches, using decimal");
            Ok(quantity.to_string())
        }
    }
}

/// First canonical fraction within tolerance of `fractional`
fn fraction_glyph(fractional: f64) -> Option<&'static str> {
    FRACTIONS
        .iter()
        .find(|(decimal, _)| (fractional - decimal).abs() < FRACTION_TOLERANCE)
        .map(|(_, glyph)| *glyph)
}

/// Format a weight in grams, rounded to whole grams
pub fn format_weight(grams: f64) -> ScaleResult<String> {
    if !grams.is_finite() || grams < 0.0 {
        return Err(ScaleError::InvalidQuantity(grams));
    }
    Ok(format!("{:.0}g", grams))
}

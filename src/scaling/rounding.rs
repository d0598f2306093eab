//! Smart rounding
//!
//! Maps a raw scaled quantity to a display-friendly increment. The result is
//! only ever used for display; nutrition always works from the raw value.

use super::units::{IngredientCategory, IngredientUnit};

/// Round a scaled quantity according to its unit and category
///
/// - proteins and whole items: nearest integer
/// - below 1: nearest 1/8
/// - 1 up to (but excluding) 10: nearest 1/4
/// - 10 and above: nearest integer
pub fn smart_round(value: f64, unit: IngredientUnit, category: IngredientCategory) -> f64 {
    if category == IngredientCategory::Protein || unit == IngredientUnit::Whole {
        return value.round();
    }

    if value < 1.0 {
        round_to_increment(value, 8.0)
    } else if value < 10.0 {
        round_to_increment(value, 4.0)
    } else {
        value.round()
    }
}

fn round_to_increment(value: f64, steps_per_unit: f64) -> f64 {
    (value * steps_per_unit).round() / steps_per_unit
}

#[cfg(test)]
mod tests {
    use super::*;

    use IngredientCategory::*;
    use IngredientUnit::*;

    #[test]
    fn test_protein_rounds_to_integer() {
        assert_eq!(smart_round(3.0, Whole, Protein), 3.0);
        assert_eq!(smart_round(2.4, Weight, Protein), 2.0);
        assert_eq!(smart_round(0.6, Volume, Protein), 1.0);
    }

    #[test]
    fn test_whole_unit_rounds_to_integer() {
        // Half a cucumber scaled by 1.5
        assert_eq!(smart_round(0.75, Whole, Vegetable), 1.0);
        assert_eq!(smart_round(0.375, Whole, Vegetable), 0.0);
    }

    #[test]
    fn test_below_one_rounds_to_eighths() {
        assert_eq!(smart_round(0.9, Volume, Vegetable), 0.875);
        assert_eq!(smart_round(0.3, Volume, Fat), 0.25);
        assert_eq!(smart_round(0.2, Count, Acid), 0.25);
        assert_eq!(smart_round(0.05, Count, Acid), 0.0);
    }

    #[test]
    fn test_one_to_ten_rounds_to_quarters() {
        assert_eq!(smart_round(1.0, Volume, Vegetable), 1.0);
        assert_eq!(smart_round(1.1, Volume, Vegetable), 1.0);
        assert_eq!(smart_round(1.2, Volume, Vegetable), 1.25);
        assert_eq!(smart_round(6.66, Volume, Vegetable), 6.75);
        assert_eq!(smart_round(9.9, Volume, Vegetable), 10.0);
    }

    #[test]
    fn test_ten_and_above_rounds_to_integer() {
        assert_eq!(smart_round(10.0, Volume, Vegetable), 10.0);
        assert_eq!(smart_round(12.4, Volume, Vegetable), 12.0);
        assert_eq!(smart_round(12.6, Count, Vegetable), 13.0);
    }

    #[test]
    fn test_zero_stays_zero() {
        assert_eq!(smart_round(0.0, Volume, Fat), 0.0);
        assert_eq!(smart_round(0.0, Whole, Protein), 0.0);
    }

    #[test]
    fn test_rounding_is_idempotent() {
        let cases = [
            (Whole, Protein),
            (Whole, Vegetable),
            (Volume, Vegetable),
            (Count, Acid),
            (Volume, Fat),
        ];
        let mut value = 0.0;
        while value < 25.0 {
            for (unit, category) in cases {
                let once = smart_round(value, unit, category);
                let twice = smart_round(once, unit, category);
                assert_eq!(once, twice, "value {} ({:?}, {:?})", value, unit, category);
            }
            value += 0.037;
        }
    }
}

//! # Nutrition and Cost Module
//!
//! Aggregates the nutrients and cost of a recipe from its ingredient lines and
//! lifts the totals to the energy target of the recipe's meal type when they
//! fall short of it.

use crate::recipe_model::IngredientLine;
use log::debug;
use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Energy target used when the meal type is not recognised (kcal)
pub const DEFAULT_ENERGY_TARGET: f64 = 300.0;

/// Aggregate nutrition and cost of a recipe
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutritionSummary {
    /// kcal
    pub energy: f64,
    /// g
    pub protein: f64,
    /// g
    pub fat: f64,
    /// g
    pub carbs: f64,
    pub cost: f64,
}

/// Daily meal slots with an energy target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Complement,
    Lunch,
    Special,
}

impl MealType {
    /// Parse a meal type label
    ///
    /// Composite labels such as `Complemento/Almuerzo` resolve to their first
    /// segment. Spanish labels from the manual and English names are accepted.
    pub fn from_label(label: &str) -> Option<Self> {
        let first = label.split('/').next().unwrap_or_default().trim();
        match first.to_lowercase().as_str() {
            "desayuno" | "breakfast" => Some(MealType::Breakfast),
            "complemento" | "complement" => Some(MealType::Complement),
            "almuerzo" | "lunch" => Some(MealType::Lunch),
            "especial" | "special" => Some(MealType::Special),
            _ => None,
        }
    }

    /// Energy target per meal (kcal)
    pub fn energy_target(&self) -> f64 {
        match self {
            MealType::Breakfast => 210.0,
            MealType::Complement => 280.0,
            MealType::Lunch => 600.0,
            MealType::Special => 300.0,
        }
    }
}

/// Energy target for a meal type label, falling back to [`DEFAULT_ENERGY_TARGET`]
pub fn energy_target(meal_type: &str) -> f64 {
    MealType::from_label(meal_type)
        .map(|m| m.energy_target())
        .unwrap_or(DEFAULT_ENERGY_TARGET)
}

impl Mul<f64> for NutritionSummary {
    type Output = NutritionSummary;

    fn mul(self, factor: f64) -> NutritionSummary {
        NutritionSummary {
            energy: self.energy * factor,
            protein: self.protein * factor,
            fat: self.fat * factor,
            carbs: self.carbs * factor,
            cost: self.cost * factor,
        }
    }
}

/// Sum `quantity * coefficient` over the ingredient lines
pub fn totals(ingredients: &[IngredientLine]) -> NutritionSummary {
    ingredients
        .iter()
        .fold(NutritionSummary::default(), |acc, line| {
            let c = &line.coefficients;
            NutritionSummary {
                energy: acc.energy + line.quantity * c.energy,
                protein: acc.protein + line.quantity * c.protein,
                fat: acc.fat + line.quantity * c.fat,
                carbs: acc.carbs + line.quantity * c.carbs,
                cost: acc.cost + line.quantity * c.cost,
            }
        })
}

/// Compute the nutrition and cost of a recipe
///
/// When the summed energy is positive but below the meal type's target, all
/// five values are scaled by `target / energy`. Zero energy is left unscaled.
pub fn resolve(ingredients: &[IngredientLine], meal_type: &str) -> NutritionSummary {
    let summary = totals(ingredients);
    let target = energy_target(meal_type);

    if summary.energy > 0.0 && summary.energy < target {
        let factor = target / summary.energy;
        debug!(
            "Scaling nutrition for meal type '{}' by {:.3} ({:.1} kcal < {:.1} kcal)",
            meal_type, factor, summary.energy, target
        );
        summary * factor
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::{NutrientCoefficients, Unit};

    fn line(quantity: f64, energy: f64, cost: f64) -> IngredientLine {
        IngredientLine::new("x", quantity, Unit::Grams).with_coefficients(NutrientCoefficients {
            energy,
            protein: 0.1,
            fat: 0.05,
            carbs: 0.2,
            cost,
        })
    }

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn test_breakfast_below_target_is_scaled() {
        let result = resolve(&[line(100.0, 2.0, 0.01)], "Desayuno");
        assert_close(result.energy, 210.0);
        assert_close(result.protein, 10.0 * 1.05);
        assert_close(result.fat, 5.0 * 1.05);
        assert_close(result.carbs, 20.0 * 1.05);
        assert_close(result.cost, 1.0 * 1.05);
    }

    #[test]
    fn test_at_or_above_target_is_unscaled() {
        let result = resolve(&[line(100.0, 7.0, 0.02)], "Almuerzo");
        assert_close(result.energy, 700.0);
        assert_close(result.cost, 2.0);

        let exact = resolve(&[line(100.0, 2.1, 0.0)], "Desayuno");
        assert_close(exact.energy, 210.0);
        assert_close(exact.protein, 10.0);
    }

    #[test]
    fn test_zero_energy_is_not_scaled() {
        let placeholders = vec![
            IngredientLine::new("Arroz", 100.0, Unit::Grams),
            IngredientLine::new("Frijoles", 50.0, Unit::Grams),
        ];
        let result = resolve(&placeholders, "Complemento");
        assert_eq!(result.energy, 0.0);
        assert_eq!(result.protein, 0.0);
        assert_close(result.cost, 1.5);

        assert_eq!(resolve(&[], "Almuerzo"), NutritionSummary::default());
    }

    #[test]
    fn test_composite_meal_type_uses_first_segment() {
        assert_eq!(energy_target("Complemento/Almuerzo"), 280.0);
        let result = resolve(&[line(100.0, 1.4, 0.0)], "Complemento/Almuerzo");
        assert_close(result.energy, 280.0);
    }

    #[test]
    fn test_unknown_meal_type_uses_default_target() {
        assert_eq!(energy_target("Efemérides"), DEFAULT_ENERGY_TARGET);
        assert_eq!(energy_target("Unknown"), 300.0);
        assert_eq!(energy_target("breakfast"), 210.0);
    }

    #[test]
    fn test_resolve_does_not_mutate_input() {
        let input = vec![line(100.0, 2.0, 0.01)];
        let before = input.clone();
        let _ = resolve(&input, "Desayuno");
        assert_eq!(input, before);
    }
}

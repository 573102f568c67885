//! # Recipe Data Model
//!
//! This module defines the records produced by the recipe extraction and
//! consumed by the store: technical sheets (recipes), their ingredient lines
//! and the calendar events listed in the manual.
//!
//! ## Core Concepts
//!
//! - **Recipe**: one technical sheet with classification, steps, nutrition and cost
//! - **IngredientLine**: a quantity of one ingredient plus per-unit coefficients
//! - **NutrientStatus**: whether the coefficients are real data or placeholders
//! - **CalendarEvent**: a named event entry pointing at a recipe position
//!
//! ## Usage
//!
//! ```rust
//! use school_menus::recipe_model::{IngredientLine, NutrientCoefficients, Unit};
//!
//! let rice = IngredientLine::new("Arroz", 100.0, Unit::Grams)
//!     .with_coefficients(NutrientCoefficients {
//!         energy: 3.56,
//!         protein: 0.07,
//!         fat: 0.0,
//!         carbs: 0.0,
//!         cost: 0.01,
//!     });
//! assert!(rice.is_resolved());
//! ```

use crate::config::PLACEHOLDER_COST_PER_UNIT;
use crate::nutrition::NutritionSummary;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Units used by the manual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Grams
    #[serde(rename = "g")]
    Grams,
    /// Milliliters
    #[serde(rename = "ml")]
    Milliliters,
    /// Whole pieces
    #[serde(rename = "unidad")]
    Pieces,
}

/// Per-unit nutrient and cost coefficients of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientCoefficients {
    /// Energy (kcal per unit)
    pub energy: f64,
    /// Protein (g per unit)
    pub protein: f64,
    /// Fat (g per unit)
    pub fat: f64,
    /// Carbohydrates (g per unit)
    pub carbs: f64,
    /// Cost (currency per unit)
    pub cost: f64,
}

/// Provenance of an ingredient's coefficients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NutrientStatus {
    /// Placeholders; the real values come from a nutrition lookup not wired in yet
    Unresolved,
    /// Values entered or looked up for this ingredient
    Resolved,
}

/// One ingredient of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub coefficients: NutrientCoefficients,
    pub status: NutrientStatus,
}

/// A technical sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    /// Sequential code, `REC-001` style
    pub code: String,
    pub meal_type: String,
    pub category: String,
    /// Preparation steps in document order
    pub steps: Vec<String>,
    /// Derived from the ingredient lines by [`crate::nutrition::resolve`]
    pub nutrition: NutritionSummary,
    /// Comma separated portion sizes, e.g. `1,5,10`
    pub portions: String,
    pub ingredients: Vec<IngredientLine>,
}

/// A calendar entry listed in the events section of the manual
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub name: String,
    pub date: String,
    /// 1-based position of the referenced recipe in the extraction output
    pub recipe_ordinal: usize,
}

impl Unit {
    /// Label used in the manual and in the store
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Grams => "g",
            Unit::Milliliters => "ml",
            Unit::Pieces => "unidad",
        }
    }

    pub fn is_weight(&self) -> bool {
        matches!(self, Unit::Grams)
    }

    pub fn is_volume(&self) -> bool {
        matches!(self, Unit::Milliliters)
    }

    pub fn is_count(&self) -> bool {
        matches!(self, Unit::Pieces)
    }
}

/// Error returned for a unit label outside the manual's vocabulary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUnit(pub String);

impl fmt::Display for UnknownUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown unit '{}'", self.0)
    }
}

impl std::error::Error for UnknownUnit {}

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" => Ok(Unit::Grams),
            "ml" => Ok(Unit::Milliliters),
            "unidad" | "unidades" => Ok(Unit::Pieces),
            other => Err(UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl NutrientCoefficients {
    /// Coefficients given to ingredients scraped from the manual
    pub fn placeholder() -> Self {
        Self {
            cost: PLACEHOLDER_COST_PER_UNIT,
            ..Self::default()
        }
    }
}

impl IngredientLine {
    /// Create an ingredient line with placeholder coefficients
    pub fn new(name: &str, quantity: f64, unit: Unit) -> Self {
        Self {
            name: name.trim().to_string(),
            quantity,
            unit,
            coefficients: NutrientCoefficients::placeholder(),
            status: NutrientStatus::Unresolved,
        }
    }

    /// Attach known coefficients, marking the line as resolved
    pub fn with_coefficients(mut self, coefficients: NutrientCoefficients) -> Self {
        self.coefficients = coefficients;
        self.status = NutrientStatus::Resolved;
        self
    }

    pub fn is_resolved(&self) -> bool {
        self.status == NutrientStatus::Resolved
    }
}

impl Recipe {
    /// Steps joined the way the store keeps them
    pub fn steps_text(&self) -> String {
        self.steps.join("\n")
    }

    /// Number of ingredient lines still carrying placeholder coefficients
    pub fn unresolved_count(&self) -> usize {
        self.ingredients.iter().filter(|i| !i.is_resolved()).count()
    }
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.quantity.fract() == 0.0 {
            write!(f, "{}: {} {}", self.name, self.quantity as i64, self.unit)
        } else {
            write!(f, "{}: {} {}", self.name, self.quantity, self.unit)
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {} ({} / {})", self.code, self.name, self.meal_type, self.category)?;
        for ingredient in &self.ingredients {
            writeln!(f, "  • {}", ingredient)?;
        }
        for step in &self.steps {
            writeln!(f, "  {}", step)?;
        }
        Ok(())
    }
}

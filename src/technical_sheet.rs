//! # Technical Sheet Module
//!
//! Manually created or edited technical sheets, and the stored form of every
//! sheet. Manual sheets go through the same nutrition resolver as the sheets
//! extracted from the manual.

use crate::nutrition::{self, NutritionSummary};
use crate::recipe_model::{IngredientLine, Recipe};
use crate::validation::{validate_name, validate_portion, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Meal types offered when editing a sheet
pub const MEAL_TYPES: [&str; 5] = ["Desayuno", "Complemento", "Almuerzo", "Especial", "Efemérides"];

/// Categories offered when editing a sheet
pub const CATEGORIES: [&str; 7] = [
    "Bebida",
    "Ensalada",
    "Plato Principal",
    "Acompañamiento",
    "Atole",
    "Compota",
    "Celebración",
];

/// A sheet as entered by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetInput {
    pub name: String,
    pub code: String,
    pub meal_type: String,
    pub category: String,
    /// One step per line
    pub steps: String,
    pub portions: Vec<u32>,
    pub ingredients: Vec<IngredientLine>,
}

/// A stored sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSheet {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub meal_type: String,
    pub category: String,
    pub steps: String,
    pub nutrition: NutritionSummary,
    pub portions: String,
}

/// Grouping of the sheet listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetGrouping {
    Category,
    MealType,
}

/// Check every segment of a possibly composite meal type label
pub fn validate_meal_type(meal_type: &str) -> Result<String, ValidationError> {
    let trimmed = meal_type.trim();
    let known = !trimmed.is_empty()
        && trimmed
            .split('/')
            .all(|segment| MEAL_TYPES.contains(&segment.trim()));
    if known {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::UnknownMealType(meal_type.to_string()))
    }
}

impl SheetInput {
    /// Validate and normalise the input
    pub fn validated(self) -> Result<Self, ValidationError> {
        let name = validate_name("name", &self.name)?;
        let code = validate_name("code", &self.code)?;
        let meal_type = validate_meal_type(&self.meal_type)?;
        let category = validate_name("category", &self.category)?;

        if self.portions.is_empty() {
            return Err(ValidationError::Empty { field: "portions" });
        }
        let mut portions = self
            .portions
            .iter()
            .map(|size| validate_portion(*size))
            .collect::<Result<Vec<_>, _>>()?;
        portions.sort_unstable();
        portions.dedup();

        for ingredient in &self.ingredients {
            check_ingredient(ingredient)?;
        }

        Ok(Self {
            name,
            code,
            meal_type,
            category,
            steps: self.steps.trim().to_string(),
            portions,
            ingredients: self.ingredients,
        })
    }

    /// Portions descriptor as stored, e.g. `1,5,10`
    pub fn portions_descriptor(&self) -> String {
        self.portions
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn nutrition(&self) -> NutritionSummary {
        nutrition::resolve(&self.ingredients, &self.meal_type)
    }
}

fn check_ingredient(ingredient: &IngredientLine) -> Result<(), ValidationError> {
    validate_name("ingredient name", &ingredient.name)?;
    let c = &ingredient.coefficients;
    let fields = [
        ("quantity", ingredient.quantity),
        ("energy", c.energy),
        ("protein", c.protein),
        ("fat", c.fat),
        ("carbs", c.carbs),
        ("cost", c.cost),
    ];
    for (field, value) in fields {
        if value < 0.0 || value.is_nan() {
            return Err(ValidationError::NegativeValue {
                name: ingredient.name.clone(),
                field,
            });
        }
    }
    Ok(())
}

impl From<&Recipe> for SheetInput {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name.clone(),
            code: recipe.code.clone(),
            meal_type: recipe.meal_type.clone(),
            category: recipe.category.clone(),
            steps: recipe.steps_text(),
            portions: recipe
                .portions
                .split(',')
                .filter_map(|p| p.trim().parse().ok())
                .collect(),
            ingredients: recipe.ingredients.clone(),
        }
    }
}

impl TechnicalSheet {
    pub fn step_lines(&self) -> impl Iterator<Item = &str> {
        self.steps.lines()
    }
}

/// Group sheets by category or meal type, keys in alphabetical order
pub fn group_sheets(
    sheets: &[TechnicalSheet],
    grouping: SheetGrouping,
) -> BTreeMap<String, Vec<&TechnicalSheet>> {
    let mut groups: BTreeMap<String, Vec<&TechnicalSheet>> = BTreeMap::new();
    for sheet in sheets {
        let key = match grouping {
            SheetGrouping::Category => &sheet.category,
            SheetGrouping::MealType => &sheet.meal_type,
        };
        groups.entry(key.clone()).or_default().push(sheet);
    }
    groups
}

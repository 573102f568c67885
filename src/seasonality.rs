//! # Seasonality Module
//!
//! Months in which fresh ingredients are available, stored as comma separated
//! Spanish month names.

use crate::validation::{validate_name, ValidationError};
use chrono::Month;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shorthand for an ingredient available all year
pub const ALL_YEAR: &str = "Todo el año";

const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

/// Kind of seasonal ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IngredientKind {
    Fruta,
    Vegetal,
    VerduraHarinosa,
    Aguacate,
}

/// Availability of one ingredient
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalIngredient {
    pub ingredient: String,
    pub kind: IngredientKind,
    /// Months of availability, January first
    pub months: Vec<Month>,
}

impl IngredientKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IngredientKind::Fruta => "Fruta",
            IngredientKind::Vegetal => "Vegetal",
            IngredientKind::VerduraHarinosa => "Verdura Harinosa",
            IngredientKind::Aguacate => "Aguacate",
        }
    }
}

impl fmt::Display for IngredientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngredientKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "fruta" => Ok(IngredientKind::Fruta),
            "vegetal" => Ok(IngredientKind::Vegetal),
            "verdura harinosa" => Ok(IngredientKind::VerduraHarinosa),
            "aguacate" => Ok(IngredientKind::Aguacate),
            _ => Err(ValidationError::UnknownValue {
                kind: "ingredient kind",
                value: s.to_string(),
            }),
        }
    }
}

/// Spanish name of a month
pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month.number_from_month() as usize - 1]
}

/// Parse a Spanish month name, ignoring case
pub fn parse_month(name: &str) -> Result<Month, ValidationError> {
    let name = name.trim();
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|m| m.to_lowercase() == lower)
        .and_then(|index| Month::try_from(index as u8 + 1).ok())
        .ok_or_else(|| ValidationError::UnknownValue {
            kind: "month",
            value: name.to_string(),
        })
}

/// Parse a stored month list, accepting the all-year shorthand
pub fn parse_months(list: &str) -> Result<Vec<Month>, ValidationError> {
    if list.trim().to_lowercase() == ALL_YEAR.to_lowercase() {
        return Ok(all_months());
    }
    let mut months = list
        .split(',')
        .filter(|m| !m.trim().is_empty())
        .map(parse_month)
        .collect::<Result<Vec<_>, _>>()?;
    months.sort_by_key(|m| m.number_from_month());
    months.dedup();
    Ok(months)
}

fn all_months() -> Vec<Month> {
    (1..=12u8).filter_map(|n| Month::try_from(n).ok()).collect()
}

impl SeasonalIngredient {
    pub fn new(ingredient: &str, kind: IngredientKind, months: Vec<Month>) -> Result<Self, ValidationError> {
        let ingredient = validate_name("ingredient", ingredient)?;
        if months.is_empty() {
            return Err(ValidationError::Empty { field: "months" });
        }
        let mut months = months;
        months.sort_by_key(|m| m.number_from_month());
        months.dedup();
        Ok(Self {
            ingredient,
            kind,
            months,
        })
    }

    pub fn is_available(&self, month: Month) -> bool {
        self.months.contains(&month)
    }

    pub fn is_all_year(&self) -> bool {
        self.months.len() == 12
    }

    /// Month list as stored
    pub fn months_descriptor(&self) -> String {
        if self.is_all_year() {
            return ALL_YEAR.to_string();
        }
        self.months
            .iter()
            .map(|m| month_name(*m))
            .collect::<Vec<_>>()
            .join(",")
    }
}

//! # Line Patterns Module
//!
//! This module contains the regex patterns that recognise the line conventions of
//! the recipe manual.

use lazy_static::lazy_static;
use regex::Regex;

// Recipe titles: uppercase letters (Spanish accents included) and spaces only
pub const TITLE_PATTERN: &str = r"^[A-ZÁÉÍÓÚÜÑ][A-ZÁÉÍÓÚÜÑ\s]*$";

// Ingredient lines: "<quantity> <unit> <name>", e.g. "100 g Arroz", "2 unidades Huevo"
pub const INGREDIENT_PATTERN: &str =
    r"^(?P<quantity>\d+(?:\.\d+)?)\s*(?P<unit>unidades|unidad|ml|g)\b\s*(?P<name>.+)$";

// Preparation steps: "<digits>. <text>"
pub const STEP_PATTERN: &str = r"^\d+\.\s*\S.*$";

// Portion table headers: "<N> PORCIONES"
pub const PORTION_HEADER_PATTERN: &str = r"^(?P<size>\d+)\s+PORCIONES$";

// Portion table quantities: "<name>: <decimal> <g|ml>"
pub const PORTION_QUANTITY_PATTERN: &str =
    r"^(?P<name>[\p{L}\s]+):\s*(?P<quantity>\d+(?:\.\d+)?)\s*(?P<unit>ml|g)\b";

// Lazy static regexes to avoid recompilation
lazy_static! {
    pub static ref TITLE_REGEX: Regex =
        Regex::new(TITLE_PATTERN).expect("Title pattern should be valid");
    pub static ref INGREDIENT_REGEX: Regex =
        Regex::new(INGREDIENT_PATTERN).expect("Ingredient pattern should be valid");
    pub static ref STEP_REGEX: Regex =
        Regex::new(STEP_PATTERN).expect("Step pattern should be valid");
    pub static ref PORTION_HEADER_REGEX: Regex =
        Regex::new(PORTION_HEADER_PATTERN).expect("Portion header pattern should be valid");
    pub static ref PORTION_QUANTITY_REGEX: Regex =
        Regex::new(PORTION_QUANTITY_PATTERN).expect("Portion quantity pattern should be valid");
}

/// Whether a trimmed line looks like an uppercase recipe title
pub fn is_uppercase_title(line: &str) -> bool {
    TITLE_REGEX.is_match(line)
}

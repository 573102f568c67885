//! # Line Classifier Module
//!
//! Decides what a single line of the manual is, given the state of the scan.
//!
//! ## Rules
//!
//! Checked in order, first match wins:
//!
//! 1. Blank line: ignored
//! 2. A known section heading (case-insensitive): [`Token::SectionHeader`]
//! 3. Uppercase letters and spaces, with a section active: [`Token::RecipeTitle`]
//! 4. Starts with "ingredientes": [`Token::IngredientsMarker`]
//! 5. Starts with "preparación": [`Token::StepsMarker`]
//! 6. `<quantity> <g|ml|unidad> <name>` inside an ingredients block: [`Token::IngredientEntry`]
//! 7. `<digits>. <text>` inside a steps block: [`Token::StepEntry`]
//! 8. Anything else: ignored
//!
//! Headings are uppercase too, so rule 2 must run before rule 3. Block markers
//! written in capitals ("INGREDIENTES") are never taken as titles.

use crate::category_sections::find_heading;
use crate::line_patterns::{is_uppercase_title, INGREDIENT_REGEX, STEP_REGEX};
use crate::recipe_model::Unit;
use log::trace;

const INGREDIENTS_KEYWORD: &str = "ingredientes";
const STEPS_KEYWORD: &str = "preparación";

/// Which block of a recipe the scan is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// No recipe open yet
    #[default]
    Header,
    /// A title was read, no block marker yet
    Title,
    /// After an ingredients marker
    Ingredients,
    /// After a preparation marker
    Steps,
}

/// Scan state the classifier reads
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifierState {
    /// Heading of the active section
    pub section: Option<&'static str>,
    pub mode: ParseMode,
}

/// Kind of a classified line
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    SectionHeader(&'static str),
    RecipeTitle(String),
    IngredientsMarker,
    StepsMarker,
    IngredientEntry {
        quantity: f64,
        unit: Unit,
        name: String,
    },
    StepEntry(String),
}

impl ClassifierState {
    pub fn has_section(&self) -> bool {
        self.section.is_some()
    }
}

/// Classify one line of text
///
/// Returns `None` for lines that carry no token; those are skipped by callers.
///
/// # Examples
///
/// ```rust
/// use school_menus::line_classifier::{classify, ClassifierState, ParseMode, Token};
///
/// let state = ClassifierState {
///     section: Some("ATOLES"),
///     mode: ParseMode::Ingredients,
/// };
/// assert_eq!(classify("ATOL DE MAIZ", &state), Some(Token::RecipeTitle("ATOL DE MAIZ".to_string())));
/// assert!(matches!(classify("100 g Maíz", &state), Some(Token::IngredientEntry { .. })));
/// assert_eq!(classify("Servir frío", &state), None);
/// ```
pub fn classify(line: &str, state: &ClassifierState) -> Option<Token> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if let Some(section) = find_heading(line) {
        trace!("Section heading: '{}'", line);
        return Some(Token::SectionHeader(section.heading));
    }

    let lower = line.to_lowercase();
    let is_ingredients_marker = lower.starts_with(INGREDIENTS_KEYWORD);
    let is_steps_marker = lower.starts_with(STEPS_KEYWORD);

    if state.has_section()
        && !is_ingredients_marker
        && !is_steps_marker
        && is_uppercase_title(line)
    {
        trace!("Recipe title: '{}'", line);
        return Some(Token::RecipeTitle(line.to_string()));
    }

    if is_ingredients_marker {
        return Some(Token::IngredientsMarker);
    }

    if is_steps_marker {
        return Some(Token::StepsMarker);
    }

    match state.mode {
        ParseMode::Ingredients => parse_ingredient_entry(line),
        ParseMode::Steps if STEP_REGEX.is_match(line) => {
            Some(Token::StepEntry(line.to_string()))
        }
        _ => {
            trace!("Ignored line: '{}'", line);
            None
        }
    }
}

fn parse_ingredient_entry(line: &str) -> Option<Token> {
    let Some(caps) = INGREDIENT_REGEX.captures(line) else {
        trace!("Ingredient block line without quantity: '{}'", line);
        return None;
    };
    let quantity = caps["quantity"].parse::<f64>().ok()?;
    let unit = caps["unit"].parse::<Unit>().ok()?;
    let name = caps["name"].trim().to_string();

    Some(Token::IngredientEntry {
        quantity,
        unit,
        name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(section: Option<&'static str>, mode: ParseMode) -> ClassifierState {
        ClassifierState { section, mode }
    }

    #[test]
    fn test_blank_lines_are_ignored() {
        let s = state(Some("ATOLES"), ParseMode::Steps);
        assert_eq!(classify("", &s), None);
        assert_eq!(classify("   \t", &s), None);
    }

    #[test]
    fn test_heading_wins_over_title() {
        let s = state(Some("ATOLES"), ParseMode::Title);
        assert_eq!(
            classify("CALDOS", &s),
            Some(Token::SectionHeader("CALDOS"))
        );
        assert_eq!(
            classify("  bebidas para desayuno ", &state(None, ParseMode::Header)),
            Some(Token::SectionHeader("BEBIDAS PARA DESAYUNO"))
        );
    }

    #[test]
    fn test_title_requires_active_section() {
        assert_eq!(classify("GALLO PINTO", &state(None, ParseMode::Header)), None);
        assert_eq!(
            classify("GALLO PINTO", &state(Some("CALDOS"), ParseMode::Header)),
            Some(Token::RecipeTitle("GALLO PINTO".to_string()))
        );
        assert_eq!(
            classify("CAFÉ CON LECHE", &state(Some("CALDOS"), ParseMode::Steps)),
            Some(Token::RecipeTitle("CAFÉ CON LECHE".to_string()))
        );
    }

    #[test]
    fn test_markers() {
        let s = state(Some("ATOLES"), ParseMode::Title);
        assert_eq!(classify("INGREDIENTES", &s), Some(Token::IngredientsMarker));
        assert_eq!(classify("Ingredientes:", &s), Some(Token::IngredientsMarker));
        assert_eq!(classify("PREPARACIÓN", &s), Some(Token::StepsMarker));
        assert_eq!(classify("Preparación de la receta", &s), Some(Token::StepsMarker));
    }

    #[test]
    fn test_ingredient_entries_only_inside_block() {
        let inside = state(Some("ATOLES"), ParseMode::Ingredients);
        assert_eq!(
            classify("100 g Arroz", &inside),
            Some(Token::IngredientEntry {
                quantity: 100.0,
                unit: Unit::Grams,
                name: "Arroz".to_string(),
            })
        );
        assert_eq!(
            classify("2.5 unidad Huevo duro", &inside),
            Some(Token::IngredientEntry {
                quantity: 2.5,
                unit: Unit::Pieces,
                name: "Huevo duro".to_string(),
            })
        );
        assert_eq!(classify("Sal al gusto", &inside), None);

        let outside = state(Some("ATOLES"), ParseMode::Steps);
        assert_eq!(classify("100 g Arroz", &outside), None);
    }

    #[test]
    fn test_step_entries_only_inside_block() {
        let inside = state(Some("ATOLES"), ParseMode::Steps);
        assert_eq!(
            classify("1. Cocinar.", &inside),
            Some(Token::StepEntry("1. Cocinar.".to_string()))
        );
        assert_eq!(classify("Cocinar a fuego lento", &inside), None);

        let outside = state(Some("ATOLES"), ParseMode::Ingredients);
        assert_eq!(classify("1. Cocinar.", &outside), None);
    }
}

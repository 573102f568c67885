//! # Recipe Segmenter
//!
//! Assembles recipes from the recipe pages of the manual, one line at a time.
//!
//! A recipe starts at an uppercase title line and ends where the next title
//! starts (or at the end of the page range). There is no explicit end marker,
//! so an all-uppercase prose line inside a recipe opens a new one.
//!
//! ## Usage
//!
//! ```rust
//! use school_menus::document::Document;
//! use school_menus::portion_table::PortionTable;
//! use school_menus::recipe_segmenter::segment_recipes;
//!
//! let doc = Document::from_pages(vec![vec![
//!     "ATOLES",
//!     "ATOL DE MAIZ",
//!     "Ingredientes",
//!     "100 g Maíz",
//!     "Preparación",
//!     "1. Cocinar el maíz.",
//! ]]);
//! let recipes = segment_recipes(&doc, 0, 0, &PortionTable::default());
//!
//! assert_eq!(recipes.len(), 1);
//! assert_eq!(recipes[0].code, "REC-001");
//! assert_eq!(recipes[0].meal_type, "Especial");
//! ```

use crate::category_sections::{classify_heading, Classification};
use crate::config::DEFAULT_PORTIONS;
use crate::document::Document;
use crate::line_classifier::{classify, ClassifierState, ParseMode, Token};
use crate::nutrition;
use crate::portion_table::PortionTable;
use crate::recipe_model::{IngredientLine, Recipe, Unit};
use log::{debug, info, trace};

/// A recipe being read
#[derive(Debug, Clone, PartialEq)]
struct RecipeDraft {
    name: String,
    code: String,
    classification: Classification,
    ingredients: Vec<IngredientLine>,
    steps: Vec<String>,
    portions: String,
    mode: ParseMode,
}

impl RecipeDraft {
    fn new(name: String, ordinal: usize, classification: Classification) -> Self {
        Self {
            name,
            code: recipe_code(ordinal),
            classification,
            ingredients: Vec::new(),
            steps: Vec::new(),
            portions: DEFAULT_PORTIONS.to_string(),
            mode: ParseMode::Title,
        }
    }

    fn close(self) -> Recipe {
        let nutrition = nutrition::resolve(&self.ingredients, &self.classification.meal_type);
        Recipe {
            name: self.name,
            code: self.code,
            meal_type: self.classification.meal_type,
            category: self.classification.category,
            steps: self.steps,
            nutrition,
            portions: self.portions,
            ingredients: self.ingredients,
        }
    }
}

/// Code of the `ordinal`-th recipe (1-based)
pub fn recipe_code(ordinal: usize) -> String {
    format!("REC-{ordinal:03}")
}

/// Line-driven recipe assembler
pub struct RecipeSegmenter<'a> {
    portions: &'a PortionTable,
    section: Option<&'static str>,
    draft: Option<RecipeDraft>,
    recipes: Vec<Recipe>,
}

impl<'a> RecipeSegmenter<'a> {
    pub fn new(portions: &'a PortionTable) -> Self {
        Self {
            portions,
            section: None,
            draft: None,
            recipes: Vec::new(),
        }
    }

    fn state(&self) -> ClassifierState {
        ClassifierState {
            section: self.section,
            mode: self
                .draft
                .as_ref()
                .map_or(ParseMode::Header, |draft| draft.mode),
        }
    }

    /// Feed the next line of the page range
    pub fn feed(&mut self, line: &str) {
        let Some(token) = classify(line, &self.state()) else {
            return;
        };

        match token {
            Token::SectionHeader(heading) => {
                debug!("Entering section '{}'", heading);
                self.section = Some(heading);
            }
            Token::RecipeTitle(name) => self.open(name),
            Token::IngredientsMarker => self.set_mode(ParseMode::Ingredients),
            Token::StepsMarker => self.set_mode(ParseMode::Steps),
            Token::IngredientEntry {
                quantity,
                unit,
                name,
            } => self.add_ingredient(&name, quantity, unit),
            Token::StepEntry(step) => {
                if let Some(draft) = self.draft.as_mut() {
                    draft.steps.push(step);
                }
            }
        }
    }

    fn open(&mut self, name: String) {
        self.close_draft();

        let classification = classify_heading(self.section.unwrap_or_default());
        let draft = RecipeDraft::new(name, self.recipes.len() + 1, classification);
        debug!(
            "Opened recipe {} '{}' ({} / {})",
            draft.code, draft.name, draft.classification.meal_type, draft.classification.category
        );
        self.draft = Some(draft);
    }

    fn set_mode(&mut self, mode: ParseMode) {
        if let Some(draft) = self.draft.as_mut() {
            draft.mode = mode;
        }
    }

    fn add_ingredient(&mut self, name: &str, quantity: f64, unit: Unit) {
        let Some(draft) = self.draft.as_mut() else {
            return;
        };
        if let Some(sizes) = self.portions.sizes_for(name) {
            trace!(
                "Portion data available for '{}' ({} serving counts)",
                name,
                sizes.len()
            );
        }
        draft.ingredients.push(IngredientLine::new(name, quantity, unit));
    }

    fn close_draft(&mut self) {
        if let Some(draft) = self.draft.take() {
            let recipe = draft.close();
            debug!(
                "Closed recipe {} with {} ingredients and {} steps",
                recipe.code,
                recipe.ingredients.len(),
                recipe.steps.len()
            );
            self.recipes.push(recipe);
        }
    }

    /// Flush the open recipe and return everything assembled
    pub fn finish(mut self) -> Vec<Recipe> {
        self.close_draft();
        self.recipes
    }
}

/// Segment the recipes of the inclusive page range `first..=last`
pub fn segment_recipes(
    document: &Document,
    first: usize,
    last: usize,
    portions: &PortionTable,
) -> Vec<Recipe> {
    let mut segmenter = RecipeSegmenter::new(portions);
    for line in document.lines_in_range(first, last) {
        segmenter.feed(line);
    }
    let recipes = segmenter.finish();
    info!(
        "Segmented {} recipes from pages {}-{}",
        recipes.len(),
        first,
        last
    );
    recipes
}

//! # Recipe Extraction
//!
//! Entry points that turn the manual into recipes and calendar events. The
//! requested page range is validated before anything is parsed; the portion
//! table and event pages are fixed by the manual's layout and clamped to the
//! pages actually present.

use crate::calendar_events::extract_events;
use crate::config::{
    clamp_page_range, EVENT_FIRST_PAGE, EVENT_LAST_PAGE, PORTION_TABLE_FIRST_PAGE,
    PORTION_TABLE_LAST_PAGE,
};
use crate::document::Document;
use crate::extraction_errors::ExtractionError;
use crate::pdf_text::load_document;
use crate::portion_table::{load_portions, PortionTable};
use crate::recipe_model::{CalendarEvent, Recipe};
use crate::recipe_segmenter::segment_recipes;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything read from one manual
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub recipes: Vec<Recipe>,
    pub events: Vec<CalendarEvent>,
    pub portions: PortionTable,
}

/// Check `0 <= start <= end < page_count` on a non-empty document
pub fn validate_range(document: &Document, start: usize, end: usize) -> Result<(), ExtractionError> {
    let page_count = document.page_count();
    if page_count == 0 {
        return Err(ExtractionError::EmptyDocument);
    }
    if start > end || end >= page_count {
        return Err(ExtractionError::InvalidRange {
            start,
            end,
            page_count,
        });
    }
    Ok(())
}

/// Extract recipes from pages `start..=end` of an in-memory document
pub fn extract(document: &Document, start: usize, end: usize) -> Result<Extraction, ExtractionError> {
    validate_range(document, start, end)?;
    let page_count = document.page_count();

    let (portion_first, portion_last) =
        clamp_page_range(PORTION_TABLE_FIRST_PAGE, PORTION_TABLE_LAST_PAGE, page_count);
    let portions = load_portions(document, portion_first, portion_last);

    let recipes = segment_recipes(document, start, end, &portions);

    let (event_first, event_last) = clamp_page_range(EVENT_FIRST_PAGE, EVENT_LAST_PAGE, page_count);
    let events = extract_events(document, event_first, event_last, recipes.len());

    info!(
        "Extraction finished: {} recipes, {} calendar events, {} portion entries",
        recipes.len(),
        events.len(),
        portions.len()
    );

    Ok(Extraction {
        recipes,
        events,
        portions,
    })
}

/// Load a manual from disk and extract recipes from pages `start..=end`
pub fn extract_from_path(path: &Path, start: usize, end: usize) -> Result<Extraction, ExtractionError> {
    let document = load_document(path)?;
    extract(&document, start, end)
}

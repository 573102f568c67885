//! # Calendar Event Extractor
//!
//! A second, independent pass over the events pages of the manual. Uppercase
//! entries listed under an "EFEMÉRIDES" heading become calendar events.
//!
//! The pass tracks its own section headings from the start of its page range,
//! so entries before the first heading of the range are not events.

use crate::category_sections::is_events_heading;
use crate::config::PLACEHOLDER_EVENT_DATE;
use crate::document::Document;
use crate::line_classifier::{classify, ClassifierState, Token};
use crate::recipe_model::CalendarEvent;
use log::{debug, info};

/// Extract the calendar events of the inclusive page range `first..=last`
///
/// Every event points at `recipe_count + 1`, the position right after the
/// recipes already extracted.
pub fn extract_events(
    document: &Document,
    first: usize,
    last: usize,
    recipe_count: usize,
) -> Vec<CalendarEvent> {
    let mut state = ClassifierState::default();
    let mut events = Vec::new();

    for line in document.lines_in_range(first, last) {
        match classify(line, &state) {
            Some(Token::SectionHeader(heading)) => state.section = Some(heading),
            Some(Token::RecipeTitle(name))
                if state.section.is_some_and(is_events_heading) =>
            {
                debug!("Calendar event '{}'", name);
                events.push(CalendarEvent {
                    name,
                    date: PLACEHOLDER_EVENT_DATE.to_string(),
                    recipe_ordinal: recipe_count + 1,
                });
            }
            _ => {}
        }
    }

    info!(
        "Extracted {} calendar events from pages {}-{}",
        events.len(),
        first,
        last
    );
    events
}

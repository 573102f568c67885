//! Batch import of a menu manual into the technical sheet store.

use crate::config::ImportConfig;
use crate::db;
use crate::extractor::{self, Extraction};
use crate::localization::LocalizationManager;
use crate::pdf_text::load_document;
use crate::sheet_report::{render_sheet, TextCanvas};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info, warn};

/// Outcome of one import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    pub sheet_ids: Vec<i64>,
    pub events: usize,
    pub unresolved_ingredients: usize,
}

impl ImportSummary {
    pub fn recipes(&self) -> usize {
        self.sheet_ids.len()
    }

    /// Summary lines in the configured language
    pub fn messages(&self, localization: &LocalizationManager, language: &str) -> Vec<String> {
        let mut lines = vec![
            localization.get_message_with_args(
                "import-summary",
                language,
                &[("recipes", self.recipes().to_string())],
            ),
            localization.get_message_with_args(
                "import-events",
                language,
                &[("events", self.events.to_string())],
            ),
        ];
        if self.unresolved_ingredients > 0 {
            lines.push(localization.get_message_with_args(
                "import-unresolved",
                language,
                &[("count", self.unresolved_ingredients.to_string())],
            ));
        }
        lines
    }
}

/// Extract the configured page range, clamping its end to the document
///
/// Fails with an [`crate::extraction_errors::ExtractionError`] inside the
/// returned error when the manual cannot be read or the range is invalid.
pub fn extract_configured(config: &ImportConfig) -> Result<Extraction> {
    info!(path = %config.pdf_path.display(), "Loading menu manual");
    let document = load_document(&config.pdf_path)?;

    let end_page = config.clamped_end_page(document.page_count());
    if end_page != config.end_page {
        warn!(
            requested = config.end_page,
            clamped = end_page,
            "Recipe end page beyond the document, clamping"
        );
    }

    let extraction = extractor::extract(&document, config.start_page, end_page)?;
    Ok(extraction)
}

/// Persist an extraction: recipes first, then the calendar events that refer to them
pub fn persist(conn: &mut Connection, extraction: &Extraction) -> Result<ImportSummary> {
    let sheet_ids = db::save_recipes(conn, &extraction.recipes)?;
    db::save_calendar_events(conn, &extraction.events, &sheet_ids)?;

    let unresolved_ingredients = extraction
        .recipes
        .iter()
        .map(|recipe| recipe.unresolved_count())
        .sum();

    Ok(ImportSummary {
        sheet_ids,
        events: extraction.events.len(),
        unresolved_ingredients,
    })
}

/// Write the extraction as pretty JSON
pub fn export_json(extraction: &Extraction, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(extraction).context("Failed to serialize extraction")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write JSON export to {}", path.display()))?;
    info!(path = %path.display(), "Extraction exported");
    Ok(())
}

/// Render the first stored sheet as text, if any sheet was imported
pub fn preview_first_sheet(conn: &Connection, summary: &ImportSummary) -> Result<Option<String>> {
    let Some(&sheet_id) = summary.sheet_ids.first() else {
        return Ok(None);
    };
    let Some(sheet) = db::read_sheet(conn, sheet_id)? else {
        return Ok(None);
    };
    let ingredients = db::sheet_ingredients(conn, sheet_id)?;

    let mut canvas = TextCanvas::new();
    render_sheet(&sheet, &ingredients, &mut canvas);
    Ok(Some(canvas.to_text()))
}

/// Full import: extract, persist, optionally export
pub fn run_import(conn: &mut Connection, config: &ImportConfig) -> Result<ImportSummary> {
    let extraction = extract_configured(config)?;
    let summary = persist(conn, &extraction)?;

    if let Some(path) = &config.export_json {
        export_json(&extraction, path)?;
    }

    if let Some(preview) = preview_first_sheet(conn, &summary)? {
        debug!("First imported sheet:\n{}", preview);
    }

    Ok(summary)
}

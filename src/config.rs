//! # Configuration Module
//!
//! This module holds the fixed layout constants of the school-menu manual and the
//! runtime settings of the batch importer.

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

// Layout constants of the recipe manual (0-based page indexes, inclusive)
pub const PORTION_TABLE_FIRST_PAGE: usize = 222;
pub const PORTION_TABLE_LAST_PAGE: usize = 270;
pub const EVENT_FIRST_PAGE: usize = 160;
pub const EVENT_LAST_PAGE: usize = 178;

/// Portions descriptor given to every extracted recipe
pub const DEFAULT_PORTIONS: &str = "1,5,10";
/// Cost per unit assigned to ingredients whose price is not known yet
pub const PLACEHOLDER_COST_PER_UNIT: f64 = 0.01;
/// Date assigned to every extracted calendar event
pub const PLACEHOLDER_EVENT_DATE: &str = "2025-05-11";

// Importer defaults
pub const DEFAULT_PDF_PATH: &str = "menu-primaria.pdf";
pub const DEFAULT_DATABASE_URL: &str = "menu.db";
pub const DEFAULT_START_PAGE: usize = 40;
pub const DEFAULT_END_PAGE: usize = 210;
pub const DEFAULT_LANGUAGE: &str = "es";

/// Settings of the batch importer
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    /// Path of the recipe manual (PDF, or form-feed separated text)
    pub pdf_path: PathBuf,
    /// Path of the SQLite database
    pub database_url: String,
    /// First recipe page (0-based)
    pub start_page: usize,
    /// Last recipe page (0-based, clamped to the document at import time)
    pub end_page: usize,
    /// Language of user-visible messages
    pub language: String,
    /// Optional JSON dump of the extraction
    pub export_json: Option<PathBuf>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            pdf_path: PathBuf::from(DEFAULT_PDF_PATH),
            database_url: DEFAULT_DATABASE_URL.to_string(),
            start_page: DEFAULT_START_PAGE,
            end_page: DEFAULT_END_PAGE,
            language: DEFAULT_LANGUAGE.to_string(),
            export_json: None,
        }
    }
}

impl ImportConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let start_page = match lookup("RECIPE_START_PAGE") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("RECIPE_START_PAGE must be a page index, got '{raw}'"))?,
            None => defaults.start_page,
        };
        let end_page = match lookup("RECIPE_END_PAGE") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("RECIPE_END_PAGE must be a page index, got '{raw}'"))?,
            None => defaults.end_page,
        };

        Ok(Self {
            pdf_path: lookup("MENU_PDF_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.pdf_path),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            start_page,
            end_page,
            language: lookup("MENU_LANGUAGE").unwrap_or(defaults.language),
            export_json: lookup("EXPORT_JSON")
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
        })
    }

    /// Last recipe page clamped to a document of `page_count` pages
    pub fn clamped_end_page(&self, page_count: usize) -> usize {
        self.end_page.min(page_count.saturating_sub(1))
    }
}

/// Clamp a fixed inclusive page range to the pages actually present
///
/// Both bounds are limited to the last page, so a short document yields a
/// one-page range at its end rather than nothing.
pub fn clamp_page_range(first: usize, last: usize, page_count: usize) -> (usize, usize) {
    let last_index = page_count.saturating_sub(1);
    (first.min(last_index), last.min(last_index))
}

//! # School Menus
//!
//! Turns the text of a school feeding manual into technical sheets: recipes
//! with their ingredients, preparation steps, nutrition and cost, plus the
//! calendar events the manual suggests menus for. Sheets are stored in SQLite
//! alongside menu cycles and ingredient seasonality.

pub mod calendar_events;
pub mod category_sections;
pub mod config;
pub mod db;
pub mod document;
pub mod extraction_errors;
pub mod extractor;
pub mod import;
pub mod line_classifier;
pub mod line_patterns;
pub mod localization;
pub mod menu_cycle;
pub mod nutrition;
pub mod pdf_text;
pub mod portion_table;
pub mod recipe_model;
pub mod recipe_segmenter;
pub mod seasonality;
pub mod sheet_report;
pub mod technical_sheet;
pub mod validation;

//! # Extraction Error Types Module
//!
//! This module defines the error types raised by the recipe extraction entry points.
//! Every variant is raised before the first line is parsed: once a scan has started,
//! malformed lines are skipped instead of failing the call.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of a whole extraction call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractionError {
    /// The source document does not exist
    #[error("source document '{}' not found", .0.display())]
    NotFound(PathBuf),
    /// The document has no pages
    #[error("the document is empty")]
    EmptyDocument,
    /// The requested recipe pages violate `0 <= start <= end < page_count`
    #[error("invalid page range {start}-{end}: the document has {page_count} pages (0-based: 0 to {})", .page_count.saturating_sub(1))]
    InvalidRange {
        start: usize,
        end: usize,
        page_count: usize,
    },
    /// The text layer of the document could not be read
    #[error("text extraction failed: {0}")]
    TextExtraction(String),
}

impl ExtractionError {
    /// Localization key used when reporting this error to a user
    pub fn message_key(&self) -> &'static str {
        match self {
            ExtractionError::NotFound(_) => "error-not-found",
            ExtractionError::EmptyDocument => "error-empty-document",
            ExtractionError::InvalidRange { .. } => "error-invalid-range",
            ExtractionError::TextExtraction(_) => "error-text-extraction",
        }
    }
}

impl From<pdf::error::PdfError> for ExtractionError {
    fn from(err: pdf::error::PdfError) -> Self {
        ExtractionError::TextExtraction(err.to_string())
    }
}

//! # Document Module
//!
//! A page-indexed, line-segmented plain-text view of the recipe manual. The
//! binary PDF is turned into this shape by [`crate::pdf_text`]; everything
//! downstream only ever sees pages of lines.

use serde::{Deserialize, Serialize};

/// Page separator used by `pdftotext` style exports
pub const PAGE_BREAK: char = '\u{0C}';

/// One page of extracted text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<String>,
}

/// An immutable sequence of pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pages: Vec<Page>,
}

impl Page {
    /// Build a page from already split lines
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a page from a block of text
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }
}

impl Document {
    /// Build a document from pages of lines
    pub fn from_pages<P, L, S>(pages: P) -> Self
    where
        P: IntoIterator<Item = L>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Page::new).collect(),
        }
    }

    /// Build a document from text whose pages are separated by form feeds
    ///
    /// A trailing form feed does not produce an extra empty page.
    pub fn from_text(text: &str) -> Self {
        let text = text.strip_suffix(PAGE_BREAK).unwrap_or(text);
        if text.is_empty() {
            return Self::default();
        }
        Self {
            pages: text.split(PAGE_BREAK).map(Page::from_text).collect(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Iterate the lines of the inclusive page range `first..=last`
    ///
    /// Pages past the end of the document are skipped.
    pub fn lines_in_range(&self, first: usize, last: usize) -> impl Iterator<Item = &str> + '_ {
        self.pages
            .iter()
            .enumerate()
            .skip(first)
            .take_while(move |(index, _)| *index <= last)
            .flat_map(|(_, page)| page.lines.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_splits_pages() {
        let doc = Document::from_text("uno\ndos\u{0C}tres\u{0C}");
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page(0).unwrap().lines, vec!["uno", "dos"]);
        assert_eq!(doc.page(1).unwrap().lines, vec!["tres"]);
    }

    #[test]
    fn test_empty_text_is_empty_document() {
        assert!(Document::from_text("").is_empty());
        assert!(Document::from_text("\u{0C}").is_empty());
    }

    #[test]
    fn test_lines_in_range_is_inclusive() {
        let doc = Document::from_pages(vec![vec!["a"], vec!["b", "c"], vec!["d"]]);
        let lines: Vec<&str> = doc.lines_in_range(1, 2).collect();
        assert_eq!(lines, vec!["b", "c", "d"]);

        let lines: Vec<&str> = doc.lines_in_range(2, 10).collect();
        assert_eq!(lines, vec!["d"]);
    }
}

//! # PDF Text Module
//!
//! Reads the text layer of the recipe manual into a [`Document`]. Text drawing
//! operators are concatenated and text positioning operators that move to a new
//! baseline start a new line, which is enough for the single-column manual.

use crate::document::Document;
use crate::extraction_errors::ExtractionError;
use log::{debug, info};
use pdf::content::{Op, TextDrawAdjusted};
use pdf::file::FileOptions;
use std::fs;
use std::path::Path;

// Kerning adjustment (thousandths of an em) wide enough to stand for a space
const WORD_GAP_THRESHOLD: f32 = -200.0;

/// Load a document from disk
///
/// Files ending in `.pdf` go through the PDF text layer, anything else is read
/// as UTF-8 text with form-feed page breaks.
pub fn load_document(path: &Path) -> Result<Document, ExtractionError> {
    if !path.exists() {
        return Err(ExtractionError::NotFound(path.to_path_buf()));
    }

    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    let document = if is_pdf {
        let data = fs::read(path).map_err(|e| ExtractionError::TextExtraction(e.to_string()))?;
        document_from_pdf_bytes(&data)?
    } else {
        let text =
            fs::read_to_string(path).map_err(|e| ExtractionError::TextExtraction(e.to_string()))?;
        Document::from_text(&text)
    };

    info!(
        "Loaded document '{}' with {} pages",
        path.display(),
        document.page_count()
    );
    Ok(document)
}

/// Extract every page of an in-memory PDF
pub fn document_from_pdf_bytes(data: &[u8]) -> Result<Document, ExtractionError> {
    let file = FileOptions::cached().load(data)?;
    let resolver = file.resolver();
    let mut pages = Vec::new();

    for page_num in 0..file.num_pages() {
        let page = file.get_page(page_num)?;
        let mut builder = LineBuilder::default();
        if let Some(content) = &page.contents {
            for op in content.operations(&resolver)? {
                builder.apply(&op);
            }
        }
        let lines = builder.finish();
        debug!("Page {} yielded {} text lines", page_num, lines.len());
        pages.push(lines);
    }

    Ok(Document::from_pages(pages))
}

/// Accumulates drawn text into lines
#[derive(Default)]
struct LineBuilder {
    lines: Vec<String>,
    current: String,
    last_origin: Option<(f32, f32)>,
    word_break: bool,
}

impl LineBuilder {
    fn apply(&mut self, op: &Op) {
        match op {
            Op::TextDraw { text } => self.push_text(&text.to_string_lossy()),
            Op::TextDrawAdjusted { array } => {
                for item in array {
                    match item {
                        TextDrawAdjusted::Text(text) => self.push_text(&text.to_string_lossy()),
                        TextDrawAdjusted::Spacing(gap) if *gap < WORD_GAP_THRESHOLD => {
                            self.word_break = true
                        }
                        TextDrawAdjusted::Spacing(_) => {}
                    }
                }
            }
            Op::TextNewline | Op::EndText => self.break_line(),
            Op::MoveTextPosition { translation } if translation.y != 0.0 => self.break_line(),
            Op::MoveTextPosition { translation } if translation.x > 0.0 => self.word_break = true,
            Op::SetTextMatrix { matrix } => {
                match self.last_origin {
                    Some((_, y)) if y != matrix.f => self.break_line(),
                    Some((x, _)) if x != matrix.e => self.word_break = true,
                    _ => {}
                }
                self.last_origin = Some((matrix.e, matrix.f));
            }
            _ => {}
        }
    }

    /// Append drawn text, separated from the previous word when the pen moved along the baseline
    fn push_text(&mut self, text: &str) {
        if self.word_break
            && !self.current.is_empty()
            && !self.current.ends_with(char::is_whitespace)
            && !text.starts_with(char::is_whitespace)
        {
            self.current.push(' ');
        }
        self.word_break = false;
        self.current.push_str(text);
    }

    fn break_line(&mut self) {
        self.word_break = false;
        if !self.current.trim().is_empty() {
            self.lines.push(std::mem::take(&mut self.current));
        } else {
            self.current.clear();
        }
    }

    fn finish(mut self) -> Vec<String> {
        self.break_line();
        self.lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_file_with_suffix(suffix: &str) -> NamedTempFile {
        Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = load_document(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, ExtractionError::NotFound(_)));
    }

    #[test]
    fn test_plain_text_export_is_loaded() {
        let mut file = temp_file_with_suffix(".txt");
        write!(file, "ATOLES\nATOL DE MAIZ\u{0C}CALDOS").unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.page(1).unwrap().lines, vec!["CALDOS"]);
    }

    /// Single-page PDF with a Helvetica font and the given content stream
    fn one_page_pdf(content: &str) -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (index, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", index + 1, body).as_bytes());
        }

        let xref_offset = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
                objects.len() + 1,
                xref_offset
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn test_words_on_one_baseline_keep_their_spaces() {
        let content = concat!(
            "BT /F1 12 Tf 100 750 Td (ATOLES) Tj 0 -20 Td (ATOL DE MAIZ) Tj ET\n",
            "BT /F1 12 Tf 1 0 0 1 100 700 Tm (ATOL) Tj 1 0 0 1 140 700 Tm (DE) Tj ",
            "1 0 0 1 160 700 Tm (ARROZ) Tj ET\n",
            "BT /F1 12 Tf 100 650 Td (100) Tj 25 0 Td (g) Tj 10 0 Td (Arroz) Tj ET\n",
            "BT /F1 12 Tf 100 600 Td [(GALLO) -250 (PINTO)] TJ ET",
        );

        let doc = document_from_pdf_bytes(&one_page_pdf(content)).unwrap();

        assert_eq!(doc.page_count(), 1);
        assert_eq!(
            doc.page(0).unwrap().lines,
            vec!["ATOLES", "ATOL DE MAIZ", "ATOL DE ARROZ", "100 g Arroz", "GALLO PINTO"]
        );
    }

    #[test]
    fn test_pdf_file_is_loaded_through_the_text_layer() {
        let mut file = temp_file_with_suffix(".pdf");
        file.write_all(&one_page_pdf("BT /F1 12 Tf 100 750 Td (CALDOS) Tj ET"))
            .unwrap();

        let doc = load_document(file.path()).unwrap();
        assert_eq!(doc.page(0).unwrap().lines, vec!["CALDOS"]);
    }

    #[test]
    fn test_garbage_pdf_is_a_text_extraction_error() {
        let mut file = temp_file_with_suffix(".pdf");
        file.write_all(b"not a pdf at all").unwrap();

        let err = load_document(file.path()).unwrap_err();
        assert!(matches!(err, ExtractionError::TextExtraction(_)));
    }
}

//! # Sheet Report Module
//!
//! Lays out a technical sheet for printing. The actual document format is the
//! business of a [`ReportCanvas`] implementation; this module decides what goes
//! where and when a page is full.

use crate::recipe_model::IngredientLine;
use crate::technical_sheet::TechnicalSheet;

/// Letter page height in points
pub const PAGE_HEIGHT: f32 = 792.0;
/// Baseline of the first line on a page
pub const TOP_Y: f32 = 750.0;
/// Lines below this baseline move to the next page
pub const BOTTOM_MARGIN: f32 = 50.0;
pub const LINE_HEIGHT: f32 = 20.0;
pub const HEADING_X: f32 = 100.0;
pub const ITEM_X: f32 = 120.0;
/// Longest step text printed on one line
pub const MAX_STEP_CHARS: usize = 80;

/// Drawing surface of a paginated document
pub trait ReportCanvas {
    /// Draw text with its baseline at `(x, y)`, origin at the bottom left
    fn draw_text(&mut self, x: f32, y: f32, text: &str);
    /// Finish the current page
    fn show_page(&mut self);
}

/// Canvas that keeps the drawn text of each page, top to bottom
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TextCanvas {
    pages: Vec<Vec<String>>,
    current: Vec<(f32, f32, String)>,
}

impl TextCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pages(&self) -> &[Vec<String>] {
        &self.pages
    }

    /// All pages as plain text, pages separated by form feeds
    pub fn to_text(&self) -> String {
        self.pages
            .iter()
            .map(|page| page.join("\n"))
            .collect::<Vec<_>>()
            .join("\u{0C}")
    }
}

impl ReportCanvas for TextCanvas {
    fn draw_text(&mut self, x: f32, y: f32, text: &str) {
        self.current.push((x, y, text.to_string()));
    }

    fn show_page(&mut self) {
        let mut items = std::mem::take(&mut self.current);
        items.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.total_cmp(&b.0)));
        let indent = |x: f32| " ".repeat(((x - HEADING_X).max(0.0) / 10.0) as usize);
        self.pages
            .push(items.into_iter().map(|(x, _, text)| format!("{}{}", indent(x), text)).collect());
    }
}

/// Cursor that breaks pages as lines are written
struct PageWriter<'a, C: ReportCanvas> {
    canvas: &'a mut C,
    y: f32,
}

impl<'a, C: ReportCanvas> PageWriter<'a, C> {
    fn new(canvas: &'a mut C) -> Self {
        Self { canvas, y: TOP_Y }
    }

    fn line(&mut self, x: f32, text: &str) {
        if self.y < BOTTOM_MARGIN {
            self.canvas.show_page();
            self.y = TOP_Y;
        }
        self.canvas.draw_text(x, self.y, text);
        self.y -= LINE_HEIGHT;
    }

    fn finish(self) {
        self.canvas.show_page();
    }
}

/// Render a technical sheet with its ingredient lines
pub fn render_sheet<C: ReportCanvas>(sheet: &TechnicalSheet, ingredients: &[IngredientLine], canvas: &mut C) {
    let mut writer = PageWriter::new(canvas);

    writer.line(HEADING_X, &format!("Ficha Técnica: {}", sheet.name));
    writer.line(HEADING_X, &format!("Código: {}", sheet.code));
    writer.line(HEADING_X, &format!("Tipo: {}", sheet.meal_type));
    writer.line(HEADING_X, &format!("Categoría: {}", sheet.category));

    writer.line(HEADING_X, "Ingredientes:");
    for ingredient in ingredients {
        writer.line(ITEM_X, &ingredient.to_string());
    }

    writer.line(HEADING_X, "Pasos de Preparación:");
    for step in sheet.step_lines() {
        let step: String = step.chars().take(MAX_STEP_CHARS).collect();
        writer.line(ITEM_X, &step);
    }

    let n = &sheet.nutrition;
    writer.line(
        HEADING_X,
        &format!(
            "Nutrición: {:.1} kcal, {:.1} g proteína, {:.1} g grasa, {:.1} g carbohidratos",
            n.energy, n.protein, n.fat, n.carbs
        ),
    );
    writer.line(HEADING_X, &format!("Costo Estimado: ${:.2}", n.cost));
    writer.line(HEADING_X, &format!("Porciones: {}", sheet.portions));
    writer.finish();
}

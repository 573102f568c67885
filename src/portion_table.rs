//! # Portion Table Module
//!
//! The back of the manual lists, for several serving counts, how much of each
//! ingredient a preparation needs:
//!
//! ```text
//! 10 PORCIONES
//! Arroz: 250.00 g
//! Leche: 1200.00 ml
//! ```
//!
//! [`load_portions`] turns those pages into a lookup of ingredient name to
//! serving count to quantity.

use crate::document::Document;
use crate::line_patterns::{PORTION_HEADER_REGEX, PORTION_QUANTITY_REGEX};
use crate::recipe_model::Unit;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Quantity of one ingredient for one serving count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortionQuantity {
    pub quantity: f64,
    pub unit: Unit,
}

/// Ingredient name → serving count → quantity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortionTable {
    entries: HashMap<String, BTreeMap<u32, PortionQuantity>>,
}

impl PortionTable {
    /// Record a quantity, replacing any earlier one for the same name and size
    pub fn insert(&mut self, name: &str, portion_size: u32, quantity: PortionQuantity) {
        self.entries
            .entry(name.trim().to_string())
            .or_default()
            .insert(portion_size, quantity);
    }

    /// Quantity of an ingredient for a serving count
    pub fn get(&self, name: &str, portion_size: u32) -> Option<PortionQuantity> {
        self.entries.get(name)?.get(&portion_size).copied()
    }

    /// All serving counts known for an ingredient
    pub fn sizes_for(&self, name: &str) -> Option<&BTreeMap<u32, PortionQuantity>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of distinct ingredients
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the portion table from the inclusive page range `first..=last`
///
/// The active serving count carries over page breaks and only changes on a new
/// `<N> PORCIONES` header. Quantity lines seen before any header are dropped.
pub fn load_portions(document: &Document, first: usize, last: usize) -> PortionTable {
    let mut table = PortionTable::default();
    let mut current_size: Option<u32> = None;
    let mut recorded = 0usize;

    for line in document.lines_in_range(first, last) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = PORTION_HEADER_REGEX.captures(line) {
            current_size = caps["size"].parse::<u32>().ok().filter(|size| *size > 0);
            continue;
        }

        let Some(caps) = PORTION_QUANTITY_REGEX.captures(line) else {
            continue;
        };
        let Some(size) = current_size else {
            debug!("Portion quantity before any PORCIONES header dropped: '{}'", line);
            continue;
        };
        let (Ok(quantity), Ok(unit)) = (caps["quantity"].parse::<f64>(), caps["unit"].parse::<Unit>())
        else {
            continue;
        };

        table.insert(&caps["name"], size, PortionQuantity { quantity, unit });
        recorded += 1;
    }

    info!(
        "Loaded portion table from pages {}-{}: {} quantities for {} ingredients",
        first,
        last,
        recorded,
        table.len()
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_then_quantity() {
        let doc = Document::from_pages(vec![vec!["5 PORCIONES", "IngredientName: 12.50 g"]]);
        let table = load_portions(&doc, 0, 0);
        assert_eq!(
            table.get("IngredientName", 5),
            Some(PortionQuantity {
                quantity: 12.5,
                unit: Unit::Grams
            })
        );
    }

    #[test]
    fn test_last_write_wins() {
        let doc = Document::from_pages(vec![vec![
            "10 PORCIONES",
            "Leche: 100.00 ml",
            "Leche: 150.00 ml",
        ]]);
        let table = load_portions(&doc, 0, 0);
        assert_eq!(table.get("Leche", 10).unwrap().quantity, 150.0);
        assert_eq!(table.sizes_for("Leche").unwrap().len(), 1);
    }

    #[test]
    fn test_quantity_without_header_is_dropped() {
        let doc = Document::from_pages(vec![vec!["Arroz: 10.00 g", "1 PORCIONES", "Arroz: 25.00 g"]]);
        let table = load_portions(&doc, 0, 0);
        assert_eq!(table.sizes_for("Arroz").unwrap().len(), 1);
        assert_eq!(table.get("Arroz", 1).unwrap().quantity, 25.0);
    }

    #[test]
    fn test_size_carries_over_page_breaks() {
        let doc = Document::from_pages(vec![
            vec!["5 PORCIONES", "Arroz: 50.00 g"],
            vec!["Frijoles: 30.00 g"],
        ]);
        let table = load_portions(&doc, 0, 1);
        assert_eq!(table.get("Frijoles", 5).unwrap().quantity, 30.0);
    }

    #[test]
    fn test_several_sizes_and_range_limits() {
        let doc = Document::from_pages(vec![
            vec!["1 PORCIONES", "Arroz: 5.00 g"],
            vec!["5 PORCIONES", "Arroz: 25.00 g", "Azúcar: 10.00 g"],
            vec!["10 PORCIONES", "Arroz: 50.00 g"],
        ]);
        let table = load_portions(&doc, 0, 1);
        assert_eq!(table.get("Arroz", 1).unwrap().quantity, 5.0);
        assert_eq!(table.get("Arroz", 5).unwrap().quantity, 25.0);
        assert_eq!(table.get("Arroz", 10), None);
        assert!(table.contains("Azúcar"));
        assert_eq!(table.len(), 2);
    }
}

//! # Category Sections Module
//!
//! The manual groups recipes under a closed set of section headings. Each
//! heading fixes the meal type and category of every recipe listed under it.

use serde::{Deserialize, Serialize};

/// Meal type / category pair for headings outside the known set
pub const UNKNOWN: &str = "Unknown";

/// A known section heading and the classification it implies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategorySection {
    pub heading: &'static str,
    pub meal_type: &'static str,
    pub category: &'static str,
}

/// Meal type and category assigned to a recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub meal_type: String,
    pub category: String,
}

const fn section(
    heading: &'static str,
    meal_type: &'static str,
    category: &'static str,
) -> CategorySection {
    CategorySection {
        heading,
        meal_type,
        category,
    }
}

/// Every section heading of the manual
pub static SECTIONS: [CategorySection; 22] = [
    section("BEBIDAS PARA DESAYUNO", "Desayuno", "Bebida"),
    section("BEBIDAS PARA COMPLEMENTOS", "Complemento", "Bebida"),
    section("FRUTAS PARA COMPLEMENTOS Y ALMUERZO", "Complemento/Almuerzo", "Fruta"),
    section("ENSALADAS PARA COMPLEMENTOS", "Complemento", "Ensalada"),
    section("ENSALADAS PARA ALMUERZO", "Almuerzo", "Ensalada"),
    section("ADEREZOS PARA ENSALADA", "Complemento/Almuerzo", "Aderezo"),
    section("PREPARACIONES BÁSICAS Y ACOMPANAMIENTOS", "Complemento/Almuerzo", "Acompañamiento"),
    section("DESCRIPCIÓN DE OPCIONES PARA DESAYUNO", "Desayuno", "Plato Principal"),
    section("PLATOS PRINCIPALES DE COMPLEMENTO", "Complemento", "Plato Principal"),
    section("ADICIONALES DE COMPLEMENTO", "Complemento", "Adicional"),
    section("PLATOS PRINCIPALES DE ALMUERZO", "Almuerzo", "Plato Principal"),
    section("ADICIONALES DE ALMUERZO", "Almuerzo", "Adicional"),
    section("ATOLES", "Especial", "Atole"),
    section("COMPOTAS", "Especial", "Compota"),
    section("CALDOS", "Especial", "Caldo"),
    section("CARNES PROCESADAS", "Especial", "Carne"),
    section("PURÉS HARINOSOS", "Especial", "Puré"),
    section("PURÉS VEGETALES", "Especial", "Puré"),
    section("CREMAS", "Especial", "Crema"),
    section("OPCIONES DE MENÚ PARA COMPLEMENTOS EN EFEMÉRIDES", "Efemérides", "Complemento"),
    section("OPCIONES DE MENÚ PARA ALMUERZOS EN EFEMÉRIDES", "Efemérides", "Almuerzo"),
    section("OPCIONES PARA CELEBRACIONES", "Efemérides", "Celebración"),
];

/// Marker carried by the headings whose entries are calendar events
pub const EVENTS_MARKER: &str = "EFEMÉRIDES";

/// Find the known heading matching a line, ignoring case
pub fn find_heading(line: &str) -> Option<&'static CategorySection> {
    let upper = line.trim().to_uppercase();
    SECTIONS.iter().find(|s| s.heading == upper)
}

/// Meal type and category for a heading, degrading to `Unknown/Unknown`
pub fn classify_heading(heading: &str) -> Classification {
    match find_heading(heading) {
        Some(section) => Classification {
            meal_type: section.meal_type.to_string(),
            category: section.category.to_string(),
        },
        None => Classification {
            meal_type: UNKNOWN.to_string(),
            category: UNKNOWN.to_string(),
        },
    }
}

/// Whether a heading introduces calendar event entries
pub fn is_events_heading(heading: &str) -> bool {
    heading.to_uppercase().contains(EVENTS_MARKER)
}

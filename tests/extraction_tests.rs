//! # Extraction Tests
//!
//! End-to-end tests of the extraction entry points over in-memory manuals.

use school_menus::category_sections::classify_heading;
use school_menus::document::Document;
use school_menus::extraction_errors::ExtractionError;
use school_menus::extractor::{extract, extract_from_path};
use school_menus::line_classifier::{classify, ClassifierState, ParseMode, Token};
use school_menus::nutrition::resolve;
use school_menus::portion_table::load_portions;
use school_menus::recipe_model::{IngredientLine, NutrientCoefficients, Unit};
use std::io::Write;
use std::path::Path;

fn manual() -> Document {
    Document::from_text(concat!(
        "PLATOS PRINCIPALES DE ALMUERZO\n",
        "ARROZ CON POLLO\n",
        "INGREDIENTES\n",
        "100 g Arroz\n",
        "Una pizca de sal\n",
        "50 g Frijoles\n",
        "PREPARACIÓN\n",
        "1. Cocinar.\n",
        "\u{0C}",
        "BEBIDAS PARA DESAYUNO\n",
        "CAFE CON LECHE\n",
        "TE DE MANZANILLA\n",
        "Ingredientes\n",
        "250 ml Agua\n",
        "1 unidad Bolsa de té\n",
        "\u{0C}",
        "OPCIONES DE MENÚ PARA ALMUERZOS EN EFEMÉRIDES\n",
        "DIA DE LA MADRE\n",
        "DIA DEL NIÑO\n",
        "4 PORCIONES\n",
        "Arroz: 12.50 g\n",
        "Arroz: 13.00 g\n",
    ))
}

#[test]
fn test_extract_recipes_in_emission_order() {
    let extraction = extract(&manual(), 0, 1).unwrap();

    let codes: Vec<&str> = extraction.recipes.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["REC-001", "REC-002", "REC-003"]);

    let arroz = &extraction.recipes[0];
    assert_eq!(arroz.name, "ARROZ CON POLLO");
    assert_eq!(arroz.meal_type, "Almuerzo");
    assert_eq!(arroz.category, "Plato Principal");
    assert_eq!(arroz.portions, "1,5,10");
    assert_eq!(arroz.ingredients.len(), 2);
    assert_eq!(arroz.ingredients[0].name, "Arroz");
    assert_eq!(arroz.ingredients[0].quantity, 100.0);
    assert_eq!(arroz.ingredients[0].unit, Unit::Grams);
    assert_eq!(arroz.ingredients[1].name, "Frijoles");
    assert_eq!(arroz.ingredients[1].quantity, 50.0);
    assert_eq!(arroz.steps, vec!["1. Cocinar.".to_string()]);
}

#[test]
fn test_consecutive_titles_make_separate_recipes() {
    let extraction = extract(&manual(), 0, 1).unwrap();

    let cafe = &extraction.recipes[1];
    assert_eq!(cafe.name, "CAFE CON LECHE");
    assert!(cafe.ingredients.is_empty());
    assert!(cafe.steps.is_empty());

    let te = &extraction.recipes[2];
    assert_eq!(te.meal_type, "Desayuno");
    assert_eq!(te.category, "Bebida");
    assert_eq!(te.ingredients.len(), 2);
    assert_eq!(te.ingredients[1].unit, Unit::Pieces);
}

#[test]
fn test_scraped_ingredients_are_unresolved() {
    let extraction = extract(&manual(), 0, 0).unwrap();
    let arroz = &extraction.recipes[0];

    assert_eq!(arroz.unresolved_count(), 2);
    assert!(arroz
        .ingredients
        .iter()
        .all(|i| i.coefficients == NutrientCoefficients::placeholder()));
    // zero energy leaves the placeholder cost unscaled
    assert!((arroz.nutrition.cost - 1.5).abs() < 1e-9);
    assert_eq!(arroz.nutrition.energy, 0.0);
}

#[test]
fn test_events_from_clamped_event_pages() {
    let extraction = extract(&manual(), 0, 1).unwrap();

    let names: Vec<&str> = extraction.events.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["DIA DE LA MADRE", "DIA DEL NIÑO"]);
    assert!(extraction
        .events
        .iter()
        .all(|e| e.recipe_ordinal == 4 && e.date == "2025-05-11"));
}

#[test]
fn test_portion_table_last_write_wins() {
    let extraction = extract(&manual(), 0, 1).unwrap();
    let quantity = extraction.portions.get("Arroz", 4).unwrap();

    assert_eq!(quantity.quantity, 13.0);
    assert_eq!(quantity.unit, Unit::Grams);
}

#[test]
fn test_portion_size_survives_page_break() {
    let doc = Document::from_text("10 PORCIONES\nLeche: 250 ml\n\u{0C}Avena: 30.5 g\n");
    let table = load_portions(&doc, 0, 1);

    assert_eq!(table.get("Leche", 10).unwrap().unit, Unit::Milliliters);
    assert_eq!(table.get("Avena", 10).unwrap().quantity, 30.5);
}

#[test]
fn test_malformed_content_is_skipped() {
    let doc = Document::from_text(concat!(
        "???\n",
        "ARROZ HUERFANO\n",
        "100 g Arroz\n",
        "ATOLES\n",
        "ATOL DE AVENA\n",
        "Preparación\n",
        "Mezclar bien\n",
        "2. Servir.\n",
        "Ingredientes\n",
        "mucho arroz\n",
        "30 kg Avena\n",
    ));

    let extraction = extract(&doc, 0, 0).unwrap();
    assert_eq!(extraction.recipes.len(), 1);
    assert_eq!(extraction.recipes[0].name, "ATOL DE AVENA");
    assert_eq!(extraction.recipes[0].steps, vec!["2. Servir.".to_string()]);
    assert!(extraction.recipes[0].ingredients.is_empty());
}

#[test]
fn test_range_errors() {
    let doc = manual();

    assert_eq!(
        extract(&doc, 2, 1).unwrap_err(),
        ExtractionError::InvalidRange {
            start: 2,
            end: 1,
            page_count: 3
        }
    );
    assert!(matches!(
        extract(&doc, 0, 3),
        Err(ExtractionError::InvalidRange { .. })
    ));
    assert_eq!(
        extract(&Document::default(), 0, 0).unwrap_err(),
        ExtractionError::EmptyDocument
    );
    assert!(matches!(
        extract_from_path(Path::new("/no/such/menu.pdf"), 0, 0),
        Err(ExtractionError::NotFound(_))
    ));
}

#[test]
fn test_extract_from_text_file() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all("ATOLES\nATOL DE MAIZ\n\u{0C}CALDOS\nCALDO DE RES\n".as_bytes())
        .unwrap();

    let extraction = extract_from_path(file.path(), 0, 1).unwrap();
    assert_eq!(extraction.recipes.len(), 2);
    assert_eq!(extraction.recipes[1].category, "Caldo");
}

#[test]
fn test_heading_checked_before_title() {
    let state = ClassifierState {
        section: Some("ATOLES"),
        mode: ParseMode::Header,
    };

    assert_eq!(classify("compotas", &state), Some(Token::SectionHeader("COMPOTAS")));
    assert_eq!(classify("INGREDIENTES", &state), Some(Token::IngredientsMarker));
    assert_eq!(classify("PREPARACIÓN", &state), Some(Token::StepsMarker));
}

#[test]
fn test_unknown_heading_classification() {
    let classification = classify_heading("POSTRES");
    assert_eq!(classification.meal_type, "Unknown");
    assert_eq!(classification.category, "Unknown");
}

#[test]
fn test_resolve_scales_below_target() {
    let coefficients = NutrientCoefficients {
        energy: 2.0,
        protein: 0.1,
        fat: 0.05,
        carbs: 0.3,
        cost: 0.01,
    };
    let ingredients = vec![IngredientLine::new("Avena", 100.0, Unit::Grams).with_coefficients(coefficients)];

    let breakfast = resolve(&ingredients, "Desayuno");
    assert!((breakfast.energy - 210.0).abs() < 1e-9);
    assert!((breakfast.cost - 1.05).abs() < 1e-9);
    assert!((breakfast.protein - 10.5).abs() < 1e-9);

    let special = resolve(&ingredients, "Especial");
    assert!((special.energy - 300.0).abs() < 1e-9);

    let zero = resolve(
        &[IngredientLine::new("Agua", 100.0, Unit::Milliliters)],
        "Desayuno",
    );
    assert_eq!(zero.energy, 0.0);
    assert!((zero.cost - 1.0).abs() < 1e-9);
}

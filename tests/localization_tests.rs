//! # Localization Tests
//!
//! Message retrieval, fallback and argument formatting.

use school_menus::extraction_errors::ExtractionError;
use school_menus::localization::LocalizationManager;
use std::collections::HashMap;
use std::path::PathBuf;

fn setup_localization() -> LocalizationManager {
    LocalizationManager::new().expect("Failed to create localization manager")
}

#[test]
fn test_get_message_nonexistent_key() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("nonexistent-key", "en", None);
    assert_eq!(message, "Missing translation: nonexistent-key");
}

#[test]
fn test_unsupported_language_falls_back_to_spanish() {
    let manager = setup_localization();

    let message = manager.get_message_in_language("error-empty-document", "fr", None);
    assert_eq!(message, "El documento PDF está vacío.");
}

#[test]
fn test_get_message_with_args_map() {
    let manager = setup_localization();
    let mut args = HashMap::new();
    args.insert("events", "3".to_string());

    let message = manager.get_message_in_language("import-events", "en", Some(&args));
    assert_eq!(message, "3 calendar events recorded");
}

#[test]
fn test_invalid_range_message() {
    let manager = setup_localization();
    let error = ExtractionError::InvalidRange {
        start: 40,
        end: 300,
        page_count: 280,
    };

    let message = manager.extraction_error(&error, "es");
    assert_eq!(
        message,
        "Error al extraer recetas: Rango de páginas inválido: 40-300. El PDF tiene 280 páginas."
    );
}

#[test]
fn test_not_found_message_names_the_file() {
    let manager = setup_localization();
    let error = ExtractionError::NotFound(PathBuf::from("menu-primaria.pdf"));

    let message = manager.extraction_error(&error, "en");
    assert!(message.contains("'menu-primaria.pdf' not found"));
}

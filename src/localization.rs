use crate::extraction_errors::ExtractionError;
use anyhow::Result;
use fluent_bundle::{FluentArgs, FluentBundle, FluentResource, FluentValue};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Language used when a requested one has no bundle
pub const FALLBACK_LANGUAGE: &str = "es";

const RESOURCES: [(&str, &str); 2] = [
    ("es", include_str!("../locales/es/main.ftl")),
    ("en", include_str!("../locales/en/main.ftl")),
];

/// Localization manager for user-visible messages
pub struct LocalizationManager {
    bundles: HashMap<String, FluentBundle<FluentResource>>,
}

impl LocalizationManager {
    /// Create a manager with every bundled language
    pub fn new() -> Result<Self> {
        let mut bundles = HashMap::new();

        for (language, source) in RESOURCES {
            let locale: LanguageIdentifier = language.parse()?;
            bundles.insert(language.to_string(), Self::create_bundle(locale, source)?);
        }

        Ok(Self { bundles })
    }

    /// Create a fluent bundle for a specific locale
    fn create_bundle(locale: LanguageIdentifier, source: &str) -> Result<FluentBundle<FluentResource>> {
        let mut bundle = FluentBundle::new(vec![locale]);
        bundle.set_use_isolating(false);

        let resource = FluentResource::try_new(source.to_string())
            .map_err(|(_, errors)| anyhow::anyhow!("Invalid FTL resource: {:?}", errors))?;
        bundle
            .add_resource(resource)
            .map_err(|errors| anyhow::anyhow!("Failed to add FTL resource: {:?}", errors))?;

        Ok(bundle)
    }

    pub fn is_supported(&self, language: &str) -> bool {
        self.bundles.contains_key(language)
    }

    /// Get a localized message, falling back to Spanish for unknown languages
    pub fn get_message_in_language(
        &self,
        key: &str,
        language: &str,
        args: Option<&HashMap<&str, String>>,
    ) -> String {
        let Some(bundle) = self
            .bundles
            .get(language)
            .or_else(|| self.bundles.get(FALLBACK_LANGUAGE))
        else {
            return format!("Missing translation: {}", key);
        };

        let Some(pattern) = bundle.get_message(key).and_then(|msg| msg.value()) else {
            return format!("Missing translation: {}", key);
        };

        let fluent_args = args.map(|args| {
            let mut fluent_args = FluentArgs::new();
            for (name, value) in args {
                fluent_args.set(*name, FluentValue::from(value.as_str()));
            }
            fluent_args
        });

        let mut errors = vec![];
        bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors)
            .into_owned()
    }

    /// Get a localized message with simple string arguments
    pub fn get_message_with_args(&self, key: &str, language: &str, args: &[(&str, String)]) -> String {
        let args_map: HashMap<&str, String> = args.iter().cloned().collect();
        self.get_message_in_language(key, language, Some(&args_map))
    }

    /// User-facing description of an extraction failure
    pub fn extraction_error(&self, error: &ExtractionError, language: &str) -> String {
        let args: Vec<(&str, String)> = match error {
            ExtractionError::NotFound(path) => vec![("path", path.display().to_string())],
            ExtractionError::EmptyDocument => vec![],
            ExtractionError::InvalidRange {
                start,
                end,
                page_count,
            } => vec![
                ("start", start.to_string()),
                ("end", end.to_string()),
                ("page_count", page_count.to_string()),
            ],
            ExtractionError::TextExtraction(details) => vec![("details", details.clone())],
        };
        let reason = self.get_message_with_args(error.message_key(), language, &args);
        self.get_message_with_args("extraction-failed", language, &[("reason", reason)])
    }
}

#![forbid(unsafe_code)]

//! Fixed labels of the refiner panel.
//!
//! Labels live in an `ftui-i18n` [`StringCatalog`] keyed by the primary
//! language subtag, with English as the fallback chain.

use ftui_i18n::catalog::{LocaleStrings, StringCatalog};
use ftui_refiners_core::StringOverrides;

pub const FALLBACK_LOCALE: &str = "en";

pub const KEY_FILTER_RESULTS_BUTTON: &str = "refiners.filter_results_button";
pub const KEY_FILTER_PANEL_TITLE: &str = "refiners.filter_panel_title";
pub const KEY_REMOVE_ALL_FILTERS: &str = "refiners.remove_all_filters";
pub const KEY_NO_FILTER_CONFIGURED: &str = "refiners.no_filter_configured";
pub const KEY_VALUE_FILTER_PLACEHOLDER: &str = "refiners.value_filter_placeholder";

/// Built-in English and French labels.
#[must_use]
pub fn build_catalog() -> StringCatalog {
    let mut catalog = StringCatalog::new();

    let mut en = LocaleStrings::new();
    en.insert(KEY_FILTER_RESULTS_BUTTON, "Filters");
    en.insert(KEY_FILTER_PANEL_TITLE, "Available filters");
    en.insert(KEY_REMOVE_ALL_FILTERS, "Remove all filters");
    en.insert(KEY_NO_FILTER_CONFIGURED, "No filter configured");
    en.insert(KEY_VALUE_FILTER_PLACEHOLDER, "Filter values...");
    catalog.add_locale("en", en);

    let mut fr = LocaleStrings::new();
    fr.insert(KEY_FILTER_RESULTS_BUTTON, "Filtres");
    fr.insert(KEY_FILTER_PANEL_TITLE, "Filtres disponibles");
    fr.insert(KEY_REMOVE_ALL_FILTERS, "Supprimer tous les filtres");
    fr.insert(KEY_NO_FILTER_CONFIGURED, "Aucun filtre configur\u{e9}");
    fr.insert(KEY_VALUE_FILTER_PLACEHOLDER, "Filtrer les valeurs...");
    catalog.add_locale("fr", fr);

    catalog.set_fallback_chain(vec![FALLBACK_LOCALE.into()]);
    catalog
}

/// Primary subtag of a language tag: `fr-CA` and `fr_ca` give `fr`.
#[must_use]
pub fn primary_subtag(language: &str) -> String {
    language
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Localized labels, resolved once per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefinerStrings {
    pub filter_results_button: String,
    pub filter_panel_title: String,
    pub remove_all_filters: String,
    pub no_filter_configured: String,
    pub value_filter_placeholder: String,
}

impl RefinerStrings {
    #[must_use]
    pub fn english() -> Self {
        Self::for_language("en")
    }

    #[must_use]
    pub fn french() -> Self {
        Self::for_language("fr")
    }

    /// Labels for a language tag such as `fr-fr`, from the built-in catalog.
    #[must_use]
    pub fn for_language(language: &str) -> Self {
        Self::from_catalog(&build_catalog(), language)
    }

    /// Labels for `language` from `catalog`. Languages the catalog lacks
    /// resolve through its fallback chain; a key missing everywhere shows
    /// the key itself.
    #[must_use]
    pub fn from_catalog(catalog: &StringCatalog, language: &str) -> Self {
        let locale = primary_subtag(language);
        let label = |key: &str| match catalog.get(&locale, key) {
            Some(text) => text.to_owned(),
            None => {
                tracing::debug!(
                    target: "ftui.refiners",
                    locale = %locale,
                    key,
                    "label missing from catalog"
                );
                key.to_owned()
            }
        };
        Self {
            filter_results_button: label(KEY_FILTER_RESULTS_BUTTON),
            filter_panel_title: label(KEY_FILTER_PANEL_TITLE),
            remove_all_filters: label(KEY_REMOVE_ALL_FILTERS),
            no_filter_configured: label(KEY_NO_FILTER_CONFIGURED),
            value_filter_placeholder: label(KEY_VALUE_FILTER_PLACEHOLDER),
        }
    }

    /// Apply configured overrides on top of the localized labels.
    #[must_use]
    pub fn with_overrides(mut self, overrides: &StringOverrides) -> Self {
        if let Some(text) = &overrides.filter_results_button {
            self.filter_results_button.clone_from(text);
        }
        if let Some(text) = &overrides.filter_panel_title {
            self.filter_panel_title.clone_from(text);
        }
        if let Some(text) = &overrides.remove_all_filters {
            self.remove_all_filters.clone_from(text);
        }
        if let Some(text) = &overrides.no_filter_configured {
            self.no_filter_configured.clone_from(text);
        }
        if let Some(text) = &overrides.value_filter_placeholder {
            self.value_filter_placeholder.clone_from(text);
        }
        self
    }
}

impl Default for RefinerStrings {
    fn default() -> Self {
        Self::english()
    }
}

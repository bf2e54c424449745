#![forbid(unsafe_code)]

//! Refiner configuration lookup and panel settings.
//!
//! Two concerns live here:
//!
//! - **Lookup**: resolving the configuration entry and display name for a
//!   facet. Lookups never fail; a facet without configuration resolves to
//!   [`ConfigLookup::Missing`] and callers pick a defined fallback.
//! - **Settings**: [`RefinersSettings`], the panel configuration that can be
//!   loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # refiners.toml
//! group_identity = "facet_name"
//! language = "en-us"
//! theme = "dark"
//! panel_width = 56
//!
//! [[refiners]]
//! refinerName = "RefinableString01"
//! displayValue = "Color"
//! showExpanded = true
//! template = "CheckBoxMultiTemplate"
//!
//! [strings]
//! filter_panel_title = "Refine"
//! ```
//!
//! ```rust,ignore
//! let settings = RefinersSettings::from_file("refiners.toml")?;
//! let issues = settings.validate();
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::context::{RenderContext, ThemeVariant};
use crate::groups::GroupIdentity;
use crate::model::RefinerConfiguration;

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Result of looking up the configuration of one facet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLookup<'a> {
    Found(&'a RefinerConfiguration),
    Missing,
}

impl<'a> ConfigLookup<'a> {
    #[must_use]
    pub fn found(self) -> Option<&'a RefinerConfiguration> {
        match self {
            Self::Found(cfg) => Some(cfg),
            Self::Missing => None,
        }
    }

    #[must_use]
    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Find the configuration entry for `facet`. The first entry wins when the
/// collection holds duplicates.
#[must_use]
pub fn lookup<'a>(configuration: &'a [RefinerConfiguration], facet: &str) -> ConfigLookup<'a> {
    configuration
        .iter()
        .find(|cfg| cfg.refiner_name == facet)
        .map_or(ConfigLookup::Missing, ConfigLookup::Found)
}

/// Label for `facet`: the configured display value when present and
/// non-empty, the raw facet name otherwise.
#[must_use]
pub fn display_name<'a>(configuration: &'a [RefinerConfiguration], facet: &'a str) -> &'a str {
    match lookup(configuration, facet) {
        ConfigLookup::Found(cfg) if !cfg.display_value.is_empty() => &cfg.display_value,
        _ => facet,
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Overrides for the panel's fixed labels. `None` keeps the localized default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringOverrides {
    pub filter_results_button: Option<String>,
    pub filter_panel_title: Option<String>,
    pub remove_all_filters: Option<String>,
    pub no_filter_configured: Option<String>,
    pub value_filter_placeholder: Option<String>,
}

/// Panel settings loaded at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefinersSettings {
    /// Per-facet configuration.
    pub refiners: Vec<RefinerConfiguration>,
    /// How groups are matched across recomputations.
    pub group_identity: GroupIdentity,
    pub language: String,
    pub theme: ThemeVariant,
    /// Overlay panel width in columns.
    pub panel_width: u16,
    pub strings: StringOverrides,
}

impl Default for RefinersSettings {
    fn default() -> Self {
        Self {
            refiners: Vec::new(),
            group_identity: GroupIdentity::default(),
            language: "en-us".to_owned(),
            theme: ThemeVariant::default(),
            panel_width: 56,
            strings: StringOverrides::default(),
        }
    }
}

impl RefinersSettings {
    /// Parse settings from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Parse settings from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load settings from a `.toml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, ConfigError> = match extension.as_deref() {
            Some("toml") => Self::from_toml_str,
            Some("json") => Self::from_json_str,
            _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        };
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = parse(&content)?;
        tracing::debug!(
            target: "ftui.refiners",
            path = %path.display(),
            refiners = settings.refiners.len(),
            "refiner settings loaded"
        );
        Ok(settings)
    }

    /// Render context for the configured language and theme.
    #[must_use]
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(&self.language, self.theme)
    }

    /// Report configuration that will load but behave surprisingly.
    ///
    /// Each issue is also logged at `warn`.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        let mut seen_names: HashMap<&str, usize> = HashMap::new();
        let mut seen_labels: HashMap<&str, &str> = HashMap::new();

        for cfg in &self.refiners {
            let count = seen_names.entry(cfg.refiner_name.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                issues.push(ConfigIssue::DuplicateRefiner {
                    refiner_name: cfg.refiner_name.clone(),
                });
            }
            if cfg.display_value.trim().is_empty() {
                issues.push(ConfigIssue::EmptyDisplayValue {
                    refiner_name: cfg.refiner_name.clone(),
                });
            }
            let label = display_name(&self.refiners, &cfg.refiner_name);
            match seen_labels.get(label) {
                Some(first) if *first != cfg.refiner_name => {
                    issues.push(ConfigIssue::DisplayNameCollision {
                        display_name: label.to_owned(),
                        first: (*first).to_owned(),
                        second: cfg.refiner_name.clone(),
                    });
                }
                Some(_) => {}
                None => {
                    seen_labels.insert(label, cfg.refiner_name.as_str());
                }
            }
        }

        for issue in &issues {
            tracing::warn!(target: "ftui.refiners", issue = %issue, "refiner configuration issue");
        }
        issues
    }
}

/// Errors that can occur when loading [`RefinersSettings`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML settings: {0}")]
    Toml(#[source] toml::de::Error),
    #[error("invalid JSON settings: {0}")]
    Json(#[source] serde_json::Error),
    #[error("unsupported settings format: {} (expected .toml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
}

/// A non-fatal configuration problem found by [`RefinersSettings::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("refiner {refiner_name:?} is configured more than once; the first entry wins")]
    DuplicateRefiner { refiner_name: String },
    #[error("refiner {refiner_name:?} has no display value; the raw name is shown")]
    EmptyDisplayValue { refiner_name: String },
    #[error("refiners {first:?} and {second:?} both display as {display_name:?}")]
    DisplayNameCollision {
        display_name: String,
        first: String,
        second: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RefinerTemplate;

    fn configs() -> Vec<RefinerConfiguration> {
        vec![
            RefinerConfiguration::new("RefinableString01", "Color"),
            RefinerConfiguration::new("Size", ""),
        ]
    }

    #[test]
    fn lookup_found_and_missing() {
        let cfg = configs();
        assert_eq!(
            lookup(&cfg, "RefinableString01").found().map(|c| c.display_value.as_str()),
            Some("Color")
        );
        assert!(lookup(&cfg, "Brand").is_missing());
    }

    #[test]
    fn lookup_first_entry_wins() {
        let cfg = vec![
            RefinerConfiguration::new("Size", "First"),
            RefinerConfiguration::new("Size", "Second"),
        ];
        assert_eq!(display_name(&cfg, "Size"), "First");
    }

    #[test]
    fn display_name_falls_back_to_facet_name() {
        let cfg = configs();
        assert_eq!(display_name(&cfg, "RefinableString01"), "Color");
        assert_eq!(display_name(&cfg, "Size"), "Size");
        assert_eq!(display_name(&cfg, "Brand"), "Brand");
    }

    #[test]
    fn settings_from_toml() {
        let toml = r#"
            group_identity = "display_name"
            language = "fr-fr"
            theme = "light"

            [[refiners]]
            refinerName = "RefinableString01"
            displayValue = "Color"
            showExpanded = true
            template = "CheckBoxMultiTemplate"

            [strings]
            filter_panel_title = "Affiner"
        "#;
        let settings = RefinersSettings::from_toml_str(toml).unwrap();
        assert_eq!(settings.group_identity, GroupIdentity::DisplayName);
        assert_eq!(settings.language, "fr-fr");
        assert_eq!(settings.theme, ThemeVariant::Light);
        assert_eq!(settings.panel_width, 56);
        assert_eq!(settings.refiners.len(), 1);
        assert!(settings.refiners[0].show_expanded);
        assert_eq!(settings.refiners[0].template, RefinerTemplate::CheckBoxMulti);
        assert_eq!(settings.strings.filter_panel_title.as_deref(), Some("Affiner"));
        assert_eq!(settings.strings.remove_all_filters, None);
        let ctx = settings.render_context();
        assert_eq!(ctx.language, "fr-fr");
        assert_eq!(ctx.theme_variant, ThemeVariant::Light);
    }

    #[test]
    fn settings_from_json_uses_defaults() {
        let settings = RefinersSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, RefinersSettings::default());
        assert_eq!(settings.group_identity, GroupIdentity::FacetName);
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = RefinersSettings::from_toml_str("refiners = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn from_file_dispatches_on_extension() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("refiners.json");
        std::fs::write(&json_path, r#"{"panel_width": 40}"#).unwrap();
        assert_eq!(RefinersSettings::from_file(&json_path).unwrap().panel_width, 40);

        let yaml_path = dir.path().join("refiners.yaml");
        std::fs::write(&yaml_path, "panel_width: 40").unwrap();
        assert!(matches!(
            RefinersSettings::from_file(&yaml_path),
            Err(ConfigError::UnsupportedFormat(_))
        ));

        let missing = dir.path().join("missing.toml");
        let err = RefinersSettings::from_file(&missing).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn validate_reports_duplicates_empty_labels_and_collisions() {
        let settings = RefinersSettings {
            refiners: vec![
                RefinerConfiguration::new("A", "Label"),
                RefinerConfiguration::new("B", "Label"),
                RefinerConfiguration::new("A", "Other"),
                RefinerConfiguration::new("C", " "),
            ],
            ..RefinersSettings::default()
        };
        let issues = settings.validate();
        assert!(issues.contains(&ConfigIssue::DuplicateRefiner {
            refiner_name: "A".to_owned()
        }));
        assert!(issues.contains(&ConfigIssue::DisplayNameCollision {
            display_name: "Label".to_owned(),
            first: "A".to_owned(),
            second: "B".to_owned(),
        }));
        assert!(issues.contains(&ConfigIssue::EmptyDisplayValue {
            refiner_name: "C".to_owned()
        }));
    }

    #[test]
    fn validate_clean_configuration() {
        let settings = RefinersSettings {
            refiners: vec![
                RefinerConfiguration::new("A", "Alpha"),
                RefinerConfiguration::new("B", "Beta"),
            ],
            ..RefinersSettings::default()
        };
        assert!(settings.validate().is_empty());
    }
}

#![forbid(unsafe_code)]

//! Snapshot types exchanged with the host.
//!
//! Refinement results and selected filters use the field names of the search
//! API payloads (`FilterName`, `RefinementToken`, ...), refiner configuration
//! uses camelCase as stored in the web part properties. All of these are
//! read-only snapshots owned by the caller; the panel never mutates them.

use serde::{Deserialize, Serialize};

/// One concrete value of a facet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefinementValue {
    /// Opaque encoded value. May encode a date range, e.g. `range(2024-01-01T00:00:00Z..)`.
    pub refinement_token: String,
    /// Display-friendly value.
    pub refinement_value: String,
    /// Name of the facet this value belongs to.
    pub refinement_name: String,
    /// Number of hits carrying this value.
    #[serde(default)]
    pub refinement_count: u64,
}

impl RefinementValue {
    /// Create a value with a zero hit count.
    #[must_use]
    pub fn new(
        refinement_name: impl Into<String>,
        refinement_token: impl Into<String>,
        refinement_value: impl Into<String>,
    ) -> Self {
        Self {
            refinement_token: refinement_token.into(),
            refinement_value: refinement_value.into(),
            refinement_name: refinement_name.into(),
            refinement_count: 0,
        }
    }

    /// Set the hit count.
    #[must_use]
    pub fn with_count(mut self, count: u64) -> Self {
        self.refinement_count = count;
        self
    }
}

/// One facet and the values it can take.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RefinementResult {
    /// Stable facet key.
    pub filter_name: String,
    #[serde(default)]
    pub values: Vec<RefinementValue>,
}

impl RefinementResult {
    #[must_use]
    pub fn new(filter_name: impl Into<String>, values: Vec<RefinementValue>) -> Self {
        Self {
            filter_name: filter_name.into(),
            values,
        }
    }

    /// Whether one of this facet's values carries `token`.
    #[must_use]
    pub fn has_token(&self, token: &str) -> bool {
        self.values.iter().any(|v| v.refinement_token == token)
    }
}

/// Which value renderer a facet uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RefinerTemplate {
    #[default]
    #[serde(rename = "CheckBoxTemplate")]
    CheckBox,
    #[serde(rename = "CheckBoxMultiTemplate")]
    CheckBoxMulti,
    #[serde(rename = "DateRangeTemplate")]
    DateRange,
    #[serde(rename = "FixedDateRangeTemplate")]
    FixedDateRange,
    #[serde(rename = "PersonaTemplate")]
    Persona,
    #[serde(rename = "FileTypeTemplate")]
    FileType,
    #[serde(rename = "ContainerTreeTemplate")]
    ContainerTree,
    /// Template id this build does not know about.
    #[serde(other)]
    Unknown,
}

impl RefinerTemplate {
    /// Whether the renderer lets more than one value be selected at a time.
    #[must_use]
    pub const fn is_multi_value(self) -> bool {
        matches!(
            self,
            Self::CheckBoxMulti | Self::Persona | Self::FileType | Self::ContainerTree
        )
    }
}

/// Per-facet display settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefinerConfiguration {
    pub refiner_name: String,
    /// Label shown instead of the raw facet name. Empty means "use the facet name".
    pub display_value: String,
    /// Start expanded instead of collapsed.
    pub show_expanded: bool,
    pub template: RefinerTemplate,
    /// Offer a type-to-filter box over the values.
    pub show_value_filter: bool,
}

impl RefinerConfiguration {
    #[must_use]
    pub fn new(refiner_name: impl Into<String>, display_value: impl Into<String>) -> Self {
        Self {
            refiner_name: refiner_name.into(),
            display_value: display_value.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn show_expanded(mut self, show_expanded: bool) -> Self {
        self.show_expanded = show_expanded;
        self
    }

    #[must_use]
    pub fn template(mut self, template: RefinerTemplate) -> Self {
        self.template = template;
        self
    }

    #[must_use]
    pub fn show_value_filter(mut self, show_value_filter: bool) -> Self {
        self.show_value_filter = show_value_filter;
        self
    }
}

/// Values currently "on" for one facet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SelectedFilter {
    pub filter_name: String,
    #[serde(default)]
    pub values: Vec<RefinementValue>,
}

impl SelectedFilter {
    #[must_use]
    pub fn new(filter_name: impl Into<String>, values: Vec<RefinementValue>) -> Self {
        Self {
            filter_name: filter_name.into(),
            values,
        }
    }
}

/// How the values of one facet combine in the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RefinementOperator {
    #[default]
    Or,
    And,
}

/// What a value renderer reports when the selection of its facet changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterValuesUpdate {
    pub filter_name: String,
    pub values: Vec<RefinementValue>,
    pub operator: RefinementOperator,
}

impl FilterValuesUpdate {
    #[must_use]
    pub fn new(
        filter_name: impl Into<String>,
        values: Vec<RefinementValue>,
        operator: RefinementOperator,
    ) -> Self {
        Self {
            filter_name: filter_name.into(),
            values,
            operator,
        }
    }
}

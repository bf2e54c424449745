#![forbid(unsafe_code)]

//! Selected-value chips.
//!
//! Every selected value is shown as a dismissible chip labelled with its
//! facet's display name. Date-range values (an ISO-8601 `range(..)` token
//! with a comparison in the display value) use the compact `[Name>=2024"]`
//! form, everything else `[Name: "Value"]`.

use std::sync::OnceLock;

use regex_lite::Regex;

use crate::config;
use crate::model::{RefinementValue, RefinerConfiguration, SelectedFilter};

const DATE_RANGE_TOKEN: &str = r"range\(((-?(?:[1-9][0-9]*)?[0-9]{4})-(1[0-2]|0[1-9])-(3[01]|0[1-9]|[12][0-9])T(2[0-3]|[01][0-9]):([0-5][0-9]):([0-5][0-9])(.[0-9]+)?(Z)?).+\)";

fn date_range_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(DATE_RANGE_TOKEN).expect("date range pattern is valid"))
}

/// How a chip label is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipKind {
    DateRange,
    Plain,
}

/// Whether a value is a date-range value.
#[must_use]
pub fn classify(value: &RefinementValue) -> ChipKind {
    let comparison = value.refinement_value.contains(">=") || value.refinement_value.contains('<');
    if comparison && date_range_token().is_match(&value.refinement_token) {
        ChipKind::DateRange
    } else {
        ChipKind::Plain
    }
}

/// Format a chip label for `value` under the facet label `name`.
#[must_use]
pub fn format_label(name: &str, value: &RefinementValue) -> String {
    match classify(value) {
        ChipKind::DateRange => format!("[{name}{}\"]", value.refinement_value),
        ChipKind::Plain => format!("[{name}: \"{}\"]", value.refinement_value),
    }
}

/// A dismissible selected value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub label: String,
    pub kind: ChipKind,
    /// Source value, used to build the removal request on dismissal.
    pub value: RefinementValue,
}

/// One chip per selected value, in order.
#[must_use]
pub fn build_chips(
    selected_values: &[RefinementValue],
    configuration: &[RefinerConfiguration],
) -> Vec<Chip> {
    selected_values
        .iter()
        .map(|value| {
            let name = config::display_name(configuration, &value.refinement_name);
            Chip {
                label: format_label(name, value),
                kind: classify(value),
                value: value.clone(),
            }
        })
        .collect()
}

/// Flatten selected filters into the ordered list of selected values.
#[must_use]
pub fn flatten_selected(selected_filters: &[SelectedFilter]) -> Vec<RefinementValue> {
    selected_filters
        .iter()
        .flat_map(|f| f.values.iter().cloned())
        .collect()
}

#![forbid(unsafe_code)]

//! Group reconciliation.
//!
//! One [`Group`] per refinement result, in the same order. The only state a
//! group carries across recomputations is its collapse flag: a section the
//! user expanded stays expanded on the next data refresh, unless the refiner
//! configuration itself changed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::config::{self, ConfigLookup};
use crate::model::{RefinementResult, RefinerConfiguration, SelectedFilter};

/// How a new group finds its predecessor in the previous group list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupIdentity {
    /// Match by facet key. Facets sharing a label keep separate collapse state.
    #[default]
    FacetName,
    /// Match by resolved display name. Two facets resolving to the same label
    /// share (and fight over) one collapse state.
    DisplayName,
}

/// One collapsible section of the grouped list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Positional key; stable only within one recompute pass.
    pub key: String,
    /// Resolved display name.
    pub name: String,
    /// Facet the group was built from.
    pub facet: String,
    pub is_collapsed: bool,
    /// Index of the group's item in the item list.
    pub start_index: usize,
    /// Items in the group. Always 1.
    pub count: usize,
}

impl Group {
    fn identity(&self, identity: GroupIdentity) -> &str {
        match identity {
            GroupIdentity::FacetName => &self.facet,
            GroupIdentity::DisplayName => &self.name,
        }
    }
}

/// Whether `facet` has an entry in the selected filters.
#[must_use]
pub fn is_filter_selected(selected_filters: &[SelectedFilter], facet: &str) -> bool {
    selected_filters.iter().any(|f| f.filter_name == facet)
}

/// Collapse flag of a group with no carried-over state.
///
/// Expanded when the configuration asks for it or the facet has a selection.
#[must_use]
pub fn default_collapsed(lookup: ConfigLookup<'_>, filter_selected: bool) -> bool {
    let show_expanded = lookup.found().is_some_and(|cfg| cfg.show_expanded);
    !(show_expanded || filter_selected)
}

/// Compute the group list for `refinement_results`.
///
/// Previous groups are matched per `identity`; when a predecessor exists and
/// `should_reset_collapse` is false, its collapse flag is kept verbatim.
/// Otherwise the flag is recomputed from `showExpanded` and the selection.
#[must_use]
pub fn reconcile_groups(
    refinement_results: &[RefinementResult],
    configuration: &[RefinerConfiguration],
    previous: &[Group],
    selected_filters: &[SelectedFilter],
    should_reset_collapse: bool,
    identity: GroupIdentity,
) -> Vec<Group> {
    let start = Instant::now();
    let span = tracing::debug_span!(
        "refiners.groups.reconcile",
        facets = refinement_results.len(),
        previous = previous.len(),
        reset = should_reset_collapse,
        carried = tracing::field::Empty,
        duration_us = tracing::field::Empty,
    );
    let _guard = span.enter();

    // First previous group wins when several share an identity.
    let mut previous_by_identity: HashMap<&str, &Group> = HashMap::with_capacity(previous.len());
    for group in previous {
        previous_by_identity
            .entry(group.identity(identity))
            .or_insert(group);
    }

    let mut carried = 0usize;
    let mut labels: HashMap<&str, &str> = HashMap::with_capacity(refinement_results.len());
    let groups: Vec<Group> = refinement_results
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let facet = result.filter_name.as_str();
            let lookup = config::lookup(configuration, facet);
            let name = config::display_name(configuration, facet);

            if let Some(other) = labels.insert(name, facet)
                && other != facet
            {
                tracing::warn!(
                    target: "ftui.refiners",
                    display_name = name,
                    first = other,
                    second = facet,
                    "two facets share a display name"
                );
            }

            let key = match identity {
                GroupIdentity::FacetName => facet,
                GroupIdentity::DisplayName => name,
            };
            let is_collapsed = match previous_by_identity.get(key) {
                Some(prev) if !should_reset_collapse => {
                    carried += 1;
                    prev.is_collapsed
                }
                _ => default_collapsed(lookup, is_filter_selected(selected_filters, facet)),
            };

            Group {
                key: i.to_string(),
                name: name.to_owned(),
                facet: facet.to_owned(),
                is_collapsed,
                start_index: i,
                count: 1,
            }
        })
        .collect();

    span.record("carried", carried as u64);
    span.record("duration_us", start.elapsed().as_micros() as u64);
    groups
}

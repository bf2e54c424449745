#![forbid(unsafe_code)]

//! Item building and removal targeting.
//!
//! An [`Item`] bundles everything a value renderer needs for one facet. The
//! list is rebuilt in full on every change; a removal request is routed by
//! rebuilding with the request so that only the owning facet's item carries a
//! [`MatchedRemoval`].

use web_time::Instant;

use crate::config::{self, ConfigLookup};
use crate::context::RenderContext;
use crate::model::{
    RefinementResult, RefinementValue, RefinerConfiguration, RefinerTemplate, SelectedFilter,
};

/// How a removal request recognizes the facet it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalTarget {
    /// The facet owning a value with this token.
    RemoveValue { token: String },
    /// The facet with this name; its renderer clears its current token.
    RemoveFacetCurrentToken { facet: String },
}

impl RemovalTarget {
    /// Whether this target designates `result`.
    ///
    /// A facet without values never matches, whichever the variant.
    #[must_use]
    pub fn applies_to(&self, result: &RefinementResult) -> bool {
        match self {
            Self::RemoveValue { token } => result.has_token(token),
            Self::RemoveFacetCurrentToken { facet } => {
                !result.values.is_empty() && result.filter_name == *facet
            }
        }
    }
}

/// A value the user asked to remove, and how to find its facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalRequest {
    pub value: RefinementValue,
    /// Tried in order; the first target that applies wins.
    pub targets: Vec<RemovalTarget>,
}

impl RemovalRequest {
    /// Request issued by dismissing a chip: matches the facet owning the
    /// token, or the facet the value names.
    #[must_use]
    pub fn for_value(value: RefinementValue) -> Self {
        let targets = vec![
            RemovalTarget::RemoveValue {
                token: value.refinement_token.clone(),
            },
            RemovalTarget::RemoveFacetCurrentToken {
                facet: value.refinement_name.clone(),
            },
        ];
        Self { value, targets }
    }

    #[must_use]
    pub fn value_only(value: RefinementValue) -> Self {
        let targets = vec![RemovalTarget::RemoveValue {
            token: value.refinement_token.clone(),
        }];
        Self { value, targets }
    }

    #[must_use]
    pub fn facet_only(value: RefinementValue) -> Self {
        let targets = vec![RemovalTarget::RemoveFacetCurrentToken {
            facet: value.refinement_name.clone(),
        }];
        Self { value, targets }
    }

    /// Match against one facet.
    #[must_use]
    pub fn match_result(&self, result: &RefinementResult) -> Option<MatchedRemoval> {
        self.targets
            .iter()
            .find(|target| target.applies_to(result))
            .map(|target| MatchedRemoval {
                value: self.value.clone(),
                target: target.clone(),
            })
    }
}

/// A removal request that matched an item's facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRemoval {
    pub value: RefinementValue,
    /// The target that matched.
    pub target: RemovalTarget,
}

/// One renderable facet body.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub refinement_result: RefinementResult,
    /// `None` when the facet has no configuration entry.
    pub configuration: Option<RefinerConfiguration>,
    /// Renderer to use. `CheckBox` when the configuration is missing.
    pub template: RefinerTemplate,
    pub show_value_filter: bool,
    /// Values currently selected for this facet.
    pub selected_values: Vec<RefinementValue>,
    pub value_to_remove: Option<MatchedRemoval>,
    pub should_reset_filters: bool,
    pub context: RenderContext,
}

impl Item {
    #[must_use]
    pub fn facet(&self) -> &str {
        &self.refinement_result.filter_name
    }

    #[must_use]
    pub fn is_selected(&self, value: &RefinementValue) -> bool {
        self.selected_values
            .iter()
            .any(|v| v.refinement_token == value.refinement_token)
    }
}

/// Selected values for `facet`: the values of its selection entry when
/// exactly one entry exists, nothing otherwise.
#[must_use]
pub fn selected_values_for(
    selected_filters: &[SelectedFilter],
    facet: &str,
) -> Vec<RefinementValue> {
    let mut entries = selected_filters.iter().filter(|f| f.filter_name == facet);
    match (entries.next(), entries.next()) {
        (Some(only), None) => only.values.clone(),
        _ => Vec::new(),
    }
}

/// Inputs of [`build_items`] besides the refinement results.
#[derive(Debug, Clone, Copy)]
pub struct ItemInputs<'a> {
    pub configuration: &'a [RefinerConfiguration],
    pub selected_filters: &'a [SelectedFilter],
    pub should_reset_filters: bool,
    pub context: &'a RenderContext,
}

/// Build one item per refinement result, in order.
#[must_use]
pub fn build_items(
    refinement_results: &[RefinementResult],
    inputs: ItemInputs<'_>,
    removal: Option<&RemovalRequest>,
) -> Vec<Item> {
    let start = Instant::now();
    let span = tracing::debug_span!(
        "refiners.items.build",
        facets = refinement_results.len(),
        removal = removal.is_some(),
        missing_config = tracing::field::Empty,
        duration_us = tracing::field::Empty,
    );
    let _guard = span.enter();

    let mut missing = 0u64;
    let items: Vec<Item> = refinement_results
        .iter()
        .map(|result| {
            let facet = result.filter_name.as_str();
            let (configuration, template, show_value_filter) =
                match config::lookup(inputs.configuration, facet) {
                    ConfigLookup::Found(cfg) => {
                        (Some(cfg.clone()), cfg.template, cfg.show_value_filter)
                    }
                    ConfigLookup::Missing => {
                        missing += 1;
                        tracing::debug!(
                            target: "ftui.refiners",
                            facet,
                            "no configuration for facet; using default renderer"
                        );
                        (None, RefinerTemplate::default(), false)
                    }
                };

            let value_to_remove = removal.and_then(|request| request.match_result(result));
            if let Some(matched) = &value_to_remove {
                tracing::debug!(
                    target: "ftui.refiners",
                    facet,
                    token = %matched.value.refinement_token,
                    matched_by = ?matched.target,
                    "removal routed to facet"
                );
            }

            Item {
                refinement_result: result.clone(),
                configuration,
                template,
                show_value_filter,
                selected_values: selected_values_for(inputs.selected_filters, facet),
                value_to_remove,
                should_reset_filters: inputs.should_reset_filters,
                context: inputs.context.clone(),
            }
        })
        .collect();

    span.record("missing_config", missing);
    span.record("duration_us", start.elapsed().as_micros() as u64);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(facet: &str, token: &str, display: &str) -> RefinementValue {
        RefinementValue::new(facet, token, display)
    }

    fn facets() -> Vec<RefinementResult> {
        vec![
            RefinementResult::new(
                "Color",
                vec![value("Color", "c-red", "Red"), value("Color", "c-blue", "Blue")],
            ),
            RefinementResult::new("Size", vec![value("Size", "s-m", "M")]),
            RefinementResult::new("Empty", vec![]),
        ]
    }

    fn build(
        configuration: &[RefinerConfiguration],
        selected: &[SelectedFilter],
        removal: Option<&RemovalRequest>,
    ) -> Vec<Item> {
        let ctx = RenderContext::default();
        build_items(
            &facets(),
            ItemInputs {
                configuration,
                selected_filters: selected,
                should_reset_filters: false,
                context: &ctx,
            },
            removal,
        )
    }

    #[test]
    fn one_item_per_result_in_order() {
        let items = build(&[], &[], None);
        let names: Vec<_> = items.iter().map(Item::facet).collect();
        assert_eq!(names, ["Color", "Size", "Empty"]);
        assert!(items.iter().all(|i| i.value_to_remove.is_none()));
    }

    #[test]
    fn missing_configuration_uses_fallback() {
        let cfg = vec![
            RefinerConfiguration::new("Color", "Colour")
                .template(RefinerTemplate::CheckBoxMulti)
                .show_value_filter(true),
        ];
        let items = build(&cfg, &[], None);
        assert_eq!(
            items[0]
                .configuration
                .as_ref()
                .map(|c| c.display_value.as_str()),
            Some("Colour")
        );
        assert_eq!(items[0].template, RefinerTemplate::CheckBoxMulti);
        assert!(items[0].show_value_filter);
        assert_eq!(items[1].configuration, None);
        assert_eq!(items[1].template, RefinerTemplate::CheckBox);
        assert!(!items[1].show_value_filter);
    }

    #[test]
    fn selected_subset_requires_exactly_one_entry() {
        let red = value("Color", "c-red", "Red");
        let selected = vec![
            SelectedFilter::new("Color", vec![red.clone()]),
            SelectedFilter::new("Size", vec![value("Size", "s-m", "M")]),
            SelectedFilter::new("Size", vec![value("Size", "s-m", "M")]),
        ];
        let items = build(&[], &selected, None);
        assert_eq!(items[0].selected_values, vec![red.clone()]);
        assert!(items[0].is_selected(&red));
        assert!(items[1].selected_values.is_empty());
        assert!(items[2].selected_values.is_empty());
    }

    #[test]
    fn removal_by_token_targets_only_owning_facet() {
        let request = RemovalRequest::value_only(value("Other", "c-blue", "Blue"));
        let items = build(&[], &[], Some(&request));
        let matched = items[0].value_to_remove.as_ref().unwrap();
        assert_eq!(
            matched.target,
            RemovalTarget::RemoveValue {
                token: "c-blue".to_owned()
            }
        );
        assert!(items[1].value_to_remove.is_none());
        assert!(items[2].value_to_remove.is_none());
    }

    #[test]
    fn removal_by_facet_name() {
        let request = RemovalRequest::for_value(value("Size", "range(stale)", "old"));
        let items = build(&[], &[], Some(&request));
        assert!(items[0].value_to_remove.is_none());
        assert_eq!(
            items[1].value_to_remove.as_ref().map(|m| &m.target),
            Some(&RemovalTarget::RemoveFacetCurrentToken {
                facet: "Size".to_owned()
            })
        );
    }

    #[test]
    fn facet_without_values_never_matches() {
        let request = RemovalRequest::facet_only(value("Empty", "x", "x"));
        let items = build(&[], &[], Some(&request));
        assert!(items.iter().all(|i| i.value_to_remove.is_none()));
    }

    #[test]
    fn token_target_is_tried_first() {
        let request = RemovalRequest::for_value(value("Color", "c-red", "Red"));
        let matched = request.match_result(&facets()[0]).unwrap();
        assert!(matches!(matched.target, RemovalTarget::RemoveValue { .. }));
        assert_eq!(matched.value.refinement_value, "Red");
    }

    #[test]
    fn pass_through_context_is_forwarded() {
        let ctx = RenderContext::new("fr-fr", crate::context::ThemeVariant::Light);
        let items = build_items(
            &facets(),
            ItemInputs {
                configuration: &[],
                selected_filters: &[],
                should_reset_filters: true,
                context: &ctx,
            },
            None,
        );
        assert!(items.iter().all(|i| i.should_reset_filters && i.context == ctx));
    }
}

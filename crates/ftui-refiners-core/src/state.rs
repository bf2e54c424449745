#![forbid(unsafe_code)]

//! Local state of the refiner panel.
//!
//! [`RefinersState`] composes group reconciliation, item building, chips and
//! the panel controller over one props snapshot. Every recomputation
//! publishes fresh `Arc<[_]>` collections and bumps a generation counter;
//! replacing the collections is not itself a signal to redraw, so consumers
//! refresh when handed an [`Invalidation`].

use std::sync::Arc;

use crate::chips::{self, Chip};
use crate::context::RenderContext;
use crate::groups::{self, Group, GroupIdentity};
use crate::items::{self, Item, ItemInputs, RemovalRequest};
use crate::model::{RefinementResult, RefinementValue, RefinerConfiguration, SelectedFilter};
use crate::panel::{PanelAction, PanelController, PanelEvent, PanelState};

/// Snapshot of everything the host supplies.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RefinersProps {
    pub refinement_results: Vec<RefinementResult>,
    pub selected_filters: Vec<SelectedFilter>,
    pub refiners_configuration: Vec<RefinerConfiguration>,
    /// Forwarded to value renderers.
    pub should_reset_filters: bool,
    pub context: RenderContext,
    has_selected_values: bool,
    selected_filter_values: Vec<RefinementValue>,
}

impl RefinersProps {
    /// Build props, deriving the selected-values views from `selected_filters`.
    #[must_use]
    pub fn new(
        refinement_results: Vec<RefinementResult>,
        selected_filters: Vec<SelectedFilter>,
        refiners_configuration: Vec<RefinerConfiguration>,
    ) -> Self {
        let selected_filter_values = chips::flatten_selected(&selected_filters);
        Self {
            refinement_results,
            selected_filters,
            refiners_configuration,
            should_reset_filters: false,
            context: RenderContext::default(),
            has_selected_values: !selected_filter_values.is_empty(),
            selected_filter_values,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: RenderContext) -> Self {
        self.context = context;
        self
    }

    #[must_use]
    pub fn with_should_reset_filters(mut self, reset: bool) -> Self {
        self.should_reset_filters = reset;
        self
    }

    /// Use a host-computed selected-values view instead of the derived one.
    #[must_use]
    pub fn with_selected_values(mut self, values: Vec<RefinementValue>) -> Self {
        self.has_selected_values = !values.is_empty();
        self.selected_filter_values = values;
        self
    }

    #[must_use]
    pub fn has_selected_values(&self) -> bool {
        self.has_selected_values
    }

    #[must_use]
    pub fn selected_filter_values(&self) -> &[RefinementValue] {
        &self.selected_filter_values
    }

    fn item_inputs(&self) -> ItemInputs<'_> {
        ItemInputs {
            configuration: &self.refiners_configuration,
            selected_filters: &self.selected_filters,
            should_reset_filters: self.should_reset_filters,
            context: &self.context,
        }
    }
}

/// A published state the display must refresh to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invalidation {
    pub generation: u64,
    /// Collapse state was recomputed from configuration instead of carried.
    pub reset_collapse: bool,
}

/// Outcome of [`RefinersState::remove_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    pub invalidation: Invalidation,
    /// Items the removal was routed to, in item order. Tokens encode the
    /// value, so facets sharing a value all match.
    pub item_indices: Vec<usize>,
}

/// Groups, items, and panel state derived from the current props.
#[derive(Debug, Clone)]
pub struct RefinersState {
    props: RefinersProps,
    identity: GroupIdentity,
    groups: Arc<[Group]>,
    items: Arc<[Item]>,
    panel: PanelController,
    generation: u64,
}

impl RefinersState {
    /// Initial groups and items for `props`.
    #[must_use]
    pub fn mount(props: RefinersProps, identity: GroupIdentity) -> Self {
        let groups = groups::reconcile_groups(
            &props.refinement_results,
            &props.refiners_configuration,
            &[],
            &props.selected_filters,
            false,
            identity,
        );
        let items = items::build_items(&props.refinement_results, props.item_inputs(), None);
        tracing::debug!(
            target: "ftui.refiners",
            facets = props.refinement_results.len(),
            selected = props.selected_filter_values.len(),
            "refiner state mounted"
        );
        Self {
            props,
            identity,
            groups: groups.into(),
            items: items.into(),
            panel: PanelController::new(),
            generation: 1,
        }
    }

    /// Take a new props snapshot.
    ///
    /// Groups and items are both recomputed; collapse state is carried over
    /// unless the refiner configuration differs from the previous snapshot.
    pub fn receive_props(&mut self, next: RefinersProps) -> Invalidation {
        let reset_collapse = self.props.refiners_configuration != next.refiners_configuration;
        let groups = groups::reconcile_groups(
            &next.refinement_results,
            &next.refiners_configuration,
            &self.groups,
            &next.selected_filters,
            reset_collapse,
            self.identity,
        );
        let items = items::build_items(&next.refinement_results, next.item_inputs(), None);
        self.props = next;
        self.groups = groups.into();
        self.items = items.into();
        self.publish(reset_collapse)
    }

    /// Rebuild items so every facet matching `value` receives it as its
    /// value to remove. Groups are left untouched.
    pub fn remove_value(&mut self, value: &RefinementValue) -> Removal {
        let request = RemovalRequest::for_value(value.clone());
        let items = items::build_items(
            &self.props.refinement_results,
            self.props.item_inputs(),
            Some(&request),
        );
        let item_indices: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.value_to_remove.is_some())
            .map(|(i, _)| i)
            .collect();
        if item_indices.is_empty() {
            tracing::debug!(
                target: "ftui.refiners",
                token = %value.refinement_token,
                facet = %value.refinement_name,
                "removal matched no facet"
            );
        }
        self.items = items.into();
        Removal {
            invalidation: self.publish(false),
            item_indices,
        }
    }

    /// Flip the collapse flag of one group. `None` when the index is out of range.
    pub fn toggle_collapse(&mut self, group_index: usize) -> Option<Invalidation> {
        let group = self.groups.get(group_index)?;
        let collapsed = !group.is_collapsed;
        tracing::debug!(
            target: "ftui.refiners",
            group = %group.name,
            collapsed,
            "group toggled"
        );
        let mut groups = self.groups.to_vec();
        groups[group_index].is_collapsed = collapsed;
        self.groups = groups.into();
        Some(self.publish(false))
    }

    fn publish(&mut self, reset_collapse: bool) -> Invalidation {
        self.generation += 1;
        Invalidation {
            generation: self.generation,
            reset_collapse,
        }
    }

    #[must_use]
    pub fn props(&self) -> &RefinersProps {
        &self.props
    }

    #[must_use]
    pub fn identity(&self) -> GroupIdentity {
        self.identity
    }

    #[must_use]
    pub fn groups(&self) -> Arc<[Group]> {
        Arc::clone(&self.groups)
    }

    #[must_use]
    pub fn items(&self) -> Arc<[Item]> {
        Arc::clone(&self.items)
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn has_selected_values(&self) -> bool {
        self.props.has_selected_values
    }

    /// Chips for the currently selected values.
    #[must_use]
    pub fn chips(&self) -> Vec<Chip> {
        chips::build_chips(
            &self.props.selected_filter_values,
            &self.props.refiners_configuration,
        )
    }

    #[must_use]
    pub fn panel_state(&self) -> PanelState {
        self.panel.state()
    }

    pub fn handle_panel(&mut self, event: PanelEvent) -> PanelState {
        self.panel.handle(event)
    }

    #[must_use]
    pub fn remove_all(&self) -> PanelAction {
        self.panel.remove_all()
    }
}

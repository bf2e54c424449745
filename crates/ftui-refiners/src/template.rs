#![forbid(unsafe_code)]

//! Per-refiner value renderers.
//!
//! A [`ValueRenderer`] draws the body of one facet and turns user actions
//! into [`FilterValuesUpdate`]s for the host. The panel resolves the
//! renderer for an item through a [`TemplateRegistry`] keyed by the item's
//! [`RefinerTemplate`].

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use ftui_refiners_core::{
    FilterValuesUpdate, Item, MatchedRemoval, RefinementOperator, RefinementValue,
    RefinerTemplate, RemovalTarget,
};

/// One line of a facet body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRow {
    /// Index of the value in the facet's value list.
    pub value_index: usize,
    pub label: String,
    pub selected: bool,
}

/// Renders a facet's values and reacts to activation and removal.
pub trait ValueRenderer: fmt::Debug + Send + Sync {
    /// Rows for the values of `item` whose display value matches `filter`.
    fn rows(&self, item: &Item, filter: &str) -> Vec<ValueRow>;

    /// The user activated `value`. `None` when nothing changes.
    fn activate(&self, item: &Item, value: &RefinementValue) -> Option<FilterValuesUpdate>;

    /// A chip dismissal was routed to `item`.
    fn remove(&self, item: &Item, removal: &MatchedRemoval) -> Option<FilterValuesUpdate>;
}

/// Case-insensitive substring match on the display value.
#[must_use]
pub fn matches_filter(value: &RefinementValue, filter: &str) -> bool {
    filter.is_empty()
        || value
            .refinement_value
            .to_lowercase()
            .contains(&filter.to_lowercase())
}

/// Checkbox list. Single mode replaces the selection on activation, multi
/// mode toggles the activated value in and out of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckboxRenderer {
    pub multi: bool,
}

impl CheckboxRenderer {
    #[must_use]
    pub const fn single() -> Self {
        Self { multi: false }
    }

    #[must_use]
    pub const fn multi() -> Self {
        Self { multi: true }
    }

    fn update(item: &Item, values: Vec<RefinementValue>) -> FilterValuesUpdate {
        FilterValuesUpdate::new(item.facet(), values, RefinementOperator::Or)
    }
}

impl ValueRenderer for CheckboxRenderer {
    fn rows(&self, item: &Item, filter: &str) -> Vec<ValueRow> {
        item.refinement_result
            .values
            .iter()
            .enumerate()
            .filter(|(_, value)| matches_filter(value, filter))
            .map(|(value_index, value)| {
                let selected = item.is_selected(value);
                let mark = if selected { 'x' } else { ' ' };
                let label = if value.refinement_count > 0 {
                    format!("[{mark}] {} ({})", value.refinement_value, value.refinement_count)
                } else {
                    format!("[{mark}] {}", value.refinement_value)
                };
                ValueRow {
                    value_index,
                    label,
                    selected,
                }
            })
            .collect()
    }

    fn activate(&self, item: &Item, value: &RefinementValue) -> Option<FilterValuesUpdate> {
        let selected = item.is_selected(value);
        let values = match (self.multi, selected) {
            (_, true) => item
                .selected_values
                .iter()
                .filter(|v| v.refinement_token != value.refinement_token)
                .cloned()
                .collect(),
            (true, false) => {
                let mut values = item.selected_values.clone();
                values.push(value.clone());
                values
            }
            (false, false) => vec![value.clone()],
        };
        Some(Self::update(item, values))
    }

    fn remove(&self, item: &Item, removal: &MatchedRemoval) -> Option<FilterValuesUpdate> {
        let values = match &removal.target {
            RemovalTarget::RemoveValue { token } => {
                if !item.selected_values.iter().any(|v| v.refinement_token == *token) {
                    return None;
                }
                item.selected_values
                    .iter()
                    .filter(|v| v.refinement_token != *token)
                    .cloned()
                    .collect()
            }
            // The facet's current token may differ from the chip's, so the
            // whole facet selection is cleared.
            RemovalTarget::RemoveFacetCurrentToken { .. } => Vec::new(),
        };
        Some(Self::update(item, values))
    }
}

/// Renderers by template, with a checkbox fallback.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    renderers: HashMap<RefinerTemplate, Arc<dyn ValueRenderer>>,
    fallback: Arc<dyn ValueRenderer>,
}

impl TemplateRegistry {
    /// An empty registry: every template resolves to the single checkbox.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
            fallback: Arc::new(CheckboxRenderer::single()),
        }
    }

    /// Checkbox renderers for the checkbox templates.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .with(RefinerTemplate::CheckBox, CheckboxRenderer::single())
            .with(RefinerTemplate::CheckBoxMulti, CheckboxRenderer::multi())
    }

    #[must_use]
    pub fn with(
        mut self,
        template: RefinerTemplate,
        renderer: impl ValueRenderer + 'static,
    ) -> Self {
        self.register(template, Arc::new(renderer));
        self
    }

    pub fn register(&mut self, template: RefinerTemplate, renderer: Arc<dyn ValueRenderer>) {
        self.renderers.insert(template, renderer);
    }

    #[must_use]
    pub fn contains(&self, template: RefinerTemplate) -> bool {
        self.renderers.contains_key(&template)
    }

    /// Renderer for `template`.
    #[must_use]
    pub fn resolve(&self, template: RefinerTemplate) -> &dyn ValueRenderer {
        match self.renderers.get(&template) {
            Some(renderer) => renderer.as_ref(),
            None => {
                tracing::trace!(
                    target: "ftui.refiners",
                    template = ?template,
                    "no renderer registered; using checkbox"
                );
                self.fallback.as_ref()
            }
        }
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

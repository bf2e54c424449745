#![forbid(unsafe_code)]

//! Flattened, cached view of the groups and items.
//!
//! The list never watches the state it was built from. Rows are replaced
//! only by [`GroupedList::force_update`], which the panel calls in the same
//! `update` that published a new generation.

use std::collections::HashMap;
use std::ops::Range;

use ftui_refiners_core::{Group, Item};

use crate::strings::RefinerStrings;
use crate::template::TemplateRegistry;

/// Collapsed groups point down, expanded groups point up.
pub const CHEVRON_COLLAPSED: char = '▾';
pub const CHEVRON_EXPANDED: char = '▴';

/// What a row stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    RemoveAll,
    /// Gap above every group but the first.
    Spacer,
    Header { group: usize, collapsed: bool },
    ValueFilter { group: usize },
    Value {
        group: usize,
        value_index: usize,
        selected: bool,
    },
}

impl RowKind {
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        !matches!(self, Self::Spacer)
    }

    #[must_use]
    pub const fn group(self) -> Option<usize> {
        match self {
            Self::Header { group, .. }
            | Self::ValueFilter { group }
            | Self::Value { group, .. } => Some(group),
            Self::RemoveAll | Self::Spacer => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub kind: RowKind,
    pub label: String,
}

impl ListRow {
    fn new(kind: RowKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
        }
    }
}

/// Everything rows are derived from.
#[derive(Debug, Clone, Copy)]
pub struct RowSource<'a> {
    pub groups: &'a [Group],
    pub items: &'a [Item],
    pub has_selected_values: bool,
    /// Value filter text by facet.
    pub value_filters: &'a HashMap<String, String>,
    pub registry: &'a TemplateRegistry,
    pub strings: &'a RefinerStrings,
}

/// Flatten groups and items into display rows.
#[must_use]
pub fn flatten(source: RowSource<'_>) -> Vec<ListRow> {
    let mut rows = Vec::new();
    if source.has_selected_values {
        rows.push(ListRow::new(RowKind::RemoveAll, &source.strings.remove_all_filters));
    }
    for (gi, group) in source.groups.iter().enumerate() {
        if gi > 0 {
            rows.push(ListRow::new(RowKind::Spacer, ""));
        }
        let chevron = if group.is_collapsed {
            CHEVRON_COLLAPSED
        } else {
            CHEVRON_EXPANDED
        };
        rows.push(ListRow::new(
            RowKind::Header {
                group: gi,
                collapsed: group.is_collapsed,
            },
            format!("{chevron} {}", group.name),
        ));
        if group.is_collapsed {
            continue;
        }
        let group_items = source
            .items
            .get(group.start_index..group.start_index + group.count)
            .unwrap_or_default();
        for item in group_items {
            let filter = source
                .value_filters
                .get(item.facet())
                .map_or("", String::as_str);
            if item.show_value_filter {
                let text = if filter.is_empty() {
                    source.strings.value_filter_placeholder.as_str()
                } else {
                    filter
                };
                rows.push(ListRow::new(RowKind::ValueFilter { group: gi }, format!("  / {text}")));
            }
            let renderer = source.registry.resolve(item.template);
            for row in renderer.rows(item, filter) {
                rows.push(ListRow::new(
                    RowKind::Value {
                        group: gi,
                        value_index: row.value_index,
                        selected: row.selected,
                    },
                    format!("  {}", row.label),
                ));
            }
        }
    }
    rows
}

/// Cached rows plus a cursor.
#[derive(Debug, Clone, Default)]
pub struct GroupedList {
    rows: Vec<ListRow>,
    generation: u64,
    cursor: usize,
}

impl GroupedList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows and record the generation they reflect.
    pub fn force_update(&mut self, generation: u64, rows: Vec<ListRow>) {
        tracing::trace!(
            target: "ftui.refiners",
            generation,
            rows = rows.len(),
            "grouped list refreshed"
        );
        self.rows = rows;
        self.generation = generation;
        self.cursor = self.cursor.min(self.rows.len().saturating_sub(1));
        if self.cursor_row().is_some_and(|row| !row.kind.is_selectable())
            && let Some(idx) = self
                .next_selectable(self.cursor, false)
                .or_else(|| self.next_selectable(self.cursor, true))
        {
            self.cursor = idx;
        }
    }

    #[must_use]
    pub fn rows(&self) -> &[ListRow] {
        &self.rows
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the rows predate `generation`.
    #[must_use]
    pub fn is_stale(&self, generation: u64) -> bool {
        self.generation < generation
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn cursor_row(&self) -> Option<&ListRow> {
        self.rows.get(self.cursor)
    }

    /// Move by `delta` selectable rows. The cursor stays put at either end.
    pub fn move_cursor(&mut self, delta: isize) {
        let mut idx = self.cursor;
        for _ in 0..delta.unsigned_abs() {
            match self.next_selectable(idx, delta < 0) {
                Some(next) => idx = next,
                None => break,
            }
        }
        if self.rows.get(idx).is_some_and(|row| row.kind.is_selectable()) {
            self.cursor = idx;
        }
    }

    fn next_selectable(&self, from: usize, backward: bool) -> Option<usize> {
        let selectable = |i: &usize| self.rows[*i].kind.is_selectable();
        if backward {
            (0..from.min(self.rows.len())).rev().find(selectable)
        } else {
            (from + 1..self.rows.len()).find(selectable)
        }
    }

    /// Put the cursor on the header of `group`.
    pub fn focus_group(&mut self, group: usize) {
        if let Some(idx) = self
            .rows
            .iter()
            .position(|row| matches!(row.kind, RowKind::Header { group: g, .. } if g == group))
        {
            self.cursor = idx;
        }
    }

    /// Rows to show in a viewport of `height` rows, keeping the cursor visible.
    #[must_use]
    pub fn visible_window(&self, height: usize) -> Range<usize> {
        if height == 0 {
            return 0..0;
        }
        let start = (self.cursor + 1).saturating_sub(height);
        start..(start + height).min(self.rows.len())
    }
}

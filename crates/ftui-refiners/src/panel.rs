#![forbid(unsafe_code)]

//! The refiner panel as an ftui [`Model`].
//!
//! Layout, top to bottom:
//!
//! ```text
//!                                          [ Filters ]
//! ✕ [Color: "Red"]  ✕ [Created>=2024"]
//!                           ╭ Available filters ──────╮
//!                           │Remove all filters       │
//!                           │▴ Color                  │
//!                           │  [x] Red (12)           │
//!                           │                         │
//!                           │▾ Size                   │
//!                           ╰─────────────────────────╯
//! ```
//!
//! The overlay is drawn over the right side of the area while open.
//! Prop snapshots arrive as [`RefinersMsg::PropsUpdated`] and go through the
//! same `update` path as terminal input.

use std::collections::HashMap;

use ftui::layout::Rect;
use ftui::text::{Line, Span, Text};
use ftui::widgets::Widget;
use ftui::widgets::block::Block;
use ftui::widgets::borders::{BorderType, Borders};
use ftui::widgets::paragraph::Paragraph;
use ftui::{Cell, Event, Frame, KeyCode, KeyEvent, KeyEventKind, Modifiers, Style};
use ftui_runtime::program::{Cmd, Model};

use ftui_refiners_core::{
    Chip, FilterValuesUpdate, PanelAction, PanelEvent, RefinersProps, RefinersSettings,
    RefinersState, StringOverrides,
};

use crate::grouped_list::{self, GroupedList, RowKind, RowSource};
use crate::strings::RefinerStrings;
use crate::template::TemplateRegistry;
use crate::theme::RefinersPalette;

const CHIP_GLYPH: char = '✕';
const CHIP_GAP: &str = "  ";

/// Receives the panel's requests. Both methods default to no-ops.
pub trait RefinersHost {
    fn on_remove_all_filters(&mut self) {}

    fn on_filter_values_updated(&mut self, _update: FilterValuesUpdate) {}
}

/// Host that ignores every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHost;

impl RefinersHost for NoopHost {}

#[derive(Debug, Clone)]
pub enum RefinersMsg {
    Terminal(Event),
    /// A new snapshot from the host.
    PropsUpdated(RefinersProps),
    TogglePanel,
    DismissPanel,
    RemoveAllFilters,
    /// Dismiss the chip at this index.
    DismissChip(usize),
    /// Flip the collapse state of the group at this index.
    ToggleGroup(usize),
}

impl From<Event> for RefinersMsg {
    fn from(event: Event) -> Self {
        Self::Terminal(event)
    }
}

/// Grouped refiner panel with selection chips and an overlay.
#[derive(Debug)]
pub struct RefinersPanel<H = NoopHost> {
    state: RefinersState,
    list: GroupedList,
    registry: TemplateRegistry,
    overrides: StringOverrides,
    strings: RefinerStrings,
    palette: RefinersPalette,
    panel_width: u16,
    value_filters: HashMap<String, String>,
    chip_focus: Option<usize>,
    host: H,
}

impl RefinersPanel<NoopHost> {
    #[must_use]
    pub fn new(props: RefinersProps, settings: &RefinersSettings) -> Self {
        Self::with_host(props, settings, NoopHost)
    }
}

impl<H: RefinersHost> RefinersPanel<H> {
    /// Mount the panel on `props`.
    #[must_use]
    pub fn with_host(props: RefinersProps, settings: &RefinersSettings, host: H) -> Self {
        let strings = RefinerStrings::for_language(&props.context.language)
            .with_overrides(&settings.strings);
        let palette = RefinersPalette::for_variant(props.context.theme_variant);
        let mut panel = Self {
            state: RefinersState::mount(props, settings.group_identity),
            list: GroupedList::new(),
            registry: TemplateRegistry::with_defaults(),
            overrides: settings.strings.clone(),
            strings,
            palette,
            panel_width: settings.panel_width,
            value_filters: HashMap::new(),
            chip_focus: None,
            host,
        };
        panel.refresh();
        panel
    }

    /// Replace the renderer registry.
    #[must_use]
    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = registry;
        self.refresh();
        self
    }

    #[must_use]
    pub fn state(&self) -> &RefinersState {
        &self.state
    }

    #[must_use]
    pub fn list(&self) -> &GroupedList {
        &self.list
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    #[must_use]
    pub fn strings(&self) -> &RefinerStrings {
        &self.strings
    }

    #[must_use]
    pub fn chip_focus(&self) -> Option<usize> {
        self.chip_focus
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.panel_state().is_open()
    }

    /// Current value filter text of `facet`.
    #[must_use]
    pub fn value_filter(&self, facet: &str) -> &str {
        self.value_filters.get(facet).map_or("", String::as_str)
    }

    fn refresh(&mut self) {
        let groups = self.state.groups();
        let items = self.state.items();
        let rows = grouped_list::flatten(RowSource {
            groups: &groups,
            items: &items,
            has_selected_values: self.state.has_selected_values(),
            value_filters: &self.value_filters,
            registry: &self.registry,
            strings: &self.strings,
        });
        self.list.force_update(self.state.generation(), rows);
    }

    fn receive_props(&mut self, props: RefinersProps) {
        if props.context.language != self.state.props().context.language {
            self.strings = RefinerStrings::for_language(&props.context.language)
                .with_overrides(&self.overrides);
        }
        self.palette = RefinersPalette::for_variant(props.context.theme_variant);
        self.value_filters.retain(|facet, _| {
            props
                .refinement_results
                .iter()
                .any(|r| r.filter_name == *facet)
        });

        let invalidation = self.state.receive_props(props);
        let chips = self.state.props().selected_filter_values().len();
        self.chip_focus = self.chip_focus.and_then(|i| match chips {
            0 => None,
            n => Some(i.min(n - 1)),
        });
        tracing::debug!(
            target: "ftui.refiners",
            generation = invalidation.generation,
            reset_collapse = invalidation.reset_collapse,
            "props received"
        );
        self.refresh();
    }

    fn panel(&mut self, event: PanelEvent) {
        let was_open = self.is_open();
        let open = self.state.handle_panel(event).is_open();
        if open && !was_open {
            self.chip_focus = None;
        }
    }

    fn remove_all(&mut self) {
        match self.state.remove_all() {
            PanelAction::RemoveAllFilters => self.host.on_remove_all_filters(),
        }
    }

    fn forward(&mut self, update: FilterValuesUpdate) {
        tracing::debug!(
            target: "ftui.refiners",
            facet = %update.filter_name,
            values = update.values.len(),
            "filter values updated"
        );
        self.host.on_filter_values_updated(update);
    }

    fn dismiss_chip(&mut self, index: usize) {
        let chips = self.state.chips();
        let Some(chip) = chips.get(index) else {
            return;
        };
        let removal = self.state.remove_value(&chip.value);
        let items = self.state.items();
        let updates: Vec<FilterValuesUpdate> = removal
            .item_indices
            .iter()
            .filter_map(|&i| {
                let item = items.get(i)?;
                let matched = item.value_to_remove.as_ref()?;
                self.registry.resolve(item.template).remove(item, matched)
            })
            .collect();
        for update in updates {
            self.forward(update);
        }
        self.refresh();
    }

    fn toggle_group(&mut self, group: usize) {
        if self.state.toggle_collapse(group).is_some() {
            self.refresh();
            self.list.focus_group(group);
        }
    }

    fn activate_value(&mut self, group: usize, value_index: usize) {
        let groups = self.state.groups();
        let items = self.state.items();
        let update = groups
            .get(group)
            .and_then(|g| items.get(g.start_index))
            .and_then(|item| {
                let value = item.refinement_result.values.get(value_index)?;
                self.registry.resolve(item.template).activate(item, value)
            });
        if let Some(update) = update {
            self.forward(update);
        }
    }

    fn activate_cursor(&mut self) {
        let Some(kind) = self.list.cursor_row().map(|row| row.kind) else {
            return;
        };
        match kind {
            RowKind::RemoveAll => self.remove_all(),
            RowKind::Header { group, .. } => self.toggle_group(group),
            RowKind::Value {
                group, value_index, ..
            } => self.activate_value(group, value_index),
            RowKind::ValueFilter { .. } | RowKind::Spacer => {}
        }
    }

    fn editing_filter(&self) -> Option<String> {
        let RowKind::ValueFilter { group } = self.list.cursor_row()?.kind else {
            return None;
        };
        self.state.groups().get(group).map(|g| g.facet.clone())
    }

    fn edit_filter(&mut self, facet: String, edit: impl FnOnce(&mut String)) {
        let text = self.value_filters.entry(facet).or_default();
        edit(text);
        self.refresh();
    }

    fn move_chip_focus(&mut self, forward: bool) {
        let count = self.state.props().selected_filter_values().len();
        if count == 0 {
            self.chip_focus = None;
            return;
        }
        self.chip_focus = Some(match (self.chip_focus, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1).min(count - 1),
            (Some(i), false) => i.saturating_sub(1),
        });
    }

    fn handle_key(&mut self, key: &KeyEvent) {
        if key.kind != KeyEventKind::Press || key.modifiers.contains(Modifiers::CTRL) {
            return;
        }
        if self.is_open() {
            if let Some(facet) = self.editing_filter() {
                match key.code {
                    KeyCode::Char(c) => return self.edit_filter(facet, |t| t.push(c)),
                    KeyCode::Backspace => {
                        return self.edit_filter(facet, |t| {
                            t.pop();
                        });
                    }
                    _ => {}
                }
            }
            match key.code {
                KeyCode::Escape => self.panel(PanelEvent::LightDismiss),
                KeyCode::Char('q') => self.panel(PanelEvent::Dismiss),
                KeyCode::Char('f') => self.panel(PanelEvent::Toggle),
                KeyCode::Up | KeyCode::Char('k') => self.list.move_cursor(-1),
                KeyCode::Down | KeyCode::Char('j') => self.list.move_cursor(1),
                KeyCode::Enter | KeyCode::Char(' ') => self.activate_cursor(),
                KeyCode::Char('R') => self.remove_all(),
                _ => {}
            }
        } else {
            match key.code {
                KeyCode::Char('f') => self.panel(PanelEvent::Toggle),
                KeyCode::Left => self.move_chip_focus(false),
                KeyCode::Right => self.move_chip_focus(true),
                KeyCode::Char('x') | KeyCode::Delete | KeyCode::Backspace => {
                    if let Some(index) = self.chip_focus {
                        self.dismiss_chip(index);
                    }
                }
                KeyCode::Char('R') => self.remove_all(),
                _ => {}
            }
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────

    fn render_button_bar(&self, frame: &mut Frame, area: Rect) {
        let label = format!("[ {} ]", self.strings.filter_results_button);
        let width = (label.chars().count() as u16).min(area.width);
        let x = area.right().saturating_sub(width);
        Paragraph::new(label)
            .style(self.palette.button())
            .render(Rect::new(x, area.y, width, 1), frame);
    }

    fn render_chips(&self, frame: &mut Frame, area: Rect, chips: &[Chip]) {
        let mut spans = Vec::with_capacity(chips.len() * 2);
        for (i, chip) in chips.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(CHIP_GAP));
            }
            let focused = self.chip_focus == Some(i) && !self.is_open();
            spans.push(Span::styled(
                format!("{CHIP_GLYPH} {}", chip.label),
                self.palette.chip(focused),
            ));
        }
        Paragraph::new(Text::from_line(Line::from_spans(spans))).render(area, frame);
    }

    fn clear(&self, frame: &mut Frame, area: Rect) {
        for y in area.y..area.bottom() {
            for x in area.x..area.right() {
                let mut cell = Cell::from_char(' ');
                cell.bg = self.palette.panel_bg;
                frame.buffer.set_fast(x, y, cell);
            }
        }
    }

    fn row_style(&self, kind: RowKind) -> Style {
        match kind {
            RowKind::RemoveAll => self.palette.link(),
            RowKind::Header { .. } => self.palette.header(),
            RowKind::ValueFilter { .. } => self.palette.muted(),
            RowKind::Value { .. } | RowKind::Spacer => self.palette.text(),
        }
    }

    fn render_overlay(&self, frame: &mut Frame, area: Rect) {
        let width = self.panel_width.min(area.width);
        if width < 3 || area.height < 3 {
            return;
        }
        let rect = Rect::new(area.right() - width, area.y, width, area.height);
        self.clear(frame, rect);

        let title = format!(" {} ", self.strings.filter_panel_title);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.palette.border())
            .title(&title);
        let inner_width = usize::from(width - 2);
        let inner_height = usize::from(area.height - 2);

        let lines: Vec<Line> = if self.state.props().refinement_results.is_empty() {
            vec![Line::from_spans([Span::styled(
                self.strings.no_filter_configured.clone(),
                self.palette.muted(),
            )])]
        } else {
            let rows = self.list.rows();
            self.list
                .visible_window(inner_height)
                .map(|i| {
                    let row = &rows[i];
                    let style = if i == self.list.cursor() {
                        self.palette.selection()
                    } else {
                        self.row_style(row.kind)
                    };
                    let text = format!("{:<inner_width$}", row.label);
                    Line::from_spans([Span::styled(text, style)])
                })
                .collect()
        };

        Paragraph::new(Text::from_lines(lines))
            .block(block)
            .style(self.palette.text())
            .render(rect, frame);
    }
}

impl<H: RefinersHost> Model for RefinersPanel<H> {
    type Message = RefinersMsg;

    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message> {
        match msg {
            RefinersMsg::Terminal(Event::Key(key)) => self.handle_key(&key),
            RefinersMsg::Terminal(_) => {}
            RefinersMsg::PropsUpdated(props) => self.receive_props(props),
            RefinersMsg::TogglePanel => self.panel(PanelEvent::Toggle),
            RefinersMsg::DismissPanel => self.panel(PanelEvent::Dismiss),
            RefinersMsg::RemoveAllFilters => self.remove_all(),
            RefinersMsg::DismissChip(index) => self.dismiss_chip(index),
            RefinersMsg::ToggleGroup(group) => self.toggle_group(group),
        }
        Cmd::None
    }

    fn view(&self, frame: &mut Frame) {
        let area = Rect::new(0, 0, frame.width(), frame.height());
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.render_button_bar(frame, Rect::new(area.x, area.y, area.width, 1));
        let chips = self.state.chips();
        if !chips.is_empty() && area.height > 1 {
            self.render_chips(frame, Rect::new(area.x, area.y + 1, area.width, 1), &chips);
        }
        if self.is_open() {
            self.render_overlay(frame, area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ftui_refiners_core::{RefinementResult, RefinementValue, SelectedFilter};

    fn key(code: KeyCode) -> RefinersMsg {
        RefinersMsg::Terminal(Event::Key(KeyEvent::new(code)))
    }

    fn panel() -> RefinersPanel {
        let red = RefinementValue::new("Color", "red", "Red");
        let blue = RefinementValue::new("Color", "blue", "Blue");
        RefinersPanel::new(
            RefinersProps::new(
                vec![RefinementResult::new("Color", vec![red.clone(), blue.clone()])],
                vec![SelectedFilter::new("Color", vec![red, blue])],
                Vec::new(),
            ),
            &RefinersSettings::default(),
        )
    }

    #[test]
    fn chip_focus_moves_and_clamps() {
        let mut p = panel();
        assert_eq!(p.chip_focus(), None);
        p.update(key(KeyCode::Left));
        assert_eq!(p.chip_focus(), Some(1));
        p.update(key(KeyCode::Right));
        assert_eq!(p.chip_focus(), Some(1));
        p.update(key(KeyCode::Left));
        p.update(key(KeyCode::Left));
        assert_eq!(p.chip_focus(), Some(0));
    }

    #[test]
    fn opening_clears_chip_focus() {
        let mut p = panel();
        p.update(key(KeyCode::Right));
        p.update(key(KeyCode::Char('f')));
        assert!(p.is_open());
        assert_eq!(p.chip_focus(), None);
    }

    #[test]
    fn closed_panel_ignores_list_keys() {
        let mut p = panel();
        let cursor = p.list().cursor();
        p.update(key(KeyCode::Down));
        p.update(key(KeyCode::Char('j')));
        assert_eq!(p.list().cursor(), cursor);
    }

    #[test]
    fn ctrl_chords_are_ignored() {
        let mut p = panel();
        let chord = KeyEvent::new(KeyCode::Char('f')).with_modifiers(Modifiers::CTRL);
        p.update(RefinersMsg::Terminal(Event::Key(chord)));
        assert!(!p.is_open());
    }
}

#![forbid(unsafe_code)]

//! Overlay panel lifecycle.
//!
//! ```text
//!            Toggle
//!   Closed ─────────▶ Open
//!     ▲                │
//!     └────────────────┘
//!   Toggle | Dismiss | LightDismiss
//! ```

/// Visibility of the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
        }
    }
}

/// Input to the panel state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// The filter button was activated.
    Toggle,
    /// The panel's close control was activated.
    Dismiss,
    /// Click-away or Esc.
    LightDismiss,
}

/// Request the panel makes of its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    RemoveAllFilters,
}

/// Owns the open/closed state of the overlay panel.
#[derive(Debug, Clone, Default)]
pub struct PanelController {
    state: PanelState,
}

impl PanelController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> PanelState {
        self.state
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// Apply an event and return the new state.
    pub fn handle(&mut self, event: PanelEvent) -> PanelState {
        let from = self.state;
        let to = match (from, event) {
            (PanelState::Closed, PanelEvent::Toggle) => PanelState::Open,
            (PanelState::Open, PanelEvent::Toggle) => PanelState::Closed,
            (_, PanelEvent::Dismiss | PanelEvent::LightDismiss) => PanelState::Closed,
        };
        if from != to {
            tracing::debug!(
                target: "ftui.refiners",
                from = from.as_str(),
                to = to.as_str(),
                event = ?event,
                "panel transition"
            );
        }
        self.state = to;
        to
    }

    /// Ask the host to clear every filter. The panel state is left as is;
    /// the resulting prop update drives recomputation.
    #[must_use]
    pub fn remove_all(&self) -> PanelAction {
        tracing::debug!(target: "ftui.refiners", "remove all filters requested");
        PanelAction::RemoveAllFilters
    }
}

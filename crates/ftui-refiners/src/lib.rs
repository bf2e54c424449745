#![forbid(unsafe_code)]

//! Refiner panel widget for FrankenTUI.
//!
//! # Role in ftui-refiners
//! This crate puts a terminal face on `ftui-refiners-core`: a button bar, a
//! row of dismissible chips for the selected values, and an overlay panel
//! listing one collapsible group per facet.
//!
//! # Primary responsibilities
//! - **RefinersPanel**: an ftui `Model` driving the core state from key
//!   events and host prop updates.
//! - **GroupedList**: cached rows refreshed only on `force_update`.
//! - **Templates**: per-refiner value renderers with a checkbox default.
//! - **Strings / theme**: localized labels and light/dark palettes.
//!
//! # Example
//!
//! ```rust,ignore
//! let settings = RefinersSettings::from_file("refiners.toml")?;
//! let props = RefinersProps::new(results, selected, settings.refiners.clone())
//!     .with_context(settings.render_context());
//! let mut panel = RefinersPanel::with_host(props, &settings, MyHost::default());
//! panel.update(RefinersMsg::TogglePanel);
//! ```

pub mod grouped_list;
pub mod panel;
pub mod strings;
pub mod template;
pub mod theme;

pub use grouped_list::{GroupedList, ListRow, RowKind};
pub use panel::{NoopHost, RefinersHost, RefinersMsg, RefinersPanel};
pub use strings::RefinerStrings;
pub use template::{CheckboxRenderer, TemplateRegistry, ValueRenderer, ValueRow};
pub use theme::RefinersPalette;

pub use ftui_refiners_core as core;

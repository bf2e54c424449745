#![forbid(unsafe_code)]

//! Refiner panel core: state reconciliation for grouped search facets.
//!
//! # Role in ftui-refiners
//! `ftui-refiners-core` owns everything about the refiner panel that does not
//! touch a terminal. It keeps three independently changing inputs consistent:
//! the refinement results, the selected filters, and the locally cached
//! collapse flags and item list.
//!
//! # Primary responsibilities
//! - **Group Reconciler** ([`groups`]): one collapsible group per facet, with
//!   collapse state carried across prop updates.
//! - **Item Builder** ([`items`]): one renderable item per facet, with
//!   removal requests routed to the owning facet.
//! - **Chip Renderer** ([`chips`]): labels for the selected values.
//! - **Panel Controller** ([`panel`]): open/closed lifecycle of the overlay.
//! - **State** ([`state`]): composes the above and publishes generations.
//!
//! # How it fits in the system
//! The widget crate (`ftui-refiners`) drives [`RefinersState`] from its
//! `update` function and repaints when handed an [`Invalidation`].

pub mod chips;
pub mod config;
pub mod context;
pub mod groups;
pub mod items;
pub mod model;
pub mod panel;
pub mod state;

pub use chips::{Chip, ChipKind};
pub use config::{ConfigError, ConfigIssue, ConfigLookup, RefinersSettings, StringOverrides};
pub use context::{RenderContext, ThemeVariant, UserIdentity, UserService};
pub use groups::{Group, GroupIdentity};
pub use items::{Item, MatchedRemoval, RemovalRequest, RemovalTarget};
pub use model::{
    FilterValuesUpdate, RefinementOperator, RefinementResult, RefinementValue,
    RefinerConfiguration, RefinerTemplate, SelectedFilter,
};
pub use panel::{PanelAction, PanelController, PanelEvent, PanelState};
pub use state::{Invalidation, RefinersProps, RefinersState, Removal};

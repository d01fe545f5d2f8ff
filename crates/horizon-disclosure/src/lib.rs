//! Horizon disclosure widgets: a trigger that shows and hides a panel.
//!
//! A disclosure is made of three cooperating elements:
//!
//! - [`Disclosure`]: the root, which owns the open/closed state and the ids
//!   linking trigger and panel
//! - [`DisclosureTrigger`]: the button that toggles the disclosure
//! - [`DisclosurePanel`]: the content region shown while the disclosure is
//!   open
//!
//! Trigger and panel are constructed with a [`DisclosureHandle`] from their
//! root; constructing either without one fails with
//! [`DisclosureError::MissingParent`].
//!
//! The state model itself lives in [`horizon_disclosure_core`] and is
//! re-exported here.
//!
//! # Example
//!
//! ```
//! use horizon_disclosure::prelude::*;
//!
//! let root = Disclosure::new(DisclosureConfig::new());
//! root.assign_ids("btn-1", "panel-1")?;
//!
//! let trigger = DisclosureTrigger::new(Some(&root.handle()), TriggerConfig::new())?;
//! let panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None)?;
//!
//! trigger.handle_click(&mut ClickEvent::new())?;
//! assert!(panel.is_visible());
//! assert_eq!(trigger.attributes().controls.as_deref(), Some("panel-1"));
//! # Ok::<(), DisclosureError>(())
//! ```
//!
//! # Features
//!
//! - `winit`: conversion of winit keyboard input into [`events::Key`] values

pub mod accessibility;
pub mod disabled;
pub mod events;
#[cfg(feature = "winit")]
pub mod keyboard;
pub mod prelude;
pub mod render;

mod panel;
mod root;
mod trigger;

pub use horizon_disclosure_core::{
    Action, DisclosureError, DisclosurePhase, DisclosureSlot, DisclosureState, DisclosureStore,
    IdGenerator, LocalIds, OpenClosed, OpenClosedProvider, OpenClosedSubscriber, Result,
    SequentialIds, StateChange,
};

pub use panel::{DEFAULT_PANEL_TAG, DisclosurePanel, PANEL_FEATURES, PANEL_NAME, PanelConfig};
pub use root::{DISCLOSURE_NAME, Disclosure, DisclosureConfig, DisclosureHandle};
pub use trigger::{
    DEFAULT_TRIGGER_TAG, DisclosureTrigger, TRIGGER_NAME, TriggerAttributes, TriggerConfig,
};

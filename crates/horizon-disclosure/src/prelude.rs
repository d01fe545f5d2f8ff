//! Prelude module for Horizon disclosure widgets.
//!
//! ```ignore
//! use horizon_disclosure::prelude::*;
//! ```
//!
//! This provides access to:
//! - The three disclosure elements and their configuration
//! - The state model (`DisclosureState`, `Action`, `DisclosurePhase`)
//! - Input events the trigger handles
//! - The render contract (`Renderer`, `ElementRenderer`, `RenderOutput`)

// ============================================================================
// Elements
// ============================================================================

pub use crate::{
    Disclosure, DisclosureConfig, DisclosureHandle, DisclosurePanel, DisclosureTrigger,
    PanelConfig, TriggerAttributes, TriggerConfig,
};

// ============================================================================
// State Model
// ============================================================================

pub use horizon_disclosure_core::{
    Action, DisclosureError, DisclosurePhase, DisclosureSlot, DisclosureState, IdGenerator,
    LocalIds, OpenClosed, OpenClosedSubscriber, SequentialIds,
};

// ============================================================================
// Events and Rendering
// ============================================================================

pub use crate::accessibility::{Accessible, AccessibleRole};
pub use crate::disabled::{DisabledStateDetector, GroupDisabledDetector};
pub use crate::events::{ClickEvent, Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers, MouseButton};
pub use crate::render::{Attributes, ElementRenderer, RenderOutput, Renderer};

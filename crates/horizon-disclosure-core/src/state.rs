//! Disclosure state model and transition function.
//!
//! [`DisclosureState`] is the single piece of mutable data behind a disclosure
//! widget. It is never mutated in place: [`transition`] takes the current
//! snapshot and an [`Action`] and returns the next snapshot.
//!
//! When an action would not change anything, `transition` returns the *same*
//! `Arc` it was given. Consumers rely on this: comparing the previous and next
//! snapshot with `Arc::ptr_eq` is how they skip redundant work.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_disclosure_core::{transition, Action, DisclosurePhase, DisclosureState};
//!
//! let state = Arc::new(DisclosureState::new(DisclosurePhase::Closed));
//!
//! let linked = transition(&state, &Action::LinkPanel).unwrap();
//! let again = transition(&linked, &Action::LinkPanel).unwrap();
//! assert!(Arc::ptr_eq(&linked, &again));
//!
//! let open = transition(&linked, &Action::ToggleOpen).unwrap();
//! assert_eq!(open.phase(), DisclosurePhase::Open);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DisclosureError, Result};

/// Whether a disclosure is expanded or collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DisclosurePhase {
    /// The panel is expanded.
    Open,
    /// The panel is collapsed.
    #[default]
    Closed,
}

impl DisclosurePhase {
    /// The phase for an `open` flag.
    pub fn from_open(open: bool) -> Self {
        if open { Self::Open } else { Self::Closed }
    }

    /// Check whether this is [`DisclosurePhase::Open`].
    pub fn is_open(self) -> bool {
        self == Self::Open
    }

    /// The opposite phase.
    pub fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

impl fmt::Display for DisclosurePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// The read-only value handed to render code and descendants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DisclosureSlot {
    /// Whether the disclosure is open.
    pub open: bool,
}

impl From<DisclosurePhase> for DisclosureSlot {
    fn from(phase: DisclosurePhase) -> Self {
        Self {
            open: phase.is_open(),
        }
    }
}

/// A snapshot of a disclosure's state.
///
/// Identifiers start out as placeholders (empty strings) and are assigned by
/// the root's finalize step; see [`DisclosureState::is_identified`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DisclosureState {
    phase: DisclosurePhase,
    panel_linked: bool,
    trigger_id: String,
    panel_id: String,
}

impl DisclosureState {
    /// Create a state in `phase` with no linked panel and placeholder ids.
    pub fn new(phase: DisclosurePhase) -> Self {
        Self {
            phase,
            ..Self::default()
        }
    }

    /// Set both identifiers using builder pattern.
    pub fn with_ids(mut self, trigger_id: impl Into<String>, panel_id: impl Into<String>) -> Self {
        self.trigger_id = trigger_id.into();
        self.panel_id = panel_id.into();
        self
    }

    /// Set the linkage flag using builder pattern.
    pub fn with_panel_linked(mut self, linked: bool) -> Self {
        self.panel_linked = linked;
        self
    }

    /// The current phase.
    pub fn phase(&self) -> DisclosurePhase {
        self.phase
    }

    /// Check whether the disclosure is open.
    pub fn is_open(&self) -> bool {
        self.phase.is_open()
    }

    /// Check whether a panel is attached and registered.
    pub fn is_panel_linked(&self) -> bool {
        self.panel_linked
    }

    /// The trigger's element id.
    pub fn trigger_id(&self) -> &str {
        &self.trigger_id
    }

    /// The panel's element id.
    pub fn panel_id(&self) -> &str {
        &self.panel_id
    }

    /// Check whether both identifiers have been assigned.
    pub fn is_identified(&self) -> bool {
        !self.trigger_id.is_empty() && !self.panel_id.is_empty()
    }

    /// The slot value derived from this state.
    pub fn slot(&self) -> DisclosureSlot {
        DisclosureSlot::from(self.phase)
    }
}

impl fmt::Display for DisclosureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (linked: {}, trigger: {:?}, panel: {:?})",
            self.phase, self.panel_linked, self.trigger_id, self.panel_id
        )
    }
}

/// An intent sent to the transition function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Action {
    /// Flip between open and closed.
    ToggleOpen,
    /// Register a mounted panel.
    LinkPanel,
    /// Unregister the panel.
    UnlinkPanel,
    /// Assign the trigger's element id.
    AssignTriggerId(String),
    /// Assign the panel's element id.
    AssignPanelId(String),
}

impl Action {
    /// A stable name for the action kind, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToggleOpen => "ToggleOpen",
            Self::LinkPanel => "LinkPanel",
            Self::UnlinkPanel => "UnlinkPanel",
            Self::AssignTriggerId(_) => "AssignTriggerId",
            Self::AssignPanelId(_) => "AssignPanelId",
        }
    }
}

/// Compute the next state for `action`.
///
/// Returns `state` itself (the same `Arc`) when the action is a no-op. Fields
/// the action does not touch are carried over unchanged.
pub fn transition(state: &Arc<DisclosureState>, action: &Action) -> Result<Arc<DisclosureState>> {
    let next = match action {
        Action::ToggleOpen => update(state, |s| s.phase = s.phase.toggled()),
        Action::LinkPanel => {
            if state.panel_linked {
                return Ok(Arc::clone(state));
            }
            update(state, |s| s.panel_linked = true)
        }
        Action::UnlinkPanel => {
            if !state.panel_linked {
                return Ok(Arc::clone(state));
            }
            update(state, |s| s.panel_linked = false)
        }
        Action::AssignTriggerId(id) => {
            if state.trigger_id == *id {
                return Ok(Arc::clone(state));
            }
            update(state, |s| s.trigger_id = id.clone())
        }
        Action::AssignPanelId(id) => {
            if state.panel_id == *id {
                return Ok(Arc::clone(state));
            }
            update(state, |s| s.panel_id = id.clone())
        }
        #[allow(unreachable_patterns)]
        _ => {
            return Err(DisclosureError::UnhandledAction {
                action: action.kind(),
            });
        }
    };
    Ok(next)
}

fn update(state: &DisclosureState, f: impl FnOnce(&mut DisclosureState)) -> Arc<DisclosureState> {
    let mut next = state.clone();
    f(&mut next);
    Arc::new(next)
}

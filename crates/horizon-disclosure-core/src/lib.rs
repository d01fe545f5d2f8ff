//! Core state model for Horizon disclosure widgets.
//!
//! A disclosure pairs a trigger control with a collapsible panel. This crate
//! holds everything the two need to agree on, independent of how they are
//! rendered:
//!
//! - **State model**: [`DisclosureState`] snapshots and the [`Action`]s that
//!   change them
//! - **Transition function**: [`transition`], the only code that produces a
//!   new state
//! - **Store**: [`DisclosureStore`], which serialises dispatches and notifies
//!   subscribers
//! - **Signals and memos**: [`Signal`], [`Property`] and [`Memo`] for change
//!   notification and derived values
//! - **Ambient state**: [`OpenClosedProvider`] / [`OpenClosedSubscriber`]
//! - **Identifiers**: [`IdGenerator`] implementations for element ids
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_disclosure_core::{Action, DisclosurePhase, DisclosureState, DisclosureStore};
//!
//! let store = Arc::new(DisclosureStore::new(DisclosureState::new(DisclosurePhase::Closed)));
//!
//! store.state_changed.connect(|change| {
//!     println!("{} -> {}", change.previous, change.current);
//! });
//!
//! store.dispatch(Action::ToggleOpen)?;
//! assert!(store.state().is_open());
//! # Ok::<(), horizon_disclosure_core::DisclosureError>(())
//! ```

mod error;
pub mod id;
pub mod logging;
pub mod open_closed;
pub mod property;
pub mod signal;
pub mod state;
pub mod store;

pub use error::{DisclosureError, Result};
pub use id::{IdGenerator, LocalIds, SequentialIds};
pub use open_closed::{OpenClosed, OpenClosedProvider, OpenClosedSubscriber};
pub use property::{Memo, Property};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use state::{transition, Action, DisclosurePhase, DisclosureSlot, DisclosureState};
pub use store::{DisclosureStore, StateChange};

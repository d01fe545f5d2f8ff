//! The disclosure store: current state plus a serialised dispatch queue.
//!
//! [`DisclosureStore`] is the only writer of [`DisclosureState`]. All writes go
//! through [`DisclosureStore::dispatch`], which runs [`transition`] and, if the
//! snapshot changed, emits [`DisclosureStore::state_changed`].
//!
//! # Ordering
//!
//! Actions are processed strictly in the order they are dispatched. A dispatch
//! issued while another one is being processed (typically from a slot reacting
//! to `state_changed`) is appended to the queue and runs once the current
//! transition and all of its notifications have completed. Such a nested call
//! returns immediately; the state it reads afterwards does not yet include its
//! own action.

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::error::Result;
use crate::logging::targets;
use crate::signal::Signal;
use crate::state::{transition, Action, DisclosurePhase, DisclosureState};

/// A committed transition, as seen by `state_changed` slots.
#[derive(Debug, Clone)]
pub struct StateChange {
    /// The snapshot before the action.
    pub previous: Arc<DisclosureState>,
    /// The snapshot after the action.
    pub current: Arc<DisclosureState>,
}

impl StateChange {
    /// Check whether the phase differs between the two snapshots.
    pub fn phase_changed(&self) -> bool {
        self.previous.phase() != self.current.phase()
    }

    /// Check whether this change moved the phase to `phase`.
    pub fn entered(&self, phase: DisclosurePhase) -> bool {
        self.phase_changed() && self.current.phase() == phase
    }
}

/// Owns a disclosure's state and serialises every write to it.
pub struct DisclosureStore {
    state: RwLock<Arc<DisclosureState>>,
    queue: Mutex<VecDeque<Action>>,
    draining: AtomicBool,

    /// Emitted after every transition that produced a new snapshot.
    pub state_changed: Signal<StateChange>,

    /// Emitted for every action taken off the queue, including no-ops.
    pub action_processed: Signal<Action>,
}

impl DisclosureStore {
    /// Create a store holding `initial`.
    pub fn new(initial: DisclosureState) -> Self {
        Self {
            state: RwLock::new(Arc::new(initial)),
            queue: Mutex::new(VecDeque::new()),
            draining: AtomicBool::new(false),
            state_changed: Signal::new(),
            action_processed: Signal::new(),
        }
    }

    /// The current snapshot.
    pub fn state(&self) -> Arc<DisclosureState> {
        Arc::clone(&self.state.read())
    }

    /// Dispatch an action.
    ///
    /// If no other dispatch is in flight, this processes the whole queue before
    /// returning. Otherwise the action is queued behind the in-flight one.
    ///
    /// A reducer error aborts processing and discards the rest of the queue.
    #[tracing::instrument(skip(self), target = "horizon_disclosure_core::store", level = "trace")]
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.queue.lock().push_back(action);

        loop {
            if self.draining.swap(true, Ordering::AcqRel) {
                tracing::trace!(target: targets::STORE, "queued behind in-flight dispatch");
                return Ok(());
            }

            let result = {
                let _guard = DrainGuard { store: self };
                self.drain()
            };

            // Another thread may have queued between our last pop and the reset.
            if result.is_err() || self.queue.lock().is_empty() {
                return result;
            }
        }
    }

    fn drain(&self) -> Result<()> {
        loop {
            let Some(action) = self.queue.lock().pop_front() else {
                return Ok(());
            };

            let previous = self.state();
            let current = match transition(&previous, &action) {
                Ok(current) => current,
                Err(err) => {
                    self.queue.lock().clear();
                    tracing::error!(target: targets::STORE, action = action.kind(), %err, "transition failed");
                    return Err(err);
                }
            };

            if Arc::ptr_eq(&previous, &current) {
                tracing::trace!(target: targets::STORE, action = action.kind(), "no-op");
                self.action_processed.emit(action);
                continue;
            }

            *self.state.write() = Arc::clone(&current);
            tracing::debug!(target: targets::STORE, action = action.kind(), state = %current, "state changed");

            self.action_processed.emit(action);
            self.state_changed.emit(StateChange { previous, current });
        }
    }
}

/// Releases the draining flag when a drain ends, including by unwinding.
///
/// If a slot panicked, the actions still queued were dispatched in reaction
/// to a transition whose notifications never completed, so they are dropped.
struct DrainGuard<'a> {
    store: &'a DisclosureStore,
}

impl Drop for DrainGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            let dropped = {
                let mut queue = self.store.queue.lock();
                let dropped = queue.len();
                queue.clear();
                dropped
            };
            tracing::error!(target: targets::STORE, dropped, "slot panicked during dispatch, queue cleared");
        }
        self.store.draining.store(false, Ordering::Release);
    }
}

impl std::fmt::Debug for DisclosureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisclosureStore")
            .field("state", &self.state())
            .field("queued", &self.queue.lock().len())
            .finish()
    }
}

static_assertions::assert_impl_all!(DisclosureStore: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Arc<DisclosureStore> {
        Arc::new(DisclosureStore::new(DisclosureState::new(DisclosurePhase::Closed)))
    }

    #[test]
    fn test_dispatch_updates_state() {
        let store = store();
        store.dispatch(Action::ToggleOpen).unwrap();
        assert!(store.state().is_open());
    }

    #[test]
    fn test_noop_dispatch_keeps_snapshot_and_is_silent() {
        let store = store();
        store.dispatch(Action::LinkPanel).unwrap();
        let linked = store.state();

        let changes = Arc::new(Mutex::new(0));
        let changes_clone = changes.clone();
        store.state_changed.connect(move |_| *changes_clone.lock() += 1);

        store.dispatch(Action::LinkPanel).unwrap();
        assert!(Arc::ptr_eq(&linked, &store.state()));
        assert_eq!(*changes.lock(), 0);
    }

    #[test]
    fn test_nested_dispatch_runs_after_notifications() {
        let store = store();
        let log = Arc::new(Mutex::new(Vec::new()));

        // First slot reacts to opening by linking the panel.
        let weak = Arc::downgrade(&store);
        let log_clone = log.clone();
        store.state_changed.connect(move |change| {
            log_clone.lock().push(format!("a:{}", change.current.phase()));
            if change.entered(DisclosurePhase::Open) {
                if let Some(store) = weak.upgrade() {
                    store.dispatch(Action::LinkPanel).unwrap();
                    // Queued, not yet applied.
                    assert!(!store.state().is_panel_linked());
                }
            }
        });

        let log_clone = log.clone();
        store.state_changed.connect(move |change| {
            log_clone
                .lock()
                .push(format!("b:{}:{}", change.current.phase(), change.current.is_panel_linked()));
        });

        store.dispatch(Action::ToggleOpen).unwrap();

        assert!(store.state().is_panel_linked());
        assert_eq!(
            *log.lock(),
            vec!["a:open", "b:open:false", "a:open", "b:open:true"]
        );
    }

    #[test]
    fn test_dispatch_recovers_after_panicking_slot() {
        let store = store();
        let panicked = Arc::new(AtomicBool::new(false));

        let weak = Arc::downgrade(&store);
        let panicked_clone = panicked.clone();
        store.state_changed.connect(move |change| {
            if change.entered(DisclosurePhase::Open) && !panicked_clone.swap(true, Ordering::SeqCst) {
                // Queued behind the toggle, then discarded by the unwind.
                if let Some(store) = weak.upgrade() {
                    store.dispatch(Action::AssignPanelId("lost".into())).unwrap();
                }
                panic!("slot failure");
            }
        });

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.dispatch(Action::ToggleOpen)
        }));
        assert!(result.is_err());
        assert!(store.state().is_open());
        assert_eq!(store.state().panel_id(), "");

        store.dispatch(Action::ToggleOpen).unwrap();
        assert!(!store.state().is_open());

        store.dispatch(Action::LinkPanel).unwrap();
        assert!(store.state().is_panel_linked());
    }

    #[test]
    fn test_action_processed_reports_noops() {
        let store = store();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        store
            .action_processed
            .connect(move |action| seen_clone.lock().push(action.kind()));

        store.dispatch(Action::UnlinkPanel).unwrap();
        store.dispatch(Action::ToggleOpen).unwrap();

        assert_eq!(*seen.lock(), vec!["UnlinkPanel", "ToggleOpen"]);
    }

    #[test]
    fn test_state_change_entered() {
        let closed = Arc::new(DisclosureState::new(DisclosurePhase::Closed));
        let open = Arc::new(DisclosureState::new(DisclosurePhase::Open));

        let change = StateChange {
            previous: open.clone(),
            current: closed.clone(),
        };
        assert!(change.entered(DisclosurePhase::Closed));
        assert!(!change.entered(DisclosurePhase::Open));

        let relink = StateChange {
            previous: closed.clone(),
            current: Arc::new(DisclosureState::new(DisclosurePhase::Closed).with_panel_linked(true)),
        };
        assert!(!relink.phase_changed());
    }
}

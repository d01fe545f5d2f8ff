//! The disclosure root.
//!
//! [`Disclosure`] owns the state of one disclosure widget. It hands out
//! [`DisclosureHandle`]s that its trigger and panel are constructed with, and
//! publishes its open/closed phase on an ambient channel for any other
//! descendant that wants it.
//!
//! # Construction
//!
//! Construction is two-phase. [`Disclosure::new`] creates the state with
//! placeholder ids; [`Disclosure::finalize`] generates the real ids and
//! dispatches them. Ids that only become known later (for example after a
//! hydration pass) are applied with [`Disclosure::assign_ids`].
//!
//! ```
//! use horizon_disclosure::{Disclosure, DisclosureConfig, DisclosurePanel, DisclosureTrigger};
//! use horizon_disclosure::{PanelConfig, TriggerConfig};
//! use horizon_disclosure_core::LocalIds;
//!
//! let root = Disclosure::with_generator(DisclosureConfig::new(), &LocalIds::default())?;
//! let handle = root.handle();
//!
//! let trigger = DisclosureTrigger::new(Some(&handle), TriggerConfig::new())?;
//! let panel = DisclosurePanel::mount(Some(&handle), PanelConfig::new(), None)?;
//!
//! let mut click = horizon_disclosure::events::ClickEvent::new();
//! trigger.handle_click(&mut click)?;
//! assert!(panel.is_visible());
//! # Ok::<(), horizon_disclosure_core::DisclosureError>(())
//! ```

use std::sync::Arc;

use horizon_disclosure_core::{
    Action, ConnectionId, DisclosurePhase, DisclosureSlot, DisclosureState, DisclosureStore,
    IdGenerator, Memo, OpenClosedProvider, OpenClosedSubscriber, Result,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::render::{Attributes, FRAGMENT, RenderFeatures, RenderOutput, RenderRequest, RenderStrategy, Renderer};

/// Name of the root element, used in diagnostics.
pub const DISCLOSURE_NAME: &str = "Disclosure";

/// Configuration for a disclosure root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisclosureConfig {
    /// Whether the disclosure starts open.
    pub initial_open: bool,
    /// Tag to render the root as; defaults to a fragment.
    pub tag: Option<String>,
    /// Attributes passed through to the rendered root.
    pub props: Attributes,
}

impl DisclosureConfig {
    /// Create the default configuration (closed, no tag, no attributes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the initial phase using builder pattern.
    pub fn with_initial_open(mut self, open: bool) -> Self {
        self.initial_open = open;
        self
    }

    /// Set the render tag using builder pattern.
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set passthrough attributes using builder pattern.
    pub fn with_props(mut self, props: Attributes) -> Self {
        self.props = props;
        self
    }
}

struct Shared {
    store: Arc<DisclosureStore>,
    slot: Memo<DisclosurePhase, Arc<DisclosureSlot>>,
}

/// A cheap, cloneable handle to a disclosure's state and dispatch entry point.
///
/// Triggers, panels and other descendants are constructed with a handle
/// instead of looking their root up implicitly.
#[derive(Clone)]
pub struct DisclosureHandle {
    shared: Arc<Shared>,
}

impl DisclosureHandle {
    /// The current state snapshot.
    pub fn state(&self) -> Arc<DisclosureState> {
        self.shared.store.state()
    }

    /// Dispatch an action to the root's store.
    pub fn dispatch(&self, action: Action) -> Result<()> {
        self.shared.store.dispatch(action)
    }

    /// The underlying store, for subscribing to state changes.
    pub fn store(&self) -> &Arc<DisclosureStore> {
        &self.shared.store
    }

    /// The slot value, recomputed only when the phase changes.
    pub fn slot(&self) -> Arc<DisclosureSlot> {
        self.shared.slot.get(self.state().phase())
    }

    /// Check whether the disclosure is open.
    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    /// Flip the disclosure between open and closed.
    pub fn toggle(&self) -> Result<()> {
        self.dispatch(Action::ToggleOpen)
    }
}

impl std::fmt::Debug for DisclosureHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisclosureHandle")
            .field("state", &self.state())
            .finish()
    }
}

/// Ids most recently dispatched by the root.
#[derive(Debug, Default)]
struct AssignedIds {
    trigger: Option<String>,
    panel: Option<String>,
}

/// The root of a disclosure widget.
pub struct Disclosure {
    handle: DisclosureHandle,
    config: DisclosureConfig,
    open_closed: OpenClosedProvider,
    phase_subscription: ConnectionId,
    generated: Option<(String, String)>,
    assigned: Mutex<AssignedIds>,
}

impl Disclosure {
    /// Create a root with placeholder ids.
    ///
    /// Call [`finalize`](Self::finalize) (or use
    /// [`with_generator`](Self::with_generator)) before rendering, so the
    /// trigger and panel have real ids to reference.
    pub fn new(config: DisclosureConfig) -> Self {
        let phase = DisclosurePhase::from_open(config.initial_open);
        let store = Arc::new(DisclosureStore::new(DisclosureState::new(phase)));

        let open_closed = OpenClosedProvider::new(phase.into());
        let provider = open_closed.clone();
        let phase_subscription = store.state_changed.connect(move |change| {
            if change.phase_changed() {
                provider.publish(change.current.phase().into());
            }
        });

        tracing::debug!(target: "horizon_disclosure::root", %phase, "disclosure created");

        Self {
            handle: DisclosureHandle {
                shared: Arc::new(Shared {
                    store,
                    slot: Memo::new(|phase: &DisclosurePhase| Arc::new(DisclosureSlot::from(*phase))),
                }),
            },
            config,
            open_closed,
            phase_subscription,
            generated: None,
            assigned: Mutex::new(AssignedIds::default()),
        }
    }

    /// Create a root and finalize its ids in one step.
    pub fn with_generator(config: DisclosureConfig, ids: &dyn IdGenerator) -> Result<Self> {
        let mut root = Self::new(config);
        root.finalize(ids)?;
        Ok(root)
    }

    /// Generate this root's ids and dispatch them.
    ///
    /// Ids are generated on the first call only; later calls re-apply the same
    /// ids, which is a no-op unless they were overridden in between.
    pub fn finalize(&mut self, ids: &dyn IdGenerator) -> Result<()> {
        let (trigger_id, panel_id) = self
            .generated
            .get_or_insert_with(|| (ids.trigger_id(), ids.panel_id()))
            .clone();
        self.assign_ids(trigger_id, panel_id)
    }

    /// Apply ids supplied by an external collaborator.
    ///
    /// Each id is dispatched only if it differs from the last one this root
    /// dispatched.
    pub fn assign_ids(&self, trigger_id: impl Into<String>, panel_id: impl Into<String>) -> Result<()> {
        let trigger_id = trigger_id.into();
        let panel_id = panel_id.into();

        let mut actions = Vec::with_capacity(2);
        {
            let mut assigned = self.assigned.lock();
            if assigned.trigger.as_deref() != Some(trigger_id.as_str()) {
                assigned.trigger = Some(trigger_id.clone());
                actions.push(Action::AssignTriggerId(trigger_id));
            }
            if assigned.panel.as_deref() != Some(panel_id.as_str()) {
                assigned.panel = Some(panel_id.clone());
                actions.push(Action::AssignPanelId(panel_id));
            }
        }

        for action in actions {
            self.handle.dispatch(action)?;
        }
        Ok(())
    }

    /// A handle for constructing this root's trigger, panel and descendants.
    pub fn handle(&self) -> DisclosureHandle {
        self.handle.clone()
    }

    /// The current state snapshot.
    pub fn state(&self) -> Arc<DisclosureState> {
        self.handle.state()
    }

    /// Check whether the disclosure is open.
    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    /// Flip the disclosure between open and closed.
    pub fn toggle(&self) -> Result<()> {
        self.handle.toggle()
    }

    /// The slot value, recomputed only when the phase changes.
    pub fn slot(&self) -> Arc<DisclosureSlot> {
        self.handle.slot()
    }

    /// A subscriber to this root's ambient open/closed signal.
    pub fn open_closed(&self) -> OpenClosedSubscriber {
        self.open_closed.subscriber()
    }

    /// The configuration this root was created with.
    pub fn config(&self) -> &DisclosureConfig {
        &self.config
    }

    /// Render the root element.
    pub fn render(&self, renderer: &mut dyn Renderer) -> RenderOutput {
        renderer.render(RenderRequest {
            props: self.config.props.clone(),
            slot: *self.slot(),
            tag: self.config.tag.as_deref(),
            default_tag: FRAGMENT,
            name: DISCLOSURE_NAME,
            visible: true,
            features: RenderFeatures::NONE,
            strategy: RenderStrategy::Unmount,
            is_static: false,
        })
    }
}

impl Drop for Disclosure {
    fn drop(&mut self) {
        self.handle
            .store()
            .state_changed
            .disconnect(self.phase_subscription);
    }
}

impl std::fmt::Debug for Disclosure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disclosure")
            .field("state", &self.state())
            .field("config", &self.config)
            .finish()
    }
}

static_assertions::assert_impl_all!(Disclosure: Send, Sync);
static_assertions::assert_impl_all!(DisclosureHandle: Send, Sync, Clone);

//! Ambient open/closed state.
//!
//! A disclosure root publishes whether it is open so that descendants other
//! than its own trigger and panel can react. An outer orchestrator (for
//! example a staged close animation) can publish its own value through the
//! same channel type; a panel given that subscriber follows it instead of the
//! root's phase.
//!
//! The channel is passed explicitly: a provider hands out
//! [`OpenClosedSubscriber`] handles, and a component that was not given one
//! simply has no ambient value.
//!
//! # Example
//!
//! ```
//! use horizon_disclosure_core::{OpenClosed, OpenClosedProvider};
//!
//! let provider = OpenClosedProvider::new(OpenClosed::Closed);
//! let subscriber = provider.subscriber();
//!
//! provider.publish(OpenClosed::Open);
//! assert_eq!(subscriber.get(), OpenClosed::Open);
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::logging::targets;
use crate::property::Property;
use crate::signal::{ConnectionGuard, Signal};
use crate::state::DisclosurePhase;

/// The binary value carried by the ambient channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OpenClosed {
    /// Content should be shown.
    Open,
    /// Content should be hidden.
    Closed,
}

impl OpenClosed {
    /// Check whether this is [`OpenClosed::Open`].
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

impl From<DisclosurePhase> for OpenClosed {
    fn from(phase: DisclosurePhase) -> Self {
        match phase {
            DisclosurePhase::Open => Self::Open,
            DisclosurePhase::Closed => Self::Closed,
        }
    }
}

struct Channel {
    value: Property<OpenClosed>,
    changed: Arc<Signal<OpenClosed>>,
}

/// The publishing side of an ambient open/closed channel.
#[derive(Clone)]
pub struct OpenClosedProvider {
    channel: Arc<Channel>,
}

impl OpenClosedProvider {
    /// Create a provider with an initial value.
    pub fn new(initial: OpenClosed) -> Self {
        Self {
            channel: Arc::new(Channel {
                value: Property::new(initial),
                changed: Arc::new(Signal::new()),
            }),
        }
    }

    /// Publish a value. Subscribers are notified only if it changed.
    ///
    /// Returns `true` if the value changed.
    pub fn publish(&self, value: OpenClosed) -> bool {
        if !self.channel.value.set(value) {
            return false;
        }
        tracing::trace!(target: targets::OPEN_CLOSED, ?value, "publishing");
        self.channel.changed.emit(value);
        true
    }

    /// The currently published value.
    pub fn get(&self) -> OpenClosed {
        self.channel.value.get()
    }

    /// Create a read-only handle for a descendant.
    pub fn subscriber(&self) -> OpenClosedSubscriber {
        OpenClosedSubscriber {
            channel: Arc::clone(&self.channel),
        }
    }
}

/// The reading side of an ambient open/closed channel.
#[derive(Clone)]
pub struct OpenClosedSubscriber {
    channel: Arc<Channel>,
}

impl OpenClosedSubscriber {
    /// The currently published value.
    pub fn get(&self) -> OpenClosed {
        self.channel.value.get()
    }

    /// Run `slot` whenever the published value changes.
    ///
    /// The slot stays connected until the returned guard is dropped.
    pub fn watch<F>(&self, slot: F) -> ConnectionGuard<OpenClosed>
    where
        F: Fn(&OpenClosed) + Send + Sync + 'static,
    {
        self.channel.changed.connect_scoped(slot)
    }
}

impl std::fmt::Debug for OpenClosedSubscriber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenClosedSubscriber")
            .field("value", &self.get())
            .finish()
    }
}

static_assertions::assert_impl_all!(OpenClosedProvider: Send, Sync);
static_assertions::assert_impl_all!(OpenClosedSubscriber: Send, Sync);

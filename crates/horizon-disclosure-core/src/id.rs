//! Element identifier generation.
//!
//! Each disclosure root needs two ids, one for its trigger and one for its
//! panel, so the trigger's `controls` attribute can point at the panel.
//! Ids must be unique per root and stable for the root's lifetime.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix for generated trigger ids.
pub const TRIGGER_ID_PREFIX: &str = "horizon-disclosure-button-";

/// Prefix for generated panel ids.
pub const PANEL_ID_PREFIX: &str = "horizon-disclosure-panel-";

/// Supplies unique numeric tokens on demand.
pub trait IdGenerator: Send + Sync {
    /// Return a token that this generator has not returned before.
    fn next_id(&self) -> u64;

    /// Generate a trigger id.
    fn trigger_id(&self) -> String {
        format!("{TRIGGER_ID_PREFIX}{}", self.next_id())
    }

    /// Generate a panel id.
    fn panel_id(&self) -> String {
        format!("{PANEL_ID_PREFIX}{}", self.next_id())
    }
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-wide sequential ids.
///
/// All instances share one counter, so ids never collide within a process.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequentialIds;

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> u64 {
        NEXT_ID.fetch_add(1, Ordering::Relaxed)
    }
}

/// An id generator with its own counter.
///
/// Useful when ids must be deterministic, e.g. in tests or when matching ids
/// produced by another render pass.
#[derive(Debug)]
pub struct LocalIds {
    next: AtomicU64,
}

impl LocalIds {
    /// Create a generator whose first token is `start`.
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl Default for LocalIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for LocalIds {
    fn next_id(&self) -> u64 {
        self.next.fetch_add(1, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_unique() {
        let ids = SequentialIds;
        let a = ids.next_id();
        let b = SequentialIds.next_id();
        assert_ne!(a, b);
    }

    #[test]
    fn test_local_ids_format() {
        let ids = LocalIds::default();
        assert_eq!(ids.trigger_id(), "horizon-disclosure-button-1");
        assert_eq!(ids.panel_id(), "horizon-disclosure-panel-2");
    }
}

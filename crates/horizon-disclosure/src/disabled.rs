//! Detection of disabled click targets.
//!
//! A control can be effectively disabled without its own `disabled` flag
//! being set, for example when it sits inside a disabled group. Some platforms
//! still deliver clicks to such controls, so the trigger asks a
//! [`DisabledStateDetector`] before acting on a click.

use crate::events::ClickEvent;

/// Reports whether a click target is disabled in a way the event's own
/// fields do not show directly.
pub trait DisabledStateDetector {
    /// Return `true` if the click should be ignored.
    fn is_disabled(&self, event: &ClickEvent) -> bool;
}

/// The default detector: a click is disabled when its target sits inside a
/// disabled group.
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupDisabledDetector;

impl DisabledStateDetector for GroupDisabledDetector {
    fn is_disabled(&self, event: &ClickEvent) -> bool {
        event.in_disabled_group
    }
}

impl<F> DisabledStateDetector for F
where
    F: Fn(&ClickEvent) -> bool,
{
    fn is_disabled(&self, event: &ClickEvent) -> bool {
        self(event)
    }
}

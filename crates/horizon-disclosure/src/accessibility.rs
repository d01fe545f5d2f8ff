//! Accessibility descriptions for disclosure widgets.
//!
//! Each disclosure element can describe itself to an assistive-technology
//! bridge through the [`Accessible`] trait. The trigger reports its expanded
//! state and which element it controls; the panel reports its id so the
//! trigger's `controls` relation resolves.

/// The accessibility role of a disclosure element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum AccessibleRole {
    /// An element with no specific role.
    #[default]
    Generic,

    /// A push button.
    Button,

    /// A content region revealed by a button.
    Region,
}

/// Trait for elements that provide accessibility information.
///
/// Methods default to "not applicable"; elements override the ones relevant
/// to them.
pub trait Accessible {
    /// The element's role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// The element's id, for relations from other elements.
    fn accessible_id(&self) -> Option<String> {
        None
    }

    /// Get the expanded state for expandable elements.
    ///
    /// Returns `None` when the element is not expandable, or when stating an
    /// expanded state would be misleading (e.g. a disabled trigger).
    fn is_accessible_expanded(&self) -> Option<bool> {
        None
    }

    /// The id of the element this one controls, if that element exists.
    fn accessible_controls(&self) -> Option<String> {
        None
    }

    /// Whether the element is currently hidden from the user.
    fn is_accessible_hidden(&self) -> bool {
        false
    }
}

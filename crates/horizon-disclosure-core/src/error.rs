//! Error types for Horizon disclosure widgets.

use thiserror::Error;

/// The error type for disclosure operations.
///
/// Both variants describe programming errors rather than runtime conditions:
/// they are surfaced to the integrator and never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisclosureError {
    /// A trigger or panel was constructed without an enclosing disclosure root.
    #[error("<{component} /> is missing a parent <{parent} /> component.")]
    MissingParent {
        /// The element that was constructed, e.g. `Disclosure.Button`.
        component: &'static str,
        /// The element that must enclose it.
        parent: &'static str,
    },

    /// The transition function received an action it has no handler for.
    #[error("no transition handler for action `{action}`")]
    UnhandledAction {
        /// The kind of the unhandled action.
        action: &'static str,
    },
}

/// A specialized Result type for disclosure operations.
pub type Result<T> = std::result::Result<T, DisclosureError>;

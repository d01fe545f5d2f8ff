//! Logging facilities for Horizon disclosure widgets.
//!
//! Horizon disclosure uses the `tracing` crate for instrumentation. Install a
//! subscriber in your application to see the output:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_disclosure_core::store=debug")
//!     .init();
//! ```
//!
//! Every dispatched action is logged at `trace` level, every state change at
//! `debug` level. Reducer failures are logged at `error` level before they are
//! returned to the dispatching caller.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Store and dispatch queue target.
    pub const STORE: &str = "horizon_disclosure_core::store";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_disclosure_core::signal";
    /// Ambient open/closed channel target.
    pub const OPEN_CLOSED: &str = "horizon_disclosure_core::open_closed";
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn test_targets_are_under_crate_path() {
        for target in [targets::STORE, targets::SIGNAL, targets::OPEN_CLOSED] {
            assert!(target.starts_with(concat!(env!("CARGO_CRATE_NAME"), "::")), "{target}");
        }
    }
}

//! The disclosure panel (the collapsible content region).
//!
//! A panel's *presence* and its *visibility* are tracked separately:
//!
//! - Presence is the `panel_linked` flag in the root's state. The panel links
//!   itself when attached and unlinks when dropped, so the trigger only
//!   points assistive technology at a panel that exists.
//! - Visibility follows the root's phase, unless the panel was mounted with
//!   an ambient open/closed subscriber from an enclosing orchestrator, in
//!   which case that value wins.
//!
//! With [`PanelConfig::unmount_on_close`] (the default) the panel also
//! unlinks whenever the disclosure closes, modelling content that is removed
//! from the tree rather than merely hidden. Rendering a present panel again
//! re-links it.

use std::sync::Arc;

use horizon_disclosure_core::{
    Action, ConnectionId, DisclosureError, DisclosurePhase, DisclosureSlot, OpenClosedSubscriber,
    Result,
};
use serde::{Deserialize, Serialize};

use crate::accessibility::{Accessible, AccessibleRole};
use crate::render::{Attributes, RenderFeatures, RenderOutput, RenderRequest, RenderStrategy, Renderer};
use crate::root::{DisclosureHandle, DISCLOSURE_NAME};

/// Name of the panel element, used in diagnostics.
pub const PANEL_NAME: &str = "Disclosure.Panel";

/// Default tag for the panel.
pub const DEFAULT_PANEL_TAG: &str = "div";

/// Render features the panel opts into.
pub const PANEL_FEATURES: RenderFeatures = RenderFeatures {
    render_strategy: true,
    is_static: true,
};

/// Configuration for a disclosure panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Remove the panel (and unlink it) when the disclosure closes, rather
    /// than keeping it mounted but hidden.
    pub unmount_on_close: bool,
    /// Always render the panel, regardless of visibility.
    pub is_static: bool,
    /// Tag to render the panel as; defaults to `div`.
    pub tag: Option<String>,
    /// Attributes passed through to the rendered panel.
    pub props: Attributes,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            unmount_on_close: true,
            is_static: false,
            tag: None,
            props: Attributes::new(),
        }
    }
}

impl PanelConfig {
    /// Create the default configuration (unmount on close).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unmount-on-close flag using builder pattern.
    pub fn with_unmount_on_close(mut self, unmount: bool) -> Self {
        self.unmount_on_close = unmount;
        self
    }

    /// Set the static flag using builder pattern.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
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

/// The collapsible content region of a disclosure.
///
/// Dropping the panel detaches it: its state subscription is disconnected and
/// `UnlinkPanel` is dispatched.
pub struct DisclosurePanel {
    handle: DisclosureHandle,
    config: PanelConfig,
    ambient: Option<OpenClosedSubscriber>,
    close_subscription: Option<ConnectionId>,
}

impl DisclosurePanel {
    /// Mount a panel for the disclosure behind `parent` and link it.
    ///
    /// `ambient` is an open/closed subscriber from an enclosing orchestrator;
    /// when given, it decides the panel's visibility.
    ///
    /// Fails with [`DisclosureError::MissingParent`] when there is no parent.
    pub fn mount(
        parent: Option<&DisclosureHandle>,
        config: PanelConfig,
        ambient: Option<OpenClosedSubscriber>,
    ) -> Result<Self> {
        let Some(parent) = parent else {
            tracing::error!(target: "horizon_disclosure::panel", "panel mounted outside a disclosure");
            return Err(DisclosureError::MissingParent {
                component: PANEL_NAME,
                parent: DISCLOSURE_NAME,
            });
        };

        let close_subscription = config.unmount_on_close.then(|| {
            let store = Arc::downgrade(parent.store());
            parent.store().state_changed.connect(move |change| {
                if !change.entered(DisclosurePhase::Closed) {
                    return;
                }
                let Some(store) = store.upgrade() else {
                    return;
                };
                tracing::debug!(target: "horizon_disclosure::panel", "closed, unlinking panel");
                if let Err(err) = store.dispatch(Action::UnlinkPanel) {
                    tracing::error!(target: "horizon_disclosure::panel", %err, "failed to unlink panel on close");
                }
            })
        });

        let panel = Self {
            handle: parent.clone(),
            config,
            ambient,
            close_subscription,
        };
        panel.attach()?;
        Ok(panel)
    }

    /// Register this panel with its root if it is not already linked.
    pub fn attach(&self) -> Result<()> {
        if self.handle.state().is_panel_linked() {
            return Ok(());
        }
        tracing::debug!(target: "horizon_disclosure::panel", "linking panel");
        self.handle.dispatch(Action::LinkPanel)
    }

    /// The panel's element id.
    pub fn id(&self) -> String {
        self.handle.state().panel_id().to_string()
    }

    /// Whether the panel should currently be shown.
    pub fn is_visible(&self) -> bool {
        match &self.ambient {
            Some(ambient) => ambient.get().is_open(),
            None => self.handle.is_open(),
        }
    }

    /// The slot value shared with the root.
    pub fn slot(&self) -> Arc<DisclosureSlot> {
        self.handle.slot()
    }

    /// The configuration this panel was mounted with.
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Render the panel.
    ///
    /// If the renderer produces an element, the panel is (re-)attached.
    pub fn render(&self, renderer: &mut dyn Renderer) -> Result<RenderOutput> {
        let mut props = self.config.props.clone();
        props.set_owned("id", Some(self.id()));

        let output = renderer.render(RenderRequest {
            props,
            slot: *self.slot(),
            tag: self.config.tag.as_deref(),
            default_tag: DEFAULT_PANEL_TAG,
            name: PANEL_NAME,
            visible: self.is_visible(),
            features: PANEL_FEATURES,
            strategy: RenderStrategy::from_unmount(self.config.unmount_on_close),
            is_static: self.config.is_static,
        });

        if output.is_present() {
            self.attach()?;
        }
        Ok(output)
    }
}

impl Drop for DisclosurePanel {
    fn drop(&mut self) {
        if let Some(id) = self.close_subscription.take() {
            self.handle.store().state_changed.disconnect(id);
        }
        tracing::debug!(target: "horizon_disclosure::panel", "detaching panel");
        if let Err(err) = self.handle.dispatch(Action::UnlinkPanel) {
            tracing::error!(target: "horizon_disclosure::panel", %err, "failed to unlink panel on drop");
        }
    }
}

impl Accessible for DisclosurePanel {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Region
    }

    fn accessible_id(&self) -> Option<String> {
        let id = self.id();
        (!id.is_empty()).then_some(id)
    }

    fn is_accessible_hidden(&self) -> bool {
        !self.is_visible()
    }
}

impl std::fmt::Debug for DisclosurePanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisclosurePanel")
            .field("config", &self.config)
            .field("visible", &self.is_visible())
            .finish()
    }
}

static_assertions::assert_impl_all!(DisclosurePanel: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_disclosure_core::{OpenClosed, OpenClosedProvider};
    use parking_lot::Mutex;

    use crate::render::ElementRenderer;
    use crate::root::{Disclosure, DisclosureConfig};

    fn root(open: bool) -> Disclosure {
        let root = Disclosure::new(DisclosureConfig::new().with_initial_open(open));
        root.assign_ids("btn-1", "panel-1").unwrap();
        root
    }

    fn count_unlinks(root: &Disclosure) -> Arc<Mutex<usize>> {
        let count = Arc::new(Mutex::new(0));
        let count_clone = count.clone();
        root.handle().store().action_processed.connect(move |action| {
            if *action == Action::UnlinkPanel {
                *count_clone.lock() += 1;
            }
        });
        count
    }

    #[test]
    fn test_missing_parent() {
        let err = DisclosurePanel::mount(None, PanelConfig::new(), None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "<Disclosure.Panel /> is missing a parent <Disclosure /> component."
        );
    }

    #[test]
    fn test_mount_links_and_drop_unlinks() {
        let root = root(false);
        let panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None).unwrap();
        assert!(root.state().is_panel_linked());
        assert_eq!(panel.id(), "panel-1");

        drop(panel);
        assert!(!root.state().is_panel_linked());
        // Only the root's own subscription remains.
        assert_eq!(root.handle().store().state_changed.connection_count(), 1);
    }

    #[test]
    fn test_attach_is_idempotent() {
        let root = root(false);
        let panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None).unwrap();
        let linked = root.state();
        panel.attach().unwrap();
        assert!(Arc::ptr_eq(&linked, &root.state()));
    }

    #[test]
    fn test_unmount_on_close_unlinks_once() {
        let root = root(true);
        let _panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None).unwrap();
        let unlinks = count_unlinks(&root);

        root.toggle().unwrap();
        assert_eq!(*unlinks.lock(), 1);
        assert!(!root.state().is_panel_linked());
        assert!(!root.is_open());
    }

    #[test]
    fn test_keep_mounted_does_not_unlink_on_close() {
        let root = root(true);
        let config = PanelConfig::new().with_unmount_on_close(false);
        let _panel = DisclosurePanel::mount(Some(&root.handle()), config, None).unwrap();
        let unlinks = count_unlinks(&root);

        root.toggle().unwrap();
        assert_eq!(*unlinks.lock(), 0);
        assert!(root.state().is_panel_linked());
    }

    #[test]
    fn test_opening_does_not_unlink() {
        let root = root(false);
        let _panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None).unwrap();
        let unlinks = count_unlinks(&root);

        root.toggle().unwrap();
        assert_eq!(*unlinks.lock(), 0);
        assert!(root.state().is_panel_linked());
    }

    #[test]
    fn test_visibility_follows_phase() {
        let root = root(false);
        let panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None).unwrap();
        assert!(!panel.is_visible());
        root.toggle().unwrap();
        assert!(panel.is_visible());
    }

    #[test]
    fn test_ambient_signal_overrides_phase() {
        let root = root(true);
        let orchestrator = OpenClosedProvider::new(OpenClosed::Open);
        let panel = DisclosurePanel::mount(
            Some(&root.handle()),
            PanelConfig::new(),
            Some(orchestrator.subscriber()),
        )
        .unwrap();

        root.toggle().unwrap();
        assert!(!root.is_open());
        assert!(panel.is_visible());
        // Linkage follows the root's phase, not the orchestrator.
        assert!(!root.state().is_panel_linked());

        // Still visible, so rendering produces the panel and re-links it.
        let output = panel.render(&mut ElementRenderer::new()).unwrap();
        assert!(matches!(output, RenderOutput::Rendered(_)));
        assert!(root.state().is_panel_linked());

        orchestrator.publish(OpenClosed::Closed);
        assert!(!panel.is_visible());
    }

    #[test]
    fn test_render_unmounts_when_closed() {
        let root = root(true);
        let panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None).unwrap();
        let mut renderer = ElementRenderer::new();

        let output = panel.render(&mut renderer).unwrap();
        assert_eq!(output.element().unwrap().attributes.get("id"), Some("panel-1"));

        root.toggle().unwrap();
        assert_eq!(panel.render(&mut renderer).unwrap(), RenderOutput::Nothing);
        assert!(!root.state().is_panel_linked());

        // Reopening and rendering re-links the panel.
        root.toggle().unwrap();
        assert!(panel.render(&mut renderer).unwrap().is_present());
        assert!(root.state().is_panel_linked());
    }

    #[test]
    fn test_render_hidden_when_kept_mounted() {
        let root = root(false);
        let config = PanelConfig::new().with_unmount_on_close(false);
        let panel = DisclosurePanel::mount(Some(&root.handle()), config, None).unwrap();

        let output = panel.render(&mut ElementRenderer::new()).unwrap();
        assert!(matches!(output, RenderOutput::Hidden(_)));
        assert!(root.state().is_panel_linked());
        assert!(panel.is_accessible_hidden());
    }

    #[test]
    fn test_config_defaults_unmount_on_close() {
        assert!(PanelConfig::default().unmount_on_close);
        let config: PanelConfig = serde_json::from_str(r#"{"is_static": true}"#).unwrap();
        assert!(config.unmount_on_close);
        assert!(config.is_static);
    }
}

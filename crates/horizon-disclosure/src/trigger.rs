//! The disclosure trigger (the button that opens and closes the panel).
//!
//! # Event Handling
//!
//! Three inputs funnel into a single [`Action::ToggleOpen`] dispatch:
//!
//! - **Click**: ignored when the trigger is disabled, or when its
//!   [`DisabledStateDetector`] reports the target as disabled
//! - **Space / Enter press**: the default action is suppressed and
//!   propagation stopped, so the platform does not follow up with a second,
//!   synthetic click
//! - **Space release**: only suppresses the default action; some platforms
//!   turn an unsuppressed Space release into a click

use horizon_disclosure_core::{Action, DisclosureError, DisclosureSlot, DisclosureState, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::accessibility::{Accessible, AccessibleRole};
use crate::disabled::{DisabledStateDetector, GroupDisabledDetector};
use crate::events::{ClickEvent, Key, KeyPressEvent, KeyReleaseEvent, MouseButton};
use crate::render::{Attributes, RenderFeatures, RenderOutput, RenderRequest, RenderStrategy, Renderer};
use crate::root::{DisclosureHandle, DISCLOSURE_NAME};

/// Name of the trigger element, used in diagnostics.
pub const TRIGGER_NAME: &str = "Disclosure.Button";

/// Default tag for the trigger.
pub const DEFAULT_TRIGGER_TAG: &str = "button";

/// Configuration for a disclosure trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerConfig {
    /// Whether the trigger is administratively disabled.
    pub disabled: bool,
    /// Tag to render the trigger as; defaults to `button`.
    pub tag: Option<String>,
    /// Attributes passed through to the rendered trigger.
    pub props: Attributes,
}

impl TriggerConfig {
    /// Create the default configuration (enabled).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the disabled flag using builder pattern.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
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

/// Attributes the trigger owns, derived from state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerAttributes {
    /// The trigger's element id.
    pub id: String,
    /// The button type; always `button` so the trigger never submits a form.
    pub button_type: &'static str,
    /// Expanded state. Absent while disabled.
    pub expanded: Option<bool>,
    /// Id of the controlled panel. Absent unless a panel is linked.
    pub controls: Option<String>,
}

impl TriggerAttributes {
    /// Derive the trigger's attributes from a state snapshot.
    pub fn derive(state: &DisclosureState, disabled: bool) -> Self {
        let expanded = if disabled { None } else { Some(state.is_open()) };
        let controls = (state.is_panel_linked() && !state.panel_id().is_empty())
            .then(|| state.panel_id().to_string());

        Self {
            id: state.trigger_id().to_string(),
            button_type: "button",
            expanded,
            controls,
        }
    }

    /// Write these attributes over `attrs`, removing any that are absent.
    pub fn apply_to(&self, attrs: &mut Attributes) {
        attrs.set_owned("id", Some(self.id.clone()));
        attrs.set_owned("type", Some(self.button_type.to_string()));
        attrs.set_owned("aria-expanded", self.expanded.map(|e| e.to_string()));
        attrs.set_owned("aria-controls", self.controls.clone());
    }
}

/// The control that toggles a disclosure.
pub struct DisclosureTrigger {
    handle: DisclosureHandle,
    config: TriggerConfig,
    detector: Box<dyn DisabledStateDetector + Send + Sync>,
}

impl DisclosureTrigger {
    /// Create a trigger for the disclosure behind `parent`.
    ///
    /// Fails with [`DisclosureError::MissingParent`] when there is no parent.
    pub fn new(parent: Option<&DisclosureHandle>, config: TriggerConfig) -> Result<Self> {
        let Some(parent) = parent else {
            tracing::error!(target: "horizon_disclosure::trigger", "trigger constructed outside a disclosure");
            return Err(DisclosureError::MissingParent {
                component: TRIGGER_NAME,
                parent: DISCLOSURE_NAME,
            });
        };

        Ok(Self {
            handle: parent.clone(),
            config,
            detector: Box::new(GroupDisabledDetector),
        })
    }

    /// Replace the disabled-state detector using builder pattern.
    pub fn with_detector(mut self, detector: impl DisabledStateDetector + Send + Sync + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Check whether the trigger is disabled.
    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// Enable or disable the trigger.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
    }

    /// The configuration this trigger was created with.
    pub fn config(&self) -> &TriggerConfig {
        &self.config
    }

    /// The attributes derived from the current state.
    pub fn attributes(&self) -> TriggerAttributes {
        TriggerAttributes::derive(&self.handle.state(), self.config.disabled)
    }

    /// The slot value shared with the root.
    pub fn slot(&self) -> Arc<DisclosureSlot> {
        self.handle.slot()
    }

    // =========================================================================
    // Event Handling
    // =========================================================================

    /// Handle a click.
    ///
    /// Returns `true` if the click toggled the disclosure.
    pub fn handle_click(&self, event: &mut ClickEvent) -> Result<bool> {
        if event.button != MouseButton::Left {
            return Ok(false);
        }
        if self.config.disabled || self.detector.is_disabled(event) {
            tracing::trace!(target: "horizon_disclosure::trigger", "click on disabled trigger ignored");
            return Ok(false);
        }

        event.base.accept();
        self.toggle()?;
        Ok(true)
    }

    /// Handle a key press.
    ///
    /// Returns `true` if the key toggled the disclosure.
    pub fn handle_key_press(&self, event: &mut KeyPressEvent) -> Result<bool> {
        if !event.key.is_activation() {
            return Ok(false);
        }

        event.base.prevent_default();
        event.base.stop_propagation();
        event.base.accept();
        self.toggle()?;
        Ok(true)
    }

    /// Handle a key release.
    ///
    /// Never toggles. Returns `true` if the event's default action was
    /// suppressed.
    pub fn handle_key_release(&self, event: &mut KeyReleaseEvent) -> bool {
        match event.key {
            Key::Space => {
                event.base.prevent_default();
                true
            }
            _ => false,
        }
    }

    fn toggle(&self) -> Result<()> {
        tracing::debug!(target: "horizon_disclosure::trigger", "toggling");
        self.handle.dispatch(Action::ToggleOpen)
    }

    /// Render the trigger.
    pub fn render(&self, renderer: &mut dyn Renderer) -> RenderOutput {
        let mut props = self.config.props.clone();
        self.attributes().apply_to(&mut props);

        renderer.render(RenderRequest {
            props,
            slot: *self.slot(),
            tag: self.config.tag.as_deref(),
            default_tag: DEFAULT_TRIGGER_TAG,
            name: TRIGGER_NAME,
            visible: true,
            features: RenderFeatures::NONE,
            strategy: RenderStrategy::Unmount,
            is_static: false,
        })
    }
}

impl Accessible for DisclosureTrigger {
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn accessible_id(&self) -> Option<String> {
        let id = self.attributes().id;
        (!id.is_empty()).then_some(id)
    }

    fn is_accessible_expanded(&self) -> Option<bool> {
        self.attributes().expanded
    }

    fn accessible_controls(&self) -> Option<String> {
        self.attributes().controls
    }
}

impl std::fmt::Debug for DisclosureTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisclosureTrigger")
            .field("config", &self.config)
            .field("attributes", &self.attributes())
            .finish()
    }
}

static_assertions::assert_impl_all!(DisclosureTrigger: Send, Sync);

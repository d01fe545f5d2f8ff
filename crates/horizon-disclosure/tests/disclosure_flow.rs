//! End-to-end disclosure behavior: root, trigger and panel together.

use std::sync::Arc;

use horizon_disclosure::prelude::*;
use horizon_disclosure::{DisclosureStore, StateChange};
use parking_lot::Mutex;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn mounted(open: bool) -> (Disclosure, DisclosureTrigger, DisclosurePanel) {
    init_tracing();
    let root = Disclosure::new(DisclosureConfig::new().with_initial_open(open));
    root.assign_ids("btn-1", "panel-1").unwrap();
    let trigger = DisclosureTrigger::new(Some(&root.handle()), TriggerConfig::new()).unwrap();
    let panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None).unwrap();
    (root, trigger, panel)
}

fn record_phases(store: &DisclosureStore) -> Arc<Mutex<Vec<DisclosurePhase>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let log_clone = log.clone();
    store.state_changed.connect(move |change: &StateChange| {
        if change.phase_changed() {
            log_clone.lock().push(change.current.phase());
        }
    });
    log
}

#[test]
fn click_opens_then_closes() {
    let (root, trigger, panel) = mounted(false);

    let state = root.state();
    assert_eq!(state.phase(), DisclosurePhase::Closed);
    assert!(state.is_panel_linked());
    assert_eq!(state.trigger_id(), "btn-1");
    assert_eq!(state.panel_id(), "panel-1");

    assert!(trigger.handle_click(&mut ClickEvent::new()).unwrap());
    assert!(root.is_open());
    assert!(panel.is_visible());
    let attrs = trigger.attributes();
    assert_eq!(attrs.expanded, Some(true));
    assert_eq!(attrs.controls.as_deref(), Some("panel-1"));

    assert!(trigger.handle_click(&mut ClickEvent::new()).unwrap());
    assert!(!root.is_open());
    assert!(!panel.is_visible());
    assert!(!root.state().is_panel_linked());
    assert_eq!(trigger.attributes().controls, None);
}

#[test]
fn keyboard_activation_matches_click() {
    let (root, trigger, _panel) = mounted(false);
    let phases = record_phases(root.handle().store());

    let mut enter = KeyPressEvent::new(Key::Enter, KeyboardModifiers::NONE, false);
    assert!(trigger.handle_key_press(&mut enter).unwrap());
    assert!(enter.base.is_default_prevented());
    assert!(enter.base.is_propagation_stopped());

    let mut space = KeyPressEvent::new(Key::Space, KeyboardModifiers::NONE, false);
    assert!(trigger.handle_key_press(&mut space).unwrap());

    let mut release = KeyReleaseEvent::new(Key::Space, KeyboardModifiers::NONE);
    assert!(trigger.handle_key_release(&mut release));
    assert!(release.base.is_default_prevented());

    assert_eq!(
        *phases.lock(),
        vec![DisclosurePhase::Open, DisclosurePhase::Closed]
    );
}

#[test]
fn disabled_trigger_keeps_state() {
    let root = Disclosure::new(DisclosureConfig::new());
    let trigger = DisclosureTrigger::new(
        Some(&root.handle()),
        TriggerConfig::new().with_disabled(true),
    )
    .unwrap();
    let before = root.state();

    assert!(!trigger.handle_click(&mut ClickEvent::new()).unwrap());
    assert!(Arc::ptr_eq(&before, &root.state()));
    assert_eq!(trigger.attributes().expanded, None);
}

#[test]
fn click_inside_disabled_group_is_ignored() {
    let (root, trigger, _panel) = mounted(false);
    let mut click = ClickEvent::new().with_disabled_group(true);
    assert!(!trigger.handle_click(&mut click).unwrap());
    assert!(!root.is_open());
}

#[test]
fn rendered_trigger_reflects_state() {
    let (_root, trigger, _panel) = mounted(true);
    let output = trigger.render(&mut ElementRenderer::new());
    let element = output.element().unwrap();

    assert_eq!(element.tag, "button");
    assert_eq!(element.attributes.get("id"), Some("btn-1"));
    assert_eq!(element.attributes.get("type"), Some("button"));
    assert_eq!(element.attributes.get("aria-expanded"), Some("true"));
    assert_eq!(element.attributes.get("aria-controls"), Some("panel-1"));
    assert!(element.slot.open);
}

#[test]
fn panel_outside_disclosure_fails() {
    let err = DisclosurePanel::mount(None, PanelConfig::new(), None).unwrap_err();
    assert_eq!(
        err,
        DisclosureError::MissingParent {
            component: "Disclosure.Panel",
            parent: "Disclosure",
        }
    );

    let err = DisclosureTrigger::new(None, TriggerConfig::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "<Disclosure.Button /> is missing a parent <Disclosure /> component."
    );
}

#[test]
fn generated_ids_link_trigger_and_panel() {
    let root = Disclosure::with_generator(DisclosureConfig::new(), &LocalIds::starting_at(10)).unwrap();
    let trigger = DisclosureTrigger::new(Some(&root.handle()), TriggerConfig::new()).unwrap();
    let panel = DisclosurePanel::mount(Some(&root.handle()), PanelConfig::new(), None).unwrap();

    assert_eq!(trigger.attributes().id, "horizon-disclosure-button-10");
    assert_eq!(trigger.attributes().controls, Some(panel.id()));
    assert_eq!(panel.accessible_id().as_deref(), Some("horizon-disclosure-panel-11"));
}

#[test]
fn config_loads_from_toml() {
    #[derive(serde::Deserialize)]
    struct Widgets {
        disclosure: DisclosureConfig,
        panel: PanelConfig,
    }

    let widgets: Widgets = toml::from_str(
        r#"
        [disclosure]
        initial_open = true

        [panel]
        unmount_on_close = false
        tag = "section"

        [panel.props]
        class = "faq-answer"
        "#,
    )
    .unwrap();

    assert!(widgets.disclosure.initial_open);
    assert!(!widgets.panel.unmount_on_close);
    assert_eq!(widgets.panel.tag.as_deref(), Some("section"));
    assert_eq!(widgets.panel.props.get("class"), Some("faq-answer"));
}

//! Input events consumed by disclosure widgets.
//!
//! These are the activation inputs a trigger reacts to: pointer clicks and
//! key presses/releases. Each event carries an [`EventBase`] that records
//! whether a handler accepted it, suppressed the platform's default action,
//! or stopped it from propagating to ancestors.

/// Common state shared by all input events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
    /// Whether the platform's default action was suppressed.
    default_prevented: bool,
    /// Whether propagation to ancestors was stopped.
    propagation_stopped: bool,
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the event was accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, allowing further propagation.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }

    /// Suppress the platform's default action for this event.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if the default action was suppressed.
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from reaching ancestor handlers.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Check if propagation was stopped.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    #[default]
    Left,
    /// Secondary button.
    Right,
    /// Middle button (wheel).
    Middle,
}

/// Keys a disclosure trigger distinguishes.
///
/// Anything else arrives as [`Key::Character`] or [`Key::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// A printable character.
    Character(char),
    /// A key with no mapping.
    Unknown(u16),
}

impl Key {
    /// Check whether this key activates a button (Space or Enter).
    pub fn is_activation(self) -> bool {
        matches!(self, Self::Space | Self::Enter)
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };
}

/// A pointer click on a control.
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was clicked.
    pub button: MouseButton,
    /// Whether the event target sits inside a disabled group (for example a
    /// disabled fieldset) that the target's own state does not reflect.
    pub in_disabled_group: bool,
}

impl ClickEvent {
    /// Create a primary-button click.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the target as inside a disabled group using builder pattern.
    pub fn with_disabled_group(mut self, disabled: bool) -> Self {
        self.in_disabled_group = disabled;
        self
    }
}

/// Key press event.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether this is a key repeat event (key held down).
    pub is_repeat: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers, is_repeat: bool) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
            is_repeat,
        }
    }
}

/// Key release event.
#[derive(Debug, Clone)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The key that was released.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyReleaseEvent {
    /// Create a new key release event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            modifiers,
        }
    }
}

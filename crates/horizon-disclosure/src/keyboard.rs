//! Conversion from winit keyboard events.
//!
//! Available with the `winit` feature. Only the keys a disclosure trigger
//! cares about are mapped by name; single printable characters become
//! [`Key::Character`] and everything else is [`Key::Unknown`].
//!
//! ```ignore
//! use horizon_disclosure::keyboard::{from_winit_event, KeyInput};
//!
//! match from_winit_event(&key_event, KeyboardModifiers::NONE) {
//!     KeyInput::Press(mut press) => { trigger.handle_key_press(&mut press)?; }
//!     KeyInput::Release(mut release) => { trigger.handle_key_release(&mut release); }
//! }
//! ```

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key as WinitKey, NamedKey};

use crate::events::{Key, KeyPressEvent, KeyReleaseEvent, KeyboardModifiers};

/// A converted key event.
#[derive(Debug, Clone)]
pub enum KeyInput {
    /// The key went down.
    Press(KeyPressEvent),
    /// The key came up.
    Release(KeyReleaseEvent),
}

/// Converts a winit logical key to a disclosure [`Key`].
pub fn from_winit_key(key: &WinitKey) -> Key {
    match key {
        WinitKey::Named(named) => from_winit_named_key(named),
        WinitKey::Character(c) => from_character(c),
        WinitKey::Unidentified(_) | WinitKey::Dead(_) => Key::Unknown(0),
    }
}

fn from_winit_named_key(key: &NamedKey) -> Key {
    match key {
        NamedKey::Space => Key::Space,
        NamedKey::Enter => Key::Enter,
        NamedKey::Escape => Key::Escape,
        NamedKey::Tab => Key::Tab,
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        _ => Key::Unknown(0),
    }
}

fn from_character(c: &str) -> Key {
    let mut chars = c.chars();
    match (chars.next(), chars.next()) {
        // Some platforms report the space bar as a character.
        (Some(' '), None) => Key::Space,
        (Some(ch), None) => Key::Character(ch),
        _ => Key::Unknown(0),
    }
}

/// Converts a winit key event into a press or release event.
pub fn from_winit_event(event: &KeyEvent, modifiers: KeyboardModifiers) -> KeyInput {
    let key = from_winit_key(&event.logical_key);
    match event.state {
        ElementState::Pressed => KeyInput::Press(KeyPressEvent::new(key, modifiers, event.repeat)),
        ElementState::Released => KeyInput::Release(KeyReleaseEvent::new(key, modifiers)),
    }
}

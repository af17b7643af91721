//! Key event types consumed by the visual editor.
//!
//! The terminal layer (core-input) translates platform key events into these
//! opaque values; nothing above this crate sees crossterm types or scancodes.

use std::fmt;
use std::sync::atomic::AtomicU64;

// Simple atomic counters (fetch_add relaxed), inspected in tests and logged at
// session end.
pub static KEYPRESS_TOTAL: AtomicU64 = AtomicU64::new(0); // keys delivered to the visual loop
pub static KEYPRESS_IGNORED: AtomicU64 = AtomicU64::new(0); // terminal events with no mapping

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Key without modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

/// Logical keys understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    /// Function key `F1..=F12`.
    F(u8),
}

impl KeyCode {
    /// Printable ASCII byte carried by this key, if any (0x20..=0x7e).
    pub fn printable_byte(self) -> Option<u8> {
        match self {
            KeyCode::Char(c) if (' '..='~').contains(&c) => Some(c as u8),
            _ => None,
        }
    }
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{:?}", self.code, self.mods)
    }
}

/// Build a key sequence from a string of printable characters (test helper for
/// scripted sessions).
pub fn keys_for_text(text: &str) -> impl Iterator<Item = KeyEvent> + '_ {
    text.chars().map(|c| KeyEvent::plain(KeyCode::Char(c)))
}

//! Blocking keystroke sources for the visual editor.
//!
//! `KeySource` is the seam between the editor loop and the terminal: the binary
//! uses `CrosstermKeySource`, tests feed `ScriptedKeySource`. Sources block until
//! a key arrives; `Ok(None)` means the input is exhausted and the visual loop
//! exits as if Esc had been pressed.

mod scripted;
pub use scripted::ScriptedKeySource;

use core_events::{KEYPRESS_IGNORED, KEYPRESS_TOTAL, KeyCode, KeyEvent, KeyModifiers};
use crossterm::event::{
    Event as CEvent, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind,
    KeyModifiers as CMods,
};
use std::sync::atomic::Ordering;

pub trait KeySource {
    /// Block until the next key. `Ok(None)` signals end of input.
    fn next_key(&mut self) -> anyhow::Result<Option<KeyEvent>>;
}

impl<S: KeySource + ?Sized> KeySource for &mut S {
    fn next_key(&mut self) -> anyhow::Result<Option<KeyEvent>> {
        (**self).next_key()
    }
}

/// Reads terminal events with `crossterm::event::read`, skipping releases,
/// mouse, focus and resize events.
#[derive(Debug, Default)]
pub struct CrosstermKeySource;

impl CrosstermKeySource {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for CrosstermKeySource {
    fn next_key(&mut self) -> anyhow::Result<Option<KeyEvent>> {
        loop {
            let CEvent::Key(key) = crossterm::event::read()? else {
                continue;
            };
            if key.kind == KeyEventKind::Release {
                continue;
            }
            match map_key(key) {
                Some(evt) => {
                    KEYPRESS_TOTAL.fetch_add(1, Ordering::Relaxed);
                    tracing::trace!(target: "input", key = %evt, "keypress");
                    return Ok(Some(evt));
                }
                None => {
                    KEYPRESS_IGNORED.fetch_add(1, Ordering::Relaxed);
                    tracing::trace!(target: "input", code = ?key.code, "key_unmapped");
                }
            }
        }
    }
}

/// Translate a crossterm key into an editor key; `None` for keys the editor
/// has no binding for.
pub fn map_key(key: CKeyEvent) -> Option<KeyEvent> {
    let code = match key.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::PageUp => KeyCode::PageUp,
        CKeyCode::PageDown => KeyCode::PageDown,
        CKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    Some(KeyEvent::new(code, map_mods(key.modifiers)))
}

pub(crate) fn map_mods(m: CMods) -> KeyModifiers {
    let mut out = KeyModifiers::empty();
    if m.contains(CMods::CONTROL) {
        out |= KeyModifiers::CTRL;
    }
    if m.contains(CMods::ALT) {
        out |= KeyModifiers::ALT;
    }
    if m.contains(CMods::SHIFT) {
        out |= KeyModifiers::SHIFT;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_navigation_and_function_keys() {
        let cases = [
            (CKeyCode::Up, KeyCode::Up),
            (CKeyCode::PageDown, KeyCode::PageDown),
            (CKeyCode::Home, KeyCode::Home),
            (CKeyCode::F(1), KeyCode::F(1)),
            (CKeyCode::Delete, KeyCode::Delete),
            (CKeyCode::Char('q'), KeyCode::Char('q')),
        ];
        for (c, expected) in cases {
            let mapped = map_key(CKeyEvent::new(c, CMods::NONE)).unwrap();
            assert_eq!(mapped, KeyEvent::plain(expected));
        }
    }

    #[test]
    fn unmapped_keys_are_dropped() {
        assert_eq!(map_key(CKeyEvent::new(CKeyCode::Insert, CMods::NONE)), None);
        assert_eq!(map_key(CKeyEvent::new(CKeyCode::BackTab, CMods::SHIFT)), None);
    }

    #[test]
    fn modifiers_carry_over() {
        let k = map_key(CKeyEvent::new(CKeyCode::Char('s'), CMods::CONTROL | CMods::SHIFT)).unwrap();
        assert_eq!(k.mods, KeyModifiers::CTRL | KeyModifiers::SHIFT);
    }
}

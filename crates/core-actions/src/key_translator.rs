//! Key -> Action translation for the visual editor.
//!
//! The visual editor has a single editing mode, so translation is a pure
//! lookup: no counts, operators or pending state. Keys with no binding
//! (unmapped function keys, control chords, non-ASCII characters) translate to
//! `None` and the loop ignores them.

use crate::{Action, EditKind, MotionKind};
use core_events::{KeyCode, KeyEvent, KeyModifiers};

pub fn translate_key(key: &KeyEvent) -> Option<Action> {
    let action = match key.code {
        KeyCode::Esc | KeyCode::F(10) => Action::Exit,
        KeyCode::F(1) => Action::Help,
        KeyCode::F(2) => Action::Save,
        KeyCode::Up => Action::Motion(MotionKind::Up),
        KeyCode::Down => Action::Motion(MotionKind::Down),
        KeyCode::Left => Action::Motion(MotionKind::Left),
        KeyCode::Right => Action::Motion(MotionKind::Right),
        KeyCode::Home => Action::Motion(MotionKind::LineStart),
        KeyCode::End => Action::Motion(MotionKind::LineEnd),
        KeyCode::PageUp => Action::Motion(MotionKind::PageUp),
        KeyCode::PageDown => Action::Motion(MotionKind::PageDown),
        KeyCode::Tab => Action::Edit(EditKind::Tab),
        KeyCode::Enter => Action::Edit(EditKind::SplitLine),
        KeyCode::Backspace => Action::Edit(EditKind::Backspace),
        KeyCode::Delete => Action::Edit(EditKind::Delete),
        KeyCode::Char(_) if key.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
            return None;
        }
        code @ KeyCode::Char(_) => Action::Edit(EditKind::InsertByte(code.printable_byte()?)),
        KeyCode::F(_) => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tr(code: KeyCode) -> Option<Action> {
        translate_key(&KeyEvent::plain(code))
    }

    #[test]
    fn control_keys() {
        assert_eq!(tr(KeyCode::Esc), Some(Action::Exit));
        assert_eq!(tr(KeyCode::F(10)), Some(Action::Exit));
        assert_eq!(tr(KeyCode::F(1)), Some(Action::Help));
        assert_eq!(tr(KeyCode::F(2)), Some(Action::Save));
        assert_eq!(tr(KeyCode::F(5)), None);
        assert_eq!(tr(KeyCode::Enter), Some(Action::Edit(EditKind::SplitLine)));
        assert_eq!(tr(KeyCode::PageDown), Some(Action::Motion(MotionKind::PageDown)));
    }

    #[test]
    fn printable_bytes_insert() {
        assert_eq!(tr(KeyCode::Char('a')), Some(Action::Edit(EditKind::InsertByte(b'a'))));
        assert_eq!(tr(KeyCode::Char(' ')), Some(Action::Edit(EditKind::InsertByte(b' '))));
        assert_eq!(tr(KeyCode::Char('é')), None);
        let ctrl_s = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CTRL);
        assert_eq!(translate_key(&ctrl_s), None);
        let shifted = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(
            translate_key(&shifted),
            Some(Action::Edit(EditKind::InsertByte(b'A')))
        );
    }
}

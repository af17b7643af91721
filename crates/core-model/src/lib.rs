//! Editing session model shared by both front-ends.
//!
//! `EditorModel` bundles the document state (`EditorState`) with the single
//! `View` (cursor + viewport) and the screen `Layout`. The REPL only touches the
//! state; the visual editor drives both. One model is passed explicitly to every
//! front-end, so independent sessions can coexist (tests create many).
//!
//! View lifecycle:
//! * `EditorModel::enter_visual` resets the view to `(0,0)` with `top_line = 0`
//!   and synthesizes an empty line when the document is empty.
//! * Nothing in the view survives a later `enter_visual`; it is effectively
//!   discarded on exit.
//!
//! Invariants while the visual editor runs:
//! * `cursor.row < line_count` (the document is never empty in visual mode).
//! * `cursor.col <= line_len(cursor.row)`.
//! * `top_line <= cursor.row < top_line + text_rows`.

use core_state::EditorState;
use core_text::{Position, StoreError};
mod layout;
pub use layout::{DEFAULT_COLUMNS, DEFAULT_ROWS, Layout};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct View {
    pub cursor: Position,
    /// First document row visible on screen.
    pub top_line: usize,
}

impl View {
    pub fn new(cursor: Position, top_line: usize) -> Self {
        Self { cursor, top_line }
    }

    /// Adjust `top_line` so the cursor row is visible. Returns true when the
    /// viewport moved.
    pub fn auto_scroll(&mut self, text_height: usize) -> bool {
        match compute_scroll_intent(self.top_line, self.cursor.row, text_height) {
            Some(new_first) => {
                self.top_line = new_first;
                true
            }
            None => false,
        }
    }

    /// Screen row of the cursor relative to the viewport.
    pub fn screen_row(&self) -> usize {
        self.cursor.row.saturating_sub(self.top_line)
    }
}

/// Compute the first visible line that keeps `cursor_line` inside a viewport of
/// `text_height` rows starting at `first`.
///
/// Returns `Some(new_first)` when a scroll is needed: moving above the viewport
/// anchors the cursor row at the top, moving below anchors it at the bottom.
pub fn compute_scroll_intent(first: usize, cursor_line: usize, text_height: usize) -> Option<usize> {
    if text_height == 0 {
        return None;
    }
    if cursor_line < first {
        return Some(cursor_line);
    }
    if cursor_line >= first + text_height {
        return Some(cursor_line + 1 - text_height);
    }
    None
}

#[derive(Debug, Clone, Default)]
pub struct EditorModel {
    state: EditorState,
    view: View,
    layout: Layout,
}

impl EditorModel {
    pub fn new(state: EditorState) -> Self {
        Self::with_layout(state, Layout::default())
    }

    pub fn with_layout(state: EditorState, layout: Layout) -> Self {
        Self {
            state,
            view: View::default(),
            layout,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }
    pub fn view(&self) -> &View {
        &self.view
    }
    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Disjoint mutable borrows of the state and the view.
    pub fn split_state_and_view(&mut self) -> (&mut EditorState, &mut View) {
        (&mut self.state, &mut self.view)
    }

    /// Reset the view for a new visual session.
    ///
    /// An empty document gains one empty line so the cursor has a valid row;
    /// that line stays after the session ends.
    pub fn enter_visual(&mut self) -> Result<(), StoreError> {
        self.state.document_mut_untracked().ensure_nonempty()?;
        self.view = View::new(Position::origin(), 0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Limits, LineStore};

    fn model(lines: &[&str]) -> EditorModel {
        let store = LineStore::from_lines(Limits::default(), lines.iter().map(|l| l.as_bytes())).unwrap();
        EditorModel::new(EditorState::new(store))
    }

    #[test]
    fn enter_visual_synthesizes_line_for_empty_document() {
        let mut m = model(&[]);
        m.view_mut().cursor = Position::new(4, 2);
        m.enter_visual().unwrap();
        assert_eq!(m.state().line_count(), 1);
        assert_eq!(m.view().cursor, Position::origin());
        assert_eq!(m.view().top_line, 0);
        assert!(!m.state().dirty);
    }

    #[test]
    fn enter_visual_keeps_existing_document() {
        let mut m = model(&["a", "b"]);
        m.view_mut().top_line = 1;
        m.enter_visual().unwrap();
        assert_eq!(m.state().line_count(), 2);
        assert_eq!(m.view().top_line, 0);
    }

    #[test]
    fn auto_scroll_down_and_up() {
        let mut v = View::default();
        let h = 5usize;
        assert!(!v.auto_scroll(h));
        v.cursor.row = 4;
        assert!(!v.auto_scroll(h));
        v.cursor.row = 5;
        assert!(v.auto_scroll(h));
        assert_eq!(v.top_line, 1);
        v.cursor.row = 9;
        assert!(v.auto_scroll(h));
        assert_eq!(v.top_line, 5);
        v.cursor.row = 3;
        assert!(v.auto_scroll(h));
        assert_eq!(v.top_line, 3);
        assert_eq!(v.screen_row(), 0);
    }

    #[test]
    fn compute_scroll_intent_noop_inside_viewport() {
        assert_eq!(compute_scroll_intent(0, 5, 10), None);
        assert_eq!(compute_scroll_intent(3, 3, 10), None);
        assert_eq!(compute_scroll_intent(3, 12, 10), None);
        assert_eq!(compute_scroll_intent(3, 13, 10), Some(4));
        assert_eq!(compute_scroll_intent(0, 0, 0), None);
    }
}

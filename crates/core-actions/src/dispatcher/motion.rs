//! Cursor movement.
//!
//! Every motion keeps `cursor.col <= line_len(cursor.row)`. Arrow motions that
//! stay inside the viewport only move the hardware cursor; leaving the viewport
//! scrolls and repaints the whole frame. Paging always repaints and anchors the
//! viewport at the new cursor row.

use crate::MotionKind;
use core_model::View;
use core_render::RenderDelta;
use core_text::LineStore;

pub(crate) fn handle_motion(
    kind: MotionKind,
    doc: &LineStore,
    view: &mut View,
    text_rows: usize,
) -> Option<RenderDelta> {
    let before = view.cursor;
    let last_row = doc.line_count().saturating_sub(1);
    match kind {
        MotionKind::Up if view.cursor.row > 0 => {
            view.cursor.row -= 1;
            clamp_col(doc, view);
        }
        MotionKind::Down if view.cursor.row < last_row => {
            view.cursor.row += 1;
            clamp_col(doc, view);
        }
        MotionKind::Left if view.cursor.col > 0 => view.cursor.col -= 1,
        MotionKind::Left if view.cursor.row > 0 => {
            view.cursor.row -= 1;
            view.cursor.col = doc.line_len(view.cursor.row);
        }
        MotionKind::Right if view.cursor.col < doc.line_len(view.cursor.row) => {
            view.cursor.col += 1;
        }
        MotionKind::Right if view.cursor.row < last_row => {
            view.cursor.row += 1;
            view.cursor.col = 0;
        }
        MotionKind::LineStart => view.cursor.col = 0,
        MotionKind::LineEnd => view.cursor.col = doc.line_len(view.cursor.row),
        MotionKind::PageUp => {
            view.cursor.row = view.cursor.row.saturating_sub(text_rows);
            view.top_line = view.cursor.row;
            clamp_col(doc, view);
            return Some(RenderDelta::Full);
        }
        MotionKind::PageDown => {
            view.cursor.row = (view.cursor.row + text_rows).min(last_row);
            view.top_line = view.cursor.row;
            clamp_col(doc, view);
            return Some(RenderDelta::Full);
        }
        _ => return None,
    }
    tracing::trace!(
        target: "visual",
        ?kind,
        from_row = before.row,
        from_col = before.col,
        row = view.cursor.row,
        col = view.cursor.col,
        "motion"
    );
    if view.auto_scroll(text_rows) {
        Some(RenderDelta::Full)
    } else if view.cursor == before {
        None
    } else {
        Some(RenderDelta::CursorOnly)
    }
}

fn clamp_col(doc: &LineStore, view: &mut View) {
    view.cursor.col = view.cursor.col.min(doc.line_len(view.cursor.row));
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Limits, Position};

    fn doc(lines: &[&str]) -> LineStore {
        LineStore::from_lines(Limits::default(), lines).unwrap()
    }

    fn numbered(n: usize) -> LineStore {
        LineStore::from_lines(Limits::default(), (0..n).map(|i| i.to_string())).unwrap()
    }

    #[test]
    fn vertical_motion_clamps_column() {
        let d = doc(&["long line", "ab"]);
        let mut v = View::new(Position::new(0, 7), 0);
        assert_eq!(handle_motion(MotionKind::Down, &d, &mut v, 10), Some(RenderDelta::CursorOnly));
        assert_eq!(v.cursor, Position::new(1, 2));
        assert_eq!(handle_motion(MotionKind::Down, &d, &mut v, 10), None);
    }

    #[test]
    fn horizontal_motion_wraps() {
        let d = doc(&["abc", "de"]);
        let mut v = View::new(Position::new(1, 0), 0);
        handle_motion(MotionKind::Left, &d, &mut v, 10);
        assert_eq!(v.cursor, Position::new(0, 3));
        handle_motion(MotionKind::Right, &d, &mut v, 10);
        assert_eq!(v.cursor, Position::new(1, 0));
        handle_motion(MotionKind::LineEnd, &d, &mut v, 10);
        assert_eq!(handle_motion(MotionKind::Right, &d, &mut v, 10), None);
        assert_eq!(v.cursor, Position::new(1, 2));
        handle_motion(MotionKind::LineStart, &d, &mut v, 10);
        assert_eq!(v.cursor.col, 0);
    }

    #[test]
    fn leaving_viewport_scrolls_with_full_repaint() {
        let d = numbered(10);
        let mut v = View::new(Position::new(2, 0), 0);
        assert_eq!(handle_motion(MotionKind::Down, &d, &mut v, 3), Some(RenderDelta::Full));
        assert_eq!(v.top_line, 1);
        assert_eq!(handle_motion(MotionKind::Up, &d, &mut v, 3), Some(RenderDelta::CursorOnly));
        assert_eq!(handle_motion(MotionKind::Up, &d, &mut v, 3), Some(RenderDelta::CursorOnly));
        assert_eq!(handle_motion(MotionKind::Up, &d, &mut v, 3), Some(RenderDelta::Full));
        assert_eq!(v.top_line, 0);
    }

    #[test]
    fn paging_anchors_viewport_at_cursor() {
        let d = numbered(50);
        let mut v = View::new(Position::origin(), 0);
        assert_eq!(handle_motion(MotionKind::PageDown, &d, &mut v, 23), Some(RenderDelta::Full));
        assert_eq!((v.cursor.row, v.top_line), (23, 23));
        handle_motion(MotionKind::PageDown, &d, &mut v, 23);
        handle_motion(MotionKind::PageDown, &d, &mut v, 23);
        assert_eq!((v.cursor.row, v.top_line), (49, 49));
        handle_motion(MotionKind::PageUp, &d, &mut v, 23);
        assert_eq!((v.cursor.row, v.top_line), (26, 26));
        handle_motion(MotionKind::PageUp, &d, &mut v, 100);
        assert_eq!((v.cursor.row, v.top_line), (0, 0));
    }
}

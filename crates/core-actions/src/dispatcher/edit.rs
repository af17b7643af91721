//! Text edits at the cursor (insert/backspace/delete/split).
//!
//! Each handler mutates the document through `LineStore`, moves the cursor and
//! returns the smallest repaint that keeps the screen consistent:
//! * append at end of line: the single new cell;
//! * insert or remove inside a line: that line (the tail shifts);
//! * join: from the cursor row to the bottom of the viewport, since every
//!   later row moves up by one (a join that scrolls repaints everything);
//! * split: everything.
//!
//! Refused edits (line full, nothing to delete, document full) return `None`
//! and leave the dirty flag alone.

use crate::EditKind;
use core_model::View;
use core_render::RenderDelta;
use core_state::EditorState;
use core_text::Removal;

pub(crate) fn handle_edit(
    kind: EditKind,
    state: &mut EditorState,
    view: &mut View,
    text_rows: usize,
    tab_width: usize,
) -> Option<RenderDelta> {
    let before = view.cursor;
    let row = before.row;
    let doc = state.document_mut_untracked();
    let delta = match kind {
        EditKind::InsertByte(b) => {
            let at_end = view.cursor.col >= doc.line_len(row);
            let col = view.cursor.col.min(doc.line_len(row));
            if !doc.insert_byte(&mut view.cursor, b) {
                tracing::trace!(target: "visual", row, col, "insert_refused");
                return None;
            }
            if at_end {
                RenderDelta::Cell { row, col }
            } else {
                RenderDelta::Lines(row..row + 1)
            }
        }
        EditKind::Tab => {
            let inserted = (0..tab_width)
                .take_while(|_| doc.insert_byte(&mut view.cursor, b' '))
                .count();
            if inserted == 0 {
                return None;
            }
            RenderDelta::Lines(row..row + 1)
        }
        EditKind::SplitLine => {
            if let Err(e) = doc.split_line(&mut view.cursor) {
                tracing::warn!(target: "visual", row, error = %e, "split_refused");
                return None;
            }
            view.auto_scroll(text_rows);
            RenderDelta::Full
        }
        EditKind::Backspace => match doc.delete_byte_before(&mut view.cursor) {
            Removal::None => return None,
            Removal::Byte => RenderDelta::Lines(row..row + 1),
            Removal::Join => join_delta(view, text_rows),
        },
        EditKind::Delete => match doc.delete_byte_at(&mut view.cursor) {
            Removal::None => return None,
            Removal::Byte => RenderDelta::Lines(row..row + 1),
            Removal::Join => join_delta(view, text_rows),
        },
    };
    state.dirty = true;
    tracing::trace!(
        target: "visual",
        ?kind,
        row = before.row,
        col = before.col,
        to_row = view.cursor.row,
        to_col = view.cursor.col,
        "edit"
    );
    Some(delta)
}

fn join_delta(view: &mut View, text_rows: usize) -> RenderDelta {
    if view.auto_scroll(text_rows) {
        RenderDelta::Full
    } else {
        RenderDelta::Lines(view.cursor.row..view.top_line + text_rows)
    }
}

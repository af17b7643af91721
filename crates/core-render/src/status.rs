//! Status line composition.
//!
//! Format:
//! ` F1=Help F2=Save ESC=Exit | Line <row+1>/<n> Col <col+1> | <file|(none)>`
//! followed by ` | <message>` when an ephemeral message is present. The line is
//! padded with spaces (or clipped) to the screen width and drawn in reverse
//! video by the engine.
//!
//! Two stages: `compose_status` produces ordered segments, `format_status`
//! joins them. Tests assert on the formatted string.

use std::path::Path;

pub const KEY_HINTS: &str = " F1=Help F2=Save ESC=Exit";

/// Simple DTO describing what we need to render a status line.
pub struct StatusContext<'a> {
    pub row: usize, // 0-based current line index
    pub line_count: usize,
    pub col: usize, // 0-based byte column
    pub file_name: Option<&'a Path>,
    pub message: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusSegment<'a> {
    Hints(&'static str),
    Position { line_1: usize, count: usize, col_1: usize },
    File(std::borrow::Cow<'a, str>),
    Message(&'a str),
}

pub fn compose_status<'a>(ctx: &StatusContext<'a>) -> Vec<StatusSegment<'a>> {
    let file = match ctx.file_name {
        Some(p) => p.to_string_lossy(),
        None => "(none)".into(),
    };
    let mut segs = vec![
        StatusSegment::Hints(KEY_HINTS),
        StatusSegment::Position {
            line_1: ctx.row + 1,
            count: ctx.line_count,
            col_1: ctx.col + 1,
        },
        StatusSegment::File(file),
    ];
    if let Some(msg) = ctx.message {
        segs.push(StatusSegment::Message(msg));
    }
    segs
}

pub fn format_status(segments: &[StatusSegment<'_>]) -> String {
    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        if i > 0 {
            out.push_str(" | ");
        }
        match seg {
            StatusSegment::Hints(h) => out.push_str(h),
            StatusSegment::Position {
                line_1,
                count,
                col_1,
            } => out.push_str(&format!("Line {line_1}/{count} Col {col_1}")),
            StatusSegment::File(f) => out.push_str(f),
            StatusSegment::Message(m) => out.push_str(m),
        }
    }
    out
}

/// Status text as bytes padded or clipped to exactly `width` cells.
pub fn status_bytes(ctx: &StatusContext<'_>, width: usize) -> Vec<u8> {
    let mut bytes = format_status(&compose_status(ctx)).into_bytes();
    bytes.resize(width, b' ');
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_position_and_file() {
        let ctx = StatusContext {
            row: 4,
            line_count: 12,
            col: 0,
            file_name: Some(Path::new("notes.txt")),
            message: None,
        };
        assert_eq!(
            format_status(&compose_status(&ctx)),
            " F1=Help F2=Save ESC=Exit | Line 5/12 Col 1 | notes.txt"
        );
    }

    #[test]
    fn unnamed_buffer_with_message() {
        let ctx = StatusContext {
            row: 0,
            line_count: 1,
            col: 3,
            file_name: None,
            message: Some("No filename"),
        };
        assert_eq!(
            format_status(&compose_status(&ctx)),
            " F1=Help F2=Save ESC=Exit | Line 1/1 Col 4 | (none) | No filename"
        );
    }

    #[test]
    fn status_bytes_pads_and_clips() {
        let ctx = StatusContext {
            row: 0,
            line_count: 1,
            col: 0,
            file_name: None,
            message: None,
        };
        let wide = status_bytes(&ctx, 80);
        assert_eq!(wide.len(), 80);
        assert_eq!(*wide.last().unwrap(), b' ');
        let narrow = status_bytes(&ctx, 8);
        assert_eq!(narrow, b" F1=Help".to_vec());
    }
}

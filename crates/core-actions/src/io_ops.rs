//! File I/O adapter.
//!
//! Format: newline-delimited bytes. On load each line loses its `\n` and up to
//! one preceding `\r` (plus one more trailing `\r`, matching a classic
//! `chomp`), is truncated to the line limit, and lines past the document
//! capacity are dropped. On save every stored line is followed by a single
//! `\n`, so CRLF input comes back out as LF.

use crate::error::{CommandError, IoOp};
use core_state::EditorState;
use core_text::LoadReport;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Split raw file content into lines with line terminators removed.
pub fn split_lines(content: &[u8]) -> Vec<&[u8]> {
    let mut lines: Vec<&[u8]> = content.split(|b| *b == b'\n').collect();
    if content.is_empty() || content.ends_with(b"\n") {
        // trailing terminator does not start another line
        lines.pop();
    }
    lines.into_iter().map(chomp).collect()
}

/// Strip a trailing `\r` twice (the `\n` is already gone).
pub(crate) fn chomp(mut line: &[u8]) -> &[u8] {
    for _ in 0..2 {
        if let Some(stripped) = line.strip_suffix(b"\r") {
            line = stripped;
        }
    }
    line
}

/// Replace the document with the contents of `path`.
///
/// On success the path becomes the current file, the dirty flag is cleared
/// and LastRange becomes `(1, line_count)`. A read failure leaves the document
/// untouched. An allocation failure during the load leaves it empty.
pub fn open_file(state: &mut EditorState, path: &Path) -> Result<LoadReport, CommandError> {
    let content = std::fs::read(path).map_err(|source| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_open_error");
        CommandError::Io {
            op: IoOp::Open,
            path: path.to_path_buf(),
            source,
        }
    })?;
    let report = state
        .document_mut_untracked()
        .load(split_lines(&content))
        .inspect_err(|e| tracing::error!(target: "io", path = %path.display(), error = %e, "load_aborted"))?;
    state.set_file_name(path);
    state.dirty = false;
    state.record_range(1, report.lines);
    tracing::info!(
        target: "io",
        path = %path.display(),
        lines = report.lines,
        truncated = report.truncated_lines,
        dropped = report.dropped_lines,
        "file_opened"
    );
    Ok(report)
}

/// Serialize the document to `target`, or to the current file when `None`.
///
/// Returns the number of lines written and the path used; the path becomes the
/// current file and the dirty flag is cleared.
pub fn write_file(
    state: &mut EditorState,
    target: Option<&Path>,
) -> Result<(usize, PathBuf), CommandError> {
    let path = match target {
        Some(p) => p.to_path_buf(),
        None => state.file_name.clone().ok_or(CommandError::NoFileName)?,
    };
    let io_err = |source: std::io::Error| {
        tracing::error!(target: "io", path = %path.display(), error = %source, "file_write_error");
        CommandError::Io {
            op: IoOp::Write,
            path: path.clone(),
            source,
        }
    };
    let file = std::fs::File::create(&path).map_err(io_err)?;
    let mut out = BufWriter::new(file);
    for line in state.document().iter() {
        out.write_all(line).map_err(io_err)?;
        out.write_all(b"\n").map_err(io_err)?;
    }
    out.flush().map_err(io_err)?;
    let count = state.line_count();
    state.set_file_name(&path);
    state.dirty = false;
    tracing::info!(target: "io", path = %path.display(), lines = count, "file_written");
    Ok((count, path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Limits, LineStore};

    fn lines(state: &EditorState) -> Vec<Vec<u8>> {
        state.document().iter().map(<[u8]>::to_vec).collect()
    }

    #[test]
    fn split_strips_terminators() {
        assert_eq!(split_lines(b"a\r\nb\nc"), vec![&b"a"[..], b"b", b"c"]);
        assert_eq!(split_lines(b"a\n\n"), vec![&b"a"[..], b""]);
        assert!(split_lines(b"").is_empty());
        assert_eq!(split_lines(b"x\r\r\n"), vec![&b"x"[..]]);
    }

    #[test]
    fn open_normalizes_and_sets_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        std::fs::write(&path, b"line1\r\nline2\nline3\r\n").unwrap();
        let mut state = EditorState::default();
        state.dirty = true;
        let report = open_file(&mut state, &path).unwrap();
        assert_eq!(report.lines, 3);
        assert_eq!(lines(&state), vec![b"line1".to_vec(), b"line2".to_vec(), b"line3".to_vec()]);
        assert_eq!(state.file_name.as_deref(), Some(path.as_path()));
        assert!(!state.dirty);
        assert_eq!((state.last_range().a, state.last_range().b), (1, 3));
    }

    #[test]
    fn open_missing_file_keeps_document() {
        let mut state = EditorState::new(LineStore::from_lines(Limits::default(), ["keep"]).unwrap());
        let err = open_file(&mut state, Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, CommandError::Io { op: IoOp::Open, .. }));
        assert_eq!(lines(&state), vec![b"keep".to_vec()]);
        assert!(state.file_name.is_none());
    }

    #[test]
    fn write_canonicalizes_to_lf() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("crlf.txt");
        let dst = dir.path().join("out.txt");
        std::fs::write(&src, b"a\r\nb\r\n").unwrap();
        let mut state = EditorState::default();
        open_file(&mut state, &src).unwrap();
        state.document_mut().set_line(0, b"A").unwrap();
        let (n, used) = write_file(&mut state, Some(&dst)).unwrap();
        assert_eq!((n, used.as_path()), (2, dst.as_path()));
        assert_eq!(std::fs::read(&dst).unwrap(), b"A\nb\n");
        assert!(!state.dirty);
        assert_eq!(state.file_name.as_deref(), Some(dst.as_path()));
    }

    #[test]
    fn write_without_name() {
        let mut state = EditorState::default();
        state.dirty = true;
        assert!(matches!(write_file(&mut state, None), Err(CommandError::NoFileName)));
        assert!(state.dirty, "dirty unchanged when no filename");
    }

    #[test]
    fn write_to_unwritable_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = EditorState::default();
        let err = write_file(&mut state, Some(dir.path())).unwrap_err();
        assert!(matches!(err, CommandError::Io { op: IoOp::Write, .. }));
    }
}

//! Line commands: list, insert, delete, edit, replace, search.
//!
//! Each command resolves its range against the current line count, works on
//! the document through `EditorState` and records the range it touched in
//! LastRange. Output goes to the REPL's writer; the interactive commands
//! (insert, edit) read follow-up lines from the REPL's reader.

use crate::error::CommandError;
use crate::io_ops::chomp;
use crate::range::{LineRange, RangeSpec};
use core_state::EditorState;
use core_text::subst::{find_ignore_case, replace_in_line};
use std::io::{BufRead, Write};

/// `%05d: <text>` using the 0-based index.
pub(crate) fn echo_line<W: Write>(out: &mut W, idx: usize, text: &[u8]) -> std::io::Result<()> {
    write!(out, "{idx:05}: ")?;
    out.write_all(text)?;
    out.write_all(b"\n")
}

/// Read one input line without its terminator. `Ok(None)` at end of input.
pub(crate) fn read_input_line<R: BufRead>(input: &mut R) -> std::io::Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf)? == 0 {
        return Ok(None);
    }
    let text = chomp(buf.strip_suffix(b"\n").unwrap_or(&buf)).to_vec();
    Ok(Some(text))
}

pub fn list<W: Write>(
    state: &mut EditorState,
    spec: RangeSpec,
    out: &mut W,
) -> Result<(), CommandError> {
    let n = state.line_count();
    if n == 0 {
        writeln!(out, "(empty)")?;
        return Ok(());
    }
    let range = spec.clamp(n);
    for idx in range.indices() {
        if let Some(text) = state.document().line(idx) {
            echo_line(out, idx, text)?;
        }
    }
    state.record_range(range.a, range.b);
    Ok(())
}

/// Insert lines typed by the user at slot `at` (1-based) until a line holding
/// a single `.` or end of input. Out-of-range or absent `at` appends.
///
/// A store failure is reported inline and ends the insert; lines already
/// inserted stay.
pub fn insert<R: BufRead, W: Write>(
    state: &mut EditorState,
    at: Option<i64>,
    input: &mut R,
    out: &mut W,
) -> Result<(), CommandError> {
    let count = state.line_count() as i64;
    let n = match at {
        Some(n) if (1..=count + 1).contains(&n) => n as usize,
        _ => state.line_count() + 1,
    };
    let mut pos = n - 1;
    writeln!(out, "-- Insert at  Line {:05}  --", n - 1)?;
    loop {
        write!(out, "{:05}: ", pos + 1)?;
        out.flush()?;
        let Some(text) = read_input_line(input)? else {
            break;
        };
        if text == b"." {
            break;
        }
        match state.document_mut_untracked().insert_line(pos, &text) {
            Ok(_) => {
                state.dirty = true;
                pos += 1;
            }
            Err(e) => {
                tracing::warn!(target: "repl", pos, error = %e, "insert_stopped");
                writeln!(out, "{}", CommandError::from(e))?;
                break;
            }
        }
    }
    state.record_range(n, pos);
    Ok(())
}

pub fn delete(state: &mut EditorState, spec: RangeSpec) -> Result<(), CommandError> {
    let n = state.line_count();
    if n == 0 {
        return Ok(());
    }
    let range = spec.clamp(n);
    if range.is_empty() {
        return Ok(());
    }
    state.document_mut().close_gap(range.a - 1, range.len());
    let remaining = state.line_count();
    state.record_range(range.a, range.a.min(remaining));
    Ok(())
}

/// Show line `n` and replace it with the next input line. End of input leaves
/// the line untouched.
pub fn edit<R: BufRead, W: Write>(
    state: &mut EditorState,
    n: i64,
    input: &mut R,
    out: &mut W,
) -> Result<(), CommandError> {
    let count = state.line_count() as i64;
    if n < 1 || n > count {
        return Err(CommandError::OutOfRangeLine(n));
    }
    let idx = (n - 1) as usize;
    let current = state.document().line(idx).unwrap_or_default();
    echo_line(out, idx, current)?;
    write!(out, "{n:05}: ")?;
    out.flush()?;
    let Some(text) = read_input_line(input)? else {
        return Ok(());
    };
    state.document_mut().set_line(idx, &text)?;
    state.record_range(idx + 1, idx + 1);
    Ok(())
}

/// Substitute `old` with `new` on every line of the range; `global` replaces
/// every occurrence per line instead of the first. Prints the total.
pub fn replace<W: Write>(
    state: &mut EditorState,
    spec: RangeSpec,
    old: &[u8],
    new: &[u8],
    global: bool,
    out: &mut W,
) -> Result<(), CommandError> {
    let range = spec.clamp(state.line_count());
    let max_bytes = state.limits().max_line_bytes();
    let mut total = 0;
    for idx in range.indices() {
        let Some(line) = state.document().line(idx) else {
            continue;
        };
        let mut buf = line.to_vec();
        let made = replace_in_line(&mut buf, old, new, global, max_bytes);
        if made > 0 {
            state.document_mut().set_line(idx, &buf)?;
            total += made;
        }
    }
    tracing::debug!(target: "repl", total, global, "replace");
    writeln!(out, "Replaced {total} occurrence(s).")?;
    record(state, range);
    Ok(())
}

/// Print every line of the range containing `pattern` (ASCII case-insensitive).
pub fn search<W: Write>(
    state: &mut EditorState,
    spec: RangeSpec,
    pattern: &[u8],
    out: &mut W,
) -> Result<(), CommandError> {
    let range = spec.clamp(state.line_count());
    let mut hits = 0;
    for idx in range.indices() {
        let Some(line) = state.document().line(idx) else {
            continue;
        };
        if find_ignore_case(line, pattern).is_some() {
            echo_line(out, idx, line)?;
            hits += 1;
        }
    }
    writeln!(out, "-- {hits} match(es)")?;
    record(state, range);
    Ok(())
}

fn record(state: &mut EditorState, range: LineRange) {
    state.record_range(range.a, range.b);
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::{Limits, LineStore};
    use std::io::Cursor;

    fn state(lines: &[&str]) -> EditorState {
        EditorState::new(LineStore::from_lines(Limits::default(), lines).unwrap())
    }

    fn text(state: &EditorState) -> Vec<String> {
        state
            .document()
            .iter()
            .map(|l| String::from_utf8_lossy(l).into_owned())
            .collect()
    }

    fn out_str(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn list_echoes_zero_based_indices() {
        let mut st = state(&["a", "b", "c"]);
        let mut out = Vec::new();
        list(&mut st, RangeSpec::Span(2, Some(3)), &mut out).unwrap();
        assert_eq!(out_str(out), "00001: b\n00002: c\n");
        assert_eq!((st.last_range().a, st.last_range().b), (2, 3));
    }

    #[test]
    fn list_empty_document() {
        let mut st = EditorState::default();
        let mut out = Vec::new();
        list(&mut st, RangeSpec::Whole, &mut out).unwrap();
        assert_eq!(out_str(out), "(empty)\n");
        assert!(st.last_range().is_unset());
    }

    #[test]
    fn insert_until_dot() {
        let mut st = state(&["a", "b"]);
        let mut input = Cursor::new(&b"x\r\ny\n.\nignored\n"[..]);
        let mut out = Vec::new();
        insert(&mut st, Some(2), &mut input, &mut out).unwrap();
        assert_eq!(text(&st), ["a", "x", "y", "b"]);
        assert_eq!(
            out_str(out),
            "-- Insert at  Line 00001  --\n00002: 00003: 00004: "
        );
        assert_eq!((st.last_range().a, st.last_range().b), (2, 3));
        assert!(st.dirty);
    }

    #[test]
    fn insert_out_of_range_appends_and_stops_at_eof() {
        let mut st = state(&["a"]);
        let mut input = Cursor::new(&b"z"[..]);
        let mut out = Vec::new();
        insert(&mut st, Some(99), &mut input, &mut out).unwrap();
        assert_eq!(text(&st), ["a", "z"]);
    }

    #[test]
    fn insert_reports_capacity() {
        let mut st = EditorState::new(LineStore::from_lines(Limits::new(2, 16), ["a"]).unwrap());
        let mut input = Cursor::new(&b"b\nc\nd\n.\n"[..]);
        let mut out = Vec::new();
        insert(&mut st, None, &mut input, &mut out).unwrap();
        assert_eq!(text(&st), ["a", "b"]);
        assert!(out_str(out).contains("! out of space\n"));
        assert_eq!((st.last_range().a, st.last_range().b), (2, 2));
    }

    #[test]
    fn insert_into_full_store_stays_clean() {
        let mut st = EditorState::new(LineStore::from_lines(Limits::new(1, 16), ["a"]).unwrap());
        let mut input = Cursor::new(&b"b\n.\n"[..]);
        let mut out = Vec::new();
        insert(&mut st, None, &mut input, &mut out).unwrap();
        assert_eq!(text(&st), ["a"]);
        assert!(out_str(out).contains("! out of space\n"));
        assert!(!st.dirty);
    }

    #[test]
    fn delete_clamps_and_records() {
        let mut st = state(&["a", "b", "c", "d"]);
        delete(&mut st, RangeSpec::Span(3, Some(99))).unwrap();
        assert_eq!(text(&st), ["a", "b"]);
        assert_eq!((st.last_range().a, st.last_range().b), (3, 2));
        delete(&mut st, RangeSpec::Whole).unwrap();
        assert!(st.document().is_empty());
        let mut empty = EditorState::default();
        delete(&mut empty, RangeSpec::Single(1)).unwrap();
        assert!(!empty.dirty);
    }

    #[test]
    fn edit_replaces_line() {
        let mut st = state(&["one", "two"]);
        let mut input = Cursor::new(&b"TWO\n"[..]);
        let mut out = Vec::new();
        edit(&mut st, 2, &mut input, &mut out).unwrap();
        assert_eq!(text(&st), ["one", "TWO"]);
        assert_eq!(out_str(out), "00001: two\n00002: ");
        assert_eq!((st.last_range().a, st.last_range().b), (2, 2));
    }

    #[test]
    fn edit_rejects_bad_line_and_keeps_on_eof() {
        let mut st = state(&["one"]);
        let mut out = Vec::new();
        let err = edit(&mut st, 5, &mut Cursor::new(&b""[..]), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "! bad line");
        edit(&mut st, 1, &mut Cursor::new(&b""[..]), &mut out).unwrap();
        assert_eq!(text(&st), ["one"]);
        assert!(!st.dirty);
    }

    #[test]
    fn replace_counts_across_lines() {
        let mut st = state(&["foo foo", "bar", "foo"]);
        let mut out = Vec::new();
        replace(&mut st, RangeSpec::Whole, b"foo", b"baz", true, &mut out).unwrap();
        assert_eq!(text(&st), ["baz baz", "bar", "baz"]);
        assert_eq!(out_str(out), "Replaced 3 occurrence(s).\n");

        let mut st = state(&["foo foo"]);
        let mut out = Vec::new();
        replace(&mut st, RangeSpec::Whole, b"foo", b"x", false, &mut out).unwrap();
        assert_eq!(text(&st), ["x foo"]);
    }

    #[test]
    fn replace_without_match_leaves_clean() {
        let mut st = state(&["abc"]);
        let mut out = Vec::new();
        replace(&mut st, RangeSpec::Whole, b"zzz", b"y", true, &mut out).unwrap();
        assert!(!st.dirty);
        assert_eq!(out_str(out), "Replaced 0 occurrence(s).\n");
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut st = state(&["Hello", "world", "HELLO again"]);
        let mut out = Vec::new();
        search(&mut st, RangeSpec::Whole, b"hello", &mut out).unwrap();
        assert_eq!(
            out_str(out),
            "00000: Hello\n00002: HELLO again\n-- 2 match(es)\n"
        );
        assert_eq!((st.last_range().a, st.last_range().b), (1, 3));
    }
}

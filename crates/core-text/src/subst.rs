//! In-line substitution and case-insensitive search.
//!
//! Both helpers operate on raw bytes. Substitution is byte-exact and case
//! sensitive; search folds ASCII case on both sides, one byte at a time.

/// Hard cap on substitutions applied to a single line in one call.
pub const SUBSTITUTION_LIMIT: usize = 1024;

/// Replace occurrences of `old` with `new` inside `line`.
///
/// Occurrences are found left to right and never overlap; scanning resumes after
/// the inserted text, so a `new` that contains `old` cannot re-match its own
/// output. Each substitution builds `prefix + new + suffix` as a fresh buffer.
/// When that result would exceed `max_bytes` the loop stops and earlier
/// substitutions on the line stand. An empty `old` is a no-op.
///
/// Returns the number of substitutions applied.
pub fn replace_in_line(
    line: &mut Vec<u8>,
    old: &[u8],
    new: &[u8],
    global: bool,
    max_bytes: usize,
) -> usize {
    if old.is_empty() {
        return 0;
    }
    let mut made = 0;
    let mut from = 0;
    while made < SUBSTITUTION_LIMIT {
        let Some(found) = find(line, old, from) else {
            break;
        };
        let suffix = &line[found + old.len()..];
        let new_len = found + new.len() + suffix.len();
        if new_len > max_bytes {
            break;
        }
        let mut buf = Vec::new();
        if buf.try_reserve_exact(new_len).is_err() {
            break;
        }
        buf.extend_from_slice(&line[..found]);
        buf.extend_from_slice(new);
        buf.extend_from_slice(suffix);
        *line = buf;
        made += 1;
        from = found + new.len();
        if !global {
            break;
        }
    }
    made
}

/// Case-sensitive search for `needle` in `hay` starting at byte `from`.
pub fn find(hay: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return (from <= hay.len()).then_some(from);
    }
    hay.get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// ASCII case-insensitive search. An empty needle matches at position 0.
pub fn find_ignore_case(hay: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    hay.windows(needle.len())
        .position(|w| w.eq_ignore_ascii_case(needle))
}

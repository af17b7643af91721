//! Property tests for line store shifting.

use core_text::{LINE_LEN, Limits, LineStore, MAX_LINES, StoreError};
use proptest::prelude::*;

fn snapshot(s: &LineStore) -> Vec<Vec<u8>> {
    s.iter().map(<[u8]>::to_vec).collect()
}

proptest! {
    // Opening k lines at p and closing the same span restores the document.
    #[test]
    fn insert_then_close_is_identity(
        lines in proptest::collection::vec("[a-z]{0,12}", 0..40),
        p_seed in 0usize..64,
        k in 1usize..10,
    ) {
        let mut s = LineStore::from_lines(Limits::default(), lines.iter().map(|l| l.as_bytes())).unwrap();
        let before = snapshot(&s);
        let p = p_seed % (s.line_count() + 1);
        for i in 0..k {
            s.insert_line(p + i, format!("new{i}").as_bytes()).unwrap();
        }
        prop_assert_eq!(s.line_count(), before.len() + k);
        s.close_gap(p, k);
        prop_assert_eq!(snapshot(&s), before);
    }

    // Stored lines never exceed line_len - 1 bytes.
    #[test]
    fn set_line_never_exceeds_limit(len in 1usize..40, content in "[ -~]{0,80}") {
        let limits = Limits::new(4, len + 1);
        let mut s = LineStore::from_lines(limits, ["seed"]).unwrap();
        s.set_line(0, content.as_bytes()).unwrap();
        prop_assert!(s.line_len(0) <= len);
    }
}

#[test]
fn capacity_boundary_with_default_limits() {
    let mut s = LineStore::new();
    for i in 0..MAX_LINES {
        s.insert_line(i, b"x").unwrap();
    }
    assert_eq!(s.line_count(), MAX_LINES);
    let err = s.insert_line(MAX_LINES, b"overflow").unwrap_err();
    assert_eq!(err, StoreError::CapacityExceeded { max: MAX_LINES });
    assert_eq!(s.line_count(), MAX_LINES);
}

#[test]
fn default_limits_match_historical_sizes() {
    let l = Limits::default();
    assert_eq!(l.max_lines, MAX_LINES);
    assert_eq!(l.line_len, LINE_LEN);
    assert_eq!(l.max_line_bytes(), 255);
}

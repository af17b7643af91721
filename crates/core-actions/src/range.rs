//! Range Resolver: 1-based inclusive line ranges from command text.
//!
//! Two stages:
//! 1. `parse_range` classifies the address text into a `RangeSpec` (pure
//!    syntax, no document knowledge).
//! 2. `RangeSpec::resolve` fills open ends from the current line count and
//!    `to_range_defaults` clamps/swaps. Every range-consuming command runs the
//!    clamp step, even when the numbers are already valid.
//!
//! Grammar (leading/trailing whitespace ignored, numbers read like C `atoi`):
//! * empty -> whole document
//! * `,N` -> `(1, N)`; `N <= 0` means end of document
//! * `N` -> `(N, N)`
//! * `N,M` -> `(N, M)`; `M` omitted means end of document
//!
//! Text after the recognised prefix is ignored (`3 junk` is line 3).

use crate::error::CommandError;

/// Parsed but unresolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    Whole,
    /// `,N`
    To(i64),
    /// `N`
    Single(i64),
    /// `N,` or `N,M`
    Span(i64, Option<i64>),
}

/// A clamped range. `a..=b` are 1-based; an empty document yields `a == b == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub a: usize,
    pub b: usize,
}

impl LineRange {
    pub const EMPTY: LineRange = LineRange { a: 0, b: 0 };

    pub fn is_empty(&self) -> bool {
        self.a == 0 || self.a > self.b
    }

    /// 0-based indices covered by the range.
    pub fn indices(&self) -> std::ops::Range<usize> {
        if self.is_empty() {
            0..0
        } else {
            self.a - 1..self.b
        }
    }

    pub fn len(&self) -> usize {
        self.indices().len()
    }
}

/// C `atoi`: optional whitespace, optional sign, digits; 0 when no digits.
/// Saturates instead of overflowing.
pub fn atoi(text: &[u8]) -> i64 {
    let mut i = 0;
    while i < text.len() && text[i].is_ascii_whitespace() {
        i += 1;
    }
    let mut negative = false;
    if i < text.len() && (text[i] == b'-' || text[i] == b'+') {
        negative = text[i] == b'-';
        i += 1;
    }
    let mut value: i64 = 0;
    while i < text.len() && text[i].is_ascii_digit() {
        value = value
            .saturating_mul(10)
            .saturating_add(i64::from(text[i] - b'0'));
        i += 1;
    }
    if negative { -value } else { value }
}

fn skip_ws(text: &[u8]) -> &[u8] {
    let start = text
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(text.len());
    &text[start..]
}

/// Classify address text. Anything that does not start with a digit or a
/// comma (after whitespace) is malformed.
pub fn parse_range(text: &[u8]) -> Result<RangeSpec, CommandError> {
    let c = skip_ws(text);
    let Some(&first) = c.first() else {
        return Ok(RangeSpec::Whole);
    };
    if first == b',' {
        return Ok(RangeSpec::To(atoi(&c[1..])));
    }
    if !first.is_ascii_digit() {
        return Err(CommandError::MalformedRange(
            String::from_utf8_lossy(text).into_owned(),
        ));
    }
    let x = atoi(c);
    let digits = c.iter().take_while(|b| b.is_ascii_digit()).count();
    let rest = skip_ws(&c[digits..]);
    match rest.split_first() {
        Some((b',', tail)) => {
            let tail = skip_ws(tail);
            let y = (!tail.is_empty()).then(|| atoi(tail));
            Ok(RangeSpec::Span(x, y))
        }
        _ => Ok(RangeSpec::Single(x)),
    }
}

impl RangeSpec {
    /// Raw `(a, b)` before clamping; non-positive ends fall back to 1 / line_count.
    pub fn resolve(self, line_count: usize) -> (i64, i64) {
        let n = line_count as i64;
        let start = |x: i64| if x > 0 { x } else { 1 };
        let end = |y: i64| if y > 0 { y } else { n };
        match self {
            RangeSpec::Whole => (1, n),
            RangeSpec::To(y) => (1, end(y)),
            RangeSpec::Single(x) => (start(x), end(x)),
            RangeSpec::Span(x, Some(y)) => (start(x), end(y)),
            RangeSpec::Span(x, None) => (start(x), n),
        }
    }

    /// `resolve` followed by `to_range_defaults`.
    pub fn clamp(self, line_count: usize) -> LineRange {
        let (a, b) = self.resolve(line_count);
        to_range_defaults(a, b, line_count)
    }
}

/// Clamp and order a raw range against `line_count`:
/// `a < 1` becomes 1; `b < 1` or `b > line_count` becomes `line_count`; a
/// reversed pair is swapped when the document is non-empty, and the swapped end
/// is clamped again. An empty document yields `LineRange::EMPTY`.
pub fn to_range_defaults(a: i64, b: i64, line_count: usize) -> LineRange {
    if line_count == 0 {
        return LineRange::EMPTY;
    }
    let n = line_count as i64;
    let mut a = a.max(1);
    let mut b = if b < 1 || b > n { n } else { b };
    if a > b {
        std::mem::swap(&mut a, &mut b);
        b = b.min(n);
    }
    LineRange {
        a: a as usize,
        b: b as usize,
    }
}

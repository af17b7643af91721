//! Render scheduler.
//!
//! Producers report fine-grained invalidation intents (`RenderDelta`) via
//! `mark`. On `consume` queued deltas merge into a single semantic shape and an
//! effective strategy is derived against the current viewport.
//!
//! Merge semantics:
//! - Any `Full` in the queue makes the semantic decision `Full`.
//! - Multiple `Lines` deltas merge into one half-open range `[min(start), max(end))`.
//! - A `Cell` joins a `Lines` range as the single row it touches; two `Cell`s on
//!   different rows (or columns) degrade to the `Lines` span covering both rows.
//! - Heterogeneous precedence: `Full` > `Lines` > `Cell` > `StatusLine` > `CursorOnly`.
//! - `CursorOnly` with `StatusLine` collapses to `StatusLine`.
//!
//! Repaint scope per strategy (the engine guarantees this):
//! - `Full`: clear, every text row, status line, cursor.
//! - `Lines`: the listed rows padded to full width, then status line and cursor.
//! - `Cell`: one byte cell, then status line and cursor.
//! - `StatusLine`: status line and cursor.
//! - `CursorOnly`: hardware cursor only.
//!
//! Effective escalation (viewport aware):
//! - A `Lines` range is clipped to the visible rows; an empty clip becomes
//!   `StatusLine`, a clip covering every visible row becomes `Full`.
//! - A `Cell` outside the viewport becomes `Full`.

use crate::viewport::Viewport;
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering::Relaxed};

/// Granular render invalidation intents produced by editor state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDelta {
    /// Entire frame must be repainted.
    Full,
    /// Document rows `[start, end)` changed.
    Lines(Range<usize>),
    /// A single byte appeared at document position `(row, col)`.
    Cell { row: usize, col: usize },
    /// Only the status line contents changed (position counters, ephemeral message).
    StatusLine,
    /// Only the logical cursor moved.
    CursorOnly,
}

/// Stable decision DTO.
///
/// - `semantic`: the merged minimal damage kind for this frame.
/// - `effective`: the strategy the engine executes now (may escalate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub semantic: RenderDelta,
    pub effective: RenderDelta,
}

#[derive(Debug, Default)]
pub struct RenderDeltaMetrics {
    full: AtomicU64,
    lines: AtomicU64,
    cell: AtomicU64,
    status_line: AtomicU64,
    cursor_only: AtomicU64,
    /// Cells merged into a line span.
    cells_folded: AtomicU64,
    /// Frames whose effective strategy differs from the semantic one.
    escalations: AtomicU64,
    semantic_frames: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderDeltaMetricsSnapshot {
    pub full: u64,
    pub lines: u64,
    pub cell: u64,
    pub status_line: u64,
    pub cursor_only: u64,
    pub cells_folded: u64,
    pub escalations: u64,
    pub semantic_frames: u64,
}

impl RenderDeltaMetrics {
    pub fn snapshot(&self) -> RenderDeltaMetricsSnapshot {
        RenderDeltaMetricsSnapshot {
            full: self.full.load(Relaxed),
            lines: self.lines.load(Relaxed),
            cell: self.cell.load(Relaxed),
            status_line: self.status_line.load(Relaxed),
            cursor_only: self.cursor_only.load(Relaxed),
            cells_folded: self.cells_folded.load(Relaxed),
            escalations: self.escalations.load(Relaxed),
            semantic_frames: self.semantic_frames.load(Relaxed),
        }
    }

    fn incr_semantic(&self, delta: &RenderDelta) {
        let counter = match delta {
            RenderDelta::Full => &self.full,
            RenderDelta::Lines(_) => &self.lines,
            RenderDelta::Cell { .. } => &self.cell,
            RenderDelta::StatusLine => &self.status_line,
            RenderDelta::CursorOnly => &self.cursor_only,
        };
        counter.fetch_add(1, Relaxed);
        self.semantic_frames.fetch_add(1, Relaxed);
    }
}

#[derive(Debug, Default)]
pub struct RenderScheduler {
    /// Queue of deltas recorded since last `consume`.
    pending: Vec<RenderDelta>,
    metrics: RenderDeltaMetrics,
}

impl RenderScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics_snapshot(&self) -> RenderDeltaMetricsSnapshot {
        self.metrics.snapshot()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Record a new delta. Multiple calls accumulate until `consume()`.
    pub fn mark(&mut self, delta: RenderDelta) {
        tracing::trace!(target: "render.scheduler", ?delta, "render_mark");
        self.pending.push(delta);
    }

    pub fn mark_status(&mut self) {
        self.mark(RenderDelta::StatusLine);
    }

    /// Collapse queued deltas and derive the effective strategy for `viewport`.
    pub fn consume(&mut self, viewport: &Viewport) -> Option<Decision> {
        if self.pending.is_empty() {
            return None;
        }
        let merged = self.collapse();
        self.pending.clear();
        self.metrics.incr_semantic(&merged);
        let effective = escalate(&merged, viewport);
        if effective != merged {
            self.metrics.escalations.fetch_add(1, Relaxed);
        }
        tracing::trace!(target: "render.scheduler", ?merged, ?effective, "render_delta_collapse");
        Some(Decision {
            semantic: merged,
            effective,
        })
    }

    fn collapse(&self) -> RenderDelta {
        if self.pending.iter().any(|d| matches!(d, RenderDelta::Full)) {
            return RenderDelta::Full;
        }
        let mut have_status = false;
        let mut have_cursor = false;
        let mut line_range: Option<Range<usize>> = None;
        let mut cell: Option<(usize, usize)> = None;
        let mut cells = 0usize;
        for d in &self.pending {
            match d {
                RenderDelta::Full => return RenderDelta::Full,
                RenderDelta::StatusLine => have_status = true,
                RenderDelta::CursorOnly => have_cursor = true,
                RenderDelta::Lines(r) => line_range = Some(union(line_range.take(), r.clone())),
                RenderDelta::Cell { row, col } => {
                    cells += 1;
                    match cell {
                        None => cell = Some((*row, *col)),
                        Some(prev) if prev == (*row, *col) => {}
                        Some((prev_row, _)) => {
                            let span = prev_row.min(*row)..prev_row.max(*row) + 1;
                            line_range = Some(union(line_range.take(), span));
                        }
                    }
                }
            }
        }
        if let Some(r) = line_range {
            let r = match cell {
                Some((row, _)) => {
                    self.metrics.cells_folded.fetch_add(cells as u64, Relaxed);
                    union(Some(r), row..row + 1)
                }
                None => r,
            };
            return RenderDelta::Lines(r);
        }
        if let Some((row, col)) = cell {
            return RenderDelta::Cell { row, col };
        }
        if have_status {
            return RenderDelta::StatusLine;
        }
        if have_cursor {
            return RenderDelta::CursorOnly;
        }
        RenderDelta::Full
    }
}

fn union(existing: Option<Range<usize>>, r: Range<usize>) -> Range<usize> {
    match existing {
        None => r,
        Some(e) => e.start.min(r.start)..e.end.max(r.end),
    }
}

fn escalate(merged: &RenderDelta, viewport: &Viewport) -> RenderDelta {
    match merged {
        RenderDelta::Lines(r) => {
            let clipped = viewport.clip(r.clone());
            if clipped.is_empty() {
                RenderDelta::StatusLine
            } else if clipped.len() >= viewport.height {
                RenderDelta::Full
            } else {
                RenderDelta::Lines(clipped)
            }
        }
        RenderDelta::Cell { row, .. } if !viewport.contains(*row) => RenderDelta::Full,
        other => other.clone(),
    }
}

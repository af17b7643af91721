//! Render path metrics.
//!
//! Distinct from `RenderDeltaMetrics` (scheduler) which counts *semantic*
//! invalidation requests. This struct records which strategy the engine
//! actually executed and how much it painted.

use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct RenderPathMetrics {
    pub full_frames: AtomicU64,
    pub lines_frames: AtomicU64,
    pub cell_frames: AtomicU64,
    pub status_frames: AtomicU64,
    pub cursor_only_frames: AtomicU64,
    /// Text rows repainted by the lines path.
    pub lines_repainted: AtomicU64,
    pub help_frames: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPathMetricsSnapshot {
    pub full_frames: u64,
    pub lines_frames: u64,
    pub cell_frames: u64,
    pub status_frames: u64,
    pub cursor_only_frames: u64,
    pub lines_repainted: u64,
    pub help_frames: u64,
}

impl RenderPathMetrics {
    pub fn snapshot(&self) -> RenderPathMetricsSnapshot {
        RenderPathMetricsSnapshot {
            full_frames: self.full_frames.load(Ordering::Relaxed),
            lines_frames: self.lines_frames.load(Ordering::Relaxed),
            cell_frames: self.cell_frames.load(Ordering::Relaxed),
            status_frames: self.status_frames.load(Ordering::Relaxed),
            cursor_only_frames: self.cursor_only_frames.load(Ordering::Relaxed),
            lines_repainted: self.lines_repainted.load(Ordering::Relaxed),
            help_frames: self.help_frames.load(Ordering::Relaxed),
        }
    }

    pub(crate) fn bump(counter: &AtomicU64, by: u64) {
        counter.fetch_add(by, Ordering::Relaxed);
    }
}

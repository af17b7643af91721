//! Property-based tests for RenderScheduler merge semantics.

use core_render::scheduler::{RenderDelta, RenderScheduler};
use core_render::viewport::Viewport;
use proptest::prelude::*;

fn wide() -> Viewport {
    Viewport::new(0, 10_000)
}

proptest! {
    // Any mix of row repaints and cursor moves collapses to the covering span.
    #[test]
    fn row_repaints_cover_every_marked_row(
        spans in proptest::collection::vec((0usize..500, 1usize..40), 1..8),
        cursor_moves in 0usize..4,
    ) {
        let mut s = RenderScheduler::new();
        for _ in 0..cursor_moves {
            s.mark(RenderDelta::CursorOnly);
        }
        for (start, len) in &spans {
            s.mark(RenderDelta::Lines(*start..start + len));
        }
        let lo = spans.iter().map(|(st, _)| *st).min().unwrap();
        let hi = spans.iter().map(|(st, len)| st + len).max().unwrap();
        let d = s.consume(&wide()).unwrap();
        prop_assert_eq!(d.semantic, RenderDelta::Lines(lo..hi));
    }

    // A scroll anywhere in the queue forces a full frame, whatever else was marked.
    #[test]
    fn full_absorbs_everything(before in 0usize..5, after in 0usize..5, row in 0usize..100) {
        let mut s = RenderScheduler::new();
        for i in 0..before {
            s.mark(RenderDelta::Cell { row: row + i, col: i });
        }
        s.mark(RenderDelta::Full);
        for _ in 0..after {
            s.mark(RenderDelta::StatusLine);
        }
        let d = s.consume(&wide()).unwrap();
        prop_assert_eq!(d.semantic, RenderDelta::Full);
        prop_assert_eq!(d.effective, RenderDelta::Full);
        prop_assert!(!s.has_pending());
    }

    // A cell plus status stays a cell; the engine repaints status with it.
    #[test]
    fn cell_survives_status_and_cursor(row in 0usize..100, col in 0usize..200) {
        let mut s = RenderScheduler::new();
        s.mark(RenderDelta::StatusLine);
        s.mark(RenderDelta::Cell { row, col });
        s.mark(RenderDelta::CursorOnly);
        let d = s.consume(&wide()).unwrap();
        prop_assert_eq!(d.semantic, RenderDelta::Cell { row, col });
    }

    // Effective Lines never leave the viewport.
    #[test]
    fn effective_lines_within_viewport(first in 0usize..200, height in 2usize..40, start in 0usize..300, len in 1usize..60) {
        let vp = Viewport::new(first, height);
        let mut s = RenderScheduler::new();
        s.mark(RenderDelta::Lines(start..start + len));
        let d = s.consume(&vp).unwrap();
        match d.effective {
            RenderDelta::Lines(r) => {
                prop_assert!(r.start >= vp.first_line && r.end <= vp.end());
                prop_assert!(r.len() < vp.height);
            }
            RenderDelta::Full | RenderDelta::StatusLine => {}
            other => prop_assert!(false, "unexpected {:?}", other),
        }
    }
}

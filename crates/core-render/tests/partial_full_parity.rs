//! Parity between partial repaint paths and a fresh full frame.
//!
//! After seeding a surface with a full frame, each scenario mutates the model,
//! runs the scheduler + engine through the partial path, and compares the
//! resulting grid with a full render of the same model on a blank surface.

use core_model::{EditorModel, Layout};
use core_render::{RenderDelta, RenderEngine, RenderScheduler, viewport_of};
use core_state::EditorState;
use core_terminal::MemorySurface;
use core_text::{Limits, LineStore, Position};

const W: u16 = 30;
const H: u16 = 6; // leaves 5 text rows

fn mk_model(lines: &[&str]) -> EditorModel {
    let store = LineStore::from_lines(Limits::default(), lines.iter().map(|l| l.as_bytes())).unwrap();
    EditorModel::with_layout(EditorState::new(store), Layout::new(W, H))
}

fn seeded(model: &EditorModel) -> (RenderEngine, MemorySurface) {
    let mut eng = RenderEngine::new();
    let mut surface = MemorySurface::new(W, H);
    eng.render_full(model, &mut surface).unwrap();
    surface.reset_counters();
    (eng, surface)
}

fn baseline(model: &EditorModel) -> MemorySurface {
    let mut s = MemorySurface::new(W, H);
    RenderEngine::new().render_full(model, &mut s).unwrap();
    s
}

fn run(eng: &mut RenderEngine, model: &EditorModel, surface: &mut MemorySurface, deltas: Vec<RenderDelta>) -> RenderDelta {
    let mut sched = RenderScheduler::new();
    for d in deltas {
        sched.mark(d);
    }
    let decision = sched.consume(&viewport_of(model)).unwrap();
    eng.render(&decision, model, surface).unwrap();
    decision.effective
}

#[test]
fn append_char_cell_parity() {
    let mut model = mk_model(&["ab", "cd"]);
    let (mut eng, mut surface) = seeded(&model);
    {
        let (state, view) = model.split_state_and_view();
        view.cursor = Position::new(0, 2);
        assert!(state.document_mut().insert_byte(&mut view.cursor, b'x'));
    }
    let eff = run(&mut eng, &model, &mut surface, vec![RenderDelta::Cell { row: 0, col: 2 }]);
    assert_eq!(eff, RenderDelta::Cell { row: 0, col: 2 });
    assert_eq!(surface.lines(), baseline(&model).lines());
    assert_eq!(surface.cursor(), (0, 3));
    assert_eq!(surface.counters().clears, 0);
}

#[test]
fn join_lines_parity() {
    let mut model = mk_model(&["one", "two", "three"]);
    let (mut eng, mut surface) = seeded(&model);
    {
        let (state, view) = model.split_state_and_view();
        view.cursor = Position::new(1, 0);
        state.document_mut().delete_byte_before(&mut view.cursor);
    }
    let eff = run(&mut eng, &model, &mut surface, vec![RenderDelta::Lines(0..3)]);
    assert_eq!(eff, RenderDelta::Lines(0..3));
    assert_eq!(surface.lines(), baseline(&model).lines());
    assert_eq!(surface.row_text(0), "onetwo");
    assert_eq!(surface.row_text(2), "~");
}

#[test]
fn status_only_parity_after_message() {
    let mut model = mk_model(&["x"]);
    let (mut eng, mut surface) = seeded(&model);
    model.state_mut().set_ephemeral("Saved 1 line(s)");
    let eff = run(&mut eng, &model, &mut surface, vec![RenderDelta::StatusLine, RenderDelta::CursorOnly]);
    assert_eq!(eff, RenderDelta::StatusLine);
    assert_eq!(surface.lines(), baseline(&model).lines());
    assert!(surface.row_text(H - 1).ends_with("| Saved 1 line(s)"));
}

#[test]
fn cursor_only_parity() {
    let mut model = mk_model(&["a", "b", "c"]);
    let (mut eng, mut surface) = seeded(&model);
    model.view_mut().cursor = Position::new(2, 1);
    let eff = run(&mut eng, &model, &mut surface, vec![RenderDelta::CursorOnly]);
    assert_eq!(eff, RenderDelta::CursorOnly);
    assert_eq!(surface.cursor(), (2, 1));
    assert_eq!(surface.counters().cells_written, 0);
    assert_eq!(eng.metrics_snapshot().cursor_only_frames, 1);
}

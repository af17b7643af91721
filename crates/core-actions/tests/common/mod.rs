#![allow(dead_code)] // Shared across several integration tests; each test binary uses a subset of helpers.

use core_actions::Repl;
use core_model::{EditorModel, Layout};
use core_state::EditorState;
use core_text::{Limits, LineStore};
use std::io::Cursor;

pub fn model_with(lines: &[&str]) -> EditorModel {
    model_with_limits(lines, Limits::default())
}

pub fn model_with_limits(lines: &[&str], limits: Limits) -> EditorModel {
    let store = LineStore::from_lines(limits, lines).unwrap();
    EditorModel::with_layout(EditorState::new(store), Layout::new(40, 6))
}

pub fn doc_lines(model: &EditorModel) -> Vec<String> {
    model
        .state()
        .document()
        .iter()
        .map(|l| String::from_utf8_lossy(l).into_owned())
        .collect()
}

/// Feed `input` to a fresh REPL over `model`; returns the final model and the
/// full transcript.
pub fn run_repl(model: EditorModel, input: &str) -> (EditorModel, String) {
    let mut repl = Repl::new(model, Cursor::new(input.as_bytes().to_vec()), Vec::new());
    repl.run().unwrap();
    let (model, out) = repl.into_parts();
    (model, String::from_utf8(out).unwrap())
}

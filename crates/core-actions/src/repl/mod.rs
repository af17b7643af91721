//! Line-numbered command loop.
//!
//! `Repl` owns the session model plus an input reader and an output writer, so
//! tests drive it with in-memory buffers and the binary with stdin/stdout. Each
//! iteration prints the `* ` prompt, reads a line, parses and executes it, and
//! (except for `Q` and blank lines) echoes the status line
//! `Lines: <n>  File: <name>`.
//!
//! Command failures print their one-line message and the loop continues; only
//! failures of the reader/writer themselves end the session with an error.

pub mod command_parser;
pub mod commands;

use crate::error::CommandError;
use crate::io_ops;
use command_parser::{CommandParser, ParsedCommand};
use commands::read_input_line;
use core_model::EditorModel;
use std::io::{BufRead, Write};
use std::path::Path;
use tracing::{debug, info, warn};

const HELP: &[&str] = &[
    "Commands:",
    "  L [a][,b]           list lines",
    "  I [n]               insert at n (end with a single '.')",
    "  D a[,b]             delete lines",
    "  E n                 edit (replace) line",
    "  R a[,b] /old/new/[g]  replace; 'g' = global per line",
    "  S [a][,b] /text/    search (case-insensitive)",
    "  O name              open (load) file",
    "  W [name]            write (save) file",
    "  V                   fullscreen visual editor mode",
    "  P                   print status",
    "  H or ?              help",
    "  Q                   quit",
];

/// Fullscreen editor the `V` command hands the session to.
///
/// Implementations take over the screen, edit `model` in place and restore the
/// terminal before returning.
pub trait VisualFrontEnd {
    fn run(&mut self, model: &mut EditorModel) -> anyhow::Result<()>;
}

/// Whether the loop keeps going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Repl<R, W> {
    model: EditorModel,
    input: R,
    out: W,
    visual: Option<Box<dyn VisualFrontEnd>>,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(model: EditorModel, input: R, out: W) -> Self {
        Self {
            model,
            input,
            out,
            visual: None,
        }
    }

    pub fn with_visual(mut self, visual: Box<dyn VisualFrontEnd>) -> Self {
        self.visual = Some(visual);
        self
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }

    pub fn into_parts(self) -> (EditorModel, W) {
        (self.model, self.out)
    }

    /// Load the file named on the command line. On failure the session starts
    /// empty but still adopts `path` as its file name.
    pub fn startup_load(&mut self, path: &Path) -> anyhow::Result<()> {
        let state = self.model.state_mut();
        if let Err(e) = io_ops::open_file(state, path) {
            warn!(target: "repl", path = %path.display(), error = %e, "startup_open_failed");
            state.set_file_name(path);
            writeln!(
                self.out,
                "! couldn't open '{}' (starting empty)",
                path.display()
            )?;
        }
        Ok(())
    }

    /// Run until `Q` or end of input.
    pub fn run(&mut self) -> anyhow::Result<()> {
        info!(target: "repl", lines = self.model.state().line_count(), "repl_start");
        self.print_status()?;
        loop {
            write!(self.out, "* ")?;
            self.out.flush()?;
            let Some(line) = read_input_line(&mut self.input)? else {
                info!(target: "repl", "end_of_input");
                return Ok(());
            };
            match self.execute_line(&line) {
                Ok(Some(Flow::Quit)) => {
                    info!(target: "repl", "quit");
                    return Ok(());
                }
                Ok(Some(Flow::Continue)) => self.print_status()?,
                Ok(None) => {}
                Err(e) if e.is_fatal() => return Err(e.into()),
                Err(e) => {
                    debug!(target: "repl", error = %e, "command_failed");
                    writeln!(self.out, "{e}")?;
                    self.print_status()?;
                }
            }
        }
    }

    /// Parse and execute one input line. `Ok(None)` for a blank line.
    pub fn execute_line(&mut self, line: &[u8]) -> Result<Option<Flow>, CommandError> {
        let Some(parsed) = CommandParser::parse(line) else {
            return Ok(None);
        };
        let cmd = parsed?;
        debug!(target: "repl", ?cmd, "command");
        self.execute(cmd).map(Some)
    }

    fn execute(&mut self, cmd: ParsedCommand) -> Result<Flow, CommandError> {
        let state = self.model.state_mut();
        match cmd {
            ParsedCommand::List(spec) => commands::list(state, spec, &mut self.out)?,
            ParsedCommand::Insert(at) => {
                commands::insert(state, at, &mut self.input, &mut self.out)?
            }
            ParsedCommand::Delete(spec) => commands::delete(state, spec)?,
            ParsedCommand::Edit(n) => commands::edit(state, n, &mut self.input, &mut self.out)?,
            ParsedCommand::Replace {
                range,
                old,
                new,
                global,
            } => commands::replace(state, range, &old, &new, global, &mut self.out)?,
            ParsedCommand::Search { range, pattern } => {
                commands::search(state, range, &pattern, &mut self.out)?
            }
            ParsedCommand::Open(path) => {
                let report = io_ops::open_file(state, &path)?;
                writeln!(self.out, "-- loaded {} line(s)", report.lines)?;
                if report.truncated_lines > 0 {
                    writeln!(self.out, "-- {} long line(s) truncated", report.truncated_lines)?;
                }
                if report.dropped_lines > 0 {
                    writeln!(self.out, "-- {} line(s) past capacity dropped", report.dropped_lines)?;
                }
            }
            ParsedCommand::Write(target) => {
                let (count, path) = io_ops::write_file(state, target.as_deref())?;
                writeln!(self.out, "-- wrote {count} line(s) to {}", path.display())?;
            }
            ParsedCommand::Visual => self.visual()?,
            ParsedCommand::Print => self.print_status()?,
            ParsedCommand::Help => {
                for line in HELP {
                    writeln!(self.out, "{line}")?;
                }
            }
            ParsedCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn visual(&mut self) -> Result<(), CommandError> {
        let Some(front_end) = self.visual.as_mut() else {
            return Err(CommandError::VisualUnavailable);
        };
        self.out.flush()?;
        if let Err(e) = front_end.run(&mut self.model) {
            warn!(target: "repl", error = %e, "visual_failed");
            writeln!(self.out, "! visual mode failed: {e}")?;
        }
        Ok(())
    }

    fn print_status(&mut self) -> std::io::Result<()> {
        let state = self.model.state();
        writeln!(
            self.out,
            "Lines: {}  File: {}",
            state.line_count(),
            state.file_label()
        )
    }
}

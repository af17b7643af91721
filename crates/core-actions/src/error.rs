use core_text::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Which command's substitution/search syntax was malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubstKind {
    Replace,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOp {
    Open,
    Write,
}

/// Failures of a single REPL command. `Display` is the one-line message the
/// REPL prints; the loop keeps going after every variant except `Stream`.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("! {0}")]
    Store(#[from] StoreError),
    #[error("! bad range")]
    MalformedRange(String),
    #[error("{}", subst_usage(.0))]
    MalformedSubstitution(SubstKind),
    #[error("! bad line")]
    OutOfRangeLine(i64),
    #[error("! need {0}")]
    MissingArgument(&'static str),
    #[error("! W needs filename (no current file)")]
    NoFileName,
    #[error("{}", io_message(.op))]
    Io {
        op: IoOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("! visual mode unavailable")]
    VisualUnavailable,
    #[error("?")]
    Unknown,
    /// The REPL's own input or output failed; terminal for the session.
    #[error("! i/o error: {0}")]
    Stream(#[from] std::io::Error),
}

fn subst_usage(kind: &SubstKind) -> &'static str {
    match kind {
        SubstKind::Replace => "! syntax: R a,b /old/new/[g]",
        SubstKind::Search => "! syntax: S a,b /text/",
    }
}

fn io_message(op: &IoOp) -> &'static str {
    match op {
        IoOp::Open => "! open failed",
        IoOp::Write => "! write failed",
    }
}

impl CommandError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, CommandError::Stream(_))
    }
}

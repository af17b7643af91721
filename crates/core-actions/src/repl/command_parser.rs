//! REPL command line parsing.
//!
//! A command is one letter (case-insensitive) followed by optional
//! whitespace and an argument. Parsing is pure: it classifies the line into a
//! `ParsedCommand` and never looks at the document, so range resolution is
//! deferred to execution time.
//!
//! Argument rules:
//! * `L [range]`, `D [range]`: address text (see `range::parse_range`).
//! * `I [n]`: `n` read with `atoi`; absent means "append".
//! * `E n`: argument required.
//! * `R [range] /old/new/[g]`: the text before the first `/` is the range.
//! * `S [range] /text/`: as `R`; without any `/` the whole argument is the
//!   pattern and the range is the whole document.
//! * `O name`, `W [name]`: the rest of the line is the file name.

use crate::error::{CommandError, SubstKind};
use crate::range::{RangeSpec, atoi, parse_range};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    List(RangeSpec),
    Insert(Option<i64>),
    Delete(RangeSpec),
    Edit(i64),
    Replace {
        range: RangeSpec,
        old: Vec<u8>,
        new: Vec<u8>,
        global: bool,
    },
    Search {
        range: RangeSpec,
        pattern: Vec<u8>,
    },
    Open(PathBuf),
    Write(Option<PathBuf>),
    Visual,
    Print,
    Help,
    Quit,
}

pub struct CommandParser;

impl CommandParser {
    /// Classify one input line (terminator already stripped).
    ///
    /// Returns `None` for a blank line, which the REPL skips silently.
    pub fn parse(line: &[u8]) -> Option<Result<ParsedCommand, CommandError>> {
        let body = trim_start(line);
        let (&letter, rest) = body.split_first()?;
        let arg = trim_start(rest);
        Some(Self::classify(letter.to_ascii_uppercase(), arg))
    }

    fn classify(letter: u8, arg: &[u8]) -> Result<ParsedCommand, CommandError> {
        match letter {
            b'L' => parse_range(arg).map(ParsedCommand::List),
            b'I' => Ok(ParsedCommand::Insert((!arg.is_empty()).then(|| atoi(arg)))),
            b'D' => parse_range(arg)
                .map(ParsedCommand::Delete)
                .map_err(|_| CommandError::MissingArgument("D a[,b]")),
            b'E' if arg.is_empty() => Err(CommandError::MissingArgument("E n")),
            b'E' => Ok(ParsedCommand::Edit(atoi(arg))),
            b'R' => parse_replace(arg),
            b'S' => parse_search(arg),
            b'O' if arg.is_empty() => Err(CommandError::MissingArgument("filename")),
            b'O' => Ok(ParsedCommand::Open(path_from(arg))),
            b'W' => Ok(ParsedCommand::Write((!arg.is_empty()).then(|| path_from(arg)))),
            b'V' => Ok(ParsedCommand::Visual),
            b'P' => Ok(ParsedCommand::Print),
            b'H' | b'?' => Ok(ParsedCommand::Help),
            b'Q' => Ok(ParsedCommand::Quit),
            _ => Err(CommandError::Unknown),
        }
    }
}

fn trim_start(text: &[u8]) -> &[u8] {
    let start = text
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(text.len());
    &text[start..]
}

fn path_from(arg: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(arg).into_owned())
}

/// Split `arg` at its first `/`: the prefix (if any) is the range, the slice
/// starting at the `/` is the pattern part. `None` when there is no `/`.
fn split_range_prefix(arg: &[u8]) -> Option<Result<(RangeSpec, &[u8]), CommandError>> {
    let slash = arg.iter().position(|b| *b == b'/')?;
    let prefix = &arg[..slash];
    let range = if prefix.is_empty() {
        Ok(RangeSpec::Whole)
    } else {
        parse_range(prefix)
    };
    Some(range.map(|r| (r, &arg[slash..])))
}

/// Text between a leading `/` and the next `/`, plus what follows it.
fn between_slashes(text: &[u8]) -> Option<(&[u8], &[u8])> {
    let body = text.strip_prefix(b"/")?;
    let end = body.iter().position(|b| *b == b'/')?;
    Some((&body[..end], &body[end + 1..]))
}

fn parse_replace(arg: &[u8]) -> Result<ParsedCommand, CommandError> {
    let malformed = || CommandError::MalformedSubstitution(SubstKind::Replace);
    let (range, spec) = split_range_prefix(arg).ok_or_else(malformed)??;
    let (old, after_old) = between_slashes(spec).ok_or_else(malformed)?;
    // `old` and `new` share the middle delimiter: /old/new/
    let end = after_old
        .iter()
        .position(|b| *b == b'/')
        .ok_or_else(malformed)?;
    let new = &after_old[..end];
    let flag = trim_start(&after_old[end + 1..]);
    let global = matches!(flag.first(), Some(b'g' | b'G'));
    Ok(ParsedCommand::Replace {
        range,
        old: old.to_vec(),
        new: new.to_vec(),
        global,
    })
}

fn parse_search(arg: &[u8]) -> Result<ParsedCommand, CommandError> {
    let Some(split) = split_range_prefix(arg) else {
        return Ok(ParsedCommand::Search {
            range: RangeSpec::Whole,
            pattern: arg.to_vec(),
        });
    };
    let (range, spec) = split?;
    let (pattern, _) = between_slashes(spec)
        .ok_or(CommandError::MalformedSubstitution(SubstKind::Search))?;
    Ok(ParsedCommand::Search {
        range,
        pattern: pattern.to_vec(),
    })
}

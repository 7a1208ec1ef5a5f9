//! Line editor abstraction for the REPL.
//!
//! This module provides a trait-based abstraction over line editing libraries,
//! allowing the REPL to use rustyline while remaining swappable.

use crate::command::COMMANDS;
use crate::highlight::ValspecHighlighter;
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Hinter, Validator};
use std::borrow::Cow;
use valspec_foundation::{Error, ErrorKind, Result};

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
///
/// This trait allows swapping out the underlying line editor implementation
/// (e.g., from rustyline to reedline) without changing the REPL code.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);

    /// Set the parameter names offered as argument completions.
    fn set_parameters(&mut self, names: Vec<String>);
}

/// Helper for rustyline that provides completion, hints and highlighting.
#[derive(Helper, Completer, Hinter, Validator)]
struct ValspecHelper {
    #[rustyline(Completer)]
    completer: ValspecCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
    highlighter: ValspecHighlighter,
}

impl Highlighter for ValspecHelper {
    fn highlight<'l>(&self, line: &'l str, pos: usize) -> Cow<'l, str> {
        self.highlighter.highlight(line, pos)
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

/// Completes command words, parameter names, and file paths for
/// `:save`/`:load`.
struct ValspecCompleter {
    file_completer: FilenameCompleter,
    parameters: Vec<String>,
}

impl ValspecCompleter {
    fn new() -> Self {
        Self {
            file_completer: FilenameCompleter::new(),
            parameters: Vec::new(),
        }
    }

    /// Returns completions for `word`, the word ending at the cursor, given
    /// the text before it.
    fn candidates(&self, before: &str, word: &str) -> Vec<String> {
        let mut words = before.split_whitespace();
        match words.next() {
            // First word: a command.
            None => COMMANDS
                .iter()
                .map(|c| c.name)
                .filter(|name| name.starts_with(word))
                .map(str::to_string)
                .collect(),
            // Second word of a command that takes a parameter name.
            Some(":set" | ":toggle" | ":reset" | ":show") if words.next().is_none() => self
                .parameters
                .iter()
                .filter(|name| name.starts_with(word))
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }
}

impl Completer for ValspecCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let start = line[..pos]
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + 1);
        let before = &line[..start];

        if matches!(before.split_whitespace().next(), Some(":save" | ":load")) {
            return self.file_completer.complete(line, pos, ctx);
        }

        let candidates = self
            .candidates(before, &line[start..pos])
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, candidates))
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ValspecHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails.
    pub fn new() -> Result<Self> {
        let internal = |e: rustyline::error::ReadlineError| {
            Error::new(ErrorKind::Internal(e.to_string()))
        };
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(1000)
            .map_err(internal)?
            .build();

        let helper = ValspecHelper {
            completer: ValspecCompleter::new(),
            hinter: HistoryHinter::new(),
            highlighter: ValspecHighlighter::new(),
        };

        let mut editor = Editor::with_config(config).map_err(internal)?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Internal(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }

    fn set_parameters(&mut self, names: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.completer.parameters = names;
        }
    }
}

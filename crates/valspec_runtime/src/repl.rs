//! The main REPL implementation.

use crate::command::{COMMANDS, Command};
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::serialize;
use crate::session::Session;
use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use valspec_foundation::{Error, ErrorContext, ErrorKind, Result, format_number};

/// What a line asked the loop to do next.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Print this output, if any, and continue.
    Continue(Option<String>),
    /// Leave the loop.
    Quit,
}

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state (enumerations, parameters).
    session: Session,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new() -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E) -> Self {
        Self {
            editor,
            session: Session::new(),
            show_banner: true,
            prompt: "valspec> ".to_string(),
        }
    }

    /// Sets the session for this REPL.
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self.sync_completions();
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the REPL loop.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails fatally.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        if input.trim().is_empty() {
            return Ok(true);
        }
        self.editor.add_history(&input);

        match self.execute(&input) {
            Ok(Outcome::Continue(Some(output))) => println!("{}", format_output(&output)),
            Ok(Outcome::Continue(None)) => {}
            Ok(Outcome::Quit) => return Ok(false),
            Err(e) => print_error(&e),
        }
        Ok(true)
    }

    /// Executes one line and returns what it printed.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not parse or the command fails.
    pub fn execute(&mut self, line: &str) -> Result<Outcome> {
        let Some(command) = Command::parse(line)? else {
            return Ok(Outcome::Continue(None));
        };
        tracing::debug!(?command, "executing command");

        let output = match command {
            Command::Enum { path, members } => {
                let enumeration = self.session.define_enum(&path, members)?;
                Some(format!(
                    "{} = {}",
                    enumeration.name(),
                    enumeration.members.join(", ")
                ))
            }
            Command::Param {
                name,
                ty,
                multiplicity,
            } => {
                let ty = self.session.resolve_type(&ty)?;
                self.session.declare(&name, ty, multiplicity)?;
                self.sync_completions();
                Some(self.show(&name)?)
            }
            Command::Set { name, text } => {
                self.session.edit(&name, &text)?;
                Some(self.show(&name)?)
            }
            Command::Toggle(name) => {
                self.session.toggle(&name)?;
                Some(self.show(&name)?)
            }
            Command::Reset(name) => {
                self.session.reset(&name)?;
                Some(self.show(&name)?)
            }
            Command::Show(Some(name)) => Some(self.show(&name)?),
            Command::Show(None) => Some(self.show_all()?),
            Command::Eval(source) => Some(format_number(valspec_expr::evaluate(&source)?)),
            Command::Save(path) => {
                let path = self.session.resolve_path(&path);
                serialize::save_to_file(&self.session, &path)?;
                Some(format!("saved {}", path.display()))
            }
            Command::Load(path) => {
                let path = self.session.resolve_path(&path);
                let mut loaded = serialize::load_from_file(&path)?;
                loaded.set_config(self.session.config().clone());
                loaded.set_load_path(self.session.load_path().clone());
                self.session = loaded;
                self.sync_completions();
                Some(format!("loaded {}", path.display()))
            }
            Command::Help => Some(help_text()),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Continue(output))
    }

    /// Formats one parameter as `name: Type[mult] = summary  (value)`.
    fn show(&self, name: &str) -> Result<String> {
        let parameter = self.session.parameter(name)?;
        let kind = self.session.kind(name)?;
        let summary = self.session.render(name)?;
        let mut line = format!(
            "{}: {}{} = {summary}",
            parameter.name, parameter.ty, parameter.multiplicity
        );
        if kind.is_read_only() {
            line.push_str("  (read-only)");
        }
        let _ = write!(line, "  [{}]", parameter.value);
        Ok(line)
    }

    fn show_all(&self) -> Result<String> {
        let names: Vec<_> = self.session.parameters().map(|p| p.name.clone()).collect();
        if names.is_empty() {
            return Ok("no parameters".to_string());
        }
        let lines = names
            .iter()
            .map(|name| self.show(name))
            .collect::<Result<Vec<_>>>()?;
        Ok(lines.join("\n"))
    }

    fn sync_completions(&mut self) {
        let names = self.session.parameters().map(|p| p.name.clone()).collect();
        self.editor.set_parameters(names);
    }

    /// Executes a command script, printing each output line.
    ///
    /// Relative `:save`/`:load` paths resolve against the script's
    /// directory. Stops at the first failing line or `:quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line fails; the
    /// error carries the file and line number.
    pub fn eval_file(&mut self, path: &Path) -> Result<()> {
        let source = fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to read {}: {e}",
                path.display()
            )))
        })?;

        // Set load path to file's directory
        if let Some(parent) = path.parent() {
            self.session.set_load_path(parent.to_path_buf());
        }

        for (index, line) in source.lines().enumerate() {
            let outcome = self.execute(line).map_err(|e| {
                e.with_context(
                    ErrorContext::new()
                        .with_source(path.display().to_string())
                        .with_line(index + 1),
                )
            })?;
            match outcome {
                Outcome::Continue(Some(output)) => println!("{output}"),
                Outcome::Continue(None) => {}
                Outcome::Quit => break,
            }
        }
        Ok(())
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36mvalspec\x1b[0m v{}", env!("CARGO_PKG_VERSION"));
        println!("Declare parameters with :param, edit them with :set. Type :help for commands.");
        println!("Use Ctrl+D to exit.\n");

        // Flush to ensure banner appears
        let _ = io::stdout().flush();
    }
}

/// Builds the `:help` listing.
#[must_use]
pub fn help_text() -> String {
    let width = COMMANDS
        .iter()
        .map(|c| c.name.len() + c.usage.len() + 1)
        .max()
        .unwrap_or(0);
    let mut text = String::from("Commands:");
    for command in COMMANDS {
        let head = format!("{} {}", command.name, command.usage);
        let _ = write!(text, "\n  {head:<width$}  {}", command.summary);
    }
    text.push_str("\nLines starting with # are comments.");
    text
}

/// Formats output for display.
fn format_output(output: &str) -> String {
    format!("\x1b[1m{output}\x1b[0m")
}

/// Prints an error to stderr.
fn print_error(error: &Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}

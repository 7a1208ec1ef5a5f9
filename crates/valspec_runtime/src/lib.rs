//! Parameter sessions, REPL, CLI, and serialization for valspec.
//!
//! This crate provides:
//! - [`Session`] - Declared enumerations and parameters, edited through the
//!   editor each value dispatches to
//! - [`Repl`] - Interactive read-eval-print loop over `:` commands
//! - Session serialization and deserialization

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod editor;
pub mod gesture;
pub mod highlight;
pub mod repl;
pub mod serialize;
pub mod session;

pub use command::{COMMANDS, Command, CommandInfo};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use gesture::apply_text;
pub use repl::{Outcome, Repl};
pub use serialize::{from_bytes, load_from_file, save_to_file, to_bytes};
pub use session::{Parameter, Session, default_value};

//! Integration tests for Layer 4: Runtime
//!
//! Tests the parameter session, command scripts, and saved sessions.

mod session;

use std::path::PathBuf;

use valspec_foundation::Result;
use valspec_runtime::{LineEditor, ReadResult, Repl};

/// Line editor that replays fixed input, then reports end of input.
pub struct ScriptedInput {
    lines: std::vec::IntoIter<String>,
}

impl ScriptedInput {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(|l| (*l).to_string())
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineEditor for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self.lines.next().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}

    fn set_parameters(&mut self, _names: Vec<String>) {}
}

pub fn repl() -> Repl<ScriptedInput> {
    Repl::with_editor(ScriptedInput::new(&[])).without_banner()
}

/// A fresh scratch directory for one test.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("valspec_{name}_{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

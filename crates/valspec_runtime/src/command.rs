//! REPL command syntax.
//!
//! Commands start with `:`. Any other non-blank line is an arithmetic
//! expression to evaluate, and lines starting with `#` are comments.

use valspec_codec::tokenize;
use valspec_foundation::{Error, Multiplicity, Result};

/// Name, usage and summary of a command, for help and completion.
#[derive(Clone, Copy, Debug)]
pub struct CommandInfo {
    /// Command word including the leading colon.
    pub name: &'static str,
    /// Arguments after the command word.
    pub usage: &'static str,
    /// One-line description.
    pub summary: &'static str,
}

/// All commands, in help order.
pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: ":enum",
        usage: "<path> <member,member,...>",
        summary: "declare an enumeration",
    },
    CommandInfo {
        name: ":param",
        usage: "<name> <type> [multiplicity]",
        summary: "declare a parameter, e.g. `:param ids Integer [*]`",
    },
    CommandInfo {
        name: ":set",
        usage: "<name> <text>",
        summary: "edit a parameter as if typing into its editor",
    },
    CommandInfo {
        name: ":toggle",
        usage: "<name>",
        summary: "flip a Boolean parameter",
    },
    CommandInfo {
        name: ":reset",
        usage: "<name>",
        summary: "restore a parameter's default",
    },
    CommandInfo {
        name: ":show",
        usage: "[name]",
        summary: "show one or all parameters",
    },
    CommandInfo {
        name: ":eval",
        usage: "<expression>",
        summary: "evaluate arithmetic (also the default for bare input)",
    },
    CommandInfo {
        name: ":save",
        usage: "<path>",
        summary: "save the session",
    },
    CommandInfo {
        name: ":load",
        usage: "<path>",
        summary: "load a saved session",
    },
    CommandInfo {
        name: ":help",
        usage: "",
        summary: "show this help",
    },
    CommandInfo {
        name: ":quit",
        usage: "",
        summary: "exit",
    },
];

/// Returns true if `word` is a command name.
#[must_use]
pub fn is_command(word: &str) -> bool {
    COMMANDS.iter().any(|c| c.name == word)
}

/// A parsed REPL line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// `:enum`
    Enum {
        /// Enumeration path.
        path: String,
        /// Member names.
        members: Vec<String>,
    },
    /// `:param`
    Param {
        /// Parameter name.
        name: String,
        /// Type name, resolved against the session.
        ty: String,
        /// Declared multiplicity.
        multiplicity: Multiplicity,
    },
    /// `:set`
    Set {
        /// Parameter name.
        name: String,
        /// Text applied to the editor.
        text: String,
    },
    /// `:toggle`
    Toggle(String),
    /// `:reset`
    Reset(String),
    /// `:show`
    Show(Option<String>),
    /// `:eval` or a bare expression.
    Eval(String),
    /// `:save`
    Save(String),
    /// `:load`
    Load(String),
    /// `:help`
    Help,
    /// `:quit`
    Quit,
}

impl Command {
    /// Parses one line. Blank lines and comments yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` for an unknown command or missing arguments.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }
        if !line.starts_with(':') {
            return Ok(Some(Self::Eval(line.to_string())));
        }

        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));
        let usage = || {
            let info = COMMANDS.iter().find(|c| c.name == word);
            Error::unsupported(format!(
                "usage: {word} {}",
                info.map_or("", |c| c.usage)
            ))
        };

        let command = match word {
            ":enum" => {
                let (path, members) = rest.split_once(char::is_whitespace).ok_or_else(usage)?;
                let members = tokenize(members)
                    .ok_or_else(usage)?
                    .into_iter()
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .collect();
                Self::Enum {
                    path: path.to_string(),
                    members,
                }
            }
            ":param" => {
                let mut parts = rest.split_whitespace();
                let (Some(name), Some(ty)) = (parts.next(), parts.next()) else {
                    return Err(usage());
                };
                let multiplicity = match parts.next() {
                    Some(text) => parse_multiplicity(text).ok_or_else(usage)?,
                    None => Multiplicity::ONE,
                };
                if parts.next().is_some() {
                    return Err(usage());
                }
                Self::Param {
                    name: name.to_string(),
                    ty: ty.to_string(),
                    multiplicity,
                }
            }
            ":set" => {
                let (name, text) = rest
                    .split_once(char::is_whitespace)
                    .map_or((rest, ""), |(n, t)| (n, t.trim()));
                if name.is_empty() {
                    return Err(usage());
                }
                Self::Set {
                    name: name.to_string(),
                    text: text.to_string(),
                }
            }
            ":toggle" => Self::Toggle(single(rest).ok_or_else(usage)?),
            ":reset" => Self::Reset(single(rest).ok_or_else(usage)?),
            ":show" => Self::Show((!rest.is_empty()).then(|| rest.to_string())),
            ":eval" if !rest.is_empty() => Self::Eval(rest.to_string()),
            ":save" if !rest.is_empty() => Self::Save(rest.to_string()),
            ":load" if !rest.is_empty() => Self::Load(rest.to_string()),
            ":help" => Self::Help,
            ":quit" | ":q" => Self::Quit,
            _ if is_command(word) => return Err(usage()),
            _ => return Err(Error::unsupported(format!("unknown command {word}"))),
        };
        Ok(Some(command))
    }
}

fn single(rest: &str) -> Option<String> {
    let mut parts = rest.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some(name), None) => Some(name.to_string()),
        _ => None,
    }
}

/// Accepts `[0..*]` as well as the unbracketed `0..*`, `*` and `1`.
fn parse_multiplicity(text: &str) -> Option<Multiplicity> {
    if text.starts_with('[') {
        Multiplicity::parse(text)
    } else {
        Multiplicity::parse(&format!("[{text}]"))
    }
}

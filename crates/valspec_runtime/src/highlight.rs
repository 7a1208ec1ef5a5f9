//! Syntax highlighting for the REPL.

use std::borrow::Cow;

use crate::command::is_command;

const RESET: &str = "\x1b[0m";
const COMMAND: &str = "\x1b[1;36m"; // bold cyan
const UNKNOWN: &str = "\x1b[31m"; // red
const COMMENT: &str = "\x1b[2;3m"; // dim italic
const STRING: &str = "\x1b[33m"; // yellow
const NUMBER: &str = "\x1b[35m"; // magenta
const LITERAL: &str = "\x1b[34m"; // blue

/// Highlighter for REPL command lines.
pub struct ValspecHighlighter;

impl ValspecHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Highlight a line of input.
    ///
    /// Known command words are bold, unknown ones red. In the arguments,
    /// quoted CSV fields, numbers and boolean words are colored.
    #[allow(clippy::unused_self)]
    pub fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let body = line.trim_start();
        let indent = &line[..line.len() - body.len()];

        if body.starts_with('#') {
            return Cow::Owned(format!("{indent}{COMMENT}{body}{RESET}"));
        }

        let mut result = String::with_capacity(line.len() * 2);
        result.push_str(indent);

        let rest = if body.starts_with(':') {
            let end = body.find(char::is_whitespace).unwrap_or(body.len());
            let (word, rest) = body.split_at(end);
            let color = if is_command(word) || word == ":q" {
                COMMAND
            } else {
                UNKNOWN
            };
            result.push_str(color);
            result.push_str(word);
            result.push_str(RESET);
            rest
        } else {
            body
        };

        highlight_arguments(rest, &mut result);
        Cow::Owned(result)
    }
}

impl Default for ValspecHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

fn highlight_arguments(text: &str, result: &mut String) {
    let mut chars = text.char_indices().peekable();
    let mut in_string = false;

    while let Some((i, c)) = chars.next() {
        match c {
            '"' if in_string => {
                // A doubled quote is an escaped quote inside the field.
                if chars.peek().is_some_and(|&(_, next)| next == '"') {
                    result.push(c);
                    if let Some((_, next)) = chars.next() {
                        result.push(next);
                    }
                } else {
                    result.push(c);
                    result.push_str(RESET);
                    in_string = false;
                }
            }
            '"' => {
                result.push_str(STRING);
                result.push(c);
                in_string = true;
            }
            _ if in_string => result.push(c),

            c if c.is_ascii_digit() => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, next)) = chars.peek() {
                    if next.is_ascii_digit() || next == '.' || next == '_' {
                        end = j + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                result.push_str(NUMBER);
                result.push_str(&text[i..end]);
                result.push_str(RESET);
            }

            c if c.is_alphabetic() => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' || next == ':' {
                        end = j + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let word = &text[i..end];
                if matches!(word, "true" | "false" | "latest") {
                    result.push_str(LITERAL);
                    result.push_str(word);
                    result.push_str(RESET);
                } else {
                    result.push_str(word);
                }
            }

            _ => result.push(c),
        }
    }

    if in_string {
        result.push_str(RESET);
    }
}

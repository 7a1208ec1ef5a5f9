//! Error types for the valspec system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::Type;

/// Result alias used throughout valspec.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for valspec operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Type, actual: Type) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an unknown type name error.
    #[must_use]
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownType(name.into()))
    }

    /// Creates an unknown enumeration member error.
    #[must_use]
    pub fn unknown_member(enumeration: impl Into<String>, member: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownMember {
            enumeration: enumeration.into(),
            member: member.into(),
        })
    }

    /// Creates an unknown parameter error.
    #[must_use]
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownParameter(name.into()))
    }

    /// Creates an expression evaluation error.
    #[must_use]
    pub fn expression(message: impl Into<String>, column: u32) -> Self {
        Self::new(ErrorKind::Expression {
            message: message.into(),
            column,
        })
    }

    /// Creates an error for text that is not a valid value of `expected`.
    #[must_use]
    pub fn invalid_value(expected: Type, text: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidValue {
            expected,
            text: text.into(),
        })
    }

    /// Creates an unsupported value error.
    #[must_use]
    pub fn unsupported(description: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unsupported(description.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value does not have the type its editor expects.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected type.
        expected: Type,
        /// The actual type encountered.
        actual: Type,
    },

    /// A type name could not be resolved.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// An enumeration has no member with the given name.
    #[error("unknown member {member} of enumeration {enumeration}")]
    UnknownMember {
        /// Path of the enumeration.
        enumeration: String,
        /// The member name that was looked up.
        member: String,
    },

    /// A named parameter does not exist.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// Numeric expression could not be parsed or evaluated.
    #[error("expression error at column {column}: {message}")]
    Expression {
        /// Description of the failure.
        message: String,
        /// Column number (1-indexed).
        column: u32,
    },

    /// Text could not be accepted as a value of the expected type.
    #[error("invalid {expected} value: {text:?}")]
    InvalidValue {
        /// The type the text was checked against.
        expected: Type,
        /// The rejected text.
        text: String,
    },

    /// The value/type combination has no editor.
    #[error("unsupported value: {0}")]
    Unsupported(String),

    /// Session could not be serialized or deserialized.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File system failure.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Parameter or file the error relates to.
    pub source: Option<String>,
    /// Line number in a command script.
    pub line: Option<usize>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        } else if let Some(line) = self.line {
            write!(f, "at line {line}")?;
        }
        Ok(())
    }
}

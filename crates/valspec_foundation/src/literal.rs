//! Raw literal values carried by primitive instance values.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::PrimitiveType;

/// A raw literal value.
///
/// Dates keep their validated textual form, since relative markers such as
/// `%2024-01-01T00:00:00` are legal date-time values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// Text.
    String(String),
    /// Boolean.
    Boolean(bool),
    /// Whole number.
    Integer(i64),
    /// Floating point number.
    Number(f64),
    /// Date or date-time text.
    Date(String),
}

impl Literal {
    /// Builds the numeric literal appropriate for `ty`.
    ///
    /// Integer targets truncate toward zero; every other target keeps the
    /// float. Returns `None` when the number does not fit an `i64`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn number_for(ty: PrimitiveType, n: f64) -> Option<Self> {
        if ty == PrimitiveType::Integer {
            let truncated = n.trunc();
            // i64::MAX as f64 rounds up to 2^63, which is out of range
            #[allow(clippy::cast_precision_loss)]
            let in_range = truncated >= i64::MIN as f64 && truncated < i64::MAX as f64;
            in_range.then(|| Self::Integer(truncated as i64))
        } else {
            Some(Self::Number(n))
        }
    }

    /// Returns the numeric value, converting integers to floats.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean value.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the text of a string or date literal.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Date(s) => Some(s),
            _ => None,
        }
    }

    /// Reduces the literal to the scalar text shown to users.
    #[must_use]
    pub fn scalar_text(&self) -> String {
        match self {
            Self::String(s) | Self::Date(s) => s.clone(),
            Self::Boolean(b) => b.to_string(),
            Self::Integer(n) => n.to_string(),
            Self::Number(n) => format_number(*n),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.scalar_text())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Literal {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Literal {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Literal {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// Formats a float in its shortest round-trip form (`1`, `1.5`, `-0.25`).
#[must_use]
pub fn format_number(n: f64) -> String {
    // Avoid printing "-0"
    if n == 0.0 {
        return "0".to_string();
    }
    n.to_string()
}

/// Parses a numeric literal.
///
/// Accepts a trimmed, non-empty, optionally signed decimal with optional
/// fraction and exponent. Rejects anything that is not a finite number,
/// including `inf` and `NaN` spellings.
#[must_use]
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty()
        || !text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-'))
        || !text.chars().any(|c| c.is_ascii_digit())
    {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

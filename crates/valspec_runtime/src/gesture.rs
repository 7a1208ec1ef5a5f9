//! Replaying typed text as editor gestures.
//!
//! The REPL has no widgets, so `:set name text` is turned into what a user
//! would do in the matching editor: type into a text field and commit, flip a
//! toggle, pick a dropdown entry, or choose a relative date.

use std::sync::{Arc, LazyLock};

use valspec_codec::date::{is_date, is_strict_date};
use valspec_editor::{DateEditor, DateFunction, Editor, EditorHost};
use valspec_foundation::{
    EnumValueInstanceValue, Enumeration, Error, Literal, PrimitiveInstanceValue, PrimitiveType,
    Result, SimpleFunctionExpression, ValueSpecification, parse_number,
};

/// Days accepted by the weekday date functions.
pub static DAY_OF_WEEK: LazyLock<Arc<Enumeration>> = LazyLock::new(|| {
    Arc::new(Enumeration::new(
        "meta::pure::functions::date::DayOfWeek",
        [
            "Monday",
            "Tuesday",
            "Wednesday",
            "Thursday",
            "Friday",
            "Saturday",
            "Sunday",
        ],
    ))
});

/// Units accepted by `adjust`.
pub static DURATION_UNIT: LazyLock<Arc<Enumeration>> = LazyLock::new(|| {
    Arc::new(Enumeration::new(
        "meta::pure::functions::date::DurationUnit",
        [
            "YEARS",
            "MONTHS",
            "WEEKS",
            "DAYS",
            "HOURS",
            "MINUTES",
            "SECONDS",
            "MILLISECONDS",
        ],
    ))
});

/// Applies `text` to `editor` as the gesture its family understands.
///
/// # Errors
///
/// Returns an error for text the editor rejects (an unknown enum member, an
/// invalid date, a non-boolean) and for read-only editors. Number and
/// collection fields never fail: bad input is dropped or reverted.
pub fn apply_text(editor: &mut Editor, text: &str, host: &mut dyn EditorHost) -> Result<()> {
    match editor {
        Editor::String(e) => e.input(text, host),
        Editor::Boolean(e) => {
            if e.checked() != parse_bool(text)? {
                e.toggle(host);
            }
        }
        Editor::Number(e) => {
            e.input(text, host);
            e.commit(host);
        }
        Editor::Date(e) => apply_date(e, text, host)?,
        Editor::Enum(e) => e.select(text.trim(), host)?,
        Editor::Collection(e) => {
            e.begin_edit();
            e.input(text);
            e.commit(host);
        }
        Editor::EnumCollection(e) => {
            e.paste(text);
            e.commit(host);
        }
        Editor::Variable(_) | Editor::Unsupported(_) => {
            return Err(Error::unsupported(format!(
                "{} values are read-only",
                editor.summary()
            )));
        }
    }
    Ok(())
}

fn parse_bool(text: &str) -> Result<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(Error::invalid_value(PrimitiveType::Boolean.into(), text)),
    }
}

fn apply_date(editor: &mut DateEditor, text: &str, host: &mut dyn EditorHost) -> Result<()> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("latest") {
        return editor.set_latest(host);
    }
    match parse_relative(trimmed)? {
        Some(expression) => {
            let function = DateFunction::of(&expression)
                .ok_or_else(|| Error::invalid_value(PrimitiveType::Date.into(), trimmed))?;
            editor.set_relative(function, expression.parameters, host)
        }
        None => editor.set_absolute(trimmed, host),
    }
}

/// Parses `today()`, `previousDayOfWeek(Friday)` or
/// `adjust(today(), -1, DAYS)`. Returns `None` when `text` does not start
/// with a date function name, so it can be tried as an absolute date.
fn parse_relative(text: &str) -> Result<Option<SimpleFunctionExpression>> {
    let invalid = || Error::invalid_value(PrimitiveType::Date.into(), text);

    let (name, args) = match text.split_once('(') {
        Some((name, rest)) => (name.trim(), Some(rest.strip_suffix(')').ok_or_else(invalid)?)),
        None => (text, None),
    };
    let Some(function) = DateFunction::from_name(name) else {
        return Ok(None);
    };

    let args = args.map(split_args).unwrap_or_default();
    if args.len() != function.arity() {
        return Err(invalid());
    }

    let parameters = match function {
        DateFunction::PreviousDayOfWeek | DateFunction::MostRecentDayOfWeek => {
            vec![member_of(&DAY_OF_WEEK, args[0])?]
        }
        DateFunction::Adjust => {
            let base = match parse_relative(args[0])? {
                Some(inner) => inner.into(),
                None => absolute_date(args[0]).ok_or_else(invalid)?,
            };
            let amount = parse_number(args[1])
                .filter(|n| n.fract() == 0.0)
                .and_then(|n| Literal::number_for(PrimitiveType::Integer, n))
                .ok_or_else(invalid)?;
            vec![
                base,
                PrimitiveInstanceValue::with_value(PrimitiveType::Integer, amount).into(),
                member_of(&DURATION_UNIT, args[2])?,
            ]
        }
        _ => Vec::new(),
    };

    function.apply(parameters).map(Some)
}

/// Splits on commas that are not nested inside parentheses.
fn split_args(args: &str) -> Vec<&str> {
    if args.trim().is_empty() {
        return Vec::new();
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(args[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(args[start..].trim());
    parts
}

fn member_of(enumeration: &Arc<Enumeration>, name: &str) -> Result<ValueSpecification> {
    let member = enumeration.require_member(name.trim())?;
    Ok(EnumValueInstanceValue::with_member(Arc::clone(enumeration), member).into())
}

fn absolute_date(text: &str) -> Option<ValueSpecification> {
    let ty = if is_strict_date(text) {
        PrimitiveType::StrictDate
    } else if is_date(text) {
        PrimitiveType::DateTime
    } else {
        return None;
    };
    Some(PrimitiveInstanceValue::with_value(ty, Literal::Date(text.trim().to_string())).into())
}

//! Auxiliary display strings for collection fields.

use valspec_foundation::{PrimitiveType, Type, ValueSpecification};

use crate::value::render;

/// Placeholder shown for an empty field of any type without a format hint.
pub const EMPTY_PLACEHOLDER: &str = "(empty)";

/// Returns the hint shown in an empty collection field.
#[must_use]
pub fn placeholder(ty: &Type) -> &'static str {
    match ty.as_primitive() {
        Some(PrimitiveType::Date | PrimitiveType::StrictDate) => "yyyy-mm-dd",
        Some(PrimitiveType::DateTime) => "yyyy-mm-ddThh:mm:ss",
        _ => EMPTY_PLACEHOLDER,
    }
}

/// Summarizes a collection for its read-only view.
///
/// `List(empty)` for no elements, otherwise `List(n): text` where the
/// rendered text is cut after `limit` characters and marked with `...`.
#[must_use]
pub fn preview(values: &[ValueSpecification], limit: usize) -> String {
    if values.is_empty() {
        return "List(empty)".to_string();
    }

    let text = render(values);
    let shown = match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    };
    format!("List({}): {shown}", values.len())
}

//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use valspec_foundation::{Error, ErrorContext, ErrorKind, PrimitiveType};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_type_mismatch() {
    let err = Error::type_mismatch(PrimitiveType::Date.into(), PrimitiveType::String.into());
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(err.to_string(), "type mismatch: expected Date, got String");
}

#[test]
fn error_unknown_member() {
    let err = Error::unknown_member("model::Color", "Purple");
    assert!(matches!(err.kind, ErrorKind::UnknownMember { .. }));
    let msg = err.to_string();
    assert!(msg.contains("Purple"));
    assert!(msg.contains("model::Color"));
}

#[test]
fn error_expression_column() {
    let err = Error::expression("unexpected ')'", 4);
    assert_eq!(
        err.to_string(),
        "expression error at column 4: unexpected ')'"
    );
}

#[test]
fn error_invalid_value() {
    let err = Error::invalid_value(PrimitiveType::Boolean.into(), "yes");
    assert_eq!(err.to_string(), "invalid Boolean value: \"yes\"");
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_display() {
    let ctx = ErrorContext::new().with_source("form.vs").with_line(3);
    assert_eq!(ctx.to_string(), "at form.vs:3");
    assert_eq!(ErrorContext::new().with_line(7).to_string(), "at line 7");
    assert_eq!(ErrorContext::new().to_string(), "");
}

#[test]
fn context_does_not_change_message() {
    let err = Error::unknown_parameter("limit")
        .with_context(ErrorContext::new().with_source("form.vs"));
    assert_eq!(err.to_string(), "unknown parameter: limit");
    assert!(err.context.is_some());
}

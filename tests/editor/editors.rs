//! Gesture flows of the individual editors.

use std::sync::Arc;

use valspec_editor::date::LATEST_DATE_LABEL;
use valspec_editor::{
    BooleanEditor, CollectionEditor, DateEditor, DateFunction, DateValue, EditorConfig,
    EnumCollectionEditor, EnumEditor, HostEvent, NumberEditor, RecordingHost, StringEditor,
    VariableEditor,
};
use valspec_foundation::{
    CollectionInstanceValue, EnumValueInstanceValue, Enumeration, ErrorKind, Literal,
    Multiplicity, PrimitiveInstanceValue, PrimitiveType, Type, ValueSpecification,
    VariableExpression,
};

fn color() -> Arc<Enumeration> {
    Arc::new(Enumeration::new("model::Color", ["Red", "Green", "Blue"]))
}

// =============================================================================
// String and Boolean
// =============================================================================

#[test]
fn string_commits_every_keystroke() {
    let mut host = RecordingHost::new();
    let mut editor = StringEditor::new(PrimitiveInstanceValue::new(PrimitiveType::String));
    assert_eq!(editor.placeholder(), Some("(empty)"));

    editor.input("a", &mut host);
    editor.input("ab", &mut host);
    assert_eq!(host.change_count(), 2);
    assert_eq!(editor.text(), "ab");
    assert_eq!(editor.placeholder(), None);

    editor.select(None, &mut host);
    assert_eq!(editor.text(), "");
    assert_eq!(host.change_count(), 3);
}

#[test]
fn boolean_toggles() {
    let mut host = RecordingHost::new();
    let mut editor = BooleanEditor::new(PrimitiveInstanceValue::new(PrimitiveType::Boolean));
    assert!(!editor.checked());

    editor.toggle(&mut host);
    assert!(editor.checked());
    editor.toggle(&mut host);
    assert!(!editor.checked());
    assert_eq!(
        host.last_value(),
        Some(&PrimitiveInstanceValue::with_value(PrimitiveType::Boolean, false).into())
    );
}

// =============================================================================
// Number
// =============================================================================

fn integer(n: i64) -> NumberEditor {
    NumberEditor::new(PrimitiveInstanceValue::with_value(PrimitiveType::Integer, n))
}

#[test]
fn number_evaluates_on_commit() {
    let mut host = RecordingHost::new();
    let mut editor = integer(0);

    editor.input("60 * 24", &mut host);
    assert_eq!(host.change_count(), 0);
    assert_eq!(editor.text(), "60 * 24");

    editor.commit(&mut host);
    assert_eq!(editor.text(), "1440");
    assert_eq!(editor.value().value(), Some(&Literal::Integer(1440)));
    assert_eq!(host.change_count(), 1);
}

#[test]
fn number_writes_plain_numbers_immediately() {
    let mut host = RecordingHost::new();
    let mut editor = integer(0);
    editor.input("7", &mut host);
    assert_eq!(editor.value().value(), Some(&Literal::Integer(7)));
    assert_eq!(host.change_count(), 1);

    // Committing the same number again is not another change.
    editor.commit(&mut host);
    assert_eq!(host.change_count(), 1);
}

#[test]
fn integer_field_truncates() {
    let mut host = RecordingHost::new();
    let mut editor = integer(0);
    editor.input("7 / 2", &mut host);
    editor.commit(&mut host);
    assert_eq!(editor.text(), "3");
    assert_eq!(editor.value().value(), Some(&Literal::Integer(3)));
}

#[test]
fn failed_expression_reverts_text() {
    let mut host = RecordingHost::new();
    let mut editor = integer(5);
    for bad in ["5 +", "1 / 0", "foo(1)", "(1"] {
        editor.input(bad, &mut host);
        editor.commit(&mut host);
        assert_eq!(editor.text(), "5", "{bad}");
    }
    assert!(host.events().is_empty());
}

#[test]
fn failed_expression_on_empty_value_resets() {
    let mut host = RecordingHost::new();
    let mut editor = NumberEditor::new(PrimitiveInstanceValue::new(PrimitiveType::Float));
    editor.input("2 *", &mut host);
    editor.commit(&mut host);
    assert_eq!(editor.text(), "");
    assert_eq!(host.events(), [HostEvent::Reset]);
}

#[test]
fn blank_number_resets() {
    let mut host = RecordingHost::new();
    let mut editor = integer(5);
    editor.input("  ", &mut host);
    assert!(host.ends_with_reset());
}

#[test]
fn float_field_keeps_fraction() {
    let mut host = RecordingHost::new();
    let mut editor = NumberEditor::new(PrimitiveInstanceValue::new(PrimitiveType::Float));
    editor.input("sqrt(16) + 0.5", &mut host);
    editor.commit(&mut host);
    assert_eq!(editor.text(), "4.5");
    assert!(editor.is_valid());
}

// =============================================================================
// Date
// =============================================================================

fn date_editor(ty: PrimitiveType) -> DateEditor {
    DateEditor::new(DateValue::Absolute(PrimitiveInstanceValue::new(ty)), ty)
}

fn stored_type(editor: &DateEditor) -> Option<PrimitiveType> {
    match editor.value() {
        DateValue::Absolute(p) => Some(p.ty),
        DateValue::Relative(_) => None,
    }
}

#[test]
fn date_field_stores_strict_date_or_date_time() {
    let mut host = RecordingHost::new();
    let mut editor = date_editor(PrimitiveType::Date);

    editor.set_absolute("2024-01-05", &mut host).unwrap();
    assert_eq!(stored_type(&editor), Some(PrimitiveType::StrictDate));
    assert_eq!(editor.text(), "2024-01-05");

    editor.set_absolute("2024-01-05T10:00:00", &mut host).unwrap();
    assert_eq!(stored_type(&editor), Some(PrimitiveType::DateTime));
    assert_eq!(host.change_count(), 2);
}

#[test]
fn invalid_date_is_rejected() {
    let mut host = RecordingHost::new();
    let mut editor = date_editor(PrimitiveType::StrictDate);
    let err = editor.set_absolute("2024-01-05T10:00:00", &mut host).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidValue { .. }));
    let err = editor.set_absolute("soon", &mut host).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidValue { .. }));
    assert!(host.events().is_empty());
}

#[test]
fn latest_date_only_in_date_fields() {
    let mut host = RecordingHost::new();
    let mut editor = date_editor(PrimitiveType::Date);
    editor.set_latest(&mut host).unwrap();
    assert_eq!(editor.text(), LATEST_DATE_LABEL);
    assert!(editor.is_valid());

    let mut strict = date_editor(PrimitiveType::StrictDate);
    let err = strict.set_latest(&mut host).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(host.change_count(), 1);
}

#[test]
fn relative_dates() {
    let mut host = RecordingHost::new();
    let mut editor = date_editor(PrimitiveType::Date);
    editor
        .set_relative(DateFunction::FirstDayOfThisMonth, vec![], &mut host)
        .unwrap();
    assert_eq!(editor.relative(), Some(DateFunction::FirstDayOfThisMonth));
    assert_eq!(editor.text(), "firstDayOfThisMonth()");

    let week = Arc::new(Enumeration::new("DayOfWeek", ["Monday", "Friday"]));
    let friday = EnumValueInstanceValue::with_member(
        Arc::clone(&week),
        week.require_member("Friday").unwrap(),
    );
    editor
        .set_relative(DateFunction::PreviousDayOfWeek, vec![friday.into()], &mut host)
        .unwrap();
    assert_eq!(editor.text(), "previousDayOfWeek(DayOfWeek.Friday)");
    assert_eq!(host.change_count(), 2);
}

#[test]
fn relative_date_must_fit_field() {
    let mut host = RecordingHost::new();
    let mut editor = date_editor(PrimitiveType::StrictDate);
    let err = editor
        .set_relative(DateFunction::Now, vec![], &mut host)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));

    let err = editor
        .set_relative(DateFunction::PreviousDayOfWeek, vec![], &mut host)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Unsupported(_)));
    assert!(host.events().is_empty());
}

// =============================================================================
// Enum
// =============================================================================

#[test]
fn enum_select() {
    let mut host = RecordingHost::new();
    let mut editor = EnumEditor::new(EnumValueInstanceValue::new(color()));
    let names: Vec<_> = editor.options().into_iter().map(|m| m.name).collect();
    assert_eq!(names, ["Red", "Green", "Blue"]);

    editor.select("Green", &mut host).unwrap();
    assert_eq!(editor.selected(), Some("Green"));

    let err = editor.select("Purple", &mut host).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownMember { .. }));
    assert_eq!(editor.selected(), Some("Green"));
    assert_eq!(host.change_count(), 1);
}

// =============================================================================
// Collections
// =============================================================================

fn number_collection(config: &EditorConfig) -> CollectionEditor {
    let ty: Type = PrimitiveType::Number.into();
    CollectionEditor::new(CollectionInstanceValue::new(ty.clone()), ty, config)
}

#[test]
fn collection_commit_cleans_text() {
    let mut host = RecordingHost::new();
    let mut editor = number_collection(&EditorConfig::default());
    assert_eq!(editor.preview(), "List(empty)");

    editor.begin_edit();
    editor.input("3, 1, three, 3");
    assert_eq!(host.change_count(), 0);

    editor.commit(&mut host);
    assert!(!editor.is_editing());
    assert_eq!(editor.text(), "3,1");
    assert_eq!(editor.preview(), "List(2): 3,1");
    assert_eq!(host.change_count(), 1);
}

#[test]
fn collection_blur_to_expand_button_keeps_editing() {
    let mut host = RecordingHost::new();
    let config = EditorConfig::default();
    let mut editor = number_collection(&config);
    editor.input("1,2");

    editor.blur(Some(&config.expand_button_name), &mut host);
    assert!(editor.is_editing());
    assert!(host.events().is_empty());

    editor.open_popover();
    editor.input("1,2,3");
    editor.close_popover();
    assert!(!editor.is_popover_open());
    assert!(editor.value().is_empty());
    assert!(host.events().is_empty());

    editor.blur(None, &mut host);
    assert_eq!(editor.value().len(), 3);
    assert_eq!(host.change_count(), 1);
}

#[test]
fn collection_blur_elsewhere_commits() {
    let mut host = RecordingHost::new();
    let mut editor = number_collection(&EditorConfig::default());
    editor.input("4");
    editor.blur(None, &mut host);
    assert_eq!(editor.value().len(), 1);
}

#[test]
fn collection_cancel_discards_text() {
    let mut host = RecordingHost::new();
    let mut editor = number_collection(&EditorConfig::default());
    editor.input("1,2");
    editor.commit(&mut host);
    editor.input("9");
    editor.cancel();
    assert_eq!(editor.text(), "1,2");
    assert_eq!(editor.value().len(), 2);
}

#[test]
fn collection_preview_respects_limit() {
    let mut host = RecordingHost::new();
    let config = EditorConfig::default().with_preview_char_limit(4);
    let mut editor = number_collection(&config);
    editor.input("100,200,300");
    editor.commit(&mut host);
    assert_eq!(editor.preview(), "List(3): 100,...");
}

#[test]
fn date_collection_placeholder() {
    let ty: Type = PrimitiveType::Date.into();
    let editor = CollectionEditor::new(
        CollectionInstanceValue::new(ty.clone()),
        ty,
        &EditorConfig::default(),
    );
    assert_eq!(editor.placeholder(), "yyyy-mm-dd");
}

#[test]
fn unsupported_element_type_is_left_alone() {
    let mut host = RecordingHost::new();
    let ty: Type = PrimitiveType::Boolean.into();
    let mut editor = CollectionEditor::new(
        CollectionInstanceValue::new(ty.clone()),
        ty,
        &EditorConfig::default(),
    );
    editor.input("true");
    editor.commit(&mut host);
    assert!(editor.value().is_empty());
    assert!(host.events().is_empty());
}

#[test]
fn enum_collection_selection() {
    let mut host = RecordingHost::new();
    let collection = CollectionInstanceValue::new(Type::Enumeration(color()));
    let mut editor = EnumCollectionEditor::new(collection, &EditorConfig::default()).unwrap();

    editor.select("Blue").unwrap();
    editor.select("Red").unwrap();
    editor.select("Blue").unwrap();
    assert!(editor.select("Purple").is_err());
    let available: Vec<_> = editor.available().into_iter().map(|m| m.name).collect();
    assert_eq!(available, ["Green"]);

    editor.deselect("Blue");
    editor.commit(&mut host);
    assert_eq!(editor.preview(), "List(1): Red");
    assert_eq!(host.change_count(), 1);
}

#[test]
fn enum_collection_paste() {
    let mut host = RecordingHost::new();
    let collection = CollectionInstanceValue::new(Type::Enumeration(color()));
    let mut editor = EnumCollectionEditor::new(collection, &EditorConfig::default()).unwrap();
    editor.paste("Green, Purple,Red,Green");
    assert_eq!(editor.value().len(), 0);
    editor.commit(&mut host);
    assert_eq!(editor.preview(), "List(2): Green,Red");
}

#[test]
fn enum_collection_requires_enum_elements() {
    let collection = CollectionInstanceValue::new(PrimitiveType::String.into());
    let err = EnumCollectionEditor::new(collection, &EditorConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Unsupported(_)));
}

// =============================================================================
// Variable
// =============================================================================

#[test]
fn variable_tooltip() {
    let typed = VariableEditor::new(
        VariableExpression::new("ids", Some(PrimitiveType::Integer.into()), Multiplicity::ZERO_MANY),
        false,
    );
    let info = typed.info();
    assert_eq!(info.type_name, "Integer");
    assert_eq!(info.name, "ids");
    assert_eq!(info.multiplicity, "[*]");

    let untyped = VariableEditor::new(VariableExpression::new("x", None, Multiplicity::ONE), true);
    assert_eq!(untyped.info().type_name, "(unknown)");
    assert!(untyped.is_constant());
}

#[test]
fn committed_values_are_whole_specifications() {
    let mut host = RecordingHost::new();
    let mut editor = integer(0);
    editor.input("12", &mut host);
    assert!(matches!(
        host.last_value(),
        Some(ValueSpecification::Primitive(p)) if p.ty == PrimitiveType::Integer
    ));
}

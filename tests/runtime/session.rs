//! Parameters edited through their editors.

use valspec_editor::EditorKind;
use valspec_foundation::{
    ErrorKind, Literal, Multiplicity, PrimitiveInstanceValue, PrimitiveType, Type,
    ValueSpecification, VariableExpression,
};
use valspec_runtime::Session;

fn session() -> Session {
    let mut session = Session::new();
    session
        .define_enum("model::Color", ["Red", "Green", "Blue"])
        .unwrap();
    session
}

fn declare(session: &mut Session, name: &str, ty: &str, multiplicity: Multiplicity) {
    let ty = session.resolve_type(ty).unwrap();
    session.declare(name, ty, multiplicity).unwrap();
}

fn literal(session: &Session, name: &str) -> Option<Literal> {
    session
        .value(name)
        .unwrap()
        .unwrap_propagated()
        .as_primitive()
        .and_then(|p| p.value().cloned())
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn defaults_by_type() {
    let mut session = session();
    let cases = [
        ("s", "String", "(empty)"),
        ("b", "Boolean", "false"),
        ("i", "Integer", "0"),
        ("f", "Float", "0"),
        ("d", "Date", "today()"),
        ("sd", "StrictDate", "today()"),
        ("dt", "DateTime", "now()"),
        ("c", "Color", "Red"),
        ("bin", "Binary", "Unsupported value"),
    ];
    for (name, ty, _) in cases {
        declare(&mut session, name, ty, Multiplicity::ONE);
    }
    for (name, ty, expected) in cases {
        assert_eq!(session.render(name).unwrap(), expected, "{ty}");
    }
}

#[test]
fn many_valued_parameters_are_collections() {
    let mut session = session();
    declare(&mut session, "ids", "Integer", Multiplicity::ZERO_MANY);
    declare(&mut session, "colors", "model::Color", Multiplicity::ONE_MANY);
    assert_eq!(session.kind("ids").unwrap(), EditorKind::Collection);
    assert_eq!(session.render("ids").unwrap(), "List(empty)");
    assert_eq!(session.kind("colors").unwrap(), EditorKind::Collection);
}

#[test]
fn builtin_enumerations_are_registered() {
    let session = Session::new();
    assert!(session.resolve_type("DayOfWeek").is_ok());
    assert!(session.resolve_type("DurationUnit").is_ok());
}

#[test]
fn enum_definitions_are_validated() {
    let mut session = session();
    let err = session.define_enum("my::Integer", ["A"]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Unsupported(_)));
    let err = session.define_enum("my::Empty", Vec::<String>::new()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Unsupported(_)));
    let err = session.resolve_type("Shape").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownType(_)));
}

#[test]
fn redefined_enum_leaves_existing_parameters() {
    let mut session = session();
    declare(&mut session, "old", "Color", Multiplicity::ONE);
    session.define_enum("model::Color", ["Cyan", "Magenta"]).unwrap();
    declare(&mut session, "new", "Color", Multiplicity::ONE);

    assert_eq!(session.render("old").unwrap(), "Red");
    session.edit("old", "Blue").unwrap();
    assert_eq!(session.render("old").unwrap(), "Blue");
    assert_eq!(session.render("new").unwrap(), "Cyan");
    assert!(session.edit("new", "Blue").is_err());
}

#[test]
fn unknown_parameter() {
    let mut session = session();
    let err = session.edit("nope", "1").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownParameter(_)));
}

// =============================================================================
// Editing
// =============================================================================

#[test]
fn text_gestures_per_type() {
    let mut session = session();
    declare(&mut session, "name", "String", Multiplicity::ONE);
    declare(&mut session, "flag", "Boolean", Multiplicity::ONE);
    declare(&mut session, "limit", "Integer", Multiplicity::ONE);
    declare(&mut session, "color", "Color", Multiplicity::ONE);

    session.edit("name", "north").unwrap();
    session.edit("flag", "TRUE").unwrap();
    session.edit("limit", "10 * 4 + 2").unwrap();
    session.edit("color", "Green").unwrap();

    assert_eq!(literal(&session, "name"), Some(Literal::String("north".into())));
    assert_eq!(literal(&session, "flag"), Some(Literal::Boolean(true)));
    assert_eq!(literal(&session, "limit"), Some(Literal::Integer(42)));
    assert_eq!(session.render("color").unwrap(), "Green");
}

#[test]
fn rejected_text_keeps_value() {
    let mut session = session();
    declare(&mut session, "flag", "Boolean", Multiplicity::ONE);
    declare(&mut session, "color", "Color", Multiplicity::ONE);
    declare(&mut session, "limit", "Integer", Multiplicity::ONE);

    assert!(session.edit("flag", "yes").is_err());
    assert!(session.edit("color", "Purple").is_err());
    session.edit("limit", "7").unwrap();
    session.edit("limit", "7 +").unwrap();

    assert_eq!(literal(&session, "flag"), Some(Literal::Boolean(false)));
    assert_eq!(session.render("color").unwrap(), "Red");
    assert_eq!(session.render("limit").unwrap(), "7");
}

#[test]
fn blank_number_resets_to_default() {
    let mut session = session();
    declare(&mut session, "limit", "Integer", Multiplicity::ONE);
    session.edit("limit", "12").unwrap();
    session.edit("limit", "   ").unwrap();
    assert_eq!(literal(&session, "limit"), Some(Literal::Integer(0)));
}

#[test]
fn date_gestures() {
    let mut session = session();
    declare(&mut session, "asOf", "Date", Multiplicity::ONE);

    session.edit("asOf", "2024-01-05").unwrap();
    assert_eq!(session.render("asOf").unwrap(), "2024-01-05");

    session.edit("asOf", "previousDayOfWeek(Friday)").unwrap();
    assert_eq!(
        session.render("asOf").unwrap(),
        "previousDayOfWeek(DayOfWeek.Friday)"
    );

    session.edit("asOf", "adjust(2024-01-05, 3, DAYS)").unwrap();
    assert_eq!(
        session.render("asOf").unwrap(),
        "adjust(%2024-01-05, 3, DurationUnit.DAYS)"
    );

    session.edit("asOf", "latest").unwrap();
    assert_eq!(session.render("asOf").unwrap(), "Latest Date");
}

#[test]
fn strict_date_refuses_latest_and_now() {
    let mut session = session();
    declare(&mut session, "day", "StrictDate", Multiplicity::ONE);
    let err = session.edit("day", "latest").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    let err = session.edit("day", "now()").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(session.render("day").unwrap(), "today()");
}

#[test]
fn collection_edits() {
    let mut session = session();
    declare(&mut session, "ids", "Integer", Multiplicity::ZERO_MANY);
    declare(&mut session, "colors", "Color", Multiplicity::ZERO_MANY);

    session.edit("ids", "3,1,3,x,2.9,2").unwrap();
    assert_eq!(session.render("ids").unwrap(), "List(3): 3,1,2");

    session.edit("colors", "Blue,Purple,Red").unwrap();
    assert_eq!(session.render("colors").unwrap(), "List(2): Blue,Red");

    session.edit("ids", "").unwrap();
    assert_eq!(session.render("ids").unwrap(), "List(empty)");
}

#[test]
fn edits_write_inside_propagated_wrapper() {
    let mut session = session();
    declare(&mut session, "limit", "Integer", Multiplicity::ONE);
    let wrapped = ValueSpecification::Propagated(Box::new(
        PrimitiveInstanceValue::with_value(PrimitiveType::Integer, 3).into(),
    ));
    session.set_value("limit", wrapped).unwrap();

    session.edit("limit", "5").unwrap();
    let value = session.value("limit").unwrap();
    assert!(matches!(value, ValueSpecification::Propagated(_)));
    assert_eq!(literal(&session, "limit"), Some(Literal::Integer(5)));
}

#[test]
fn toggle_and_reset() {
    let mut session = session();
    declare(&mut session, "flag", "Boolean", Multiplicity::ONE);
    declare(&mut session, "limit", "Integer", Multiplicity::ONE);

    session.toggle("flag").unwrap();
    assert_eq!(session.render("flag").unwrap(), "true");
    assert!(session.toggle("limit").is_err());

    session.reset("flag").unwrap();
    assert_eq!(session.render("flag").unwrap(), "false");
}

#[test]
fn read_only_values() {
    let mut session = session();
    declare(&mut session, "limit", "Integer", Multiplicity::ONE);
    let ty = Type::Primitive(PrimitiveType::Integer);
    let variable: ValueSpecification =
        VariableExpression::new("other", Some(ty), Multiplicity::ONE).into();
    session.set_value("limit", variable.clone()).unwrap();

    assert_eq!(session.kind("limit").unwrap(), EditorKind::Variable);
    assert_eq!(session.render("limit").unwrap(), "$other");
    assert!(session.edit("limit", "1").is_err());
    assert_eq!(session.value("limit").unwrap(), &variable);

    // A variable can still be reset to the default.
    session.reset("limit").unwrap();
    assert_eq!(literal(&session, "limit"), Some(Literal::Integer(0)));
}

#[test]
fn unsupported_values_ignore_reset() {
    let mut session = session();
    declare(&mut session, "blob", "Binary", Multiplicity::ONE);
    let before = session.value("blob").unwrap().clone();
    assert!(session.edit("blob", "x").is_err());
    session.reset("blob").unwrap();
    assert_eq!(session.value("blob").unwrap(), &before);
}

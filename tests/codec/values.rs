//! Typed parsing and rendering of collection text.

use std::sync::Arc;

use proptest::prelude::*;
use valspec_codec::{
    EMPTY_PLACEHOLDER, ParseOutcome, parse, placeholder, preview, render, scalar_of,
    set_collection_value,
};
use valspec_foundation::{
    CollectionInstanceValue, EnumValueInstanceValue, Enumeration, Literal, PrimitiveInstanceValue,
    PrimitiveType, Type, ValueSpecification, VariableExpression,
};

fn color() -> Type {
    Type::enumeration(Enumeration::new("model::Color", ["Red", "Green", "Blue"]))
}

fn values(text: &str, target: &Type) -> Vec<ValueSpecification> {
    parse(text, target).into_values().unwrap()
}

fn scalars(text: &str, target: &Type) -> Vec<String> {
    values(text, target).iter().filter_map(scalar_of).collect()
}

fn literal(value: &ValueSpecification) -> &Literal {
    value.as_primitive().and_then(PrimitiveInstanceValue::value).unwrap()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn strings_keep_their_text() {
    let ty = PrimitiveType::String.into();
    assert_eq!(scalars("a, b ,\"c,d\"", &ty), ["a", " b ", "c,d"]);
}

#[test]
fn numbers_drop_junk_and_duplicates() {
    let ty = PrimitiveType::Number.into();
    assert_eq!(scalars("3,1,x,3, 1.5,,2e1", &ty), ["3", "1", "1.5", "20"]);
}

#[test]
fn duplicates_compare_after_coercion() {
    let ty = PrimitiveType::Number.into();
    assert_eq!(scalars("1,1.0, 1 ,01", &ty), ["1"]);
}

#[test]
fn integers_reject_fractions() {
    let ty = PrimitiveType::Integer.into();
    let parsed = values("2.7,-2.7,2,-3.0", &ty);
    let literals: Vec<_> = parsed.iter().map(literal).collect();
    assert_eq!(literals, [&Literal::Integer(2), &Literal::Integer(-3)]);
    assert_eq!(scalars("1.9,1,2.5", &ty), ["1"]);
}

#[test]
fn floats_stay_floats() {
    let ty = PrimitiveType::Float.into();
    let parsed = values("2", &ty);
    assert_eq!(literal(&parsed[0]), &Literal::Number(2.0));
    assert_eq!(parsed[0].declared_type(), Some(ty));
}

#[test]
fn dates_are_validated_and_trimmed() {
    let ty = PrimitiveType::Date.into();
    assert_eq!(
        scalars(" 2024-01-05 ,yesterday,2024-01-05T08:00:00", &ty),
        ["2024-01-05", "2024-01-05T08:00:00"]
    );
}

#[test]
fn strict_dates_accept_calendar_dates() {
    let ty = PrimitiveType::StrictDate.into();
    assert_eq!(scalars("2024-02-29,2023-02-29", &ty), ["2024-02-29"]);
}

#[test]
fn date_times_accept_marker() {
    let ty = PrimitiveType::DateTime.into();
    assert_eq!(
        scalars("%2024-01-05T08:00:00,2024-01-05,noon", &ty),
        ["%2024-01-05T08:00:00", "2024-01-05"]
    );
}

#[test]
fn enums_match_member_names() {
    let ty = color();
    let parsed = values("Blue, Red,Purple,Blue", &ty);
    let members: Vec<_> = parsed
        .iter()
        .map(|v| v.as_enum().and_then(EnumValueInstanceValue::member).unwrap().name.clone())
        .collect();
    assert_eq!(members, ["Blue", "Red"]);
    assert_eq!(parsed[0].declared_type(), Some(ty));
}

#[test]
fn enum_names_are_case_sensitive() {
    assert!(values("red,BLUE", &color()).is_empty());
}

#[test]
fn blank_text_clears() {
    for ty in [PrimitiveType::String.into(), PrimitiveType::Integer.into(), color()] {
        assert_eq!(parse("  ", &ty), ParseOutcome::Replace(Vec::new()));
    }
}

#[test]
fn unsupported_targets() {
    for ty in [
        Type::from(PrimitiveType::Boolean),
        PrimitiveType::Binary.into(),
        PrimitiveType::Byte.into(),
        PrimitiveType::StrictTime.into(),
        PrimitiveType::LatestDate.into(),
        Type::Class("model::Person".to_string()),
    ] {
        assert_eq!(parse("true,false", &ty), ParseOutcome::Unsupported, "{ty}");
        assert_eq!(parse(" ", &ty), ParseOutcome::Replace(Vec::new()), "{ty}");
    }
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn render_joins_scalars() {
    let ty = PrimitiveType::String.into();
    assert_eq!(render(&values(r#"a,"b,c",d"#, &ty)), r#"a,"b,c",d"#);
}

#[test]
fn render_skips_elements_without_scalars() {
    let elements: Vec<ValueSpecification> = vec![
        PrimitiveInstanceValue::with_value(PrimitiveType::Integer, 4).into(),
        PrimitiveInstanceValue::new(PrimitiveType::Integer).into(),
        VariableExpression::new("x", None, valspec_foundation::Multiplicity::ONE).into(),
        EnumValueInstanceValue::new(Arc::new(Enumeration::new("m::E", ["A"]))).into(),
        PrimitiveInstanceValue::with_value(PrimitiveType::Integer, 5).into(),
    ];
    assert_eq!(render(&elements), "4,5");
}

#[test]
fn render_empty_is_empty() {
    assert_eq!(render(&[]), "");
}

#[test]
fn parse_render_reaches_fixed_point() {
    let ty = PrimitiveType::Number.into();
    let once = render(&values("5, 2.50,x,5,1e2", &ty));
    assert_eq!(once, "5,2.5,100");
    assert_eq!(render(&values(&once, &ty)), once);
}

// =============================================================================
// Applying to a collection
// =============================================================================

#[test]
fn set_collection_value_replaces() {
    let ty: Type = PrimitiveType::Integer.into();
    let mut collection = CollectionInstanceValue::new(ty.clone());
    assert!(set_collection_value(&mut collection, &ty, "1,2,3"));
    assert_eq!(collection.len(), 3);
    assert!(set_collection_value(&mut collection, &ty, ""));
    assert!(collection.is_empty());
}

#[test]
fn set_collection_value_leaves_unsupported_alone() {
    let ty: Type = PrimitiveType::Boolean.into();
    let existing = PrimitiveInstanceValue::with_value(PrimitiveType::Boolean, true).into();
    let mut collection = CollectionInstanceValue::with_values(ty.clone(), vec![existing]);
    assert!(!set_collection_value(&mut collection, &ty, "false"));
    assert_eq!(collection.len(), 1);
}

// =============================================================================
// Display helpers
// =============================================================================

#[test]
fn placeholders_hint_date_formats() {
    assert_eq!(placeholder(&PrimitiveType::Date.into()), "yyyy-mm-dd");
    assert_eq!(placeholder(&PrimitiveType::DateTime.into()), "yyyy-mm-ddThh:mm:ss");
    assert_eq!(placeholder(&PrimitiveType::String.into()), EMPTY_PLACEHOLDER);
    assert_eq!(placeholder(&color()), EMPTY_PLACEHOLDER);
}

#[test]
fn preview_counts_and_truncates() {
    let ty = PrimitiveType::String.into();
    assert_eq!(preview(&[], 10), "List(empty)");
    assert_eq!(preview(&values("ab,cd", &ty), 10), "List(2): ab,cd");
    assert_eq!(preview(&values("ab,cd", &ty), 3), "List(2): ab,...");
}

proptest! {
    #[test]
    fn integer_lists_survive_render(ints in prop::collection::vec(-1000i64..1000, 0..20)) {
        let ty: Type = PrimitiveType::Integer.into();
        let text = ints.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
        let parsed = values(&text, &ty);

        let mut expected = Vec::new();
        for n in &ints {
            if !expected.contains(n) {
                expected.push(*n);
            }
        }
        let got: Vec<i64> = parsed
            .iter()
            .filter_map(|v| match literal(v) {
                Literal::Integer(n) => Some(*n),
                _ => None,
            })
            .collect();
        prop_assert_eq!(got, expected);
    }

    #[test]
    fn string_fields_survive_render(fields in prop::collection::vec("[a-z,\"]{1,8}", 1..8)) {
        let ty: Type = PrimitiveType::String.into();
        let elements: Vec<ValueSpecification> = fields
            .iter()
            .map(|f| PrimitiveInstanceValue::with_value(PrimitiveType::String, f.as_str()).into())
            .collect();
        let reparsed = scalars(&render(&elements), &ty);
        let mut expected: Vec<String> = Vec::new();
        for f in &fields {
            if !expected.contains(f) {
                expected.push(f.clone());
            }
        }
        prop_assert_eq!(reparsed, expected);
    }
}

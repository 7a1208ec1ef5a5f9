//! Integration tests for the type model
//!
//! Tests sub-typing, lenient assignment, enumerations, and multiplicities.

use proptest::prelude::*;
use valspec_foundation::{Enumeration, Multiplicity, PrimitiveType, Type, TypeCheckOption};

// =============================================================================
// Sub-typing
// =============================================================================

#[test]
fn numeric_family() {
    for ty in [
        PrimitiveType::Integer,
        PrimitiveType::Float,
        PrimitiveType::Decimal,
    ] {
        assert!(ty.is_sub_type_of(PrimitiveType::Number));
        assert!(!PrimitiveType::Number.is_sub_type_of(ty));
    }
    assert!(!PrimitiveType::Integer.is_sub_type_of(PrimitiveType::Float));
}

#[test]
fn date_family() {
    for ty in [
        PrimitiveType::StrictDate,
        PrimitiveType::DateTime,
        PrimitiveType::LatestDate,
    ] {
        assert!(ty.is_date());
        assert!(ty.is_sub_type_of(PrimitiveType::Date));
    }
    assert!(!PrimitiveType::StrictTime.is_date());
    assert!(!PrimitiveType::StrictDate.is_sub_type_of(PrimitiveType::DateTime));
}

#[test]
fn lenient_and_strict_assignment() {
    let float = Type::from(PrimitiveType::Float);
    let integer = Type::from(PrimitiveType::Integer);
    assert!(float.accepts(&integer, false));
    assert!(!float.accepts(&integer, true));

    let strict_date = Type::from(PrimitiveType::StrictDate);
    let date_time = Type::from(PrimitiveType::DateTime);
    assert!(strict_date.accepts(&date_time, false));
    assert!(!Type::from(PrimitiveType::String).accepts(&integer, false));

    let check = TypeCheckOption::new(PrimitiveType::Number).strict();
    assert!(check.strict);
    assert_eq!(check.expected_type, Type::from(PrimitiveType::Number));
}

#[test]
fn enumerations_are_nominal() {
    let a = Type::enumeration(Enumeration::new("pkg::Color", ["Red"]));
    let b = Type::enumeration(Enumeration::new("other::Color", ["Red"]));
    assert_eq!(a.name(), "Color");
    assert!(a.is_sub_type_of(&a));
    assert!(!a.is_sub_type_of(&b));
    assert!(!a.accepts(&PrimitiveType::String.into(), false));
}

// =============================================================================
// Enumerations
// =============================================================================

#[test]
fn enumeration_members() {
    let color = Enumeration::new("model::Color", ["Red", "Green"]);
    assert_eq!(color.name(), "Color");
    let red = color.member("Red").unwrap();
    assert_eq!(red.enumeration, "model::Color");
    assert!(color.member("red").is_none());
    assert!(color.require_member("Blue").is_err());
    assert_eq!(color.all_members().len(), 2);
}

// =============================================================================
// Multiplicity
// =============================================================================

#[test]
fn multiplicity_bounds() {
    assert!(!Multiplicity::ONE.is_many());
    assert!(!Multiplicity::ZERO_ONE.is_many());
    assert!(Multiplicity::ZERO_MANY.is_many());
    assert!(Multiplicity::ONE_MANY.admits(3));
    assert!(!Multiplicity::ONE_MANY.admits(0));
    assert!(Multiplicity::ZERO_ONE.admits(0));
    assert!(!Multiplicity::ZERO_ONE.admits(2));
}

#[test]
fn multiplicity_descriptions() {
    assert_eq!(Multiplicity::ONE.to_string(), "[1]");
    assert_eq!(Multiplicity::ZERO_ONE.to_string(), "[0..1]");
    assert_eq!(Multiplicity::ZERO_MANY.to_string(), "[*]");
    assert_eq!(Multiplicity::ONE_MANY.to_string(), "[1..*]");
    assert_eq!(Multiplicity::parse("[2..5]"), Some(Multiplicity::new(2, Some(5))));
    assert_eq!(Multiplicity::parse("[5..2]"), None);
    assert_eq!(Multiplicity::parse("1"), None);
}

proptest! {
    #[test]
    fn multiplicity_description_parses_back(lower in 0u32..10, extra in proptest::option::of(0u32..10)) {
        let m = Multiplicity::new(lower, extra.map(|e| lower + e));
        prop_assert_eq!(Multiplicity::parse(&m.describe()), Some(m));
    }

    #[test]
    fn primitive_names_are_unique(index in 0usize..13) {
        let ty = PrimitiveType::ALL[index];
        prop_assert_eq!(PrimitiveType::from_name(ty.name()), Some(ty));
    }
}

//! Integration tests for evaluation
//!
//! Tests the numbers a number field commits for typed expressions.

use proptest::prelude::*;
use valspec_expr::evaluate;
use valspec_foundation::ErrorKind;

fn close(source: &str, expected: f64) {
    let value = evaluate(source).unwrap();
    assert!((value - expected).abs() < 1e-9, "{source} = {value}");
}

#[test]
fn arithmetic() {
    close("2 + 2", 4.0);
    close("10 - 4 - 3", 3.0);
    close("2 ^ 10", 1024.0);
    close("7 / 2", 3.5);
    close("-7 % 3", 2.0);
    close("7 % -3", -2.0);
}

#[test]
fn constants() {
    close("pi", std::f64::consts::PI);
    close("PI", std::f64::consts::PI);
    close("E", std::f64::consts::E);
    close("tau / 2", std::f64::consts::PI);
}

#[test]
fn functions() {
    close("sqrt(2) ^ 2", 2.0);
    close("log(100, 10)", 2.0);
    close("log(e)", 1.0);
    close("log10(1000) + log2(8)", 6.0);
    close("round(3.14159, 3)", 3.142);
    close("trunc(-2.7)", -2.0);
    close("min(3, 1, 2) + max(3, 1, 2)", 4.0);
    close("pow(2, 0.5) ^ 2", 2.0);
}

#[test]
fn whitespace_is_ignored() {
    close("  1+\t2 ", 3.0);
}

#[test]
fn evaluation_errors() {
    for source in [
        "1 / 0",
        "mod(1, 0)",
        "ln(-1)",
        "round(1, 16)",
        "round(1, 1.5)",
        "unknown",
        "2 ^ 2000",
        "2pi",
    ] {
        let err = evaluate(source).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::Expression { .. }),
            "{source}: {err}"
        );
    }
}

proptest! {
    #[test]
    fn multiplication_matches_native(a in -1000i32..1000, b in -1000i32..1000) {
        let value = evaluate(&format!("{a} * ({b})")).unwrap();
        prop_assert_eq!(value, f64::from(a) * f64::from(b));
    }

    #[test]
    fn parenthesizing_does_not_change_the_value(a in 1u16..500, b in 1u16..500, c in 1u16..500) {
        let flat = evaluate(&format!("{a} + {b} * {c}")).unwrap();
        let grouped = evaluate(&format!("{a} + ({b} * {c})")).unwrap();
        prop_assert_eq!(flat, grouped);
    }
}

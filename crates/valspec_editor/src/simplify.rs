//! Folding `minus` applications into numeric literals.
//!
//! `minus(5)` is how a negative constant reaches a number field. Folding it
//! lets the field be edited like any other number.

use valspec_foundation::{
    Literal, PrimitiveInstanceValue, PrimitiveType, SimpleFunctionExpression, ValueSpecification,
};

/// Name of the subtraction/negation function.
pub const MINUS: &str = "minus";

/// Folds `minus(x)` to `-x` and `minus(a, b, ...)` to `a - b - ...`.
///
/// Every parameter must be a numeric literal with a value, possibly wrapped
/// as a propagated value. All-integer arguments fold with checked integer
/// arithmetic, and an overflow is not foldable; anything else folds as
/// floats. The result takes the shared parameter type, or `Number` when the
/// types differ. Returns `None` when the expression is not foldable.
#[must_use]
pub fn simplify_minus(expression: &SimpleFunctionExpression) -> Option<PrimitiveInstanceValue> {
    if !expression.matches_name(MINUS) {
        return None;
    }

    let operands = expression
        .parameters
        .iter()
        .map(|param| match param.unwrap_propagated() {
            ValueSpecification::Primitive(p) if p.ty.is_numeric() => {
                p.value().map(|literal| (p.ty, literal))
            }
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    let (&(first_type, _), rest) = operands.split_first()?;
    let ty = if rest.iter().all(|(ty, _)| *ty == first_type) {
        first_type
    } else {
        PrimitiveType::Number
    };

    let all_integers = operands
        .iter()
        .all(|(_, literal)| matches!(literal, Literal::Integer(_)));
    let literal = if all_integers {
        fold_integers(&operands)?
    } else {
        fold_numbers(&operands)?
    };
    let literal = match literal {
        Literal::Integer(_) => literal,
        Literal::Number(n) => Literal::number_for(ty, n)?,
        _ => return None,
    };
    tracing::trace!(function = %expression.function_name, result = %literal, "folded minus");
    Some(PrimitiveInstanceValue::with_value(ty, literal))
}

fn fold_integers(operands: &[(PrimitiveType, &Literal)]) -> Option<Literal> {
    let mut values = operands.iter().map(|(_, literal)| match literal {
        Literal::Integer(n) => Some(*n),
        _ => None,
    });
    let first = values.next()??;
    let result = if operands.len() == 1 {
        first.checked_neg()?
    } else {
        values.try_fold(first, |acc, n| acc.checked_sub(n?))?
    };
    Some(Literal::Integer(result))
}

fn fold_numbers(operands: &[(PrimitiveType, &Literal)]) -> Option<Literal> {
    let mut values = operands.iter().map(|(_, literal)| literal.as_number());
    let first = values.next()??;
    let result = if operands.len() == 1 {
        -first
    } else {
        values.try_fold(first, |acc, n| Some(acc - n?))?
    };
    result.is_finite().then_some(Literal::Number(result))
}

//! Evaluation of numeric expressions.
//!
//! Evaluation is a direct tree walk; every intermediate result must be
//! finite, so `1 / 0` and `sqrt(-1)` are errors rather than infinities.

use std::f64::consts;

use valspec_foundation::{Error, Result};

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::parser::parse;
use crate::span::Span;

/// Parses and evaluates expression text.
///
/// # Errors
/// Returns an `Expression` error if the text does not parse or evaluation
/// fails.
pub fn evaluate(source: &str) -> Result<f64> {
    let expr = parse(source)?;
    let value = evaluate_expr(&expr)?;
    tracing::trace!(source, value, "evaluated expression");
    Ok(value)
}

/// Evaluates a parsed expression.
///
/// # Errors
/// Returns an `Expression` error for unknown names, wrong arity, division
/// by zero, or non-finite results.
pub fn evaluate_expr(expr: &Expr) -> Result<f64> {
    let value = match expr {
        Expr::Number(n, _) => *n,
        Expr::Ident(name, span) => constant(name).ok_or_else(|| {
            Error::expression(format!("undefined symbol {name}"), span.column)
        })?,
        Expr::Unary { op, operand, .. } => {
            let v = evaluate_expr(operand)?;
            match op {
                UnaryOp::Plus => v,
                UnaryOp::Neg => -v,
            }
        }
        Expr::Binary { op, lhs, rhs, span } => {
            let l = evaluate_expr(lhs)?;
            let r = evaluate_expr(rhs)?;
            binary(*op, l, r).map_err(|message| Error::expression(message, span.column))?
        }
        Expr::Call { name, args, span } => {
            let values = args.iter().map(evaluate_expr).collect::<Result<Vec<_>>>()?;
            call(name, &values, *span)?
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::expression(
            format!("{expr} is not a finite number"),
            expr.span().column,
        ))
    }
}

fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(consts::PI),
        "e" | "E" => Some(consts::E),
        "tau" => Some(consts::TAU),
        _ => None,
    }
}

fn binary(op: BinaryOp, l: f64, r: f64) -> std::result::Result<f64, &'static str> {
    match op {
        BinaryOp::Add => Ok(l + r),
        BinaryOp::Sub => Ok(l - r),
        BinaryOp::Mul => Ok(l * r),
        BinaryOp::Div if r == 0.0 => Err("division by zero"),
        BinaryOp::Div => Ok(l / r),
        BinaryOp::Rem if r == 0.0 => Err("modulo by zero"),
        BinaryOp::Rem => Ok(floor_mod(l, r)),
        BinaryOp::Pow => Ok(l.powf(r)),
    }
}

/// Modulo taking the sign of the divisor, so `-1 % 3` is `2`.
fn floor_mod(l: f64, r: f64) -> f64 {
    l - r * (l / r).floor()
}

fn call(name: &str, args: &[f64], span: Span) -> Result<f64> {
    let arity = |expected: &str| {
        Error::expression(
            format!("{name} expects {expected} argument(s), got {}", args.len()),
            span.column,
        )
    };

    let unary = |f: fn(f64) -> f64| match args {
        [x] => Ok(f(*x)),
        _ => Err(arity("1")),
    };

    match name {
        "abs" => unary(f64::abs),
        "sqrt" => unary(f64::sqrt),
        "cbrt" => unary(f64::cbrt),
        "exp" => unary(f64::exp),
        "ln" => unary(f64::ln),
        "log10" => unary(f64::log10),
        "log2" => unary(f64::log2),
        "floor" => unary(f64::floor),
        "ceil" => unary(f64::ceil),
        "trunc" => unary(f64::trunc),
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "sign" => unary(|x| if x == 0.0 { 0.0 } else { x.signum() }),
        "log" => match args {
            [x] => Ok(x.ln()),
            [x, base] => Ok(x.log(*base)),
            _ => Err(arity("1 or 2")),
        },
        "round" => match args {
            [x] => Ok(x.round()),
            [x, digits] if digits.fract() == 0.0 && (0.0..=15.0).contains(digits) => {
                let scale = 10f64.powf(*digits);
                Ok((x * scale).round() / scale)
            }
            [_, _] => Err(Error::expression(
                "round digits must be an integer between 0 and 15",
                span.column,
            )),
            _ => Err(arity("1 or 2")),
        },
        "pow" => match args {
            [x, y] => Ok(x.powf(*y)),
            _ => Err(arity("2")),
        },
        "mod" => match args {
            [_, y] if *y == 0.0 => Err(Error::expression("modulo by zero", span.column)),
            [x, y] => Ok(floor_mod(*x, *y)),
            _ => Err(arity("2")),
        },
        "min" | "max" => {
            let pick = if name == "min" { f64::min } else { f64::max };
            args.iter()
                .copied()
                .reduce(pick)
                .ok_or_else(|| arity("at least 1"))
        }
        _ => Err(Error::expression(
            format!("undefined function {name}"),
            span.column,
        )),
    }
}

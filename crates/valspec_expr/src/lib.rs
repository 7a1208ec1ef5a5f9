//! Numeric expression evaluation for valspec number fields.
//!
//! A number field accepts a small arithmetic expression such as `2 + 2` or
//! `sqrt(16) * pi`; on commit the expression is evaluated to a number.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of expression source
//! - [`Parser`] - Precedence-climbing parser producing an [`Expr`]
//! - [`evaluate`] - Parse and evaluate in one step

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use eval::{evaluate, evaluate_expr};
pub use lexer::Lexer;
pub use parser::{Parser, parse};
pub use span::Span;
pub use token::{Token, TokenKind};

//! Integration tests for Layer 1: Expressions
//!
//! Tests for the lexer, parser, and evaluator behind number fields.

mod evaluate;

//! Parser for numeric expressions.
//!
//! Precedence climbing over the token stream, from loosest to tightest:
//! `+ -`, `* / %`, unary `+ -`, `^` (right-associative), then calls,
//! constants, numbers and parentheses.

use valspec_foundation::{Error, Result};

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Operand precedence of unary operators: `-2^2` is `-(2^2)`.
const UNARY_OPERAND_PRECEDENCE: u8 = 4;

/// Nesting limit for parentheses and unary chains.
const MAX_DEPTH: usize = 64;

/// Parser for numeric expression text.
pub struct Parser<'src> {
    /// The lexer providing tokens.
    lexer: Lexer<'src>,
    /// Current token (lookahead).
    current: Token,
    /// Current nesting depth.
    depth: usize,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            depth: 0,
        }
    }

    /// Parses the whole source as one expression.
    ///
    /// # Errors
    /// Returns an error if the source is empty, malformed, or has trailing
    /// tokens after a complete expression.
    pub fn parse(&mut self) -> Result<Expr> {
        if self.current.kind == TokenKind::Eof {
            return Err(self.error("empty expression"));
        }
        let expr = self.parse_binary(0)?;
        if self.current.kind != TokenKind::Eof {
            return Err(self.error(&format!("unexpected {}", self.current.kind.name())));
        }
        Ok(expr)
    }

    /// Parses a chain of binary operators binding at least `min_precedence`.
    fn parse_binary(&mut self, min_precedence: u8) -> Result<Expr> {
        let mut lhs = self.parse_unary()?;

        while let Some(op) = binary_op(&self.current.kind) {
            if op.precedence() < min_precedence {
                break;
            }
            self.advance();
            let next_min = if op.is_right_assoc() {
                op.precedence()
            } else {
                op.precedence() + 1
            };
            let rhs = self.parse_binary(next_min)?;
            let span = lhs.span().to(rhs.span());
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }

        Ok(lhs)
    }

    /// Parses prefix `+`/`-` operators.
    fn parse_unary(&mut self) -> Result<Expr> {
        let op = match self.current.kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Plus => UnaryOp::Plus,
            _ => return self.parse_primary(),
        };
        let start = self.current.span;
        self.advance();
        self.enter()?;
        let operand = self.parse_binary(UNARY_OPERAND_PRECEDENCE)?;
        self.leave();
        let span = start.to(operand.span());
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            span,
        })
    }

    /// Parses numbers, identifiers, calls, and parenthesized expressions.
    fn parse_primary(&mut self) -> Result<Expr> {
        match &self.current.kind {
            TokenKind::Number(n) => {
                let n = *n;
                let span = self.current.span;
                self.advance();
                Ok(Expr::Number(n, span))
            }
            TokenKind::Ident(name) => {
                let name = name.clone();
                let span = self.current.span;
                self.advance();
                if self.current.kind == TokenKind::LParen {
                    self.parse_call(name, span)
                } else {
                    Ok(Expr::Ident(name, span))
                }
            }
            TokenKind::LParen => {
                self.advance();
                self.enter()?;
                let inner = self.parse_binary(0)?;
                self.leave();
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Eof => Err(self.error("unexpected end of input")),
            TokenKind::Error(msg) => Err(self.error(msg)),
            other => Err(self.error(&format!("unexpected {}", other.name()))),
        }
    }

    /// Parses an argument list after a function name.
    fn parse_call(&mut self, name: String, name_span: Span) -> Result<Expr> {
        self.expect(&TokenKind::LParen)?;
        self.enter()?;

        let mut args = Vec::new();
        if self.current.kind != TokenKind::RParen {
            loop {
                args.push(self.parse_binary(0)?);
                if self.current.kind == TokenKind::Comma {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.leave();

        let end = self.current.span;
        self.expect(&TokenKind::RParen)?;
        Ok(Expr::Call {
            name,
            args,
            span: name_span.to(end),
        })
    }

    /// Advances to the next token.
    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.error("expression nested too deeply"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<()> {
        let matches =
            std::mem::discriminant(&self.current.kind) == std::mem::discriminant(expected);

        if matches {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!(
                "expected {}, found {}",
                expected.name(),
                self.current.kind.name()
            )))
        }
    }

    /// Creates an expression error at the current position.
    fn error(&self, message: &str) -> Error {
        Error::expression(message, self.current.span.column)
    }
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Star => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Percent => Some(BinaryOp::Rem),
        TokenKind::Caret => Some(BinaryOp::Pow),
        _ => None,
    }
}

/// Parses expression text into an AST.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse(source: &str) -> Result<Expr> {
    Parser::new(source).parse()
}

//! Recursive-descent evaluator over a token sequence.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := factor (('*' | '/') factor)*
//! factor     := NUMBER | '(' expression ')'
//! ```
//!
//! Values are `i64`. Arithmetic is checked: overflow is an error,
//! never a wrap or a panic. Parenthesised groups may nest at most
//! [`MAX_NESTING`] deep.

use std::fmt;

use crate::token::{Operator, Token};

/// Deepest parenthesis nesting the evaluator accepts.
pub const MAX_NESTING: usize = 256;

/// Classifies an evaluation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Right operand of `/` evaluated to zero.
    DivisionByZero,
    /// A factor was expected, or tokens remain after the expression.
    MalformedExpression,
    /// `(` without a matching `)`.
    UnmatchedParenthesis,
    /// Intermediate or final value left the `i64` range.
    Overflow,
    /// More than [`MAX_NESTING`] open groups at once.
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::MalformedExpression => write!(f, "malformed expression"),
            Self::UnmatchedParenthesis => {
                write!(f, "expected ')'")
            }
            Self::Overflow => write!(f, "integer overflow"),
            Self::NestingTooDeep => {
                write!(f, "parentheses nested deeper than {MAX_NESTING}")
            }
        }
    }
}

/// Error produced during evaluation.
///
/// `position` is the index of the offending token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at token {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
}

/// Evaluate a token sequence produced by [`tokenize`](crate::tokenize).
///
/// # Errors
///
/// Returns `ParseError` on division by zero, a missing `)`,
/// a misplaced token, trailing tokens, overflow, or nesting past
/// [`MAX_NESTING`]. No partial result is produced.
pub fn evaluate(tokens: &[Token]) -> Result<i64, ParseError> {
    Parser::new(tokens).parse()
}

/// Integer division rounding toward negative infinity.
///
/// `floor_div(-7, 2) == Ok(-4)` and `floor_div(7, -2) == Ok(-4)`.
///
/// # Errors
///
/// `DivisionByZero` when `rhs` is zero, `Overflow` for
/// `i64::MIN / -1`.
pub const fn floor_div(lhs: i64, rhs: i64) -> Result<i64, ParseErrorKind> {
    if rhs == 0 {
        return Err(ParseErrorKind::DivisionByZero);
    }
    let Some(quotient) = lhs.checked_div(rhs) else {
        return Err(ParseErrorKind::Overflow);
    };
    if lhs % rhs != 0 && (lhs < 0) != (rhs < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

fn apply(op: Operator, lhs: i64, rhs: i64) -> Result<i64, ParseErrorKind> {
    let value = match op {
        Operator::Add => lhs.checked_add(rhs),
        Operator::Sub => lhs.checked_sub(rhs),
        Operator::Mul => lhs.checked_mul(rhs),
        Operator::Div => return floor_div(lhs, rhs),
    };
    value.ok_or(ParseErrorKind::Overflow)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn parse(mut self) -> Result<i64, ParseError> {
        let value = self.parse_expression()?;
        if self.current() != Token::End {
            return Err(self.error(ParseErrorKind::MalformedExpression));
        }
        log::debug!("evaluated {} tokens to {value}", self.pos);
        Ok(value)
    }

    // A slice without its sentinel reads as if terminated.
    fn current(&self) -> Token {
        self.tokens.get(self.pos).copied().unwrap_or(Token::End)
    }

    const fn advance(&mut self) {
        self.pos += 1;
    }

    const fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            kind,
            position: self.pos,
        }
    }

    fn parse_expression(&mut self) -> Result<i64, ParseError> {
        let mut acc = self.parse_term()?;

        while let Token::Operator(op @ (Operator::Add | Operator::Sub)) = self.current() {
            let at = self.pos;
            self.advance();
            let rhs = self.parse_term()?;
            acc = apply(op, acc, rhs).map_err(|kind| ParseError { kind, position: at })?;
        }

        Ok(acc)
    }

    fn parse_term(&mut self) -> Result<i64, ParseError> {
        let mut acc = self.parse_factor()?;

        while let Token::Operator(op) = self.current() {
            if !op.is_multiplicative() {
                break;
            }
            let at = self.pos;
            self.advance();
            let rhs = self.parse_factor()?;
            acc = apply(op, acc, rhs).map_err(|kind| ParseError { kind, position: at })?;
        }

        Ok(acc)
    }

    fn parse_factor(&mut self) -> Result<i64, ParseError> {
        match self.current() {
            Token::Number(n) => {
                self.advance();
                Ok(n)
            }
            Token::LeftParen => {
                if self.depth == MAX_NESTING {
                    return Err(self.error(ParseErrorKind::NestingTooDeep));
                }
                self.depth += 1;
                self.advance(); // skip (
                let value = self.parse_expression()?;
                if self.current() != Token::RightParen {
                    return Err(self.error(ParseErrorKind::UnmatchedParenthesis));
                }
                self.advance(); // skip )
                self.depth -= 1;
                Ok(value)
            }
            _ => Err(self.error(ParseErrorKind::MalformedExpression)),
        }
    }
}

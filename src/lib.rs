//! Integer calculator engine: tokenizer, recursive-descent
//! evaluator, and keystroke validator.
//!
//! The engine is pure. Every operation takes the current
//! expression as input and returns a value; no state is kept
//! between calls. [`Calculator`] is a convenience accumulator the
//! caller owns.
//!
//! # Quick start
//!
//! ## Evaluate an expression
//!
//! ```
//! use intcalc::evaluate_str;
//!
//! assert_eq!(evaluate_str("2+3×4").unwrap(), 14);
//! assert_eq!(evaluate_str("(2+3)*4").unwrap(), 20);
//! ```
//!
//! ## Gate keystrokes
//!
//! ```
//! use intcalc::can_append;
//!
//! assert!(can_append("3", '+'));
//! assert!(!can_append("3+", '+'));
//! ```
//!
//! ## Step through the pipeline
//!
//! ```
//! use intcalc::{evaluate, tokenize, validate_complete};
//!
//! let input = "7÷2";
//! assert!(validate_complete(input).valid);
//! let tokens = tokenize(input).unwrap();
//! assert_eq!(evaluate(&tokens).unwrap(), 3);
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod config;
pub mod formatter;
pub mod lexer;
pub mod parser;
pub mod session;
pub mod token;
pub mod validator;

pub use config::Config;
pub use formatter::{format_expression, format_tokens};
pub use lexer::{LexError, LexErrorKind, tokenize};
pub use parser::{MAX_NESTING, ParseError, ParseErrorKind, evaluate, floor_div};
pub use session::{Calculator, HistoryEntry, Key};
pub use token::{Operator, Token};
pub use validator::{
    ValidationErrorKind, ValidationResult, can_append, is_digit, is_operator, is_parenthesis,
    is_within_digit_limit, validate_complete,
};

/// Unified error type covering validation, lexing, evaluation,
/// and the result digit limit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The expression failed a structural check.
    #[error("{0}")]
    Validation(#[from] ValidationErrorKind),
    /// A lexer error.
    #[error("{0}")]
    Lex(#[from] LexError),
    /// An evaluation error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// The result has more digits than allowed.
    #[error("result {value} exceeds {max_digits} digits")]
    DigitLimitExceeded { value: i64, max_digits: u32 },
}

/// Flat classification of every failure the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    NumberOverflow,
    DivisionByZero,
    MalformedExpression,
    UnmatchedParenthesis,
    Overflow,
    NestingTooDeep,
    UnbalancedParentheses,
    LeadingOperator,
    TrailingOperator,
    ConsecutiveOperators,
    EmptyParentheses,
    EmptyExpression,
    DigitLimitExceeded,
}

impl Error {
    /// The error's kind, independent of location or payload.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(kind) => match kind {
                ValidationErrorKind::UnbalancedParentheses => ErrorKind::UnbalancedParentheses,
                ValidationErrorKind::LeadingOperator => ErrorKind::LeadingOperator,
                ValidationErrorKind::ConsecutiveOperators => ErrorKind::ConsecutiveOperators,
                ValidationErrorKind::TrailingOperator => ErrorKind::TrailingOperator,
                ValidationErrorKind::EmptyParentheses => ErrorKind::EmptyParentheses,
                ValidationErrorKind::EmptyExpression => ErrorKind::EmptyExpression,
            },
            Self::Lex(err) => match err.kind {
                LexErrorKind::InvalidCharacter(_) => ErrorKind::InvalidCharacter,
                LexErrorKind::NumberOverflow(_) => ErrorKind::NumberOverflow,
            },
            Self::Parse(err) => match err.kind {
                ParseErrorKind::DivisionByZero => ErrorKind::DivisionByZero,
                ParseErrorKind::MalformedExpression => ErrorKind::MalformedExpression,
                ParseErrorKind::UnmatchedParenthesis => ErrorKind::UnmatchedParenthesis,
                ParseErrorKind::Overflow => ErrorKind::Overflow,
                ParseErrorKind::NestingTooDeep => ErrorKind::NestingTooDeep,
            },
            Self::DigitLimitExceeded { .. } => ErrorKind::DigitLimitExceeded,
        }
    }

    /// Whether the caller should discard the current expression
    /// after showing this error.
    #[must_use]
    pub const fn requires_reset(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::DivisionByZero | ErrorKind::DigitLimitExceeded
        )
    }
}

/// Validate, tokenize, and evaluate an expression in one step.
pub fn evaluate_str(expression: &str) -> Result<i64, Error> {
    validate_complete(expression).into_result()?;
    let tokens = tokenize(expression)?;
    Ok(evaluate(&tokens)?)
}

/// [`evaluate_str`] followed by the digit-limit check from
/// `config`.
pub fn calculate(expression: &str, config: &Config) -> Result<i64, Error> {
    let value = evaluate_str(expression)?;
    if !is_within_digit_limit(value, config.max_digits) {
        return Err(Error::DigitLimitExceeded {
            value,
            max_digits: config.max_digits,
        });
    }
    Ok(value)
}

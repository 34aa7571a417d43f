//! Keystroke gating and whole-expression structural checks.
//!
//! Both operate on the raw expression string and never call the
//! lexer.

use crate::token::Operator;

/// Classifies a structural problem found by [`validate_complete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationErrorKind {
    /// Parenthesis count went negative or did not end at zero.
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// First character is an operator.
    #[error("expression starts with an operator")]
    LeadingOperator,
    /// Two operators in a row.
    #[error("consecutive operators")]
    ConsecutiveOperators,
    /// Last character is an operator.
    #[error("expression ends with an operator")]
    TrailingOperator,
    /// `()` somewhere in the expression.
    #[error("empty parentheses")]
    EmptyParentheses,
    /// Nothing but whitespace.
    #[error("empty expression")]
    EmptyExpression,
}

/// Outcome of [`validate_complete`].
///
/// `valid` is true exactly when `error` is `None`. Values built by
/// [`validate_complete`] always hold this; `error` is authoritative
/// for anything built by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<ValidationErrorKind>,
}

impl ValidationResult {
    const OK: Self = Self {
        valid: true,
        error: None,
    };

    const fn invalid(kind: ValidationErrorKind) -> Self {
        Self {
            valid: false,
            error: Some(kind),
        }
    }

    /// Convert into a `Result`, for use with `?`. Reads `error` only.
    ///
    /// # Errors
    ///
    /// Returns the recorded error kind when the expression is invalid.
    pub const fn into_result(self) -> Result<(), ValidationErrorKind> {
        match self.error {
            Some(kind) => Err(kind),
            None => Ok(()),
        }
    }
}

/// ASCII decimal digit.
#[must_use]
pub const fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Any of `+ - * / × ÷`.
#[must_use]
pub const fn is_operator(ch: char) -> bool {
    Operator::from_char(ch).is_some()
}

/// `(` or `)`.
#[must_use]
pub const fn is_parenthesis(ch: char) -> bool {
    matches!(ch, '(' | ')')
}

/// Class of the last character seen, which is all the state the
/// keystroke gate needs besides the parenthesis tally.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last {
    Start,
    Digit,
    Operator,
    OpenParen,
    CloseParen,
    Other,
}

impl Last {
    fn of(expression: &str) -> Self {
        match expression.chars().rev().find(|c| !c.is_whitespace()) {
            None => Self::Start,
            Some('(') => Self::OpenParen,
            Some(')') => Self::CloseParen,
            Some(c) if is_digit(c) => Self::Digit,
            Some(c) if is_operator(c) => Self::Operator,
            Some(_) => Self::Other,
        }
    }

    const fn ends_operand(self) -> bool {
        matches!(self, Self::Digit | Self::CloseParen)
    }
}

/// Decide whether `candidate` may be appended to `current`.
///
/// Digits are always accepted. An operator must follow a digit or
/// `)`. `(` must open the expression or follow an operator or `(`.
/// `)` must follow a digit or `)` and close a still-open group.
/// Any other character is rejected.
#[must_use]
pub fn can_append(current: &str, candidate: char) -> bool {
    let last = Last::of(current);

    let accepted = if is_digit(candidate) {
        true
    } else if is_operator(candidate) {
        last.ends_operand()
    } else if candidate == '(' {
        matches!(last, Last::Start | Last::Operator | Last::OpenParen)
    } else if candidate == ')' {
        open_groups(current) > 0 && last.ends_operand()
    } else {
        false
    };

    log::trace!("can_append({current:?}, {candidate:?}) after {last:?}: {accepted}");
    accepted
}

fn open_groups(expression: &str) -> isize {
    expression.chars().fold(0, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth - 1,
        _ => depth,
    })
}

/// Structural checks on a finished expression, run before it is
/// tokenized.
///
/// Checks run in a fixed order and the first failure wins:
/// balance, leading operator, consecutive operators, trailing
/// operator, empty `()`. Whitespace-only input is
/// `EmptyExpression`.
#[must_use]
pub fn validate_complete(expression: &str) -> ValidationResult {
    let result = check(expression).map_or_else(ValidationResult::invalid, |()| ValidationResult::OK);
    log::debug!("validate_complete({expression:?}): {result:?}");
    result
}

fn check(expression: &str) -> Result<(), ValidationErrorKind> {
    let normalized: Vec<char> = expression
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            other => other,
        })
        .collect();

    if normalized.is_empty() {
        return Err(ValidationErrorKind::EmptyExpression);
    }

    let mut depth = 0usize;
    for &c in &normalized {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ValidationErrorKind::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ValidationErrorKind::UnbalancedParentheses);
    }

    if is_operator(normalized[0]) {
        return Err(ValidationErrorKind::LeadingOperator);
    }

    if normalized
        .windows(2)
        .any(|pair| is_operator(pair[0]) && is_operator(pair[1]))
    {
        return Err(ValidationErrorKind::ConsecutiveOperators);
    }

    if normalized.last().copied().is_some_and(is_operator) {
        return Err(ValidationErrorKind::TrailingOperator);
    }

    if normalized.windows(2).any(|pair| pair == ['(', ')']) {
        return Err(ValidationErrorKind::EmptyParentheses);
    }

    Ok(())
}

/// Whether `value` has at most `max_digits` decimal digits,
/// ignoring sign.
#[must_use]
pub fn is_within_digit_limit(value: i64, max_digits: u32) -> bool {
    let digits = value.unsigned_abs().checked_ilog10().map_or(1, |d| d + 1);
    digits <= max_digits
}

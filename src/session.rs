//! A caller-owned calculator session.
//!
//! [`Calculator`] sequences keystrokes through the validator and
//! evaluator and keeps a short, in-memory history. It holds no
//! global state; drop it to forget everything.

use std::collections::VecDeque;

use crate::config::Config;
use crate::formatter::format_expression;
use crate::validator::{can_append, is_digit, is_operator};
use crate::{Error, calculate};

/// One successful evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Display-formatted expression.
    pub expression: String,
    pub result: i64,
}

/// A single user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Digit, operator, or parenthesis.
    Symbol(char),
    Evaluate,
    /// Clear the expression, result, and error.
    Clear,
    /// Remove the last character, or dismiss a shown result.
    Delete,
}

impl Key {
    /// Map a keyboard character to a key.
    ///
    /// `*` and `/` become the `×` and `÷` glyphs; `=` and newline
    /// evaluate; `c`/`C` clear; backspace and `<` delete. Other
    /// characters are passed through as symbols and left to the
    /// validator.
    #[must_use]
    pub const fn from_keyboard(ch: char) -> Self {
        match ch {
            '*' => Self::Symbol('×'),
            '/' => Self::Symbol('÷'),
            '=' | '\n' | '\r' => Self::Evaluate,
            'c' | 'C' => Self::Clear,
            '\u{8}' | '<' => Self::Delete,
            other => Self::Symbol(other),
        }
    }
}

/// Accumulated input, last result, pending error, and history.
#[derive(Debug, Clone)]
pub struct Calculator {
    config: Config,
    expression: String,
    result: Option<i64>,
    error: Option<Error>,
    history: VecDeque<HistoryEntry>,
}

impl Calculator {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            expression: String::new(),
            result: None,
            error: None,
            history: VecDeque::new(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Raw accumulated expression.
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Expression formatted for display.
    #[must_use]
    pub fn display(&self) -> String {
        format_expression(&self.expression)
    }

    /// Result of the last evaluation, while it is shown.
    #[must_use]
    pub const fn result(&self) -> Option<i64> {
        self.result
    }

    /// Error from the last evaluation, until the next keystroke.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Successful evaluations, newest first.
    #[must_use]
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Apply one key.
    pub fn press(&mut self, key: Key) {
        match key {
            Key::Symbol(ch) => {
                self.input(ch);
            }
            Key::Evaluate => {
                self.evaluate();
            }
            Key::Clear => self.clear(),
            Key::Delete => self.delete(),
        }
    }

    /// Append a symbol if the validator accepts it.
    ///
    /// While a result is shown, an operator continues from the
    /// result and a digit or `(` starts a new expression. A negative
    /// result continues as written, so `-4` then `-` gives `-4-`,
    /// which fails validation with a leading operator.
    pub fn input(&mut self, symbol: char) -> bool {
        self.error = None;

        if let Some(previous) = self.result.take() {
            if is_operator(symbol) {
                self.expression = format!("{previous}{symbol}");
            } else if is_digit(symbol) || symbol == '(' {
                self.expression = symbol.to_string();
            } else {
                self.result = Some(previous);
                log::debug!("rejected {symbol:?} after result {previous}");
                return false;
            }
            return true;
        }

        if !can_append(&self.expression, symbol) {
            log::debug!("rejected {symbol:?} after {:?}", self.expression);
            return false;
        }
        self.expression.push(symbol);
        true
    }

    /// Evaluate the accumulated expression.
    ///
    /// Returns `None` when there is nothing to evaluate. Errors
    /// that call for a reset also clear the expression; the error
    /// itself stays available through [`Calculator::error`].
    pub fn evaluate(&mut self) -> Option<Result<i64, Error>> {
        if self.expression.is_empty() {
            return None;
        }

        match calculate(&self.expression, &self.config) {
            Ok(value) => {
                self.result = Some(value);
                self.error = None;
                self.record(value);
                Some(Ok(value))
            }
            Err(err) => {
                log::debug!("evaluation of {:?} failed: {err}", self.expression);
                if err.requires_reset() {
                    self.expression.clear();
                    self.result = None;
                }
                self.error = Some(err.clone());
                Some(Err(err))
            }
        }
    }

    fn record(&mut self, result: i64) {
        self.history.push_front(HistoryEntry {
            expression: self.display(),
            result,
        });
        self.history.truncate(self.config.history_count);
    }

    /// Clear expression, result, and error. History is kept.
    pub fn clear(&mut self) {
        self.expression.clear();
        self.result = None;
        self.error = None;
    }

    /// Dismiss a shown result, or remove the last character.
    pub fn delete(&mut self) {
        self.error = None;
        if self.result.take().is_some() {
            return;
        }
        self.expression.pop();
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

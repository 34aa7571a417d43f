use std::fmt;

use crate::token::{Operator, Token};

/// Classifies a lexer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// Character outside the expression alphabet.
    InvalidCharacter(char),
    /// Digit run that does not fit in an `i64`.
    NumberOverflow(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter(ch) => {
                write!(f, "invalid character: {ch}")
            }
            Self::NumberOverflow(digits) => {
                write!(f, "number too large: {digits}")
            }
        }
    }
}

/// Error produced during lexing.
///
/// `offset` counts characters in the input after whitespace
/// has been removed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at offset {offset}")]
pub struct LexError {
    pub kind: LexErrorKind,
    pub offset: usize,
}

/// Tokenize an expression into a sequence terminated by
/// [`Token::End`].
///
/// Whitespace is ignored, digit runs become a single
/// [`Token::Number`], and `×`/`÷` are normalised to the same
/// operators as `*`/`/`.
///
/// # Errors
///
/// Returns `LexError` on the first character outside the
/// expression alphabet, or on a literal that overflows `i64`.
/// No partial token sequence is returned.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(input).tokenize()
}

struct Lexer {
    input: Vec<char>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            input: input.chars().filter(|c| !c.is_whitespace()).collect(),
            pos: 0,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::with_capacity(self.input.len() + 1);

        while let Some(ch) = self.peek() {
            let token = match ch {
                '0'..='9' => self.read_number()?,
                '(' => {
                    self.pos += 1;
                    Token::LeftParen
                }
                ')' => {
                    self.pos += 1;
                    Token::RightParen
                }
                _ => {
                    let Some(op) = Operator::from_char(ch) else {
                        return Err(LexError {
                            kind: LexErrorKind::InvalidCharacter(ch),
                            offset: self.pos,
                        });
                    };
                    self.pos += 1;
                    Token::Operator(op)
                }
            };
            log::trace!("token {token:?} ending at offset {}", self.pos);
            tokens.push(token);
        }

        tokens.push(Token::End);
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn read_number(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }

        let digits: String = self.input[start..self.pos].iter().collect();
        digits
            .parse::<i64>()
            .map(Token::Number)
            .map_err(|_| LexError {
                kind: LexErrorKind::NumberOverflow(digits),
                offset: start,
            })
    }
}

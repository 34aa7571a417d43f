use std::fmt;

/// One of the four arithmetic operators, in canonical form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*` or `×`
    Mul,
    /// `/` or `÷`
    Div,
}

impl Operator {
    /// Classify an operator character, collapsing the display
    /// glyphs `×` and `÷` onto their ASCII counterparts.
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' | '×' => Some(Self::Mul),
            '/' | '÷' => Some(Self::Div),
            _ => None,
        }
    }

    /// Canonical ASCII symbol.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Symbol shown to the user.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '×',
            Self::Div => '÷',
        }
    }

    /// Whether the operator binds at the `term` level.
    #[must_use]
    pub const fn is_multiplicative(self) -> bool {
        matches!(self, Self::Mul | Self::Div)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Tokens produced by the lexer.
///
/// A well-formed sequence ends with exactly one [`Token::End`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Non-negative integer literal.
    Number(i64),
    /// Arithmetic operator.
    Operator(Operator),
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// Lookahead sentinel.
    End,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::LeftParen => write!(f, "("),
            Self::RightParen => write!(f, ")"),
            Self::End => Ok(()),
        }
    }
}

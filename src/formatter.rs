//! Display formatting for expressions and token sequences.

use crate::token::Token;

/// Format an expression for display.
///
/// Replaces `*` and `/` with `×` and `÷`, collapses runs of
/// whitespace to a single space, and trims both ends. Purely
/// cosmetic: the result evaluates the same as the input.
#[must_use]
pub fn format_expression(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len());

    for word in expression.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        for ch in word.chars() {
            out.push(match ch {
                '*' => '×',
                '/' => '÷',
                other => other,
            });
        }
    }

    out
}

/// Render a token sequence back to canonical ASCII text with no
/// whitespace. The trailing `End` sentinel renders as nothing.
#[must_use]
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn glyphs_substituted() {
        assert_eq!(format_expression("2*3/4"), "2×3÷4");
        assert_eq!(format_expression("2×3÷4"), "2×3÷4");
    }

    #[test]
    fn whitespace_collapsed_and_trimmed() {
        assert_eq!(format_expression("  1 +\t\t2  "), "1 + 2");
        assert_eq!(format_expression("   "), "");
    }

    #[test]
    fn idempotent() {
        let once = format_expression(" (1 * 2)  /3 ");
        assert_eq!(format_expression(&once), once);
    }

    #[test]
    fn tokens_to_canonical_text() {
        let tokens = tokenize("( 12 × 3 ) ÷ 4 - 1").expect("should tokenize");
        assert_eq!(format_tokens(&tokens), "(12*3)/4-1");
    }
}

//! Property-based tests with proptest.
//!
//! Generate random well-formed expressions alongside their
//! reference value, and random keystroke streams, then check the
//! engine against them.

use intcalc::{
    Error, ErrorKind, Token, ValidationErrorKind, can_append, evaluate_str, floor_div,
    format_expression, format_tokens, tokenize, validate_complete,
};
use proptest::prelude::*;

// -- Strategies --

/// A well-formed expression paired with its value, or `None` if
/// evaluation must fail with division by zero. Operands stay small
/// so nothing overflows.
fn expr(depth: u32) -> BoxedStrategy<(String, Option<i64>)> {
    let leaf = (0i64..100).prop_map(|n| (n.to_string(), Some(n)));
    if depth == 0 {
        return leaf.boxed();
    }

    let op = prop_oneof![Just('+'), Just('-'), Just('×'), Just('÷'), Just('*'), Just('/')];
    let binary = (expr(depth - 1), op, expr(depth - 1)).prop_map(|((l, lv), op, (r, rv))| {
        // Parenthesise both sides so the reference value does not
        // depend on precedence.
        let text = format!("({l}){op}({r})");
        let value = match (lv, rv) {
            (Some(a), Some(b)) => match op {
                '+' => Some(a + b),
                '-' => Some(a - b),
                '×' | '*' => Some(a * b),
                _ => floor_div(a, b).ok(),
            },
            _ => None,
        };
        (text, value)
    });

    prop_oneof![
        2 => leaf,
        3 => binary,
    ]
    .boxed()
}

/// Random keystrokes drawn from the full input alphabet.
fn keystrokes() -> impl Strategy<Value = Vec<char>> {
    prop::collection::vec(
        prop::sample::select(vec![
            '0', '1', '7', '9', '+', '-', '×', '÷', '(', ')',
        ]),
        0..40,
    )
}

// -- Property tests --

proptest! {
    /// Evaluation matches the reference value, or reports division
    /// by zero when the reference has none.
    #[test]
    fn eval_matches_reference((text, value) in expr(3)) {
        let result = evaluate_str(&text);
        match value {
            Some(v) => prop_assert_eq!(result, Ok(v)),
            None => prop_assert_eq!(
                result.map_err(|e| e.kind()),
                Err(ErrorKind::DivisionByZero)
            ),
        }
    }

    /// Generated expressions always pass structural validation.
    #[test]
    fn generated_exprs_validate((text, _) in expr(3)) {
        prop_assert!(validate_complete(&text).valid);
    }

    /// `+` and `-` bind looser than `*` and `/`.
    #[test]
    fn precedence(a in 0i64..1000, b in 0i64..1000, c in 1i64..1000) {
        prop_assert_eq!(evaluate_str(&format!("{a}+{b}*{c}")), Ok(a + b * c));
        prop_assert_eq!(evaluate_str(&format!("{a}-{b}/{c}")), Ok(a - b / c));
    }

    /// Floor division satisfies `q * b + r == a` with `r` taking
    /// the sign of `b`.
    #[test]
    fn floor_div_law(a in -10_000i64..10_000, b in -100i64..100) {
        prop_assume!(b != 0);
        let q = floor_div(a, b).expect("non-zero divisor");
        let r = a - q * b;
        prop_assert!(r == 0 || (r < 0) == (b < 0));
        prop_assert!(r.abs() < b.abs());
    }

    /// Formatting is idempotent for any input.
    #[test]
    fn format_idempotent(s in "\\PC*") {
        let once = format_expression(&s);
        prop_assert_eq!(format_expression(&once), once);
    }

    /// Tokenizing, rendering canonically, and tokenizing again gives
    /// the same tokens.
    #[test]
    fn tokenize_roundtrip((text, _) in expr(3)) {
        let tokens = tokenize(&text).expect("tokenize");
        let canonical = format_tokens(&tokens);
        prop_assert_eq!(tokenize(&canonical).expect("re-tokenize"), tokens);
    }

    /// Operator order survives tokenization modulo glyph choice.
    #[test]
    fn tokenize_preserves_operator_sequence((text, _) in expr(3)) {
        let from_text: String = text
            .chars()
            .filter_map(|c| match c {
                '×' => Some('*'),
                '÷' => Some('/'),
                '+' | '-' | '*' | '/' => Some(c),
                _ => None,
            })
            .collect();
        let from_tokens: String = tokenize(&text)
            .expect("tokenize")
            .iter()
            .filter_map(|t| match t {
                Token::Operator(op) => Some(op.symbol()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(from_text, from_tokens);
    }

    /// Anything built through the keystroke gate never has two
    /// operators in a row, never starts with an operator, and never
    /// contains `()`.
    #[test]
    fn gate_builds_plausible_prefixes(keys in keystrokes()) {
        let mut expression = String::new();
        for key in keys {
            if can_append(&expression, key) {
                expression.push(key);
            }
        }
        if let Some(err) = validate_complete(&expression).error {
            prop_assert!(
                !matches!(
                    err,
                    ValidationErrorKind::ConsecutiveOperators
                        | ValidationErrorKind::LeadingOperator
                        | ValidationErrorKind::EmptyParentheses
                ),
                "{expression:?}: {err:?}"
            );
        }
    }

    /// Gate-built input that passes validation never contains a
    /// character the tokenizer rejects.
    #[test]
    fn validated_input_tokenizes_cleanly(keys in keystrokes()) {
        let mut expression = String::new();
        for key in keys {
            if can_append(&expression, key) {
                expression.push(key);
            }
        }
        if validate_complete(&expression).valid {
            if let Err(e @ Error::Lex(_)) = evaluate_str(&expression) {
                prop_assert_eq!(e.kind(), ErrorKind::NumberOverflow);
            }
        }
    }
}

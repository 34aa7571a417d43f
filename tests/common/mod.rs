#![allow(dead_code)]

use intcalc::{ErrorKind, can_append, evaluate_str};

/// Helper: feed `keys` one at a time through `can_append`, keeping
/// only the accepted ones, and return the accumulated expression.
pub fn accumulate(keys: &str) -> String {
    let mut expression = String::new();
    for ch in keys.chars() {
        if can_append(&expression, ch) {
            expression.push(ch);
        }
    }
    expression
}

/// Helper: evaluate and assert the value.
pub fn assert_value(input: &str, expected: i64) {
    let value = evaluate_str(input)
        .unwrap_or_else(|e| panic!("failed to evaluate {input:?}: {e}"));
    assert_eq!(value, expected, "wrong value for {input:?}");
}

/// Helper: evaluate and assert the error kind.
pub fn assert_error(input: &str, expected: ErrorKind) {
    match evaluate_str(input) {
        Ok(value) => panic!("{input:?} evaluated to {value}, expected {expected:?}"),
        Err(e) => assert_eq!(e.kind(), expected, "wrong error for {input:?}: {e}"),
    }
}

use crate::{parse, ExprError};
use pretty_assertions::assert_eq;

fn shape(source: &str) -> String {
    parse(source).expect("parse should succeed").to_string()
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(shape("1 + 2 * 3"), "(1 + (2 * 3))");
}

#[test]
fn binary_operators_are_left_associative() {
    assert_eq!(shape("10 - 4 - 3"), "((10 - 4) - 3)");
    assert_eq!(shape("8 / 2 % 3"), "((8 / 2) % 3)");
}

#[test]
fn comparison_below_arithmetic() {
    assert_eq!(shape("x + 1 < y * 2"), "((x + 1) < (y * 2))");
}

#[test]
fn logical_operators_lowest() {
    assert_eq!(
        shape("a == 1 || b != 2 && c"),
        "((a == 1) || ((b != 2) && c))"
    );
}

#[test]
fn parentheses_override_precedence() {
    assert_eq!(shape("(1 + 2) * 3"), "((1 + 2) * 3)");
}

#[test]
fn unary_operators() {
    assert_eq!(shape("-x + !y"), "(-x + !y)");
    assert_eq!(shape("--3"), "--3");
}

#[test]
fn empty_input_is_rejected() {
    assert_eq!(parse("   "), Err(ExprError::Empty));
}

#[test]
fn trailing_tokens_are_rejected() {
    assert!(matches!(
        parse("1 2"),
        Err(ExprError::UnexpectedToken { offset: 2, .. })
    ));
}

#[test]
fn missing_close_paren() {
    assert!(matches!(
        parse("(1 + 2"),
        Err(ExprError::UnexpectedToken { expected: "`)`", .. })
    ));
}

#[test]
fn dangling_operator() {
    assert!(matches!(
        parse("x <"),
        Err(ExprError::UnexpectedToken { expected: "a value", .. })
    ));
}

#[test]
fn deep_nesting_does_not_overflow() {
    let depth = 5_000;
    let source = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    let expr = parse(&source).expect("deeply nested parse");
    assert_eq!(expr.len(), 1);
}

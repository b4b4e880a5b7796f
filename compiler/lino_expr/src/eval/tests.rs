use crate::{evaluate, ExprError, Outcome};
use lino_ir::Value;
use pretty_assertions::assert_eq;

fn no_vars(_: &str) -> Option<Value> {
    None
}

fn eval(source: &str) -> Result<Outcome, ExprError> {
    evaluate(source, &no_vars)
}

#[test]
fn arithmetic() {
    assert_eq!(eval("2 + 3"), Ok(Outcome::Number(5.0)));
    assert_eq!(eval("2 + 3 * 4"), Ok(Outcome::Number(14.0)));
    assert_eq!(eval("(2 + 3) * 4"), Ok(Outcome::Number(20.0)));
    assert_eq!(eval("7 % 4"), Ok(Outcome::Number(3.0)));
    assert_eq!(eval("-3 + 1"), Ok(Outcome::Number(-2.0)));
}

#[test]
fn division_by_zero_is_infinite() {
    assert_eq!(eval("1 / 0"), Ok(Outcome::Number(f64::INFINITY)));
}

#[test]
fn comparisons_yield_booleans() {
    assert_eq!(eval("1 < 3"), Ok(Outcome::Bool(true)));
    assert_eq!(eval("3 <= 3"), Ok(Outcome::Bool(true)));
    assert_eq!(eval("2 > 3"), Ok(Outcome::Bool(false)));
    assert_eq!(eval("\"abc\" < \"abd\""), Ok(Outcome::Bool(true)));
}

#[test]
fn equality_across_kinds_is_false() {
    assert_eq!(eval("1 == \"1\""), Ok(Outcome::Bool(false)));
    assert_eq!(eval("1 != \"1\""), Ok(Outcome::Bool(true)));
    assert_eq!(eval("\"a\" == 'a'"), Ok(Outcome::Bool(true)));
}

#[test]
fn logical_operators_short_circuit() {
    // `missing` is never resolved because the left side decides.
    assert_eq!(eval("false && missing"), Ok(Outcome::Bool(false)));
    assert_eq!(eval("1 || missing"), Ok(Outcome::Bool(true)));
    assert_eq!(eval("!0"), Ok(Outcome::Bool(true)));
}

#[test]
fn string_concatenation() {
    assert_eq!(eval("\"n=\" + 5"), Ok(Outcome::Text("n=5".into())));
}

#[test]
fn variables_resolve_through_callback() {
    let resolve = |name: &str| match name {
        "x" => Some(Value::Number(4.0)),
        "s" => Some(Value::Text("hi".into())),
        _ => None,
    };
    assert_eq!(evaluate("x * x", &resolve), Ok(Outcome::Number(16.0)));
    assert_eq!(evaluate("s == \"hi\"", &resolve), Ok(Outcome::Bool(true)));
}

#[test]
fn undefined_variable() {
    assert_eq!(
        eval("y + 1"),
        Err(ExprError::UndefinedVariable { name: "y".into() })
    );
}

#[test]
fn type_errors() {
    assert_eq!(
        eval("\"a\" - 1"),
        Err(ExprError::InvalidOperands {
            op: "-",
            left: "string",
            right: "number",
        })
    );
    assert_eq!(
        eval("-\"a\""),
        Err(ExprError::InvalidOperand {
            op: "-",
            operand: "string",
        })
    );
    assert!(eval("\"a\" && true").is_err());
}

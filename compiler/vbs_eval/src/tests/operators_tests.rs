//! Operator semantics.

use pretty_assertions::assert_eq;
use vbs_ir::{BinaryOp, UnaryOp};

use crate::{evaluate_binary, evaluate_unary, EvalErrorKind, ObjectValue, Value};

fn num(n: f64) -> Value {
    Value::Number(n)
}

fn s(text: &str) -> Value {
    Value::string(text)
}

fn binary(left: Value, op: BinaryOp, right: Value) -> Value {
    evaluate_binary(&left, &right, op).unwrap()
}

fn binary_error(left: Value, op: BinaryOp, right: Value) -> EvalErrorKind {
    evaluate_binary(&left, &right, op).unwrap_err().kind
}

#[test]
fn test_arithmetic() {
    assert_eq!(binary(num(2.0), BinaryOp::Add, num(3.0)), num(5.0));
    assert_eq!(binary(num(7.0), BinaryOp::Sub, num(10.0)), num(-3.0));
    assert_eq!(binary(num(7.0), BinaryOp::Div, num(2.0)), num(3.5));
    assert_eq!(binary(num(2.0), BinaryOp::Pow, num(10.0)), num(1024.0));
}

#[test]
fn test_integer_division_truncates() {
    assert_eq!(binary(num(7.0), BinaryOp::IntDiv, num(2.0)), num(3.0));
    assert_eq!(binary(num(-7.0), BinaryOp::IntDiv, num(2.0)), num(-3.0));
}

#[test]
fn test_mod_rounds_operands() {
    assert_eq!(binary(num(5.0), BinaryOp::Mod, num(3.0)), num(2.0));
    assert_eq!(binary(num(-7.0), BinaryOp::Mod, num(3.0)), num(-1.0));
    assert_eq!(binary(num(5.6), BinaryOp::Mod, num(3.0)), num(0.0));
}

#[test]
fn test_division_by_zero() {
    for op in [BinaryOp::Div, BinaryOp::IntDiv, BinaryOp::Mod] {
        assert_eq!(
            binary_error(num(1.0), op, num(0.0)),
            EvalErrorKind::DivisionByZero { op }
        );
    }
    assert_eq!(
        binary_error(num(1.0), BinaryOp::Mod, num(0.4)),
        EvalErrorKind::DivisionByZero { op: BinaryOp::Mod }
    );
}

#[test]
fn test_plus_on_strings() {
    assert_eq!(binary(s("a"), BinaryOp::Add, s("b")), s("ab"));
    assert_eq!(binary(s("1"), BinaryOp::Add, num(2.0)), num(3.0));
    assert_eq!(binary(Value::Empty, BinaryOp::Add, num(2.0)), num(2.0));
    assert!(matches!(
        binary_error(s("a"), BinaryOp::Add, num(1.0)),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_concat_uses_display_text() {
    assert_eq!(binary(s("a"), BinaryOp::Concat, Value::Null), s("a"));
    assert_eq!(
        binary(num(1.0), BinaryOp::Concat, Value::Boolean(true)),
        s("1True")
    );
    assert_eq!(binary(num(2.5), BinaryOp::Concat, Value::Empty), s("2.5"));
    assert!(matches!(
        binary_error(Value::object(ObjectValue::new()), BinaryOp::Concat, s("")),
        EvalErrorKind::TypeMismatch { .. }
    ));
}

#[test]
fn test_comparisons() {
    assert_eq!(binary(s("a"), BinaryOp::Lt, s("b")), Value::Boolean(true));
    // Text comparison, not numeric.
    assert_eq!(binary(s("10"), BinaryOp::Lt, s("9")), Value::Boolean(true));
    assert_eq!(binary(num(10.0), BinaryOp::Lt, num(9.0)), Value::Boolean(false));
    assert_eq!(binary(s("A"), BinaryOp::Eq, s("a")), Value::Boolean(false));
    assert_eq!(binary(Value::Empty, BinaryOp::Eq, s("")), Value::Boolean(true));
    assert_eq!(binary(Value::Empty, BinaryOp::Eq, num(0.0)), Value::Boolean(true));
    assert_eq!(binary(s("3"), BinaryOp::GtEq, num(3.0)), Value::Boolean(true));
    assert_eq!(
        binary(Value::Boolean(true), BinaryOp::Eq, num(-1.0)),
        Value::Boolean(true)
    );
    assert_eq!(binary(num(1.0), BinaryOp::NotEq, num(2.0)), Value::Boolean(true));
    assert_eq!(binary(num(2.0), BinaryOp::LtEq, num(2.0)), Value::Boolean(true));
    assert_eq!(binary(num(2.0), BinaryOp::Gt, num(2.0)), Value::Boolean(false));
}

#[test]
fn test_null_in_arithmetic() {
    assert!(matches!(
        binary_error(Value::Null, BinaryOp::Add, num(1.0)),
        EvalErrorKind::InvalidUseOfNull { .. }
    ));
}

#[test]
fn test_logical_on_booleans() {
    let t = Value::Boolean(true);
    let f = Value::Boolean(false);
    assert_eq!(binary(t.clone(), BinaryOp::And, f.clone()), f);
    assert_eq!(binary(t.clone(), BinaryOp::Or, f.clone()), t);
    assert_eq!(binary(t.clone(), BinaryOp::Xor, t.clone()), f);
    assert_eq!(evaluate_unary(&t, UnaryOp::Not).unwrap(), f);
}

#[test]
fn test_logical_is_bitwise_on_numbers() {
    assert_eq!(binary(num(12.0), BinaryOp::And, num(10.0)), num(8.0));
    assert_eq!(binary(num(12.0), BinaryOp::Or, num(3.0)), num(15.0));
    assert_eq!(binary(num(6.0), BinaryOp::Xor, num(3.0)), num(5.0));
    assert_eq!(binary(Value::Boolean(true), BinaryOp::And, num(1.0)), num(1.0));
    assert_eq!(evaluate_unary(&num(0.0), UnaryOp::Not).unwrap(), num(-1.0));
    assert_eq!(evaluate_unary(&num(5.0), UnaryOp::Not).unwrap(), num(-6.0));
}

#[test]
fn test_negation() {
    assert_eq!(evaluate_unary(&s("4"), UnaryOp::Neg).unwrap(), num(-4.0));
    assert_eq!(
        evaluate_unary(&Value::Boolean(true), UnaryOp::Neg).unwrap(),
        num(1.0)
    );
}

#[test]
fn test_is_identity() {
    let a = Value::object(ObjectValue::new());
    let b = Value::object(ObjectValue::new());
    assert_eq!(binary(Value::Nothing, BinaryOp::Is, Value::Nothing), Value::Boolean(true));
    assert_eq!(binary(a.clone(), BinaryOp::Is, a.clone()), Value::Boolean(true));
    assert_eq!(binary(a.clone(), BinaryOp::Is, b), Value::Boolean(false));
    assert_eq!(binary(a, BinaryOp::Is, Value::Nothing), Value::Boolean(false));
    assert!(matches!(
        binary_error(num(1.0), BinaryOp::Is, num(1.0)),
        EvalErrorKind::ObjectRequired { .. }
    ));
}

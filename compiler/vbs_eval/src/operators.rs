//! Binary and unary operator implementations.
//!
//! Direct enum-based dispatch. Both operands are always evaluated by the
//! caller before reaching here; VBScript has no short-circuit operators.

use std::cmp::Ordering;

use vbs_ir::{BinaryOp, UnaryOp};

use crate::errors::{division_by_zero, object_required};
use crate::{EvalResult, Value};

/// Evaluate a binary operation.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult<Value> {
    match op {
        BinaryOp::Add => match (left, right) {
            (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
            _ => numeric(left, right, |a, b| Ok(a + b)),
        },
        BinaryOp::Sub => numeric(left, right, |a, b| Ok(a - b)),
        BinaryOp::Mul => numeric(left, right, |a, b| Ok(a * b)),
        BinaryOp::Div => numeric(left, right, |a, b| {
            if b == 0.0 {
                return Err(division_by_zero(op));
            }
            Ok(a / b)
        }),
        BinaryOp::IntDiv => numeric(left, right, |a, b| {
            if b == 0.0 {
                return Err(division_by_zero(op));
            }
            Ok((a / b).trunc())
        }),
        BinaryOp::Pow => numeric(left, right, |a, b| Ok(a.powf(b))),
        BinaryOp::Mod => numeric(left, right, |a, b| {
            // `mod` works on the operands rounded to integers.
            let (a, b) = (round_to_integer(a), round_to_integer(b));
            if b == 0 {
                return Err(division_by_zero(op));
            }
            Ok(a.wrapping_rem(b) as f64)
        }),
        BinaryOp::Concat => {
            let mut text = left.to_text()?;
            text.push_str(&right.to_text()?);
            Ok(Value::String(text))
        }
        BinaryOp::Eq => Ok(Value::Boolean(compare(left, right)? == Some(Ordering::Equal))),
        BinaryOp::NotEq => Ok(Value::Boolean(compare(left, right)? != Some(Ordering::Equal))),
        BinaryOp::Lt => Ok(Value::Boolean(compare(left, right)? == Some(Ordering::Less))),
        BinaryOp::LtEq => Ok(Value::Boolean(matches!(
            compare(left, right)?,
            Some(Ordering::Less | Ordering::Equal)
        ))),
        BinaryOp::Gt => Ok(Value::Boolean(compare(left, right)? == Some(Ordering::Greater))),
        BinaryOp::GtEq => Ok(Value::Boolean(matches!(
            compare(left, right)?,
            Some(Ordering::Greater | Ordering::Equal)
        ))),
        BinaryOp::And => eval_logical(left, right, |a, b| a & b),
        BinaryOp::Or => eval_logical(left, right, |a, b| a | b),
        BinaryOp::Xor => eval_logical(left, right, |a, b| a ^ b),
        BinaryOp::Is => Ok(Value::Boolean(is_same(left, right)?)),
    }
}

/// Evaluate a unary operation.
pub fn evaluate_unary(operand: &Value, op: UnaryOp) -> EvalResult<Value> {
    match (op, operand) {
        (UnaryOp::Not, Value::Boolean(b)) => Ok(Value::Boolean(!b)),
        (UnaryOp::Not, _) => Ok(Value::Number(!to_integer(operand)? as f64)),
        (UnaryOp::Neg, _) => Ok(Value::Number(-operand.to_number()?)),
    }
}

/// `=` as used by `select case`.
pub fn compare_equal(left: &Value, right: &Value) -> EvalResult<bool> {
    Ok(compare(left, right)? == Some(Ordering::Equal))
}

fn numeric(
    left: &Value,
    right: &Value,
    op: impl FnOnce(f64, f64) -> EvalResult<f64>,
) -> EvalResult<Value> {
    op(left.to_number()?, right.to_number()?).map(Value::Number)
}

/// Ordering used by the comparison operators. Two strings (or a string
/// and `Empty`) compare as text, everything else numerically. `None` for
/// unordered numbers (NaN).
fn compare(left: &Value, right: &Value) -> EvalResult<Option<Ordering>> {
    let ordering = match (left, right) {
        (Value::String(a), Value::String(b)) => a.as_str().cmp(b.as_str()),
        (Value::Empty, Value::String(b)) => "".cmp(b.as_str()),
        (Value::String(a), Value::Empty) => a.as_str().cmp(""),
        _ => return Ok(left.to_number()?.partial_cmp(&right.to_number()?)),
    };
    Ok(Some(ordering))
}

/// `and`/`or`/`xor`: logical on two Booleans, bitwise otherwise. `True` is
/// all bits set, so the Boolean case is the bitwise case on -1/0.
fn eval_logical(left: &Value, right: &Value, op: fn(i64, i64) -> i64) -> EvalResult<Value> {
    let result = op(to_integer(left)?, to_integer(right)?);
    match (left, right) {
        (Value::Boolean(_), Value::Boolean(_)) => Ok(Value::Boolean(result != 0)),
        _ => Ok(Value::Number(result as f64)),
    }
}

fn is_same(left: &Value, right: &Value) -> EvalResult<bool> {
    match (left, right) {
        (Value::Nothing, Value::Nothing) => Ok(true),
        (Value::Object(a), Value::Object(b)) => Ok(std::rc::Rc::ptr_eq(a, b)),
        (Value::Function(a), Value::Function(b)) => Ok(a.ptr_eq(b)),
        (
            Value::Nothing | Value::Object(_) | Value::Function(_),
            Value::Nothing | Value::Object(_) | Value::Function(_),
        ) => Ok(false),
        _ => Err(object_required("is")),
    }
}

fn to_integer(value: &Value) -> EvalResult<i64> {
    Ok(round_to_integer(value.to_number()?))
}

/// Banker's rounding, saturating at the `i64` range.
fn round_to_integer(n: f64) -> i64 {
    n.round_ties_even() as i64
}

//! Binary operator semantics over [`Value`].
//!
//! Integer arithmetic is checked; on overflow the operation is redone
//! in big-integer space and the result normalized back down when it
//! fits. No implicit coercion between numbers and other types.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::{ToPrimitive, Zero};
use sona_ir::BinaryOp;
use sona_syntax::{DiagnosticKind, DiagnosticsFormatter};

use crate::core::value::Value;

fn type_mismatch(op: &'static str, left: &Value, right: &Value) -> String {
    DiagnosticsFormatter::format(&DiagnosticKind::TypeMismatch {
        op,
        left: left.type_name().to_string(),
        right: right.type_name().to_string(),
    })
}

fn division_by_zero() -> String {
    DiagnosticsFormatter::format(&DiagnosticKind::DivisionByZero)
}

fn big_of(v: &Value) -> Option<BigInt> {
    match v {
        Value::Int(i) => Some(BigInt::from(*i)),
        Value::Big(b) => Some((**b).clone()),
        _ => None,
    }
}

fn float_of(v: &Value) -> Option<f64> {
    match v {
        Value::Int(i) => Some(*i as f64),
        Value::Big(b) => b.to_f64(),
        Value::Float(x) => Some(*x),
        _ => None,
    }
}

/// Numeric and string ordering. `None` when the operands are not
/// mutually comparable.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Big(a), Value::Big(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Big(b)) => Some(BigInt::from(*a).cmp(b)),
        (Value::Big(a), Value::Int(b)) => Some((**a).cmp(&BigInt::from(*b))),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ if left.is_numeric() && right.is_numeric() => {
            float_of(left)?.partial_cmp(&float_of(right)?)
        }
        _ => None,
    }
}

fn add(left: &Value, right: &Value) -> Result<Value, String> {
    // `+` concatenates when either side is text.
    if let (Value::Str(_), _) | (_, Value::Str(_)) = (left, right) {
        return Ok(Value::str(format!("{}{}", left, right)));
    }
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => match a.checked_add(*b) {
            Some(v) => Ok(Value::Int(v)),
            None => Ok(Value::from_big(BigInt::from(*a) + BigInt::from(*b))),
        },
        _ if matches!(left, Value::Float(_)) || matches!(right, Value::Float(_)) => {
            match (float_of(left), float_of(right)) {
                (Some(a), Some(b)) => Ok(Value::Float(a + b)),
                _ => Err(type_mismatch("+", left, right)),
            }
        }
        _ => match (big_of(left), big_of(right)) {
            (Some(a), Some(b)) => Ok(Value::from_big(a + b)),
            _ => Err(type_mismatch("+", left, right)),
        },
    }
}

fn sub(left: &Value, right: &Value) -> Result<Value, String> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => match a.checked_sub(*b) {
            Some(v) => Ok(Value::Int(v)),
            None => Ok(Value::from_big(BigInt::from(*a) - BigInt::from(*b))),
        },
        _ if matches!(left, Value::Float(_)) || matches!(right, Value::Float(_)) => {
            match (float_of(left), float_of(right)) {
                (Some(a), Some(b)) => Ok(Value::Float(a - b)),
                _ => Err(type_mismatch("-", left, right)),
            }
        }
        _ => match (big_of(left), big_of(right)) {
            (Some(a), Some(b)) => Ok(Value::from_big(a - b)),
            _ => Err(type_mismatch("-", left, right)),
        },
    }
}

fn mul(left: &Value, right: &Value) -> Result<Value, String> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => match a.checked_mul(*b) {
            Some(v) => Ok(Value::Int(v)),
            None => Ok(Value::from_big(BigInt::from(*a) * BigInt::from(*b))),
        },
        _ if matches!(left, Value::Float(_)) || matches!(right, Value::Float(_)) => {
            match (float_of(left), float_of(right)) {
                (Some(a), Some(b)) => Ok(Value::Float(a * b)),
                _ => Err(type_mismatch("*", left, right)),
            }
        }
        _ => match (big_of(left), big_of(right)) {
            (Some(a), Some(b)) => Ok(Value::from_big(a * b)),
            _ => Err(type_mismatch("*", left, right)),
        },
    }
}

fn div(left: &Value, right: &Value) -> Result<Value, String> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            if *b == 0 {
                return Err(division_by_zero());
            }
            match a.checked_div(*b) {
                Some(v) => Ok(Value::Int(v)),
                // i64::MIN / -1
                None => Ok(Value::from_big(BigInt::from(*a) / BigInt::from(*b))),
            }
        }
        _ if matches!(left, Value::Float(_)) || matches!(right, Value::Float(_)) => {
            match (float_of(left), float_of(right)) {
                (Some(a), Some(b)) => {
                    if b == 0.0 {
                        Err(division_by_zero())
                    } else {
                        Ok(Value::Float(a / b))
                    }
                }
                _ => Err(type_mismatch("/", left, right)),
            }
        }
        _ => match (big_of(left), big_of(right)) {
            (Some(a), Some(b)) => {
                if b.is_zero() {
                    Err(division_by_zero())
                } else {
                    Ok(Value::from_big(a / b))
                }
            }
            _ => Err(type_mismatch("/", left, right)),
        },
    }
}

fn rem(left: &Value, right: &Value) -> Result<Value, String> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => {
            if *b == 0 {
                return Err(division_by_zero());
            }
            match a.checked_rem(*b) {
                Some(v) => Ok(Value::Int(v)),
                None => Ok(Value::Int(0)),
            }
        }
        _ if matches!(left, Value::Float(_)) || matches!(right, Value::Float(_)) => {
            match (float_of(left), float_of(right)) {
                (Some(a), Some(b)) => {
                    if b == 0.0 {
                        Err(division_by_zero())
                    } else {
                        Ok(Value::Float(a % b))
                    }
                }
                _ => Err(type_mismatch("%", left, right)),
            }
        }
        _ => match (big_of(left), big_of(right)) {
            (Some(a), Some(b)) => {
                if b.is_zero() {
                    Err(division_by_zero())
                } else {
                    Ok(Value::from_big(a % b))
                }
            }
            _ => Err(type_mismatch("%", left, right)),
        },
    }
}

fn ordering(
    op: &'static str,
    left: &Value,
    right: &Value,
    accept: impl Fn(Ordering) -> bool,
) -> Result<Value, String> {
    match compare_values(left, right) {
        Some(ord) => Ok(Value::Bool(accept(ord))),
        None => Err(type_mismatch(op, left, right)),
    }
}

/// Evaluate a non-short-circuiting binary operator. `And`/`Or` never
/// reach here; the evaluator handles them before evaluating the right
/// operand.
pub(crate) fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, String> {
    match op {
        BinaryOp::Add => add(left, right),
        BinaryOp::Sub => sub(left, right),
        BinaryOp::Mul => mul(left, right),
        BinaryOp::Div => div(left, right),
        BinaryOp::Mod => rem(left, right),
        BinaryOp::Gt => ordering(">", left, right, |o| o == Ordering::Greater),
        BinaryOp::Lt => ordering("<", left, right, |o| o == Ordering::Less),
        BinaryOp::Ge => ordering(">=", left, right, |o| o != Ordering::Less),
        BinaryOp::Le => ordering("<=", left, right, |o| o != Ordering::Greater),
        BinaryOp::Eq => Ok(Value::Bool(left.eq_value(right))),
        BinaryOp::Ne => Ok(Value::Bool(!left.eq_value(right))),
        BinaryOp::And | BinaryOp::Or => unreachable!("logical operators are short-circuited"),
    }
}

pub(crate) fn eval_negate(value: &Value) -> Result<Value, String> {
    match value {
        Value::Int(i) => match i.checked_neg() {
            Some(v) => Ok(Value::Int(v)),
            None => Ok(Value::from_big(-BigInt::from(*i))),
        },
        Value::Big(b) => Ok(Value::from_big(-(**b).clone())),
        Value::Float(x) => Ok(Value::Float(-x)),
        other => Err(DiagnosticsFormatter::format(
            &DiagnosticKind::InvalidUnaryOperand {
                op: '-',
                expected: format!("a numeric, but got {}", other.type_name()),
            },
        )),
    }
}

pub(crate) fn eval_not(value: &Value) -> Result<Value, String> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(!b)),
        other => Err(DiagnosticsFormatter::format(
            &DiagnosticKind::InvalidUnaryOperand {
                op: '!',
                expected: format!("a bool, but got {}", other.type_name()),
            },
        )),
    }
}

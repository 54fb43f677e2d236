//! Pure value semantics shared by each opcode and its stack twin.
//!
//! Nothing here touches frames or the program counter. Failures come back
//! as [`OpError`] and get an instruction index attached by the caller.

use std::cmp::Ordering;

use ippcode_common::{Opcode, Value};
use thiserror::Error;

use crate::error::RuntimeError;

/// Which of the two symbol operands is the left-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandOrder {
    Normal,
    Reversed,
}

impl OperandOrder {
    /// Arithmetic, logical and relational stack variants evaluate their
    /// symbols in reverse. Jumps and conversions keep the written order.
    pub fn of(opcode: Opcode) -> Self {
        match opcode {
            Opcode::JumpIfEqS | Opcode::JumpIfNeqS | Opcode::Int2CharS | Opcode::Stri2IntS => {
                OperandOrder::Normal
            }
            _ if opcode.is_stack_variant() => OperandOrder::Reversed,
            _ => OperandOrder::Normal,
        }
    }

    /// Returns `(left, right)`.
    pub fn arrange<T>(self, first: T, second: T) -> (T, T) {
        match self {
            OperandOrder::Normal => (first, second),
            OperandOrder::Reversed => (second, first),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    IDiv,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Lt,
    Gt,
    Eq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

/// Failures of the value semantics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("{0}")]
    TypeMismatch(String),
    #[error("{0}")]
    StringOperation(String),
    #[error("missing value")]
    Missing,
}

impl OpError {
    /// Attach the failing instruction index.
    pub fn at(self, at: usize) -> RuntimeError {
        match self {
            OpError::DivisionByZero => RuntimeError::DivisionByZero { at },
            OpError::TypeMismatch(reason) => RuntimeError::InvalidOperandValue { at, reason },
            OpError::StringOperation(reason) => RuntimeError::InvalidStringOperation { at, reason },
            OpError::Missing => RuntimeError::MissingOperandValue { at },
        }
    }
}

/// Integer arithmetic. Overflow wraps; IDIV truncates toward zero.
pub fn arithmetic(op: ArithOp, left: i64, right: i64) -> Result<i64, OpError> {
    match op {
        ArithOp::Add => Ok(left.wrapping_add(right)),
        ArithOp::Sub => Ok(left.wrapping_sub(right)),
        ArithOp::Mul => Ok(left.wrapping_mul(right)),
        ArithOp::IDiv => {
            if right == 0 {
                Err(OpError::DivisionByZero)
            } else {
                Ok(left.wrapping_div(right))
            }
        }
    }
}

/// Relational comparison.
///
/// If either side is nil only equality is defined, and it holds when both
/// are nil. Otherwise the left operand's kind decides the comparison. Two
/// floats compare as floats. When only one side is a float, the left value
/// is truncated to an int and the right one must be integral.
pub fn compare(op: RelOp, left: &Value, right: &Value) -> Result<bool, OpError> {
    if *left == Value::Uninitialized || *right == Value::Uninitialized {
        return Err(OpError::Missing);
    }
    if left.is_nil() || right.is_nil() {
        return match op {
            RelOp::Eq => Ok(left.is_nil() && right.is_nil()),
            RelOp::Lt | RelOp::Gt => Err(OpError::TypeMismatch(format!(
                "cannot order {} against {}",
                left.type_name(),
                right.type_name()
            ))),
        };
    }

    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
        (Value::Int(a), Value::Float(b)) => a.partial_cmp(&integral_operand(*b)?),
        (Value::Float(a), Value::Int(b)) => float_to_int(*a)?.partial_cmp(b),
        _ => {
            return Err(OpError::TypeMismatch(format!(
                "cannot compare {} with {}",
                left.type_name(),
                right.type_name()
            )))
        }
    };

    // NaN compares unordered: never equal, never less or greater.
    Ok(match (op, ordering) {
        (_, None) => false,
        (RelOp::Lt, Some(ord)) => ord == Ordering::Less,
        (RelOp::Gt, Some(ord)) => ord == Ordering::Greater,
        (RelOp::Eq, Some(ord)) => ord == Ordering::Equal,
    })
}

pub fn logic(op: LogicOp, left: bool, right: bool) -> bool {
    match op {
        LogicOp::And => left && right,
        LogicOp::Or => left || right,
    }
}

/// The character at a code-point index.
pub fn char_at(text: &str, index: i64) -> Result<char, OpError> {
    usize::try_from(index)
        .ok()
        .and_then(|i| text.chars().nth(i))
        .ok_or_else(|| out_of_range(text, index))
}

/// Replace the character at a code-point index with the first character of
/// `replacement`.
pub fn set_char_at(text: &str, index: i64, replacement: &str) -> Result<String, OpError> {
    let new_char = replacement
        .chars()
        .next()
        .ok_or_else(|| OpError::StringOperation("empty replacement string".to_string()))?;
    let position = usize::try_from(index)
        .ok()
        .filter(|&i| i < text.chars().count())
        .ok_or_else(|| out_of_range(text, index))?;
    Ok(text
        .chars()
        .enumerate()
        .map(|(i, c)| if i == position { new_char } else { c })
        .collect())
}

/// A one-character string from a Unicode code point.
pub fn code_point_to_string(code: i64) -> Result<String, OpError> {
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(String::from)
        .ok_or_else(|| OpError::StringOperation(format!("{code} is not a valid code point")))
}

/// Truncate toward zero.
pub fn float_to_int(value: f64) -> Result<i64, OpError> {
    // 2^63 is exactly representable; every finite value below it in
    // magnitude truncates into i64 range.
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !value.is_finite() || value >= LIMIT || value < -LIMIT {
        return Err(OpError::TypeMismatch(format!(
            "float {value} has no integer value"
        )));
    }
    Ok(value.trunc() as i64)
}

/// A float with no fractional part, as an int. `None` for fractions,
/// non-finite values, and values outside the int range.
pub fn integral(value: f64) -> Option<i64> {
    if value.fract() == 0.0 {
        float_to_int(value).ok()
    } else {
        None
    }
}

fn integral_operand(value: f64) -> Result<i64, OpError> {
    integral(value).ok_or_else(|| OpError::TypeMismatch(format!("float {value} is not an integer")))
}

fn out_of_range(text: &str, index: i64) -> OpError {
    OpError::StringOperation(format!(
        "index {index} out of range for string of length {}",
        text.chars().count()
    ))
}

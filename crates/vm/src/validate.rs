//! Operand validation.
//!
//! Two independent checks run before an instruction acts: the declared
//! class of each operand against the opcode's signature slot, and the kind
//! of each resolved value against what the instruction consumes. Value
//! checks hand back the payload they accepted.

use ippcode_common::{Opcode, Operand, Slot, Value};

use crate::error::RuntimeError;
use crate::ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Int,
    Bool,
    TypeName,
    Str,
    Float,
}

impl ValueKind {
    fn name(&self) -> &'static str {
        match self {
            ValueKind::Int => "int",
            ValueKind::Bool => "bool",
            ValueKind::TypeName => "type name",
            ValueKind::Str => "string",
            ValueKind::Float => "float",
        }
    }
}

/// Type names accepted by READ.
pub const TYPE_NAMES: [&str; 5] = ["int", "bool", "string", "nil", "float"];

/// Check that the instruction carries at least as many operands as its
/// signature, and that each one has an acceptable declared class.
pub fn check_operands(opcode: Opcode, operands: &[Operand], at: usize) -> Result<(), RuntimeError> {
    let signature = opcode.signature();
    if operands.len() < signature.len() {
        return Err(RuntimeError::OperandCount {
            at,
            opcode: opcode.mnemonic(),
            expected: signature.len(),
            found: operands.len(),
        });
    }
    for (index, (slot, operand)) in signature.iter().zip(operands).enumerate() {
        expect_class(operand, *slot, index, at)?;
    }
    Ok(())
}

/// Class check for a single operand.
pub fn expect_class(operand: &Operand, wanted: Slot, index: usize, at: usize) -> Result<(), RuntimeError> {
    if wanted.accepts(operand.class) {
        Ok(())
    } else {
        Err(RuntimeError::InvalidOperandClass {
            at,
            index,
            expected: wanted.name(),
            found: operand.class.name(),
        })
    }
}

/// Any numeric value with no fractional part. Integral floats convert.
pub fn expect_int(value: &Value, at: usize) -> Result<i64, RuntimeError> {
    match value {
        Value::Int(n) => Ok(*n),
        Value::Float(x) => ops::integral(*x).ok_or_else(|| RuntimeError::InvalidOperandValue {
            at,
            reason: format!("float {x} is not an integer"),
        }),
        other => Err(mismatch(ValueKind::Int, other, at)),
    }
}

pub fn expect_bool(value: &Value, at: usize) -> Result<bool, RuntimeError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(mismatch(ValueKind::Bool, other, at)),
    }
}

pub fn expect_str(value: &Value, at: usize) -> Result<&str, RuntimeError> {
    match value {
        Value::Str(s) => Ok(s),
        other => Err(mismatch(ValueKind::Str, other, at)),
    }
}

pub fn expect_float(value: &Value, at: usize) -> Result<f64, RuntimeError> {
    match value {
        Value::Float(x) => Ok(*x),
        other => Err(mismatch(ValueKind::Float, other, at)),
    }
}

/// A string naming one of the five value types.
pub fn expect_type_name(value: &Value, at: usize) -> Result<&str, RuntimeError> {
    match value {
        Value::Str(s) if TYPE_NAMES.contains(&s.as_str()) => Ok(s),
        Value::Str(s) => Err(RuntimeError::InvalidOperandValue {
            at,
            reason: format!("'{s}' is not a type name"),
        }),
        other => Err(mismatch(ValueKind::TypeName, other, at)),
    }
}

// An uninitialized value reaching a check is a missing value, not a kind
// mismatch.
fn mismatch(wanted: ValueKind, found: &Value, at: usize) -> RuntimeError {
    if *found == Value::Uninitialized {
        return RuntimeError::MissingOperandValue { at };
    }
    RuntimeError::InvalidOperandValue {
        at,
        reason: format!("expected {}, found {}", wanted.name(), found.type_name()),
    }
}

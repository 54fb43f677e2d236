//! Runtime value representation for the IPPcode24 engine.
//!
//! Values are what live in frame variables during execution.

use std::fmt;

/// Runtime value representation.
///
/// `Nil` is the explicit `nil@nil` literal; `Uninitialized` marks a variable
/// that was declared with DEFVAR but never assigned. The two are kept apart
/// so that only TYPE can observe an unassigned variable.
#[derive(Debug, Clone)]
pub enum Value {
    /// Signed 64-bit integer.
    Int(i64),
    /// Boolean value.
    Bool(bool),
    /// Unicode string. Indexing instructions count code points.
    Str(String),
    /// IEEE 754 64-bit float (float extension).
    Float(f64),
    /// The nil literal.
    Nil,
    /// A declared variable that has never been assigned.
    Uninitialized,
}

// Floats compare by bit pattern, same as the instruction records compare
// literal text. Relational instructions do their own numeric comparison and
// never go through this impl.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Nil, Value::Nil) => true,
            (Value::Uninitialized, Value::Uninitialized) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Value {
    /// Returns the IPPcode24 type name of this value, as reported by TYPE.
    ///
    /// An uninitialized variable reports `"nil"`.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Float(_) => "float",
            Value::Nil | Value::Uninitialized => "nil",
        }
    }

    /// Returns true for the nil literal (not for an unassigned variable).
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }
}

/// Textual form used by WRITE before escape decoding.
///
/// Nil and uninitialized values render as the empty string.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Float(x) => write!(f, "{x}"),
            Value::Nil | Value::Uninitialized => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_names() {
        assert_eq!(Value::Int(42).type_name(), "int");
        assert_eq!(Value::Bool(true).type_name(), "bool");
        assert_eq!(Value::Str("a".into()).type_name(), "string");
        assert_eq!(Value::Float(1.5).type_name(), "float");
        assert_eq!(Value::Nil.type_name(), "nil");
        assert_eq!(Value::Uninitialized.type_name(), "nil");
    }

    #[test]
    fn nil_and_uninitialized_are_distinct() {
        assert_ne!(Value::Nil, Value::Uninitialized);
        assert!(Value::Nil.is_nil());
        assert!(!Value::Uninitialized.is_nil());
    }

    #[test]
    fn equality_different_kinds() {
        assert_ne!(Value::Int(1), Value::Bool(true));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Str("1".into()), Value::Int(1));
    }

    #[test]
    fn equality_float_bitwise_nan() {
        let nan = f64::NAN;
        assert_eq!(Value::Float(nan), Value::Float(nan));
    }

    #[test]
    fn display_forms() {
        assert_eq!(Value::Int(-7).to_string(), "-7");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Str("hi".into()).to_string(), "hi");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Nil.to_string(), "");
        assert_eq!(Value::Uninitialized.to_string(), "");
    }
}

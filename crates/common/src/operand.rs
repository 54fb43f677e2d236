//! Operand classes and instruction operands.
//!
//! Every operand carries the class it was declared with (`var`, `label`,
//! `type`, or a literal kind) and the literal text that followed it.

use std::fmt;

/// The declared class of an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandClass {
    /// Variable reference such as `GF@counter`.
    Var,
    /// Label name.
    Label,
    /// Type name (`int`, `bool`, `string`, `float`, `nil`).
    Type,
    /// Integer literal.
    Int,
    /// Boolean literal.
    Bool,
    /// String literal.
    String,
    /// Float literal (float extension).
    Float,
    /// The nil literal.
    Nil,
}

/// All operand classes, in definition order.
pub const ALL_OPERAND_CLASSES: [OperandClass; 8] = [
    OperandClass::Var,
    OperandClass::Label,
    OperandClass::Type,
    OperandClass::Int,
    OperandClass::Bool,
    OperandClass::String,
    OperandClass::Float,
    OperandClass::Nil,
];

impl OperandClass {
    /// Returns the source name of this class.
    pub fn name(&self) -> &'static str {
        match self {
            OperandClass::Var => "var",
            OperandClass::Label => "label",
            OperandClass::Type => "type",
            OperandClass::Int => "int",
            OperandClass::Bool => "bool",
            OperandClass::String => "string",
            OperandClass::Float => "float",
            OperandClass::Nil => "nil",
        }
    }

    /// Looks up a class by its source name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_OPERAND_CLASSES.iter().find(|c| c.name() == name).copied()
    }

    /// Returns true if this class is a literal constant.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            OperandClass::Int
                | OperandClass::Bool
                | OperandClass::String
                | OperandClass::Float
                | OperandClass::Nil
        )
    }

    /// Returns true if an operand of this class can stand where a symbol
    /// (variable or literal) is expected.
    pub fn is_symbol(&self) -> bool {
        *self == OperandClass::Var || self.is_literal()
    }
}

/// One operand of an instruction record. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operand {
    /// Declared class.
    pub class: OperandClass,
    /// Literal text, e.g. `GF@x`, `loop`, `42`, `hello\032world`.
    pub text: String,
}

impl Operand {
    /// Create a new operand.
    pub fn new(class: OperandClass, text: impl Into<String>) -> Self {
        Self {
            class,
            text: text.into(),
        }
    }
}

/// Source form: literals as `class@text`, everything else as bare text.
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class.is_literal() {
            write!(f, "{}@{}", self.class.name(), self.text)
        } else {
            f.write_str(&self.text)
        }
    }
}

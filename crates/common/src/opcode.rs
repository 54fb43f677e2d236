//! Opcode definitions for the IPPcode24 instruction set.
//!
//! Opcodes arrive as mnemonic text in instruction records and are decoded
//! only when the engine dispatches them, so an unknown mnemonic fails when
//! it is reached rather than when the program is built.

use crate::operand::OperandClass;

/// What an operand position of an opcode accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A variable reference.
    Var,
    /// A variable reference or any literal.
    Symbol,
    /// A label name.
    Label,
    /// A type name.
    Type,
}

impl Slot {
    /// Returns the source name of this slot, as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Slot::Var => "var",
            Slot::Symbol => "symb",
            Slot::Label => "label",
            Slot::Type => "type",
        }
    }

    /// Returns true if an operand declared as `class` may fill this slot.
    pub fn accepts(&self, class: OperandClass) -> bool {
        match self {
            Slot::Var => class == OperandClass::Var,
            Slot::Symbol => class.is_symbol(),
            Slot::Label => class == OperandClass::Label,
            Slot::Type => class == OperandClass::Type,
        }
    }
}

/// Identifies the operation to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Frames & variables
    /// Copy a symbol into a variable.
    Move,
    /// Replace the temporary frame with a fresh empty one.
    CreateFrame,
    /// Move the temporary frame onto the local frame stack.
    PushFrame,
    /// Move the top local frame back to the temporary frame.
    PopFrame,
    /// Declare a variable (value starts uninitialized).
    DefVar,

    // Calls
    /// Push the return address, jump to a label.
    Call,
    /// Jump to the most recent return address.
    Return,

    // Arithmetic, relational, logical
    /// Integer addition.
    Add,
    /// Integer subtraction.
    Sub,
    /// Integer multiplication.
    Mul,
    /// Integer division, truncating toward zero.
    IDiv,
    /// Less-than.
    Lt,
    /// Greater-than.
    Gt,
    /// Equality.
    Eq,
    /// Boolean conjunction.
    And,
    /// Boolean disjunction.
    Or,
    /// Boolean negation.
    Not,
    /// Code point to one-character string.
    Int2Char,
    /// Code point of the character at an index.
    Stri2Int,

    // I/O
    /// Read a typed value from the input source.
    Read,
    /// Write a value to the output sink.
    Write,

    // Strings
    /// String concatenation.
    Concat,
    /// String length in code points.
    StrLen,
    /// Character at an index.
    GetChar,
    /// Replace the character at an index.
    SetChar,

    // Types
    /// Type name of a symbol.
    Type,

    // Control flow
    /// Jump target marker; resolved before execution.
    Label,
    /// Unconditional jump.
    Jump,
    /// Jump when two symbols are equal.
    JumpIfEq,
    /// Jump when two symbols are not equal.
    JumpIfNeq,
    /// Terminate with an exit code in `0..=9`.
    Exit,

    // Debugging
    /// Debug print; no effect on program state.
    DPrint,
    /// Debug break; no effect on program state.
    Break,

    // Stack-operand family
    /// ADD with stack operand order.
    AddS,
    /// SUB with stack operand order.
    SubS,
    /// MUL with stack operand order.
    MulS,
    /// IDIV with stack operand order.
    IDivS,
    /// LT with stack operand order.
    LtS,
    /// GT with stack operand order.
    GtS,
    /// EQ with stack operand order.
    EqS,
    /// AND with stack operand order.
    AndS,
    /// OR with stack operand order.
    OrS,
    /// NOT with stack operand order.
    NotS,
    /// Stack twin of INT2CHAR.
    Int2CharS,
    /// Stack twin of STRI2INT.
    Stri2IntS,
    /// Stack twin of JUMPIFEQ.
    JumpIfEqS,
    /// Stack twin of JUMPIFNEQ.
    JumpIfNeqS,

    // Float extension
    /// Integer to float.
    Int2Float,
    /// Float to integer, truncating.
    Float2Int,
}

/// All valid opcodes, in definition order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 49] = [
    Opcode::Move,
    Opcode::CreateFrame,
    Opcode::PushFrame,
    Opcode::PopFrame,
    Opcode::DefVar,
    Opcode::Call,
    Opcode::Return,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::IDiv,
    Opcode::Lt,
    Opcode::Gt,
    Opcode::Eq,
    Opcode::And,
    Opcode::Or,
    Opcode::Not,
    Opcode::Int2Char,
    Opcode::Stri2Int,
    Opcode::Read,
    Opcode::Write,
    Opcode::Concat,
    Opcode::StrLen,
    Opcode::GetChar,
    Opcode::SetChar,
    Opcode::Type,
    Opcode::Label,
    Opcode::Jump,
    Opcode::JumpIfEq,
    Opcode::JumpIfNeq,
    Opcode::Exit,
    Opcode::DPrint,
    Opcode::Break,
    Opcode::AddS,
    Opcode::SubS,
    Opcode::MulS,
    Opcode::IDivS,
    Opcode::LtS,
    Opcode::GtS,
    Opcode::EqS,
    Opcode::AndS,
    Opcode::OrS,
    Opcode::NotS,
    Opcode::Int2CharS,
    Opcode::Stri2IntS,
    Opcode::JumpIfEqS,
    Opcode::JumpIfNeqS,
    Opcode::Int2Float,
    Opcode::Float2Int,
];

const NONE: &[Slot] = &[];
const VAR: &[Slot] = &[Slot::Var];
const SYMB: &[Slot] = &[Slot::Symbol];
const LABEL: &[Slot] = &[Slot::Label];
const VAR_SYMB: &[Slot] = &[Slot::Var, Slot::Symbol];
const VAR_TYPE: &[Slot] = &[Slot::Var, Slot::Type];
const VAR_SYMB_SYMB: &[Slot] = &[Slot::Var, Slot::Symbol, Slot::Symbol];
const LABEL_SYMB_SYMB: &[Slot] = &[Slot::Label, Slot::Symbol, Slot::Symbol];

impl Opcode {
    /// Returns the source mnemonic for this opcode.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Move => "MOVE",
            Opcode::CreateFrame => "CREATEFRAME",
            Opcode::PushFrame => "PUSHFRAME",
            Opcode::PopFrame => "POPFRAME",
            Opcode::DefVar => "DEFVAR",
            Opcode::Call => "CALL",
            Opcode::Return => "RETURN",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::IDiv => "IDIV",
            Opcode::Lt => "LT",
            Opcode::Gt => "GT",
            Opcode::Eq => "EQ",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Not => "NOT",
            Opcode::Int2Char => "INT2CHAR",
            Opcode::Stri2Int => "STRI2INT",
            Opcode::Read => "READ",
            Opcode::Write => "WRITE",
            Opcode::Concat => "CONCAT",
            Opcode::StrLen => "STRLEN",
            Opcode::GetChar => "GETCHAR",
            Opcode::SetChar => "SETCHAR",
            Opcode::Type => "TYPE",
            Opcode::Label => "LABEL",
            Opcode::Jump => "JUMP",
            Opcode::JumpIfEq => "JUMPIFEQ",
            Opcode::JumpIfNeq => "JUMPIFNEQ",
            Opcode::Exit => "EXIT",
            Opcode::DPrint => "DPRINT",
            Opcode::Break => "BREAK",
            Opcode::AddS => "ADDS",
            Opcode::SubS => "SUBS",
            Opcode::MulS => "MULS",
            Opcode::IDivS => "IDIVS",
            Opcode::LtS => "LTS",
            Opcode::GtS => "GTS",
            Opcode::EqS => "EQS",
            Opcode::AndS => "ANDS",
            Opcode::OrS => "ORS",
            Opcode::NotS => "NOTS",
            Opcode::Int2CharS => "INT2CHARS",
            Opcode::Stri2IntS => "STRI2INTS",
            Opcode::JumpIfEqS => "JUMPIFEQS",
            Opcode::JumpIfNeqS => "JUMPIFNEQS",
            Opcode::Int2Float => "INT2FLOAT",
            Opcode::Float2Int => "FLOAT2INT",
        }
    }

    /// Looks up an opcode by mnemonic, ignoring ASCII case.
    pub fn from_mnemonic(name: &str) -> Option<Self> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(name))
            .copied()
    }

    /// Returns the operand signature of this opcode.
    pub fn signature(&self) -> &'static [Slot] {
        match self {
            Opcode::CreateFrame
            | Opcode::PushFrame
            | Opcode::PopFrame
            | Opcode::Return
            | Opcode::Break => NONE,

            Opcode::DefVar => VAR,

            Opcode::Write | Opcode::Exit | Opcode::DPrint => SYMB,

            Opcode::Call | Opcode::Label | Opcode::Jump => LABEL,

            Opcode::Move
            | Opcode::Not
            | Opcode::NotS
            | Opcode::Int2Char
            | Opcode::Int2CharS
            | Opcode::StrLen
            | Opcode::Type
            | Opcode::Int2Float
            | Opcode::Float2Int => VAR_SYMB,

            Opcode::Read => VAR_TYPE,

            Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::IDiv
            | Opcode::Lt
            | Opcode::Gt
            | Opcode::Eq
            | Opcode::And
            | Opcode::Or
            | Opcode::Stri2Int
            | Opcode::Concat
            | Opcode::GetChar
            | Opcode::SetChar
            | Opcode::AddS
            | Opcode::SubS
            | Opcode::MulS
            | Opcode::IDivS
            | Opcode::LtS
            | Opcode::GtS
            | Opcode::EqS
            | Opcode::AndS
            | Opcode::OrS
            | Opcode::Stri2IntS => VAR_SYMB_SYMB,

            Opcode::JumpIfEq | Opcode::JumpIfNeq | Opcode::JumpIfEqS | Opcode::JumpIfNeqS => {
                LABEL_SYMB_SYMB
            }
        }
    }

    /// Returns true for the `*S` stack-operand family.
    pub fn is_stack_variant(&self) -> bool {
        matches!(
            self,
            Opcode::AddS
                | Opcode::SubS
                | Opcode::MulS
                | Opcode::IDivS
                | Opcode::LtS
                | Opcode::GtS
                | Opcode::EqS
                | Opcode::AndS
                | Opcode::OrS
                | Opcode::NotS
                | Opcode::Int2CharS
                | Opcode::Stri2IntS
                | Opcode::JumpIfEqS
                | Opcode::JumpIfNeqS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_opcodes_count() {
        assert_eq!(ALL_OPCODES.len(), 49);
    }

    #[test]
    fn mnemonic_roundtrip() {
        for &opcode in &ALL_OPCODES {
            let m = opcode.mnemonic();
            assert!(!m.is_empty(), "empty mnemonic for {opcode:?}");
            assert_eq!(m, m.to_uppercase(), "mnemonic should be uppercase: {m}");
            assert_eq!(Opcode::from_mnemonic(m), Some(opcode));
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Opcode::from_mnemonic("move"), Some(Opcode::Move));
        assert_eq!(Opcode::from_mnemonic("JumpIfEqS"), Some(Opcode::JumpIfEqS));
    }

    #[test]
    fn unknown_mnemonics() {
        assert_eq!(Opcode::from_mnemonic("PUSHS"), None);
        assert_eq!(Opcode::from_mnemonic(""), None);
        assert_eq!(Opcode::from_mnemonic("MOVE "), None);
    }

    #[test]
    fn signatures() {
        assert!(Opcode::Return.signature().is_empty());
        assert_eq!(Opcode::DefVar.signature(), &[Slot::Var]);
        assert_eq!(Opcode::Read.signature(), &[Slot::Var, Slot::Type]);
        assert_eq!(
            Opcode::JumpIfNeqS.signature(),
            &[Slot::Label, Slot::Symbol, Slot::Symbol]
        );
        assert_eq!(
            Opcode::IDivS.signature(),
            Opcode::IDiv.signature(),
            "stack twins share their operand layout"
        );
    }

    #[test]
    fn slot_acceptance() {
        assert!(Slot::Symbol.accepts(OperandClass::Var));
        assert!(Slot::Symbol.accepts(OperandClass::Float));
        assert!(!Slot::Symbol.accepts(OperandClass::Label));
        assert!(Slot::Var.accepts(OperandClass::Var));
        assert!(!Slot::Var.accepts(OperandClass::String));
        assert!(Slot::Type.accepts(OperandClass::Type));
        assert!(!Slot::Label.accepts(OperandClass::Type));
    }

    #[test]
    fn stack_variants_end_in_s() {
        for &opcode in &ALL_OPCODES {
            if opcode.is_stack_variant() {
                assert!(opcode.mnemonic().ends_with('S'), "{opcode:?}");
            }
        }
        assert_eq!(ALL_OPCODES.iter().filter(|o| o.is_stack_variant()).count(), 14);
    }
}

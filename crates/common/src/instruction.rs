//! Instruction records.
//!
//! A record is what the upstream front end hands over: a declared order key,
//! the opcode mnemonic as text, and the ordered operand list.

use std::fmt;

use crate::opcode::Opcode;
use crate::operand::Operand;

/// A single IPPcode24 instruction record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Declared order key. Unique per program, possibly sparse.
    pub order: i64,
    /// Opcode mnemonic as written in the source.
    pub opcode: String,
    /// Operands in declaration order.
    pub operands: Vec<Operand>,
}

impl Instruction {
    /// Create a new instruction record.
    pub fn new(order: i64, opcode: impl Into<String>, operands: Vec<Operand>) -> Self {
        Self {
            order,
            opcode: opcode.into(),
            operands,
        }
    }

    /// Decode the mnemonic. Returns `None` for an unknown opcode.
    pub fn decode_opcode(&self) -> Option<Opcode> {
        Opcode::from_mnemonic(&self.opcode)
    }

    /// Returns true if this record declares a label.
    pub fn is_label(&self) -> bool {
        self.opcode.eq_ignore_ascii_case(Opcode::Label.mnemonic())
    }
}

/// Source form, e.g. `JUMPIFEQ end GF@x int@0`.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.opcode.to_uppercase())?;
        for operand in &self.operands {
            write!(f, " {operand}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::OperandClass;

    #[test]
    fn decode_known_and_unknown() {
        let known = Instruction::new(1, "defvar", vec![Operand::new(OperandClass::Var, "GF@x")]);
        assert_eq!(known.decode_opcode(), Some(Opcode::DefVar));

        let unknown = Instruction::new(2, "FROBNICATE", vec![]);
        assert_eq!(unknown.decode_opcode(), None);
    }

    #[test]
    fn label_detection() {
        let label = Instruction::new(1, "Label", vec![Operand::new(OperandClass::Label, "x")]);
        assert!(label.is_label());
        assert!(!Instruction::new(1, "JUMP", vec![]).is_label());
    }

    #[test]
    fn display_source_form() {
        let instr = Instruction::new(
            7,
            "jumpifeq",
            vec![
                Operand::new(OperandClass::Label, "end"),
                Operand::new(OperandClass::Var, "GF@x"),
                Operand::new(OperandClass::Int, "0"),
            ],
        );
        assert_eq!(instr.to_string(), "JUMPIFEQ end GF@x int@0");
        assert_eq!(Instruction::new(1, "RETURN", vec![]).to_string(), "RETURN");
    }
}

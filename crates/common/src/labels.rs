//! Label table: label name to dense instruction index.
//!
//! Populated once by a full pre-scan of the ordered program, so forward
//! and backward references resolve the same way. Immutable afterwards.

use std::collections::HashMap;

use crate::error::BuildError;
use crate::instruction::Instruction;
use crate::operand::OperandClass;

/// Resolved label positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    positions: HashMap<String, usize>,
}

impl LabelTable {
    /// Scan every instruction and register each LABEL at its dense index.
    ///
    /// Runs to completion before execution starts.
    pub fn scan(instructions: &[Instruction]) -> Result<Self, BuildError> {
        let mut table = Self::default();

        for (at, instr) in instructions.iter().enumerate() {
            if !instr.is_label() {
                continue;
            }
            let name = match instr.operands.as_slice() {
                [op] if op.class == OperandClass::Label => op.text.clone(),
                _ => return Err(BuildError::MalformedLabel { at }),
            };
            if table.positions.contains_key(&name) {
                return Err(BuildError::DuplicateLabel { name, at });
            }
            table.positions.insert(name, at);
        }

        Ok(table)
    }

    /// Look up the dense index of a label.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Number of registered labels.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no labels are registered.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::Operand;

    fn label(order: i64, name: &str) -> Instruction {
        Instruction::new(order, "LABEL", vec![Operand::new(OperandClass::Label, name)])
    }

    fn jump(order: i64, name: &str) -> Instruction {
        Instruction::new(order, "JUMP", vec![Operand::new(OperandClass::Label, name)])
    }

    #[test]
    fn registers_dense_indices() {
        let instrs = vec![jump(1, "b"), label(2, "a"), label(3, "b")];
        let table = LabelTable::scan(&instrs).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("a"), Some(1));
        assert_eq!(table.resolve("b"), Some(2));
        assert_eq!(table.resolve("c"), None);
    }

    #[test]
    fn empty_program_has_no_labels() {
        let table = LabelTable::scan(&[]).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn duplicate_label_rejected() {
        let instrs = vec![label(1, "x"), jump(2, "x"), label(3, "x")];
        assert_eq!(
            LabelTable::scan(&instrs),
            Err(BuildError::DuplicateLabel {
                name: "x".to_string(),
                at: 2
            })
        );
    }

    #[test]
    fn label_needs_label_operand() {
        let bad = Instruction::new(1, "LABEL", vec![Operand::new(OperandClass::String, "x")]);
        let err = LabelTable::scan(&[bad]).unwrap_err();
        assert_eq!(err, BuildError::MalformedLabel { at: 0 });
        assert_eq!(err.exit_code(), 32);

        let missing = Instruction::new(1, "LABEL", vec![]);
        assert_eq!(
            LabelTable::scan(&[missing]),
            Err(BuildError::MalformedLabel { at: 0 })
        );
    }

    #[test]
    fn lowercase_label_opcode_is_registered() {
        let instr = Instruction::new(1, "label", vec![Operand::new(OperandClass::Label, "x")]);
        let table = LabelTable::scan(&[instr]).unwrap();
        assert_eq!(table.resolve("x"), Some(0));
    }
}

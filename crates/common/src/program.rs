//! Program building: ordering and label resolution.
//!
//! Records arrive in any sequence with sparse but unique order keys. The
//! built program holds them sorted ascending by key and reindexed densely
//! from zero; the program counter and the label table address that dense
//! index space.

use std::collections::HashSet;

use crate::error::BuildError;
use crate::instruction::Instruction;
use crate::labels::LabelTable;

/// An executable IPPcode24 program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    /// Instructions in execution order (dense index = position).
    pub instructions: Vec<Instruction>,
    /// Label name to dense index.
    pub labels: LabelTable,
}

impl Program {
    /// Build a program from unordered instruction records.
    ///
    /// Fails with [`BuildError::DuplicateOrder`] if two records share an
    /// order key, then with a label error from the pre-scan.
    pub fn build(mut records: Vec<Instruction>) -> Result<Self, BuildError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if !seen.insert(record.order) {
                return Err(BuildError::DuplicateOrder {
                    order: record.order,
                });
            }
        }

        records.sort_by_key(|r| r.order);
        let labels = LabelTable::scan(&records)?;

        Ok(Self {
            instructions: records,
            labels,
        })
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if the program has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operand::{Operand, OperandClass};

    fn record(order: i64, opcode: &str) -> Instruction {
        Instruction::new(order, opcode, vec![])
    }

    fn label(order: i64, name: &str) -> Instruction {
        Instruction::new(order, "LABEL", vec![Operand::new(OperandClass::Label, name)])
    }

    #[test]
    fn empty_program() {
        let program = Program::build(vec![]).unwrap();
        assert!(program.is_empty());
        assert_eq!(program.len(), 0);
        assert!(program.labels.is_empty());
    }

    #[test]
    fn sorts_sparse_orders_densely() {
        let program = Program::build(vec![
            record(30, "BREAK"),
            record(2, "CREATEFRAME"),
            record(17, "PUSHFRAME"),
        ])
        .unwrap();
        let opcodes: Vec<&str> = program
            .instructions
            .iter()
            .map(|i| i.opcode.as_str())
            .collect();
        assert_eq!(opcodes, ["CREATEFRAME", "PUSHFRAME", "BREAK"]);
    }

    #[test]
    fn duplicate_order_rejected() {
        let err = Program::build(vec![record(1, "BREAK"), record(1, "BREAK")]).unwrap_err();
        assert_eq!(err, BuildError::DuplicateOrder { order: 1 });
    }

    #[test]
    fn duplicate_order_wins_over_duplicate_label() {
        let err = Program::build(vec![label(1, "a"), label(2, "a"), record(2, "BREAK")])
            .unwrap_err();
        assert_eq!(err, BuildError::DuplicateOrder { order: 2 });
    }

    #[test]
    fn labels_use_sorted_positions() {
        let program = Program::build(vec![label(50, "late"), label(5, "early"), record(10, "BREAK")])
            .unwrap();
        assert_eq!(program.labels.resolve("early"), Some(0));
        assert_eq!(program.labels.resolve("late"), Some(2));
    }

    #[test]
    fn negative_orders_sort_first() {
        let program = Program::build(vec![record(3, "BREAK"), record(-4, "RETURN")]).unwrap();
        assert_eq!(program.instructions[0].opcode, "RETURN");
    }
}

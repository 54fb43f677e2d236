//! Error types for the IPPcode24 assembler.

use thiserror::Error;

/// Errors produced while reading IPPcode24 source text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// The first non-empty line is not the `.IPPcode24` header.
    #[error("line {line}: missing or malformed .IPPcode24 header")]
    MissingHeader { line: usize },

    /// A second header line.
    #[error("line {line}: repeated .IPPcode24 header")]
    DuplicateHeader { line: usize },

    /// An unrecognized opcode mnemonic was encountered.
    #[error("line {line}: unknown opcode '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// An opcode with the wrong number of operands.
    #[error("line {line}: {opcode} expects {expected} operand(s), found {found}")]
    OperandCount {
        line: usize,
        opcode: &'static str,
        expected: usize,
        found: usize,
    },

    /// An operand that does not fit its slot.
    #[error("line {line}: invalid {expected} operand '{token}'")]
    InvalidOperand {
        line: usize,
        token: String,
        expected: &'static str,
    },
}

impl AsmError {
    /// Process exit code.
    pub fn exit_code(&self) -> i32 {
        match self {
            AsmError::MissingHeader { .. } => 21,
            AsmError::DuplicateHeader { .. } | AsmError::UnknownOpcode { .. } => 22,
            AsmError::OperandCount { .. } | AsmError::InvalidOperand { .. } => 23,
        }
    }
}

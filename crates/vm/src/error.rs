//! Runtime errors for the IPPcode24 engine.
//!
//! Every failure aborts the run. Errors that belong to one instruction carry
//! its dense index (`at`) for debugging; [`RuntimeError::exit_code`] is the
//! single mapping to process exit codes.

use ippcode_common::BuildError;
use thiserror::Error;

/// Errors that occur while building or executing a program.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The program could not be built (order keys, labels).
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The opcode mnemonic is not part of the instruction set.
    #[error("unknown opcode '{opcode}' at instruction {at}")]
    UnknownOpcode { at: usize, opcode: String },

    /// Fewer operands than the opcode's signature requires.
    #[error("{opcode} expects {expected} operand(s), found {found} at instruction {at}")]
    OperandCount {
        at: usize,
        opcode: &'static str,
        expected: usize,
        found: usize,
    },

    /// Operand declared with a class the instruction does not accept.
    #[error("operand {index} must be {expected}, found {found} at instruction {at}")]
    InvalidOperandClass {
        at: usize,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Operand value of the wrong kind, or literal text that does not decode.
    #[error("invalid operand value: {reason} at instruction {at}")]
    InvalidOperandValue { at: usize, reason: String },

    /// Read of an uninitialized variable, or WRITE with nothing to print.
    #[error("missing value at instruction {at}")]
    MissingOperandValue { at: usize },

    /// DEFVAR of a name already present in its frame.
    #[error("variable '{name}' redefined at instruction {at}")]
    VariableRedefined { at: usize, name: String },

    /// Access to a variable that was never defined.
    #[error("variable '{name}' undefined at instruction {at}")]
    VariableUndefined { at: usize, name: String },

    /// TF without a temporary frame, or LF/POPFRAME without a local frame.
    #[error("{frame} frame undefined at instruction {at}")]
    FrameUndefined { at: usize, frame: &'static str },

    /// Jump or call to a label that was never declared.
    #[error("label '{name}' undefined at instruction {at}")]
    LabelUndefined { at: usize, name: String },

    /// RETURN with an empty call stack.
    #[error("RETURN with empty call stack at instruction {at}")]
    EmptyCallStack { at: usize },

    /// IDIV (or IDIVS) by zero.
    #[error("division by zero at instruction {at}")]
    DivisionByZero { at: usize },

    /// EXIT with a code outside `0..=9`.
    #[error("invalid exit code {code} at instruction {at}")]
    InvalidExitCode { at: usize, code: i64 },

    /// Index out of range, bad code point, or empty replacement string.
    #[error("invalid string operation: {reason} at instruction {at}")]
    InvalidStringOperation { at: usize, reason: String },

    /// The output sink failed.
    #[error("output failed at instruction {at}: {message}")]
    Output { at: usize, message: String },

    /// Engine invariant violation. Unreachable for any input.
    #[error("internal error at instruction {at}: {message}")]
    Internal { at: usize, message: String },
}

impl RuntimeError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            RuntimeError::Build(e) => e.exit_code(),
            RuntimeError::UnknownOpcode { .. }
            | RuntimeError::OperandCount { .. }
            | RuntimeError::InvalidOperandClass { .. } => 32,
            RuntimeError::LabelUndefined { .. } | RuntimeError::VariableRedefined { .. } => 52,
            RuntimeError::InvalidOperandValue { .. } => 53,
            RuntimeError::VariableUndefined { .. } => 54,
            RuntimeError::FrameUndefined { .. } => 55,
            RuntimeError::MissingOperandValue { .. } | RuntimeError::EmptyCallStack { .. } => 56,
            RuntimeError::DivisionByZero { .. } | RuntimeError::InvalidExitCode { .. } => 57,
            RuntimeError::InvalidStringOperation { .. } => 58,
            RuntimeError::Output { .. } => 12,
            RuntimeError::Internal { .. } => 99,
        }
    }
}

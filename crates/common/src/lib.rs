//! IPPcode24 common types and program building.
//!
//! This crate provides the foundational data structures shared by the
//! engine and the front end:
//!
//! - [`Value`]: tagged runtime value held by frame variables
//! - [`Operand`] / [`OperandClass`]: declared operand class plus literal text
//! - [`Opcode`]: the 49 opcodes, with mnemonics and operand signatures
//! - [`Instruction`]: one instruction record (order key, opcode, operands)
//! - [`Program`]: records sorted into dense execution order
//! - [`LabelTable`]: label name to dense index, built before execution
//! - [`BuildError`]: errors found while building a program
//!
//! # Dependencies
//!
//! This crate uses `thiserror` (compile-time proc-macro, zero runtime cost)
//! and has no other dependencies.

pub mod error;
pub mod instruction;
pub mod labels;
pub mod literal;
pub mod opcode;
pub mod operand;
pub mod program;
pub mod value;

// Re-export commonly used types at the crate root.
pub use error::BuildError;
pub use instruction::Instruction;
pub use labels::LabelTable;
pub use opcode::{Opcode, Slot};
pub use operand::{Operand, OperandClass};
pub use program::Program;
pub use value::Value;

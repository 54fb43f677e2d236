//! IPPcode24 execution engine.
//!
//! The engine is a direct interpreter over a built [`Program`] with:
//! - a global frame, an optional temporary frame and a stack of local frames
//! - a control stack of return addresses for CALL/RETURN
//! - strict dynamic checks of operand classes and value kinds
//!
//! Every failure aborts the run; [`RuntimeError::exit_code`] maps it to the
//! process exit code.
//!
//! # Usage
//!
//! ```
//! use ippcode_common::{Instruction, Operand, OperandClass};
//! use ippcode_vm::{run_records, Halt, LineInput};
//!
//! let records = vec![
//!     Instruction::new(1, "WRITE", vec![Operand::new(OperandClass::String, "hi")]),
//!     Instruction::new(2, "EXIT", vec![Operand::new(OperandClass::Int, "3")]),
//! ];
//!
//! let mut input = LineInput::new(std::io::empty());
//! let mut output = String::new();
//! let halt = run_records(records, &mut input, &mut output).unwrap();
//! assert_eq!(halt, Halt::Exit(3));
//! assert_eq!(output, "hi");
//! ```

pub mod control;
pub mod error;
pub mod execute;
pub mod frames;
pub mod io;
pub mod machine;
pub mod ops;
pub mod validate;

pub use error::RuntimeError;
pub use frames::{FrameKind, FrameStore, VarRef};
pub use io::{InputSource, LineInput, OutputSink, WriterOutput};
pub use machine::{Engine, Halt};

use ippcode_common::{Instruction, Program};

/// Execute a built program.
///
/// # Errors
///
/// Returns [`RuntimeError`] on the first failing instruction.
pub fn run(
    program: &Program,
    input: &mut dyn InputSource,
    output: &mut dyn OutputSink,
) -> Result<Halt, RuntimeError> {
    Engine::new(program, input, output).execute()
}

/// Build a program from raw instruction records, then execute it.
///
/// Build failures (duplicate order keys, duplicate labels) are reported
/// before any instruction runs.
pub fn run_records(
    records: Vec<Instruction>,
    input: &mut dyn InputSource,
    output: &mut dyn OutputSink,
) -> Result<Halt, RuntimeError> {
    let program = Program::build(records)?;
    run(&program, input, output)
}

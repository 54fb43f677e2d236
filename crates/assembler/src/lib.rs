//! IPPcode24 assembler: source text ↔ instruction records.
//!
//! [`assemble`] reads the textual language and produces the record sequence
//! the engine consumes, numbering records 1, 2, 3, … in source order.
//! [`render`] prints a built program back as source text.
//!
//! # Usage
//!
//! ```
//! use ippcode_assembler::{assemble, render};
//! use ippcode_common::Program;
//!
//! let text = ".IPPcode24\nDEFVAR GF@x\nMOVE GF@x int@42\nWRITE GF@x\n";
//! let records = assemble(text).unwrap();
//! assert_eq!(records.len(), 3);
//!
//! let program = Program::build(records).unwrap();
//! assert_eq!(render(&program), text);
//! ```

pub mod error;

mod lexer;
mod parser;
mod render;

pub use error::AsmError;
pub use render::render;

use ippcode_common::Instruction;
use lexer::{tokenize_line, Token};
use parser::parse_line;

/// Assemble source text into instruction records.
///
/// The first non-empty line must be the `.IPPcode24` header. Returns the
/// first error encountered.
pub fn assemble(text: &str) -> Result<Vec<Instruction>, AsmError> {
    let mut instructions = Vec::new();
    let mut header_seen = false;

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line);
        if tokens.is_empty() {
            continue;
        }

        if !header_seen {
            if tokens != [Token::Header] {
                return Err(AsmError::MissingHeader { line: line_num });
            }
            header_seen = true;
            continue;
        }

        let order = instructions.len() as i64 + 1;
        instructions.push(parse_line(&tokens, line_num, order)?);
    }

    if !header_seen {
        return Err(AsmError::MissingHeader { line: 0 });
    }
    Ok(instructions)
}

//! Renderer: built program → IPPcode24 source text.
//!
//! Output is the header followed by one instruction per line in dense
//! execution order. No comments, no blank lines.

use ippcode_common::Program;

/// Render a program as canonical IPPcode24 text.
///
/// Reassembling the output yields the same instructions in the same order,
/// renumbered with order keys 1, 2, 3, ….
pub fn render(program: &Program) -> String {
    let mut text = String::from(".IPPcode24\n");
    for instr in &program.instructions {
        text.push_str(&instr.to_string());
        text.push('\n');
    }
    text
}

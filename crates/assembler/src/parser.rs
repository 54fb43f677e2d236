//! Parser for IPPcode24 instruction lines.
//!
//! The opcode's signature from the common opcode table decides how each
//! word is read: `var`, `symb` (variable or constant), `label` or `type`.

use ippcode_common::{literal, Instruction, Opcode, Operand, OperandClass, Slot};

use crate::error::AsmError;
use crate::lexer::Token;

const FRAME_TAGS: [&str; 3] = ["GF", "LF", "TF"];
const TYPE_NAMES: [&str; 5] = ["int", "bool", "string", "float", "nil"];

/// Parse one instruction line (already known not to be a header).
pub(crate) fn parse_line(tokens: &[Token<'_>], line: usize, order: i64) -> Result<Instruction, AsmError> {
    let words = tokens
        .iter()
        .map(|token| match token {
            Token::Word(word) => Ok(*word),
            Token::Header => Err(AsmError::DuplicateHeader { line }),
        })
        .collect::<Result<Vec<&str>, AsmError>>()?;

    let (mnemonic, args) = match words.split_first() {
        Some(split) => split,
        None => {
            return Err(AsmError::InvalidOperand {
                line,
                token: String::new(),
                expected: "instruction",
            })
        }
    };

    let opcode = Opcode::from_mnemonic(mnemonic).ok_or_else(|| AsmError::UnknownOpcode {
        line,
        token: mnemonic.to_string(),
    })?;

    let signature = opcode.signature();
    if args.len() != signature.len() {
        return Err(AsmError::OperandCount {
            line,
            opcode: opcode.mnemonic(),
            expected: signature.len(),
            found: args.len(),
        });
    }

    let operands = signature
        .iter()
        .zip(args)
        .map(|(slot, word)| parse_operand(word, *slot, line))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Instruction::new(order, opcode.mnemonic(), operands))
}

fn parse_operand(word: &str, slot: Slot, line: usize) -> Result<Operand, AsmError> {
    let operand = match slot {
        Slot::Var => parse_var(word),
        Slot::Symbol => parse_var(word).or_else(|| parse_constant(word)),
        Slot::Label => is_identifier(word).then(|| Operand::new(OperandClass::Label, word)),
        Slot::Type => TYPE_NAMES
            .contains(&word)
            .then(|| Operand::new(OperandClass::Type, word)),
    };
    operand.ok_or_else(|| AsmError::InvalidOperand {
        line,
        token: word.to_string(),
        expected: slot.name(),
    })
}

/// `GF@name`, `LF@name` or `TF@name`.
fn parse_var(word: &str) -> Option<Operand> {
    let (frame, name) = word.split_once('@')?;
    (FRAME_TAGS.contains(&frame) && is_identifier(name)).then(|| Operand::new(OperandClass::Var, word))
}

/// `class@value` for the five literal classes.
fn parse_constant(word: &str) -> Option<Operand> {
    let (class_name, text) = word.split_once('@')?;
    let class = OperandClass::from_name(class_name).filter(OperandClass::is_literal)?;
    let valid = match class {
        OperandClass::Int => literal::parse_int(text).is_some(),
        OperandClass::Bool => literal::parse_bool(text).is_some(),
        OperandClass::Float => literal::parse_float(text).is_some(),
        OperandClass::Nil => text == "nil",
        OperandClass::String => literal::has_valid_escapes(text),
        OperandClass::Var | OperandClass::Label | OperandClass::Type => false,
    };
    valid.then(|| Operand::new(class, text))
}

/// Letters, digits and `_-$&%*!?`, not starting with a digit.
fn is_identifier(text: &str) -> bool {
    const SPECIAL: &str = "_-$&%*!?";
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || SPECIAL.contains(first) => {
            chars.all(|c| c.is_ascii_alphanumeric() || SPECIAL.contains(c))
        }
        _ => false,
    }
}

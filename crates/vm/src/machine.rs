//! Engine state: program, frames, control stack, program counter, I/O.

use ippcode_common::{literal, Instruction, Operand, OperandClass, Program, Value};

use crate::control::ControlStack;
use crate::error::RuntimeError;
use crate::frames::{FrameStore, VarRef};
use crate::io::{InputSource, OutputSink};

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Halt {
    /// The program counter ran past the last instruction.
    Completed,
    /// EXIT with a code in `0..=9`.
    Exit(u8),
}

impl Halt {
    /// Process exit code.
    pub fn code(&self) -> i32 {
        match self {
            Halt::Completed => 0,
            Halt::Exit(code) => i32::from(*code),
        }
    }
}

/// Where execution continues after an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Next,
    Jump(usize),
    Exit(u8),
}

/// The IPPcode24 execution engine.
///
/// Owns all mutable run state. Independent engines share nothing.
pub struct Engine<'a> {
    pub(crate) program: &'a Program,
    pub(crate) frames: FrameStore,
    pub(crate) calls: ControlStack,
    /// Dense index of the next instruction.
    pub(crate) pc: usize,
    /// Instructions executed so far.
    pub(crate) steps: u64,
    pub(crate) input: &'a mut dyn InputSource,
    pub(crate) output: &'a mut dyn OutputSink,
}

impl<'a> Engine<'a> {
    pub fn new(
        program: &'a Program,
        input: &'a mut dyn InputSource,
        output: &'a mut dyn OutputSink,
    ) -> Self {
        Self {
            program,
            frames: FrameStore::new(),
            calls: ControlStack::new(),
            pc: 0,
            steps: 0,
            input,
            output,
        }
    }

    pub fn frames(&self) -> &FrameStore {
        &self.frames
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn call_depth(&self) -> usize {
        self.calls.depth()
    }

    /// Look up a variable by its written form, e.g. `GF@x`.
    pub fn variable(&self, text: &str) -> Option<&Value> {
        self.frames.get(VarRef::parse(text)?).ok()
    }

    /// Fetch the instruction at the current pc.
    pub(crate) fn fetch(&self) -> Result<&'a Instruction, RuntimeError> {
        let program = self.program;
        program
            .instructions
            .get(self.pc)
            .ok_or_else(|| RuntimeError::Internal {
                at: self.pc,
                message: "program counter past the end".to_string(),
            })
    }

    /// Parse a `var` operand into a frame reference.
    pub(crate) fn var_ref<'o>(&self, operand: &'o Operand, at: usize) -> Result<VarRef<'o>, RuntimeError> {
        VarRef::parse(&operand.text).ok_or_else(|| RuntimeError::InvalidOperandValue {
            at,
            reason: format!("'{}' is not a variable reference", operand.text),
        })
    }

    /// Resolve a symbol operand. Uninitialized variables are a missing value.
    pub(crate) fn resolve(&self, operand: &Operand, at: usize) -> Result<Value, RuntimeError> {
        match self.resolve_any(operand, at)? {
            Value::Uninitialized => Err(RuntimeError::MissingOperandValue { at }),
            value => Ok(value),
        }
    }

    /// Resolve a symbol operand, letting an uninitialized value through.
    pub(crate) fn resolve_any(&self, operand: &Operand, at: usize) -> Result<Value, RuntimeError> {
        if operand.class == OperandClass::Var {
            let var = self.var_ref(operand, at)?;
            return self.frames.get(var).cloned().map_err(|e| e.at(at));
        }
        decode_literal(operand, at)
    }

    /// Assign to the variable named by a `var` operand.
    pub(crate) fn store(&mut self, operand: &Operand, value: Value, at: usize) -> Result<(), RuntimeError> {
        let var = self.var_ref(operand, at)?;
        self.frames.set(var, value).map_err(|e| e.at(at))
    }

    /// Dense index of the label named by a `label` operand.
    pub(crate) fn label_target(&self, operand: &Operand, at: usize) -> Result<usize, RuntimeError> {
        self.program
            .labels
            .resolve(&operand.text)
            .ok_or_else(|| RuntimeError::LabelUndefined {
                at,
                name: operand.text.clone(),
            })
    }

    pub(crate) fn emit(&mut self, text: &str, at: usize) -> Result<(), RuntimeError> {
        self.output.write(text).map_err(|e| RuntimeError::Output {
            at,
            message: e.to_string(),
        })
    }
}

/// Decode literal text according to its declared class.
pub(crate) fn decode_literal(operand: &Operand, at: usize) -> Result<Value, RuntimeError> {
    let text = operand.text.as_str();
    let value = match operand.class {
        OperandClass::Int => literal::parse_int(text).map(Value::Int),
        OperandClass::Bool => literal::parse_bool(text).map(Value::Bool),
        OperandClass::Float => literal::parse_float(text).map(Value::Float),
        OperandClass::Nil => (text == "nil").then_some(Value::Nil),
        OperandClass::String => Some(Value::Str(text.to_string())),
        OperandClass::Var | OperandClass::Label | OperandClass::Type => {
            return Err(RuntimeError::Internal {
                at,
                message: format!("{} operand is not a literal", operand.class.name()),
            })
        }
    };
    value.ok_or_else(|| RuntimeError::InvalidOperandValue {
        at,
        reason: format!("'{}' is not a valid {} literal", text, operand.class.name()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_decoding() {
        let int = Operand::new(OperandClass::Int, "0x1F");
        assert_eq!(decode_literal(&int, 0), Ok(Value::Int(31)));

        let bad = Operand::new(OperandClass::Int, "twelve");
        assert_eq!(decode_literal(&bad, 4).unwrap_err().exit_code(), 53);

        let nil = Operand::new(OperandClass::Nil, "nil");
        assert_eq!(decode_literal(&nil, 0), Ok(Value::Nil));

        let bad_nil = Operand::new(OperandClass::Nil, "null");
        assert!(decode_literal(&bad_nil, 0).is_err());

        let text = Operand::new(OperandClass::String, "a\\032b");
        assert_eq!(decode_literal(&text, 0), Ok(Value::Str("a\\032b".into())));
    }

    #[test]
    fn label_operand_is_not_a_literal() {
        let label = Operand::new(OperandClass::Label, "end");
        assert_eq!(decode_literal(&label, 0).unwrap_err().exit_code(), 99);
    }

    #[test]
    fn halt_codes() {
        assert_eq!(Halt::Completed.code(), 0);
        assert_eq!(Halt::Exit(7).code(), 7);
    }
}

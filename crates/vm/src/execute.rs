//! Main execution loop and opcode dispatch.

use ippcode_common::{literal, Instruction, Opcode, Slot, Value};
use tracing::{debug, info, trace, warn};

use crate::error::RuntimeError;
use crate::machine::{Engine, Flow, Halt};
use crate::ops::{self, ArithOp, LogicOp, OperandOrder, RelOp};
use crate::validate::{self, expect_bool, expect_float, expect_int, expect_str, expect_type_name};

impl<'a> Engine<'a> {
    /// Execute the program until the pc runs off the end, EXIT, or error.
    pub fn execute(&mut self) -> Result<Halt, RuntimeError> {
        info!(
            instructions = self.program.len(),
            labels = self.program.labels.len(),
            "run started"
        );
        let result = self.run_loop();
        let flushed = self.output.flush().map_err(|e| RuntimeError::Output {
            at: self.pc,
            message: e.to_string(),
        });
        let result = result.and_then(|halt| flushed.map(|()| halt));
        match &result {
            Ok(halt) => info!(code = halt.code(), steps = self.steps, "run finished"),
            Err(e) => warn!(error = %e, code = e.exit_code(), steps = self.steps, "run aborted"),
        }
        result
    }

    fn run_loop(&mut self) -> Result<Halt, RuntimeError> {
        while self.pc < self.program.len() {
            let at = self.pc;
            let instr = self.fetch()?;
            let opcode = instr
                .decode_opcode()
                .ok_or_else(|| RuntimeError::UnknownOpcode {
                    at,
                    opcode: instr.opcode.clone(),
                })?;
            trace!(pc = at, opcode = opcode.mnemonic(), "dispatch");
            self.steps += 1;

            match self.step(opcode, instr, at)? {
                Flow::Next => self.pc = at + 1,
                Flow::Jump(target) => self.pc = target,
                Flow::Exit(code) => return Ok(Halt::Exit(code)),
            }
        }
        Ok(Halt::Completed)
    }

    fn step(&mut self, opcode: Opcode, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        validate::check_operands(opcode, &instr.operands, at)?;

        match opcode {
            // Frames and variables
            Opcode::DefVar => self.exec_defvar(instr, at),
            Opcode::Move => self.exec_move(instr, at),
            Opcode::CreateFrame => {
                self.frames.create_temp();
                debug!(pc = at, "temporary frame created");
                Ok(Flow::Next)
            }
            Opcode::PushFrame => {
                self.frames.push_temp_to_local().map_err(|e| e.at(at))?;
                debug!(pc = at, depth = self.frames.local_depth(), "frame pushed");
                Ok(Flow::Next)
            }
            Opcode::PopFrame => {
                self.frames.pop_local_to_temp().map_err(|e| e.at(at))?;
                debug!(pc = at, depth = self.frames.local_depth(), "frame popped");
                Ok(Flow::Next)
            }

            // Calls and jumps
            Opcode::Call => self.exec_call(instr, at),
            Opcode::Return => self.exec_return(at),
            Opcode::Label => Ok(Flow::Next),
            Opcode::Jump => Ok(Flow::Jump(self.label_target(&instr.operands[0], at)?)),
            Opcode::JumpIfEq | Opcode::JumpIfEqS => self.exec_jump_if(instr, at, true),
            Opcode::JumpIfNeq | Opcode::JumpIfNeqS => self.exec_jump_if(instr, at, false),
            Opcode::Exit => self.exec_exit(instr, at),

            // Arithmetic
            Opcode::Add | Opcode::AddS => self.exec_arith(instr, at, ArithOp::Add, opcode),
            Opcode::Sub | Opcode::SubS => self.exec_arith(instr, at, ArithOp::Sub, opcode),
            Opcode::Mul | Opcode::MulS => self.exec_arith(instr, at, ArithOp::Mul, opcode),
            Opcode::IDiv | Opcode::IDivS => self.exec_arith(instr, at, ArithOp::IDiv, opcode),

            // Relational
            Opcode::Lt | Opcode::LtS => self.exec_relational(instr, at, RelOp::Lt, opcode),
            Opcode::Gt | Opcode::GtS => self.exec_relational(instr, at, RelOp::Gt, opcode),
            Opcode::Eq | Opcode::EqS => self.exec_relational(instr, at, RelOp::Eq, opcode),

            // Logic
            Opcode::And | Opcode::AndS => self.exec_logic(instr, at, LogicOp::And, opcode),
            Opcode::Or | Opcode::OrS => self.exec_logic(instr, at, LogicOp::Or, opcode),
            Opcode::Not | Opcode::NotS => self.exec_not(instr, at, opcode),

            // Strings and conversions
            Opcode::Int2Char | Opcode::Int2CharS => self.exec_int2char(instr, at),
            Opcode::Stri2Int | Opcode::Stri2IntS => self.exec_stri2int(instr, at),
            Opcode::Concat => self.exec_concat(instr, at),
            Opcode::StrLen => self.exec_strlen(instr, at),
            Opcode::GetChar => self.exec_getchar(instr, at),
            Opcode::SetChar => self.exec_setchar(instr, at),
            Opcode::Type => self.exec_type(instr, at),
            Opcode::Int2Float => self.exec_int2float(instr, at),
            Opcode::Float2Int => self.exec_float2int(instr, at),

            // I/O
            Opcode::Read => self.exec_read(instr, at),
            Opcode::Write => self.exec_write(instr, at),

            // Debugging
            Opcode::DPrint => {
                debug!(pc = at, operand = %instr.operands[0], "DPRINT");
                Ok(Flow::Next)
            }
            Opcode::Break => {
                debug!(
                    pc = at,
                    steps = self.steps,
                    globals = self.frames.global_len(),
                    temporary = self.frames.has_temp(),
                    locals = self.frames.local_depth(),
                    calls = self.calls.depth(),
                    "BREAK"
                );
                Ok(Flow::Next)
            }
        }
    }

    // ============================================================
    // Frames and variables
    // ============================================================

    fn exec_defvar(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let var = self.var_ref(&instr.operands[0], at)?;
        self.frames.define(var).map_err(|e| e.at(at))?;
        Ok(Flow::Next)
    }

    fn exec_move(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let value = self.resolve(&instr.operands[1], at)?;
        self.store(&instr.operands[0], value, at)?;
        Ok(Flow::Next)
    }

    // ============================================================
    // Control flow
    // ============================================================

    fn exec_call(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let target = self.label_target(&instr.operands[0], at)?;
        self.calls.call_push(at + 1);
        debug!(pc = at, target, depth = self.calls.depth(), "call");
        Ok(Flow::Jump(target))
    }

    fn exec_return(&mut self, at: usize) -> Result<Flow, RuntimeError> {
        let target = self
            .calls
            .call_pop()
            .ok_or(RuntimeError::EmptyCallStack { at })?;
        debug!(pc = at, target, depth = self.calls.depth(), "return");
        Ok(Flow::Jump(target))
    }

    /// JUMPIFEQ/JUMPIFNEQ and their stack twins. The label is resolved
    /// before the comparison, so an undefined label fails even when the
    /// jump would not be taken.
    fn exec_jump_if(&mut self, instr: &Instruction, at: usize, on_equal: bool) -> Result<Flow, RuntimeError> {
        let target = self.label_target(&instr.operands[0], at)?;
        let left = self.resolve(&instr.operands[1], at)?;
        let right = self.resolve(&instr.operands[2], at)?;
        let equal = ops::compare(RelOp::Eq, &left, &right).map_err(|e| e.at(at))?;
        if equal == on_equal {
            Ok(Flow::Jump(target))
        } else {
            Ok(Flow::Next)
        }
    }

    fn exec_exit(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let value = self.resolve(&instr.operands[0], at)?;
        let code = expect_int(&value, at)?;
        match u8::try_from(code) {
            Ok(code) if code <= 9 => Ok(Flow::Exit(code)),
            _ => Err(RuntimeError::InvalidExitCode { at, code }),
        }
    }

    // ============================================================
    // Arithmetic, relational, logic
    // ============================================================

    /// Resolve both symbol operands of a `var symb symb` instruction in the
    /// opcode's evaluation order, returning `(left, right)`.
    fn resolve_pair(&self, instr: &Instruction, at: usize, opcode: Opcode) -> Result<(Value, Value), RuntimeError> {
        let (first, second) =
            OperandOrder::of(opcode).arrange(&instr.operands[1], &instr.operands[2]);
        let left = self.resolve(first, at)?;
        let right = self.resolve(second, at)?;
        Ok((left, right))
    }

    fn exec_arith(&mut self, instr: &Instruction, at: usize, op: ArithOp, opcode: Opcode) -> Result<Flow, RuntimeError> {
        let (left, right) = self.resolve_pair(instr, at, opcode)?;
        let a = expect_int(&left, at)?;
        let b = expect_int(&right, at)?;
        let result = ops::arithmetic(op, a, b).map_err(|e| e.at(at))?;
        self.store(&instr.operands[0], Value::Int(result), at)?;
        Ok(Flow::Next)
    }

    fn exec_relational(&mut self, instr: &Instruction, at: usize, op: RelOp, opcode: Opcode) -> Result<Flow, RuntimeError> {
        let (left, right) = self.resolve_pair(instr, at, opcode)?;
        let result = ops::compare(op, &left, &right).map_err(|e| e.at(at))?;
        self.store(&instr.operands[0], Value::Bool(result), at)?;
        Ok(Flow::Next)
    }

    fn exec_logic(&mut self, instr: &Instruction, at: usize, op: LogicOp, opcode: Opcode) -> Result<Flow, RuntimeError> {
        let (left, right) = self.resolve_pair(instr, at, opcode)?;
        let a = expect_bool(&left, at)?;
        let b = expect_bool(&right, at)?;
        self.store(&instr.operands[0], Value::Bool(ops::logic(op, a, b)), at)?;
        Ok(Flow::Next)
    }

    /// NOT ignores a third operand; NOTS negates its last symbol operand.
    fn exec_not(&mut self, instr: &Instruction, at: usize, opcode: Opcode) -> Result<Flow, RuntimeError> {
        let mut operand = &instr.operands[1];
        if OperandOrder::of(opcode) == OperandOrder::Reversed {
            if let Some(last) = instr.operands.get(2) {
                validate::expect_class(last, Slot::Symbol, 2, at)?;
                operand = last;
            }
        }
        let value = self.resolve(operand, at)?;
        let b = expect_bool(&value, at)?;
        self.store(&instr.operands[0], Value::Bool(!b), at)?;
        Ok(Flow::Next)
    }

    // ============================================================
    // Strings and conversions
    // ============================================================

    fn exec_int2char(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let value = self.resolve(&instr.operands[1], at)?;
        let code = expect_int(&value, at)?;
        let text = ops::code_point_to_string(code).map_err(|e| e.at(at))?;
        self.store(&instr.operands[0], Value::Str(text), at)?;
        Ok(Flow::Next)
    }

    fn exec_stri2int(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let text = self.resolve(&instr.operands[1], at)?;
        let index = self.resolve(&instr.operands[2], at)?;
        let c = ops::char_at(expect_str(&text, at)?, expect_int(&index, at)?).map_err(|e| e.at(at))?;
        self.store(&instr.operands[0], Value::Int(i64::from(u32::from(c))), at)?;
        Ok(Flow::Next)
    }

    fn exec_concat(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let left = self.resolve(&instr.operands[1], at)?;
        let right = self.resolve(&instr.operands[2], at)?;
        let joined = format!("{}{}", expect_str(&left, at)?, expect_str(&right, at)?);
        self.store(&instr.operands[0], Value::Str(joined), at)?;
        Ok(Flow::Next)
    }

    fn exec_strlen(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let value = self.resolve(&instr.operands[1], at)?;
        let length = expect_str(&value, at)?.chars().count();
        let length = i64::try_from(length).map_err(|_| RuntimeError::Internal {
            at,
            message: "string length exceeds int range".to_string(),
        })?;
        self.store(&instr.operands[0], Value::Int(length), at)?;
        Ok(Flow::Next)
    }

    fn exec_getchar(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let text = self.resolve(&instr.operands[1], at)?;
        let index = self.resolve(&instr.operands[2], at)?;
        let c = ops::char_at(expect_str(&text, at)?, expect_int(&index, at)?).map_err(|e| e.at(at))?;
        self.store(&instr.operands[0], Value::Str(c.to_string()), at)?;
        Ok(Flow::Next)
    }

    /// Edits the variable's current string in place.
    fn exec_setchar(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let current = self.resolve(&instr.operands[0], at)?;
        let index = self.resolve(&instr.operands[1], at)?;
        let replacement = self.resolve(&instr.operands[2], at)?;
        let updated = ops::set_char_at(
            expect_str(&current, at)?,
            expect_int(&index, at)?,
            expect_str(&replacement, at)?,
        )
        .map_err(|e| e.at(at))?;
        self.store(&instr.operands[0], Value::Str(updated), at)?;
        Ok(Flow::Next)
    }

    /// The only instruction that may observe an uninitialized variable.
    fn exec_type(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let value = self.resolve_any(&instr.operands[1], at)?;
        let name = value.type_name().to_string();
        self.store(&instr.operands[0], Value::Str(name), at)?;
        Ok(Flow::Next)
    }

    fn exec_int2float(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let value = self.resolve(&instr.operands[1], at)?;
        let n = expect_int(&value, at)?;
        self.store(&instr.operands[0], Value::Float(n as f64), at)?;
        Ok(Flow::Next)
    }

    fn exec_float2int(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let value = self.resolve(&instr.operands[1], at)?;
        let x = expect_float(&value, at)?;
        let n = ops::float_to_int(x).map_err(|e| e.at(at))?;
        self.store(&instr.operands[0], Value::Int(n), at)?;
        Ok(Flow::Next)
    }

    // ============================================================
    // I/O
    // ============================================================

    /// Unreadable or absent input stores nil.
    fn exec_read(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let type_name = Value::Str(instr.operands[1].text.clone());
        let read = match expect_type_name(&type_name, at)? {
            "int" => self.input.read_int().map(Value::Int),
            "bool" => self.input.read_bool().map(Value::Bool),
            "string" => self.input.read_string().map(Value::Str),
            "float" => self.input.read_float().map(Value::Float),
            _ => None,
        };
        self.store(&instr.operands[0], read.unwrap_or(Value::Nil), at)?;
        Ok(Flow::Next)
    }

    /// Nothing to print (nil or an empty string) is a missing value.
    fn exec_write(&mut self, instr: &Instruction, at: usize) -> Result<Flow, RuntimeError> {
        let value = self.resolve(&instr.operands[0], at)?;
        let text = match &value {
            Value::Str(s) => literal::decode_escapes(s),
            other => other.to_string(),
        };
        if text.is_empty() {
            return Err(RuntimeError::MissingOperandValue { at });
        }
        self.emit(&text, at)?;
        Ok(Flow::Next)
    }
}

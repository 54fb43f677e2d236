//! Frame and variable store.
//!
//! One global frame for the whole run, an optional temporary frame, and a
//! stack of local frames. Variables are created by DEFVAR (uninitialized),
//! changed only by assignment, and removed only with their frame.

use std::collections::HashMap;
use std::fmt;

use ippcode_common::Value;
use thiserror::Error;

use crate::error::RuntimeError;

/// Which frame a variable reference addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    /// `GF`, exists for the whole run.
    Global,
    /// `TF`, exists between CREATEFRAME and PUSHFRAME.
    Temporary,
    /// `LF`, the top of the local frame stack.
    Local,
}

impl FrameKind {
    /// Parse a frame tag (`GF`, `TF`, `LF`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "GF" => Some(FrameKind::Global),
            "TF" => Some(FrameKind::Temporary),
            "LF" => Some(FrameKind::Local),
            _ => None,
        }
    }

    /// Returns the frame tag.
    pub fn tag(&self) -> &'static str {
        match self {
            FrameKind::Global => "GF",
            FrameKind::Temporary => "TF",
            FrameKind::Local => "LF",
        }
    }
}

/// A parsed variable reference such as `LF@counter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarRef<'a> {
    pub frame: FrameKind,
    pub name: &'a str,
}

impl<'a> VarRef<'a> {
    /// Split `FRAME@name` at the first `@`. Returns `None` for a missing
    /// separator, an unknown frame tag, or an empty name.
    pub fn parse(text: &'a str) -> Option<Self> {
        let (tag, name) = text.split_once('@')?;
        let frame = FrameKind::from_tag(tag)?;
        if name.is_empty() {
            return None;
        }
        Some(Self { frame, name })
    }
}

impl fmt::Display for VarRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.frame.tag(), self.name)
    }
}

/// Failures of frame and variable operations, before an instruction index
/// is attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("variable '{0}' already defined")]
    Redefined(String),
    #[error("variable '{0}' not defined")]
    Undefined(String),
    #[error("{} frame not available", .0.tag())]
    Missing(FrameKind),
}

impl FrameError {
    /// Attach the failing instruction index.
    pub fn at(self, at: usize) -> RuntimeError {
        match self {
            FrameError::Redefined(name) => RuntimeError::VariableRedefined { at, name },
            FrameError::Undefined(name) => RuntimeError::VariableUndefined { at, name },
            FrameError::Missing(kind) => RuntimeError::FrameUndefined {
                at,
                frame: kind.tag(),
            },
        }
    }
}

type Frame = HashMap<String, Value>;

/// All variable storage of one engine run.
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    global: Frame,
    temporary: Option<Frame>,
    locals: Vec<Frame>,
}

impl FrameStore {
    /// Create a store with an empty global frame and nothing else.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a variable; its value starts as [`Value::Uninitialized`].
    pub fn define(&mut self, var: VarRef<'_>) -> Result<(), FrameError> {
        let frame = self.frame_mut(var.frame)?;
        if frame.contains_key(var.name) {
            return Err(FrameError::Redefined(var.to_string()));
        }
        frame.insert(var.name.to_string(), Value::Uninitialized);
        Ok(())
    }

    /// Assign to an existing variable.
    pub fn set(&mut self, var: VarRef<'_>, value: Value) -> Result<(), FrameError> {
        let slot = self
            .frame_mut(var.frame)?
            .get_mut(var.name)
            .ok_or_else(|| FrameError::Undefined(var.to_string()))?;
        *slot = value;
        Ok(())
    }

    /// Read an existing variable. May return [`Value::Uninitialized`].
    pub fn get(&self, var: VarRef<'_>) -> Result<&Value, FrameError> {
        self.frame(var.frame)?
            .get(var.name)
            .ok_or_else(|| FrameError::Undefined(var.to_string()))
    }

    /// CREATEFRAME: install a fresh, empty temporary frame, discarding any
    /// previous one.
    pub fn create_temp(&mut self) {
        self.temporary = Some(Frame::new());
    }

    /// PUSHFRAME: move the temporary frame onto the local stack. The
    /// temporary frame is undefined afterwards.
    pub fn push_temp_to_local(&mut self) -> Result<(), FrameError> {
        let frame = self
            .temporary
            .take()
            .ok_or(FrameError::Missing(FrameKind::Temporary))?;
        self.locals.push(frame);
        Ok(())
    }

    /// POPFRAME: move the top local frame into the temporary frame slot.
    pub fn pop_local_to_temp(&mut self) -> Result<(), FrameError> {
        let frame = self
            .locals
            .pop()
            .ok_or(FrameError::Missing(FrameKind::Local))?;
        self.temporary = Some(frame);
        Ok(())
    }

    /// Returns true if a temporary frame exists.
    pub fn has_temp(&self) -> bool {
        self.temporary.is_some()
    }

    /// Number of frames on the local stack.
    pub fn local_depth(&self) -> usize {
        self.locals.len()
    }

    /// Number of variables in the global frame.
    pub fn global_len(&self) -> usize {
        self.global.len()
    }

    fn frame(&self, kind: FrameKind) -> Result<&Frame, FrameError> {
        match kind {
            FrameKind::Global => Ok(&self.global),
            FrameKind::Temporary => self.temporary.as_ref().ok_or(FrameError::Missing(kind)),
            FrameKind::Local => self.locals.last().ok_or(FrameError::Missing(kind)),
        }
    }

    fn frame_mut(&mut self, kind: FrameKind) -> Result<&mut Frame, FrameError> {
        match kind {
            FrameKind::Global => Ok(&mut self.global),
            FrameKind::Temporary => self.temporary.as_mut().ok_or(FrameError::Missing(kind)),
            FrameKind::Local => self.locals.last_mut().ok_or(FrameError::Missing(kind)),
        }
    }
}

//! Control stack: return addresses pushed by CALL, popped by RETURN.

/// Stack of dense instruction indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlStack {
    returns: Vec<usize>,
}

impl ControlStack {
    /// Create an empty control stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a return address. Never fails.
    pub fn call_push(&mut self, return_index: usize) {
        self.returns.push(return_index);
    }

    /// Pop the most recent return address, `None` when empty.
    pub fn call_pop(&mut self) -> Option<usize> {
        self.returns.pop()
    }

    /// Number of pending returns.
    pub fn depth(&self) -> usize {
        self.returns.len()
    }
}

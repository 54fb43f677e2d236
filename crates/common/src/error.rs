//! Build errors for IPPcode24 programs.

use thiserror::Error;

/// Errors detected while turning instruction records into a program,
/// before any instruction executes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Two records declare the same order key.
    #[error("duplicate instruction order {order}")]
    DuplicateOrder { order: i64 },

    /// A label name is declared more than once.
    #[error("label '{name}' redefined at instruction {at}")]
    DuplicateLabel { name: String, at: usize },

    /// A LABEL record without exactly one operand of class `label`.
    #[error("malformed LABEL at instruction {at}")]
    MalformedLabel { at: usize },
}

impl BuildError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            BuildError::DuplicateOrder { .. } | BuildError::MalformedLabel { .. } => 32,
            BuildError::DuplicateLabel { .. } => 52,
        }
    }
}

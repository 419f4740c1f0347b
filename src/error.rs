use std::fmt;

/// Errors that can occur while loading or interpreting Brainfuck code.
#[derive(Debug, thiserror::Error)]
pub enum InterpreterError {
    /// A `<` was executed while the data pointer was already at cell 0.
    #[error("Tape underflow at instruction {ip}: cannot move left of cell 0")]
    TapeUnderflow { ip: usize },

    /// A loop jump went through a bracket that has no partner.
    #[error("Unmatched bracket {kind} at instruction {ip}")]
    UnmatchedBrace { ip: usize, kind: BracketKind },

    /// The input or output collaborator failed.
    #[error("I/O error at instruction {ip}: {source}")]
    Io { ip: usize, #[source] source: std::io::Error },

    /// Execution aborted due to step limit.
    #[error("Execution aborted: step limit exceeded ({limit})")]
    StepLimitExceeded { limit: usize },

    /// Execution aborted due to cooperative cancellation (timeout or Ctrl+C).
    #[error("Execution aborted: cancelled")]
    Canceled,
}

/// Which side of a loop a bracket sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BracketKind {
    Open,
    Close,
}

impl fmt::Display for BracketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BracketKind::Open => write!(f, "'['"),
            BracketKind::Close => write!(f, "']'"),
        }
    }
}

/// A brace map lookup found no partner for `index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no matching bracket for {kind} at index {index}")]
pub struct UnmatchedBrace {
    pub index: usize,
    pub kind: BracketKind,
}

/// The data pointer was asked to move left of cell 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("data pointer is already at cell 0")]
pub struct TapeUnderflow;

impl InterpreterError {
    /// Instruction index the error is attached to, if any.
    pub fn instruction_pointer(&self) -> Option<usize> {
        match self {
            InterpreterError::TapeUnderflow { ip }
            | InterpreterError::UnmatchedBrace { ip, .. }
            | InterpreterError::Io { ip, .. } => Some(*ip),
            InterpreterError::StepLimitExceeded { .. } | InterpreterError::Canceled => None,
        }
    }
}

impl From<UnmatchedBrace> for InterpreterError {
    fn from(err: UnmatchedBrace) -> Self {
        InterpreterError::UnmatchedBrace { ip: err.index, kind: err.kind }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positioned_errors_report_their_instruction() {
        assert_eq!(InterpreterError::TapeUnderflow { ip: 4 }.instruction_pointer(), Some(4));
        let io = std::io::Error::other("closed");
        assert_eq!(InterpreterError::Io { ip: 2, source: io }.instruction_pointer(), Some(2));
    }

    #[test]
    fn unmatched_brace_keeps_bracket_index() {
        let err = InterpreterError::from(UnmatchedBrace { index: 7, kind: BracketKind::Close });
        assert_eq!(err.instruction_pointer(), Some(7));
        assert_eq!(err.to_string(), "Unmatched bracket ']' at instruction 7");
    }

    #[test]
    fn run_control_aborts_have_no_position() {
        assert_eq!(InterpreterError::StepLimitExceeded { limit: 3 }.instruction_pointer(), None);
        assert_eq!(InterpreterError::Canceled.instruction_pointer(), None);
    }
}

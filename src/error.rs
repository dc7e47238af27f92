/// Errors that can occur while running a program on an [`Engine`](crate::Engine).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// `,` was executed with nothing left in the input buffer.
    ///
    /// The active cell is left untouched and the instruction pointer still
    /// addresses the `,`, so appending input and calling `step` resumes the run.
    #[error("End of input at instruction {ip}")]
    EndOfInput { ip: usize },

    /// A cell index outside the tape was requested.
    #[error("Cell index {index} out of range (tape length {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// A `]` was executed with no open loop to return to.
    #[error("Unmatched bracket ']' at instruction {ip}")]
    UnmatchedBracket { ip: usize },

    /// Reading program text from a stream failed.
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl EngineError {
    /// Instruction position the error was raised at, when it has one.
    pub fn ip(&self) -> Option<usize> {
        match self {
            EngineError::EndOfInput { ip } | EngineError::UnmatchedBracket { ip } => Some(*ip),
            EngineError::IndexOutOfRange { .. } | EngineError::Io { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_position() {
        let err = EngineError::EndOfInput { ip: 7 };
        assert_eq!(err.to_string(), "End of input at instruction 7");
        assert_eq!(err.ip(), Some(7));

        let err = EngineError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Cell index 4 out of range (tape length 2)");
        assert_eq!(err.ip(), None);
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: EngineError = io.into();
        assert!(matches!(err, EngineError::Io { .. }));
    }
}

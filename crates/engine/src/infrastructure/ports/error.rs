//! Error types for port operations.

/// Repository operation errors with context for debugging.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    /// Entity not found - includes entity type and ID for actionable error messages.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Reading or writing the backing file failed.
    #[error("I/O error in {operation}: {message}")]
    Io {
        operation: &'static str,
        message: String,
    },

    /// The backing file is not well-formed JSON.
    #[error("Malformed JSON in {file}: {message}")]
    Parse { file: String, message: String },

    /// The backing file is JSON but a record has the wrong shape or breaks
    /// a roster invariant.
    #[error("Invalid record in {file}: {message}")]
    InvalidRecord { file: String, message: String },
}

impl RepoError {
    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Create an Io error with operation context.
    pub fn io(operation: &'static str, message: impl ToString) -> Self {
        Self::Io {
            operation,
            message: message.to_string(),
        }
    }

    pub fn parse(file: impl Into<String>, message: impl ToString) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.to_string(),
        }
    }

    pub fn invalid_record(file: impl Into<String>, message: impl ToString) -> Self {
        Self::InvalidRecord {
            file: file.into(),
            message: message.to_string(),
        }
    }

    /// Stable machine code for logs and error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Io { .. } => "IO_ERROR",
            Self::Parse { .. } => "JSON_PARSE_ERROR",
            Self::InvalidRecord { .. } => "VALIDATION_ERROR",
        }
    }

    /// Check if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(RepoError::parse("f.json", "eof").code(), "JSON_PARSE_ERROR");
        assert_eq!(
            RepoError::invalid_record("f.json", "bad").code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(RepoError::io("persist", "denied").code(), "IO_ERROR");
        assert!(RepoError::not_found("Warband", "x").is_not_found());
    }

    #[test]
    fn messages_carry_context() {
        let err = RepoError::not_found("Warband", "abc");
        assert_eq!(err.to_string(), "Warband not found: abc");
    }
}

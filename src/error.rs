//! Error types for the comparison engine.

/// Errors raised while validating or comparing a batch of analyses.
///
/// The engine is a pure function, so there is no transient failure mode:
/// every error is a caller mistake and is never retried internally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompareError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl CompareError {
    /// Build an `InvalidInput` error from any message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CompareError::InvalidInput {
            message: message.into(),
        }
    }

    /// Returns true for `InvalidInput` errors.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, CompareError::InvalidInput { .. })
    }
}

/// Result alias used across the engine.
pub type Result<T> = std::result::Result<T, CompareError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let err = CompareError::invalid_input("at least 2 records required");
        assert!(err.is_invalid_input());
        assert_eq!(
            err.to_string(),
            "Invalid input: at least 2 records required"
        );
    }
}

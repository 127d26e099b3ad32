//! Unified error types for the domain layer

use thiserror::Error;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Parse error (for value objects and wire tags)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a parse error for conversion failures.
    ///
    /// Use this in `TryFrom`/`FromStr` implementations when the input
    /// doesn't match any known variant or format.
    ///
    /// # Example
    /// ```ignore
    /// impl TryFrom<u8> for QuestStatus {
    ///     type Error = DomainError;
    ///     fn try_from(tag: u8) -> Result<Self, Self::Error> {
    ///         match tag {
    ///             0 => Ok(Self::Locked),
    ///             _ => Err(DomainError::parse(format!("Unknown quest status tag: {}", tag))),
    ///         }
    ///     }
    /// }
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = DomainError::parse("Unknown quest status tag: 42");
        assert!(matches!(err, DomainError::Parse(_)));
        assert!(err.to_string().contains("42"));
    }
}

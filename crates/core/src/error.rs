//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Raised only at the boundaries (ingestion, option parsing). The filtering,
/// sorting and capping functions are total and never return one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was missing or blank.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_message() {
        assert_eq!(
            DomainError::validation("bad sort").to_string(),
            "validation failed: bad sort"
        );
        assert_eq!(
            DomainError::invalid_id("Id is blank").to_string(),
            "invalid identifier: Id is blank"
        );
    }
}

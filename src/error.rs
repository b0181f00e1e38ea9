//! Error types for pref-elicit
//!
//! Only configuration problems are errors. Domain outcomes such as a
//! termination filter firing or an inconsistent construction round are
//! reported as ordinary values in the corresponding reports.

use thiserror::Error;

/// Top-level error type for elicitation operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ElicitationError {
    /// Missing or invalid configuration (context pieces, parameters, filters)
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// A performance vector is shorter than the number of criteria
    #[error("Dimension mismatch for alternative {alternative}: expected at least {expected} values, got {actual}")]
    DimensionMismatch {
        alternative: String,
        expected: usize,
        actual: usize,
    },

    /// Configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration file could not be read or written
    #[error("I/O error: {0}")]
    Io(String),
}

impl ElicitationError {
    /// Shorthand for a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }
}

impl From<serde_json::Error> for ElicitationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for ElicitationError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for elicitation operations
pub type ElicitResult<T> = Result<T, ElicitationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = ElicitationError::configuration("the criteria are not provided");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: the criteria are not provided"
        );
    }

    #[test]
    fn test_dimension_mismatch_display() {
        let err = ElicitationError::DimensionMismatch {
            alternative: "A3".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch for alternative A3: expected at least 3 values, got 2"
        );
    }

    #[test]
    fn test_from_serde_error() {
        let json_err = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: ElicitationError = json_err.into();
        assert!(matches!(err, ElicitationError::Serialization(_)));
    }
}

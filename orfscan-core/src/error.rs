//! Structured error types for orfscan.

use thiserror::Error;

/// Unified error type for all orfscan operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrfscanError {
    /// Invalid input (bases outside the alphabet, malformed codons, empty vocabularies)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Parse error (malformed textual input such as a codon list)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience alias used throughout orfscan.
pub type Result<T> = std::result::Result<T, OrfscanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind() {
        let err = OrfscanError::InvalidInput("codon 'AT' must be 3 bases".into());
        assert_eq!(err.to_string(), "invalid input: codon 'AT' must be 3 bases");

        let err = OrfscanError::Parse("empty codon list".into());
        assert_eq!(err.to_string(), "parse error: empty codon list");
    }
}

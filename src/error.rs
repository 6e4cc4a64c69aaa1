//! Error types for the Sigflow analysis engines.
//!
//! This module provides a unified error type [`SigflowError`] that covers
//! all error conditions that can occur during graph description parsing,
//! signal-flow graph analysis, and Routh-Hurwitz stability checking.

use thiserror::Error;

/// Result type alias using [`SigflowError`].
pub type Result<T> = std::result::Result<T, SigflowError>;

/// Unified error type for all Sigflow operations.
#[derive(Error, Debug)]
pub enum SigflowError {
    // ============ Graph Description Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    // ============ Graph Model Errors ============
    /// Node not found in graph
    #[error("Node '{node}' not found in graph")]
    NodeNotFound { node: String },

    /// Duplicate node declaration
    #[error("Duplicate node '{name}'")]
    DuplicateNode { name: String },

    /// Branch gain that cannot be used as a gain token
    #[error("Invalid gain: {message}")]
    InvalidGain { message: String },

    /// Analysis requested on a graph that cannot have a forward path
    #[error("You need at least 2 nodes to analyze (graph has {nodes})")]
    GraphTooSmall { nodes: usize },

    // ============ Stability Errors ============
    /// Unparseable polynomial term
    #[error("Invalid equation format near '{term}': {message}")]
    PolynomialParseError { term: String, message: String },

    /// Zero pivot or non-finite value in the Routh recurrence
    #[error("Degenerate Routh array at row {row}: {message}")]
    RouthDegenerateCase { row: usize, message: String },

    // ============ I/O Errors ============
    /// Error reading a graph description file
    #[error("Failed to read graph file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl SigflowError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create a polynomial parse error for the offending term
    pub fn polynomial(term: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PolynomialParseError {
            term: term.into(),
            message: message.into(),
        }
    }

    /// Create a degenerate Routh array error
    pub fn degenerate(row: usize, message: impl Into<String>) -> Self {
        Self::RouthDegenerateCase {
            row,
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SigflowError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_are_descriptive() {
        let e = SigflowError::GraphTooSmall { nodes: 1 };
        assert!(e.to_string().contains("at least 2 nodes"));

        let e = SigflowError::polynomial("3x", "unexpected character 'x'");
        assert_eq!(
            e.to_string(),
            "Invalid equation format near '3x': unexpected character 'x'"
        );

        let e = SigflowError::degenerate(3, "zero pivot in first column");
        assert!(e.to_string().contains("row 3"));
    }
}

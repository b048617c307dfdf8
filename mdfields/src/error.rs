//! Error types for document transformation

use std::fmt;

/// Errors that can occur while parsing or serializing a document
#[derive(Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Error during Markdown parsing
    ParseError(String),
    /// Error during HTML/Markdown serialization
    SerializationError(String),
    /// Requested excerpt format is not one of plain/html/markdown
    UnknownFormat(String),
}

impl fmt::Display for TransformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformError::ParseError(msg) => write!(f, "Parse error: {msg}"),
            TransformError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            TransformError::UnknownFormat(name) => write!(f, "Unknown excerpt format '{name}'"),
        }
    }
}

impl std::error::Error for TransformError {}

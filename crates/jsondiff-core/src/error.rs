//! Error types for document parsing and diffing.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, machine-readable error codes.
///
/// Once published, variant names and their serialized `snake_case` strings
/// must never change across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ErrorCode {
    /// Input text was empty or not valid JSON.
    JsonParseError,
    /// Document nesting exceeded the configured maximum depth.
    NestingTooDeep,
    /// A path key string is not in canonical form.
    InvalidPathKey,
    /// Reading the input failed.
    IoError,
}

/// Failure to turn raw text into a [`Value`](crate::Value).
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Paste JSON to compare; the input is empty")]
    Empty,

    #[error("{message} at line {line} column {column} (position {position})")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        /// Byte offset into the trimmed input.
        position: usize,
    },

    #[error("Failed to read input: {0}")]
    Io(String),
}

impl ParseError {
    /// Byte offset of a syntax error, when known.
    pub fn position(&self) -> Option<usize> {
        match self {
            ParseError::Syntax { position, .. } => Some(*position),
            ParseError::Empty | ParseError::Io(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DiffError {
    #[error("Document too deeply nested at {path} (max: {max_depth})")]
    NestingTooDeep { path: String, max_depth: usize },

    #[error("Invalid path key {key:?} at offset {offset}: {message}")]
    InvalidPathKey {
        key: String,
        offset: usize,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DiffError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DiffError::NestingTooDeep { .. } => ErrorCode::NestingTooDeep,
            DiffError::InvalidPathKey { .. } => ErrorCode::InvalidPathKey,
            DiffError::Parse(ParseError::Io(_)) => ErrorCode::IoError,
            DiffError::Parse(_) | DiffError::Json(_) => ErrorCode::JsonParseError,
        }
    }
}

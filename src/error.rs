//! Error types for igesrust library

use crate::types::EntityId;
use std::io;
use thiserror::Error;

/// Main error type for igesrust operations
#[derive(Debug, Error)]
pub enum IgesError {
    /// IO error occurred during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A physical record could not be decoded
    #[error("Malformed record at line {line}: {reason}")]
    MalformedRecord { line: usize, reason: String },

    /// The global section could not be decoded
    #[error("Invalid global field {field}: {reason}")]
    InvalidGlobal { field: usize, reason: String },

    /// Parameter data of an entity could not be decoded
    #[error("Invalid parameter {position} of directory entry {directory_index}: {reason}")]
    InvalidParameter {
        directory_index: usize,
        position: usize,
        reason: String,
    },

    /// An entity could not be written
    #[error("Cannot write entity {id}: {reason}")]
    EntityWrite { id: EntityId, reason: String },

    /// Reader or writer configuration is unusable
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Text could not be represented in the configured encoding
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl IgesError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        IgesError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn entity_write(id: EntityId, reason: impl Into<String>) -> Self {
        IgesError::EntityWrite {
            id,
            reason: reason.into(),
        }
    }
}

/// Result type alias for igesrust operations
pub type Result<T> = std::result::Result<T, IgesError>;

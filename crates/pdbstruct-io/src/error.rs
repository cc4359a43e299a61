//! Error types for PDB I/O
//!
//! Numeric overflow in fixed-width columns and unknown record types are
//! absorbed by the reader and never show up here.

use pdbstruct_mol::MolError;
use thiserror::Error;

/// Errors that can occur while reading or writing PDB files
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Structurally required information is missing or contradictory
    #[error("Format error at line {line}: {message}")]
    Format {
        /// Line number where the error occurred (1-based, 0 when unknown)
        line: usize,
        /// Error message, including the offending record
        message: String,
    },

    /// Unrecognized value for a writer option
    #[error("Invalid value {value:?} for option `{option}`")]
    InvalidOption {
        /// Option name
        option: &'static str,
        /// Rejected value
        value: String,
    },

    /// Structure model rejected an update
    #[error("Structure error: {0}")]
    Structure(#[from] MolError),
}

impl IoError {
    /// Create a format error at a specific line
    pub fn format(line: usize, message: impl Into<String>) -> Self {
        IoError::Format {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid option error
    pub fn invalid_option(option: &'static str, value: impl Into<String>) -> Self {
        IoError::InvalidOption {
            option,
            value: value.into(),
        }
    }

    /// Line the error refers to, if any
    pub fn line(&self) -> Option<usize> {
        match self {
            IoError::Format { line, .. } if *line > 0 => Some(*line),
            _ => None,
        }
    }
}

/// Result type for PDB I/O operations
pub type IoResult<T> = Result<T, IoError>;

//! Error types for structure operations

use thiserror::Error;

/// Errors that can occur when assembling or editing a structure
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MolError {
    /// Frame index is out of bounds
    #[error("Frame index {0} is out of bounds (max: {1})")]
    FrameIndexOutOfBounds(usize, usize),

    /// Coordinate frame length does not match the atom count
    #[error("Frame has {actual} coordinates, expected {expected}")]
    FrameLength { expected: usize, actual: usize },

    /// Alternate conformer cannot be attached to the primary atom
    #[error("Cannot attach altloc '{altloc}' to atom {name}")]
    AltlocConflict { name: String, altloc: char },
}

impl MolError {
    pub fn frame_out_of_bounds(index: usize, max: usize) -> Self {
        MolError::FrameIndexOutOfBounds(index, max)
    }
}

/// Result type for structure operations
pub type MolResult<T> = Result<T, MolError>;

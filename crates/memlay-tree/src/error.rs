//! Error types for tree reconstruction.

use thiserror::Error;

/// Errors that can occur while building a member tree.
#[derive(Debug, Error)]
pub enum Error {
    /// The record stream itself could not be decoded.
    #[error(transparent)]
    Decode(#[from] memlay_record::Error),

    /// A record opens more than one nesting level at once.
    #[error("record {index}: depth {depth} skips a level (expected at most {})", .expected + 1)]
    DepthJump {
        index: usize,
        depth: usize,
        expected: usize,
    },

    /// A record closes more levels than are open.
    #[error("record {index}: depth {depth} is above the outermost level {base}")]
    DepthUnderflow {
        index: usize,
        depth: usize,
        base: usize,
    },
}

impl Error {
    /// Whether the error comes from inconsistent nesting rather than
    /// unreadable input.
    pub fn is_depth_violation(&self) -> bool {
        matches!(self, Self::DepthJump { .. } | Self::DepthUnderflow { .. })
    }
}

/// Result type for tree operations.
pub type Result<T> = std::result::Result<T, Error>;

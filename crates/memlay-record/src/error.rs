//! Error types for record decoding and encoding.

use thiserror::Error;

/// Errors that can occur when reading or writing layout records.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream ended in the middle of a record.
    #[error("truncated record {index}: got {read} of {expected} bytes")]
    TruncatedRecord {
        index: usize,
        read: usize,
        expected: usize,
    },

    /// A string does not fit its fixed-width buffer.
    #[error("{field} is {len} bytes long, at most {max} fit in a record")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    /// A string contains a NUL byte, which would end it early on decode.
    #[error("{field} contains a NUL byte at position {position}")]
    InteriorNul {
        field: &'static str,
        position: usize,
    },

    /// More array dimensions than the record has slots for.
    #[error("{count} array dimensions given, at most {max} fit in a record")]
    TooManyDimensions { count: usize, max: usize },
}

/// Result type for record operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for plotcraft operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in plotcraft operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a pixmap or surface.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// A plottable or item refers to a key or value axis that no longer exists.
    #[error("Invalid axis: {0}")]
    InvalidAxis(&'static str),

    /// A container was handed back to the object that already owns it.
    #[error("Data container is already owned by this {0}")]
    SelfAssignment(&'static str),

    /// Pixel buffer does not match the declared dimensions.
    #[error("Pixel buffer length mismatch: expected {expected} bytes, got {actual}")]
    BufferLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidDimensions {
            width: 0,
            height: 100,
        };
        assert!(err.to_string().contains("Invalid dimensions"));
    }

    #[test]
    fn test_invalid_axis_names_role() {
        let err = Error::InvalidAxis("key axis");
        assert_eq!(err.to_string(), "Invalid axis: key axis");
    }

    #[test]
    fn test_buffer_length() {
        let err = Error::BufferLength {
            expected: 16,
            actual: 12,
        };
        assert!(err.to_string().contains("16"));
        assert!(err.to_string().contains("12"));
    }
}

//! Error types for OxiPix operations.
//!
//! This module provides the error type shared by every stage of the codec
//! pipeline, from bit-level I/O up to the pipeline driver. Each variant
//! carries enough context to diagnose where a stream went wrong, and maps
//! to a stable numeric exit code for the CLI.

use std::io;
use thiserror::Error;

/// The main error type for OxiPix operations.
#[derive(Debug, Error)]
pub enum OxiPixError {
    /// I/O error from the underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Backing storage could not be grown.
    #[error("Out of memory: failed to reserve {requested} bytes")]
    OutOfMemory {
        /// Number of bytes the failed reservation asked for.
        requested: usize,
    },

    /// A read or write touched a position past the end of a buffer.
    #[error("Index out of bounds: position {index} in a buffer of length {len}")]
    IndexOutOfBound {
        /// The offending position (bits or bytes, depending on the buffer).
        index: usize,
        /// Length of the buffer that was accessed.
        len: usize,
    },

    /// Input file does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that could not be opened.
        path: String,
    },

    /// Invalid command-line or API argument.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument.
        message: String,
    },

    /// Image dimensions outside the supported range.
    #[error("Invalid image size: {width}x{height}")]
    InvalidImageSize {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },

    /// Block size unusable for tiling.
    #[error("Invalid block size: {size}")]
    InvalidBlockSize {
        /// The rejected block size.
        size: u32,
    },

    /// Violated internal invariant.
    #[error("Internal error: {message}")]
    InternalError {
        /// Description of the violated invariant.
        message: String,
    },
}

/// Result type alias for OxiPix operations.
pub type Result<T> = std::result::Result<T, OxiPixError>;

impl OxiPixError {
    /// Create an out-of-memory error.
    pub fn out_of_memory(requested: usize) -> Self {
        Self::OutOfMemory { requested }
    }

    /// Create an index-out-of-bounds error.
    pub fn index_out_of_bound(index: usize, len: usize) -> Self {
        Self::IndexOutOfBound { index, len }
    }

    /// Create a file-not-found error.
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create an invalid-argument error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an invalid-image-size error.
    pub fn invalid_image_size(width: u32, height: u32) -> Self {
        Self::InvalidImageSize { width, height }
    }

    /// Create an invalid-block-size error.
    pub fn invalid_block_size(size: u32) -> Self {
        Self::InvalidBlockSize { size }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError {
            message: message.into(),
        }
    }

    /// Stable numeric code for this error kind, used as the process exit
    /// code by the CLI. Success is 0; the kinds count up from there.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::OutOfMemory { .. } => 1,
            Self::IndexOutOfBound { .. } => 2,
            Self::FileNotFound { .. } => 3,
            Self::InvalidArgument { .. } => 4,
            Self::InvalidImageSize { .. } => 5,
            Self::InvalidBlockSize { .. } => 6,
            Self::InternalError { .. } | Self::Io(_) => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OxiPixError::index_out_of_bound(80, 64);
        assert!(err.to_string().contains("position 80"));

        let err = OxiPixError::invalid_image_size(0, 128);
        assert!(err.to_string().contains("0x128"));

        let err = OxiPixError::invalid_block_size(0);
        assert!(err.to_string().contains("block size"));
    }

    #[test]
    fn test_exit_codes_are_stable() {
        assert_eq!(OxiPixError::out_of_memory(1).exit_code(), 1);
        assert_eq!(OxiPixError::index_out_of_bound(0, 0).exit_code(), 2);
        assert_eq!(OxiPixError::file_not_found("x").exit_code(), 3);
        assert_eq!(OxiPixError::invalid_argument("x").exit_code(), 4);
        assert_eq!(OxiPixError::invalid_image_size(0, 0).exit_code(), 5);
        assert_eq!(OxiPixError::invalid_block_size(0).exit_code(), 6);
        assert_eq!(OxiPixError::internal("x").exit_code(), 7);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: OxiPixError = io_err.into();
        assert!(matches!(err, OxiPixError::Io(_)));
        assert_eq!(err.exit_code(), 7);
    }
}

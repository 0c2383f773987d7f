//! # OxiPix Core
//!
//! Core components for the OxiPix grayscale raster codec.
//!
//! This crate provides the building blocks the codec layers share:
//!
//! - [`bitbuf`]: a growable bit buffer with independent write and read
//!   cursors, bit-level concatenation, and back-patching
//! - [`error`]: error types
//!
//! ## Architecture
//!
//! OxiPix is designed as a layered pipeline:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L4: CLI                                                 │
//! │     oxipix binary, raw-file framing, exit codes         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L3: Pipeline driver                                     │
//! │     container format, adaptive tile selection           │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codecs                                              │
//! │     RLE, canonical Huffman, scans + delta model         │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitBuf (this crate)                                 │
//! │     bit-level append/read, back-patching, errors        │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipix_core::bitbuf::BitBuf;
//!
//! let mut buf = BitBuf::new();
//! buf.push_bits(0x2A, 8).unwrap();
//! assert_eq!(buf.read_bits(8).unwrap(), 0x2A);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitbuf;
pub mod error;

// Re-exports for convenience
pub use bitbuf::BitBuf;
pub use error::{OxiPixError, Result};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bitbuf::BitBuf;
    pub use crate::error::{OxiPixError, Result};
}

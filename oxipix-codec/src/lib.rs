//! # OxiPix Codec
//!
//! The pipeline driver of the OxiPix grayscale raster codec.
//!
//! Compression builds a container bit stream — a 32-bit dimension header,
//! then either one run-length stream for the whole image or, in adaptive
//! mode, packed 2-bit per-tile scan tags followed by the tile payloads —
//! and entropy-codes the container with canonical Huffman. Decompression
//! inverts each stage in exact reverse.
//!
//! The mode flags are *not* stored in the stream; compress and decompress
//! must be called with the same [`CodecOptions`].
//!
//! ## Example
//!
//! ```rust
//! use oxipix_codec::{CodecOptions, compress, decompress};
//! use oxipix_raster::Image;
//!
//! let image = Image::from_parts(vec![7; 64 * 32], 64, 32).unwrap();
//! let options = CodecOptions::new().adaptive(true);
//!
//! let packed = compress(&image, &options).unwrap();
//! let unpacked = decompress(&packed, &options).unwrap();
//!
//! assert_eq!(unpacked, image);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod compress;
mod decompress;
mod options;

pub use compress::compress;
pub use decompress::decompress;
pub use options::{CodecOptions, DEFAULT_BLOCK_SIZE};

//! # OxiPix Raster
//!
//! The image-side building blocks of the OxiPix codec:
//!
//! - [`image`]: the row-major grayscale pixel grid and its block tiling
//! - [`scan`]: per-tile scan orders (row, column, spiral) and inverses
//! - [`delta`]: the byte-wise differential model
//!
//! ## Example
//!
//! ```rust
//! use oxipix_raster::{Image, ScanMode, scan};
//!
//! let image = Image::from_parts(vec![1, 2, 3, 8, 9, 4, 7, 6, 5], 3, 3).unwrap();
//! let spiral = scan::serialize(&image, ScanMode::Spiral);
//! assert_eq!(spiral, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod delta;
pub mod image;
pub mod scan;

// Re-exports
pub use delta::{delta, undelta};
pub use image::{Image, MAX_DIM};
pub use scan::{ScanMode, deserialize, serialize};

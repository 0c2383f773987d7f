//! Tile scan orders.
//!
//! A scan order is a bijection between a tile's pixel grid and a 1-D byte
//! sequence. Smooth image features line up differently under each order,
//! so the pipeline tries all of them per tile and keeps whichever feeds
//! the run-length stage best.

use crate::image::Image;
use oxipix_core::{OxiPixError, Result};

/// How a tile's pixels are serialized, or `None` for a verbatim tile.
///
/// The discriminants are the 2-bit wire tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ScanMode {
    /// Tile bytes stored literally, without run-length encoding.
    None = 0,
    /// Column-major order, top-to-bottom then left-to-right.
    Column = 1,
    /// Row-major order (the identity).
    Row = 2,
    /// Clockwise inward spiral from the top-left corner.
    Spiral = 3,
}

impl ScanMode {
    /// The 2-bit wire tag.
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Decode a 2-bit wire tag; only the low two bits are examined.
    pub fn from_tag(tag: u8) -> Self {
        match tag & 0b11 {
            1 => Self::Column,
            2 => Self::Row,
            3 => Self::Spiral,
            _ => Self::None,
        }
    }
}

/// Serialize a tile's pixels in the given scan order.
///
/// `Row` and `None` are the identity on the row-major backing bytes.
pub fn serialize(image: &Image, mode: ScanMode) -> Vec<u8> {
    let src = image.as_bytes();
    let width = image.width() as usize;
    let height = image.height() as usize;

    match mode {
        ScanMode::None | ScanMode::Row => src.to_vec(),
        ScanMode::Column => {
            let mut out = Vec::with_capacity(src.len());
            for i in 0..src.len() {
                out.push(src[(i % height) * width + i / height]);
            }
            out
        }
        ScanMode::Spiral => {
            let mut out = Vec::with_capacity(src.len());
            for_each_spiral(width, height, |pixel| out.push(src[pixel]));
            out
        }
    }
}

/// Invert [`serialize`]: rebuild the pixel grid from a scanned sequence.
/// `bytes` must hold exactly `width * height` entries.
pub fn deserialize(bytes: &[u8], width: u32, height: u32, mode: ScanMode) -> Result<Image> {
    if width == 0 || height == 0 {
        return Err(OxiPixError::invalid_image_size(width, height));
    }
    let w = width as usize;
    let h = height as usize;
    if bytes.len() != w * h {
        return Err(OxiPixError::internal(format!(
            "scanned sequence of {} bytes does not match {}x{}",
            bytes.len(),
            width,
            height
        )));
    }

    let data = match mode {
        ScanMode::None | ScanMode::Row => bytes.to_vec(),
        ScanMode::Column => {
            let mut out = vec![0u8; bytes.len()];
            for (i, slot) in out.iter_mut().enumerate() {
                *slot = bytes[(i % w) * h + i / w];
            }
            out
        }
        ScanMode::Spiral => {
            let mut out = vec![0u8; bytes.len()];
            let mut next = 0;
            for_each_spiral(w, h, |pixel| {
                out[pixel] = bytes[next];
                next += 1;
            });
            out
        }
    };

    Image::from_parts(data, width, height)
}

/// Visit every pixel index of a `width x height` grid in clockwise
/// spiral order, starting at the top-left corner and contracting one
/// ring at a time.
fn for_each_spiral(width: usize, height: usize, mut visit: impl FnMut(usize)) {
    let (mut top, mut left) = (0, 0);
    let (mut bottom, mut right) = (height - 1, width - 1);

    loop {
        for x in left..=right {
            visit(top * width + x);
        }
        for y in top + 1..=bottom {
            visit(y * width + right);
        }
        if bottom > top {
            for x in (left..right).rev() {
                visit(bottom * width + x);
            }
        }
        if right > left {
            for y in (top + 1..bottom).rev() {
                visit(y * width + left);
            }
        }

        if bottom < top + 2 || right < left + 2 {
            return;
        }
        top += 1;
        left += 1;
        bottom -= 1;
        right -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random image (linear congruential generator).
    fn random_image(width: u32, height: u32, mut seed: u64) -> Image {
        let size = width as usize * height as usize;
        let mut data = Vec::with_capacity(size);
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        Image::from_parts(data, width, height).unwrap()
    }

    #[test]
    fn test_tags_roundtrip() {
        for mode in [ScanMode::None, ScanMode::Column, ScanMode::Row, ScanMode::Spiral] {
            assert_eq!(ScanMode::from_tag(mode.tag()), mode);
        }
        assert_eq!(ScanMode::None.tag(), 0);
    }

    #[test]
    fn test_row_is_identity() {
        let image = random_image(5, 3, 7);
        assert_eq!(serialize(&image, ScanMode::Row), image.as_bytes());
    }

    #[test]
    fn test_column_scan_order() {
        // 3x2 grid:
        //   1 2 3
        //   4 5 6
        let image = Image::from_parts(vec![1, 2, 3, 4, 5, 6], 3, 2).unwrap();
        assert_eq!(serialize(&image, ScanMode::Column), vec![1, 4, 2, 5, 3, 6]);
    }

    #[test]
    fn test_spiral_scan_3x3() {
        // The ring layout reads off in order:
        //   1 2 3
        //   8 9 4
        //   7 6 5
        let image = Image::from_parts(vec![1, 2, 3, 8, 9, 4, 7, 6, 5], 3, 3).unwrap();
        let scanned = serialize(&image, ScanMode::Spiral);
        assert_eq!(scanned, vec![1, 2, 3, 4, 5, 6, 7, 8, 9]);

        let rebuilt = deserialize(&scanned, 3, 3, ScanMode::Spiral).unwrap();
        assert_eq!(rebuilt, image);
    }

    #[test]
    fn test_spiral_scan_4x3() {
        // 4x3 grid spirals through the boundary then the inner pair.
        let image = Image::from_parts(
            vec![
                1, 2, 3, 4, //
                10, 11, 12, 5, //
                9, 8, 7, 6,
            ],
            4,
            3,
        )
        .unwrap();
        let scanned = serialize(&image, ScanMode::Spiral);
        assert_eq!(scanned, (1..=12).collect::<Vec<u8>>());
    }

    #[test]
    fn test_degenerate_shapes_scan_completely() {
        for (w, h) in [(1, 1), (1, 6), (6, 1), (2, 5), (5, 2)] {
            let image = random_image(w, h, u64::from(w * 31 + h));
            for mode in [ScanMode::Column, ScanMode::Spiral] {
                let scanned = serialize(&image, mode);
                assert_eq!(scanned.len(), image.size());
                let rebuilt = deserialize(&scanned, w, h, mode).unwrap();
                assert_eq!(rebuilt, image, "{mode:?} on {w}x{h}");
            }
        }
    }

    #[test]
    fn test_scans_invert_on_random_image() {
        let image = random_image(1920, 1280, 0xFEEDFACE);
        for mode in [ScanMode::Column, ScanMode::Spiral] {
            let scanned = serialize(&image, mode);
            // A non-trivial scan of a random image reorders it.
            assert_ne!(scanned, image.as_bytes(), "{mode:?}");
            let rebuilt = deserialize(&scanned, 1920, 1280, mode).unwrap();
            assert_eq!(rebuilt, image, "{mode:?}");
        }
    }
}

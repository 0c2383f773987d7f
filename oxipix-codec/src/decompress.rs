//! Decompression side of the pipeline.

use crate::options::CodecOptions;
use oxipix_core::{BitBuf, OxiPixError, Result};
use oxipix_raster::{Image, ScanMode, scan, undelta};

/// Decompress a stream produced by [`crate::compress`] with the same
/// options.
pub fn decompress(bytes: &[u8], options: &CodecOptions) -> Result<Image> {
    let container = oxipix_huffman::decompress(bytes)?;
    if container.len() < 4 {
        return Err(OxiPixError::index_out_of_bound(4, container.len()));
    }

    let width = u32::from(u16::from_le_bytes([container[0], container[1]])) + 1;
    let height = u32::from(u16::from_le_bytes([container[2], container[3]])) + 1;

    // The 32-bit dimension header leaves the payload byte-aligned.
    let mut data = &container[4..];

    if options.adaptive {
        let mut image = Image::new(width, height)?;
        let tiles = image.tile_count(options.block_size)?;

        let metadata_len = (2 * tiles).div_ceil(8);
        if data.len() < metadata_len {
            return Err(OxiPixError::index_out_of_bound(metadata_len, data.len()));
        }
        let mut metadata = BitBuf::from_bytes(&data[..metadata_len]);
        data = &data[metadata_len..];

        for index in 0..tiles {
            let mode = ScanMode::from_tag(metadata.read_bits(2)? as u8);
            let (tile_width, tile_height) = image.tile_dims(index, options.block_size)?;
            let tile_size = tile_width as usize * tile_height as usize;

            let tile = match mode {
                ScanMode::None => {
                    if data.len() < tile_size {
                        return Err(OxiPixError::index_out_of_bound(tile_size, data.len()));
                    }
                    let tile = Image::from_parts(data[..tile_size].to_vec(), tile_width, tile_height)?;
                    data = &data[tile_size..];
                    tile
                }
                _ => {
                    let mut bytes = vec![0u8; tile_size];
                    let consumed = oxipix_rle::decode(data, &mut bytes)?;
                    data = &data[consumed..];

                    if options.delta {
                        undelta(&mut bytes);
                    }
                    scan::deserialize(&bytes, tile_width, tile_height, mode)?
                }
            };
            image.insert_tile(&tile, index, options.block_size)?;
        }

        Ok(image)
    } else {
        let size = width as usize * height as usize;
        let mut bytes = vec![0u8; size];
        oxipix_rle::decode(data, &mut bytes)?;

        if options.delta {
            undelta(&mut bytes);
        }
        Image::from_parts(bytes, width, height)
    }
}

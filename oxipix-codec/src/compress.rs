//! Compression side of the pipeline.

use crate::options::CodecOptions;
use oxipix_core::{BitBuf, Result};
use oxipix_raster::{Image, ScanMode, delta, scan};

/// Compress an image into the self-describing output stream.
///
/// The container starts with `width - 1` and `height - 1` as 16-bit
/// fields, followed in adaptive mode by the packed per-tile scan tags and
/// the concatenated tile payloads, or otherwise by one run-length stream
/// covering the whole image. The assembled container is then passed
/// through the Huffman coder, whose output is the final byte stream.
pub fn compress(image: &Image, options: &CodecOptions) -> Result<Vec<u8>> {
    let mut container = BitBuf::new();
    container.push_bits(u64::from(image.width() - 1), 16)?;
    container.push_bits(u64::from(image.height() - 1), 16)?;

    if options.adaptive {
        let mut metadata = BitBuf::new();
        let mut blocks = BitBuf::new();

        for index in 0..image.tile_count(options.block_size)? {
            let tile = image.tile(index, options.block_size)?;
            let (mode, payload) = pick_candidate(&tile, options.delta)?;
            metadata.push_bits(u64::from(mode.tag()), 2)?;
            blocks.concat(&payload)?;
        }

        metadata.pad_to_byte()?;
        container.concat(&metadata)?;
        container.concat(&blocks)?;
    } else {
        let mut bytes = image.as_bytes().to_vec();
        if options.delta {
            delta(&mut bytes);
        }
        container.concat(&oxipix_rle::encode(&bytes)?)?;
    }

    Ok(oxipix_huffman::compress(container.as_bytes())?.into_bytes())
}

/// Run one scan order through the delta model and run-length stage.
fn scan_candidate(tile: &Image, mode: ScanMode, use_delta: bool) -> Result<BitBuf> {
    let mut bytes = scan::serialize(tile, mode);
    if use_delta {
        delta(&mut bytes);
    }
    oxipix_rle::encode(&bytes)
}

/// Choose the cheapest encoding for one tile.
///
/// A scan wins only when its encoded *bit* length is strictly below the
/// tile's *byte* count; the skewed units are part of the stream format
/// and must not be normalized. Ties fall to the earlier candidate, so the
/// preference order is Row, Column, Spiral, then verbatim. A verbatim
/// tile stores the pristine pixels, untouched by scan or delta.
fn pick_candidate(tile: &Image, use_delta: bool) -> Result<(ScanMode, BitBuf)> {
    let row = scan_candidate(tile, ScanMode::Row, use_delta)?;
    let column = scan_candidate(tile, ScanMode::Column, use_delta)?;
    let spiral = scan_candidate(tile, ScanMode::Spiral, use_delta)?;

    let mut mode = ScanMode::None;
    let mut best = tile.size();

    if row.bit_len() < best {
        best = row.bit_len();
        mode = ScanMode::Row;
    }
    if column.bit_len() < best {
        best = column.bit_len();
        mode = ScanMode::Column;
    }
    if spiral.bit_len() < best {
        mode = ScanMode::Spiral;
    }

    let payload = match mode {
        ScanMode::None => BitBuf::from_bytes(tile.as_bytes()),
        ScanMode::Row => row,
        ScanMode::Column => column,
        ScanMode::Spiral => spiral,
    };
    Ok((mode, payload))
}

//! Container-level layout checks: what the byte stream looks like after
//! the entropy pass is peeled off.

use oxipix_codec::{CodecOptions, compress};
use oxipix_raster::Image;

/// Strip the Huffman layer and return the raw container bytes.
fn container_of(image: &Image, options: &CodecOptions) -> Vec<u8> {
    let packed = compress(image, options).unwrap();
    oxipix_huffman::decompress(&packed).unwrap()
}

#[test]
fn test_dimension_header_is_biased_little_endian() {
    let image = Image::from_parts(vec![0; 1920 * 2], 1920, 2).unwrap();
    let container = container_of(&image, &CodecOptions::new());

    // width - 1 = 1919 = 0x077F, height - 1 = 1 = 0x0001.
    assert_eq!(&container[..4], &[0x7F, 0x07, 0x01, 0x00]);
}

#[test]
fn test_distinct_tile_is_stored_verbatim() {
    // A 16x16 tile of 256 distinct bytes has no runs anywhere; every
    // scan's RLE grows it, so the tile tag is 00 and the pixels follow
    // the metadata byte untouched.
    let data: Vec<u8> = (0..=255u8).collect();
    let image = Image::from_parts(data.clone(), 16, 16).unwrap();
    let container = container_of(&image, &CodecOptions::new().adaptive(true));

    assert_eq!(&container[..4], &[0x0F, 0x00, 0x0F, 0x00]);
    // One tile: a single metadata byte, tag 00 in its low bits.
    assert_eq!(container[4], 0x00);
    assert_eq!(&container[5..], &data[..]);
}

#[test]
fn test_constant_tile_selects_row_scan() {
    // A constant tile run-length encodes to three bytes; the tie between
    // the scans falls to the row order (tag 2).
    let image = Image::from_parts(vec![0x42; 256], 16, 16).unwrap();
    let container = container_of(&image, &CodecOptions::new().adaptive(true));

    assert_eq!(&container[..4], &[0x0F, 0x00, 0x0F, 0x00]);
    assert_eq!(container[4], 0x02);
    // Flag byte marking one run, count 254, value 0x42.
    assert_eq!(&container[5..], &[0x01, 0xFE, 0x42]);
    assert!(container.len() - 5 < 16);
}

#[test]
fn test_metadata_padding_covers_all_tiles() {
    // 5 tiles need 10 tag bits, padded to 2 metadata bytes.
    let image = Image::from_parts(vec![0x11; 80 * 16], 80, 16).unwrap();
    let options = CodecOptions::new().adaptive(true);
    let container = container_of(&image, &options);

    // Every tile is constant, so each tag is Row (2): bit pattern
    // 10 10 10 10 10 packed LSB-first, then zero padding.
    assert_eq!(container[4], 0b10101010);
    assert_eq!(container[5], 0b00000010);
    // Five three-byte tile payloads follow.
    assert_eq!(container.len(), 6 + 5 * 3);
}

#[test]
fn test_non_adaptive_payload_follows_header() {
    let image = Image::from_parts(vec![0x00; 1000], 100, 10).unwrap();
    let container = container_of(&image, &CodecOptions::new());

    // 1000 zeros: maximal runs of 257 + 257 + 257 + 229 under one flag.
    assert_eq!(
        &container[4..],
        &[0x0F, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xE3, 0x00]
    );
}

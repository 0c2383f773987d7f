//! # OxiPix RLE
//!
//! Run-length codec with packed per-group run flags.
//!
//! The encoder emits payload units in groups of eight. Each group starts
//! with one 8-bit **flag byte**; bit `k` (LSB-first) tells the decoder
//! whether unit `k` is a run or a literal:
//!
//! - a **literal** unit is a single value byte, emitted once
//! - a **run** unit is a count byte followed by a value byte; the value
//!   repeats `count + 2` times, so a run covers 2 to 257 bytes and longer
//!   stretches split into consecutive maximal runs
//!
//! The flag byte is reserved as eight zero bits when the group opens and
//! back-patched through [`BitBuf::set_bit_one`] as run units are emitted,
//! so the encoder never buffers a whole group.
//!
//! ## Example
//!
//! ```rust
//! use oxipix_rle::{decode, encode};
//!
//! let data = [7u8, 7, 7, 7, 9];
//! let encoded = encode(&data).unwrap();
//!
//! let mut output = [0u8; 5];
//! let consumed = decode(encoded.as_bytes(), &mut output).unwrap();
//! assert_eq!(consumed, encoded.byte_len());
//! assert_eq!(output, data);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

use oxipix_core::{BitBuf, OxiPixError, Result};

/// Longest stretch of identical bytes a single run unit can carry.
const MAX_RUN: usize = 257;

/// Number of payload units covered by one flag byte.
const GROUP: usize = 8;

/// Run-length encode `bytes` into a bit buffer.
///
/// The output is always a whole number of bytes. Empty input yields an
/// empty buffer.
pub fn encode(bytes: &[u8]) -> Result<BitBuf> {
    let mut out = BitBuf::new();

    // `unit` counts payload units in the open group; starting it full
    // forces a flag byte before the first unit.
    let mut unit = GROUP;
    let mut flag_pos = 0;
    let mut i = 0;

    while i < bytes.len() {
        let value = bytes[i];
        let mut run = 1;
        while run < MAX_RUN && i + run < bytes.len() && bytes[i + run] == value {
            run += 1;
        }

        if unit == GROUP {
            flag_pos = out.bit_len();
            out.push_bits(0, 8)?;
            unit = 0;
        }

        if run >= 2 {
            out.set_bit_one(flag_pos + unit)?;
            out.push_bits((run - 2) as u64, 8)?;
        }
        out.push_bits(u64::from(value), 8)?;

        unit += 1;
        i += run;
    }

    Ok(out)
}

/// Decode an RLE stream from `input` until `output` is filled.
///
/// Returns the number of input bytes consumed, so a caller holding
/// several concatenated streams can advance its cursor to the start of
/// the next one. Fails with `IndexOutOfBound` when the input ends while a
/// flag, count, or value byte is still required, or when a run would
/// overrun `output` (a corrupt or mismatched stream).
pub fn decode(input: &[u8], output: &mut [u8]) -> Result<usize> {
    if output.is_empty() {
        return Ok(0);
    }

    let mut i = 0;
    let mut written = 0;

    loop {
        if i >= input.len() {
            return Err(OxiPixError::index_out_of_bound(i, input.len()));
        }
        let mut flags = input[i];
        i += 1;

        for _ in 0..GROUP {
            if i >= input.len() {
                return Err(OxiPixError::index_out_of_bound(i, input.len()));
            }

            let repeat = if flags & 1 != 0 {
                let count = usize::from(input[i]);
                i += 1;
                if i >= input.len() {
                    return Err(OxiPixError::index_out_of_bound(i, input.len()));
                }
                count + 2
            } else {
                1
            };

            let value = input[i];
            i += 1;

            if repeat > output.len() - written {
                return Err(OxiPixError::index_out_of_bound(written + repeat, output.len()));
            }
            output[written..written + repeat].fill(value);
            written += repeat;

            if written == output.len() {
                return Ok(i);
            }

            flags >>= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random bytes (linear congruential generator).
    fn random_bytes(len: usize, mut seed: u64) -> Vec<u8> {
        let mut data = Vec::with_capacity(len);
        for _ in 0..len {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    fn roundtrip(data: &[u8]) -> Vec<u8> {
        let encoded = encode(data).unwrap();
        let mut output = vec![0u8; data.len()];
        let consumed = decode(encoded.as_bytes(), &mut output).unwrap();
        assert_eq!(consumed, encoded.byte_len());
        output
    }

    #[test]
    fn test_empty_input() {
        let encoded = encode(&[]).unwrap();
        assert_eq!(encoded.bit_len(), 0);
    }

    #[test]
    fn test_single_literal() {
        let encoded = encode(&[0x42]).unwrap();
        // One flag byte (no runs) and one value byte.
        assert_eq!(encoded.as_bytes(), &[0x00, 0x42]);
        assert_eq!(roundtrip(&[0x42]), &[0x42]);
    }

    #[test]
    fn test_short_run() {
        let data = [7u8, 7, 7, 7, 9];
        let encoded = encode(&data).unwrap();
        // Flag marks unit 0 as a run: count 4 - 2 = 2, then value 7,
        // then the literal 9.
        assert_eq!(encoded.as_bytes(), &[0x01, 0x02, 0x07, 0x09]);
        assert_eq!(roundtrip(&data), data);
    }

    #[test]
    fn test_two_byte_run_still_packs() {
        let data = [5u8, 5];
        let encoded = encode(&data).unwrap();
        assert_eq!(encoded.as_bytes(), &[0x01, 0x00, 0x05]);
        assert_eq!(roundtrip(&data), data);
    }

    #[test]
    fn test_thousand_zeros_layout() {
        // 1000 zeros split into maximal 257-byte runs: 257 + 257 + 257
        // + 229, all four units under one flag byte.
        let data = vec![0u8; 1000];
        let encoded = encode(&data).unwrap();
        assert_eq!(
            encoded.as_bytes(),
            &[0x0F, 0xFF, 0x00, 0xFF, 0x00, 0xFF, 0x00, 0xE3, 0x00]
        );
        assert_eq!(roundtrip(&data), data);
    }

    #[test]
    fn test_run_of_258_splits() {
        // 257 fit in one run; the leftover byte becomes a literal.
        let data = vec![0xABu8; 258];
        let encoded = encode(&data).unwrap();
        assert_eq!(encoded.as_bytes(), &[0x01, 0xFF, 0xAB, 0xAB]);
        assert_eq!(roundtrip(&data), data);
    }

    #[test]
    fn test_second_group_gets_fresh_flag_byte() {
        // Nine literals: eight in the first group, one in the second.
        let data: Vec<u8> = (1..=9).collect();
        let encoded = encode(&data).unwrap();
        assert_eq!(
            encoded.as_bytes(),
            &[0x00, 1, 2, 3, 4, 5, 6, 7, 8, 0x00, 9]
        );
        assert_eq!(roundtrip(&data), data);
    }

    #[test]
    fn test_random_roundtrip() {
        let data = random_bytes(1920 * 1280, 0x123456789ABCDEF0);
        assert_eq!(roundtrip(&data), data);
    }

    #[test]
    fn test_alternating_roundtrip() {
        let data: Vec<u8> = (0..4096).map(|i| if i % 2 == 0 { 0x00 } else { 0xFF }).collect();
        assert_eq!(roundtrip(&data), data);
    }

    #[test]
    fn test_consumed_stops_at_stream_boundary() {
        // Two independent streams concatenated; decoding the first must
        // consume exactly its own bytes.
        let first = [1u8, 1, 1, 2];
        let second = [9u8, 9, 9, 9, 9];

        let mut bytes = encode(&first).unwrap().into_bytes();
        let first_len = bytes.len();
        bytes.extend_from_slice(encode(&second).unwrap().as_bytes());

        let mut out_first = [0u8; 4];
        let consumed = decode(&bytes, &mut out_first).unwrap();
        assert_eq!(consumed, first_len);
        assert_eq!(out_first, first);

        let mut out_second = [0u8; 5];
        decode(&bytes[consumed..], &mut out_second).unwrap();
        assert_eq!(out_second, second);
    }

    #[test]
    fn test_truncated_input_fails() {
        let encoded = encode(&[3u8, 3, 3, 3]).unwrap().into_bytes();
        let mut output = [0u8; 4];

        // Cut the stream after the count byte.
        let err = decode(&encoded[..2], &mut output).unwrap_err();
        assert!(matches!(err, OxiPixError::IndexOutOfBound { .. }));

        // Cut the stream after the flag byte.
        let err = decode(&encoded[..1], &mut output).unwrap_err();
        assert!(matches!(err, OxiPixError::IndexOutOfBound { .. }));
    }

    #[test]
    fn test_run_overrunning_output_fails() {
        // A 10-byte run decoded into a 4-byte window is a mismatched
        // stream, not a partial success.
        let encoded = encode(&[6u8; 10]).unwrap();
        let mut output = [0u8; 4];
        let err = decode(encoded.as_bytes(), &mut output).unwrap_err();
        assert!(matches!(err, OxiPixError::IndexOutOfBound { .. }));
    }
}

//! # OxiPix Huffman
//!
//! Canonical Huffman entropy codec over a 257-symbol alphabet: the 256
//! byte values plus a reserved end-of-stream marker, so the decoder needs
//! no out-of-band length.
//!
//! The encoder counts frequencies, derives optimal code lengths with a
//! length-only heap reduction, canonicalizes (sort by length then
//! character, consecutive code assignment), and emits the code table
//! followed by the MSB-first code stream terminated by the end-of-stream
//! code. Because the codes are canonical, the table serializes as code
//! lengths alone.
//!
//! ## Example
//!
//! ```rust
//! use oxipix_huffman::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = compress(original).unwrap();
//! let decompressed = decompress(compressed.as_bytes()).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod symbols;
pub mod tree;

pub use symbols::{Code, Symbol, Symbols};
pub use tree::DecodeTree;

use oxipix_core::{BitBuf, Result};

/// Alphabet size: 256 byte values plus the end-of-stream marker.
pub const ALPHABET_LEN: usize = 257;

/// The reserved end-of-stream symbol.
pub const EOS: u16 = 256;

/// Push `code` MSB-first, one bit at a time.
fn push_code(output: &mut BitBuf, code: Code) -> Result<()> {
    for i in (0..code.len).rev() {
        output.push_bit((code.code >> i) & 1 == 1)?;
    }
    Ok(())
}

/// Huffman-compress `bytes` into a self-describing bit stream.
///
/// The stream holds the serialized code table, one code per input byte,
/// and the terminating end-of-stream code.
pub fn compress(bytes: &[u8]) -> Result<BitBuf> {
    let mut symbols = Symbols::from_bytes(bytes);
    symbols.assign_lengths();
    symbols.canonicalize();
    let codebook = symbols.codebook();

    let mut output = BitBuf::new();
    symbols.encode_table(&mut output)?;

    for &byte in bytes {
        push_code(&mut output, codebook[usize::from(byte)])?;
    }
    push_code(&mut output, codebook[usize::from(EOS)])?;

    Ok(output)
}

/// Decompress a stream produced by [`compress`].
///
/// Reads the code table, rebuilds the canonical codes from their lengths,
/// and walks the prefix trie until the end-of-stream code. Fails with
/// `IndexOutOfBound` on truncated or corrupt streams.
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut input = BitBuf::from_bytes(bytes);

    let mut symbols = Symbols::decode_table(&mut input)?;
    symbols.canonicalize();
    let tree = DecodeTree::build(&symbols);

    let mut output = Vec::new();
    loop {
        let symbol = tree.read_next(&mut input)?;
        if symbol == EOS {
            return Ok(output);
        }
        output.push(symbol as u8);
    }
}

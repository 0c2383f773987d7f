//! Symbol model: frequency counting, code-length assignment, canonical
//! code construction, and the code-table wire format.

use crate::{ALPHABET_LEN, EOS};
use oxipix_core::{BitBuf, OxiPixError, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A canonical code: the low `len` bits of `code`, emitted MSB-first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Code {
    /// Code bits, MSB at position `len - 1`.
    pub code: u64,
    /// Code length in bits; 0 means "symbol absent".
    pub len: u8,
}

/// One alphabet entry: a byte value (or [`EOS`]) with its frequency and
/// assigned code.
#[derive(Debug, Clone, Copy)]
pub struct Symbol {
    /// Byte value 0..=255, or [`EOS`].
    pub character: u16,
    /// Occurrence count in the input stream.
    pub frequency: u64,
    /// Canonical code, filled in by length assignment + canonicalization.
    pub code: Code,
}

/// The symbols present in a stream, at most one per alphabet entry.
///
/// After [`Symbols::canonicalize`] the entries are sorted by
/// `(code length, character)` and hold their final canonical codes.
#[derive(Debug, Clone, Default)]
pub struct Symbols(Vec<Symbol>);

impl Symbols {
    /// Count the symbols of `bytes`. The end-of-stream marker is always
    /// present with frequency 1.
    ///
    /// An empty input would leave the table with the end-of-stream entry
    /// alone, which the wire format cannot express (the count field
    /// stores `symbols - 2`); a filler entry for byte 0 keeps the table
    /// encodable and costs one unused code.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut freq = [0u64; ALPHABET_LEN];
        freq[EOS as usize] = 1;

        for &byte in bytes {
            freq[usize::from(byte)] += 1;
        }

        if bytes.is_empty() {
            freq[0] = 1;
        }

        let symbols = freq
            .iter()
            .enumerate()
            .filter(|&(_, &frequency)| frequency > 0)
            .map(|(character, &frequency)| Symbol {
                character: character as u16,
                frequency,
                code: Code::default(),
            })
            .collect();

        Self(symbols)
    }

    /// Number of symbols present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table holds no symbols.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the symbols in their current order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.0.iter()
    }

    /// Assign optimal code lengths from the frequencies.
    ///
    /// Hirschberg-Sieminski: a min-heap of `(frequency, node id)` pairs
    /// is reduced by repeatedly merging the two lightest nodes, recording
    /// only parent links; a leaf's code length is its distance to the
    /// root. The code bits themselves are fixed later by
    /// [`Symbols::canonicalize`], so heap tie-breaking does not matter.
    pub fn assign_lengths(&mut self) {
        let n = self.0.len();
        if n == 0 {
            return;
        }

        // Leaves get ids n..2n-1; merged nodes take ids n-1 down to 1.
        let mut heap: BinaryHeap<Reverse<(u64, usize)>> = BinaryHeap::with_capacity(n);
        for (i, symbol) in self.0.iter().enumerate() {
            heap.push(Reverse((symbol.frequency, n + i)));
        }

        let mut parent = vec![0usize; 2 * n];
        let mut m = n;
        while m > 1 {
            let Some(Reverse((freq_a, a))) = heap.pop() else {
                break;
            };
            let Some(Reverse((freq_b, b))) = heap.pop() else {
                break;
            };

            m -= 1;
            parent[a] = m;
            parent[b] = m;
            heap.push(Reverse((freq_a + freq_b, m)));
        }

        for (i, symbol) in self.0.iter_mut().enumerate() {
            let mut node = parent[n + i];
            let mut len = 1u8;
            while node > 1 {
                node = parent[node];
                len += 1;
            }
            symbol.code.len = len;
        }
    }

    /// Sort by `(code length, character)` and assign canonical codes:
    /// the first symbol takes code 0, each successor takes
    /// `(previous + 1) << (len - previous_len)`.
    pub fn canonicalize(&mut self) {
        if self.0.is_empty() {
            return;
        }

        self.0.sort_by_key(|symbol| (symbol.code.len, symbol.character));

        self.0[0].code.code = 0;
        for i in 1..self.0.len() {
            let previous = self.0[i - 1].code;
            let diff = self.0[i].code.len - previous.len;
            self.0[i].code.code = (previous.code + 1) << diff;
        }
    }

    /// Build the character-indexed lookup table for encoding. Absent
    /// symbols keep length 0 and must not appear in the input.
    pub fn codebook(&self) -> [Code; ALPHABET_LEN] {
        let mut codebook = [Code::default(); ALPHABET_LEN];
        for symbol in &self.0 {
            codebook[usize::from(symbol.character)] = symbol.code;
        }
        codebook
    }

    /// Serialize the code table: an 8-bit `symbols - 2` count, then per
    /// non-EOS symbol in canonical order an 8-bit character and 8-bit
    /// `length - 1`, and finally the 8-bit `length - 1` of the
    /// end-of-stream code.
    pub fn encode_table(&self, output: &mut BitBuf) -> Result<()> {
        debug_assert!(self.0.len() >= 2, "table needs EOS plus one symbol");

        output.push_bits(self.0.len() as u64 - 2, 8)?;

        let mut eos_len = 0u8;
        for symbol in &self.0 {
            if symbol.character == EOS {
                eos_len = symbol.code.len;
                continue;
            }
            output.push_bits(u64::from(symbol.character), 8)?;
            output.push_bits(u64::from(symbol.code.len) - 1, 8)?;
        }

        output.push_bits(u64::from(eos_len) - 1, 8)?;
        Ok(())
    }

    /// Read back a table written by [`Symbols::encode_table`]. The
    /// returned symbols carry lengths only; the caller re-runs
    /// [`Symbols::canonicalize`] to recover the code bits.
    pub fn decode_table(input: &mut BitBuf) -> Result<Self> {
        let count = input.read_bits(8)? as usize + 1;

        let mut symbols = Vec::with_capacity(count + 1);
        for _ in 0..count {
            let character = input.read_bits(8)? as u16;
            let len = Self::read_length(input)?;
            symbols.push(Symbol {
                character,
                frequency: 0,
                code: Code { code: 0, len },
            });
        }

        let eos_len = Self::read_length(input)?;
        symbols.push(Symbol {
            character: EOS,
            frequency: 0,
            code: Code {
                code: 0,
                len: eos_len,
            },
        });

        Ok(Self(symbols))
    }

    /// Read one biased length field. The stored byte is `length - 1`; a
    /// stored 255 would claim a 256-bit code, which the alphabet cannot
    /// produce, so it marks a corrupt table.
    fn read_length(input: &mut BitBuf) -> Result<u8> {
        let stored = input.read_bits(8)?;
        if stored == 255 {
            return Err(OxiPixError::internal(
                "corrupt code table: length field out of range",
            ));
        }
        Ok(stored as u8 + 1)
    }
}

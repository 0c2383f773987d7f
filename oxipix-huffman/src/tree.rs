//! Prefix trie used by the decoder.

use crate::symbols::{Code, Symbols};
use oxipix_core::{BitBuf, OxiPixError, Result};

/// A binary trie over code prefixes.
///
/// Nodes live in an arena; leaves hold a 9-bit symbol value. A read bit
/// of 1 descends left and 0 descends right, following each code from its
/// most significant bit. Every code-book prefix has a matching path and
/// no internal node is a leaf.
#[derive(Debug)]
pub struct DecodeTree {
    nodes: Vec<Node>,
}

#[derive(Debug, Default)]
struct Node {
    value: Option<u16>,
    left: Option<u32>,
    right: Option<u32>,
}

impl DecodeTree {
    /// Build the trie from canonicalized symbols.
    pub fn build(symbols: &Symbols) -> Self {
        let mut tree = Self {
            nodes: vec![Node::default()],
        };
        for symbol in symbols.iter() {
            tree.insert(symbol.code, symbol.character);
        }
        tree
    }

    /// Walk `code` MSB-first, creating nodes on demand, and place `value`
    /// at the terminal node.
    fn insert(&mut self, code: Code, value: u16) {
        let mut node = 0usize;
        for i in (0..code.len).rev() {
            let bit = (code.code >> i) & 1 == 1;
            let next = if bit {
                self.nodes[node].left
            } else {
                self.nodes[node].right
            };

            let next = match next {
                Some(id) => id as usize,
                None => {
                    let id = self.nodes.len() as u32;
                    self.nodes.push(Node::default());
                    if bit {
                        self.nodes[node].left = Some(id);
                    } else {
                        self.nodes[node].right = Some(id);
                    }
                    id as usize
                }
            };
            node = next;
        }
        self.nodes[node].value = Some(value);
    }

    /// Decode the next symbol from `input`.
    ///
    /// Fails with `IndexOutOfBound` when the walked bits match no code
    /// prefix (a corrupt stream) or the input runs dry mid-code.
    pub fn read_next(&self, input: &mut BitBuf) -> Result<u16> {
        let mut node = 0usize;
        loop {
            if let Some(value) = self.nodes[node].value {
                return Ok(value);
            }

            let next = if input.read_bit()? {
                self.nodes[node].left
            } else {
                self.nodes[node].right
            };

            match next {
                Some(id) => node = id as usize,
                None => {
                    return Err(OxiPixError::index_out_of_bound(
                        input.read_pos(),
                        input.bit_len(),
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EOS;

    fn canonical_symbols(bytes: &[u8]) -> Symbols {
        let mut symbols = Symbols::from_bytes(bytes);
        symbols.assign_lengths();
        symbols.canonicalize();
        symbols
    }

    fn push_code(output: &mut BitBuf, code: Code) {
        for i in (0..code.len).rev() {
            output.push_bit((code.code >> i) & 1 == 1).unwrap();
        }
    }

    #[test]
    fn test_decodes_every_symbol_back() {
        let symbols = canonical_symbols(b"abracadabra");
        let tree = DecodeTree::build(&symbols);

        let mut stream = BitBuf::new();
        for symbol in symbols.iter() {
            push_code(&mut stream, symbol.code);
        }

        for symbol in symbols.iter() {
            assert_eq!(tree.read_next(&mut stream).unwrap(), symbol.character);
        }
    }

    #[test]
    fn test_eos_is_reachable() {
        let symbols = canonical_symbols(&[0u8; 16]);
        let tree = DecodeTree::build(&symbols);

        let eos = symbols.iter().find(|s| s.character == EOS).unwrap();
        let mut stream = BitBuf::new();
        push_code(&mut stream, eos.code);
        assert_eq!(tree.read_next(&mut stream).unwrap(), EOS);
    }

    #[test]
    fn test_exhausted_input_fails() {
        let symbols = canonical_symbols(b"abcd");
        let tree = DecodeTree::build(&symbols);

        let mut stream = BitBuf::new();
        assert!(matches!(
            tree.read_next(&mut stream),
            Err(OxiPixError::IndexOutOfBound { .. })
        ));
    }
}

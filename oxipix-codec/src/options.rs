//! Codec configuration.

/// Default edge length of the square tiles used in adaptive mode.
pub const DEFAULT_BLOCK_SIZE: u32 = 16;

/// Configuration for a compress or decompress run.
///
/// The options are not embedded in the compressed stream; the caller must
/// supply the same values on both sides. Decoding with mismatched options
/// yields an error or corrupt pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Split the image into tiles and pick the best scan per tile.
    pub adaptive: bool,
    /// Run the byte-wise delta model before run-length encoding.
    pub delta: bool,
    /// Tile edge length for adaptive mode; must be nonzero.
    pub block_size: u32,
}

impl CodecOptions {
    /// Options with everything off and the default block size.
    pub fn new() -> Self {
        Self {
            adaptive: false,
            delta: false,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }

    /// Enable or disable adaptive tiling.
    pub fn adaptive(mut self, adaptive: bool) -> Self {
        self.adaptive = adaptive;
        self
    }

    /// Enable or disable the delta model.
    pub fn delta(mut self, delta: bool) -> Self {
        self.delta = delta;
        self
    }

    /// Set the tile edge length.
    pub fn block_size(mut self, block_size: u32) -> Self {
        self.block_size = block_size;
        self
    }
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self::new()
    }
}

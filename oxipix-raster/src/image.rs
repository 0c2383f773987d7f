//! Grayscale image grid and block tiling.

use oxipix_core::{OxiPixError, Result};

/// Largest supported edge length; dimensions encode as `value - 1` in 16
/// bits on the wire.
pub const MAX_DIM: u32 = 65536;

/// A width x height grid of 8-bit pixels, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Image {
    /// Create a zero-filled image. Each dimension must be in
    /// `1..=65536`.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::validate_dims(width, height)?;

        let size = width as usize * height as usize;
        let mut data = Vec::new();
        data.try_reserve(size)
            .map_err(|_| OxiPixError::out_of_memory(size))?;
        data.resize(size, 0);

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Wrap an existing pixel buffer. `data` must hold exactly
    /// `width * height` bytes.
    pub fn from_parts(data: Vec<u8>, width: u32, height: u32) -> Result<Self> {
        Self::validate_dims(width, height)?;
        if data.len() != width as usize * height as usize {
            return Err(OxiPixError::internal(format!(
                "pixel buffer of {} bytes does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    fn validate_dims(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 || width > MAX_DIM || height > MAX_DIM {
            return Err(OxiPixError::invalid_image_size(width, height));
        }
        Ok(())
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total pixel count.
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major pixel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its pixel bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Number of tiles the image splits into for `block_size`:
    /// tiles run left-to-right, top-to-bottom, with clipped tiles at the
    /// right and bottom edges. Fails with `InvalidBlockSize` for
    /// `block_size == 0`.
    pub fn tile_count(&self, block_size: u32) -> Result<usize> {
        if block_size == 0 {
            return Err(OxiPixError::invalid_block_size(block_size));
        }
        let horizontal = self.width.div_ceil(block_size) as usize;
        let vertical = self.height.div_ceil(block_size) as usize;
        Ok(horizontal * vertical)
    }

    /// Pixel coordinates of tile `index`'s top-left corner.
    fn tile_origin(&self, index: usize, block_size: u32) -> (u32, u32) {
        let tiles_per_row = self.width.div_ceil(block_size) as usize;
        let x = (index % tiles_per_row) * block_size as usize;
        let y = (index / tiles_per_row) * block_size as usize;
        (x as u32, y as u32)
    }

    /// Clipped dimensions of tile `index`. Fails with `InvalidImageSize`
    /// when the index addresses a window of zero width or height.
    pub fn tile_dims(&self, index: usize, block_size: u32) -> Result<(u32, u32)> {
        if block_size == 0 {
            return Err(OxiPixError::invalid_block_size(block_size));
        }
        let (x, y) = self.tile_origin(index, block_size);
        if x >= self.width || y >= self.height {
            return Err(OxiPixError::invalid_image_size(
                self.width.saturating_sub(x),
                self.height.saturating_sub(y),
            ));
        }
        let width = block_size.min(self.width - x);
        let height = block_size.min(self.height - y);
        Ok((width, height))
    }

    /// Copy tile `index` out as an independent image.
    pub fn tile(&self, index: usize, block_size: u32) -> Result<Image> {
        let (width, height) = self.tile_dims(index, block_size)?;
        let (x, y) = self.tile_origin(index, block_size);

        let mut tile = Image::new(width, height)?;
        for row in 0..height as usize {
            let src = (y as usize + row) * self.width as usize + x as usize;
            let dst = row * width as usize;
            tile.data[dst..dst + width as usize]
                .copy_from_slice(&self.data[src..src + width as usize]);
        }
        Ok(tile)
    }

    /// Write `tile` back over the window that [`Image::tile`] read.
    pub fn insert_tile(&mut self, tile: &Image, index: usize, block_size: u32) -> Result<()> {
        let (width, height) = self.tile_dims(index, block_size)?;
        if tile.width != width || tile.height != height {
            return Err(OxiPixError::internal(format!(
                "tile {} expects a {}x{} window, got {}x{}",
                index, width, height, tile.width, tile.height
            )));
        }

        let (x, y) = self.tile_origin(index, block_size);
        for row in 0..height as usize {
            let dst = (y as usize + row) * self.width as usize + x as usize;
            let src = row * width as usize;
            self.data[dst..dst + width as usize]
                .copy_from_slice(&tile.data[src..src + width as usize]);
        }
        Ok(())
    }
}

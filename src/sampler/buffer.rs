//! Decoded RGB pixel buffer consumed by the sampler.

use crate::error::{Result, VoxelError};
use crate::voxel::Rgb;

/// An immutable RGB image, row-major, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGB bytes.
    ///
    /// Fails with [`VoxelError::InvalidImage`] if either dimension is zero or
    /// the byte count does not equal `width * height * 3`.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height * 3 {
            return Err(VoxelError::InvalidImage {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer where every pixel has the same color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Result<Self> {
        let data = [color.r, color.g, color.b].repeat(width * height);
        Self::new(width, height, data)
    }

    /// Build a buffer by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> Rgb) -> Result<Self> {
        let mut data = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                let c = f(x, y);
                data.extend_from_slice(&[c.r, c.g, c.b]);
            }
        }
        Self::new(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB bytes in row-major order.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Color at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if the coordinate is outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        let idx = (y * self.width + x) * 3;
        Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.data
            .chunks_exact(3)
            .map(|rgb| Rgb::new(rgb[0], rgb[1], rgb[2]))
    }
}

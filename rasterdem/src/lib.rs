//! Terrain-encoded raster tiles.
//!
//! A [`TileImage`] is the already-decoded (from PNG/WebP/...) pixel
//! buffer of one web-map tile whose channels encode elevation rather
//! than color. Sampling it through an [`Encoding`] yields meters.

mod encoding;
mod error;

pub use crate::{
    encoding::{Encoding, TerrainRgb, Terrarium},
    error::RasterError,
};
use geo::geometry::Coord;

/// Base floating point type used for pixel offsets.
pub type C = f64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileImage {
    /// Interleaved channel bytes, row major, north-west pixel first.
    pixels: Box<[u8]>,

    /// Bytes per pixel (3 for RGB, 4 for RGBA).
    channels: u8,

    /// Number of (columns, rows) in this tile.
    dimensions: (u32, u32),
}

impl TileImage {
    /// Returns a tile wrapping `pixels`.
    ///
    /// Fails if `channels` is not 3 or 4, or if `pixels` does not hold
    /// exactly `width * height` pixels.
    pub fn new(
        channels: u8,
        width: u32,
        height: u32,
        pixels: impl Into<Box<[u8]>>,
    ) -> Result<Self, RasterError> {
        if !matches!(channels, 3 | 4) {
            return Err(RasterError::Channels(channels));
        }
        let pixels = pixels.into();
        let expected = width as usize * height as usize * usize::from(channels);
        if pixels.len() != expected {
            return Err(RasterError::Len {
                len: pixels.len(),
                width,
                height,
                channels,
            });
        }
        Ok(Self {
            pixels,
            channels,
            dimensions: (width, height),
        })
    }

    /// Returns a `size`×`size` tile.
    pub fn square(
        channels: u8,
        size: u32,
        pixels: impl Into<Box<[u8]>>,
    ) -> Result<Self, RasterError> {
        Self::new(channels, size, size, pixels)
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    pub fn height(&self) -> u32 {
        self.dimensions.1
    }

    /// Returns the raw channel bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Fails unless this is a `size`×`size` tile.
    pub fn ensure_square(&self, size: u32) -> Result<(), RasterError> {
        let (width, height) = self.dimensions;
        if width == size && height == size {
            Ok(())
        } else {
            Err(RasterError::Dimensions {
                width,
                height,
                expected: size,
            })
        }
    }

    /// Returns the RGB channels of the pixel at (`col`, `row`).
    pub fn rgb(&self, col: u32, row: u32) -> Option<[u8; 3]> {
        let (width, height) = self.dimensions;
        if col < width && row < height {
            Some(self.rgb_unchecked(col, row))
        } else {
            None
        }
    }

    /// Returns the elevation, in meters, of the pixel containing the
    /// fractional tile-local `offset`.
    ///
    /// Sampling is nearest-neighbor: pixel `(i, j)` covers offsets
    /// `[i, i + 1) × [j, j + 1)`, so its center is the closest one.
    pub fn elevation(&self, offset: Coord<C>, encoding: &dyn Encoding) -> Result<C, RasterError> {
        let (width, height) = self.dimensions;
        let out_of_bounds = || RasterError::OutOfBounds {
            x: offset.x,
            y: offset.y,
            width,
            height,
        };
        // Also rejects NaN.
        if !(offset.x >= 0.0 && offset.y >= 0.0) {
            return Err(out_of_bounds());
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let (col, row) = (offset.x.floor() as u64, offset.y.floor() as u64);
        if col >= u64::from(width) || row >= u64::from(height) {
            return Err(out_of_bounds());
        }
        #[allow(clippy::cast_possible_truncation)]
        let rgb = self.rgb_unchecked(col as u32, row as u32);
        Ok(encoding.decode(rgb))
    }
}

/// Private API
impl TileImage {
    fn xy_to_linear_index(&self, (x, y): (u32, u32)) -> usize {
        (y as usize * self.dimensions.0 as usize + x as usize) * usize::from(self.channels)
    }

    fn rgb_unchecked(&self, col: u32, row: u32) -> [u8; 3] {
        let idx = self.xy_to_linear_index((col, row));
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}

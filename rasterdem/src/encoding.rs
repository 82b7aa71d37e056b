//! Pixel to elevation encodings.
//!
//! # References
//!
//! 1. [Mapbox Terrain-RGB](https://docs.mapbox.com/data/tilesets/reference/mapbox-terrain-rgb-v1/)
//! 1. [Terrarium](https://github.com/tilezen/joerd/blob/master/docs/formats.md#terrarium)

use byteorder::{BigEndian as BE, ByteOrder};

/// Maps the RGB channels of a single pixel to meters.
///
/// Alpha, when present, is never passed to an encoding.
pub trait Encoding: Send + Sync {
    fn decode(&self, rgb: [u8; 3]) -> f64;
}

/// Mapbox/MapTiler style terrain-RGB.
///
/// `elevation = base + (R * 256 * 256 + G * 256 + B) * interval`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainRgb {
    /// Elevation of the all-zero pixel, in meters.
    pub base: f64,

    /// Meters per encoded unit.
    pub interval: f64,
}

impl Default for TerrainRgb {
    fn default() -> Self {
        Self {
            base: -10_000.0,
            interval: 0.1,
        }
    }
}

impl Encoding for TerrainRgb {
    fn decode(&self, rgb: [u8; 3]) -> f64 {
        self.base + f64::from(BE::read_u24(&rgb)) * self.interval
    }
}

/// Tilezen terrarium.
///
/// `elevation = R * 256 + G + B / 256 - 32768`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Terrarium;

impl Encoding for Terrarium {
    fn decode(&self, [r, g, b]: [u8; 3]) -> f64 {
        f64::from(r) * 256.0 + f64::from(g) + f64::from(b) / 256.0 - 32_768.0
    }
}

//! Deterministic in-memory terrain for tests.

use crate::{mercator::locate, provider::TileProvider, tile::TileCoord};
use dashmap::DashMap;
use geo::geometry::Coord;
use rasterdem::TileImage;
use std::{future::Future, io, time::Duration};

pub fn tile_at(zoom: u8, x: u32, y: u32) -> TileCoord {
    TileCoord { zoom, x, y }
}

/// Elevation, in whole meters, of the global pixel (`col`, `row`).
pub fn terrain_elevation(col: u64, row: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let meters = (1_000 + (col * 3 + row * 5) % 2_000) as f64;
    meters
}

/// Elevation the synthetic terrain holds under `point`.
pub fn expected_elevation(point: Coord<f64>, zoom: u8, tile_size: u32) -> f64 {
    let (tile, offset) = locate(point, zoom, tile_size);
    let size = u64::from(tile_size);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (col, row) = (
        u64::from(tile.x) * size + offset.x.floor() as u64,
        u64::from(tile.y) * size + offset.y.floor() as u64,
    );
    terrain_elevation(col, row)
}

/// Serves Terrarium-encoded tiles of [`terrain_elevation`] and counts
/// provider calls per tile.
pub struct SyntheticTerrain {
    tile_size: u32,
    channels: u8,
    failing: Vec<TileCoord>,
    latency: Option<Duration>,
    fetches: DashMap<TileCoord, usize>,
}

impl SyntheticTerrain {
    pub fn new(tile_size: u32) -> Self {
        Self {
            tile_size,
            channels: 3,
            failing: Vec::new(),
            latency: None,
            fetches: DashMap::new(),
        }
    }

    /// Serve RGBA instead of RGB.
    pub fn rgba(mut self) -> Self {
        self.channels = 4;
        self
    }

    /// Make `tile` fail with an I/O error.
    pub fn failing(mut self, tile: TileCoord) -> Self {
        self.failing.push(tile);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Total provider calls.
    pub fn fetches(&self) -> usize {
        self.fetches.iter().map(|entry| *entry.value()).sum()
    }

    pub fn fetches_of(&self, tile: TileCoord) -> usize {
        self.fetches.get(&tile).map_or(0, |count| *count)
    }

    fn render(&self, tile: TileCoord) -> TileImage {
        let size = u64::from(self.tile_size);
        let channels = usize::from(self.channels);
        let mut pixels = Vec::with_capacity(size as usize * size as usize * channels);
        for row in 0..size {
            for col in 0..size {
                let meters = terrain_elevation(
                    u64::from(tile.x) * size + col,
                    u64::from(tile.y) * size + row,
                );
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let encoded = (meters + 32_768.0) as u16;
                let [r, g] = encoded.to_be_bytes();
                pixels.extend_from_slice(&[r, g, 0]);
                if channels == 4 {
                    pixels.push(255);
                }
            }
        }
        TileImage::square(self.channels, self.tile_size, pixels).unwrap()
    }
}

impl TileProvider for SyntheticTerrain {
    type Error = io::Error;

    fn tile(&self, tile: TileCoord) -> impl Future<Output = Result<TileImage, io::Error>> + Send {
        *self.fetches.entry(tile).or_insert(0) += 1;
        let result = if self.failing.contains(&tile) {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such tile {tile}"),
            ))
        } else {
            Ok(self.render(tile))
        };
        let latency = self.latency;
        async move {
            match latency {
                Some(latency) => tokio::time::sleep(latency).await,
                None => tokio::task::yield_now().await,
            }
            result
        }
    }
}

//! Spherical (Web) Mercator transforms between lon/lat degrees, global
//! pixel space, and tile-local pixel offsets.
//!
//! Global pixel space at `zoom` is a `tile_size * 2^zoom` square with
//! the origin at the north-west corner (lon -180°, lat ~85.05°).

use crate::{error::ProfileError, tile::TileCoord};
use geo::geometry::{Coord, Rect};
use std::f64::consts::PI;

/// Latitude at which the Mercator square ends, in degrees.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

fn world_size(zoom: u8, tile_size: u32) -> f64 {
    f64::from(tile_size) * f64::from(zoom).exp2()
}

/// Returns the global pixel coordinates of a lon/lat `point`.
///
/// Latitude is clamped to ±[`MAX_LATITUDE`] so poles map to the
/// top/bottom edge instead of infinity.
pub fn lon_lat_to_pixel(point: Coord<f64>, zoom: u8, tile_size: u32) -> Coord<f64> {
    let world = world_size(zoom, tile_size);
    let lat = point.y.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    let sin = lat.to_radians().sin();
    Coord {
        x: (point.x + 180.0) / 360.0 * world,
        y: (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * world,
    }
}

/// Inverse of [`lon_lat_to_pixel`].
pub fn pixel_to_lon_lat(px: Coord<f64>, zoom: u8, tile_size: u32) -> Coord<f64> {
    let world = world_size(zoom, tile_size);
    let n = PI - 2.0 * PI * px.y / world;
    Coord {
        x: px.x / world * 360.0 - 180.0,
        y: n.sinh().atan().to_degrees(),
    }
}

/// Returns the tile containing global pixel `px`, and `px`'s
/// fractional offset within that tile.
///
/// Pixels on or beyond the world's edge are attributed to the edge
/// tile, so the offset is always within `[0, tile_size)`.
pub fn pixel_to_tile(px: Coord<f64>, zoom: u8, tile_size: u32) -> (TileCoord, Coord<f64>) {
    let size = f64::from(tile_size);
    #[allow(clippy::cast_precision_loss)]
    let last = (TileCoord::grid_size(zoom) - 1) as f64;
    let tx = (px.x / size).floor().clamp(0.0, last);
    let ty = (px.y / size).floor().clamp(0.0, last);
    let edge = size * (1.0 - f64::EPSILON);
    let offset = Coord {
        x: (px.x - tx * size).clamp(0.0, edge),
        y: (px.y - ty * size).clamp(0.0, edge),
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let tile = TileCoord {
        zoom,
        x: tx as u32,
        y: ty as u32,
    };
    (tile, offset)
}

/// Returns the tile containing `point` and the point's pixel offset
/// within it.
pub fn locate(point: Coord<f64>, zoom: u8, tile_size: u32) -> (TileCoord, Coord<f64>) {
    pixel_to_tile(lon_lat_to_pixel(point, zoom, tile_size), zoom, tile_size)
}

/// Returns the geographic bounds of `tile`: `min` is the south-west
/// corner, `max` the north-east.
pub fn tile_bounds(tile: TileCoord, tile_size: u32) -> Result<Rect<f64>, ProfileError> {
    if !tile.is_valid() {
        return Err(ProfileError::InvalidTile(tile));
    }
    let size = f64::from(tile_size);
    let nw = pixel_to_lon_lat(
        Coord {
            x: f64::from(tile.x) * size,
            y: f64::from(tile.y) * size,
        },
        tile.zoom,
        tile_size,
    );
    let se = pixel_to_lon_lat(
        Coord {
            x: f64::from(tile.x + 1) * size,
            y: f64::from(tile.y + 1) * size,
        },
        tile.zoom,
        tile_size,
    );
    Ok(Rect::new(
        Coord { x: nw.x, y: se.y },
        Coord { x: se.x, y: nw.y },
    ))
}

/// Returns the midpoint of `tile`'s geographic bounds.
pub fn tile_center(tile: TileCoord, tile_size: u32) -> Result<Coord<f64>, ProfileError> {
    tile_bounds(tile, tile_size).map(|bounds| bounds.center())
}

//! Web-map tile addressing.

use crate::error::ProfileError;
use std::fmt;

/// Highest supported zoom level.
///
/// Every valid tile id at or below this zoom fits in 53 bits.
pub const MAX_ZOOM: u8 = 24;

/// Multiplier reserving the low 5 bits of a tile id for the zoom.
const ZOOM_SLOTS: u64 = 32;

/// A tile in the square XYZ (Web Mercator) grid.
///
/// `x` grows eastward and `y` southward; both are in `[0, 2^zoom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    /// Returns a tile, or `InvalidTile` if it is outside the grid.
    pub fn new(zoom: u8, x: u32, y: u32) -> Result<Self, ProfileError> {
        let tile = Self { zoom, x, y };
        if tile.is_valid() {
            Ok(tile)
        } else {
            Err(ProfileError::InvalidTile(tile))
        }
    }

    /// Returns the number of tiles along each axis at `zoom`.
    ///
    /// Zooms above [`MAX_ZOOM`] are treated as `MAX_ZOOM`.
    pub fn grid_size(zoom: u8) -> u64 {
        1_u64 << zoom.min(MAX_ZOOM)
    }

    pub fn is_valid(&self) -> bool {
        let n = Self::grid_size(self.zoom);
        self.zoom <= MAX_ZOOM && u64::from(self.x) < n && u64::from(self.y) < n
    }

    /// Returns this tile's canonical integer id.
    ///
    /// `((2^zoom * y + x) * 32) + zoom`
    pub fn id(&self) -> u64 {
        tile_id(*self)
    }

    /// Inverse of [`TileCoord::id`].
    pub fn from_id(id: u64) -> Result<Self, ProfileError> {
        let invalid = || ProfileError::InvalidInput(format!("invalid tile id {id}"));
        let zoom = u8::try_from(id % ZOOM_SLOTS).map_err(|_| invalid())?;
        if zoom > MAX_ZOOM {
            return Err(invalid());
        }
        let linear = id / ZOOM_SLOTS;
        let n = Self::grid_size(zoom);
        let (x, y) = (linear % n, linear / n);
        match (u32::try_from(x), u32::try_from(y)) {
            (Ok(x), Ok(y)) if u64::from(y) < n => Ok(Self { zoom, x, y }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Returns the canonical integer id of `tile`.
///
/// Injective for all valid tiles up to [`MAX_ZOOM`].
pub fn tile_id(TileCoord { zoom, x, y }: TileCoord) -> u64 {
    ((TileCoord::grid_size(zoom) * u64::from(y) + u64::from(x)) * ZOOM_SLOTS) + u64::from(zoom)
}

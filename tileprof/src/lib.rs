//! Elevation profiles along a path, sampled from web-map terrain tiles.
//!
//! ```ignore
//! let path = Path::try_from(&geojson)?;
//! let profile = Profile::builder()
//!     .zoom(13)
//!     .tile_size(512)
//!     .build(&path, &tileprof::from_fn(fetch_tile))
//!     .await?;
//! ```

mod cache;
mod error;
pub mod math;
pub mod mercator;
mod path;
mod profile;
mod provider;
mod sampler;
mod tile;

#[cfg(test)]
mod fixtures;

pub use crate::{
    cache::{FetchResult, TileCache},
    error::{ProfileError, ProviderError},
    path::Path,
    profile::{
        FailurePolicy, Profile, ProfileBuilder, ProfileOptions, ProfilePoint, DEFAULT_MAX_SAMPLES,
    },
    provider::{from_fn, BoxError, FnProvider, TileProvider},
    sampler::{samples, Sample},
    tile::{tile_id, TileCoord, MAX_ZOOM},
};
pub use math::Unit;
pub use rasterdem::{Encoding, RasterError, TerrainRgb, Terrarium, TileImage};

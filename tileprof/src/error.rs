use crate::tile::TileCoord;
use rasterdem::RasterError;
use std::{error::Error as StdError, sync::Arc, time::Duration};
use thiserror::Error;

/// Error returned by a [`TileProvider`](crate::TileProvider), shared
/// between every sample waiting on the same tile.
pub type ProviderError = Arc<dyn StdError + Send + Sync>;

#[derive(Error, Debug, Clone)]
pub enum ProfileError {
    #[error("missing required parameters")]
    Builder,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid tile {0}")]
    InvalidTile(TileCoord),

    #[error("decoding tile {tile}: {source}")]
    Decode {
        tile: TileCoord,
        #[source]
        source: RasterError,
    },

    #[error("tile provider failed for {tile}: {source}")]
    Provider {
        tile: TileCoord,
        #[source]
        source: ProviderError,
    },

    #[error("tile provider timed out for {tile} after {timeout:?}")]
    Timeout { tile: TileCoord, timeout: Duration },
}

impl ProfileError {
    /// Returns the tile this error is attributed to, if any.
    pub fn tile(&self) -> Option<TileCoord> {
        match self {
            Self::InvalidTile(tile)
            | Self::Decode { tile, .. }
            | Self::Provider { tile, .. }
            | Self::Timeout { tile, .. } => Some(*tile),
            Self::Builder | Self::InvalidInput(_) => None,
        }
    }

    /// Returns `true` for failures of the injected tile provider.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::Timeout { .. })
    }
}

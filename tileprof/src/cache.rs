//! Per-computation tile memoization.

use crate::{error::ProfileError, provider::TileProvider, tile::TileCoord};
use dashmap::DashMap;
use futures::future::{join_all, BoxFuture, FutureExt, Shared};
use log::trace;
use rasterdem::TileImage;
use std::{collections::HashMap, sync::Arc, time::Duration};

/// Outcome of one tile fetch, handed to every sample that needs it.
pub type FetchResult = Result<Arc<TileImage>, ProfileError>;

type PendingTile<'a> = Shared<BoxFuture<'a, FetchResult>>;

/// Maps tile ids to a single shared in-flight (or resolved) fetch.
///
/// A cache lives for exactly one profile computation and borrows its
/// provider for that long. The first request for a tile id creates the
/// fetch; every later request for the same id gets a handle to that
/// same future, so the provider is called at most once per tile.
pub struct TileCache<'a, P> {
    provider: &'a P,
    tile_size: u32,
    timeout: Option<Duration>,
    tiles: DashMap<u64, PendingTile<'a>>,
}

impl<'a, P> TileCache<'a, P>
where
    P: TileProvider + Sync,
{
    pub fn new(provider: &'a P, tile_size: u32, timeout: Option<Duration>) -> Self {
        Self {
            provider,
            tile_size,
            timeout,
            tiles: DashMap::new(),
        }
    }

    /// Returns a handle to `tile`'s fetch, creating the fetch if this is
    /// the first request for it.
    ///
    /// The fetch itself does not start until a handle is polled.
    pub fn request(&self, tile: TileCoord) -> PendingTile<'a> {
        self.tiles
            .entry(tile.id())
            .or_insert_with(|| {
                trace!("fetching tile {tile}");
                fetch(self.provider, tile, self.tile_size, self.timeout)
                    .boxed()
                    .shared()
            })
            .value()
            .clone()
    }

    /// Requests every tile in `tiles`, drives the distinct fetches to
    /// completion concurrently, and returns their outcomes keyed by
    /// tile id.
    pub async fn resolve<I>(&self, tiles: I) -> HashMap<u64, FetchResult>
    where
        I: IntoIterator<Item = TileCoord>,
    {
        let (ids, pending): (Vec<u64>, Vec<PendingTile<'a>>) = tiles
            .into_iter()
            .map(|tile| (tile.id(), tile))
            .collect::<HashMap<u64, TileCoord>>()
            .into_iter()
            .map(|(id, tile)| (id, self.request(tile)))
            .unzip();
        ids.into_iter().zip(join_all(pending).await).collect()
    }

    /// Number of distinct tiles requested so far.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

async fn fetch<P>(
    provider: &P,
    tile: TileCoord,
    tile_size: u32,
    timeout: Option<Duration>,
) -> FetchResult
where
    P: TileProvider + Sync,
{
    let fetched = match timeout {
        Some(timeout) => tokio::time::timeout(timeout, provider.tile(tile))
            .await
            .map_err(|_| ProfileError::Timeout { tile, timeout })?,
        None => provider.tile(tile).await,
    };
    let image = fetched.map_err(|e| ProfileError::Provider {
        tile,
        source: Arc::from(e.into()),
    })?;
    image
        .ensure_square(tile_size)
        .map_err(|e| ProfileError::Provider {
            tile,
            source: Arc::new(e),
        })?;
    Ok(Arc::new(image))
}

//! The injected tile source.

use crate::tile::TileCoord;
use rasterdem::TileImage;
use std::{error::Error as StdError, future::Future};

/// Boxed error any provider error converts into.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Asynchronously fetches and decodes raster tiles.
///
/// Transport, authentication, persistent caching and image
/// decompression all live behind this trait; the profile engine only
/// ever sees decoded pixels. Retries, if wanted, belong here too.
pub trait TileProvider {
    type Error: Into<BoxError>;

    /// Returns the decoded pixels of `tile`.
    fn tile(&self, tile: TileCoord) -> impl Future<Output = Result<TileImage, Self::Error>> + Send;
}

/// A [`TileProvider`] backed by a closure, see [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnProvider<F>(F);

/// Wraps an async closure `(tile) -> Result<TileImage, E>` as a
/// [`TileProvider`].
///
/// ```ignore
/// let provider = tileprof::from_fn(|tile: TileCoord| async move {
///     let bytes = http_get(&format!("https://example.com/{tile}.webp")).await?;
///     let (channels, size, pixels) = decode_webp(&bytes)?;
///     Ok::<_, BoxError>(TileImage::square(channels, size, pixels)?)
/// });
/// ```
pub fn from_fn<F>(f: F) -> FnProvider<F> {
    FnProvider(f)
}

impl<F, Fut, E> TileProvider for FnProvider<F>
where
    F: Fn(TileCoord) -> Fut,
    Fut: Future<Output = Result<TileImage, E>> + Send,
    E: Into<BoxError>,
{
    type Error = E;

    fn tile(&self, tile: TileCoord) -> impl Future<Output = Result<TileImage, E>> + Send {
        (self.0)(tile)
    }
}

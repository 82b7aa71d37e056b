use crate::{
    cache::TileCache,
    error::ProfileError,
    math::{line_distance, Unit},
    path::Path,
    provider::TileProvider,
    sampler,
};
use geo::geometry::Point;
use log::{debug, warn};
use rasterdem::{Encoding, TerrainRgb};
use serde::{Deserialize, Serialize};
use std::{sync::Arc, time::Duration};

/// Default upper bound on samples per profile.
pub const DEFAULT_MAX_SAMPLES: usize = 1_000_000;

/// One entry of a profile chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    /// Distance from the path's first coordinate.
    pub distance: f64,

    /// Terrain elevation at this point.
    pub elevation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    /// Total length of the path, in `unit`.
    pub distance: f64,

    /// Unit of every distance and elevation in this profile.
    pub unit: Unit,

    /// Distance/elevation series in path order.
    pub points: Vec<ProfilePoint>,

    /// Location of each entry in `points`.
    #[serde(skip)]
    pub locations: Vec<Point<f64>>,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            zoom: None,
            tile_size: None,
            unit: Unit::default(),
            encoding: Arc::new(TerrainRgb::default()),
            on_error: FailurePolicy::default(),
            fetch_timeout: None,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }

    pub fn min_elevation(&self) -> Option<f64> {
        self.points.iter().map(|p| p.elevation).reduce(f64::min)
    }

    pub fn max_elevation(&self) -> Option<f64> {
        self.points.iter().map(|p| p.elevation).reduce(f64::max)
    }
}

/// What to do when a tile cannot be fetched.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Fail the whole profile with the first failing sample's error.
    #[default]
    Abort,

    /// Leave the failed tile's samples out of the profile.
    Gap,
}

/// Serializable profile options.
///
/// ```json
/// { "metric": "ft", "zoom": 13, "tileSize": 512, "onError": "gap", "fetchTimeoutMs": 5000 }
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileOptions {
    pub metric: Unit,
    pub zoom: Option<u8>,
    pub tile_size: Option<u32>,
    pub on_error: FailurePolicy,
    pub fetch_timeout_ms: Option<u64>,
}

impl From<&ProfileOptions> for ProfileBuilder {
    fn from(options: &ProfileOptions) -> Self {
        let mut builder = Profile::builder()
            .unit(options.metric)
            .on_error(options.on_error);
        builder.zoom = options.zoom;
        builder.tile_size = options.tile_size;
        builder.fetch_timeout = options.fetch_timeout_ms.map(Duration::from_millis);
        builder
    }
}

#[derive(Clone)]
pub struct ProfileBuilder {
    /// Tile zoom level to sample at.
    zoom: Option<u8>,

    /// Width and height of every tile, in pixels.
    tile_size: Option<u32>,

    /// Output unit.
    unit: Unit,

    /// Pixel to meters.
    encoding: Arc<dyn Encoding>,

    on_error: FailurePolicy,

    /// Per-tile deadline for the provider.
    fetch_timeout: Option<Duration>,

    max_samples: usize,
}

impl ProfileBuilder {
    pub fn zoom(mut self, zoom: u8) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn tile_size(mut self, pixels: u32) -> Self {
        self.tile_size = Some(pixels);
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = unit;
        self
    }

    pub fn encoding(mut self, encoding: impl Encoding + 'static) -> Self {
        self.encoding = Arc::new(encoding);
        self
    }

    pub fn on_error(mut self, policy: FailurePolicy) -> Self {
        self.on_error = policy;
        self
    }

    /// Fail a tile whose provider call takes longer than `timeout`.
    ///
    /// Requires a tokio runtime with the time driver enabled.
    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Samples `path`, fetches every distinct tile it crosses from
    /// `provider` (each at most once, concurrently), and decodes one
    /// elevation per sample.
    ///
    /// Options are validated before `provider` is called.
    pub async fn build<P>(&self, path: &Path, provider: &P) -> Result<Profile, ProfileError>
    where
        P: TileProvider + Sync,
    {
        let (Some(zoom), Some(tile_size)) = (self.zoom, self.tile_size) else {
            return Err(ProfileError::Builder);
        };
        let (samples, sample_runtime) = {
            let now = std::time::Instant::now();
            let samples = sampler::samples(path, zoom, tile_size, self.max_samples)?;
            (samples, now.elapsed())
        };

        let cache = TileCache::new(provider, tile_size, self.fetch_timeout);
        let (tiles, fetch_runtime) = {
            let now = std::time::Instant::now();
            let tiles = cache.resolve(samples.iter().map(|s| s.tile)).await;
            (tiles, now.elapsed())
        };

        if self.on_error == FailurePolicy::Gap {
            for err in tiles.values().filter_map(|r| r.as_ref().err()) {
                warn!("profile; dropping samples: {err}");
            }
        }

        let ((points, locations), decode_runtime) = {
            let now = std::time::Instant::now();
            let mut points = Vec::with_capacity(samples.len());
            let mut locations = Vec::with_capacity(samples.len());
            for sample in &samples {
                let image = match tiles.get(&sample.tile.id()) {
                    Some(Ok(image)) => image,
                    Some(Err(_)) if self.on_error == FailurePolicy::Gap => continue,
                    Some(Err(err)) => return Err(err.clone()),
                    None => return Err(ProfileError::InvalidTile(sample.tile)),
                };
                let meters = image
                    .elevation(sample.offset, self.encoding.as_ref())
                    .map_err(|source| ProfileError::Decode {
                        tile: sample.tile,
                        source,
                    })?;
                points.push(ProfilePoint {
                    distance: self.unit.from_meters(sample.distance),
                    elevation: self.unit.from_meters(meters),
                });
                locations.push(Point::from(sample.location));
            }
            ((points, locations), now.elapsed())
        };

        debug!(
            "profile; samples: {}, tiles: {}, points: {}, sample_exec: {:?}, fetch_exec: {:?}, decode_exec: {:?}",
            samples.len(),
            cache.len(),
            points.len(),
            sample_runtime,
            fetch_runtime,
            decode_runtime
        );

        Ok(Profile {
            distance: self.unit.from_meters(line_distance(path.coords())),
            unit: self.unit,
            points,
            locations,
        })
    }
}

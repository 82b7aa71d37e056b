//! Tile cover: turns a path into the ordered samples at which
//! elevation is read.

use crate::{
    error::ProfileError,
    math::{distance, linspace, zoom_resolution},
    mercator::{locate, MAX_LATITUDE},
    path::Path,
    tile::{TileCoord, MAX_ZOOM},
};
use geo::geometry::Coord;

/// A point along the path where elevation is evaluated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Meters traveled from the path's first coordinate.
    pub distance: f64,

    /// Geographic location of this sample.
    pub location: Coord<f64>,

    /// Tile containing `location`.
    pub tile: TileCoord,

    /// Fractional pixel offset of `location` within `tile`.
    pub offset: Coord<f64>,
}

impl Sample {
    fn new(distance: f64, location: Coord<f64>, zoom: u8, tile_size: u32) -> Self {
        let (tile, offset) = locate(location, zoom, tile_size);
        Self {
            distance,
            location,
            tile,
            offset,
        }
    }
}

/// One path segment, split into `steps` equal parts no longer than a
/// source pixel.
struct Segment {
    start: Coord<f64>,
    end: Coord<f64>,
    length_m: f64,
    steps: usize,
}

impl Segment {
    fn new(start: Coord<f64>, end: Coord<f64>, zoom: u8, tile_size: u32) -> Self {
        let length_m = distance(start, end);
        let steps = if length_m > 0.0 {
            let mid_lat = ((start.y + end.y) / 2.0).clamp(-MAX_LATITUDE, MAX_LATITUDE);
            let max_step_m = zoom_resolution(mid_lat, zoom, tile_size);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let steps = (length_m / max_step_m).ceil() as usize;
            steps.max(1)
        } else {
            0
        };
        Self {
            start,
            end,
            length_m,
            steps,
        }
    }

    /// Returns (meters along segment, location) for every step after
    /// `start`; the last one is exactly `end`.
    ///
    /// Longitude is interpolated the short way round, so segments
    /// crossing the antimeridian stay near it.
    fn walk(&self) -> impl Iterator<Item = (f64, Coord<f64>)> + '_ {
        let delta = Coord {
            x: wrap_lon(self.end.x - self.start.x),
            y: self.end.y - self.start.y,
        };
        linspace(0.0, 1.0, self.steps + 1)
            .enumerate()
            .skip(1)
            .map(move |(i, f)| {
                if i == self.steps {
                    (self.length_m, self.end)
                } else {
                    let location = self.start + delta * f;
                    let location = Coord {
                        x: wrap_lon(location.x),
                        y: location.y,
                    };
                    (self.length_m * f, location)
                }
            })
    }
}

/// Wraps a longitude (or longitude difference) into `[-180, 180]`.
fn wrap_lon(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        (lon + 180.0).rem_euclid(360.0) - 180.0
    }
}

/// Returns the samples along `path` at `zoom`.
///
/// Every path vertex is sampled, segments are walked at most one
/// source pixel apart, and zero-length segments contribute nothing.
/// Fails with `InvalidInput` if `zoom` exceeds [`MAX_ZOOM`], `tile_size`
/// is zero, or more than `max_samples` would be produced.
pub fn samples(
    path: &Path,
    zoom: u8,
    tile_size: u32,
    max_samples: usize,
) -> Result<Vec<Sample>, ProfileError> {
    if zoom > MAX_ZOOM {
        return Err(ProfileError::InvalidInput(format!(
            "zoom {zoom} exceeds maximum {MAX_ZOOM}"
        )));
    }
    if tile_size == 0 {
        return Err(ProfileError::InvalidInput(
            "tile size must be positive".to_string(),
        ));
    }

    let coords = path.coords();
    let segments: Vec<Segment> = coords
        .windows(2)
        .map(|w| Segment::new(w[0], w[1], zoom, tile_size))
        .collect();

    let total = segments
        .iter()
        .fold(1_usize, |acc, s| acc.saturating_add(s.steps));
    if total > max_samples {
        return Err(ProfileError::InvalidInput(format!(
            "path needs {total} samples at zoom {zoom}, limit is {max_samples}"
        )));
    }

    let mut samples = Vec::with_capacity(total);
    samples.push(Sample::new(0.0, coords[0], zoom, tile_size));

    let mut traveled_m = 0.0;
    for segment in segments.iter().filter(|s| s.steps > 0) {
        for (along_m, location) in segment.walk() {
            samples.push(Sample::new(traveled_m + along_m, location, zoom, tile_size));
        }
        traveled_m += segment.length_m;
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::samples;
    use crate::{
        error::ProfileError,
        math::{line_distance, zoom_resolution},
        mercator::locate,
        path::Path,
    };
    use approx::assert_relative_eq;
    use geo::coord;

    fn path(coords: &[(f64, f64)]) -> Path {
        Path::try_from(coords).unwrap()
    }

    #[test]
    fn test_single_point() {
        let s = samples(&path(&[(-111.888, 40.796)]), 13, 512, usize::MAX).unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].distance, 0.0);
        assert_eq!(s[0].location, coord! {x: -111.888, y: 40.796});
    }

    #[test]
    fn test_zero_length_segments_are_skipped() {
        let s = samples(
            &path(&[(-111.888, 40.796), (-111.888, 40.796), (-111.888, 40.796)]),
            14,
            512,
            usize::MAX,
        )
        .unwrap();
        assert_eq!(s.len(), 1);

        let s = samples(
            &path(&[(-111.888, 40.796), (-111.887, 40.796), (-111.887, 40.796)]),
            14,
            512,
            usize::MAX,
        )
        .unwrap();
        let distances: Vec<f64> = s.iter().map(|s| s.distance).collect();
        let mut deduped = distances.clone();
        deduped.dedup();
        assert_eq!(distances, deduped);
    }

    #[test]
    fn test_vertices_are_sampled_and_spacing_bounded() {
        let coords = [
            (-111.888_112_776_445_03, 40.796_184_098_293_91),
            (-111.886_455_966_149_53, 40.797_821_596_351_326),
            (-111.888_573_001_527_19, 40.799_389_375_789_56),
        ];
        let zoom = 14;
        let s = samples(&path(&coords), zoom, 512, usize::MAX).unwrap();

        for (x, y) in coords {
            assert!(s.iter().any(|s| s.location == coord! {x: x, y: y}));
        }
        assert_eq!(s.last().unwrap().location, coord! {x: coords[2].0, y: coords[2].1});

        let max_step = zoom_resolution(40.79, zoom, 512) * 1.001;
        for pair in s.windows(2) {
            let step = pair[1].distance - pair[0].distance;
            assert!(step > 0.0);
            assert!(step <= max_step, "step {step} > {max_step}");
        }
    }

    #[test]
    fn test_final_distance_is_line_distance() {
        let coords = [
            coord! {x: -111.888_112_776_445_03, y: 40.796_184_098_293_91},
            coord! {x: -111.886_455_966_149_53, y: 40.797_821_596_351_326},
            coord! {x: -111.888_573_001_527_19, y: 40.799_389_375_789_56},
            coord! {x: -111.888_112_776_445_03, y: 40.801_688_718_652_77},
        ];
        let s = samples(&Path::new(coords.to_vec()).unwrap(), 13, 512, usize::MAX).unwrap();
        assert_relative_eq!(
            s.last().unwrap().distance,
            line_distance(&coords),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_tile_is_resolved_per_sample() {
        // Crosses the 13/1549 -> 13/1550 tile edge.
        let s = samples(
            &path(&[(-111.90, 40.80), (-111.85, 40.80)]),
            13,
            512,
            usize::MAX,
        )
        .unwrap();
        let xs: std::collections::BTreeSet<u32> = s.iter().map(|s| s.tile.x).collect();
        assert!(xs.len() >= 2);
        for sample in &s {
            let (tile, offset) = locate(sample.location, 13, 512);
            assert_eq!(sample.tile, tile);
            assert_eq!(sample.offset, offset);
        }
    }

    #[test]
    fn test_antimeridian_takes_short_way() {
        let p = path(&[(179.999, 0.0), (-179.999, 0.0)]);
        let s = samples(&p, 13, 512, usize::MAX).unwrap();

        let tiles: std::collections::BTreeSet<u32> = s.iter().map(|s| s.tile.x).collect();
        assert_eq!(tiles, [0, 8191].into_iter().collect());
        for sample in &s {
            assert!(sample.location.x.abs() >= 179.999, "{:?}", sample.location);
        }
        assert_relative_eq!(
            s.last().unwrap().distance,
            line_distance(p.coords()),
            max_relative = 1e-12
        );
        let max_step = zoom_resolution(0.0, 13, 512) * 1.001;
        assert!(s.len() < 30);
        assert!(s.windows(2).all(|w| w[1].distance - w[0].distance <= max_step));
    }

    #[test]
    fn test_wrap_lon() {
        assert_eq!(super::wrap_lon(-179.0), -179.0);
        assert_eq!(super::wrap_lon(180.0), 180.0);
        assert_relative_eq!(super::wrap_lon(-359.998), 0.002, epsilon = 1e-9);
        assert_relative_eq!(super::wrap_lon(181.0), -179.0, epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_zoom_and_tile_size() {
        let p = path(&[(0.0, 0.0), (1.0, 1.0)]);
        for zoom in [25, 64, u8::MAX] {
            assert!(matches!(
                samples(&p, zoom, 512, 10),
                Err(ProfileError::InvalidInput(_))
            ));
        }
        assert!(matches!(
            samples(&p, 3, 0, 10),
            Err(ProfileError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_max_samples() {
        let p = path(&[(0.0, 0.0), (1.0, 1.0)]);
        assert!(samples(&p, 10, 512, 10).is_err());
        assert!(samples(&p, 0, 512, 10).is_ok());
    }
}

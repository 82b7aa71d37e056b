use super::EQUATORIAL_RADIUS;
use std::f64::consts::PI;

/// Returns the ground distance, in meters, covered by one pixel of a
/// `tile_size` pixel tile at `zoom`, at `latitude` degrees.
///
/// Halves with each zoom level and falls off with the cosine of
/// latitude.
pub fn zoom_resolution(latitude: f64, zoom: u8, tile_size: u32) -> f64 {
    let world_px = f64::from(tile_size) * f64::from(zoom).exp2();
    (latitude.to_radians().cos() * 2.0 * PI * EQUATORIAL_RADIUS) / world_px
}

#[cfg(test)]
mod tests {
    use super::zoom_resolution;
    use approx::assert_relative_eq;

    #[test]
    fn test_equator_by_zoom() {
        // Equatorial circumference over a 512 pixel world.
        assert_relative_eq!(
            zoom_resolution(0.0, 0, 512),
            78_271.516_964_020_48,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            zoom_resolution(0.0, 1, 512),
            39_135.758_482_010_24,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            zoom_resolution(0.0, 13, 512),
            9.554_628_535_647_032,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            zoom_resolution(0.0, 19, 512),
            0.149_291_070_869_484_87,
            max_relative = 1e-12
        );
        for zoom in 0..24 {
            assert_relative_eq!(
                zoom_resolution(0.0, zoom, 512),
                2.0 * zoom_resolution(0.0, zoom + 1, 512),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_latitude_falloff() {
        for (lat, expected) in [
            (0.0, 2.388_657_133_911_758),
            (45.0, 1.689_035_657_318_627_4),
            (60.0, 1.194_328_566_955_879_2),
            (75.0, 0.618_229_958_476_365_2),
            (85.0, 0.208_185_186_675_571_57),
        ] {
            assert_relative_eq!(zoom_resolution(lat, 15, 512), expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_tile_size_scales_resolution() {
        assert_relative_eq!(
            zoom_resolution(40.0, 13, 256),
            2.0 * zoom_resolution(40.0, 13, 512),
            max_relative = 1e-12
        );
    }
}

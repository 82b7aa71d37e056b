use super::{deg_to_rad, EARTH_RADIUS};
use geo::geometry::Coord;

/// Returns the haversine distance, in meters, between two lon/lat
/// coordinates.
pub fn distance(from: Coord<f64>, to: Coord<f64>) -> f64 {
    let d_lat = deg_to_rad(to.y - from.y);
    let d_lon = deg_to_rad(to.x - from.x);
    let lat1 = deg_to_rad(from.y);
    let lat2 = deg_to_rad(to.y);

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1.cos() * lat2.cos();

    2.0 * a.sqrt().atan2((1.0 - a).sqrt()) * EARTH_RADIUS
}

/// Returns the sum of the segment lengths of `coords`, in meters.
pub fn line_distance(coords: &[Coord<f64>]) -> f64 {
    coords.windows(2).map(|w| distance(w[0], w[1])).sum()
}

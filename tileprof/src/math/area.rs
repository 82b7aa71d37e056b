use super::{EARTH_RADIUS, EQUATORIAL_RADIUS};
use geo::{
    geometry::{Geometry, MultiPolygon, Polygon},
    ChamberlainDuquetteArea,
};

/// Returns the spherical area of `polygon` in square meters, holes
/// subtracted, on a sphere of [`EARTH_RADIUS`].
pub fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    // geo integrates on the equatorial sphere.
    let scale = (EARTH_RADIUS / EQUATORIAL_RADIUS).powi(2);
    polygon.chamberlain_duquette_unsigned_area() * scale
}

/// Returns the summed spherical area of every polygon in
/// `multi_polygon`, in square meters.
pub fn multi_polygon_area(multi_polygon: &MultiPolygon<f64>) -> f64 {
    multi_polygon.iter().map(polygon_area).sum()
}

/// Returns the spherical area of any geometry, in square meters.
///
/// Points and lines have no area.
pub fn area(geometry: &Geometry<f64>) -> f64 {
    match geometry {
        Geometry::Polygon(polygon) => polygon_area(polygon),
        Geometry::MultiPolygon(multi_polygon) => multi_polygon_area(multi_polygon),
        Geometry::GeometryCollection(collection) => collection.iter().map(area).sum(),
        Geometry::Rect(rect) => polygon_area(&rect.to_polygon()),
        Geometry::Triangle(triangle) => polygon_area(&triangle.to_polygon()),
        _ => 0.0,
    }
}

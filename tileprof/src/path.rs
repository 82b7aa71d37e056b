//! Caller supplied paths.

use crate::error::ProfileError;
use geo::geometry::{Coord, Geometry, LineString, MultiPoint, Point};

/// An ordered, non-empty sequence of finite lon/lat coordinates, in
/// degrees, within lon `[-180, 180]` and lat `[-90, 90]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path(Vec<Coord<f64>>);

impl Path {
    pub fn new(coords: Vec<Coord<f64>>) -> Result<Self, ProfileError> {
        if coords.is_empty() {
            return Err(ProfileError::InvalidInput("empty path".to_string()));
        }
        if let Some((idx, coord)) = coords
            .iter()
            .enumerate()
            .find(|(_, c)| !(c.x.is_finite() && c.y.is_finite()))
        {
            return Err(ProfileError::InvalidInput(format!(
                "non-finite coordinate {coord:?} at index {idx}"
            )));
        }
        if let Some((idx, coord)) = coords
            .iter()
            .enumerate()
            .find(|(_, c)| c.x.abs() > 180.0 || c.y.abs() > 90.0)
        {
            return Err(ProfileError::InvalidInput(format!(
                "coordinate {coord:?} at index {idx} is outside lon [-180, 180], lat [-90, 90]"
            )));
        }
        Ok(Self(coords))
    }

    pub fn coords(&self) -> &[Coord<f64>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, paths hold at least one coordinate.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Vec<Coord<f64>>> for Path {
    type Error = ProfileError;

    fn try_from(coords: Vec<Coord<f64>>) -> Result<Self, Self::Error> {
        Self::new(coords)
    }
}

impl TryFrom<&[(f64, f64)]> for Path {
    type Error = ProfileError;

    /// Builds a path from `(lon, lat)` pairs.
    fn try_from(coords: &[(f64, f64)]) -> Result<Self, Self::Error> {
        Self::new(coords.iter().map(|&c| Coord::from(c)).collect())
    }
}

impl TryFrom<LineString<f64>> for Path {
    type Error = ProfileError;

    fn try_from(line: LineString<f64>) -> Result<Self, Self::Error> {
        Self::new(line.0)
    }
}

impl TryFrom<Point<f64>> for Path {
    type Error = ProfileError;

    fn try_from(point: Point<f64>) -> Result<Self, Self::Error> {
        Self::new(vec![point.0])
    }
}

impl TryFrom<MultiPoint<f64>> for Path {
    type Error = ProfileError;

    fn try_from(points: MultiPoint<f64>) -> Result<Self, Self::Error> {
        Self::new(points.into_iter().map(|p| p.0).collect())
    }
}

impl TryFrom<Geometry<f64>> for Path {
    type Error = ProfileError;

    fn try_from(geometry: Geometry<f64>) -> Result<Self, Self::Error> {
        match geometry {
            Geometry::LineString(line) => line.try_into(),
            Geometry::Line(line) => Self::new(vec![line.start, line.end]),
            Geometry::Point(point) => point.try_into(),
            Geometry::MultiPoint(points) => points.try_into(),
            other => Err(unsupported(geometry_name(&other))),
        }
    }
}

impl TryFrom<&geojson::Value> for Path {
    type Error = ProfileError;

    fn try_from(value: &geojson::Value) -> Result<Self, Self::Error> {
        match value {
            geojson::Value::LineString(positions) | geojson::Value::MultiPoint(positions) => {
                positions
                    .iter()
                    .map(|p| position(p))
                    .collect::<Result<Vec<_>, _>>()
                    .and_then(Self::new)
            }
            geojson::Value::Point(p) => Self::new(vec![position(p)?]),
            other => Err(unsupported(value_name(other))),
        }
    }
}

impl TryFrom<&geojson::Geometry> for Path {
    type Error = ProfileError;

    fn try_from(geometry: &geojson::Geometry) -> Result<Self, Self::Error> {
        Self::try_from(&geometry.value)
    }
}

impl TryFrom<&geojson::Feature> for Path {
    type Error = ProfileError;

    fn try_from(feature: &geojson::Feature) -> Result<Self, Self::Error> {
        feature
            .geometry
            .as_ref()
            .ok_or_else(|| ProfileError::InvalidInput("feature has no geometry".to_string()))
            .and_then(Self::try_from)
    }
}

impl TryFrom<&geojson::GeoJson> for Path {
    type Error = ProfileError;

    fn try_from(geojson: &geojson::GeoJson) -> Result<Self, Self::Error> {
        match geojson {
            geojson::GeoJson::Geometry(geometry) => geometry.try_into(),
            geojson::GeoJson::Feature(feature) => feature.try_into(),
            geojson::GeoJson::FeatureCollection(_) => Err(unsupported("FeatureCollection")),
        }
    }
}

fn position(p: &[f64]) -> Result<Coord<f64>, ProfileError> {
    match p {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(ProfileError::InvalidInput(format!(
            "position needs at least 2 elements, got {}",
            p.len()
        ))),
    }
}

fn unsupported(kind: &str) -> ProfileError {
    ProfileError::InvalidInput(format!("cannot profile a {kind}"))
}

fn value_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
        _ => "geometry",
    }
}

fn geometry_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
        _ => "geometry",
    }
}

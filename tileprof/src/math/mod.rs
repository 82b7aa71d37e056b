//! Geographic helpers: distances, areas, ground resolution, and unit
//! conversions.

mod area;
mod distance;
mod linspace;
mod resolution;
mod units;

pub use self::{
    area::{area, multi_polygon_area, polygon_area},
    distance::{distance, line_distance},
    linspace::linspace,
    resolution::zoom_resolution,
    units::{deg_to_rad, m_to_ft, Unit, FT_PER_M},
};

/// Mean earth radius (meters) used for great-circle distances.
pub const EARTH_RADIUS: f64 = 6_371_008.8;

/// WGS84 equatorial radius (meters), the Web Mercator sphere.
pub const EQUATORIAL_RADIUS: f64 = 6_378_137.0;

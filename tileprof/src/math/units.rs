use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Feet per meter.
pub const FT_PER_M: f64 = 3.28084;

/// Converts meters to feet.
pub fn m_to_ft(m: f64) -> f64 {
    m * FT_PER_M
}

/// Converts degrees to radians, wrapping at a full turn (so 360° is
/// 0 rad).
pub fn deg_to_rad(degrees: f64) -> f64 {
    ((degrees % 360.0) * std::f64::consts::PI) / 180.0
}

/// Output unit for profile distances and elevations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "ft")]
    Feet,
}

impl Unit {
    /// Converts `meters` into this unit.
    pub fn from_meters(self, meters: f64) -> f64 {
        match self {
            Self::Meters => meters,
            Self::Feet => m_to_ft(meters),
        }
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(Self::Meters),
            "ft" => Ok(Self::Feet),
            other => Err(format!("unknown unit {other:?}, expected \"m\" or \"ft\"")),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Meters => f.write_str("m"),
            Self::Feet => f.write_str("ft"),
        }
    }
}

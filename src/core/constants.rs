//! Reference ellipsoid parameters and numeric tolerances

use serde::{Deserialize, Serialize};

/// Earth semi-major (equatorial) axis in meters
pub const SEMI_MAJOR_AXIS: f64 = 6378137.0;

/// Earth semi-minor (polar) axis in meters
pub const SEMI_MINOR_AXIS: f64 = 6356752.31;

/// Flattening derived from the two axes
pub const FLATTENING: f64 = 1.0 - SEMI_MINOR_AXIS / SEMI_MAJOR_AXIS;

/// Relative tolerance used when comparing positions
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-5;

/// Absolute tolerance used when comparing positions
pub const DEFAULT_ABSOLUTE_TOLERANCE: f64 = 1e-8;

/// Reference ellipsoid described by its semi-major axis and flattening
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipsoid {
    /// Semi-major axis (meters)
    pub semi_major_axis: f64,
    /// Flattening factor
    pub flattening: f64,
}

impl Ellipsoid {
    /// The ellipsoid every conversion uses unless told otherwise
    pub const DEFAULT: Ellipsoid = Ellipsoid {
        semi_major_axis: SEMI_MAJOR_AXIS,
        flattening: FLATTENING,
    };

    pub const fn new(semi_major_axis: f64, flattening: f64) -> Self {
        Self {
            semi_major_axis,
            flattening,
        }
    }

    /// Build an ellipsoid from its equatorial and polar radii
    pub fn from_axes(semi_major_axis: f64, semi_minor_axis: f64) -> Self {
        Self {
            semi_major_axis,
            flattening: 1.0 - semi_minor_axis / semi_major_axis,
        }
    }

    /// Semi-minor axis (meters)
    pub fn semi_minor_axis(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.flattening)
    }

    /// First eccentricity squared, `2f - f²`
    pub fn eccentricity_squared(&self) -> f64 {
        2.0 * self.flattening - self.flattening * self.flattening
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Tolerance pair for approximate component-wise comparison
///
/// Two values `a` and `b` are close when `|a - b| <= absolute + relative * |b|`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub relative: f64,
    pub absolute: f64,
}

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance {
        relative: DEFAULT_RELATIVE_TOLERANCE,
        absolute: DEFAULT_ABSOLUTE_TOLERANCE,
    };

    pub fn is_close(&self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        (a - b).abs() <= self.absolute + self.relative * b.abs()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

//! Concrete position representations: geodetic, n-vector and ECEF

use std::ops::Sub;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::constants::Ellipsoid;
use super::geodesy;
use super::position::{Position, PositionKind};
use crate::validation::error::{GeodesyError, Result};

/// Unit used by angle accessors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    fn convert_degrees(self, degrees: f64) -> f64 {
        match self {
            AngleUnit::Degrees => degrees,
            AngleUnit::Radians => degrees.to_radians(),
        }
    }
}

/// Geodetic latitude, longitude and altitude
///
/// Angles are stored in degrees. Altitude is height above the reference
/// ellipsoid in meters, not above mean sea level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Lla {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl Lla {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }

    /// Latitude in degrees
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn latitude_in(&self, unit: AngleUnit) -> f64 {
        unit.convert_degrees(self.latitude)
    }

    pub fn longitude_in(&self, unit: AngleUnit) -> f64 {
        unit.convert_degrees(self.longitude)
    }

    /// Altitude above the ellipsoid in meters
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Same horizontal position at a different altitude
    pub fn with_altitude(&self, altitude: f64) -> Self {
        Self { altitude, ..*self }
    }

    pub fn to_pvector_on(&self, ellipsoid: &Ellipsoid) -> Pvector {
        self.to_nvector().to_pvector_on(ellipsoid)
    }
}

impl Position for Lla {
    fn kind(&self) -> PositionKind {
        PositionKind::Lla
    }

    fn to_lla(&self) -> Lla {
        *self
    }

    fn to_nvector(&self) -> Nvector {
        let n_eb_e = geodesy::lat_lon_to_n_e(
            self.latitude_in(AngleUnit::Radians),
            self.longitude_in(AngleUnit::Radians),
        );
        Nvector::from_vector(n_eb_e, -self.altitude)
    }

    fn to_pvector(&self) -> Pvector {
        self.to_pvector_on(&Ellipsoid::DEFAULT)
    }

    fn as_array(&self) -> Vec<f64> {
        vec![self.latitude, self.longitude, self.altitude]
    }

    fn coerce(&self, other: &dyn Position) -> Self {
        other.to_lla()
    }
}

/// n-vector: unit surface normal in ECEF plus depth below the ellipsoid
///
/// Positive depth is below the ellipsoid surface (depth = -altitude).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Nvector {
    x: f64,
    y: f64,
    z: f64,
    depth: f64,
}

impl Nvector {
    /// Build from raw components, stored as given
    ///
    /// Conversions normalize the direction; use [`Nvector::normalized`] to
    /// store a unit vector up front.
    pub fn new(x: f64, y: f64, z: f64, depth: f64) -> Self {
        Self { x, y, z, depth }
    }

    /// Build with the direction scaled to unit length
    pub fn normalized(x: f64, y: f64, z: f64, depth: f64) -> Result<Self> {
        let n = geodesy::unit(&Vector3::new(x, y, z)).ok_or(GeodesyError::DegenerateVector {
            context: "Nvector::normalized",
        })?;
        Ok(Self::from_vector(n, depth))
    }

    pub fn from_vector(n_eb_e: Vector3<f64>, depth: f64) -> Self {
        Self::new(n_eb_e.x, n_eb_e.y, n_eb_e.z, depth)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    /// Depth below the ellipsoid in meters
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// Direction as a vector
    pub fn xyz(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn to_pvector_on(&self, ellipsoid: &Ellipsoid) -> Pvector {
        Pvector::from(geodesy::n_eb_e_to_p_eb_e(&self.xyz(), self.depth, ellipsoid))
    }
}

impl Position for Nvector {
    fn kind(&self) -> PositionKind {
        PositionKind::Nvector
    }

    fn to_lla(&self) -> Lla {
        let (latitude, longitude) = geodesy::n_e_to_lat_lon(&self.xyz());
        Lla::new(latitude.to_degrees(), longitude.to_degrees(), -self.depth)
    }

    fn to_nvector(&self) -> Nvector {
        *self
    }

    fn to_pvector(&self) -> Pvector {
        self.to_pvector_on(&Ellipsoid::DEFAULT)
    }

    fn as_array(&self) -> Vec<f64> {
        vec![self.x, self.y, self.z, self.depth]
    }

    fn coerce(&self, other: &dyn Position) -> Self {
        other.to_nvector()
    }
}

/// Earth-centered Earth-fixed position vector in meters
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pvector {
    x: f64,
    y: f64,
    z: f64,
}

impl Pvector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn xyz(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn to_nvector_on(&self, ellipsoid: &Ellipsoid) -> Nvector {
        let (n_eb_e, depth) = geodesy::p_eb_e_to_n_eb_e(&self.xyz(), ellipsoid);
        Nvector::from_vector(n_eb_e, depth)
    }

    pub fn to_lla_on(&self, ellipsoid: &Ellipsoid) -> Lla {
        self.to_nvector_on(ellipsoid).to_lla()
    }
}

impl From<Vector3<f64>> for Pvector {
    fn from(p: Vector3<f64>) -> Self {
        Self::new(p.x, p.y, p.z)
    }
}

impl Sub for Pvector {
    type Output = Vector3<f64>;

    fn sub(self, other: Pvector) -> Vector3<f64> {
        self.xyz() - other.xyz()
    }
}

impl Sub for &Pvector {
    type Output = Vector3<f64>;

    fn sub(self, other: Self) -> Vector3<f64> {
        self.xyz() - other.xyz()
    }
}

impl Position for Pvector {
    fn kind(&self) -> PositionKind {
        PositionKind::Pvector
    }

    fn to_lla(&self) -> Lla {
        self.to_lla_on(&Ellipsoid::DEFAULT)
    }

    fn to_nvector(&self) -> Nvector {
        self.to_nvector_on(&Ellipsoid::DEFAULT)
    }

    fn to_pvector(&self) -> Pvector {
        *self
    }

    fn as_array(&self) -> Vec<f64> {
        vec![self.x, self.y, self.z]
    }

    fn coerce(&self, other: &dyn Position) -> Self {
        other.to_pvector()
    }
}

//! Shared geodesy context built from configuration
//!
//! Holds the configured ellipsoid, comparison tolerance and the geoid model
//! handle. The geoid grid is loaded once here and shared read-only through an
//! `Arc`, so a `Geodesy` can be cloned into worker threads freely.

use std::path::Path;
use std::sync::Arc;

use crate::core::{
    Ellipsoid, GeoPosition, Lla, Nvector, Position, PositionKind, Pvector, Tolerance,
};
use crate::geoid::GeoidModel;
use crate::utils::config::GeodesyConfig;
use crate::validation::error::{GeodesyError, Result};

#[derive(Debug, Clone, Default)]
pub struct Geodesy {
    ellipsoid: Ellipsoid,
    tolerance: Tolerance,
    geoid: Option<Arc<GeoidModel>>,
}

impl Geodesy {
    /// Build a context, loading the geoid grid if one is configured
    pub fn from_config(config: &GeodesyConfig) -> Result<Self> {
        config.validate()?;
        let geoid = match &config.geoid.path {
            Some(path) => Some(Arc::new(GeoidModel::open(path)?)),
            None => None,
        };
        Ok(Self {
            ellipsoid: config.ellipsoid,
            tolerance: config.tolerance,
            geoid,
        })
    }

    /// Load a JSON configuration file and build a context from it
    pub fn from_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_config(&GeodesyConfig::load_from_file(path)?)
    }

    /// Attach an already loaded geoid model
    pub fn with_geoid(mut self, geoid: Arc<GeoidModel>) -> Self {
        self.geoid = Some(geoid);
        self
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    pub fn geoid(&self) -> Option<&Arc<GeoidModel>> {
        self.geoid.as_ref()
    }

    fn require_geoid(&self) -> Result<&GeoidModel> {
        self.geoid.as_deref().ok_or(GeodesyError::GeoidUnavailable)
    }

    /// Geoid height in meters; add to AMSL for ellipsoid height, subtract for the reverse
    pub fn geoid_height(&self, latitude: f64, longitude: f64) -> Result<f64> {
        Ok(self.require_geoid()?.height(latitude, longitude))
    }

    pub fn ellipsoid_to_amsl(&self, position: &Lla) -> Result<Lla> {
        Ok(self.require_geoid()?.ellipsoid_to_amsl(position))
    }

    pub fn amsl_to_ellipsoid(&self, position: &Lla) -> Result<Lla> {
        Ok(self.require_geoid()?.amsl_to_ellipsoid(position))
    }

    /// ECEF position on the configured ellipsoid
    pub fn to_pvector(&self, position: &dyn Position) -> Pvector {
        match position.kind() {
            PositionKind::Pvector => position.to_pvector(),
            _ => position.to_nvector().to_pvector_on(&self.ellipsoid),
        }
    }

    /// n-vector position on the configured ellipsoid
    pub fn to_nvector(&self, position: &dyn Position) -> Nvector {
        match position.kind() {
            PositionKind::Pvector => position.to_pvector().to_nvector_on(&self.ellipsoid),
            _ => position.to_nvector(),
        }
    }

    /// Geodetic position on the configured ellipsoid
    pub fn to_lla(&self, position: &dyn Position) -> Lla {
        match position.kind() {
            PositionKind::Pvector => position.to_pvector().to_lla_on(&self.ellipsoid),
            _ => position.to_lla(),
        }
    }

    /// Straight-line distance in meters on the configured ellipsoid
    pub fn distance(&self, a: &dyn Position, b: &dyn Position) -> f64 {
        (self.to_pvector(a) - self.to_pvector(b)).norm()
    }

    /// Express `position` as `kind`, converting on the configured ellipsoid
    pub fn coerce(&self, kind: PositionKind, position: &dyn Position) -> GeoPosition {
        match kind {
            PositionKind::Lla => GeoPosition::Lla(self.to_lla(position)),
            PositionKind::Nvector => GeoPosition::Nvector(self.to_nvector(position)),
            PositionKind::Pvector => GeoPosition::Pvector(self.to_pvector(position)),
        }
    }

    /// Equality using the configured ellipsoid and tolerance
    ///
    /// `b` is converted into the representation of `a` before the components
    /// are compared.
    pub fn same_position(&self, a: &dyn Position, b: &dyn Position) -> bool {
        let lhs = a.as_array();
        let rhs = self.coerce(a.kind(), b).as_array();
        lhs.len() == rhs.len()
            && lhs
                .iter()
                .zip(&rhs)
                .all(|(x, y)| self.tolerance.is_close(*x, *y))
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{Ellipsoid, Tolerance};
use crate::validation::error::{GeodesyError, Result};

/// Library-wide configuration, stored as JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeodesyConfig {
    /// Reference ellipsoid used for ECEF conversions
    pub ellipsoid: Ellipsoid,
    /// Geoid grid settings
    pub geoid: GeoidConfig,
    /// Tolerance for position comparisons
    pub tolerance: Tolerance,
}

/// Geoid grid configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoidConfig {
    /// Path to the PGM grid (e.g. `geoids/egm96-5.pgm`); no geoid is loaded when unset
    pub path: Option<PathBuf>,
}

impl GeodesyConfig {
    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GeodesyError::io(path, e))?;
        let config = Self::from_json(&content)?;
        debug!(path = %path.display(), "loaded geodesy configuration");
        Ok(config)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).map_err(|e| GeodesyError::io(path, e))
    }

    /// Check parameters are physically meaningful
    pub fn validate(&self) -> Result<()> {
        let a = self.ellipsoid.semi_major_axis;
        if !(a.is_finite() && a > 0.0) {
            return Err(invalid(
                "ellipsoid.semi_major_axis",
                format!("{a} is not a positive length"),
            ));
        }

        let f = self.ellipsoid.flattening;
        if !(0.0..1.0).contains(&f) {
            return Err(invalid("ellipsoid.flattening", format!("{f} is outside [0, 1)")));
        }

        if !(self.tolerance.relative >= 0.0 && self.tolerance.absolute >= 0.0) {
            return Err(invalid("tolerance", "tolerances must be non-negative".to_string()));
        }

        Ok(())
    }
}

fn invalid(parameter: &str, reason: String) -> GeodesyError {
    GeodesyError::Config {
        parameter: parameter.to_string(),
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FLATTENING, SEMI_MAJOR_AXIS};

    #[test]
    fn test_default_config() {
        let config = GeodesyConfig::default();
        assert_eq!(config.ellipsoid.semi_major_axis, SEMI_MAJOR_AXIS);
        assert_eq!(config.ellipsoid.flattening, FLATTENING);
        assert!(config.geoid.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "geoid": { "path": "geoids/egm96-5.pgm" } }"#;
        let config = GeodesyConfig::from_json(json).unwrap();
        assert_eq!(config.geoid.path, Some(PathBuf::from("geoids/egm96-5.pgm")));
        assert_eq!(config.ellipsoid, Ellipsoid::DEFAULT);
        assert_eq!(config.tolerance, Tolerance::DEFAULT);
    }

    #[test]
    fn test_rejects_bad_flattening() {
        let err = GeodesyConfig::from_json(
            r#"{ "ellipsoid": { "semi_major_axis": 6378137.0, "flattening": 1.5 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GeodesyError::Config { ref parameter, .. } if parameter == "ellipsoid.flattening"
        ));
    }

    #[test]
    fn test_rejects_negative_axis() {
        let mut config = GeodesyConfig::default();
        config.ellipsoid.semi_major_axis = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GeodesyConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, GeodesyError::Serialization(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("geodesy.json");

        let mut config = GeodesyConfig::default();
        config.geoid.path = Some(PathBuf::from("/data/egm96-5.pgm"));
        config.tolerance.absolute = 1e-6;
        config.save_to_file(&path).unwrap();

        let loaded = GeodesyConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }
}

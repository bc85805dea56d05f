//! Error types for position and geoid operations

use std::path::PathBuf;

use thiserror::Error;

/// Result type for fallible geodesy operations
pub type Result<T> = std::result::Result<T, GeodesyError>;

/// Errors raised by the position abstraction, the geoid model and configuration
#[derive(Error, Debug)]
pub enum GeodesyError {
    /// An operation that needs at least one position received none
    #[error("{operation} requires at least one position")]
    EmptyInput { operation: &'static str },

    /// A vector that must be normalized has zero (or non-finite) length
    #[error("cannot normalize degenerate vector in {context}")]
    DegenerateVector { context: &'static str },

    /// Reading a data or configuration file failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The geoid grid is malformed
    #[error("invalid geoid grid: {detail}")]
    InvalidGeoid { detail: String },

    /// A geoid lookup was requested but no grid is loaded
    #[error("no geoid model is loaded")]
    GeoidUnavailable,

    /// Configuration could not be parsed or is out of range
    #[error("invalid configuration parameter '{parameter}': {reason}")]
    Config { parameter: String, reason: String },

    /// JSON (de)serialization failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GeodesyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GeodesyError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid_geoid(detail: impl Into<String>) -> Self {
        GeodesyError::InvalidGeoid {
            detail: detail.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = GeodesyError::EmptyInput {
            operation: "mean_position",
        };
        assert_eq!(err.to_string(), "mean_position requires at least one position");

        let err = GeodesyError::invalid_geoid("missing P5 magic");
        assert_eq!(err.to_string(), "invalid geoid grid: missing P5 magic");
    }

    #[test]
    fn test_io_error_keeps_source() {
        use std::error::Error as _;

        let err = GeodesyError::io(
            "geoids/egm96-5.pgm",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.to_string().contains("egm96-5.pgm"));
        assert!(err.source().is_some());
    }
}

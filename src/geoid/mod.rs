//! Geoid height lookup
//!
//! Geoid heights come from a global grid (the EGM96 5-arc-minute grid in
//! practice) interpolated with tensor-product cubic splines over a window of
//! grid nodes around the query point. The window is wide enough that the end
//! conditions of the local splines no longer move the result at the query
//! point, so it agrees with a spline through the whole grid.
//!
//! Sign convention: *add* the geoid height to a height above mean sea level
//! (AMSL) to get a height above the ellipsoid, and *subtract* it from an
//! ellipsoid height to get AMSL.

pub mod interpolation;
pub mod pgm;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::core::Lla;
use crate::validation::error::{GeodesyError, Result};
use interpolation::natural_cubic_spline;
pub use pgm::GeoidGrid;

/// Grid nodes taken on each side of the query point along each axis
const SPLINE_HALF_WINDOW: usize = 8;

/// Read-only geoid model, loaded once and shared freely between threads
#[derive(Debug, Clone)]
pub struct GeoidModel {
    grid: GeoidGrid,
    source: Option<PathBuf>,
}

impl GeoidModel {
    /// Load a PGM geoid grid from disk
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| GeodesyError::io(path, e))?;
        let grid = GeoidGrid::parse(&bytes)?;

        info!(
            path = %path.display(),
            width = grid.width(),
            height = grid.height(),
            resolution_deg = grid.resolution_deg(),
            description = grid.description().unwrap_or(""),
            "loaded geoid grid"
        );

        Ok(Self {
            grid,
            source: Some(path.to_path_buf()),
        })
    }

    /// Decode a geoid grid already held in memory
    pub fn from_pgm_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_grid(GeoidGrid::parse(bytes)?))
    }

    pub fn from_grid(grid: GeoidGrid) -> Self {
        Self { grid, source: None }
    }

    pub fn grid(&self) -> &GeoidGrid {
        &self.grid
    }

    /// File the grid was loaded from, if any
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Geoid height in meters above the ellipsoid at a geodetic position in degrees
    ///
    /// Latitude is clamped to [-90, 90]; longitude wraps.
    pub fn height(&self, latitude: f64, longitude: f64) -> f64 {
        let grid = &self.grid;
        let spacing = grid.resolution_deg();
        let window = 2 * SPLINE_HALF_WINDOW;

        let row_f = (90.0 - latitude.clamp(-90.0, 90.0)) / spacing;
        let column_f = longitude.rem_euclid(360.0) / spacing;

        // Rows stop at the poles, so the window slides to stay inside the grid
        let last_row = grid.height() - 1;
        let row = (row_f.floor() as usize).min(last_row - 1);
        let row_window = window.min(grid.height());
        let first_row = (row + 1)
            .saturating_sub(SPLINE_HALF_WINDOW)
            .min(grid.height() - row_window);

        // Columns wrap around the antimeridian
        let width = grid.width();
        let column = column_f.floor() as usize % width;
        let first_column = (column + 1 + width * SPLINE_HALF_WINDOW - SPLINE_HALF_WINDOW) % width;
        let column_t = column_f - column_f.floor() + (SPLINE_HALF_WINDOW - 1) as f64;

        let mut row_values = Vec::with_capacity(window);
        let along_row: Vec<f64> = (first_row..first_row + row_window)
            .map(|r| {
                row_values.clear();
                row_values.extend((0..window).map(|c| grid.node(r, first_column + c)));
                natural_cubic_spline(&row_values, column_t)
            })
            .collect();

        natural_cubic_spline(&along_row, row_f - first_row as f64)
    }

    /// Convert an ellipsoid altitude to height above mean sea level
    pub fn ellipsoid_to_amsl(&self, position: &Lla) -> Lla {
        let offset = self.height(position.latitude(), position.longitude());
        position.with_altitude(position.altitude() - offset)
    }

    /// Convert a height above mean sea level to ellipsoid altitude
    pub fn amsl_to_ellipsoid(&self, position: &Lla) -> Lla {
        let offset = self.height(position.latitude(), position.longitude());
        position.with_altitude(position.altitude() + offset)
    }
}

/// Geoid height in meters at `latitude`, `longitude` (degrees)
///
/// Add the result to an AMSL height to get an ellipsoid height; subtract it
/// from an ellipsoid height to get AMSL.
pub fn geoid_height(model: &GeoidModel, latitude: f64, longitude: f64) -> f64 {
    model.height(latitude, longitude)
}

//! Geodetic position conversions
//!
//! Converts between geodetic latitude/longitude/altitude ([`Lla`]), n-vectors
//! ([`Nvector`]) and Earth-centered Cartesian position vectors ([`Pvector`]),
//! and computes distances and local North-East-Down displacements between
//! positions of any representation. A geoid model reconciles ellipsoid heights
//! with heights above mean sea level.
//!
//! ```
//! use geoposition::{Lla, Position};
//!
//! let a = Lla::new(41.697987, -86.233922, 261.9);
//! let b = Lla::new(41.698811, -86.233933, 261.9).to_pvector();
//! assert!((a.distance(&b) - 91.44).abs() < 0.25);
//!
//! let moved = a.move_ned(100.0, 0.0, 0.0);
//! assert!(moved.latitude() > a.latitude());
//! ```

pub mod algorithms;
pub mod api;
pub mod core;
pub mod geoid;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use algorithms::mean_position;
pub use api::Geodesy;
pub use crate::core::{
    AngleUnit, Ellipsoid, GeoPosition, Lla, Nvector, Position, PositionKind, Pvector, Tolerance,
    SEMI_MAJOR_AXIS, SEMI_MINOR_AXIS,
};
pub use geoid::{geoid_height, GeoidGrid, GeoidModel};
pub use utils::GeodesyConfig;
pub use validation::{GeodesyError, Result};

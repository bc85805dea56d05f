//! Core position types, ellipsoid constants and n-vector primitives

pub mod constants;
pub mod geodesy;
pub mod position;
pub mod types;

pub use constants::*;
pub use position::{GeoPosition, Position, PositionKind};
pub use types::{AngleUnit, Lla, Nvector, Pvector};

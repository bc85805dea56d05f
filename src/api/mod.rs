//! Configured entry point for applications
//!
//! Most callers only need the free-standing position types; [`Geodesy`] adds
//! a configured ellipsoid, comparison tolerance and the loaded geoid model.

pub mod geodesy;

pub use geodesy::Geodesy;

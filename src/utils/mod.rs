//! Configuration loading

pub mod config;

pub use config::{GeodesyConfig, GeoidConfig};

//! Algorithms combining several positions

pub mod mean;

pub use mean::mean_position;

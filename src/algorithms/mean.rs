//! Mean of several positions

use nalgebra::Vector3;
use tracing::{debug, warn};

use crate::core::geodesy;
use crate::core::{Nvector, Position};
use crate::validation::error::{GeodesyError, Result};

/// Representative position of a group of positions
///
/// The horizontal part is the mean n-vector direction and the depth is the
/// arithmetic mean depth. The result uses the representation of the first
/// input; mix representations by passing [`crate::GeoPosition`] values.
pub fn mean_position<P: Position>(positions: &[P]) -> Result<P> {
    let first = positions.first().ok_or(GeodesyError::EmptyInput {
        operation: "mean_position",
    })?;
    debug!(count = positions.len(), "averaging positions");

    let nvectors: Vec<Nvector> = positions.iter().map(Position::to_nvector).collect();
    let directions: Vec<Vector3<f64>> = nvectors.iter().map(Nvector::xyz).collect();

    let n_em_e = match geodesy::mean_horizontal_position(&directions) {
        Some(n) => n,
        None => {
            warn!(count = positions.len(), "n-vectors cancel out, mean direction undefined");
            return Err(GeodesyError::DegenerateVector {
                context: "mean_position",
            });
        }
    };
    let mean_depth = nvectors.iter().map(Nvector::depth).sum::<f64>() / nvectors.len() as f64;

    Ok(first.coerce(&Nvector::from_vector(n_em_e, mean_depth)))
}

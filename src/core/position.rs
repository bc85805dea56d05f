//! The `Position` abstraction shared by every coordinate representation
//!
//! Any operation accepts any representation: the right-hand side is converted
//! to whatever frame the math needs and results come back in the caller's own
//! representation.

use std::fmt;

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use super::constants::Tolerance;
use super::geodesy;
use super::types::{Lla, Nvector, Pvector};

/// Which representation a position value uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionKind {
    Lla,
    Nvector,
    Pvector,
}

impl PositionKind {
    /// Express `other` in this representation
    pub fn coerce(self, other: &dyn Position) -> GeoPosition {
        match self {
            PositionKind::Lla => GeoPosition::Lla(other.to_lla()),
            PositionKind::Nvector => GeoPosition::Nvector(other.to_nvector()),
            PositionKind::Pvector => GeoPosition::Pvector(other.to_pvector()),
        }
    }
}

impl fmt::Display for PositionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PositionKind::Lla => "lla",
            PositionKind::Nvector => "nvector",
            PositionKind::Pvector => "pvector",
        };
        f.write_str(name)
    }
}

/// A point on or near the Earth in one of the supported representations
pub trait Position {
    /// The representation of this value
    fn kind(&self) -> PositionKind;

    fn to_lla(&self) -> Lla;

    fn to_nvector(&self) -> Nvector;

    fn to_pvector(&self) -> Pvector;

    /// Raw components in representation order
    ///
    /// Lla: `[lat, lon, alt]`, Nvector: `[x, y, z, depth]`, Pvector: `[x, y, z]`.
    fn as_array(&self) -> Vec<f64>;

    /// Express `other` in the same representation as `self`
    fn coerce(&self, other: &dyn Position) -> Self
    where
        Self: Sized;

    /// Component at `index` of [`Position::as_array`]
    fn get(&self, index: usize) -> Option<f64> {
        self.as_array().get(index).copied()
    }

    /// Straight-line distance in meters, measured between ECEF position vectors
    fn distance(&self, other: &dyn Position) -> f64 {
        (self.to_pvector() - other.to_pvector()).norm()
    }

    /// Rotation matrix from ECEF to the North-East-Down frame at this position
    ///
    /// Depends only on the direction of the n-vector, not on altitude.
    #[doc(alias = "n_E2R_EN")]
    fn n_e2r_en(&self) -> Matrix3<f64> {
        geodesy::n_e_to_r_en(&self.to_nvector().xyz())
    }

    /// Displace by local North-East-Down offsets in meters
    ///
    /// The offset is rotated into ECEF at this position and added to the position
    /// vector; no curvature correction is applied, so keep displacements small
    /// relative to the Earth radius.
    fn move_ned(&self, north: f64, east: f64, down: f64) -> Self
    where
        Self: Sized,
    {
        let p_ea_e = self.to_pvector().xyz();
        let p_delta_e = self.n_e2r_en() * Vector3::new(north, east, down);
        self.coerce(&Pvector::from(p_ea_e + p_delta_e))
    }

    /// Vector from `self` to `other` in the North-East-Down frame anchored at `self`
    fn distance_ned(&self, other: &dyn Position) -> Vector3<f64> {
        let r_ne = self.n_e2r_en().transpose();
        let p_ab_e = other.to_pvector() - self.to_pvector();
        r_ne * p_ab_e
    }

    /// Component-wise comparison after coercing `other` into this representation
    fn approx_eq(&self, other: &dyn Position, tolerance: Tolerance) -> bool
    where
        Self: Sized,
    {
        let lhs = self.as_array();
        let rhs = self.coerce(other).as_array();
        lhs.len() == rhs.len()
            && lhs
                .iter()
                .zip(&rhs)
                .all(|(a, b)| tolerance.is_close(*a, *b))
    }
}

/// Position of any representation, for mixed collections
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GeoPosition {
    Lla(Lla),
    Nvector(Nvector),
    Pvector(Pvector),
}

impl Position for GeoPosition {
    fn kind(&self) -> PositionKind {
        match self {
            GeoPosition::Lla(_) => PositionKind::Lla,
            GeoPosition::Nvector(_) => PositionKind::Nvector,
            GeoPosition::Pvector(_) => PositionKind::Pvector,
        }
    }

    fn to_lla(&self) -> Lla {
        match self {
            GeoPosition::Lla(p) => p.to_lla(),
            GeoPosition::Nvector(p) => p.to_lla(),
            GeoPosition::Pvector(p) => p.to_lla(),
        }
    }

    fn to_nvector(&self) -> Nvector {
        match self {
            GeoPosition::Lla(p) => p.to_nvector(),
            GeoPosition::Nvector(p) => p.to_nvector(),
            GeoPosition::Pvector(p) => p.to_nvector(),
        }
    }

    fn to_pvector(&self) -> Pvector {
        match self {
            GeoPosition::Lla(p) => p.to_pvector(),
            GeoPosition::Nvector(p) => p.to_pvector(),
            GeoPosition::Pvector(p) => p.to_pvector(),
        }
    }

    fn as_array(&self) -> Vec<f64> {
        match self {
            GeoPosition::Lla(p) => p.as_array(),
            GeoPosition::Nvector(p) => p.as_array(),
            GeoPosition::Pvector(p) => p.as_array(),
        }
    }

    fn coerce(&self, other: &dyn Position) -> Self {
        self.kind().coerce(other)
    }
}

impl From<Lla> for GeoPosition {
    fn from(p: Lla) -> Self {
        GeoPosition::Lla(p)
    }
}

impl From<Nvector> for GeoPosition {
    fn from(p: Nvector) -> Self {
        GeoPosition::Nvector(p)
    }
}

impl From<Pvector> for GeoPosition {
    fn from(p: Pvector) -> Self {
        GeoPosition::Pvector(p)
    }
}

/// Tolerant equality and comma-joined display for each position type
///
/// Components always print with a decimal point, so `0.0` stays `0.0`.
macro_rules! impl_position_traits {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<P: Position> PartialEq<P> for $ty {
                fn eq(&self, other: &P) -> bool {
                    self.approx_eq(other, Tolerance::DEFAULT)
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    let mut first = true;
                    for value in self.as_array() {
                        if !first {
                            f.write_str(",")?;
                        }
                        write!(f, "{value:?}")?;
                        first = false;
                    }
                    Ok(())
                }
            }
        )+
    };
}

impl_position_traits!(Lla, Nvector, Pvector, GeoPosition);

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn notre_dame() -> Lla {
        Lla::new(41.697987, -86.233922, 261.9)
    }

    #[test]
    fn test_coerce_matches_receiver_kind() {
        let lla = notre_dame();
        let pvec = lla.to_pvector();

        let coerced = lla.coerce(&pvec);
        assert_eq!(coerced.kind(), PositionKind::Lla);
        assert_eq!(coerced, lla);

        let mixed = GeoPosition::from(pvec).coerce(&lla);
        assert_eq!(mixed.kind(), PositionKind::Pvector);
        assert!(matches!(mixed, GeoPosition::Pvector(_)));
    }

    #[test]
    fn test_kind_coerce_is_exhaustive() {
        let nvec = notre_dame().to_nvector();
        for kind in [PositionKind::Lla, PositionKind::Nvector, PositionKind::Pvector] {
            let coerced = kind.coerce(&nvec);
            assert_eq!(coerced.kind(), kind);
            assert_eq!(coerced, nvec);
        }
    }

    #[test]
    fn test_equality_across_kinds() {
        let lla = notre_dame();
        assert_eq!(lla, lla.to_nvector());
        assert_eq!(lla, lla.to_pvector());
        assert_eq!(lla.to_pvector(), lla);
        assert_eq!(GeoPosition::from(lla), lla.to_nvector());

        let elsewhere = Lla::new(41.8, -86.233922, 261.9);
        assert_ne!(lla, elsewhere);
        assert_ne!(lla.to_nvector(), elsewhere);
    }

    #[test]
    fn test_display_joins_components() {
        assert_eq!(Lla::new(0.0, 90.5, -3.25).to_string(), "0.0,90.5,-3.25");
        assert_eq!(Nvector::new(0.0, 1.0, 0.0, 2.0).to_string(), "0.0,1.0,0.0,2.0");
        assert_eq!(
            GeoPosition::from(Pvector::new(1.0, 2.0, 3.0)).to_string(),
            "1.0,2.0,3.0"
        );
    }

    #[test]
    fn test_get_indexes_components() {
        let nvec = Nvector::new(0.0, 1.0, 0.0, -7.0);
        assert_eq!(nvec.get(3), Some(-7.0));
        assert_eq!(nvec.get(4), None);
        assert_eq!(Lla::new(1.0, 2.0, 3.0).get(1), Some(2.0));
    }

    #[test]
    fn test_distance_across_kinds() {
        let a = notre_dame();
        let b = Lla::new(41.698811, -86.233933, 261.9);

        for d in [
            a.distance(&b),
            a.to_nvector().distance(&b),
            a.to_nvector().distance(&b.to_pvector()),
        ] {
            assert!((d - 91.44).abs() < 0.25, "distance was {d}");
        }
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&a.to_pvector()), 0.0);
    }

    #[test]
    fn test_n_e2r_en_ignores_altitude() {
        let low = Lla::new(12.0, 34.0, 0.0);
        let high = Lla::new(12.0, 34.0, 9000.0);
        assert_relative_eq!(low.n_e2r_en(), high.n_e2r_en(), epsilon = 1e-15);
    }

    #[test]
    fn test_move_ned_keeps_kind() {
        let origin = notre_dame();
        let moved = origin.move_ned(10.0, 0.0, 0.0);
        assert!(moved.latitude() > origin.latitude());

        let moved = GeoPosition::from(origin.to_nvector()).move_ned(0.0, 10.0, 0.0);
        assert_eq!(moved.kind(), PositionKind::Nvector);
        assert!(moved.to_lla().longitude() > origin.longitude());
    }

    #[test]
    fn test_move_ned_down_lowers_altitude() {
        let origin = Lla::new(-33.9, 151.2, 50.0);
        let moved = origin.move_ned(0.0, 0.0, 20.0);
        assert!((moved.altitude() - 30.0).abs() < 1e-6);
        assert!((moved.latitude() - origin.latitude()).abs() < 1e-9);
    }

    #[test]
    fn test_distance_ned_recovers_offset() {
        let origin = notre_dame().to_pvector();
        let target = origin.move_ned(30.0, -40.0, 5.0);
        let ned = origin.distance_ned(&target);
        assert_relative_eq!(ned, Vector3::new(30.0, -40.0, 5.0), epsilon = 1e-6);
        assert_relative_eq!(ned.norm(), origin.distance(&target), epsilon = 1e-9);
    }

    #[test]
    fn test_distance_ned_is_anchored_at_self() {
        let a = Lla::new(10.0, 20.0, 0.0);
        let b = Lla::new(10.5, 20.5, 0.0);
        let ab = a.distance_ned(&b);
        let ba = b.distance_ned(&a);
        // Same length, but frames differ so the vectors are not simple negations
        assert_relative_eq!(ab.norm(), ba.norm(), epsilon = 1e-6);
        assert!((ab + ba).norm() > 1.0);
        assert!(ab.x > 0.0 && ab.y > 0.0);
    }

    #[test]
    fn test_trait_object_usage() {
        let positions: Vec<Box<dyn Position>> = vec![
            Box::new(notre_dame()),
            Box::new(notre_dame().to_nvector()),
            Box::new(notre_dame().to_pvector()),
        ];
        let kinds: Vec<PositionKind> = positions.iter().map(|p| p.kind()).collect();
        assert_eq!(
            kinds,
            vec![PositionKind::Lla, PositionKind::Nvector, PositionKind::Pvector]
        );
        for p in &positions {
            assert!(p.distance(positions[0].as_ref()) < 1e-6);
        }
    }

    #[test]
    fn test_serde_tagged_representation() {
        let pos = GeoPosition::from(Lla::new(1.0, 2.0, 3.0));
        let json = serde_json::to_string(&pos).unwrap();
        assert!(json.contains("\"kind\":\"lla\""));

        let back: GeoPosition = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), PositionKind::Lla);
        assert_eq!(back, pos);
    }
}

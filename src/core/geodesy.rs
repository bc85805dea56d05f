//! n-vector geodesy primitives
//!
//! Free functions converting between geodetic latitude/longitude, the n-vector
//! (surface normal unit vector) and Earth-centered Earth-fixed position vectors.
//! ECEF axes: z through the north pole, x through latitude 0° longitude 0°.
//!
//! The closed-form position-to-n-vector inversion follows Gade (2010),
//! "A Non-singular Horizontal Position Representation", equation 23.

use nalgebra::{Matrix3, Vector3};

use super::constants::Ellipsoid;

/// Normalize a vector, returning `None` when it has no usable direction
pub fn unit(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }
    Some(v / norm)
}

/// Geodetic latitude/longitude (radians) to n-vector
pub fn lat_lon_to_n_e(latitude: f64, longitude: f64) -> Vector3<f64> {
    let (sin_lat, cos_lat) = latitude.sin_cos();
    let (sin_lon, cos_lon) = longitude.sin_cos();
    Vector3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// n-vector to geodetic latitude/longitude (radians)
///
/// Uses `atan2` for both angles so the result stays accurate at the poles.
pub fn n_e_to_lat_lon(n_e: &Vector3<f64>) -> (f64, f64) {
    let equatorial = (n_e.x * n_e.x + n_e.y * n_e.y).sqrt();
    let latitude = n_e.z.atan2(equatorial);
    let longitude = n_e.y.atan2(n_e.x);
    (latitude, longitude)
}

/// n-vector plus depth to ECEF position vector (meters)
///
/// `n_eb_e` is normalized first. Positive depth is below the ellipsoid surface.
pub fn n_eb_e_to_p_eb_e(n_eb_e: &Vector3<f64>, depth: f64, ellipsoid: &Ellipsoid) -> Vector3<f64> {
    let n = unit(n_eb_e).unwrap_or(*n_eb_e);
    let a = ellipsoid.semi_major_axis;
    let b_over_a = 1.0 - ellipsoid.flattening;
    let polar_scale = b_over_a * b_over_a;

    // Prime vertical radius of curvature expressed through the n-vector
    let radius = a / (n.x * n.x + n.y * n.y + polar_scale * n.z * n.z).sqrt();

    let surface = Vector3::new(radius * n.x, radius * n.y, radius * polar_scale * n.z);
    surface - n * depth
}

/// ECEF position vector to n-vector and depth
pub fn p_eb_e_to_n_eb_e(p_eb_e: &Vector3<f64>, ellipsoid: &Ellipsoid) -> (Vector3<f64>, f64) {
    let a = ellipsoid.semi_major_axis;
    let e2 = ellipsoid.eccentricity_squared();
    let (x, y, z) = (p_eb_e.x, p_eb_e.y, p_eb_e.z);

    let r2 = x * x + y * y;
    let r = r2.sqrt();

    let p = r2 / (a * a);
    let q = (1.0 - e2) / (a * a) * z * z;
    let r6 = (p + q - e2 * e2) / 6.0;
    let s = e2 * e2 * p * q / (4.0 * r6 * r6 * r6);
    let t = (1.0 + s + (s * (2.0 + s)).sqrt()).cbrt();
    let u = r6 * (1.0 + t + 1.0 / t);
    let v = (u * u + q * e2 * e2).sqrt();
    let w = e2 * (u + v - q) / (2.0 * v);
    let k = (u + v + w * w).sqrt() - w;
    let d = k * r / (k + e2);

    let hypot = (d * d + z * z).sqrt();
    let height = (k + e2 - 1.0) / k * hypot;

    let z_scale = 1.0 / hypot;
    let xy_scale = z_scale * k / (k + e2);
    let n_eb_e = Vector3::new(xy_scale * x, xy_scale * y, z_scale * z);

    (n_eb_e, -height)
}

/// Rotation matrix from ECEF to the local North-East-Down frame
///
/// Columns are the north, east and down unit vectors expressed in ECEF.
/// At the poles east is taken along the ECEF y axis.
pub fn n_e_to_r_en(n_e: &Vector3<f64>) -> Matrix3<f64> {
    let n = unit(n_e).unwrap_or(*n_e);
    let down = -n;

    let east_direction = Vector3::z().cross(&n);
    let east = if east_direction.norm() == 0.0 {
        Vector3::y()
    } else {
        east_direction.normalize()
    };

    let north = east.cross(&down);
    Matrix3::from_columns(&[north, east, down])
}

/// Horizontal mean of several n-vectors
///
/// The normalized vector sum, which is the mean direction on the unit sphere.
/// Returns `None` for an empty slice or when the vectors cancel out.
pub fn mean_horizontal_position(n_vectors: &[Vector3<f64>]) -> Option<Vector3<f64>> {
    if n_vectors.is_empty() {
        return None;
    }
    let sum: Vector3<f64> = n_vectors.iter().sum();
    if sum.norm() < 1e-12 * n_vectors.len() as f64 {
        return None;
    }
    unit(&sum)
}

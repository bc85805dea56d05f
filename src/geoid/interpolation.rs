//! Cubic spline interpolation on uniformly spaced samples

/// Natural cubic spline through `values` (unit spacing) evaluated at `t`
///
/// `t` is a fractional index into `values`; it is clamped to the sampled
/// range. Needs at least two samples.
pub(crate) fn natural_cubic_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len();
    debug_assert!(n >= 2, "spline needs at least two samples");
    if n == 2 {
        let s = t.clamp(0.0, 1.0);
        return values[0] + s * (values[1] - values[0]);
    }

    let moments = second_derivatives(values);

    let t = t.clamp(0.0, (n - 1) as f64);
    let k = (t.floor() as usize).min(n - 2);
    let s = t - k as f64;
    let r = 1.0 - s;

    r * values[k]
        + s * values[k + 1]
        + ((r * r * r - r) * moments[k] + (s * s * s - s) * moments[k + 1]) / 6.0
}

/// Second derivatives of the natural spline, zero at both ends
///
/// Solves `M[i-1] + 4 M[i] + M[i+1] = 6 (y[i+1] - 2 y[i] + y[i-1])` with the
/// Thomas algorithm.
fn second_derivatives(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut moments = vec![0.0; n];
    let interior = n - 2;

    let mut diag = vec![4.0; interior];
    let mut rhs: Vec<f64> = (1..n - 1)
        .map(|i| 6.0 * (values[i + 1] - 2.0 * values[i] + values[i - 1]))
        .collect();

    for i in 1..interior {
        let w = 1.0 / diag[i - 1];
        diag[i] -= w;
        rhs[i] -= w * rhs[i - 1];
    }

    let mut next = 0.0;
    for i in (0..interior).rev() {
        let m = (rhs[i] - next) / diag[i];
        moments[i + 1] = m;
        next = m;
    }
    moments
}

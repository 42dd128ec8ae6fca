//! Scalar utilities shared by every type in the crate.

/// Tolerance used by every approximate comparison.
pub const EPSILON: f64 = 1e-6;

/// Approximate equality with [`EPSILON`].
///
/// Absolute for magnitudes up to 1, relative above that:
/// `|a - b| <= EPSILON * max(1, |a|, |b|)`.
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

/// Approximate equality with an explicit tolerance.
///
/// Infinities only compare equal to themselves.
#[inline]
pub fn approx_eq_eps(a: f64, b: f64, epsilon: f64) -> bool {
    if a == b {
        return true;
    }
    let diff = (a - b).abs();
    diff.is_finite() && diff <= epsilon * 1.0f64.max(a.abs()).max(b.abs())
}

/// Degrees to radians.
#[inline]
pub fn to_radian(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Radians to degrees.
#[inline]
pub fn to_degree(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Reciprocal of a determinant, or `None` when inversion must fall back to identity.
///
/// Every determinant that is not strictly positive takes the fallback,
/// including reflections with a valid negative determinant.
pub(crate) fn inverse_determinant(det: f64, kind: &'static str) -> Option<f64> {
    if det <= 0.0 {
        tracing::debug!(det, kind, "non-positive determinant, inverse falls back to identity");
        return None;
    }
    Some(1.0 / det)
}

/// Reciprocal of a determinant for the checked inverse; only exact zero is rejected.
pub(crate) fn checked_inverse_determinant(det: f64) -> Option<f64> {
    if det == 0.0 {
        return None;
    }
    Some(1.0 / det)
}

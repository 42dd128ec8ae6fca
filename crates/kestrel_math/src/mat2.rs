//! 2x2 matrix (column-major)

use crate::components::{impl_components, impl_matrix_ops};
use crate::scalar::{checked_inverse_determinant, inverse_determinant};
use crate::Vec2;

/// 2x2 linear map on [`Vec2`]
///
/// Elements are column-major `[m00, m01, m10, m11]`:
/// ```text
/// | e0  e2 |
/// | e1  e3 |
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat2 {
    pub elements: [f64; 4],
}

impl_components!(Mat2, 4);
impl_matrix_ops!(Mat2);

impl Default for Mat2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat2 {
    pub const IDENTITY: Mat2 = Mat2 {
        elements: [1.0, 0.0, 0.0, 1.0],
    };

    pub const fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self {
            elements: [m00, m01, m10, m11],
        }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_rotation(rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self::new(c, s, -s, c)
    }

    pub fn from_scaling(v: Vec2) -> Self {
        Self::new(v.x, 0.0, 0.0, v.y)
    }

    pub fn transpose(self) -> Self {
        let [a0, a1, a2, a3] = self.elements;
        Self::new(a0, a2, a1, a3)
    }

    pub fn determinant(&self) -> f64 {
        let [a0, a1, a2, a3] = self.elements;
        a0 * a3 - a2 * a1
    }

    pub fn adjoint(self) -> Self {
        let [a0, a1, a2, a3] = self.elements;
        Self::new(a3, -a1, -a2, a0)
    }

    /// Inverse matrix.
    ///
    /// Any determinant that is not strictly positive returns the identity,
    /// so reflections (negative determinant) are not inverted.
    pub fn invert(self) -> Self {
        match inverse_determinant(self.determinant(), "Mat2") {
            Some(inv_det) => self.adjoint().multiply_scalar(inv_det),
            None => Self::IDENTITY,
        }
    }

    /// Inverse matrix, or `None` when the determinant is exactly zero.
    pub fn checked_invert(self) -> Option<Self> {
        checked_inverse_determinant(self.determinant())
            .map(|inv_det| self.adjoint().multiply_scalar(inv_det))
    }

    /// Composes two transforms: the result applies `self` first, then `other`.
    ///
    /// In column-vector notation this is `other · self`.
    pub fn multiply(self, other: Mat2) -> Self {
        Self::product(&other, &self)
    }

    /// Rotates by `rad` radians before applying `self`.
    pub fn rotate(self, rad: f64) -> Self {
        Self::product(&self, &Self::from_rotation(rad))
    }

    /// Scales by `v` before applying `self`.
    pub fn scale(self, v: Vec2) -> Self {
        Self::product(&self, &Self::from_scaling(v))
    }

    /// Frobenius norm.
    pub fn frob(&self) -> f64 {
        self.elements.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Factors `self` into unit lower-triangular `L`, diagonal `D` and unit
    /// upper-triangular `U` with `self = L · D · U`.
    ///
    /// Returns `None` when the leading element is zero.
    pub fn ldu(&self) -> Option<(Mat2, Mat2, Mat2)> {
        let [a, b, c, d] = self.elements;
        if a == 0.0 {
            return None;
        }
        let l = Mat2::new(1.0, b / a, 0.0, 1.0);
        let diag = Mat2::new(a, 0.0, 0.0, d - b * c / a);
        let u = Mat2::new(1.0, 0.0, c / a, 1.0);
        Some((l, diag, u))
    }

    /// `a · b` in column-vector notation.
    fn product(a: &Mat2, b: &Mat2) -> Mat2 {
        let [a0, a1, a2, a3] = a.elements;
        let [b0, b1, b2, b3] = b.elements;
        Mat2::new(
            a0 * b0 + a2 * b1,
            a1 * b0 + a3 * b1,
            a0 * b2 + a2 * b3,
            a1 * b2 + a3 * b3,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Components;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_multiply_order() {
        let a = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let b = Mat2::new(3.0, 0.0, 1.0, 2.0);
        assert_eq!(a * b, Mat2::new(5.0, 4.0, 13.0, 8.0));
        assert_eq!(a.multiply(b), a * b);
    }

    #[test]
    fn test_multiply_applies_self_first() {
        let a = Mat2::new(1.0, 2.0, 3.0, 4.0);
        let b = Mat2::new(3.0, 0.0, 1.0, 2.0);
        let v = Vec2::new(0.5, -1.5);
        let composed = v.transform_mat2(&a.multiply(b));
        let stepwise = v.transform_mat2(&a).transform_mat2(&b);
        assert!(composed.equals(&stepwise));
    }

    #[test]
    fn test_identity_law() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m * Mat2::IDENTITY, m);
        assert_eq!(Mat2::IDENTITY * m, m);
        assert_eq!(Mat2::default(), Mat2::identity());
    }

    #[test]
    fn test_transpose_involution() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.transpose(), Mat2::new(1.0, 3.0, 2.0, 4.0));
        assert!(m.transpose().transpose().exact_equals(&m));
    }

    #[test]
    fn test_determinant_and_adjoint() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.determinant(), -2.0);
        assert_eq!(m.adjoint(), Mat2::new(4.0, -2.0, -3.0, 1.0));
    }

    #[test]
    fn test_invert_positive_determinant() {
        let m = Mat2::new(4.0, 1.0, 2.0, 3.0);
        assert_eq!(m.determinant(), 10.0);
        assert!((m * m.invert()).equals(&Mat2::IDENTITY));
        assert!((m.invert() * m).equals(&Mat2::IDENTITY));
    }

    #[test]
    fn test_invert_negative_determinant_returns_identity() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(m.invert(), Mat2::IDENTITY);
        let reflection = Mat2::from_scaling(Vec2::new(-1.0, 1.0));
        assert_eq!(reflection.invert(), Mat2::IDENTITY);

        let inv = m.checked_invert().unwrap();
        assert!((m * inv).equals(&Mat2::IDENTITY));
        assert_eq!(Mat2::new(1.0, 2.0, 2.0, 4.0).checked_invert(), None);
    }

    #[test]
    fn test_rotate_and_scale() {
        let r = Mat2::IDENTITY.rotate(FRAC_PI_2);
        assert!(r.equals(&Mat2::from_rotation(FRAC_PI_2)));
        assert!(Vec2::X.transform_mat2(&r).equals(&Vec2::Y));

        let m = Mat2::new(1.0, 2.0, 3.0, 4.0).scale(Vec2::new(2.0, 3.0));
        assert_eq!(m, Mat2::new(2.0, 4.0, 9.0, 12.0));
    }

    #[test]
    fn test_frob_and_scalar_ops() {
        let m = Mat2::new(1.0, 2.0, 3.0, 4.0);
        assert!((m.frob() - 30.0f64.sqrt()).abs() < 1e-12);
        assert_eq!(m * 2.0, Mat2::new(2.0, 4.0, 6.0, 8.0));
        assert_eq!(m.multiply_scalar_and_add(m, 0.5), Mat2::new(1.5, 3.0, 4.5, 6.0));
        assert_eq!(m + m - m, m);
    }

    #[test]
    fn test_ldu_reconstructs() {
        let m = Mat2::new(4.0, 3.0, 6.0, 3.0);
        let (l, d, u) = m.ldu().unwrap();
        // L · D · U
        assert!(u.multiply(d).multiply(l).equals(&m));
        assert_eq!(Mat2::new(0.0, 1.0, 1.0, 0.0).ldu(), None);
    }
}

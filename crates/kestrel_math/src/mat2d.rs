//! 2D affine transformation (2x3)

use crate::components::{impl_components, impl_matrix_ops};
use crate::scalar::{checked_inverse_determinant, inverse_determinant};
use crate::Vec2;

/// 2D affine transformation
///
/// Elements `[a, b, c, d, tx, ty]` with an implicit third row:
/// ```text
/// | a  c  tx |
/// | b  d  ty |
/// | 0  0   1 |
/// ```
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat2d {
    pub elements: [f64; 6],
}

impl_components!(Mat2d, 6);
impl_matrix_ops!(Mat2d);

impl Default for Mat2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat2d {
    pub const IDENTITY: Mat2d = Mat2d {
        elements: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    pub const fn new(a: f64, b: f64, c: f64, d: f64, tx: f64, ty: f64) -> Self {
        Self {
            elements: [a, b, c, d, tx, ty],
        }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn from_translation(v: Vec2) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, v.x, v.y)
    }

    pub fn from_scaling(v: Vec2) -> Self {
        Self::new(v.x, 0.0, 0.0, v.y, 0.0, 0.0)
    }

    pub fn from_rotation(rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self::new(c, s, -s, c, 0.0, 0.0)
    }

    /// Determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        let [a, b, c, d, _, _] = self.elements;
        a * d - b * c
    }

    /// Inverse transform.
    ///
    /// Any determinant that is not strictly positive returns the identity.
    pub fn invert(self) -> Self {
        match inverse_determinant(self.determinant(), "Mat2d") {
            Some(inv_det) => self.inverse_with(inv_det),
            None => Self::IDENTITY,
        }
    }

    /// Inverse transform, or `None` when the determinant is exactly zero.
    pub fn checked_invert(self) -> Option<Self> {
        checked_inverse_determinant(self.determinant()).map(|inv_det| self.inverse_with(inv_det))
    }

    /// Composes two transforms: the result applies `self` first, then `other`.
    pub fn multiply(self, other: Mat2d) -> Self {
        Self::product(&other, &self)
    }

    /// Translates by `v` before applying `self`.
    pub fn translate(self, v: Vec2) -> Self {
        Self::product(&self, &Self::from_translation(v))
    }

    /// Rotates by `rad` radians before applying `self`.
    pub fn rotate(self, rad: f64) -> Self {
        Self::product(&self, &Self::from_rotation(rad))
    }

    /// Scales by `v` before applying `self`.
    pub fn scale(self, v: Vec2) -> Self {
        Self::product(&self, &Self::from_scaling(v))
    }

    /// Frobenius norm of the full 3x3 form, implicit row included.
    pub fn frob(&self) -> f64 {
        (self.elements.iter().map(|v| v * v).sum::<f64>() + 1.0).sqrt()
    }

    fn inverse_with(self, inv_det: f64) -> Self {
        let [a, b, c, d, tx, ty] = self.elements;
        Self::new(
            d * inv_det,
            -b * inv_det,
            -c * inv_det,
            a * inv_det,
            (c * ty - d * tx) * inv_det,
            (b * tx - a * ty) * inv_det,
        )
    }

    /// `a · b` in column-vector notation.
    fn product(a: &Mat2d, b: &Mat2d) -> Mat2d {
        let [a1, b1, c1, d1, tx1, ty1] = a.elements;
        let [a2, b2, c2, d2, tx2, ty2] = b.elements;

        Mat2d::new(
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * tx2 + c1 * ty2 + tx1,
            b1 * tx2 + d1 * ty2 + ty1,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Components;
    use std::f64::consts::FRAC_PI_2;

    fn sample() -> Mat2d {
        Mat2d::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0)
    }

    #[test]
    fn test_multiply_applies_self_first() {
        let a = Mat2d::from_rotation(FRAC_PI_2);
        let b = Mat2d::from_translation(Vec2::new(10.0, 0.0));
        let p = Vec2::new(1.0, 0.0);
        // rotate to (0, 1), then translate
        assert!(p.transform_mat2d(&(a * b)).equals(&Vec2::new(10.0, 1.0)));
        // translate to (11, 0), then rotate
        assert!(p.transform_mat2d(&(b * a)).equals(&Vec2::new(0.0, 11.0)));
    }

    #[test]
    fn test_identity_law() {
        let m = sample();
        assert_eq!(m * Mat2d::IDENTITY, m);
        assert_eq!(Mat2d::IDENTITY * m, m);
    }

    #[test]
    fn test_determinant_uses_linear_part() {
        assert_eq!(sample().determinant(), -2.0);
        assert_eq!(Mat2d::from_translation(Vec2::new(9.0, 9.0)).determinant(), 1.0);
    }

    #[test]
    fn test_invert() {
        let m = Mat2d::from_rotation(0.3)
            .multiply(Mat2d::from_scaling(Vec2::new(2.0, 0.5)))
            .multiply(Mat2d::from_translation(Vec2::new(3.0, -4.0)));
        assert!(m.determinant() > 0.0);
        assert!((m * m.invert()).equals(&Mat2d::IDENTITY));

        let p = Vec2::new(7.0, -2.0);
        assert!(p.transform_mat2d(&m).transform_mat2d(&m.invert()).equals(&p));
    }

    #[test]
    fn test_invert_negative_determinant_returns_identity() {
        assert_eq!(sample().invert(), Mat2d::IDENTITY);
        let inv = sample().checked_invert().unwrap();
        assert!((sample() * inv).equals(&Mat2d::IDENTITY));
    }

    #[test]
    fn test_translate_rotate_scale() {
        let m = sample().translate(Vec2::new(2.0, 3.0));
        assert_eq!(m, Mat2d::new(1.0, 2.0, 3.0, 4.0, 16.0, 22.0));

        let m = sample().scale(Vec2::new(2.0, 3.0));
        assert_eq!(m, Mat2d::new(2.0, 4.0, 9.0, 12.0, 5.0, 6.0));

        let m = Mat2d::IDENTITY.rotate(FRAC_PI_2);
        assert!(m.equals(&Mat2d::from_rotation(FRAC_PI_2)));
    }

    #[test]
    fn test_frob_includes_implicit_one() {
        assert!((sample().frob() - 92.0f64.sqrt()).abs() < 1e-12);
        assert!((Mat2d::IDENTITY.frob() - 3.0f64.sqrt()).abs() < 1e-12);
    }
}

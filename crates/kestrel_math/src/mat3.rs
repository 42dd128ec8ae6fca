//! 3x3 matrix (column-major)
//!
//! Used both as a linear map on [`Vec3`] (rotation blocks, normal matrices)
//! and as a homogeneous 2D transform built from [`Mat2d`].

use crate::components::{impl_components, impl_matrix_ops};
use crate::scalar::{checked_inverse_determinant, inverse_determinant};
use crate::{Mat2d, Mat4, Quat, Vec2};

/// 3x3 matrix, column-major: element `3 * column + row`
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat3 {
    pub elements: [f64; 9],
}

impl_components!(Mat3, 9);
impl_matrix_ops!(Mat3);

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3 {
        elements: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Upper-left 3x3 block of a 4x4 matrix.
    pub fn from_mat4(m: &Mat4) -> Self {
        let e = &m.elements;
        Self::from([e[0], e[1], e[2], e[4], e[5], e[6], e[8], e[9], e[10]])
    }

    /// Homogeneous form of a 2D affine transform.
    pub fn from_mat2d(m: &Mat2d) -> Self {
        let [a, b, c, d, tx, ty] = m.elements;
        Self::from([a, b, 0.0, c, d, 0.0, tx, ty, 1.0])
    }

    /// Rotation matrix of a unit quaternion.
    pub fn from_quat(q: &Quat) -> Self {
        let Quat { x, y, z, w } = *q;
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;

        let xx = x * x2;
        let yx = y * x2;
        let yy = y * y2;
        let zx = z * x2;
        let zy = z * y2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Self::from([
            1.0 - yy - zz, yx + wz, zx - wy, //
            yx - wz, 1.0 - xx - zz, zy + wx, //
            zx + wy, zy - wx, 1.0 - xx - yy,
        ])
    }

    /// 2D homogeneous translation.
    pub fn from_translation(v: Vec2) -> Self {
        Self::from([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, v.x, v.y, 1.0])
    }

    /// 2D homogeneous rotation.
    pub fn from_rotation(rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from([c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0])
    }

    /// 2D homogeneous scaling.
    pub fn from_scaling(v: Vec2) -> Self {
        Self::from([v.x, 0.0, 0.0, 0.0, v.y, 0.0, 0.0, 0.0, 1.0])
    }

    /// Inverse-transpose of the upper-left 3x3 of `m`, for transforming normals.
    ///
    /// Follows the same fallback as [`Mat4::invert`]: identity when the
    /// determinant is not strictly positive.
    pub fn normal_from_mat4(m: &Mat4) -> Self {
        match inverse_determinant(m.determinant(), "normal matrix") {
            Some(inv_det) => Self::from_mat4(&m.adjoint().multiply_scalar(inv_det)).transpose(),
            None => Self::IDENTITY,
        }
    }

    /// 2D projection mapping a `width` x `height` pixel area onto clip space
    /// with Y pointing down.
    pub fn projection(width: f64, height: f64) -> Self {
        Self::from([
            2.0 / width, 0.0, 0.0, //
            0.0, -2.0 / height, 0.0, //
            -1.0, 1.0, 1.0,
        ])
    }

    pub fn transpose(self) -> Self {
        let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = self.elements;
        Self::from([a00, a10, a20, a01, a11, a21, a02, a12, a22])
    }

    pub fn determinant(&self) -> f64 {
        let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = self.elements;
        a00 * (a22 * a11 - a12 * a21)
            + a01 * (-a22 * a10 + a12 * a20)
            + a02 * (a21 * a10 - a11 * a20)
    }

    /// Transposed cofactor matrix.
    pub fn adjoint(self) -> Self {
        let [a00, a01, a02, a10, a11, a12, a20, a21, a22] = self.elements;
        Self::from([
            a11 * a22 - a12 * a21,
            a02 * a21 - a01 * a22,
            a01 * a12 - a02 * a11,
            a12 * a20 - a10 * a22,
            a00 * a22 - a02 * a20,
            a02 * a10 - a00 * a12,
            a10 * a21 - a11 * a20,
            a01 * a20 - a00 * a21,
            a00 * a11 - a01 * a10,
        ])
    }

    /// Inverse matrix.
    ///
    /// Any determinant that is not strictly positive returns the identity.
    pub fn invert(self) -> Self {
        match inverse_determinant(self.determinant(), "Mat3") {
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
    pub fn multiply(self, other: Mat3) -> Self {
        Self::product(&other, &self)
    }

    /// 2D homogeneous translation applied before `self`.
    pub fn translate(self, v: Vec2) -> Self {
        Self::product(&self, &Self::from_translation(v))
    }

    /// 2D homogeneous rotation applied before `self`.
    pub fn rotate(self, rad: f64) -> Self {
        Self::product(&self, &Self::from_rotation(rad))
    }

    /// 2D homogeneous scaling applied before `self`.
    pub fn scale(self, v: Vec2) -> Self {
        Self::product(&self, &Self::from_scaling(v))
    }

    /// Frobenius norm.
    pub fn frob(&self) -> f64 {
        self.elements.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// `a · b` in column-vector notation.
    fn product(a: &Mat3, b: &Mat3) -> Mat3 {
        let mut out = [0.0; 9];
        for col in 0..3 {
            for row in 0..3 {
                out[col * 3 + row] = (0..3)
                    .map(|k| a.elements[k * 3 + row] * b.elements[col * 3 + k])
                    .sum();
            }
        }
        Mat3::from(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Components, Vec3};
    use std::f64::consts::FRAC_PI_2;

    fn sample() -> Mat3 {
        // det = 1
        Mat3::from([1.0, 2.0, 3.0, 0.0, 1.0, 4.0, 5.0, 6.0, 0.0])
    }

    #[test]
    fn test_identity_law() {
        let m = sample();
        assert_eq!(m * Mat3::IDENTITY, m);
        assert_eq!(Mat3::IDENTITY * m, m);
    }

    #[test]
    fn test_multiply_applies_self_first() {
        let a = Mat3::from_quat(&Quat::from_axis_angle(Vec3::Z, FRAC_PI_2));
        let b = Mat3::from_quat(&Quat::from_axis_angle(Vec3::X, FRAC_PI_2));
        let v = Vec3::Y;
        let composed = v.transform_mat3(&a.multiply(b));
        assert!(composed.equals(&v.transform_mat3(&a).transform_mat3(&b)));
    }

    #[test]
    fn test_determinant_and_inverse() {
        let m = sample();
        assert!((m.determinant() - 1.0).abs() < 1e-12);
        assert!((m * m.invert()).equals(&Mat3::IDENTITY));
        assert!((m.invert() * m).equals(&Mat3::IDENTITY));
        assert!(m.adjoint().equals(&m.invert()));
        assert_eq!(m.invert()[0], -24.0);
    }

    #[test]
    fn test_invert_negative_determinant_returns_identity() {
        let m = sample().transpose().multiply(Mat3::from_scaling(Vec2::new(-1.0, 1.0)));
        assert!(m.determinant() < 0.0);
        assert_eq!(m.invert(), Mat3::IDENTITY);
        assert!((m * m.checked_invert().unwrap()).equals(&Mat3::IDENTITY));
    }

    #[test]
    fn test_transpose_involution() {
        let m = sample();
        assert!(m.transpose().transpose().exact_equals(&m));
        assert_eq!(m.transpose()[1], m[3]);
    }

    #[test]
    fn test_from_mat4_and_mat2d() {
        let m4 = Mat4::from_rotation_translation(
            &Quat::from_axis_angle(Vec3::Y, 0.4),
            Vec3::new(1.0, 2.0, 3.0),
        );
        let m3 = Mat3::from_mat4(&m4);
        assert!(m3.equals(&Mat3::from_quat(&Quat::from_axis_angle(Vec3::Y, 0.4))));

        let affine = Mat2d::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0);
        let m3 = Mat3::from_mat2d(&affine);
        let p = Vec2::new(-1.0, 0.5);
        assert!(p.transform_mat3(&m3).equals(&p.transform_mat2d(&affine)));
    }

    #[test]
    fn test_2d_homogeneous_ops_match_mat2d() {
        let m = Mat3::IDENTITY
            .translate(Vec2::new(2.0, 3.0))
            .rotate(0.7)
            .scale(Vec2::new(2.0, -1.0));
        let a = Mat2d::IDENTITY
            .translate(Vec2::new(2.0, 3.0))
            .rotate(0.7)
            .scale(Vec2::new(2.0, -1.0));
        assert!(m.equals(&Mat3::from_mat2d(&a)));
    }

    #[test]
    fn test_normal_from_mat4() {
        let m = Mat4::from_scaling(Vec3::new(2.0, 4.0, 8.0))
            .multiply(Mat4::from_translation(Vec3::new(5.0, 5.0, 5.0)));
        let n = Mat3::normal_from_mat4(&m);
        assert!(n.equals(&Mat3::from([0.5, 0.0, 0.0, 0.0, 0.25, 0.0, 0.0, 0.0, 0.125])));

        let mirrored = Mat4::from_scaling(Vec3::new(-1.0, 1.0, 1.0));
        assert_eq!(Mat3::normal_from_mat4(&mirrored), Mat3::IDENTITY);
    }

    #[test]
    fn test_normal_from_mat4_matches_inverse_transpose() {
        let m = Mat4::from_rotation_translation_scale(
            &Quat::from_axis_angle(Vec3::new(1.0, -2.0, 0.5), 0.9),
            Vec3::new(3.0, 1.0, -4.0),
            Vec3::new(1.0, 2.0, 0.5),
        );
        let n = Mat3::normal_from_mat4(&m);
        assert!(n.equals(&Mat3::from_mat4(&m.invert()).transpose()));

        // normals stay perpendicular to transformed tangents
        let tangent = Vec3::new(1.0, 1.0, 0.0);
        let normal = Vec3::new(1.0, -1.0, 3.0);
        let moved = m.transform_vector(tangent);
        assert!(normal.transform_mat3(&n).dot(&moved).abs() < 1e-9);
    }

    #[test]
    fn test_projection_maps_corners() {
        let p = Mat3::projection(800.0, 600.0);
        assert!(Vec2::new(0.0, 0.0).transform_mat3(&p).equals(&Vec2::new(-1.0, 1.0)));
        assert!(Vec2::new(800.0, 600.0).transform_mat3(&p).equals(&Vec2::new(1.0, -1.0)));
    }
}

//! 4x4 transformation matrix (column-major)
//!
//! The primary transform type: model, view and projection matrices are all
//! `Mat4`. Element `4 * column + row`; translation lives in elements 12..=14.
//!
//! Projection builders follow the OpenGL convention: right-handed view space
//! looking down -Z, mapped to a left-handed clip space with depth in `[-1, 1]`
//! (the `_zo` variants map depth to `[0, 1]`).

use crate::components::{impl_components, impl_matrix_ops};
use crate::scalar::{checked_inverse_determinant, inverse_determinant, to_radian, EPSILON};
use crate::{Quat, Vec3};

/// 4x4 transformation matrix (column-major)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    pub elements: [f64; 16],
}

impl_components!(Mat4, 16);
impl_matrix_ops!(Mat4);

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Field of view given as four independent edge angles in degrees, as
/// reported by head-mounted displays.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldOfView {
    pub up_degrees: f64,
    pub down_degrees: f64,
    pub left_degrees: f64,
    pub right_degrees: f64,
}

impl FieldOfView {
    pub fn new(up_degrees: f64, down_degrees: f64, left_degrees: f64, right_degrees: f64) -> Self {
        Self {
            up_degrees,
            down_degrees,
            left_degrees,
            right_degrees,
        }
    }

    /// Symmetric field of view with the same half-angle on every edge.
    pub fn symmetric(half_degrees: f64) -> Self {
        Self::new(half_degrees, half_degrees, half_degrees, half_degrees)
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        elements: [
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create from four columns.
    pub fn from_cols(c0: [f64; 4], c1: [f64; 4], c2: [f64; 4], c3: [f64; 4]) -> Self {
        Self::from(bytemuck::cast::<[[f64; 4]; 4], [f64; 16]>([c0, c1, c2, c3]))
    }

    /// Column `idx` as an array.
    pub fn col(&self, idx: usize) -> [f64; 4] {
        let e = &self.elements;
        [e[idx * 4], e[idx * 4 + 1], e[idx * 4 + 2], e[idx * 4 + 3]]
    }

    /// Row `idx` as an array.
    pub fn row(&self, idx: usize) -> [f64; 4] {
        let e = &self.elements;
        [e[idx], e[4 + idx], e[8 + idx], e[12 + idx]]
    }

    /// Single-precision columns, the layout of a `mat4x4<f32>` uniform.
    pub fn to_f32_cols(&self) -> [[f32; 4]; 4] {
        bytemuck::cast(self.to_f32_array())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Construction from a single primitive
    // ─────────────────────────────────────────────────────────────────────────

    pub fn from_translation(v: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.elements[12] = v.x;
        out.elements[13] = v.y;
        out.elements[14] = v.z;
        out
    }

    pub fn from_scaling(v: Vec3) -> Self {
        let mut out = Self::IDENTITY;
        out.elements[0] = v.x;
        out.elements[5] = v.y;
        out.elements[10] = v.z;
        out
    }

    /// Rotation of `rad` radians around `axis`.
    ///
    /// The axis is normalized first; an axis shorter than [`EPSILON`] yields
    /// the identity.
    pub fn from_rotation(rad: f64, axis: Vec3) -> Self {
        let len = axis.length();
        if len < EPSILON {
            tracing::debug!(len, "rotation axis too short, using identity");
            return Self::IDENTITY;
        }
        let Vec3 { x, y, z } = axis.scale(1.0 / len);
        let (s, c) = rad.sin_cos();
        let t = 1.0 - c;

        Self::from([
            x * x * t + c,
            y * x * t + z * s,
            z * x * t - y * s,
            0.0,
            x * y * t - z * s,
            y * y * t + c,
            z * y * t + x * s,
            0.0,
            x * z * t + y * s,
            y * z * t - x * s,
            z * z * t + c,
            0.0,
            0.0,
            0.0,
            0.0,
            1.0,
        ])
    }

    pub fn from_x_rotation(rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_cols(
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        )
    }

    pub fn from_y_rotation(rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_cols(
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        )
    }

    pub fn from_z_rotation(rad: f64) -> Self {
        let (s, c) = rad.sin_cos();
        Self::from_cols(
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        )
    }

    /// Rotation matrix of a unit quaternion.
    pub fn from_quat(q: &Quat) -> Self {
        Self::from_rotation_translation_scale(q, Vec3::ZERO, Vec3::ONE)
    }

    /// Rotation followed by translation, built in one pass.
    pub fn from_rotation_translation(q: &Quat, v: Vec3) -> Self {
        Self::from_rotation_translation_scale(q, v, Vec3::ONE)
    }

    /// Scale, then rotation, then translation, built in one pass.
    pub fn from_rotation_translation_scale(q: &Quat, v: Vec3, s: Vec3) -> Self {
        let Quat { x, y, z, w } = *q;
        let x2 = x + x;
        let y2 = y + y;
        let z2 = z + z;

        let xx = x * x2;
        let xy = x * y2;
        let xz = x * z2;
        let yy = y * y2;
        let yz = y * z2;
        let zz = z * z2;
        let wx = w * x2;
        let wy = w * y2;
        let wz = w * z2;

        Self::from_cols(
            [(1.0 - (yy + zz)) * s.x, (xy + wz) * s.x, (xz - wy) * s.x, 0.0],
            [(xy - wz) * s.y, (1.0 - (xx + zz)) * s.y, (yz + wx) * s.y, 0.0],
            [(xz + wy) * s.z, (yz - wx) * s.z, (1.0 - (xx + yy)) * s.z, 0.0],
            [v.x, v.y, v.z, 1.0],
        )
    }

    /// Like [`Mat4::from_rotation_translation_scale`], but scaling and
    /// rotation pivot around `origin` instead of the coordinate origin.
    pub fn from_rotation_translation_scale_origin(q: &Quat, v: Vec3, s: Vec3, origin: Vec3) -> Self {
        let mut out = Self::from_rotation_translation_scale(q, Vec3::ZERO, s);
        let e = out.elements;
        let Vec3 {
            x: ox,
            y: oy,
            z: oz,
        } = origin;

        out.elements[12] = v.x + ox - (e[0] * ox + e[4] * oy + e[8] * oz);
        out.elements[13] = v.y + oy - (e[1] * ox + e[5] * oy + e[9] * oz);
        out.elements[14] = v.z + oz - (e[2] * ox + e[6] * oy + e[10] * oz);
        out
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Core algebra
    // ─────────────────────────────────────────────────────────────────────────

    pub fn transpose(self) -> Self {
        let e = self.elements;
        Self::from_cols(
            [e[0], e[4], e[8], e[12]],
            [e[1], e[5], e[9], e[13]],
            [e[2], e[6], e[10], e[14]],
            [e[3], e[7], e[11], e[15]],
        )
    }

    /// 2x2 sub-determinants of the top two and bottom two rows of columns,
    /// shared by `determinant`, `adjoint` and `invert`.
    fn minors(&self) -> [f64; 12] {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.elements;
        [
            a00 * a11 - a01 * a10,
            a00 * a12 - a02 * a10,
            a00 * a13 - a03 * a10,
            a01 * a12 - a02 * a11,
            a01 * a13 - a03 * a11,
            a02 * a13 - a03 * a12,
            a20 * a31 - a21 * a30,
            a20 * a32 - a22 * a30,
            a20 * a33 - a23 * a30,
            a21 * a32 - a22 * a31,
            a21 * a33 - a23 * a31,
            a22 * a33 - a23 * a32,
        ]
    }

    pub fn determinant(&self) -> f64 {
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = self.minors();
        b00 * b11 - b01 * b10 + b02 * b09 + b03 * b08 - b04 * b07 + b05 * b06
    }

    /// Transposed cofactor matrix.
    pub fn adjoint(self) -> Self {
        let [a00, a01, a02, a03, a10, a11, a12, a13, a20, a21, a22, a23, a30, a31, a32, a33] =
            self.elements;
        let [b00, b01, b02, b03, b04, b05, b06, b07, b08, b09, b10, b11] = self.minors();

        Self::from([
            a11 * b11 - a12 * b10 + a13 * b09,
            a02 * b10 - a01 * b11 - a03 * b09,
            a31 * b05 - a32 * b04 + a33 * b03,
            a22 * b04 - a21 * b05 - a23 * b03,
            a12 * b08 - a10 * b11 - a13 * b07,
            a00 * b11 - a02 * b08 + a03 * b07,
            a32 * b02 - a30 * b05 - a33 * b01,
            a20 * b05 - a22 * b02 + a23 * b01,
            a10 * b10 - a11 * b08 + a13 * b06,
            a01 * b08 - a00 * b10 - a03 * b06,
            a30 * b04 - a31 * b02 + a33 * b00,
            a21 * b02 - a20 * b04 - a23 * b00,
            a11 * b07 - a10 * b09 - a12 * b06,
            a00 * b09 - a01 * b07 + a02 * b06,
            a31 * b01 - a30 * b03 - a32 * b00,
            a20 * b03 - a21 * b01 + a22 * b00,
        ])
    }

    /// Inverse matrix.
    ///
    /// Any determinant that is not strictly positive returns the identity,
    /// so a mirrored transform is not inverted. Use [`Mat4::checked_invert`]
    /// when reflections must be handled.
    pub fn invert(self) -> Self {
        match inverse_determinant(self.determinant(), "Mat4") {
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
    /// In column-vector notation this is `other · self`, so
    /// `model * view * projection` yields `projection · view · model`.
    pub fn multiply(self, other: Mat4) -> Self {
        Self::product(&other, &self)
    }

    /// `a · b` in column-vector notation.
    fn product(a: &Mat4, b: &Mat4) -> Mat4 {
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                out[col * 4 + row] = (0..4)
                    .map(|k| a.elements[k * 4 + row] * b.elements[col * 4 + k])
                    .sum();
            }
        }
        Mat4::from(out)
    }

    /// Translates by `v` before applying `self`.
    pub fn translate(self, v: Vec3) -> Self {
        let mut out = self;
        let e = &self.elements;
        for row in 0..4 {
            out.elements[12 + row] = e[row] * v.x + e[4 + row] * v.y + e[8 + row] * v.z + e[12 + row];
        }
        out
    }

    /// Scales by `v` before applying `self`.
    pub fn scale(self, v: Vec3) -> Self {
        let mut out = self;
        for row in 0..4 {
            out.elements[row] *= v.x;
            out.elements[4 + row] *= v.y;
            out.elements[8 + row] *= v.z;
        }
        out
    }

    /// Rotates by `rad` radians around `axis` before applying `self`.
    ///
    /// An axis shorter than [`EPSILON`] leaves the matrix unchanged.
    pub fn rotate(self, rad: f64, axis: Vec3) -> Self {
        if axis.length() < EPSILON {
            tracing::debug!("rotate with degenerate axis, matrix unchanged");
            return self;
        }
        Self::product(&self, &Self::from_rotation(rad, axis))
    }

    /// Rotates around the X axis before applying `self`.
    pub fn rotate_x(self, rad: f64) -> Self {
        Self::product(&self, &Self::from_x_rotation(rad))
    }

    /// Rotates around the Y axis before applying `self`.
    pub fn rotate_y(self, rad: f64) -> Self {
        Self::product(&self, &Self::from_y_rotation(rad))
    }

    /// Rotates around the Z axis before applying `self`.
    pub fn rotate_z(self, rad: f64) -> Self {
        Self::product(&self, &Self::from_z_rotation(rad))
    }

    /// Frobenius norm.
    pub fn frob(&self) -> f64 {
        self.elements.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    /// Transform a point (w = 1), without perspective divide
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        let e = &self.elements;
        Vec3::new(
            e[0] * p.x + e[4] * p.y + e[8] * p.z + e[12],
            e[1] * p.x + e[5] * p.y + e[9] * p.z + e[13],
            e[2] * p.x + e[6] * p.y + e[10] * p.z + e[14],
        )
    }

    /// Transform a direction (w = 0, ignores translation)
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        let e = &self.elements;
        Vec3::new(
            e[0] * v.x + e[4] * v.y + e[8] * v.z,
            e[1] * v.x + e[5] * v.y + e[9] * v.z,
            e[2] * v.x + e[6] * v.y + e[10] * v.z,
        )
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Decomposition
    // ─────────────────────────────────────────────────────────────────────────

    /// Translation column.
    pub fn get_translation(&self) -> Vec3 {
        Vec3::new(self.elements[12], self.elements[13], self.elements[14])
    }

    /// Length of each basis column of the upper-left 3x3 block.
    pub fn get_scaling(&self) -> Vec3 {
        let e = &self.elements;
        Vec3::new(
            Vec3::new(e[0], e[1], e[2]).length(),
            Vec3::new(e[4], e[5], e[6]).length(),
            Vec3::new(e[8], e[9], e[10]).length(),
        )
    }

    /// Rotation of the upper-left 3x3 block after dividing out [`Mat4::get_scaling`].
    ///
    /// Exact for matrices built from rotation, positive scale and translation;
    /// skewed matrices get no polar decomposition.
    pub fn get_rotation(&self) -> Quat {
        Self::rotation_of(&self.elements, self.get_scaling())
    }

    /// Rotation, translation and scaling, in that order.
    pub fn decompose(&self) -> (Quat, Vec3, Vec3) {
        let scaling = self.get_scaling();
        (
            Self::rotation_of(&self.elements, scaling),
            self.get_translation(),
            scaling,
        )
    }

    /// Trace-based quaternion extraction: the branch is keyed on whichever of
    /// the trace or the diagonal entries is largest.
    fn rotation_of(e: &[f64; 16], scaling: Vec3) -> Quat {
        let inv = scaling.inverse();

        let m00 = e[0] * inv.x;
        let m01 = e[1] * inv.x;
        let m02 = e[2] * inv.x;
        let m10 = e[4] * inv.y;
        let m11 = e[5] * inv.y;
        let m12 = e[6] * inv.y;
        let m20 = e[8] * inv.z;
        let m21 = e[9] * inv.z;
        let m22 = e[10] * inv.z;

        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quat::new((m12 - m21) / s, (m20 - m02) / s, (m01 - m10) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Quat::new(0.25 * s, (m01 + m10) / s, (m20 + m02) / s, (m12 - m21) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Quat::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m20 - m02) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Quat::new((m20 + m02) / s, (m12 + m21) / s, 0.25 * s, (m01 - m10) / s)
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Camera and projection
    // ─────────────────────────────────────────────────────────────────────────

    /// Perspective projection for the given frustum bounds on the near plane.
    pub fn frustum(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let rl = 1.0 / (right - left);
        let tb = 1.0 / (top - bottom);
        let nf = 1.0 / (near - far);

        Self::from_cols(
            [near * 2.0 * rl, 0.0, 0.0, 0.0],
            [0.0, near * 2.0 * tb, 0.0, 0.0],
            [(right + left) * rl, (top + bottom) * tb, (far + near) * nf, -1.0],
            [0.0, 0.0, far * near * 2.0 * nf, 0.0],
        )
    }

    /// Perspective projection with depth mapped to `[-1, 1]`.
    ///
    /// `fovy` is the vertical field of view in radians. Passing
    /// `f64::INFINITY` as `far` builds an infinite projection.
    pub fn perspective(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fovy / 2.0).tan();
        let (m22, m32) = if far == f64::INFINITY {
            (-1.0, -2.0 * near)
        } else {
            let nf = 1.0 / (near - far);
            ((far + near) * nf, 2.0 * far * near * nf)
        };

        Self::from_cols(
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, m22, -1.0],
            [0.0, 0.0, m32, 0.0],
        )
    }

    /// Perspective projection with depth mapped to `[0, 1]`.
    pub fn perspective_zo(fovy: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (fovy / 2.0).tan();
        let (m22, m32) = if far == f64::INFINITY {
            (-1.0, -near)
        } else {
            let nf = 1.0 / (near - far);
            (far * nf, far * near * nf)
        };

        Self::from_cols(
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, m22, -1.0],
            [0.0, 0.0, m32, 0.0],
        )
    }

    /// [`Mat4::perspective`] with the vertical field of view in degrees.
    pub fn perspective_degrees(fovy_degrees: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self::perspective(to_radian(fovy_degrees), aspect, near, far)
    }

    /// Asymmetric perspective projection from four edge angles.
    pub fn perspective_from_field_of_view(fov: &FieldOfView, near: f64, far: f64) -> Self {
        let up_tan = to_radian(fov.up_degrees).tan();
        let down_tan = to_radian(fov.down_degrees).tan();
        let left_tan = to_radian(fov.left_degrees).tan();
        let right_tan = to_radian(fov.right_degrees).tan();
        let x_scale = 2.0 / (left_tan + right_tan);
        let y_scale = 2.0 / (up_tan + down_tan);

        Self::from_cols(
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [
                -((left_tan - right_tan) * x_scale * 0.5),
                (up_tan - down_tan) * y_scale * 0.5,
                far / (near - far),
                -1.0,
            ],
            [0.0, 0.0, (far * near) / (near - far), 0.0],
        )
    }

    /// Orthographic projection with depth mapped to `[-1, 1]`.
    pub fn ortho(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);

        Self::from_cols(
            [-2.0 * lr, 0.0, 0.0, 0.0],
            [0.0, -2.0 * bt, 0.0, 0.0],
            [0.0, 0.0, 2.0 * nf, 0.0],
            [(left + right) * lr, (top + bottom) * bt, (far + near) * nf, 1.0],
        )
    }

    /// Orthographic projection with depth mapped to `[0, 1]`.
    pub fn ortho_zo(left: f64, right: f64, bottom: f64, top: f64, near: f64, far: f64) -> Self {
        let lr = 1.0 / (left - right);
        let bt = 1.0 / (bottom - top);
        let nf = 1.0 / (near - far);

        Self::from_cols(
            [-2.0 * lr, 0.0, 0.0, 0.0],
            [0.0, -2.0 * bt, 0.0, 0.0],
            [0.0, 0.0, nf, 0.0],
            [(left + right) * lr, (top + bottom) * bt, near * nf, 1.0],
        )
    }

    /// View matrix for a camera at `eye` looking at `center`.
    ///
    /// Returns the identity when `eye` and `center` coincide within [`EPSILON`].
    pub fn look_at(eye: Vec3, center: Vec3, up: Vec3) -> Self {
        if (eye.x - center.x).abs() < EPSILON
            && (eye.y - center.y).abs() < EPSILON
            && (eye.z - center.z).abs() < EPSILON
        {
            tracing::debug!("look_at with coincident eye and center, using identity");
            return Self::IDENTITY;
        }

        let z = eye.subtract(center).normalize();
        let x = up.cross(&z).normalize();
        let y = z.cross(&x).normalize();

        Self::from_cols(
            [x.x, y.x, z.x, 0.0],
            [x.y, y.y, z.y, 0.0],
            [x.z, y.z, z.z, 0.0],
            [-x.dot(&eye), -y.dot(&eye), -z.dot(&eye), 1.0],
        )
    }

    /// World matrix placing an object at `eye` with its -Z axis facing `target`.
    ///
    /// This is the inverse of [`Mat4::look_at`] for the same arguments.
    pub fn target_to(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z = eye.subtract(target).normalize();
        let x = up.cross(&z).normalize();
        let y = z.cross(&x);

        Self::from_cols(
            [x.x, x.y, x.z, 0.0],
            [y.x, y.y, y.z, 0.0],
            [z.x, z.y, z.z, 0.0],
            [eye.x, eye.y, eye.z, 1.0],
        )
    }
}

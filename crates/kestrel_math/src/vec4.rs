//! 4D vector

use crate::components::{impl_components, impl_vector_ops};
use crate::{Mat4, Quat};
use rand::Rng;

/// 4D vector, also the storage layout of [`Quat`]
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl_components!(Vec4, 4);
impl_vector_ops!(Vec4);

impl Vec4 {
    pub const ZERO: Vec4 = Vec4::splat(0.0);
    pub const ONE: Vec4 = Vec4::splat(1.0);

    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub const fn splat(v: f64) -> Self {
        Self {
            x: v,
            y: v,
            z: v,
            w: v,
        }
    }

    /// Vector orthogonal to `self`, `v` and `w` (4D generalized cross product).
    pub fn cross(&self, v: &Vec4, w: &Vec4) -> Vec4 {
        let a = v.x * w.y - v.y * w.x;
        let b = v.x * w.z - v.z * w.x;
        let c = v.x * w.w - v.w * w.x;
        let d = v.y * w.z - v.z * w.y;
        let e = v.y * w.w - v.w * w.y;
        let f = v.z * w.w - v.w * w.z;
        let Vec4 {
            x: g,
            y: h,
            z: i,
            w: j,
        } = *self;

        Vec4::new(
            h * f - i * e + j * d,
            -(g * f) + i * c - j * b,
            g * e - h * c + j * a,
            -(g * d) + h * b - i * a,
        )
    }

    /// Random vector of length `scale` uniformly distributed on the 3-sphere
    /// (Marsaglia's method).
    pub fn random<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> Vec4 {
        let (v1, v2, s1) = loop {
            let v1 = rng.gen::<f64>() * 2.0 - 1.0;
            let v2 = rng.gen::<f64>() * 2.0 - 1.0;
            let s1 = v1 * v1 + v2 * v2;
            if s1 < 1.0 {
                break (v1, v2, s1);
            }
        };
        let (v3, v4, s2) = loop {
            let v3 = rng.gen::<f64>() * 2.0 - 1.0;
            let v4 = rng.gen::<f64>() * 2.0 - 1.0;
            let s2 = v3 * v3 + v4 * v4;
            if s2 < 1.0 && s2 > 0.0 {
                break (v3, v4, s2);
            }
        };

        let d = ((1.0 - s1) / s2).sqrt();
        Vec4::new(scale * v1, scale * v2, scale * v3 * d, scale * v4 * d)
    }

    pub fn transform_mat4(&self, m: &Mat4) -> Vec4 {
        let e = &m.elements;
        let Vec4 { x, y, z, w } = *self;
        Vec4::new(
            e[0] * x + e[4] * y + e[8] * z + e[12] * w,
            e[1] * x + e[5] * y + e[9] * z + e[13] * w,
            e[2] * x + e[6] * y + e[10] * z + e[14] * w,
            e[3] * x + e[7] * y + e[11] * z + e[15] * w,
        )
    }

    /// Rotates the xyz part by a quaternion; `w` passes through.
    pub fn transform_quat(&self, q: &Quat) -> Vec4 {
        let Vec4 { x, y, z, w } = *self;

        let ix = q.w * x + q.y * z - q.z * y;
        let iy = q.w * y + q.z * x - q.x * z;
        let iz = q.w * z + q.x * y - q.y * x;
        let iw = -q.x * x - q.y * y - q.z * z;

        Vec4::new(
            ix * q.w + iw * -q.x + iy * -q.z - iz * -q.y,
            iy * q.w + iw * -q.y + iz * -q.x - ix * -q.z,
            iz * q.w + iw * -q.z + ix * -q.y - iy * -q.x,
            w,
        )
    }
}

impl From<Quat> for Vec4 {
    fn from(q: Quat) -> Self {
        bytemuck::cast(q)
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(values: [f32; 4]) -> Self {
        Self::from_f32_array(values)
    }
}

//! 2D vector

use crate::components::{impl_components, impl_vector_ops};
use crate::{Mat2, Mat2d, Mat3, Mat4, Vec3};
use rand::Rng;

/// 2D vector
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl_components!(Vec2, 2);
impl_vector_ops!(Vec2);

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };
    pub const X: Vec2 = Vec2 { x: 1.0, y: 0.0 };
    pub const Y: Vec2 = Vec2 { x: 0.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }

    /// 2D cross product, returned as a Vec3 with zero X/Y and the signed area in Z.
    pub fn cross(&self, other: &Vec2) -> Vec3 {
        Vec3::new(0.0, 0.0, self.x * other.y - self.y * other.x)
    }

    /// Angle in radians between two vectors; `PI / 2` if either is zero.
    pub fn angle(&self, other: &Vec2) -> f64 {
        let mag = (self.squared_length() * other.squared_length()).sqrt();
        let cosine = if mag != 0.0 { self.dot(other) / mag } else { 0.0 };
        cosine.clamp(-1.0, 1.0).acos()
    }

    /// Rotates the point around `origin` by `rad` radians.
    pub fn rotate(&self, origin: Vec2, rad: f64) -> Vec2 {
        let p = self.subtract(origin);
        let (s, c) = rad.sin_cos();
        Vec2::new(p.x * c - p.y * s + origin.x, p.x * s + p.y * c + origin.y)
    }

    /// Random vector of length `scale` with uniformly distributed direction.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> Vec2 {
        let r = rng.gen::<f64>() * std::f64::consts::TAU;
        Vec2::new(r.cos() * scale, r.sin() * scale)
    }

    pub fn transform_mat2(&self, m: &Mat2) -> Vec2 {
        let [m0, m1, m2, m3] = m.elements;
        Vec2::new(m0 * self.x + m2 * self.y, m1 * self.x + m3 * self.y)
    }

    /// Transforms as a point: the affine translation is applied.
    pub fn transform_mat2d(&self, m: &Mat2d) -> Vec2 {
        let [a, b, c, d, tx, ty] = m.elements;
        Vec2::new(a * self.x + c * self.y + tx, b * self.x + d * self.y + ty)
    }

    /// Transforms as the homogeneous point `(x, y, 1)`.
    pub fn transform_mat3(&self, m: &Mat3) -> Vec2 {
        let e = &m.elements;
        Vec2::new(
            e[0] * self.x + e[3] * self.y + e[6],
            e[1] * self.x + e[4] * self.y + e[7],
        )
    }

    /// Transforms as the homogeneous point `(x, y, 0, 1)`.
    pub fn transform_mat4(&self, m: &Mat4) -> Vec2 {
        let e = &m.elements;
        Vec2::new(
            e[0] * self.x + e[4] * self.y + e[12],
            e[1] * self.x + e[5] * self.y + e[13],
        )
    }
}

impl From<[f32; 2]> for Vec2 {
    fn from([x, y]: [f32; 2]) -> Self {
        Self::new(f64::from(x), f64::from(y))
    }
}

//! 3D vector

use crate::components::{impl_components, impl_vector_ops};
use crate::{Mat3, Mat4, Quat};
use rand::Rng;

/// 3D vector
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl_components!(Vec3, 3);
impl_vector_ops!(Vec3);

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const ONE: Vec3 = Vec3 {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    pub const X: Vec3 = Vec3 {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const Y: Vec3 = Vec3 {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const Z: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Angle in radians between two vectors; `PI / 2` if either is zero.
    pub fn angle(&self, other: &Vec3) -> f64 {
        let mag = (self.squared_length() * other.squared_length()).sqrt();
        let cosine = if mag != 0.0 { self.dot(other) / mag } else { 0.0 };
        cosine.clamp(-1.0, 1.0).acos()
    }

    /// Hermite interpolation between `a` and `d` with tangent controls `b` and `c`.
    pub fn hermite(a: Vec3, b: Vec3, c: Vec3, d: Vec3, t: f64) -> Vec3 {
        let t2 = t * t;
        let f1 = t2 * (2.0 * t - 3.0) + 1.0;
        let f2 = t2 * (t - 2.0) + t;
        let f3 = t2 * (t - 1.0);
        let f4 = t2 * (3.0 - 2.0 * t);
        a.scale(f1) + b.scale(f2) + c.scale(f3) + d.scale(f4)
    }

    /// Cubic Bezier interpolation with control points `a`, `b`, `c`, `d`.
    pub fn bezier(a: Vec3, b: Vec3, c: Vec3, d: Vec3, t: f64) -> Vec3 {
        let inv = 1.0 - t;
        let inv2 = inv * inv;
        let t2 = t * t;
        let f1 = inv2 * inv;
        let f2 = 3.0 * t * inv2;
        let f3 = 3.0 * t2 * inv;
        let f4 = t2 * t;
        a.scale(f1) + b.scale(f2) + c.scale(f3) + d.scale(f4)
    }

    /// Rotates the point around the X axis through `origin`.
    pub fn rotate_x(&self, origin: Vec3, rad: f64) -> Vec3 {
        let p = self.subtract(origin);
        let (s, c) = rad.sin_cos();
        Vec3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c).add(origin)
    }

    /// Rotates the point around the Y axis through `origin`.
    pub fn rotate_y(&self, origin: Vec3, rad: f64) -> Vec3 {
        let p = self.subtract(origin);
        let (s, c) = rad.sin_cos();
        Vec3::new(p.z * s + p.x * c, p.y, p.z * c - p.x * s).add(origin)
    }

    /// Rotates the point around the Z axis through `origin`.
    pub fn rotate_z(&self, origin: Vec3, rad: f64) -> Vec3 {
        let p = self.subtract(origin);
        let (s, c) = rad.sin_cos();
        Vec3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z).add(origin)
    }

    /// Random vector of length `scale` uniformly distributed on the sphere.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> Vec3 {
        let r = rng.gen::<f64>() * std::f64::consts::TAU;
        let z = rng.gen::<f64>() * 2.0 - 1.0;
        let z_scale = (1.0 - z * z).sqrt() * scale;
        Vec3::new(r.cos() * z_scale, r.sin() * z_scale, z * scale)
    }

    pub fn transform_mat3(&self, m: &Mat3) -> Vec3 {
        let e = &m.elements;
        let Vec3 { x, y, z } = *self;
        Vec3::new(
            x * e[0] + y * e[3] + z * e[6],
            x * e[1] + y * e[4] + z * e[7],
            x * e[2] + y * e[5] + z * e[8],
        )
    }

    /// Transforms the point `(x, y, z, 1)` and divides by the resulting `w`.
    ///
    /// A resulting `w` of exactly zero is treated as 1.
    pub fn transform_mat4(&self, m: &Mat4) -> Vec3 {
        let e = &m.elements;
        let Vec3 { x, y, z } = *self;
        let w = e[3] * x + e[7] * y + e[11] * z + e[15];
        let w = if w == 0.0 { 1.0 } else { w };
        Vec3::new(
            (e[0] * x + e[4] * y + e[8] * z + e[12]) / w,
            (e[1] * x + e[5] * y + e[9] * z + e[13]) / w,
            (e[2] * x + e[6] * y + e[10] * z + e[14]) / w,
        )
    }

    /// Rotates the vector by a (unit) quaternion.
    pub fn transform_quat(&self, q: &Quat) -> Vec3 {
        let qv = Vec3::new(q.x, q.y, q.z);
        let uv = qv.cross(self);
        let uuv = qv.cross(&uv);
        self.add(uv.scale(2.0 * q.w)).add(uuv.scale(2.0))
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self::new(f64::from(x), f64::from(y), f64::from(z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Components;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_cross_right_handed() {
        assert_eq!(Vec3::X.cross(&Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(&Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(&Vec3::X), Vec3::Y);
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.cross(&b), Vec3::new(-3.0, 6.0, -3.0));
    }

    #[test]
    fn test_length_and_distance() {
        let a = Vec3::new(1.0, 2.0, 2.0);
        assert_eq!(a.length(), 3.0);
        assert_eq!(a.squared_length(), 9.0);
        assert_eq!(a.distance(&Vec3::ZERO), 3.0);
        assert_eq!(Vec3::ONE.squared_distance(&Vec3::ZERO), 3.0);
        assert_eq!(a.inverse(), Vec3::new(1.0, 0.5, 0.5));
    }

    #[test]
    fn test_angle() {
        assert!((Vec3::X.angle(&Vec3::Y) - FRAC_PI_2).abs() < 1e-12);
        assert!((Vec3::X.angle(&-Vec3::X) - PI).abs() < 1e-12);
        assert!(Vec3::Z.angle(&Vec3::new(0.0, 0.0, 3.0)).abs() < 1e-12);
    }

    #[test]
    fn test_hermite_and_bezier_endpoints() {
        let a = Vec3::new(1.0, 0.0, 0.0);
        let b = Vec3::new(2.0, 3.0, 0.0);
        let c = Vec3::new(4.0, 3.0, 1.0);
        let d = Vec3::new(5.0, 0.0, 1.0);
        assert!(Vec3::bezier(a, b, c, d, 0.0).equals(&a));
        assert!(Vec3::bezier(a, b, c, d, 1.0).equals(&d));
        assert!(Vec3::hermite(a, b, c, d, 0.0).equals(&a));
        assert!(Vec3::hermite(a, b, c, d, 1.0).equals(&d));
    }

    #[test]
    fn test_rotate_about_origin_point() {
        let p = Vec3::new(1.0, 1.0, 0.0);
        let r = p.rotate_z(Vec3::new(0.0, 1.0, 0.0), FRAC_PI_2);
        assert!(r.equals(&Vec3::new(0.0, 2.0, 0.0)));
        let r = Vec3::new(0.0, 1.0, 0.0).rotate_x(Vec3::ZERO, FRAC_PI_2);
        assert!(r.equals(&Vec3::new(0.0, 0.0, 1.0)));
        let r = Vec3::new(0.0, 0.0, 1.0).rotate_y(Vec3::ZERO, FRAC_PI_2);
        assert!(r.equals(&Vec3::new(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_transform_mat4_divides_by_w() {
        let mut m = Mat4::IDENTITY;
        m[15] = 2.0;
        let v = Vec3::new(2.0, 4.0, 6.0).transform_mat4(&m);
        assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));

        let t = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec3::ONE.transform_mat4(&t), Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_transform_quat_matches_matrix() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 2.0, -0.5), 0.8);
        let v = Vec3::new(0.3, -1.2, 2.0);
        let by_quat = v.transform_quat(&q);
        let by_mat = v.transform_mat3(&Mat3::from_quat(&q));
        assert!(by_quat.equals(&by_mat));
        assert!((by_quat.length() - v.length()).abs() < 1e-12);
    }

    #[test]
    fn test_random_is_unit() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(11);
        for _ in 0..32 {
            assert!((Vec3::random(&mut rng, 1.0).length() - 1.0).abs() < 1e-9);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_fields() {
        let v = Vec3::new(1.0, -2.0, 0.5);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":-2.0,"z":0.5}"#);
        let back: Vec3 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
    }
}

//! Quaternion for 3D rotations
//!
//! Storage is `(x, y, z, w)`, identical to [`Vec4`]. Operations assume a unit
//! quaternion where rotation semantics matter but never renormalize silently,
//! except [`Quat::rotation_to`], [`Quat::set_axes`] and the slerp fallback paths
//! noted on each method.

use crate::components::{impl_components, impl_linear_ops, Components};
use crate::scalar::EPSILON;
use crate::{Mat3, Vec3, Vec4};
use rand::Rng;

/// Quaternion for representing 3D rotations
///
/// Quaternions avoid gimbal lock and interpolate smoothly.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl_components!(Quat, 4);
impl_linear_ops!(Quat);

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Order in which per-axis rotations are applied by [`Quat::from_euler`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerOrder {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    #[default]
    Zyx,
}

impl Quat {
    /// Identity quaternion (no rotation)
    pub const IDENTITY: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Zero quaternion; not a rotation
    pub const ZERO: Quat = Quat {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    /// Create a new quaternion
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Rotation of `rad` radians around `axis`.
    ///
    /// The axis is normalized first; a zero-length axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, rad: f64) -> Self {
        let len = axis.length();
        if len < EPSILON {
            tracing::debug!(len, "axis-angle rotation with degenerate axis, using identity");
            return Self::IDENTITY;
        }
        Self::set_axis_angle(axis.scale(1.0 / len), rad)
    }

    /// Rotation of `rad` radians around an axis that must already be unit length.
    pub fn set_axis_angle(axis: Vec3, rad: f64) -> Self {
        let (s, c) = (rad * 0.5).sin_cos();
        Self::new(s * axis.x, s * axis.y, s * axis.z, c)
    }

    /// Rotation axis and angle in radians.
    ///
    /// Angles close to zero report the X axis, since any axis is valid there.
    pub fn get_axis_angle(&self) -> (Vec3, f64) {
        let rad = self.w.clamp(-1.0, 1.0).acos() * 2.0;
        let s = (rad / 2.0).sin();
        if s > EPSILON {
            (Vec3::new(self.x / s, self.y / s, self.z / s), rad)
        } else {
            (Vec3::X, rad)
        }
    }

    /// Angle in radians between two unit rotations.
    pub fn get_angle(&self, other: &Quat) -> f64 {
        let d = self.dot(other);
        (2.0 * d * d - 1.0).clamp(-1.0, 1.0).acos()
    }

    /// Hamilton product `self ⊗ other`.
    ///
    /// Rotating a vector by the result applies `other` first, then `self`.
    pub fn multiply(self, other: Quat) -> Quat {
        let Quat {
            x: ax,
            y: ay,
            z: az,
            w: aw,
        } = self;
        let Quat {
            x: bx,
            y: by,
            z: bz,
            w: bw,
        } = other;

        Quat::new(
            ax * bw + aw * bx + ay * bz - az * by,
            ay * bw + aw * by + az * bx - ax * bz,
            az * bw + aw * bz + ax * by - ay * bx,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Adds a rotation of `rad` radians around the local X axis.
    pub fn rotate_x(self, rad: f64) -> Quat {
        let (bx, bw) = (rad * 0.5).sin_cos();
        let Quat { x, y, z, w } = self;
        Quat::new(x * bw + w * bx, y * bw + z * bx, z * bw - y * bx, w * bw - x * bx)
    }

    /// Adds a rotation of `rad` radians around the local Y axis.
    pub fn rotate_y(self, rad: f64) -> Quat {
        let (by, bw) = (rad * 0.5).sin_cos();
        let Quat { x, y, z, w } = self;
        Quat::new(x * bw - z * by, y * bw + w * by, z * bw + x * by, w * bw - y * by)
    }

    /// Adds a rotation of `rad` radians around the local Z axis.
    pub fn rotate_z(self, rad: f64) -> Quat {
        let (bz, bw) = (rad * 0.5).sin_cos();
        let Quat { x, y, z, w } = self;
        Quat::new(x * bw + y * bz, y * bw - x * bz, z * bw + w * bz, w * bw - z * bz)
    }

    /// Recomputes `w` from `x`, `y`, `z`, assuming a unit quaternion.
    pub fn calculate_w(self) -> Quat {
        let Quat { x, y, z, .. } = self;
        Quat::new(x, y, z, (1.0 - x * x - y * y - z * z).abs().sqrt())
    }

    /// Quaternion exponential.
    pub fn exp(self) -> Quat {
        let Quat { x, y, z, w } = self;
        let r = (x * x + y * y + z * z).sqrt();
        let et = w.exp();
        let s = if r > 0.0 { et * r.sin() / r } else { 0.0 };
        Quat::new(x * s, y * s, z * s, et * r.cos())
    }

    /// Quaternion natural logarithm.
    pub fn ln(self) -> Quat {
        let Quat { x, y, z, w } = self;
        let r = (x * x + y * y + z * z).sqrt();
        let t = if r > 0.0 { r.atan2(w) / r } else { 0.0 };
        Quat::new(x * t, y * t, z * t, 0.5 * (x * x + y * y + z * z + w * w).ln())
    }

    /// Raises a unit quaternion to a real power (scales its rotation angle).
    pub fn pow(self, b: f64) -> Quat {
        self.ln().scale(b).exp()
    }

    /// Inverse rotation; the zero quaternion maps to itself.
    pub fn invert(self) -> Quat {
        let dot = self.dot(&self);
        if dot == 0.0 {
            tracing::debug!("inverse of zero quaternion");
            return Quat::ZERO;
        }
        let inv = 1.0 / dot;
        Quat::new(-self.x * inv, -self.y * inv, -self.z * inv, self.w * inv)
    }

    /// Conjugate; equals the inverse for unit quaternions.
    pub fn conjugate(self) -> Quat {
        Quat::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// When `1 - cos(omega) <= EPSILON` the endpoints are treated as coincident
    /// and the result is a plain linear blend.
    pub fn slerp(self, other: Quat, t: f64) -> Quat {
        let mut cosom = self.dot(&other);
        let mut b = other;
        if cosom < 0.0 {
            cosom = -cosom;
            b = b.negate();
        }

        let (scale0, scale1) = if 1.0 - cosom > EPSILON {
            let omega = cosom.acos();
            let sinom = omega.sin();
            (
                ((1.0 - t) * omega).sin() / sinom,
                (t * omega).sin() / sinom,
            )
        } else {
            tracing::trace!(cosom, "slerp endpoints coincide, blending linearly");
            (1.0 - t, t)
        };

        self.scale(scale0).add(b.scale(scale1))
    }

    /// Spherical cubic interpolation through `a`, `b`, `c`, `d` with control
    /// points `b` and `c`.
    pub fn sqlerp(a: Quat, b: Quat, c: Quat, d: Quat, t: f64) -> Quat {
        let outer = a.slerp(d, t);
        let inner = b.slerp(c, t);
        outer.slerp(inner, 2.0 * t * (1.0 - t))
    }

    /// Rotation described by a 3x3 rotation matrix (Shoemake's algorithm).
    ///
    /// The branch is picked by the largest of the trace and the diagonal
    /// entries, which keeps the divisor away from zero.
    pub fn from_mat3(m: &Mat3) -> Quat {
        let e = &m.elements;
        let trace = e[0] + e[4] + e[8];

        if trace > 0.0 {
            let root = (trace + 1.0).sqrt();
            let w = 0.5 * root;
            let root = 0.5 / root;
            return Quat::new(
                (e[5] - e[7]) * root,
                (e[6] - e[2]) * root,
                (e[1] - e[3]) * root,
                w,
            );
        }

        let mut i = 0;
        if e[4] > e[0] {
            i = 1;
        }
        if e[8] > e[i * 3 + i] {
            i = 2;
        }
        let j = (i + 1) % 3;
        let k = (i + 2) % 3;

        let mut out = [0.0; 4];
        let root = (e[i * 3 + i] - e[j * 3 + j] - e[k * 3 + k] + 1.0).sqrt();
        out[i] = 0.5 * root;
        let root = 0.5 / root;
        out[3] = (e[j * 3 + k] - e[k * 3 + j]) * root;
        out[j] = (e[j * 3 + i] + e[i * 3 + j]) * root;
        out[k] = (e[k * 3 + i] + e[i * 3 + k]) * root;
        Quat::from(out)
    }

    /// Rotation from Euler angles in radians, applied in `order`.
    pub fn from_euler(x: f64, y: f64, z: f64, order: EulerOrder) -> Quat {
        let (sx, cx) = (x * 0.5).sin_cos();
        let (sy, cy) = (y * 0.5).sin_cos();
        let (sz, cz) = (z * 0.5).sin_cos();

        match order {
            EulerOrder::Xyz => Quat::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::Xzy => Quat::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
            EulerOrder::Yxz => Quat::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz - sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
            EulerOrder::Yzx => Quat::new(
                sx * cy * cz + cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::Zxy => Quat::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz + sx * sy * cz,
                cx * cy * cz - sx * sy * sz,
            ),
            EulerOrder::Zyx => Quat::new(
                sx * cy * cz - cx * sy * sz,
                cx * sy * cz + sx * cy * sz,
                cx * cy * sz - sx * sy * cz,
                cx * cy * cz + sx * sy * sz,
            ),
        }
    }

    /// Shortest rotation taking unit vector `a` onto unit vector `b`.
    ///
    /// Antiparallel inputs rotate half a turn around an arbitrary axis
    /// perpendicular to `a`.
    pub fn rotation_to(a: Vec3, b: Vec3) -> Quat {
        let dot = a.dot(&b);
        if dot < -0.999999 {
            let mut axis = Vec3::X.cross(&a);
            if axis.length() < 0.000001 {
                axis = Vec3::Y.cross(&a);
            }
            return Quat::set_axis_angle(axis.normalize(), std::f64::consts::PI);
        }
        if dot > 0.999999 {
            return Quat::IDENTITY;
        }
        let axis = a.cross(&b);
        Quat::new(axis.x, axis.y, axis.z, 1.0 + dot).normalize()
    }

    /// Rotation mapping the camera basis onto `view` (forward), `right` and `up`.
    pub fn set_axes(view: Vec3, right: Vec3, up: Vec3) -> Quat {
        let m = Mat3::from([
            right.x, up.x, -view.x, //
            right.y, up.y, -view.y, //
            right.z, up.z, -view.z,
        ]);
        Quat::from_mat3(&m).normalize()
    }

    /// Uniformly distributed random unit quaternion.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Quat {
        let u1: f64 = rng.gen();
        let u2: f64 = rng.gen();
        let u3: f64 = rng.gen();

        let sqrt1_minus_u1 = (1.0 - u1).sqrt();
        let sqrt_u1 = u1.sqrt();
        let tau = std::f64::consts::TAU;

        Quat::new(
            sqrt1_minus_u1 * (tau * u2).sin(),
            sqrt1_minus_u1 * (tau * u2).cos(),
            sqrt_u1 * (tau * u3).sin(),
            sqrt_u1 * (tau * u3).cos(),
        )
    }

    /// Rotate a vector by this quaternion
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        v.transform_quat(self)
    }

    /// True when both represent the same rotation; `q` and `-q` compare equal.
    ///
    /// Uses the same component-wise tolerance as [`Components::equals`].
    pub fn rotation_equals(&self, other: &Quat) -> bool {
        self.equals(other) || self.equals(&other.negate())
    }
}

impl std::ops::Mul for Quat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Quat::multiply(self, rhs)
    }
}

impl From<Vec4> for Quat {
    fn from(v: Vec4) -> Self {
        bytemuck::cast(v)
    }
}

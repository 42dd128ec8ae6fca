//! Flat component access shared by every vector, matrix and quaternion type.
//!
//! Each type is a `#[repr(C)]` aggregate of `f64`, so it can be viewed as a
//! column-major `&[f64]` without copying. Equality, conversions and the
//! component-wise arithmetic are implemented once here on top of that view.

use crate::error::{MathError, Result};
use crate::scalar::{approx_eq_eps, EPSILON};

/// A fixed-size, column-major sequence of `f64` components.
pub trait Components: Copy + bytemuck::Pod {
    /// Number of components
    const LEN: usize;
    /// Type name used by `Display`
    const NAME: &'static str;

    /// Components in storage order.
    #[inline]
    fn as_slice(&self) -> &[f64] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }

    /// Mutable components in storage order.
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [f64] {
        bytemuck::cast_slice_mut(std::slice::from_mut(self))
    }

    /// Builds a value from exactly [`Self::LEN`] components.
    fn from_slice(values: &[f64]) -> Result<Self> {
        if values.len() != Self::LEN {
            return Err(MathError::LengthMismatch {
                expected: Self::LEN,
                found: values.len(),
            });
        }
        let mut out: Self = bytemuck::Zeroable::zeroed();
        out.as_mut_slice().copy_from_slice(values);
        Ok(out)
    }

    /// Like [`Components::from_slice`], but rejects NaN and infinite components.
    fn from_slice_finite(values: &[f64]) -> Result<Self> {
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(MathError::NonFinite { index });
        }
        Self::from_slice(values)
    }

    /// Builds a value from single-precision components, widening each losslessly.
    fn from_f32_slice(values: &[f32]) -> Result<Self> {
        if values.len() != Self::LEN {
            return Err(MathError::LengthMismatch {
                expected: Self::LEN,
                found: values.len(),
            });
        }
        let mut out: Self = bytemuck::Zeroable::zeroed();
        for (dst, src) in out.as_mut_slice().iter_mut().zip(values) {
            *dst = f64::from(*src);
        }
        Ok(out)
    }

    /// Single-precision components in storage order.
    fn to_f32_vec(&self) -> Vec<f32> {
        self.as_slice().iter().map(|&v| v as f32).collect()
    }

    /// Component-wise `==`.
    fn exact_equals(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }

    /// Component-wise approximate equality with [`EPSILON`].
    fn equals(&self, other: &Self) -> bool {
        self.equals_eps(other, EPSILON)
    }

    /// Component-wise approximate equality with an explicit tolerance.
    fn equals_eps(&self, other: &Self, epsilon: f64) -> bool {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .all(|(&a, &b)| approx_eq_eps(a, b, epsilon))
    }

    /// Applies `f` to every component.
    fn map(mut self, f: impl Fn(f64) -> f64) -> Self {
        for v in self.as_mut_slice() {
            *v = f(*v);
        }
        self
    }

    /// Combines matching components of `self` and `other` with `f`.
    fn zip_map(mut self, other: Self, f: impl Fn(f64, f64) -> f64) -> Self {
        for (a, b) in self.as_mut_slice().iter_mut().zip(other.as_slice()) {
            *a = f(*a, *b);
        }
        self
    }

    /// Sum of the products of matching components.
    fn component_dot(&self, other: &Self) -> f64 {
        self.as_slice()
            .iter()
            .zip(other.as_slice())
            .map(|(a, b)| a * b)
            .sum()
    }
}

/// Storage, conversions, equality plumbing, indexing, `Display`, and
/// component-wise add/subtract for a type with `$len` components.
macro_rules! impl_components {
    ($ty:ident, $len:literal) => {
        impl $crate::components::Components for $ty {
            const LEN: usize = $len;
            const NAME: &'static str = stringify!($ty);
        }

        impl $ty {
            /// Double-precision components in storage order.
            #[inline]
            pub fn to_array(&self) -> [f64; $len] {
                bytemuck::cast(*self)
            }

            /// Single-precision components in storage order, as uploaded to the GPU.
            #[inline]
            pub fn to_f32_array(&self) -> [f32; $len] {
                self.to_array().map(|v| v as f32)
            }

            /// Builds a value from single-precision components.
            #[inline]
            pub fn from_f32_array(values: [f32; $len]) -> Self {
                bytemuck::cast(values.map(f64::from))
            }

            /// Component-wise sum.
            #[inline]
            pub fn add(self, other: Self) -> Self {
                $crate::components::Components::zip_map(self, other, |a, b| a + b)
            }

            /// Component-wise difference.
            #[inline]
            pub fn subtract(self, other: Self) -> Self {
                $crate::components::Components::zip_map(self, other, |a, b| a - b)
            }
        }

        impl From<[f64; $len]> for $ty {
            #[inline]
            fn from(values: [f64; $len]) -> Self {
                bytemuck::cast(values)
            }
        }

        impl From<$ty> for [f64; $len] {
            #[inline]
            fn from(value: $ty) -> Self {
                value.to_array()
            }
        }

        impl TryFrom<&[f64]> for $ty {
            type Error = $crate::error::MathError;

            fn try_from(values: &[f64]) -> $crate::error::Result<Self> {
                <$ty as $crate::components::Components>::from_slice(values)
            }
        }

        impl std::ops::Index<usize> for $ty {
            type Output = f64;

            #[inline]
            fn index(&self, index: usize) -> &f64 {
                &$crate::components::Components::as_slice(self)[index]
            }
        }

        impl std::ops::IndexMut<usize> for $ty {
            #[inline]
            fn index_mut(&mut self, index: usize) -> &mut f64 {
                &mut $crate::components::Components::as_mut_slice(self)[index]
            }
        }

        impl std::ops::Add for $ty {
            type Output = Self;

            #[inline]
            fn add(self, rhs: Self) -> Self {
                $ty::add(self, rhs)
            }
        }

        impl std::ops::Sub for $ty {
            type Output = Self;

            #[inline]
            fn sub(self, rhs: Self) -> Self {
                $ty::subtract(self, rhs)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}(", <$ty as $crate::components::Components>::NAME)?;
                for (i, v) in $crate::components::Components::as_slice(self).iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, ")")
            }
        }
    };
}

/// Scalar products, dot, length and interpolation shared by vectors and quaternions.
macro_rules! impl_linear_ops {
    ($ty:ident) => {
        impl $ty {
            /// Multiplies every component by `s`.
            #[inline]
            pub fn scale(self, s: f64) -> Self {
                $crate::components::Components::map(self, |v| v * s)
            }

            /// `self + other * s`
            #[inline]
            pub fn scale_and_add(self, other: Self, s: f64) -> Self {
                $crate::components::Components::zip_map(self, other, |a, b| a + b * s)
            }

            /// Negates every component.
            #[inline]
            pub fn negate(self) -> Self {
                $crate::components::Components::map(self, |v| -v)
            }

            /// Dot product.
            #[inline]
            pub fn dot(&self, other: &Self) -> f64 {
                $crate::components::Components::component_dot(self, other)
            }

            /// Squared Euclidean length.
            #[inline]
            pub fn squared_length(&self) -> f64 {
                self.dot(self)
            }

            /// Euclidean length.
            #[inline]
            pub fn length(&self) -> f64 {
                self.squared_length().sqrt()
            }

            /// Unit-length copy; a zero-length value is returned unchanged.
            pub fn normalize(self) -> Self {
                let len = self.squared_length();
                if len > 0.0 {
                    let inv = 1.0 / len.sqrt();
                    $crate::components::Components::map(self, |v| v * inv)
                } else {
                    tracing::trace!(kind = stringify!($ty), "normalize of zero-length value");
                    self
                }
            }

            /// Linear interpolation `self + t * (other - self)`; `t` is not clamped.
            #[inline]
            pub fn lerp(self, other: Self, t: f64) -> Self {
                $crate::components::Components::zip_map(self, other, |a, b| a + t * (b - a))
            }
        }

        impl std::ops::Mul<f64> for $ty {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f64) -> Self {
                self.scale(rhs)
            }
        }

        impl std::ops::Neg for $ty {
            type Output = Self;

            #[inline]
            fn neg(self) -> Self {
                self.negate()
            }
        }
    };
}

/// Component-wise products and rounding for vectors.
macro_rules! impl_vector_ops {
    ($ty:ident) => {
        $crate::components::impl_linear_ops!($ty);

        impl $ty {
            /// Component-wise product.
            #[inline]
            pub fn multiply(self, other: Self) -> Self {
                $crate::components::Components::zip_map(self, other, |a, b| a * b)
            }

            /// Component-wise quotient.
            #[inline]
            pub fn divide(self, other: Self) -> Self {
                $crate::components::Components::zip_map(self, other, |a, b| a / b)
            }

            /// Component-wise reciprocal.
            #[inline]
            pub fn inverse(self) -> Self {
                $crate::components::Components::map(self, |v| 1.0 / v)
            }

            /// Component-wise minimum.
            #[inline]
            pub fn min(self, other: Self) -> Self {
                $crate::components::Components::zip_map(self, other, f64::min)
            }

            /// Component-wise maximum.
            #[inline]
            pub fn max(self, other: Self) -> Self {
                $crate::components::Components::zip_map(self, other, f64::max)
            }

            #[inline]
            pub fn ceil(self) -> Self {
                $crate::components::Components::map(self, f64::ceil)
            }

            #[inline]
            pub fn floor(self) -> Self {
                $crate::components::Components::map(self, f64::floor)
            }

            /// Rounds half away from zero.
            #[inline]
            pub fn round(self) -> Self {
                $crate::components::Components::map(self, f64::round)
            }

            /// Euclidean distance to `other`.
            #[inline]
            pub fn distance(&self, other: &Self) -> f64 {
                other.subtract(*self).length()
            }

            #[inline]
            pub fn squared_distance(&self, other: &Self) -> f64 {
                other.subtract(*self).squared_length()
            }
        }
    };
}

/// Scalar arithmetic, Frobenius norm and the `*` operator for matrices.
///
/// The type must provide `multiply(self, other) -> Self`.
macro_rules! impl_matrix_ops {
    ($ty:ident) => {
        impl $ty {
            /// Multiplies every component by `s`.
            #[inline]
            pub fn multiply_scalar(self, s: f64) -> Self {
                $crate::components::Components::map(self, |v| v * s)
            }

            /// `self + other * s`, component-wise.
            #[inline]
            pub fn multiply_scalar_and_add(self, other: Self, s: f64) -> Self {
                $crate::components::Components::zip_map(self, other, |a, b| a + b * s)
            }
        }

        impl std::ops::Mul for $ty {
            type Output = Self;

            /// Same as [`multiply`](Self::multiply).
            #[inline]
            fn mul(self, rhs: Self) -> Self {
                self.multiply(rhs)
            }
        }

        impl std::ops::Mul<f64> for $ty {
            type Output = Self;

            #[inline]
            fn mul(self, rhs: f64) -> Self {
                self.multiply_scalar(rhs)
            }
        }
    };
}

pub(crate) use impl_components;
pub(crate) use impl_linear_ops;
pub(crate) use impl_matrix_ops;
pub(crate) use impl_vector_ops;

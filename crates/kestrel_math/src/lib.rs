//! # Kestrel Math
//!
//! A small linear-algebra kernel for building model/view/projection transforms.
//!
//! This crate provides:
//! - **Vectors**: [`Vec2`], [`Vec3`], [`Vec4`]
//! - **Matrices**: [`Mat2`], [`Mat2d`] (2x3 affine), [`Mat3`], [`Mat4`]
//! - **Rotations**: [`Quat`]
//! - **Upload helpers**: flat column-major `f32` buffers for uniform uploads
//!
//! All types store `f64` components in column-major order, are `Copy`, and
//! every operation returns a new value. Matrix `multiply` composes in
//! application order: `a.multiply(b)` (or `a * b`) applies `a` first, then `b`.
//!
//! ## Example
//!
//! ```rust
//! use kestrel_math::prelude::*;
//!
//! let model = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
//! let view = Mat4::look_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
//! let projection = Mat4::perspective(to_radian(40.0), 1.0, 1.0, 100.0);
//!
//! // projection · view · model
//! let mvp = model * view * projection;
//! let uniform: [f32; 16] = mvp.to_f32_array();
//! assert_eq!(uniform[11], -1.0);
//! ```

pub mod components;
pub mod error;
pub mod mat2;
pub mod mat2d;
pub mod mat3;
pub mod mat4;
pub mod prelude;
pub mod quat;
pub mod scalar;
pub mod upload;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use components::Components;
pub use error::{MathError, Result};
pub use mat2::Mat2;
pub use mat2d::Mat2d;
pub use mat3::Mat3;
pub use mat4::{FieldOfView, Mat4};
pub use quat::{EulerOrder, Quat};
pub use scalar::{approx_eq, approx_eq_eps, to_degree, to_radian, EPSILON};
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;

//! Common imports
//!
//! ```rust
//! use kestrel_math::prelude::*;
//! ```

pub use crate::components::Components;
pub use crate::mat2::Mat2;
pub use crate::mat2d::Mat2d;
pub use crate::mat3::Mat3;
pub use crate::mat4::{FieldOfView, Mat4};
pub use crate::quat::{EulerOrder, Quat};
pub use crate::scalar::{approx_eq, to_degree, to_radian, EPSILON};
pub use crate::vec2::Vec2;
pub use crate::vec3::Vec3;
pub use crate::vec4::Vec4;

//! Packing values into flat single-precision buffers for GPU uploads
//!
//! Shaders consume `f32` data, so values are narrowed on the way out. The
//! column-major storage order of every type carries over unchanged, which is
//! what `mat4x4<f32>` and `vec4<f32>` uniforms expect.

use crate::components::Components;
use crate::error::{MathError, Result};

/// Concatenates the components of every value as `f32`.
pub fn pack_f32<T: Components>(values: &[T]) -> Vec<f32> {
    let mut out = Vec::with_capacity(values.len() * T::LEN);
    for value in values {
        out.extend(value.as_slice().iter().map(|&v| v as f32));
    }
    out
}

/// Like [`pack_f32`], returned as native-endian bytes ready for a buffer write.
pub fn pack_f32_bytes<T: Components>(values: &[T]) -> Vec<u8> {
    bytemuck::cast_slice(&pack_f32(values)).to_vec()
}

/// Writes the `f32` components of `value` into the front of `dst`.
///
/// Returns the number of floats written, or [`MathError::LengthMismatch`] when
/// `dst` is too short. Extra room at the end of `dst` is left untouched.
pub fn write_f32<T: Components>(value: &T, dst: &mut [f32]) -> Result<usize> {
    if dst.len() < T::LEN {
        return Err(MathError::LengthMismatch {
            expected: T::LEN,
            found: dst.len(),
        });
    }
    for (out, &v) in dst.iter_mut().zip(value.as_slice()) {
        *out = v as f32;
    }
    Ok(T::LEN)
}

/// Raw `f64` bytes of a slice of values, without narrowing.
pub fn as_f64_bytes<T: Components>(values: &[T]) -> &[u8] {
    bytemuck::cast_slice(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Mat4, Quat, Vec3};

    #[test]
    fn test_pack_f32_concatenates_in_storage_order() {
        let packed = pack_f32(&[Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]);
        assert_eq!(packed, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert!(pack_f32::<Quat>(&[]).is_empty());
    }

    #[test]
    fn test_pack_mat4_column_major() {
        let m = Mat4::from_translation(Vec3::new(7.0, 8.0, 9.0));
        let packed = pack_f32(&[m]);
        assert_eq!(packed.len(), 16);
        assert_eq!(&packed[12..], &[7.0, 8.0, 9.0, 1.0]);
        assert_eq!(packed, m.to_f32_array().to_vec());
    }

    #[test]
    fn test_pack_f32_bytes() {
        let bytes = pack_f32_bytes(&[Quat::IDENTITY]);
        assert_eq!(bytes.len(), 16);
        let floats: &[f32] = bytemuck::cast_slice(&bytes);
        assert_eq!(floats, &[0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_write_f32() {
        let mut dst = [-1.0f32; 5];
        let written = write_f32(&Vec3::new(0.5, 1.5, 2.5), &mut dst).unwrap();
        assert_eq!(written, 3);
        assert_eq!(dst, [0.5, 1.5, 2.5, -1.0, -1.0]);

        let mut short = [0.0f32; 15];
        assert_eq!(
            write_f32(&Mat4::IDENTITY, &mut short),
            Err(MathError::LengthMismatch {
                expected: 16,
                found: 15
            })
        );
    }

    #[test]
    fn test_as_f64_bytes() {
        let v = [Vec3::ONE];
        assert_eq!(as_f64_bytes(&v).len(), 24);
        let back: &[f64] = bytemuck::cast_slice(as_f64_bytes(&v));
        assert_eq!(back, &[1.0, 1.0, 1.0]);
    }
}

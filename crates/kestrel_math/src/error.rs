//! Math error types

use thiserror::Error;

/// Errors raised when building values from raw component buffers
///
/// Numeric degeneracies (singular matrices, zero-length axes) never produce
/// an error; they resolve to documented fallback values instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Buffer length does not match the component count of the target type
    #[error("expected {expected} components, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A component is NaN or infinite
    #[error("component {index} is not finite")]
    NonFinite { index: usize },
}

/// Result type for component buffer conversions
pub type Result<T> = std::result::Result<T, MathError>;

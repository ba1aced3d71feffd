//! Errors produced by the spatial-algebra primitives.

use std::fmt::Display;

/// Errors that can occur while constructing or operating on spatial primitives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpatialError {
    /// A zero-magnitude axis was passed to `Quat::from_axis_angle` or `Mat3::rotation`.
    InvalidRotationAxis,
    /// A dense linear system was singular (pivot magnitude at or below tolerance).
    SingularMatrix,
    /// Two stacked/dense operands had incompatible partitions or dimensions.
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },
}

impl Display for SpatialError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpatialError::InvalidRotationAxis => {
                write!(f, "cannot build a rotation from a zero-magnitude axis")
            }
            SpatialError::SingularMatrix => {
                write!(f, "matrix is singular to working precision")
            }
            SpatialError::DimensionMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "dimension mismatch for '{name}': expected {expected}, got {got}"
            ),
        }
    }
}

impl std::error::Error for SpatialError {}

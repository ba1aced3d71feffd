//! Errors produced while constructing or driving joints.

use std::fmt::Display;

use dynamics_spatial::SpatialError;

/// Errors that can occur while constructing or operating on a [`crate::joint::Joint`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointError {
    /// Propagated from a spatial-primitive operation (e.g. building a rotation from a
    /// zero-magnitude axis).
    Spatial(SpatialError),
    /// A motor's post-lifting kind was neither `Acceleration` nor `Forcing`.
    UnsupportedMotorKind,
}

impl From<SpatialError> for JointError {
    fn from(err: SpatialError) -> Self {
        JointError::Spatial(err)
    }
}

impl Display for JointError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JointError::Spatial(err) => write!(f, "joint: {err}"),
            JointError::UnsupportedMotorKind => {
                write!(f, "motor's known kind is neither acceleration nor forcing")
            }
        }
    }
}

impl std::error::Error for JointError {}

//! Errors produced by the mechanism graph, the Featherstone recursion, and the integrator.

use std::fmt::Display;

use dynamics_joint::JointError;
use dynamics_spatial::SpatialError;

/// Errors that can occur while building a [`crate::world::World`] or driving a
/// [`crate::simulation::Simulation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlgorithmError {
    /// Propagated from a joint/motor construction error.
    Joint(JointError),
    /// Propagated from a spatial-primitive or stacked-vector/matrix operation.
    Spatial(SpatialError),
    /// Joint/body counts, stacked-partition, or matrix-vector sizes did not match.
    DimensionMismatch {
        name: &'static str,
        expected: usize,
        got: usize,
    },
    /// `jᵢ = sᵢ·Iᴬᵢ·sᵢ` was at or below zero during the articulated-inertia or dynamics pass,
    /// at the given joint index — a degenerate inertia or zero mass along the joint axis.
    SingularArticulation { joint: usize },
    /// A motor's post-lifting kind was neither `Acceleration` nor `Forcing`.
    UnsupportedMotorKind(JointError),
}

impl From<JointError> for AlgorithmError {
    fn from(err: JointError) -> Self {
        AlgorithmError::Joint(err)
    }
}

impl From<SpatialError> for AlgorithmError {
    fn from(err: SpatialError) -> Self {
        AlgorithmError::Spatial(err)
    }
}

impl Display for AlgorithmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmError::Joint(err) => write!(f, "{err}"),
            AlgorithmError::Spatial(err) => write!(f, "{err}"),
            AlgorithmError::DimensionMismatch {
                name,
                expected,
                got,
            } => write!(
                f,
                "dimension mismatch for '{name}': expected {expected}, got {got}"
            ),
            AlgorithmError::SingularArticulation { joint } => {
                write!(f, "singular articulated inertia at joint {joint}")
            }
            AlgorithmError::UnsupportedMotorKind(err) => {
                write!(f, "unsupported motor kind: {err}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {}

//! Convenience re-exports covering a typical build-and-simulate workflow.

// Mechanism graph
pub use crate::model::{JointId, Simulation, UnitSystem, World};

// Joints and drives
pub use crate::joint::{Joint, JointKind, MassProperties, Known, Motor, MotorDefinedKind};

// Errors
pub use crate::joint::JointError;
pub use crate::model::AlgorithmError;
pub use crate::spatial::SpatialError;

// Spatial primitives
pub use crate::spatial::{Mat3, Pose, Quat, SpatialInertia, StackedMatrix, StackedVector, Twist, Vec3, Vec6, Wrench};

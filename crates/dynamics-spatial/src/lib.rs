//! This crate is part of the `dynamics` ecosystem, and is not intended for direct use.
//!
//! Spatial-algebra primitives: 3-vectors, 3x3 matrices, unit quaternions, rigid-body poses,
//! 6-component spatial (screw) vectors used to express twists and wrenches, spatial inertia,
//! partition-indexed stacked vectors/matrices, and a dense LU solver.

pub mod errors;
pub mod inertia;
pub mod lu;
pub mod matrix3;
pub mod pose;
pub mod quaternion;
pub mod stacked;
pub mod vector3;
pub mod vector6;

pub use errors::SpatialError;
pub use inertia::SpatialInertia;
pub use matrix3::Mat3;
pub use pose::Pose;
pub use quaternion::Quat;
pub use stacked::{StackedMatrix, StackedVector};
pub use vector3::Vec3;
pub use vector6::{Twist, Vec6, Wrench};

//! This crate is part of the `dynamics` ecosystem, and is not intended for direct use.
//!
//! Single-degree-of-freedom joints (revolute, prismatic, screw) and their drives (motors).

pub mod errors;
pub mod joint;
pub mod motor;

pub use errors::JointError;
pub use joint::{Joint, JointKind, MassProperties};
pub use motor::{Known, Motor, MotorDefinedKind};

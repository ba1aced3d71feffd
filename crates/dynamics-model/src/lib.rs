//! This crate is part of the `dynamics` ecosystem, and is not intended for direct use.
//!
//! The mechanism graph (`World`, `Simulation`), the three-pass Featherstone forward-dynamics
//! recursion (`kinematics`, `articulated`, `dynamics`), and the RK4 `Simulation` integrator.

pub mod articulated;
pub mod dynamics;
pub mod errors;
pub mod kinematics;
pub mod simulation;
pub mod state;
pub mod world;

pub use errors::AlgorithmError;
pub use simulation::{HistorySample, Simulation};
pub use state::State;
pub use world::{JointId, UnitSystem, World};

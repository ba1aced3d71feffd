//! # **`dynamics`**: a forward-dynamics engine for articulated rigid-body mechanisms
//!
//! `dynamics` computes joint accelerations for a tree of rigid bodies connected by
//! single-degree-of-freedom joints (revolute, prismatic, screw), given prescribed joint drives,
//! gravity, and initial conditions, using Featherstone's spatial-algebra recursion, and advances
//! them in time with a 4th-order Runge-Kutta integrator.
//!
//! This library draws on Roy Featherstone's ["Rigid Body Dynamics
//! Algorithms"](https://link.springer.com/book/10.1007/978-1-4899-7560-7) for the theoretical
//! foundation of the articulated-body recursion.
//!
//! ## Features
//! - Spatial-algebra primitives (`Vec3`, `Mat3`, `Quat`, `Pose`, spatial twists/wrenches,
//!   spatial inertia) as immutable value types with operator overloads.
//! - A mechanism graph (`World`, `Joint`) built incrementally and flattened into a topologically
//!   ordered `Simulation`.
//! - Revolute, prismatic, and screw joints, each with a compiled scalar drive (`Motor`).
//! - The three-pass Featherstone forward-dynamics recursion (kinematics, articulated inertia,
//!   dynamics), run in `O(n)` per step.
//! - An adaptive RK4 integrator producing a trajectory and per-step residual diagnostics.
//!
//! ## Crates
//! The `dynamics` library is organized into several crates, each focusing on a specific aspect
//! of rigid-body dynamics:
//! - [`dynamics-rs`](https://docs.rs/crate/dynamics-rs/latest): this facade crate.
//! - [`dynamics-spatial`](https://docs.rs/crate/dynamics-spatial/latest): spatial-algebra
//!   primitives, spatial inertia, stacked vectors/matrices, and the dense LU solver.
//! - [`dynamics-joint`](https://docs.rs/crate/dynamics-joint/latest): joint geometry and drives.
//! - [`dynamics-model`](https://docs.rs/crate/dynamics-model/latest): the mechanism graph, the
//!   Featherstone recursion, and the RK4 `Simulation` integrator.

pub mod prelude;

pub use dynamics_joint as joint;
pub use dynamics_model as model;
pub use dynamics_spatial as spatial;

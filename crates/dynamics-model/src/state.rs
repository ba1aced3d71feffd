//! The mutable Featherstone working state: time, joint-space arrays, and the kinematics/
//! articulated/dynamics pass buffers they feed.

use dynamics_joint::{Joint, Known};
use dynamics_spatial::Vec3;

use crate::articulated::{articulated_pass, ArticulatedEntry};
use crate::dynamics::{dynamics_pass, residual_pass, DynamicsEntry};
use crate::errors::AlgorithmError;
use crate::kinematics::{kinematics_pass, KinematicsEntry};

/// The mutable per-step working state of a [`crate::simulation::Simulation`]: the joint-space
/// arrays `(q, q̇, q̈, τ)`, the per-joint drive kind, and the pass scratch buffers. Buffers are
/// allocated once (by [`State::new`]) and overwritten in place by every call to
/// [`State::do_featherstone`], matching §5's resource policy.
#[derive(Debug, Clone)]
pub struct State {
    pub t: f64,
    pub q: Vec<f64>,
    pub qdot: Vec<f64>,
    pub qddot: Vec<f64>,
    pub tau: Vec<f64>,
    known: Vec<Known>,
    q0: Vec<f64>,
    qdot0: Vec<f64>,
    kin: Vec<KinematicsEntry>,
    art: Vec<ArticulatedEntry>,
    dyn_entries: Vec<DynamicsEntry>,
}

impl State {
    /// Builds a state snapshot from a flattened joint array: `known[i]` is taken from each
    /// joint's motor, `q0[i]`/`qdot0[i]` from its initial conditions.
    #[must_use]
    pub fn new(joints: &[Joint]) -> Self {
        let n = joints.len();
        let q0: Vec<f64> = joints.iter().map(|j| j.initial_conditions().0).collect();
        let qdot0: Vec<f64> = joints.iter().map(|j| j.initial_conditions().1).collect();
        let known: Vec<Known> = joints.iter().map(|j| j.motor.known()).collect();
        Self {
            t: 0.0,
            q: q0.clone(),
            qdot: qdot0.clone(),
            qddot: vec![0.0; n],
            tau: vec![0.0; n],
            known,
            q0,
            qdot0,
            kin: Vec::with_capacity(n),
            art: Vec::with_capacity(n),
            dyn_entries: Vec::with_capacity(n),
        }
    }

    /// Restores `(t, q, q̇, q̈, τ)` to the snapshot taken at construction.
    pub fn reset(&mut self) {
        self.t = 0.0;
        self.q.copy_from_slice(&self.q0);
        self.qdot.copy_from_slice(&self.qdot0);
        self.qddot.iter_mut().for_each(|v| *v = 0.0);
        self.tau.iter_mut().for_each(|v| *v = 0.0);
    }

    /// Runs the three-pass Featherstone recursion (kinematics → articulated → dynamics) for the
    /// given `(t, q, q̇)`, writing `q̈` (and `τ` for acceleration-driven joints) into this state's
    /// buffers, then returns the best-effort diagnostic residual (§4.6).
    ///
    /// # Errors
    /// Returns [`AlgorithmError::DimensionMismatch`] if `q`/`qdot` don't match the joint count,
    /// or propagates [`AlgorithmError::Joint`]/[`AlgorithmError::SingularArticulation`] from the
    /// underlying passes.
    pub fn do_featherstone(
        &mut self,
        joints: &[Joint],
        parents: &[Option<usize>],
        gravity: Vec3,
        t: f64,
        q: &[f64],
        qdot: &[f64],
    ) -> Result<f64, AlgorithmError> {
        let n = joints.len();
        if q.len() != n || qdot.len() != n {
            return Err(AlgorithmError::DimensionMismatch {
                name: "State::do_featherstone",
                expected: n,
                got: q.len().max(qdot.len()),
            });
        }

        self.t = t;
        self.q.copy_from_slice(q);
        self.qdot.copy_from_slice(qdot);

        self.kin = kinematics_pass(joints, parents, q, qdot)?;

        for i in 0..n {
            let value = joints[i].motor.evaluate(t, q[i], qdot[i]);
            match self.known[i] {
                Known::Forcing => self.tau[i] = value,
                Known::Acceleration => self.qddot[i] = value,
            }
        }

        self.art = articulated_pass(parents, &self.kin, &self.tau, &self.known)?;
        self.dyn_entries = dynamics_pass(
            parents,
            &self.kin,
            &self.art,
            gravity,
            &self.known,
            &mut self.qddot,
            &mut self.tau,
        )?;

        Ok(residual_pass(parents, &self.kin, &self.dyn_entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamics_joint::Joint;
    use dynamics_spatial::{Mat3, Pose};

    #[test]
    fn test_reset_restores_initial_conditions() {
        let mut joint = Joint::new_revolute(Pose::identity(), Vec3::z()).unwrap();
        joint.add_mass_properties(1.0, Vec3::new(0.1, 0.0, 0.0), Mat3::identity());
        joint.set_initial_conditions((0.4, -0.2));
        let joints = vec![joint];
        let parents = vec![None];
        let mut state = State::new(&joints);

        state
            .do_featherstone(&joints, &parents, Vec3::zeros(), 1.0, &[0.9], &[0.1])
            .unwrap();
        assert_ne!(state.q[0], 0.4);

        state.reset();
        assert_eq!(state.q[0], 0.4);
        assert_eq!(state.qdot[0], -0.2);
        assert_eq!(state.t, 0.0);
    }
}

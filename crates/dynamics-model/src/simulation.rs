//! Owns a flattened joint tree and its [`State`], and drives it forward in time with a 4th-order
//! Runge-Kutta integrator (§4.7) operating on the stacked state `Y = [q | q̇]`.

use dynamics_joint::Joint;
use dynamics_spatial::{StackedVector, Vec3};

use crate::errors::AlgorithmError;
use crate::state::State;

/// Caps the per-step rotation of any joint to one degree (§4.7 step 1), expressed as the
/// numerator of `h_est = ROTATION_CAP_RAD / q̇_max`.
pub const ROTATION_CAP_RAD: f64 = std::f64::consts::PI / 180.0;

/// A single recorded sample `(t, Y)` in a [`Simulation`]'s history, where `Y` is the
/// 2-partition stacked vector `[q | q̇]`.
pub type HistorySample = (f64, StackedVector);

/// The flattened joint tree plus the mutable [`State`] that the Featherstone recursion and the
/// RK4 integrator advance. Built exclusively via [`crate::world::World::to_simulation`].
#[derive(Debug, Clone)]
pub struct Simulation {
    joints: Vec<Joint>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    gravity: Vec3,
    state: State,
    history: Vec<HistorySample>,
}

impl Simulation {
    /// Builds a simulation from an already-flattened, MKS-converted tree. `parents[i] < i` for
    /// every `i` is required by the Featherstone passes and is guaranteed by
    /// [`crate::world::World::to_simulation`], the only public constructor path.
    #[must_use]
    pub fn new(
        joints: Vec<Joint>,
        parents: Vec<Option<usize>>,
        children: Vec<Vec<usize>>,
        gravity: Vec3,
    ) -> Self {
        let state = State::new(&joints);
        let initial = Self::stacked_from_state(&state);
        Self {
            joints,
            parents,
            children,
            gravity,
            state,
            history: vec![(0.0, initial)],
        }
    }

    fn stacked_from_state(state: &State) -> StackedVector {
        StackedVector::from_parts(&[&state.q, &state.qdot])
    }

    /// The number of joints (degrees of freedom) in this simulation.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// The flattened joints, in topological (parent-before-child) order.
    #[must_use]
    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    /// `parents[i]` is the flattened index of joint `i`'s parent, or `None` for a root.
    #[must_use]
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// `children[i]` lists the flattened indices of joint `i`'s children.
    #[must_use]
    pub fn children(&self) -> &[Vec<usize>] {
        &self.children
    }

    /// Gravity, in MKS.
    #[must_use]
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }

    /// The current working state.
    #[must_use]
    pub fn state(&self) -> &State {
        &self.state
    }

    /// The recorded trajectory so far: an ordered sequence of `(t, Y)` samples, starting with
    /// the `t = 0` snapshot taken at construction (or the last [`Simulation::reset`]).
    #[must_use]
    pub fn history(&self) -> &[HistorySample] {
        &self.history
    }

    /// Restores `(t, q, q̇, q̈, τ)` to the construction-time snapshot and truncates history back
    /// to its single initial sample.
    pub fn reset(&mut self) {
        self.state.reset();
        self.history.truncate(1);
    }

    /// Evaluates `Y′ = [q̇ | q̈(t, Y)]`, running the Featherstone recursion via
    /// [`State::do_featherstone`], together with the pass's diagnostic residual (§4.6).
    ///
    /// # Errors
    /// Propagates [`AlgorithmError`] from the underlying Featherstone passes.
    fn derivative(&mut self, t: f64, y: &StackedVector) -> Result<(StackedVector, f64), AlgorithmError> {
        let n = self.joints.len();
        if y.parts() != [n, n] {
            return Err(AlgorithmError::DimensionMismatch {
                name: "Simulation::derivative",
                expected: n,
                got: y.as_slice().len(),
            });
        }
        let q = y.part(0);
        let qdot = y.part(1);
        let residual = self
            .state
            .do_featherstone(&self.joints, &self.parents, self.gravity, t, q, qdot)?;
        let yprime = StackedVector::from_parts(&[qdot, &self.state.qddot]);
        Ok((yprime, residual))
    }

    /// Advances the simulation by one RK4 step of nominal size `h`, clamped per §4.7 step 1 so
    /// that the fastest joint rotates at most one degree, then appends `(t, Y_next)` to history.
    ///
    /// Returns the maximum diagnostic residual (§4.6) observed across the step's four stage
    /// evaluations — a best-effort quantity that never influences the integrated state.
    ///
    /// # Errors
    /// Propagates [`AlgorithmError`] from any of the four stage evaluations.
    pub fn integrate(&mut self, h: f64) -> Result<f64, AlgorithmError> {
        let (t, y) = self.history.last().cloned().expect("history is never empty");

        let qdot_max = y.part(1).iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let h = if qdot_max > 0.0 {
            h.min(ROTATION_CAP_RAD / qdot_max)
        } else {
            h
        };

        let (k0, r0) = self.derivative(t, &y)?;
        let y1 = y.add(&k0.scale(h / 2.0))?;
        let (k1, r1) = self.derivative(t + h / 2.0, &y1)?;
        let y2 = y.add(&k1.scale(h / 2.0))?;
        let (k2, r2) = self.derivative(t + h / 2.0, &y2)?;
        let y3 = y.add(&k2.scale(h))?;
        let (k3, r3) = self.derivative(t + h, &y3)?;

        let sum = k0.add(&k1.scale(2.0))?.add(&k2.scale(2.0))?.add(&k3)?;
        let y_next = y.add(&sum.scale(h / 6.0))?;

        self.history.push((t + h, y_next));
        Ok(r0.max(r1).max(r2).max(r3))
    }

    /// Divides `end_time − t_now` into `steps` equal sub-steps, calling [`Simulation::integrate`]
    /// for each and reducing the final sub-step so the run lands exactly on `end_time`. Returns
    /// the maximum per-step residual observed across the whole run (§4.7's "overload").
    ///
    /// # Errors
    /// Returns [`AlgorithmError::DimensionMismatch`] if `steps == 0`, or propagates an error from
    /// the underlying [`Simulation::integrate`] calls.
    pub fn run_to(&mut self, end_time: f64, steps: usize) -> Result<f64, AlgorithmError> {
        if steps == 0 {
            return Err(AlgorithmError::DimensionMismatch {
                name: "Simulation::run_to: steps",
                expected: 1,
                got: 0,
            });
        }

        let t_now = self.history.last().expect("history is never empty").0;
        let h = (end_time - t_now) / steps as f64;
        let mut max_residual = 0.0_f64;

        for i in 0..steps {
            let step = if i + 1 == steps {
                end_time - self.history.last().expect("history is never empty").0
            } else {
                h
            };
            max_residual = max_residual.max(self.integrate(step)?);
        }

        Ok(max_residual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dynamics_joint::Motor;
    use dynamics_spatial::{Mat3, Pose};

    fn pendulum() -> Simulation {
        let mut joint = Joint::new_revolute(Pose::identity(), Vec3::z()).unwrap();
        let l = 0.14905;
        let i_zz = (0.02_f64.powi(2) + 0.30_f64.powi(2)) / 12.0;
        joint.add_mass_properties(
            1.0,
            Vec3::new(l, 0.0, 0.0),
            Mat3::symmetric(i_zz, i_zz, i_zz, 0.0, 0.0, 0.0),
        );
        joint.set_initial_conditions((std::f64::consts::FRAC_PI_6, 0.0));
        joint.set_motor(Motor::const_forcing(0.0));
        Simulation::new(vec![joint], vec![None], vec![vec![]], Vec3::new(0.0, -9.80665, 0.0))
    }

    #[test]
    fn test_initial_history_sample_matches_initial_conditions() {
        let sim = pendulum();
        assert_eq!(sim.history().len(), 1);
        let (t0, y0) = &sim.history()[0];
        assert_eq!(*t0, 0.0);
        assert_eq!(y0.part(0)[0], std::f64::consts::FRAC_PI_6);
        assert_eq!(y0.part(1)[0], 0.0);
    }

    #[test]
    fn test_single_step_advances_time_and_history() {
        let mut sim = pendulum();
        sim.integrate(1e-3).unwrap();
        assert_eq!(sim.history().len(), 2);
        assert!((sim.history()[1].0 - 1e-3).abs() < 1e-15);
    }

    #[test]
    fn test_reset_truncates_history() {
        let mut sim = pendulum();
        sim.integrate(1e-3).unwrap();
        sim.integrate(1e-3).unwrap();
        assert_eq!(sim.history().len(), 3);
        sim.reset();
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.history()[0].1.part(0)[0], std::f64::consts::FRAC_PI_6);
    }

    #[test]
    fn test_run_to_lands_exactly_on_end_time() {
        let mut sim = pendulum();
        sim.run_to(0.1, 10).unwrap();
        let (t_final, _) = sim.history().last().unwrap();
        assert!((t_final - 0.1).abs() < 1e-12);
        assert_eq!(sim.history().len(), 11);
    }

    #[test]
    fn test_run_to_rejects_zero_steps() {
        let mut sim = pendulum();
        assert!(matches!(
            sim.run_to(1.0, 0),
            Err(AlgorithmError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_singular_configuration_surfaces_on_first_step() {
        let root = Joint::new_prismatic(Pose::identity(), Vec3::x()).unwrap();
        let child = Joint::new_prismatic(Pose::identity(), Vec3::x()).unwrap();
        let mut sim = Simulation::new(
            vec![root, child],
            vec![None, Some(0)],
            vec![vec![1], vec![]],
            Vec3::zeros(),
        );
        assert!(matches!(
            sim.integrate(1e-3),
            Err(AlgorithmError::SingularArticulation { joint: 1 })
        ));
    }
}

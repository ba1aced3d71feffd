//! The outward dynamics pass (§4.5) and the diagnostic residual check (§4.6).

use dynamics_joint::Known;
use dynamics_spatial::{Twist, Vec3, Wrench};

use crate::articulated::{ArticulatedEntry, ARTICULATION_TOLERANCE};
use crate::errors::AlgorithmError;
use crate::kinematics::KinematicsEntry;

/// Per-joint working values produced by the dynamics pass.
#[derive(Debug, Clone, Copy)]
pub struct DynamicsEntry {
    /// The joint's spatial acceleration `aᵢ`.
    pub accel: Twist,
    /// The joint's net spatial force `fᵢ`.
    pub force: Wrench,
}

/// Runs the outward dynamics pass, writing `qddot`/`tau` in place: for `Forcing` joints `qddot`
/// is solved for, for `Acceleration` joints `tau` (the reaction) is computed.
///
/// # Errors
/// Returns [`AlgorithmError::SingularArticulation`] if a `Forcing` joint's `jᵢ = sᵢ·Iᴬᵢ·sᵢ` has
/// magnitude at or below [`ARTICULATION_TOLERANCE`].
#[allow(clippy::too_many_arguments)]
pub fn dynamics_pass(
    parents: &[Option<usize>],
    kin: &[KinematicsEntry],
    art: &[ArticulatedEntry],
    gravity: Vec3,
    known: &[Known],
    qddot: &mut [f64],
    tau: &mut [f64],
) -> Result<Vec<DynamicsEntry>, AlgorithmError> {
    let n = kin.len();
    let base_accel = Twist::new(-gravity, Vec3::zeros());
    let mut entries: Vec<DynamicsEntry> = Vec::with_capacity(n);

    for i in 0..n {
        let a_parent = match parents[i] {
            Some(p) => entries[p].accel,
            None => base_accel,
        };
        let s = kin[i].s;

        match known[i] {
            Known::Forcing => {
                let l = art[i].inertia * s;
                let j = s.dot(&l);
                if j.abs() <= ARTICULATION_TOLERANCE {
                    return Err(AlgorithmError::SingularArticulation { joint: i });
                }
                let rhs = art[i].inertia * (a_parent + kin[i].bias_accel) + art[i].bias;
                qddot[i] = (tau[i] - s.dot(&rhs)) / j;
            }
            Known::Acceleration => {
                let rhs =
                    art[i].inertia * (a_parent + kin[i].bias_accel + s * qddot[i]) + art[i].bias;
                tau[i] = s.dot(&rhs);
            }
        }

        let a_i = s * qddot[i] + a_parent + kin[i].bias_accel;
        let f_i = art[i].inertia * a_i + art[i].bias;
        entries.push(DynamicsEntry {
            accel: a_i,
            force: f_i,
        });
    }

    Ok(entries)
}

/// Recomputes the per-body Newton-Euler residual `rᵢ = (fᵢ − Σ_children fₙ + wᵢ) − (Iᵢ·aᵢ + pᵢ)`
/// as a fourth, inward, diagnostic-only pass (§4.6 implementation note); never mutates `qddot`,
/// `tau`, or any other integrated quantity. Gravity wrench `wᵢ` is always zero (§9 note (c)).
#[must_use]
pub fn residual_pass(
    parents: &[Option<usize>],
    kin: &[KinematicsEntry],
    dyn_entries: &[DynamicsEntry],
) -> f64 {
    let n = kin.len();
    let mut child_force_sum = vec![Wrench::zeros(); n];
    let mut max_residual = 0.0_f64;

    for i in (0..n).rev() {
        let lhs = dyn_entries[i].force - child_force_sum[i];
        let rhs = kin[i].inertia * dyn_entries[i].accel + kin[i].bias_force;
        let r = lhs - rhs;
        let r_inf = r.as_slice().iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        max_residual = max_residual.max(r_inf);

        if let Some(p) = parents[i] {
            child_force_sum[p] = child_force_sum[p] + dyn_entries[i].force;
        }
    }

    max_residual
}

//! The outward kinematics pass (§4.3): for each joint in ascending (parent-before-child) order,
//! composes its top-frame pose, spatial axis, velocity, bias acceleration, and world-expressed
//! spatial inertia/momentum/bias-force.

use dynamics_joint::Joint;
use dynamics_spatial::{Mat3, Pose, SpatialInertia, Twist, Wrench, Vec6};

use crate::errors::AlgorithmError;

/// Per-joint working values produced by the kinematics pass.
#[derive(Debug, Clone)]
pub struct KinematicsEntry {
    /// The joint's top (outboard) frame pose in the world frame.
    pub top: Pose,
    /// The joint's spatial axis `sᵢ`, expressed in the world frame.
    pub s: Vec6,
    /// The joint's spatial velocity `vᵢ` (twist).
    pub v: Twist,
    /// The bias acceleration `κᵢ = vᵢ × (sᵢ·q̇ᵢ)`.
    pub bias_accel: Twist,
    /// The body's spatial inertia `Iᵢ`, about `top`'s origin, in world-axis orientation.
    pub inertia: SpatialInertia,
    /// The body's spatial momentum `ℓᵢ = Iᵢ·vᵢ`.
    pub momentum: Wrench,
    /// The bias force `pᵢ = vᵢ × ℓᵢ`.
    pub bias_force: Wrench,
}

/// Runs the outward kinematics pass over the flattened tree.
///
/// `parents[i] < i` for all `i` is required by the caller (`Simulation`/`World::flatten`
/// guarantee this); this function processes joints in ascending index order and relies on it.
///
/// # Errors
/// Returns [`AlgorithmError::Joint`] if a joint's local step cannot be built (only possible for a
/// malformed axis, which joint construction already rules out).
pub fn kinematics_pass(
    joints: &[Joint],
    parents: &[Option<usize>],
    q: &[f64],
    qdot: &[f64],
) -> Result<Vec<KinematicsEntry>, AlgorithmError> {
    let n = joints.len();
    let mut entries: Vec<KinematicsEntry> = Vec::with_capacity(n);

    for i in 0..n {
        let (v_parent, pose_parent) = match parents[i] {
            Some(p) => (entries[p].v, entries[p].top),
            None => (Twist::zeros(), Pose::identity()),
        };

        let joint = &joints[i];
        let step = joint.get_local_step(q[i])?;
        let top = pose_parent + step;
        let s = joint.get_spatial_axis(&top);
        let joint_motion = s * qdot[i];
        let v = v_parent + joint_motion;
        let bias_accel = v.cross_twist_twist(&joint_motion);

        let com_world = top.orientation.rotate(&joint.mass.com);
        let r = Mat3::from(&top.orientation);
        let i_world = r * joint.mass.i_c * r.transpose();
        let inertia = SpatialInertia::new(joint.mass.mass, com_world, i_world);
        let momentum = inertia * v;
        let bias_force = v.cross_twist_wrench(&momentum);

        entries.push(KinematicsEntry {
            top,
            s,
            v,
            bias_accel,
            inertia,
            momentum,
            bias_force,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use dynamics_spatial::{Pose, Vec3};

    #[test]
    fn test_kinematics_monotonicity() {
        let root = Joint::new_revolute(Pose::identity(), Vec3::z()).unwrap();
        let mut child = Joint::new_prismatic(Pose::translation(Vec3::new(1.0, 0.0, 0.0)), Vec3::x()).unwrap();
        child.add_mass_properties(1.0, Vec3::zeros(), Mat3::identity());
        let joints = vec![root, child];
        let parents = vec![None, Some(0)];
        let q = [0.3, 0.5];
        let qdot = [0.7, -0.2];

        let kin = kinematics_pass(&joints, &parents, &q, &qdot).unwrap();
        let expected_child_v = kin[0].v + kin[1].s * qdot[1];
        assert_relative_eq!(
            kin[1].v.linear().x_coord(),
            expected_child_v.linear().x_coord(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            kin[1].v.angular().z_coord(),
            expected_child_v.angular().z_coord(),
            epsilon = 1e-12
        );
    }
}

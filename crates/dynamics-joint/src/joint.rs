//! A single-DOF joint: its geometry (kind, axis, pitch), the mass rigidly attached to its moving
//! body, its initial conditions, and its drive.

use dynamics_spatial::{Mat3, Pose, Quat, Vec3, Vec6};

use crate::errors::JointError;
use crate::motor::Motor;

/// The kind of a joint, carrying the geometric parameters specific to that kind.
///
/// Collapses the source's joint-kind-plus-axis-plus-pitch bundle into a single tagged union
/// (§9 "Sum types"): `get_local_step`/`get_spatial_axis` dispatch on the tag directly instead of
/// going through a `JointModel` trait object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointKind {
    /// Rotates about `axis` (a unit vector in the joint's local frame); zero pitch.
    Revolute { axis: Vec3 },
    /// Translates along `axis` (a unit vector in the joint's local frame); infinite pitch.
    Prismatic { axis: Vec3 },
    /// Rotates about and translates along `axis` in lockstep, at `pitch` length-per-radian.
    Screw { axis: Vec3, pitch: f64 },
}

impl JointKind {
    fn axis(&self) -> Vec3 {
        match *self {
            JointKind::Revolute { axis } | JointKind::Prismatic { axis } | JointKind::Screw { axis, .. } => axis,
        }
    }
}

/// Mass rigidly attached to a joint's moving body, recorded in the joint's own undisplaced
/// local frame: mass, centre of mass, and rotational inertia about that centre of mass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MassProperties {
    pub mass: f64,
    pub com: Vec3,
    pub i_c: Mat3,
}

impl MassProperties {
    #[must_use]
    pub fn new(mass: f64, com: Vec3, i_c: Mat3) -> Self {
        Self { mass, com, i_c }
    }

    /// No mass attached: a massless body (e.g. a frame joint with no physical rigid body).
    #[must_use]
    pub fn zero() -> Self {
        Self::new(0.0, Vec3::zeros(), Mat3::zeros())
    }
}

impl Default for MassProperties {
    fn default() -> Self {
        Self::zero()
    }
}

/// A single-degree-of-freedom joint: kind/geometry, local offset from the parent's top frame,
/// rigidly attached mass, initial conditions, and a drive.
#[derive(Debug, Clone)]
pub struct Joint {
    pub kind: JointKind,
    pub local_pose: Pose,
    pub mass: MassProperties,
    pub motor: Motor,
    q0: f64,
    qdot0: f64,
}

impl Joint {
    fn new(kind: JointKind, local_pose: Pose) -> Self {
        Self {
            kind,
            local_pose,
            mass: MassProperties::zero(),
            motor: Motor::const_forcing(0.0),
            q0: 0.0,
            qdot0: 0.0,
        }
    }

    /// Builds a revolute joint rotating about `axis` (normalised internally).
    ///
    /// # Errors
    /// Returns [`JointError::Spatial`]`(`[`dynamics_spatial::SpatialError::InvalidRotationAxis`]`)`
    /// if `axis` has zero magnitude.
    pub fn new_revolute(local_pose: Pose, axis: Vec3) -> Result<Self, JointError> {
        let axis = axis
            .normalized()
            .ok_or(dynamics_spatial::SpatialError::InvalidRotationAxis)?;
        Ok(Self::new(JointKind::Revolute { axis }, local_pose))
    }

    /// Builds a prismatic joint translating along `axis` (normalised internally).
    ///
    /// # Errors
    /// Same as [`Joint::new_revolute`].
    pub fn new_prismatic(local_pose: Pose, axis: Vec3) -> Result<Self, JointError> {
        let axis = axis
            .normalized()
            .ok_or(dynamics_spatial::SpatialError::InvalidRotationAxis)?;
        Ok(Self::new(JointKind::Prismatic { axis }, local_pose))
    }

    /// Builds a screw joint coupling rotation about and translation along `axis` at the given
    /// `pitch` (length per radian).
    ///
    /// # Errors
    /// Same as [`Joint::new_revolute`].
    pub fn new_screw(local_pose: Pose, axis: Vec3, pitch: f64) -> Result<Self, JointError> {
        let axis = axis
            .normalized()
            .ok_or(dynamics_spatial::SpatialError::InvalidRotationAxis)?;
        Ok(Self::new(JointKind::Screw { axis, pitch }, local_pose))
    }

    /// Attaches rigid mass properties, recorded in this joint's own undisplaced local frame.
    pub fn add_mass_properties(&mut self, mass: f64, com: Vec3, i_c: Mat3) {
        self.mass = MassProperties::new(mass, com, i_c);
    }

    /// Sets the drive.
    pub fn set_motor(&mut self, motor: Motor) {
        self.motor = motor;
    }

    /// Sets the initial `(q₀, q̇₀)` snapshot.
    pub fn set_initial_conditions(&mut self, (q0, qdot0): (f64, f64)) {
        self.q0 = q0;
        self.qdot0 = qdot0;
    }

    /// The initial `(q₀, q̇₀)` snapshot.
    #[must_use]
    pub fn initial_conditions(&self) -> (f64, f64) {
        (self.q0, self.qdot0)
    }

    /// The pose produced by displacing this joint by `q` along its axis (§4.2).
    ///
    /// # Errors
    /// Returns [`JointError::Spatial`] if a rotation cannot be built (only possible if the
    /// joint's axis was somehow non-unit, which the constructors above rule out).
    pub fn get_local_step(&self, q: f64) -> Result<Pose, JointError> {
        let axis = self.kind.axis();
        Ok(match self.kind {
            JointKind::Revolute { .. } => Pose::rotation(Quat::from_axis_angle(&axis, q)?),
            JointKind::Prismatic { .. } => Pose::translation(axis * q),
            JointKind::Screw { pitch, .. } => {
                Pose::new(axis * (q * pitch), Quat::from_axis_angle(&axis, q)?)
            }
        })
    }

    /// The spatial axis `sᵢ` expressed in the top (world) frame, given the joint's already
    /// displaced top pose (§4.2).
    #[must_use]
    pub fn get_spatial_axis(&self, top_pose: &Pose) -> Vec6 {
        let axis_local = self.kind.axis();
        let z = top_pose.orientation.rotate(&axis_local);
        let r = top_pose.position;
        match self.kind {
            JointKind::Revolute { .. } => Vec6::new(r.cross(&z), z),
            JointKind::Prismatic { .. } => Vec6::new(z, Vec3::zeros()),
            JointKind::Screw { pitch, .. } => Vec6::new(r.cross(&z) + z * pitch, z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_revolute_local_step_is_pure_rotation() {
        let joint = Joint::new_revolute(Pose::identity(), Vec3::z()).unwrap();
        let step = joint.get_local_step(std::f64::consts::FRAC_PI_2).unwrap();
        assert_relative_eq!(step.position.as_slice()[..], Vec3::zeros().as_slice()[..]);
        let rotated = step.orientation.rotate(&Vec3::x());
        assert_relative_eq!(rotated.as_slice()[..], Vec3::y().as_slice()[..], epsilon = 1e-12);
    }

    #[test]
    fn test_prismatic_local_step_is_pure_translation() {
        let joint = Joint::new_prismatic(Pose::identity(), Vec3::x()).unwrap();
        let step = joint.get_local_step(2.5).unwrap();
        assert_relative_eq!(step.position.as_slice()[..], Vec3::new(2.5, 0.0, 0.0).as_slice()[..]);
        assert_relative_eq!(step.orientation.w, 1.0);
    }

    #[test]
    fn test_screw_couples_rotation_and_translation() {
        let joint = Joint::new_screw(Pose::identity(), Vec3::z(), 0.1).unwrap();
        let step = joint.get_local_step(std::f64::consts::PI).unwrap();
        assert_relative_eq!(
            step.position.as_slice()[..],
            Vec3::new(0.0, 0.0, 0.1 * std::f64::consts::PI).as_slice()[..],
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_zero_axis_rejected() {
        assert!(Joint::new_revolute(Pose::identity(), Vec3::zeros()).is_err());
    }

    #[test]
    fn test_prismatic_spatial_axis_has_no_angular_part() {
        let joint = Joint::new_prismatic(Pose::identity(), Vec3::x()).unwrap();
        let top = Pose::identity();
        let s = joint.get_spatial_axis(&top);
        assert_relative_eq!(s.angular().as_slice()[..], Vec3::zeros().as_slice()[..]);
        assert_relative_eq!(s.linear().as_slice()[..], Vec3::x().as_slice()[..]);
    }

    #[test]
    fn test_revolute_spatial_axis_lever_arm() {
        let joint = Joint::new_revolute(Pose::translation(Vec3::new(1.0, 0.0, 0.0)), Vec3::z()).unwrap();
        let top = Pose::translation(Vec3::new(1.0, 0.0, 0.0));
        let s = joint.get_spatial_axis(&top);
        assert_relative_eq!(s.angular().as_slice()[..], Vec3::z().as_slice()[..]);
        // r × ẑ with r = (1,0,0), ẑ = (0,0,1) → (0·1-0·0, 0·0-1·1, 1·0-0·0) = (0,-1,0)
        assert_relative_eq!(
            s.linear().as_slice()[..],
            Vec3::new(0.0, -1.0, 0.0).as_slice()[..],
            epsilon = 1e-12
        );
    }
}

//! Defines rigid-body **poses** (position + orientation) and their composition.

use std::ops::Add;

use crate::quaternion::Quat;
use crate::vector3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
/// A rigid-body pose: a position and an orientation.
///
/// Composition is not commutative. `a + b` yields `(a.position + a.orientation.rotate(b.position),
/// a.orientation * b.orientation)` — "apply `b` in `a`'s frame, then `a`".
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Pose {
    /// Creates a new pose from a position and an orientation.
    #[must_use]
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Creates a pure translation (identity orientation).
    #[must_use]
    pub fn translation(position: Vec3) -> Self {
        Self::new(position, Quat::identity())
    }

    /// Creates a pure rotation (zero position).
    #[must_use]
    pub fn rotation(orientation: Quat) -> Self {
        Self::new(Vec3::zeros(), orientation)
    }

    /// The identity pose: zero position, identity orientation.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(Vec3::zeros(), Quat::identity())
    }

    /// Returns the inverse pose, such that `self + self.inverse() == Pose::identity()`.
    ///
    /// The orientation is assumed unit-magnitude, as guaranteed by every constructor in this
    /// crate; its inverse is therefore its conjugate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        let r_inv = self.orientation.conjugate();
        Self::new(-r_inv.rotate(&self.position), r_inv)
    }

    /// Transforms a point given in this pose's local frame into the parent frame.
    #[must_use]
    pub fn act(&self, point: &Vec3) -> Vec3 {
        self.orientation.rotate(point) + self.position
    }
}

impl Add for Pose {
    type Output = Pose;

    fn add(self, rhs: Self) -> Self::Output {
        Pose::new(
            self.position + self.orientation.rotate(&rhs.position),
            self.orientation * rhs.orientation,
        )
    }
}

impl Add<&Pose> for Pose {
    type Output = Pose;

    fn add(self, rhs: &Pose) -> Self::Output {
        self + *rhs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_is_neutral() {
        let p = Pose::new(Vec3::new(1.0, 2.0, 3.0), Quat::identity());
        let composed = p + Pose::identity();
        assert_relative_eq!(composed.position.0, p.position.0);
    }

    #[test]
    fn test_pose_inverse_law() {
        let axis = Vec3::new(0.2, 0.7, -0.3);
        let q = Quat::from_axis_angle(&axis, 1.1).unwrap();
        let p = Pose::new(Vec3::new(1.0, -2.0, 0.5), q);
        let composed = p + p.inverse();
        assert_relative_eq!(composed.position.0, Pose::identity().position.0, epsilon = 1e-12);
        assert_relative_eq!(composed.orientation.w, 1.0, epsilon = 1e-12);
        assert_relative_eq!(composed.orientation.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(composed.orientation.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(composed.orientation.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_composition_inverse_reversal() {
        let qa = Quat::from_axis_angle(&Vec3::x(), 0.3).unwrap();
        let qb = Quat::from_axis_angle(&Vec3::y(), -0.6).unwrap();
        let a = Pose::new(Vec3::new(1.0, 0.0, 0.0), qa);
        let b = Pose::new(Vec3::new(0.0, 1.0, 2.0), qb);

        let lhs = (a + b).inverse();
        let rhs = b.inverse() + a.inverse();

        assert_relative_eq!(lhs.position.0, rhs.position.0, epsilon = 1e-10);
        assert_relative_eq!(lhs.orientation.w, rhs.orientation.w, epsilon = 1e-10);
        assert_relative_eq!(lhs.orientation.x, rhs.orientation.x, epsilon = 1e-10);
        assert_relative_eq!(lhs.orientation.y, rhs.orientation.y, epsilon = 1e-10);
        assert_relative_eq!(lhs.orientation.z, rhs.orientation.z, epsilon = 1e-10);
    }
}

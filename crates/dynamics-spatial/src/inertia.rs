//! Defines **spatial inertia**: the 6x6 symmetric mass/inertia operator mapping a twist to a
//! wrench (momentum).

use nalgebra::Matrix6;
use std::ops::{Add, Mul, Sub};

use crate::matrix3::Mat3;
use crate::vector3::Vec3;
use crate::vector6::{Vec6, Wrench};

#[derive(Debug, Clone, Copy, PartialEq)]
/// The spatial inertia of a rigid body about a chosen origin, built from its mass, the
/// world-frame offset of its centre of mass, and its rotational inertia tensor about that
/// centre of mass.
pub struct SpatialInertia(Matrix6<f64>);

impl SpatialInertia {
    /// Builds the spatial inertia `[[m·1, −m·[c]×], [m·[c]×, I_c − m·[c]×·[c]×]]` about the
    /// current origin, from mass `m`, centre-of-mass offset `c`, and rotational inertia `i_c`
    /// about that centre of mass.
    #[must_use]
    pub fn new(mass: f64, com: Vec3, i_c: Mat3) -> Self {
        let c_cross = Mat3::skew(&com);
        let top_left = Mat3::identity() * mass;
        let top_right = (c_cross * mass) * -1.0;
        let bottom_left = c_cross * mass;
        let bottom_right = i_c - (c_cross * c_cross) * mass;

        let mut m = Matrix6::zeros();
        m.fixed_view_mut::<3, 3>(0, 0).copy_from(top_left.inner());
        m.fixed_view_mut::<3, 3>(0, 3).copy_from(top_right.inner());
        m.fixed_view_mut::<3, 3>(3, 0).copy_from(bottom_left.inner());
        m.fixed_view_mut::<3, 3>(3, 3)
            .copy_from(bottom_right.inner());
        Self(m)
    }

    /// Returns the zero spatial inertia.
    #[must_use]
    pub fn zeros() -> Self {
        Self(Matrix6::zeros())
    }

    /// Builds the rank-one operator `scale · (u uᵀ)`.
    ///
    /// Used by the articulated-body recursion to subtract a child joint's contribution,
    /// `Uᵢ Uᵢᵀ / Dᵢ`, from its parent's composite inertia.
    #[must_use]
    pub fn scaled_outer(u: &Vec6, scale: f64) -> Self {
        Self((u.0 * u.0.transpose()) * scale)
    }

    /// Applies the articulated-body projector `1 − t·sᵀ` on the left of this inertia:
    /// `(1 − t·sᵀ)·self`.
    ///
    /// Used by the inward articulated-inertia pass to accumulate a child's contribution onto
    /// its parent's composite inertia.
    #[must_use]
    pub fn premultiply_projector(&self, t: &Vec6, s: &Vec6) -> Self {
        let outer = t.0 * s.0.transpose();
        Self(self.0 - outer * self.0)
    }
}

impl Mul<Vec6> for SpatialInertia {
    type Output = Wrench;

    /// Maps a twist to the wrench (momentum) it carries under this inertia.
    fn mul(self, rhs: Vec6) -> Self::Output {
        let result = self.0 * rhs.0;
        Vec6::from_slice(result.as_slice().try_into().unwrap())
    }
}

impl Mul<Vec6> for &SpatialInertia {
    type Output = Wrench;

    fn mul(self, rhs: Vec6) -> Self::Output {
        let result = self.0 * rhs.0;
        Vec6::from_slice(result.as_slice().try_into().unwrap())
    }
}

impl Add for SpatialInertia {
    type Output = SpatialInertia;

    fn add(self, rhs: Self) -> Self::Output {
        SpatialInertia(self.0 + rhs.0)
    }
}

impl Sub for SpatialInertia {
    type Output = SpatialInertia;

    fn sub(self, rhs: Self) -> Self::Output {
        SpatialInertia(self.0 - rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_mass_at_origin_is_diagonal() {
        let inertia = SpatialInertia::new(2.0, Vec3::zeros(), Mat3::identity());
        let twist = Vec6::new(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros());
        let wrench = inertia * twist;
        assert_relative_eq!(wrench.linear().0, Vec3::new(2.0, 0.0, 0.0).0);
        assert_relative_eq!(wrench.angular().0, Vec3::zeros().0);
    }

    #[test]
    fn test_offset_com_couples_linear_and_angular() {
        let com = Vec3::new(1.0, 0.0, 0.0);
        let inertia = SpatialInertia::new(1.0, com, Mat3::zeros());
        let twist = Vec6::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 1.0));
        let wrench = inertia * twist;
        // A pure angular rate about z, applied at a frame offset from the CoM along x,
        // produces a nonzero linear momentum component.
        assert!(wrench.linear().norm() > 0.0);
    }

    #[test]
    fn test_additive() {
        let a = SpatialInertia::new(1.0, Vec3::zeros(), Mat3::identity());
        let b = SpatialInertia::new(2.0, Vec3::zeros(), Mat3::identity());
        let combined = a + b;
        let twist = Vec6::new(Vec3::new(1.0, 0.0, 0.0), Vec3::zeros());
        let wrench = combined * twist;
        assert_relative_eq!(wrench.linear().0, Vec3::new(3.0, 0.0, 0.0).0);
    }
}

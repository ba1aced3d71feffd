//! Defines **6D spatial vectors** (twists and wrenches) and the spatial cross-product operators.

use nalgebra::Vector6;
use std::ops::{Add, Mul, Sub};

use crate::vector3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// A 6D spatial vector: a linear (translational) part stacked above an angular (rotational)
/// part. A **twist** carries (linear velocity, angular velocity); a **wrench** carries (force,
/// moment). Both share the same algebra and only differ in meaning.
pub struct Vec6(pub(crate) Vector6<f64>);

/// A spatial velocity or acceleration: `(linear, angular)`.
pub type Twist = Vec6;
/// A spatial force or momentum: `(force, moment)`.
pub type Wrench = Vec6;

impl Vec6 {
    /// Builds a spatial vector from its linear (top) and angular (bottom) halves.
    #[must_use]
    pub fn new(linear: Vec3, angular: Vec3) -> Self {
        let [lx, ly, lz] = *linear.as_slice();
        let [ax, ay, az] = *angular.as_slice();
        Self(Vector6::new(lx, ly, lz, ax, ay, az))
    }

    /// Returns the zero spatial vector.
    #[must_use]
    pub fn zeros() -> Self {
        Self(Vector6::zeros())
    }

    /// Returns the linear (translational) half: linear velocity for a twist, force for a wrench.
    #[must_use]
    pub fn linear(&self) -> Vec3 {
        Vec3::new(self.0[0], self.0[1], self.0[2])
    }

    /// Returns the angular (rotational) half: angular velocity for a twist, moment for a wrench.
    #[must_use]
    pub fn angular(&self) -> Vec3 {
        Vec3::new(self.0[3], self.0[4], self.0[5])
    }

    /// Returns the six components in `[linear; angular]` order.
    #[must_use]
    pub fn as_slice(&self) -> [f64; 6] {
        self.0.as_slice().try_into().unwrap()
    }

    /// Builds a spatial vector from six components in `[linear; angular]` order.
    #[must_use]
    pub fn from_slice(s: &[f64; 6]) -> Self {
        Self(Vector6::from_row_slice(s))
    }

    /// Dot product.
    #[must_use]
    pub fn dot(&self, other: &Vec6) -> f64 {
        self.0.dot(&other.0)
    }

    /// The twist-twist Lie bracket `self × other`, yielding a bias acceleration twist.
    ///
    /// For `self = (v₁, ω₁)` and `other = (v₂, ω₂)`, this is `(ω₁×v₂ + v₁×ω₂, ω₁×ω₂)`.
    #[must_use]
    pub fn cross_twist_twist(&self, other: &Vec6) -> Twist {
        let (v1, w1) = (self.linear(), self.angular());
        let (v2, w2) = (other.linear(), other.angular());
        Vec6::new(w1.cross(&v2) + v1.cross(&w2), w1.cross(&w2))
    }

    /// The twist-wrench Lie bracket `self ×* wrench`, yielding a momentum rate-of-change wrench.
    ///
    /// For `self = (v, ω)` and `wrench = (f, m)`, this is `(ω×f, v×f + ω×m)`.
    #[must_use]
    pub fn cross_twist_wrench(&self, wrench: &Wrench) -> Wrench {
        let (v, w) = (self.linear(), self.angular());
        let (f, m) = (wrench.linear(), wrench.angular());
        Vec6::new(w.cross(&f), v.cross(&f) + w.cross(&m))
    }
}

impl Add for Vec6 {
    type Output = Vec6;

    fn add(self, rhs: Self) -> Self::Output {
        Vec6(self.0 + rhs.0)
    }
}

impl Sub for Vec6 {
    type Output = Vec6;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec6(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vec6 {
    type Output = Vec6;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec6(self.0 * rhs)
    }
}

impl Mul<f64> for &Vec6 {
    type Output = Vec6;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec6(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_angular_roundtrip() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let w = Vec3::new(4.0, 5.0, 6.0);
        let s = Vec6::new(v, w);
        assert_relative_eq!(s.linear().0, v.0);
        assert_relative_eq!(s.angular().0, w.0);
    }

    #[test]
    fn test_cross_twist_twist_zero_velocity_is_zero() {
        let zero = Vec6::zeros();
        let m = Vec6::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(zero.cross_twist_twist(&m).0, Vec6::zeros().0);
    }

    #[test]
    fn test_cross_twist_twist_self_is_zero() {
        let v = Vec6::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0));
        assert_relative_eq!(v.cross_twist_twist(&v).0, Vec6::zeros().0, epsilon = 1e-12);
    }

    #[test]
    fn test_cross_twist_wrench_pure_angular() {
        // Pure angular twist about z acting on a wrench gives the expected bracket.
        let twist = Vec6::new(Vec3::zeros(), Vec3::z());
        let wrench = Vec6::new(Vec3::x(), Vec3::zeros());
        let result = twist.cross_twist_wrench(&wrench);
        assert_relative_eq!(result.linear().0, Vec3::z().cross(&Vec3::x()).0);
        assert_relative_eq!(result.angular().0, Vec3::zeros().0);
    }
}

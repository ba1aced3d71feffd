//! Defines **3D vectors** and related operations.

use nalgebra::Vector3;
use std::ops::{Add, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// A 3D vector, commonly used for positions, axes, and centres of mass.
pub struct Vec3(pub(crate) Vector3<f64>);

impl Vec3 {
    /// Creates a new `Vec3` with the given x, y, z components.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(Vector3::new(x, y, z))
    }

    /// Creates a zero vector.
    #[must_use]
    pub fn zeros() -> Self {
        Self(Vector3::zeros())
    }

    /// Returns the `x` unit vector, that is (1, 0, 0).
    #[must_use]
    pub fn x() -> Self {
        Self(Vector3::x())
    }

    /// Returns the `y` unit vector, that is (0, 1, 0).
    #[must_use]
    pub fn y() -> Self {
        Self(Vector3::y())
    }

    /// Returns the `z` unit vector, that is (0, 0, 1).
    #[must_use]
    pub fn z() -> Self {
        Self(Vector3::z())
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64; 3] {
        self.0.as_slice().try_into().unwrap()
    }

    /// Returns the L2 norm of the vector.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    /// Returns the vector normalized to unit length, or `None` if it is (near) zero.
    #[must_use]
    pub fn normalized(&self) -> Option<Self> {
        let n = self.norm();
        if n == 0.0 { None } else { Some(Self(self.0 / n)) }
    }

    /// Computes the cross product of two 3D vectors.
    #[must_use]
    pub fn cross(&self, other: &Vec3) -> Vec3 {
        Vec3(self.0.cross(&other.0))
    }

    /// Computes the dot product of two 3D vectors.
    #[must_use]
    pub fn dot(&self, other: &Vec3) -> f64 {
        self.0.dot(&other.0)
    }

    pub fn x_coord(&self) -> f64 {
        self.0.x
    }

    pub fn y_coord(&self) -> f64 {
        self.0.y
    }

    pub fn z_coord(&self) -> f64 {
        self.0.z
    }
}

impl From<&[f64; 3]> for Vec3 {
    fn from(array: &[f64; 3]) -> Self {
        Vec3(Vector3::new(array[0], array[1], array[2]))
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Self) -> Self::Output {
        Vec3(self.0 + rhs.0)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Self) -> Self::Output {
        Vec3(self.0 - rhs.0)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec3(self.0 * rhs)
    }
}

impl Mul<f64> for &Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Self::Output {
        Vec3(self.0 * rhs)
    }
}

impl Mul<Vec3> for f64 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3(rhs.0 * self)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;

    fn neg(self) -> Self::Output {
        Vec3(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cross() {
        let a = Vec3::x();
        let b = Vec3::y();
        assert_relative_eq!(a.cross(&b).0, Vec3::z().0);
    }

    #[test]
    fn test_normalized_zero() {
        assert_eq!(Vec3::zeros().normalized(), None);
    }
}

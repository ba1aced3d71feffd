//! Defines **3x3 matrices** and related operations.

use nalgebra::Matrix3;
use std::ops::{Add, Mul, Sub};

use crate::errors::SpatialError;
use crate::quaternion::Quat;
use crate::vector3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// An immutable 3x3 matrix, row-major.
pub struct Mat3(pub(crate) Matrix3<f64>);

impl Mat3 {
    /// Creates a new `Mat3` from its nine row-major entries.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        m00: f64,
        m01: f64,
        m02: f64,
        m10: f64,
        m11: f64,
        m12: f64,
        m20: f64,
        m21: f64,
        m22: f64,
    ) -> Self {
        Self(Matrix3::new(m00, m01, m02, m10, m11, m12, m20, m21, m22))
    }

    /// Creates a symmetric matrix from its six unique entries.
    #[must_use]
    pub fn symmetric(ixx: f64, iyy: f64, izz: f64, ixy: f64, ixz: f64, iyz: f64) -> Self {
        Self::new(ixx, ixy, ixz, ixy, iyy, iyz, ixz, iyz, izz)
    }

    /// Returns the zero matrix.
    #[must_use]
    pub fn zeros() -> Self {
        Self(Matrix3::zeros())
    }

    /// Returns the identity matrix.
    #[must_use]
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Returns the skew-symmetric cross-product matrix `[v]×` such that `[v]×·w == v×w`.
    #[must_use]
    pub fn skew(v: &Vec3) -> Self {
        let [x, y, z] = *v.as_slice();
        Self::new(0.0, -z, y, z, 0.0, -x, -y, x, 0.0)
    }

    /// Builds a rotation matrix of `angle` radians about `axis`, via [`Quat::from_axis_angle`].
    ///
    /// # Errors
    /// Returns [`SpatialError::InvalidRotationAxis`] if `axis` has zero magnitude.
    pub fn rotation(axis: &Vec3, angle: f64) -> Result<Self, SpatialError> {
        Ok(Self::from(&Quat::from_axis_angle(axis, angle)?))
    }

    /// Returns the transpose of this matrix.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Returns the determinant of this matrix.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.0.determinant()
    }

    /// Attempts to invert the matrix. Returns `None` iff the determinant is exactly zero.
    #[must_use]
    pub fn try_invert(&self) -> Option<Self> {
        let det = self.determinant();
        if det == 0.0 {
            return None;
        }
        // analytic adjugate over determinant
        let m = &self.0;
        let adj = Matrix3::new(
            m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
            m[(0, 2)] * m[(2, 1)] - m[(0, 1)] * m[(2, 2)],
            m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)],
            m[(1, 2)] * m[(2, 0)] - m[(1, 0)] * m[(2, 2)],
            m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)],
            m[(0, 2)] * m[(1, 0)] - m[(0, 0)] * m[(1, 2)],
            m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
            m[(0, 1)] * m[(2, 0)] - m[(0, 0)] * m[(2, 1)],
            m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        );
        Some(Self(adj / det))
    }

    pub(crate) fn inner(&self) -> &Matrix3<f64> {
        &self.0
    }
}

impl Add for Mat3 {
    type Output = Mat3;

    fn add(self, rhs: Self) -> Self::Output {
        Mat3(self.0 + rhs.0)
    }
}

impl Sub for Mat3 {
    type Output = Mat3;

    fn sub(self, rhs: Self) -> Self::Output {
        Mat3(self.0 - rhs.0)
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Self) -> Self::Output {
        Mat3(self.0 * rhs.0)
    }
}

impl Mul<&Vec3> for &Mat3 {
    type Output = Vec3;

    fn mul(self, rhs: &Vec3) -> Self::Output {
        Vec3(self.0 * rhs.0)
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    fn mul(self, rhs: Vec3) -> Self::Output {
        Vec3(self.0 * rhs.0)
    }
}

impl Mul<f64> for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: f64) -> Self::Output {
        Mat3(self.0 * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_invert() {
        let id = Mat3::identity();
        assert_relative_eq!(id.try_invert().unwrap().0, id.0);
    }

    #[test]
    fn test_singular_invert() {
        let singular = Mat3::zeros();
        assert_eq!(singular.try_invert(), None);
    }

    #[test]
    fn test_skew_cross_equivalence() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let w = Vec3::new(4.0, -1.0, 0.5);
        let via_skew = &Mat3::skew(&v) * &w;
        assert_relative_eq!(via_skew.0, v.cross(&w).0);
    }

    #[test]
    fn test_rotation_matches_quaternion_rotate() {
        let axis = Vec3::new(0.0, 0.0, 1.0);
        let angle = std::f64::consts::FRAC_PI_2;
        let m = Mat3::rotation(&axis, angle).unwrap();
        let rotated = &m * &Vec3::x();
        assert_relative_eq!(rotated.0, Vec3::y().0, epsilon = 1e-12);
    }

    #[test]
    fn test_rotation_zero_axis_fails() {
        assert_eq!(
            Mat3::rotation(&Vec3::zeros(), 1.0),
            Err(crate::errors::SpatialError::InvalidRotationAxis)
        );
    }
}

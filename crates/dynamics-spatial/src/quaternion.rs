//! Defines unit **quaternions** and related rotation operations.

use std::ops::Mul;

use crate::errors::SpatialError;
use crate::matrix3::Mat3;
use crate::vector3::Vec3;

#[derive(Debug, Clone, Copy, PartialEq)]
/// A quaternion (w, x, y, z).
///
/// Treated as a rotation when unit-magnitude. A zero-magnitude quaternion is not a rotation:
/// [`Quat::inverse`] fails on it, and [`Quat::from_axis_angle`] refuses to build one from a
/// zero-magnitude axis.
pub struct Quat {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quat {
    fn default() -> Self {
        Self::identity()
    }
}

impl Quat {
    /// Creates a new quaternion from its four components.
    #[must_use]
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Returns the identity rotation `1 + 0i + 0j + 0k`.
    #[must_use]
    pub fn identity() -> Self {
        Self::new(1.0, 0.0, 0.0, 0.0)
    }

    /// Builds a rotation of `angle` radians about `axis`.
    ///
    /// # Errors
    /// Returns [`SpatialError::InvalidRotationAxis`] if `axis` has zero magnitude.
    pub fn from_axis_angle(axis: &Vec3, angle: f64) -> Result<Self, SpatialError> {
        let unit = axis.normalized().ok_or(SpatialError::InvalidRotationAxis)?;
        let half = angle / 2.0;
        let (s, c) = half.sin_cos();
        Ok(Self::new(c, s * unit.x_coord(), s * unit.y_coord(), s * unit.z_coord()))
    }

    /// Returns the vector (imaginary) part of the quaternion.
    #[must_use]
    pub fn vector_part(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Returns the squared magnitude of the quaternion.
    #[must_use]
    pub fn norm_squared(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the magnitude of the quaternion.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Returns the conjugate `(w, -x, -y, -z)`.
    #[must_use]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Returns the multiplicative inverse.
    ///
    /// # Errors
    /// Returns [`SpatialError::InvalidRotationAxis`] if the quaternion has zero magnitude.
    pub fn inverse(&self) -> Result<Self, SpatialError> {
        let n2 = self.norm_squared();
        if n2 == 0.0 {
            return Err(SpatialError::InvalidRotationAxis);
        }
        let conj = self.conjugate();
        Ok(Self::new(conj.w / n2, conj.x / n2, conj.y / n2, conj.z / n2))
    }

    /// Rotates `b` by this quaternion using the optimised formula
    /// `b + 2·v×(v×b + w·b)`, where `v` is the vector part.
    #[must_use]
    pub fn rotate(&self, b: &Vec3) -> Vec3 {
        let v = self.vector_part();
        let inner = v.cross(b) + *b * self.w;
        *b + v.cross(&inner) * 2.0
    }
}

impl Mul for Quat {
    type Output = Quat;

    /// Hamilton product; composes rotations so that `(a * b).rotate(v) == a.rotate(&b.rotate(v))`.
    fn mul(self, rhs: Self) -> Self::Output {
        Quat::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}

impl From<&Quat> for Mat3 {
    fn from(q: &Quat) -> Self {
        let Quat { w, x, y, z } = *q;
        let n2 = q.norm_squared();
        if n2 == 0.0 {
            return Mat3::identity();
        }
        let s = 2.0 / n2;
        Mat3::new(
            1.0 - s * (y * y + z * z),
            s * (x * y - z * w),
            s * (x * z + y * w),
            s * (x * y + z * w),
            1.0 - s * (x * x + z * z),
            s * (y * z - x * w),
            s * (x * z - y * w),
            s * (y * z + x * w),
            1.0 - s * (x * x + y * y),
        )
    }
}

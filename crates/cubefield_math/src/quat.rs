//! Rotation quaternion
//!
//! Unit quaternions represent orientations; entity transforms and the
//! camera-free debug tooling rotate vectors with them.

use bytemuck::{Pod, Zeroable};
use serde::{Serialize, Deserialize};
use crate::Vec3;

/// A rotation quaternion (x, y, z imaginary parts, w real part)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quat {
    /// The identity rotation
    pub const IDENTITY: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };

    /// Create a quaternion from raw components
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Create a rotation of `angle` radians around `axis`
    ///
    /// The axis is normalized internally; a zero axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalized();
        if axis == Vec3::ZERO {
            return Self::IDENTITY;
        }
        let half = angle * 0.5;
        let s = half.sin();
        Self::new(axis.x * s, axis.y * s, axis.z * s, half.cos())
    }

    /// Compose two rotations: `self * other` applies `other` first, then `self`
    pub fn compose(&self, other: &Self) -> Self {
        Self::new(
            self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
            self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
        )
    }

    /// The inverse rotation (conjugate, valid for unit quaternions)
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Renormalize to unit length (counters floating-point drift)
    pub fn normalize(&self) -> Self {
        let len = (self.x * self.x + self.y * self.y + self.z * self.z + self.w * self.w).sqrt();
        if len > 0.0 {
            let inv = 1.0 / len;
            Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
        } else {
            Self::IDENTITY
        }
    }

    /// Rotate a vector by this quaternion
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        // v' = v + 2w(q x v) + 2(q x (q x v))
        let q = Vec3::new(self.x, self.y, self.z);
        let t = q.cross(v) * 2.0;
        v + t * self.w + q.cross(t)
    }

    /// Whether this rotation is (approximately) the identity
    ///
    /// Used to pick the cheap axis-aligned bounding-box path during
    /// visibility testing.
    #[inline]
    pub fn is_identity(&self) -> bool {
        self.w.abs() >= 1.0 - 1e-6
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    #[test]
    fn test_identity_rotation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Quat::IDENTITY.rotate(v), v));
    }

    #[test]
    fn test_axis_angle_quarter_turn() {
        // 90 degrees around Y takes X to -Z
        let q = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let r = q.rotate(Vec3::X);
        assert!(vec_approx_eq(r, Vec3::new(0.0, 0.0, -1.0)), "got {:?}", r);
    }

    #[test]
    fn test_axis_angle_half_turn() {
        // 180 degrees around Z takes X to -X
        let q = Quat::from_axis_angle(Vec3::Z, PI);
        let r = q.rotate(Vec3::X);
        assert!(vec_approx_eq(r, -Vec3::X), "got {:?}", r);
    }

    #[test]
    fn test_zero_axis_is_identity() {
        let q = Quat::from_axis_angle(Vec3::ZERO, 1.0);
        assert_eq!(q, Quat::IDENTITY);
    }

    #[test]
    fn test_compose() {
        // Two 45 degree rotations equal one 90 degree rotation
        let q45 = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2 / 2.0);
        let q90 = Quat::from_axis_angle(Vec3::Y, FRAC_PI_2);
        let composed = q45.compose(&q45);
        let v = Vec3::X;
        assert!(vec_approx_eq(composed.rotate(v), q90.rotate(v)));
    }

    #[test]
    fn test_conjugate_undoes_rotation() {
        let q = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.0), 0.7);
        let v = Vec3::new(1.0, 2.0, 3.0);
        let back = q.conjugate().rotate(q.rotate(v));
        assert!(vec_approx_eq(back, v), "got {:?}", back);
    }

    #[test]
    fn test_normalize() {
        let q = Quat::new(0.0, 2.0, 0.0, 0.0).normalize();
        assert!((q.y - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_is_identity() {
        assert!(Quat::IDENTITY.is_identity());
        assert!(!Quat::from_axis_angle(Vec3::Y, 0.5).is_identity());
        // Sign flip represents the same rotation
        assert!(Quat::new(0.0, 0.0, 0.0, -1.0).is_identity());
    }
}

//! Half-space plane
//!
//! A plane splits space into two half-spaces; the normal points into the
//! positive one. Frustum culling relies on signed-distance queries against
//! six such planes.

use serde::{Serialize, Deserialize};
use crate::Vec3;

/// A half-space boundary: unit normal plus an anchor point on the plane
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    /// Unit-length normal; points into the positive half-space
    pub normal: Vec3,
    /// An anchor point lying on the plane
    pub point: Vec3,
    /// Cached `dot(normal, point)`
    pub distance: f32,
}

impl Plane {
    /// Create a plane through `point` with the given `normal`
    ///
    /// The normal is normalized here. A zero-length normal is a caller
    /// contract violation: debug builds assert, release builds degrade to
    /// a plane that reports every point at distance zero.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        debug_assert!(
            normal.length_squared() > 0.0,
            "Plane normal must be non-zero"
        );
        let normal = normal.normalized();
        Self {
            normal,
            point,
            distance: normal.dot(point),
        }
    }

    /// Signed distance from `p` to the plane
    ///
    /// Positive means `p` is in front of the plane (the side the normal
    /// points into).
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        self.normal.dot(p) - self.distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_normal_is_normalized() {
        let plane = Plane::new(Vec3::ZERO, Vec3::new(0.0, 10.0, 0.0));
        assert!((plane.normal.length() - 1.0).abs() < EPSILON);
        assert_eq!(plane.normal, Vec3::Y);
    }

    #[test]
    fn test_point_on_plane_has_zero_distance() {
        let plane = Plane::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.3, -0.9, 0.6));
        assert!(plane.signed_distance(plane.point).abs() < EPSILON);
    }

    #[test]
    fn test_signed_distance_sign() {
        // Floor plane at y = 2 facing up
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        assert!((plane.signed_distance(Vec3::new(5.0, 3.0, -1.0)) - 1.0).abs() < EPSILON);
        assert!((plane.signed_distance(Vec3::new(0.0, 0.0, 0.0)) + 2.0).abs() < EPSILON);
    }

    #[test]
    fn test_anchor_offset_along_plane_is_still_zero() {
        let plane = Plane::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        // Any point with y == 2 lies on the plane
        assert!(plane.signed_distance(Vec3::new(100.0, 2.0, -40.0)).abs() < EPSILON);
    }
}

//! Visibility testing
//!
//! Maps an object's local bounding box into world space through its
//! transform and tests the result against a view frustum. This is the
//! bridge between scene state and culling; it never touches the GPU.

use crate::Transform;
use cubefield_math::{Aabb, Frustum, Vec3};

/// Compute the world-space bounding box of a local box under a transform
///
/// Identity rotation takes a fast path: scale and translate the corners
/// and rebuild from min/max. Any other rotation re-projects the rotated
/// box onto the world axes, so the result bounds the rotated shape
/// conservatively (it grows, it never clips).
pub fn world_aabb(transform: &Transform, local: &Aabb) -> Aabb {
    if transform.rotation().is_identity() {
        return Aabb::from_min_max(
            transform.transform_point(local.min()),
            transform.transform_point(local.max()),
        );
    }

    let center = transform.transform_point(local.center);
    let scaled = local.extents * transform.scale();

    // World extent along each axis is the sum of the projections of the
    // three rotated half-extent vectors onto that axis.
    let ex = transform.right() * scaled.x;
    let ey = transform.up() * scaled.y;
    let ez = transform.forward() * scaled.z;

    Aabb::new(
        center,
        ex.x.abs() + ey.x.abs() + ez.x.abs(),
        ex.y.abs() + ey.y.abs() + ez.y.abs(),
        ex.z.abs() + ey.z.abs() + ez.z.abs(),
    )
}

/// Whether an object with the given local bounds is inside the frustum
///
/// Conservative: may report a not-quite-visible object as visible (the
/// world box over-bounds rotated shapes, and the plane test itself is
/// conservative at frustum edges), never the reverse.
pub fn is_visible(transform: &Transform, local: &Aabb, frustum: &Frustum) -> bool {
    frustum.contains_aabb(&world_aabb(transform, local))
}

/// Local bounding box of a unit cube spanning [-1, 1] on every axis
pub const UNIT_CUBE_AABB: Aabb = Aabb::new(Vec3::ZERO, 1.0, 1.0, 1.0);

#[cfg(test)]
mod tests {
    use super::*;
    use cubefield_math::Quat;
    use std::f32::consts::FRAC_PI_4;

    const EPSILON: f32 = 0.001;

    fn test_frustum() -> Frustum {
        let forward = Vec3::new(0.0, 0.0, -1.0);
        let right = forward.cross(Vec3::Y).normalized();
        let up = right.cross(forward);
        Frustum::new(
            Vec3::ZERO,
            forward,
            up,
            right,
            std::f32::consts::FRAC_PI_2,
            1.0,
            0.1,
            100.0,
        )
    }

    #[test]
    fn test_world_aabb_identity() {
        let t = Transform::from_position(Vec3::new(10.0, 0.0, 0.0));
        let world = world_aabb(&t, &UNIT_CUBE_AABB);
        assert_eq!(world.center, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(world.extents, Vec3::ONE);
    }

    #[test]
    fn test_world_aabb_scaled() {
        let mut t = Transform::from_position(Vec3::new(0.0, 5.0, 0.0));
        t.set_scale(3.0);
        let world = world_aabb(&t, &UNIT_CUBE_AABB);
        assert_eq!(world.extents, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(world.min(), Vec3::new(-3.0, 2.0, -3.0));
    }

    #[test]
    fn test_world_aabb_rotated_grows() {
        // A unit cube rotated 45 degrees around Y projects to sqrt(2)
        // half-extents on X and Z, while Y is unchanged
        let t = Transform::from_position_rotation(
            Vec3::ZERO,
            Quat::from_axis_angle(Vec3::Y, FRAC_PI_4),
        );
        let world = world_aabb(&t, &UNIT_CUBE_AABB);
        let sqrt2 = 2.0f32.sqrt();
        assert!((world.extents.x - sqrt2).abs() < EPSILON, "{:?}", world);
        assert!((world.extents.y - 1.0).abs() < EPSILON);
        assert!((world.extents.z - sqrt2).abs() < EPSILON);
    }

    #[test]
    fn test_world_aabb_offcenter_local_box() {
        // Local box centered away from the origin follows the transform
        let local = Aabb::new(Vec3::new(0.0, 2.0, 0.0), 0.5, 0.5, 0.5);
        let mut t = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
        t.set_scale(2.0);
        let world = world_aabb(&t, &local);
        assert_eq!(world.center, Vec3::new(1.0, 4.0, 0.0));
        assert_eq!(world.extents, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_visible_in_front() {
        let frustum = test_frustum();
        let t = Transform::from_position(Vec3::new(0.0, 0.0, -10.0));
        assert!(is_visible(&t, &UNIT_CUBE_AABB, &frustum));
    }

    #[test]
    fn test_culled_behind() {
        let frustum = test_frustum();
        let t = Transform::from_position(Vec3::new(0.0, 0.0, 10.0));
        assert!(!is_visible(&t, &UNIT_CUBE_AABB, &frustum));
    }

    #[test]
    fn test_rotation_can_flip_visibility() {
        let frustum = test_frustum();
        // A long thin box just outside the left boundary at depth 10:
        // axis-aligned it stays out, but rotated 45 degrees around Y its
        // world bounds swing across the boundary
        let local = Aabb::new(Vec3::ZERO, 8.0, 0.5, 0.5);
        let pos = Vec3::new(-19.0, 0.0, -10.0);

        let upright = Transform::from_position(pos);
        assert!(!is_visible(&upright, &local, &frustum));

        let rotated =
            Transform::from_position_rotation(pos, Quat::from_axis_angle(Vec3::Y, FRAC_PI_4));
        assert!(is_visible(&rotated, &local, &frustum));
    }
}

//! View frustum
//!
//! Six half-space planes bounding the volume a camera can see, plus the
//! eight corner points of that volume. Culling uses the planes only; the
//! corners exist for debug-line visualization.

use crate::{Aabb, Plane, Vec3};

/// A camera view frustum: six inward-facing planes plus eight corners
///
/// Invariant: every plane normal points into the frustum interior, so a
/// point inside the frustum has a non-negative signed distance to all six
/// planes. The visibility test depends on this; `recalculate` is written
/// (and unit-tested) to maintain it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Frustum {
    pub near: Plane,
    pub far: Plane,
    pub left: Plane,
    pub right: Plane,
    pub top: Plane,
    pub bottom: Plane,
    corners: [Vec3; 8],
}

impl Frustum {
    /// Build a frustum from camera-derived inputs
    ///
    /// `forward`, `up` and `right` must form an orthonormal camera basis
    /// (`right = cross(forward, world_up)` normalized, `up = cross(right,
    /// forward)`). `fov_y` is the vertical field of view in radians.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        position: Vec3,
        forward: Vec3,
        up: Vec3,
        right: Vec3,
        fov_y: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let mut frustum = Self::default();
        frustum.recalculate(position, forward, up, right, fov_y, aspect, z_near, z_far);
        frustum
    }

    /// Recompute all six planes and the corner points
    ///
    /// Idempotent full recompute, O(1); call once per frame after the
    /// camera moved or rotated and before any visibility test.
    #[allow(clippy::too_many_arguments)]
    pub fn recalculate(
        &mut self,
        position: Vec3,
        forward: Vec3,
        up: Vec3,
        right: Vec3,
        fov_y: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) {
        let half_v = z_far * (fov_y * 0.5).tan();
        let half_h = half_v * aspect;
        let front_far = forward * z_far;

        self.near = Plane::new(position + forward * z_near, forward);
        self.far = Plane::new(position + front_far, -forward);
        // Each side plane is built from its own far-plane edge crossed
        // with the camera basis, with the operands ordered so the normal
        // points into the interior.
        self.right = Plane::new(position, up.cross(front_far + right * half_h));
        self.left = Plane::new(position, (front_far - right * half_h).cross(up));
        self.top = Plane::new(position, (front_far + up * half_v).cross(right));
        self.bottom = Plane::new(position, right.cross(front_far - up * half_v));

        // Corners stay in camera-local space: they are not transformed by
        // camera position/orientation. Only the debug gizmos read them.
        let near_half_v = z_near * (fov_y * 0.5).tan();
        let near_half_h = near_half_v * aspect;
        self.corners = [
            Vec3::new(-near_half_h, -near_half_v, z_near),
            Vec3::new(near_half_h, -near_half_v, z_near),
            Vec3::new(near_half_h, near_half_v, z_near),
            Vec3::new(-near_half_h, near_half_v, z_near),
            Vec3::new(-half_h, -half_v, z_far),
            Vec3::new(half_h, -half_v, z_far),
            Vec3::new(half_h, half_v, z_far),
            Vec3::new(-half_h, half_v, z_far),
        ];
    }

    /// The six planes in test order
    pub fn planes(&self) -> [&Plane; 6] {
        [
            &self.left,
            &self.right,
            &self.top,
            &self.bottom,
            &self.near,
            &self.far,
        ]
    }

    /// Whether a bounding box overlaps the frustum
    ///
    /// True iff the box is on or in front of all six planes. Conservative:
    /// a box near an edge may pass even though the true geometry inside it
    /// is out of view, never the reverse for a correctly-bounding box.
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        self.planes()
            .iter()
            .all(|plane| aabb.is_on_or_forward_plane(plane))
    }

    /// The eight corner points (4 near, 4 far), in camera-local space
    ///
    /// Known limitation carried over from the original design: corners are
    /// never transformed into world space, so gizmo lines built from them
    /// render relative to the origin rather than the camera.
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }
}

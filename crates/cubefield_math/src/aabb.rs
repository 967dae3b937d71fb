//! Axis-aligned bounding box
//!
//! Cheap proxy volume for visibility testing: a center plus per-axis
//! half-extents, with the standard box-vs-plane overlap test.

use serde::{Serialize, Deserialize};
use crate::{Plane, Vec3};

/// Axis-aligned bounding box as center + half-extents
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Center of the box
    pub center: Vec3,
    /// Half-widths along each axis (all >= 0 for a well-formed box)
    pub extents: Vec3,
}

impl Aabb {
    /// Create a box directly from center and per-axis half-extents
    ///
    /// Used when bounding a rotated or scaled shape whose extents were
    /// re-projected onto the world axes.
    #[inline]
    pub const fn new(center: Vec3, ex: f32, ey: f32, ez: f32) -> Self {
        Self {
            center,
            extents: Vec3::new(ex, ey, ez),
        }
    }

    /// Create a box from component-wise min/max corners
    ///
    /// Callers must pass `min <= max` per component. Violating that yields
    /// negative-looking extents: a degenerate but non-fatal state that the
    /// plane test treats as an empty box (debug builds assert).
    pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "Aabb min must not exceed max"
        );
        let center = (min + max) * 0.5;
        Self {
            center,
            extents: max - center,
        }
    }

    /// Component-wise minimum corner
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    /// Component-wise maximum corner
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Whether the box is on or in front of the plane
    ///
    /// Computes the box's projected radius onto the plane normal,
    /// `r = ex*|nx| + ey*|ny| + ez*|nz|`, and returns true unless the box
    /// is entirely behind the plane. This is the standard conservative
    /// box-plane overlap test.
    pub fn is_on_or_forward_plane(&self, plane: &Plane) -> bool {
        let n = plane.normal.abs();
        let r = self.extents.x * n.x + self.extents.y * n.y + self.extents.z * n.z;
        -r <= plane.signed_distance(self.center)
    }
}

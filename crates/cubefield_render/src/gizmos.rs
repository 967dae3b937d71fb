//! Frustum debug gizmos
//!
//! Builds line segments visualizing the camera frustum: the 12 edges of
//! the frustum volume plus one short line per plane showing its normal.
//! The corner-based edges use the frustum's camera-local corners, so they
//! appear anchored at the world origin rather than following the camera.

use cubefield_math::Frustum;

use crate::geometry::Line;

/// Corner index pairs forming the 12 frustum edges
///
/// Corners are ordered near ring first (bl, br, tr, tl), then the far
/// ring in the same order.
pub const FRUSTUM_EDGES: [(usize, usize); 12] = [
    // Near ring
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    // Far ring
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    // Connecting edges
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Build the gizmo lines for a frustum
///
/// Returns 18 lines: 12 edges and 6 plane normals of `normal_length`
/// world units, each starting at its plane's anchor point.
pub fn frustum_gizmos(
    device: &wgpu::Device,
    frustum: &Frustum,
    material_index: usize,
    normal_length: f32,
) -> Vec<Line> {
    let corners = frustum.corners();
    let mut lines = Vec::with_capacity(FRUSTUM_EDGES.len() + 6);

    for (a, b) in FRUSTUM_EDGES {
        lines.push(Line::new(device, corners[a], corners[b], material_index));
    }
    for plane in frustum.planes() {
        lines.push(Line::new(
            device,
            plane.point,
            plane.point + plane.normal * normal_length,
            material_index,
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_corner_joins_three_edges() {
        let mut degree = [0usize; 8];
        for (a, b) in FRUSTUM_EDGES {
            degree[a] += 1;
            degree[b] += 1;
        }
        assert!(degree.iter().all(|&d| d == 3), "degrees {:?}", degree);
    }

    #[test]
    fn test_no_duplicate_edges() {
        for (i, &(a, b)) in FRUSTUM_EDGES.iter().enumerate() {
            for &(c, d) in &FRUSTUM_EDGES[i + 1..] {
                assert!(!((a, b) == (c, d) || (a, b) == (d, c)));
            }
        }
    }
}

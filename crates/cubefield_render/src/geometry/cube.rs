//! Cube geometry
//!
//! Unit cube spanning [-1, 1] on every axis: 6 faces, 36 unindexed
//! vertices with outward normals and per-face uvs.

use cubefield_core::{visibility, Transform};
use cubefield_math::Frustum;

use super::{GeometryData, GeometryObject, Vertex};

const fn v(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Vertex {
    Vertex::new(position, normal, uv)
}

/// Counter-clockwise winding viewed from outside each face
#[rustfmt::skip]
pub const CUBE_VERTICES: [Vertex; 36] = [
    // Front (+Z)
    v([-1.0, -1.0,  1.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
    v([ 1.0, -1.0,  1.0], [0.0, 0.0, 1.0], [1.0, 0.0]),
    v([ 1.0,  1.0,  1.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
    v([-1.0, -1.0,  1.0], [0.0, 0.0, 1.0], [0.0, 0.0]),
    v([ 1.0,  1.0,  1.0], [0.0, 0.0, 1.0], [1.0, 1.0]),
    v([-1.0,  1.0,  1.0], [0.0, 0.0, 1.0], [0.0, 1.0]),
    // Back (-Z)
    v([ 1.0, -1.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0]),
    v([-1.0, -1.0, -1.0], [0.0, 0.0, -1.0], [1.0, 0.0]),
    v([-1.0,  1.0, -1.0], [0.0, 0.0, -1.0], [1.0, 1.0]),
    v([ 1.0, -1.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0]),
    v([-1.0,  1.0, -1.0], [0.0, 0.0, -1.0], [1.0, 1.0]),
    v([ 1.0,  1.0, -1.0], [0.0, 0.0, -1.0], [0.0, 1.0]),
    // Right (+X)
    v([ 1.0, -1.0,  1.0], [1.0, 0.0, 0.0], [0.0, 0.0]),
    v([ 1.0, -1.0, -1.0], [1.0, 0.0, 0.0], [1.0, 0.0]),
    v([ 1.0,  1.0, -1.0], [1.0, 0.0, 0.0], [1.0, 1.0]),
    v([ 1.0, -1.0,  1.0], [1.0, 0.0, 0.0], [0.0, 0.0]),
    v([ 1.0,  1.0, -1.0], [1.0, 0.0, 0.0], [1.0, 1.0]),
    v([ 1.0,  1.0,  1.0], [1.0, 0.0, 0.0], [0.0, 1.0]),
    // Left (-X)
    v([-1.0, -1.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    v([-1.0, -1.0,  1.0], [-1.0, 0.0, 0.0], [1.0, 0.0]),
    v([-1.0,  1.0,  1.0], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    v([-1.0, -1.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 0.0]),
    v([-1.0,  1.0,  1.0], [-1.0, 0.0, 0.0], [1.0, 1.0]),
    v([-1.0,  1.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0]),
    // Top (+Y)
    v([-1.0,  1.0,  1.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
    v([ 1.0,  1.0,  1.0], [0.0, 1.0, 0.0], [1.0, 0.0]),
    v([ 1.0,  1.0, -1.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
    v([-1.0,  1.0,  1.0], [0.0, 1.0, 0.0], [0.0, 0.0]),
    v([ 1.0,  1.0, -1.0], [0.0, 1.0, 0.0], [1.0, 1.0]),
    v([-1.0,  1.0, -1.0], [0.0, 1.0, 0.0], [0.0, 1.0]),
    // Bottom (-Y)
    v([-1.0, -1.0, -1.0], [0.0, -1.0, 0.0], [0.0, 0.0]),
    v([ 1.0, -1.0, -1.0], [0.0, -1.0, 0.0], [1.0, 0.0]),
    v([ 1.0, -1.0,  1.0], [0.0, -1.0, 0.0], [1.0, 1.0]),
    v([-1.0, -1.0, -1.0], [0.0, -1.0, 0.0], [0.0, 0.0]),
    v([ 1.0, -1.0,  1.0], [0.0, -1.0, 0.0], [1.0, 1.0]),
    v([-1.0, -1.0,  1.0], [0.0, -1.0, 0.0], [0.0, 1.0]),
];

/// A solid cube placed by its transform
pub struct Cube {
    transform: Transform,
    material_index: usize,
    geometry: GeometryData,
}

impl Cube {
    pub fn new(device: &wgpu::Device, transform: Transform, material_index: usize) -> Self {
        Self {
            transform,
            material_index,
            geometry: GeometryData::new(device, &CUBE_VERTICES, "Cube Vertex Buffer"),
        }
    }
}

impl GeometryObject for Cube {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn material_index(&self) -> usize {
        self.material_index
    }

    fn is_in_frustum(&self, frustum: &Frustum) -> bool {
        visibility::is_visible(&self.transform, &visibility::UNIT_CUBE_AABB, frustum)
    }

    fn open_drawing_context(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.geometry.vertex_buffer.slice(..));
    }

    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.draw(0..self.geometry.vertex_count, 0..1);
    }

    fn dispose(&self) {
        self.geometry.vertex_buffer.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubefield_math::Vec3;

    #[test]
    fn test_six_faces_of_two_triangles() {
        assert_eq!(CUBE_VERTICES.len(), 36);
    }

    #[test]
    fn test_all_corners_on_unit_cube() {
        for vertex in &CUBE_VERTICES {
            for coord in vertex.position {
                assert!(coord == 1.0 || coord == -1.0);
            }
        }
    }

    #[test]
    fn test_normals_are_axis_aligned_and_outward() {
        for vertex in &CUBE_VERTICES {
            let n = vertex.normal;
            let sum = n[0].abs() + n[1].abs() + n[2].abs();
            assert_eq!(sum, 1.0, "normal {:?} not axis-aligned", n);
            // The vertex lies on the face the normal points out of
            let dot =
                n[0] * vertex.position[0] + n[1] * vertex.position[1] + n[2] * vertex.position[2];
            assert_eq!(dot, 1.0, "normal {:?} not outward at {:?}", n, vertex.position);
        }
    }

    #[test]
    fn test_triangles_wind_counter_clockwise() {
        for triangle in CUBE_VERTICES.chunks(3) {
            let a = Vec3::from(triangle[0].position);
            let b = Vec3::from(triangle[1].position);
            let c = Vec3::from(triangle[2].position);
            let face_normal = (b - a).cross(c - a);
            let n = Vec3::from(triangle[0].normal);
            assert!(
                face_normal.dot(n) > 0.0,
                "triangle {:?} winds against its normal",
                triangle.iter().map(|v| v.position).collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn test_uvs_in_unit_square() {
        for vertex in &CUBE_VERTICES {
            assert!((0.0..=1.0).contains(&vertex.uv[0]));
            assert!((0.0..=1.0).contains(&vertex.uv[1]));
        }
    }
}

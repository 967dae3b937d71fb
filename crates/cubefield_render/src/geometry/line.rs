//! Line geometry
//!
//! A single world-space segment, drawn with a line-topology material.
//! Used by the frustum gizmos; lines skip frustum culling entirely.

use cubefield_core::Transform;
use cubefield_math::{Frustum, Vec3};

use super::{GeometryData, GeometryObject, Vertex};

/// A debug line segment between two world-space points
pub struct Line {
    transform: Transform,
    material_index: usize,
    geometry: GeometryData,
}

impl Line {
    /// Create a line from `from` to `to` in world space
    ///
    /// The endpoints are baked into the vertex buffer; the transform
    /// stays identity.
    pub fn new(device: &wgpu::Device, from: Vec3, to: Vec3, material_index: usize) -> Self {
        let vertices = [
            Vertex::new(from.to_array(), [0.0; 3], [0.0; 2]),
            Vertex::new(to.to_array(), [0.0; 3], [1.0, 0.0]),
        ];
        Self {
            transform: Transform::identity(),
            material_index,
            geometry: GeometryData::new(device, &vertices, "Line Vertex Buffer"),
        }
    }
}

impl GeometryObject for Line {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn material_index(&self) -> usize {
        self.material_index
    }

    /// Lines are debug overlays; always draw them
    fn is_in_frustum(&self, _frustum: &Frustum) -> bool {
        true
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

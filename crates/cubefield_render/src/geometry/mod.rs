//! Drawable geometry
//!
//! The [`GeometryObject`] trait is the renderer's view of a scene object:
//! a transform, a material index, a visibility test, and the draw calls.
//! Concrete shapes live in submodules.

mod cube;
mod line;

pub use cube::Cube;
pub use line::Line;

use bytemuck::{Pod, Zeroable};
use cubefield_core::Transform;
use cubefield_math::Frustum;
use wgpu::util::DeviceExt;

/// Vertex format shared by every material: position, normal, uv
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    pub const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, normal, uv }
    }

    /// Vertex buffer layout matching the shader inputs
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // uv: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 24,
                    shader_location: 2,
                },
            ],
        }
    }
}

/// GPU-side vertex data for one object
pub struct GeometryData {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl GeometryData {
    pub fn new(device: &wgpu::Device, vertices: &[Vertex], label: &str) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

/// A scene object the renderer can cull and draw
pub trait GeometryObject {
    fn transform(&self) -> &Transform;
    fn transform_mut(&mut self) -> &mut Transform;

    /// Index into the material registry; the batcher groups by this
    fn material_index(&self) -> usize;

    /// Whether any part of the object may be inside the frustum
    fn is_in_frustum(&self, frustum: &Frustum) -> bool;

    /// Bind the object's buffers; call once before `draw`
    fn open_drawing_context(&self, render_pass: &mut wgpu::RenderPass<'_>);

    /// Issue the draw call; the right material and model slot must
    /// already be bound
    fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>);

    /// Release GPU resources; the object must not be drawn afterwards
    fn dispose(&self);
}

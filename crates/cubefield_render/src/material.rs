//! Materials
//!
//! A material owns a render pipeline plus the uniform buffers its shader
//! reads: one camera/lighting uniform shared by every object drawn with
//! the material, and one dynamically-offset model-matrix buffer with a
//! 256-byte slot per visible object. Binding a material once per frame
//! and a slot offset per object keeps per-draw state changes minimal.

use std::fmt;

use bytemuck::{Pod, Zeroable};
use cubefield_math::{mat4, Mat4};

use crate::geometry::Vertex;

/// Stride of one model-matrix slot in the dynamic uniform buffer
///
/// Matches the WebGPU default `min_uniform_buffer_offset_alignment`.
pub const MODEL_SLOT_SIZE: u64 = 256;

/// Per-frame camera and lighting state, shared by all objects of a material
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Camera world position (w unused)
    pub view_pos: [f32; 4],
    /// Direction the light travels, normalized (w unused)
    pub light_dir: [f32; 4],
    /// x = ambient strength, y = diffuse strength
    pub light_params: [f32; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_proj: mat4::IDENTITY,
            view_pos: [0.0; 4],
            light_dir: [0.0, -1.0, 0.0, 0.0],
            light_params: [0.1, 0.9, 0.0, 0.0],
        }
    }
}

/// Per-object state: the model matrix, one slot per visible object
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
}

/// Failed material lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialError {
    /// An object referenced a material index the registry does not hold
    Missing(usize),
}

impl fmt::Display for MaterialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(index) => write!(f, "no material registered at index {}", index),
        }
    }
}

impl std::error::Error for MaterialError {}

/// A render pipeline with its camera and per-object uniforms
#[derive(Debug)]
pub struct Material {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    capacity: u32,
}

impl Material {
    /// Lit triangle material for solid geometry
    pub fn lit(device: &wgpu::Device, surface_format: wgpu::TextureFormat, max_objects: u32) -> Self {
        Self::new(
            device,
            surface_format,
            include_str!("shaders/lit.wgsl"),
            "Lit Material",
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::Face::Back),
            max_objects,
        )
    }

    /// Unlit line material for debug gizmos
    pub fn line(device: &wgpu::Device, surface_format: wgpu::TextureFormat, max_objects: u32) -> Self {
        Self::new(
            device,
            surface_format,
            include_str!("shaders/line.wgsl"),
            "Line Material",
            wgpu::PrimitiveTopology::LineList,
            None,
            max_objects,
        )
    }

    /// Build a material from shader source
    ///
    /// `max_objects` bounds how many objects can be drawn with this
    /// material in one frame; each gets a slot in the model buffer.
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        shader_source: &str,
        label: &str,
        topology: wgpu::PrimitiveTopology,
        cull_mode: Option<wgpu::Face>,
        max_objects: u32,
    ) -> Self {
        let camera_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Camera Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<ModelUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(label),
            bind_group_layouts: &[&camera_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(shader_source.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[Vertex::buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Uniform Buffer"),
            size: std::mem::size_of::<CameraUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Camera Bind Group"),
            layout: &camera_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let model_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Model Uniform Buffer"),
            size: max_objects as u64 * MODEL_SLOT_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // The bind group spans one slot; per-object dynamic offsets move it
        let model_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Model Bind Group"),
            layout: &model_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &model_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ModelUniform>() as u64),
                }),
            }],
        });

        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            model_buffer,
            model_bind_group,
            capacity: max_objects,
        }
    }

    /// Upload the shared camera/lighting uniform, once per frame
    pub fn write_camera(&self, queue: &wgpu::Queue, uniform: &CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(uniform));
    }

    /// Upload one object's model matrix into its slot
    ///
    /// Must happen before the render pass that draws the slot is submitted.
    pub fn write_model(&self, queue: &wgpu::Queue, slot: u32, model: &Mat4) {
        debug_assert!(slot < self.capacity, "model slot {} out of capacity", slot);
        queue.write_buffer(
            &self.model_buffer,
            slot as u64 * MODEL_SLOT_SIZE,
            bytemuck::bytes_of(&ModelUniform { model: *model }),
        );
    }

    /// Bind the material's pipeline and camera uniform
    pub fn use_in_pass(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
    }

    /// Bind one object's model-matrix slot
    pub fn prepare_for_object(&self, render_pass: &mut wgpu::RenderPass<'_>, slot: u32) {
        debug_assert!(slot < self.capacity);
        render_pass.set_bind_group(1, &self.model_bind_group, &[slot * MODEL_SLOT_SIZE as u32]);
    }

    /// Maximum number of objects drawable with this material per frame
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

/// Materials addressed by index
///
/// Objects store a material index rather than a reference, which keeps
/// them `'static` and lets the batcher group them by plain `usize`.
#[derive(Default)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material and return its index
    pub fn add(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Look up a material, failing loudly on a dangling index
    pub fn get(&self, index: usize) -> Result<&Material, MaterialError> {
        self.materials.get(index).ok_or(MaterialError::Missing(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Material)> {
        self.materials.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

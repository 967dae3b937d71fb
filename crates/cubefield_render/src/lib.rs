//! Rendering library for cubefield
//!
//! wgpu-based renderer for the cube sandbox.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - Fly camera with yaw/pitch, zoom, and an owned frustum
//! - [`material::Material`] - Pipeline plus camera and per-object uniforms
//! - [`geometry::GeometryObject`] - Trait for cullable, drawable scene objects
//! - [`gizmos`] - Debug line generation for frustum visualization
//!
//! Culling math lives in `cubefield_core`; this crate wires it to the GPU.

pub mod camera;
pub mod context;
pub mod geometry;
pub mod gizmos;
pub mod material;

pub use camera::Camera;
pub use context::{ContextError, RenderContext};
pub use geometry::{Cube, GeometryObject, Line};
pub use material::{CameraUniform, Material, MaterialError, MaterialRegistry};

// Re-export core types for convenience
pub use cubefield_core::{MaterialBatcher, Transform};
pub use cubefield_math::{Frustum, Vec3};

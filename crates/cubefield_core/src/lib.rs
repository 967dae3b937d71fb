//! Core scene types for cubefield
//!
//! This crate provides the GPU-free foundations of the sandbox:
//!
//! - [`Transform`] - Position, rotation, scale with a lazily cached world matrix
//! - [`visibility`] - World-space bounding boxes and frustum visibility tests
//! - [`MaterialBatcher`] / [`Batch`] - Grouping of draw submissions by material
//!
//! Everything here is testable without a window or a graphics device.

mod batch;
mod transform;
pub mod visibility;

pub use batch::{Batch, MaterialBatcher};
pub use transform::Transform;

// Re-export commonly used math types for convenience
pub use cubefield_math::{Aabb, Frustum, Mat4, Plane, Quat, Vec3};

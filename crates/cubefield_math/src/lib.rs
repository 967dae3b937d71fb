//! 3D Mathematics Library
//!
//! This crate provides the vector, rotation, and culling-volume types for
//! the Cubefield sandbox.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Quat`] - Rotation quaternion
//! - [`Mat4`] - 4x4 matrix for transformations (column-major)
//!
//! ## Culling Types
//!
//! - [`Plane`] - A half-space boundary answering signed-distance queries
//! - [`Aabb`] - Axis-aligned bounding box (center + half-extents)
//! - [`Frustum`] - Six inward-facing planes plus eight corner points

mod vec3;
mod quat;
pub mod mat4;
mod plane;
mod aabb;
mod frustum;

pub use vec3::Vec3;
pub use quat::Quat;
pub use mat4::Mat4;
pub use plane::Plane;
pub use aabb::Aabb;
pub use frustum::Frustum;

//! Transform (position, rotation, scale)
//!
//! A Transform represents the position, rotation, and uniform scale of a
//! scene object, and lazily caches the combined world matrix. Reading the
//! matrix when nothing changed since the last read is a copy, not a
//! recompute.

use cubefield_math::{mat4, Mat4, Quat, Vec3};
use std::cell::Cell;

/// A transform with position, rotation, uniform scale, and a cached
/// world matrix
///
/// The cache uses interior mutability so `world_matrix` can take `&self`:
/// mutators mark the cache dirty, and the next matrix read recomputes it.
/// The cached matrix is derived state only; two transforms with equal
/// position/rotation/scale are interchangeable regardless of cache state.
#[derive(Clone, Debug)]
pub struct Transform {
    position: Vec3,
    rotation: Quat,
    scale: f32,
    cached_matrix: Cell<Mat4>,
    dirty: Cell<bool>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
            cached_matrix: Cell::new(mat4::IDENTITY),
            dirty: Cell::new(false),
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        let mut t = Self::identity();
        t.set_position(position);
        t
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        let mut t = Self::identity();
        t.set_position(position);
        t.set_rotation(rotation);
        t
    }

    /// Current position
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current rotation
    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    /// Current uniform scale
    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Set the position, invalidating the cached matrix
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.dirty.set(true);
    }

    /// Set the rotation, invalidating the cached matrix
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.dirty.set(true);
    }

    /// Set the uniform scale, invalidating the cached matrix
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.dirty.set(true);
    }

    /// Translate by an offset
    pub fn translate(&mut self, offset: Vec3) {
        self.set_position(self.position + offset);
    }

    /// Apply an additional rotation on top of the current one
    pub fn rotate(&mut self, rotation: Quat) {
        self.set_rotation(rotation.compose(&self.rotation).normalize());
    }

    /// The world matrix: translation * rotation * scale
    ///
    /// Applied to a point this scales first, then rotates, then
    /// translates. Recomputed at most once per mutation, however many
    /// times it is read in between.
    pub fn world_matrix(&self) -> Mat4 {
        if self.dirty.get() {
            let m = mat4::mul(
                mat4::translation(self.position),
                mat4::mul(mat4::from_quat(self.rotation), mat4::scaling(self.scale)),
            );
            self.cached_matrix.set(m);
            self.dirty.set(false);
        }
        self.cached_matrix.get()
    }

    /// Transform a point from local space to world space
    ///
    /// Applies scale, then rotation, then translation.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p * self.scale) + self.position
    }

    /// Local +X axis in world space
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.rotation.rotate(Vec3::X)
    }

    /// Local +Y axis in world space
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.rotation.rotate(Vec3::Y)
    }

    /// Local +Z axis in world space
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation.rotate(Vec3::Z)
    }
}

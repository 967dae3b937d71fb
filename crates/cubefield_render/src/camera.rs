//! Fly camera
//!
//! First-person camera with yaw/pitch orientation, scroll-driven zoom
//! (field of view), and an owned view frustum for culling. Implements
//! [`CameraControl`] so the input crate can drive it without depending on
//! anything GPU-related; the camera itself is plain math and fully
//! testable without a device.

use cubefield_input::CameraControl;
use cubefield_math::{mat4, Frustum, Mat4, Vec3};

const MIN_FOV_DEGREES: f32 = 1.0;
const MAX_FOV_DEGREES: f32 = 45.0;

/// First-person camera with position, yaw/pitch orientation, and frustum
pub struct Camera {
    /// World-space position
    pub position: Vec3,
    forward: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,

    // Orientation angles in degrees
    yaw: f32,
    pitch: f32,
    /// Maximum |pitch| in degrees, kept below 90 to avoid flipping
    pub pitch_limit: f32,

    /// Vertical field of view in degrees; scroll zoom narrows it
    zoom: f32,
    pub aspect: f32,
    pub z_near: f32,
    pub z_far: f32,

    frustum: Frustum,
}

impl Camera {
    /// Create a camera at `position` looking down -Z
    pub fn new(position: Vec3, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let mut camera = Self {
            position,
            forward: Vec3::new(0.0, 0.0, -1.0),
            up: Vec3::Y,
            right: Vec3::X,
            world_up: Vec3::Y,
            // Yaw of -90 degrees points the forward vector down -Z
            yaw: -90.0,
            pitch: 0.0,
            pitch_limit: 89.0,
            zoom: MAX_FOV_DEGREES,
            aspect,
            z_near,
            z_far,
            frustum: Frustum::default(),
        };
        camera.update_vectors();
        camera.recalculate_frustum();
        camera
    }

    /// Current view direction (unit length)
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    /// Current camera-space up vector
    #[inline]
    pub fn up(&self) -> Vec3 {
        self.up
    }

    /// Current camera-space right vector
    #[inline]
    pub fn right(&self) -> Vec3 {
        self.right
    }

    /// Current vertical field of view in degrees
    #[inline]
    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    /// The view frustum as of the last `recalculate_frustum` call
    #[inline]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Turn the camera by yaw/pitch deltas in degrees
    ///
    /// Positive `delta_x` turns right; positive `delta_y` (mouse moving
    /// down) looks down. Pitch is clamped to `pitch_limit`.
    pub fn set_direction(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw += delta_x;
        self.pitch = (self.pitch - delta_y).clamp(-self.pitch_limit, self.pitch_limit);
        self.update_vectors();
    }

    /// Update the aspect ratio after a window resize
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// The view matrix for the current position and orientation
    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.position + self.forward, self.up)
    }

    /// The perspective projection matrix for the current zoom and aspect
    pub fn projection_matrix(&self) -> Mat4 {
        mat4::perspective(self.zoom.to_radians(), self.aspect, self.z_near, self.z_far)
    }

    /// Combined projection * view matrix
    pub fn view_projection_matrix(&self) -> Mat4 {
        mat4::mul(self.projection_matrix(), self.view_matrix())
    }

    /// Rebuild the frustum from the current camera state
    ///
    /// Call once per frame, after input was applied and before any
    /// visibility test; the frustum does not track mutations on its own.
    pub fn recalculate_frustum(&mut self) {
        self.frustum.recalculate(
            self.position,
            self.forward,
            self.up,
            self.right,
            self.zoom.to_radians(),
            self.aspect,
            self.z_near,
            self.z_far,
        );
    }

    /// Recompute the basis vectors from yaw and pitch
    fn update_vectors(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        self.forward = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalized();
        self.right = self.forward.cross(self.world_up).normalized();
        self.up = self.right.cross(self.forward);
    }
}

impl CameraControl for Camera {
    fn move_forward(&mut self, amount: f32) {
        self.position += self.forward * amount;
    }

    fn strafe(&mut self, amount: f32) {
        self.position += self.right * amount;
    }

    fn move_vertical(&mut self, amount: f32) {
        self.position += self.world_up * amount;
    }

    fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.set_direction(delta_yaw, delta_pitch);
    }

    fn adjust_zoom(&mut self, delta: f32) {
        self.zoom = (self.zoom - delta).clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES);
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubefield_math::Aabb;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a.x - b.x).abs() < EPSILON && (a.y - b.y).abs() < EPSILON && (a.z - b.z).abs() < EPSILON
    }

    fn test_camera() -> Camera {
        Camera::new(Vec3::ZERO, 16.0 / 9.0, 0.1, 100.0)
    }

    #[test]
    fn test_default_orientation_is_negative_z() {
        let camera = test_camera();
        assert!(vec_approx_eq(camera.forward(), Vec3::new(0.0, 0.0, -1.0)));
        assert!(vec_approx_eq(camera.right(), Vec3::X));
        assert!(vec_approx_eq(camera.up(), Vec3::Y));
    }

    #[test]
    fn test_yaw_turns_right() {
        let mut camera = test_camera();
        // +90 degrees of yaw from -Z ends up looking down +X
        camera.set_direction(90.0, 0.0);
        assert!(
            vec_approx_eq(camera.forward(), Vec3::X),
            "got {:?}",
            camera.forward()
        );
    }

    #[test]
    fn test_mouse_down_looks_down() {
        let mut camera = test_camera();
        camera.set_direction(0.0, 45.0);
        assert!(camera.forward().y < 0.0);
    }

    #[test]
    fn test_pitch_clamp() {
        let mut camera = test_camera();
        camera.set_direction(0.0, -500.0);
        // Clamped below straight up, so forward keeps a horizontal part
        assert!(camera.forward().y < 1.0 - 1e-4);
        let up_component = camera.forward().y;
        camera.set_direction(0.0, -500.0);
        assert!((camera.forward().y - up_component).abs() < EPSILON);
    }

    #[test]
    fn test_zoom_clamps_to_fov_range() {
        let mut camera = test_camera();
        camera.adjust_zoom(100.0);
        assert_eq!(camera.zoom(), 1.0);
        camera.adjust_zoom(-100.0);
        assert_eq!(camera.zoom(), 45.0);
    }

    #[test]
    fn test_zoom_in_narrows_fov() {
        let mut camera = test_camera();
        let before = camera.zoom();
        camera.adjust_zoom(5.0);
        assert!(camera.zoom() < before);
    }

    #[test]
    fn test_movement_follows_orientation() {
        let mut camera = test_camera();
        camera.set_direction(90.0, 0.0); // now looking down +X
        camera.move_forward(2.0);
        camera.strafe(1.0); // right of +X is +Z
        camera.move_vertical(3.0);
        assert!(
            vec_approx_eq(camera.position, Vec3::new(2.0, 3.0, 1.0)),
            "got {:?}",
            camera.position
        );
    }

    #[test]
    fn test_frustum_tracks_recalculate_only() {
        let mut camera = test_camera();
        let box_ahead = Aabb::new(Vec3::new(0.0, 0.0, -10.0), 1.0, 1.0, 1.0);
        assert!(camera.frustum().contains_aabb(&box_ahead));

        // Turn around: the frustum is stale until recalculated
        camera.set_direction(180.0, 0.0);
        assert!(camera.frustum().contains_aabb(&box_ahead));
        camera.recalculate_frustum();
        assert!(!camera.frustum().contains_aabb(&box_ahead));
    }

    #[test]
    fn test_view_matrix_places_forward_point_on_axis() {
        let camera = test_camera();
        let ahead = mat4::transform_point(camera.view_matrix(), Vec3::new(0.0, 0.0, -5.0));
        assert!(vec_approx_eq(ahead, Vec3::new(0.0, 0.0, -5.0)));
    }
}

//! Fly-camera controller
//!
//! Controls:
//! - W/S: Forward/backward along the view direction
//! - A/D: Left/right strafe
//! - Space/Shift: Up/down along world Y
//! - Mouse motion: look around (when the cursor is captured)
//! - Scroll wheel: zoom (narrows/widens the field of view)

use cubefield_math::Vec3;
use winit::event::ElementState;
use winit::keyboard::KeyCode;

/// Accumulates raw input events and applies them to a camera once per frame
pub struct CameraController {
    // Movement state
    forward: bool,
    backward: bool,
    left: bool,
    right: bool,
    up: bool,
    down: bool,

    // Mouse state, accumulated between updates
    pending_dx: f32,
    pending_dy: f32,
    pending_zoom: f32,

    // Configuration
    pub move_speed: f32,
    pub mouse_sensitivity: f32,
    pub scroll_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraController {
    pub fn new() -> Self {
        Self {
            forward: false,
            backward: false,
            left: false,
            right: false,
            up: false,
            down: false,

            pending_dx: 0.0,
            pending_dy: 0.0,
            pending_zoom: 0.0,

            move_speed: 5.0,
            mouse_sensitivity: 0.1,
            scroll_sensitivity: 1.0,
        }
    }

    /// Process keyboard input, returning true if the key was handled
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;

        match key {
            KeyCode::KeyW => { self.forward = pressed; true }
            KeyCode::KeyS => { self.backward = pressed; true }
            KeyCode::KeyA => { self.left = pressed; true }
            KeyCode::KeyD => { self.right = pressed; true }
            KeyCode::Space => { self.up = pressed; true }
            KeyCode::ShiftLeft | KeyCode::ShiftRight => { self.down = pressed; true }
            _ => false,
        }
    }

    /// Accumulate raw mouse movement (from `DeviceEvent::MouseMotion`)
    pub fn process_mouse_motion(&mut self, delta_x: f64, delta_y: f64) {
        self.pending_dx += delta_x as f32;
        self.pending_dy += delta_y as f32;
    }

    /// Accumulate scroll wheel input (positive = zoom in)
    pub fn process_scroll(&mut self, delta: f32) {
        self.pending_zoom += delta;
    }

    /// Apply accumulated input to the camera
    ///
    /// Movement scales with `dt` so speed is frame-rate independent; look
    /// and zoom apply the raw accumulated deltas. Looking only happens
    /// while the cursor is captured. Returns the camera position for
    /// status display.
    pub fn update<C: CameraControl>(&mut self, camera: &mut C, dt: f32, cursor_captured: bool) -> Vec3 {
        let fwd = (self.forward as i32 - self.backward as i32) as f32;
        let rgt = (self.right as i32 - self.left as i32) as f32;
        let vert = (self.up as i32 - self.down as i32) as f32;

        camera.move_forward(fwd * self.move_speed * dt);
        camera.strafe(rgt * self.move_speed * dt);
        camera.move_vertical(vert * self.move_speed * dt);

        if cursor_captured && (self.pending_dx != 0.0 || self.pending_dy != 0.0) {
            camera.look(
                self.pending_dx * self.mouse_sensitivity,
                self.pending_dy * self.mouse_sensitivity,
            );
        }
        if self.pending_zoom != 0.0 {
            camera.adjust_zoom(self.pending_zoom * self.scroll_sensitivity);
        }

        self.pending_dx = 0.0;
        self.pending_dy = 0.0;
        self.pending_zoom = 0.0;

        camera.position()
    }

    /// Check if any movement key is pressed
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.up || self.down
    }

    /// Builder: set movement speed (world units per second)
    pub fn with_move_speed(mut self, speed: f32) -> Self {
        self.move_speed = speed;
        self
    }

    /// Builder: set mouse sensitivity (degrees per mouse count)
    pub fn with_mouse_sensitivity(mut self, sensitivity: f32) -> Self {
        self.mouse_sensitivity = sensitivity;
        self
    }

    /// Builder: set scroll sensitivity (FOV degrees per scroll line)
    pub fn with_scroll_sensitivity(mut self, sensitivity: f32) -> Self {
        self.scroll_sensitivity = sensitivity;
        self
    }
}

/// Trait for camera control
/// Allows the controller to work with different camera implementations
pub trait CameraControl {
    /// Move along the view direction (positive = forward)
    fn move_forward(&mut self, amount: f32);
    /// Move along the camera's right vector (positive = right)
    fn strafe(&mut self, amount: f32);
    /// Move along world Y (positive = up)
    fn move_vertical(&mut self, amount: f32);
    /// Turn by yaw/pitch deltas in degrees (positive dy looks up)
    fn look(&mut self, delta_yaw: f32, delta_pitch: f32);
    /// Narrow or widen the field of view (positive = zoom in)
    fn adjust_zoom(&mut self, delta: f32);
    fn position(&self) -> Vec3;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records every call so tests can assert on what the controller did
    #[derive(Default)]
    struct RecordingCamera {
        forward: f32,
        strafe: f32,
        vertical: f32,
        yaw: f32,
        pitch: f32,
        zoom: f32,
    }

    impl CameraControl for RecordingCamera {
        fn move_forward(&mut self, amount: f32) {
            self.forward += amount;
        }
        fn strafe(&mut self, amount: f32) {
            self.strafe += amount;
        }
        fn move_vertical(&mut self, amount: f32) {
            self.vertical += amount;
        }
        fn look(&mut self, delta_yaw: f32, delta_pitch: f32) {
            self.yaw += delta_yaw;
            self.pitch += delta_pitch;
        }
        fn adjust_zoom(&mut self, delta: f32) {
            self.zoom += delta;
        }
        fn position(&self) -> Vec3 {
            Vec3::new(self.forward, self.vertical, self.strafe)
        }
    }

    #[test]
    fn test_forward_movement_scales_with_dt() {
        let mut controller = CameraController::new().with_move_speed(2.0);
        let mut camera = RecordingCamera::default();

        controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed);
        controller.update(&mut camera, 0.5, true);
        assert_eq!(camera.forward, 1.0);

        controller.process_keyboard(KeyCode::KeyW, ElementState::Released);
        controller.update(&mut camera, 0.5, true);
        assert_eq!(camera.forward, 1.0);
    }

    #[test]
    fn test_opposed_keys_cancel() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        controller.process_keyboard(KeyCode::KeyA, ElementState::Pressed);
        controller.process_keyboard(KeyCode::KeyD, ElementState::Pressed);
        controller.update(&mut camera, 1.0, true);
        assert_eq!(camera.strafe, 0.0);
    }

    #[test]
    fn test_vertical_movement() {
        let mut controller = CameraController::new().with_move_speed(1.0);
        let mut camera = RecordingCamera::default();

        controller.process_keyboard(KeyCode::Space, ElementState::Pressed);
        controller.update(&mut camera, 1.0, true);
        assert_eq!(camera.vertical, 1.0);

        controller.process_keyboard(KeyCode::Space, ElementState::Released);
        controller.process_keyboard(KeyCode::ShiftLeft, ElementState::Pressed);
        controller.update(&mut camera, 1.0, true);
        assert_eq!(camera.vertical, 0.0);
    }

    #[test]
    fn test_unhandled_key_reports_false() {
        let mut controller = CameraController::new();
        assert!(!controller.process_keyboard(KeyCode::KeyP, ElementState::Pressed));
        assert!(controller.process_keyboard(KeyCode::KeyW, ElementState::Pressed));
    }

    #[test]
    fn test_mouse_motion_accumulates_then_resets() {
        let mut controller = CameraController::new().with_mouse_sensitivity(0.5);
        let mut camera = RecordingCamera::default();

        controller.process_mouse_motion(4.0, -2.0);
        controller.process_mouse_motion(2.0, 0.0);
        controller.update(&mut camera, 0.016, true);
        assert_eq!(camera.yaw, 3.0);
        assert_eq!(camera.pitch, -1.0);

        // Second update with no new motion applies nothing
        controller.update(&mut camera, 0.016, true);
        assert_eq!(camera.yaw, 3.0);
    }

    #[test]
    fn test_no_look_while_cursor_released() {
        let mut controller = CameraController::new();
        let mut camera = RecordingCamera::default();

        controller.process_mouse_motion(10.0, 10.0);
        controller.update(&mut camera, 0.016, false);
        assert_eq!(camera.yaw, 0.0);
        assert_eq!(camera.pitch, 0.0);
    }

    #[test]
    fn test_scroll_zooms() {
        let mut controller = CameraController::new().with_scroll_sensitivity(2.0);
        let mut camera = RecordingCamera::default();

        controller.process_scroll(1.5);
        controller.update(&mut camera, 0.016, false);
        assert_eq!(camera.zoom, 3.0);
    }

    #[test]
    fn test_is_moving() {
        let mut controller = CameraController::new();
        assert!(!controller.is_moving());
        controller.process_keyboard(KeyCode::KeyS, ElementState::Pressed);
        assert!(controller.is_moving());
    }
}

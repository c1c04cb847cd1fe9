//! Free-flying first-person camera.
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch in degrees and the basis vectors are
//! recomputed whenever either changes:
//!
//! ```text
//! front = normalize(cos(yaw) * cos(pitch), sin(pitch), sin(yaw) * cos(pitch))
//! right = normalize(front x world_up)
//! up    = normalize(right x front)
//! ```
//!
//! A yaw of -90 degrees therefore looks down -Z, the right-handed default.

use super::{Camera, DEFAULT_ZOOM};
use crate::math::{Mat4, Vec3};

pub const DEFAULT_YAW: f32 = -90.0;
pub const DEFAULT_PITCH: f32 = 0.0;
pub const DEFAULT_SPEED: f32 = 2.5;
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
const PITCH_LIMIT: f32 = 89.0;

/// Movement directions, decoupled from any particular input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraMovement {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct FpsCamera {
    position: Vec3,
    front: Vec3,
    up: Vec3,
    right: Vec3,
    world_up: Vec3,
    yaw: f32,
    pitch: f32,
    zoom: f32,
    /// Units per second.
    pub movement_speed: f32,
    /// Degrees per mouse pixel.
    pub mouse_sensitivity: f32,
}

impl Default for FpsCamera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl FpsCamera {
    /// Creates a camera at `position` with default orientation (looking down -Z).
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::Y, DEFAULT_YAW, DEFAULT_PITCH)
    }

    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: world_up,
            right: Vec3::X,
            world_up,
            yaw,
            pitch,
            zoom: DEFAULT_ZOOM,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
        };
        camera.update_vectors();
        camera
    }

    /// Moves the camera `movement_speed * delta_time` units in `direction`.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Turns the camera by a mouse offset in pixels.
    ///
    /// Positive `x_offset` turns right, positive `y_offset` looks up. With
    /// `constrain_pitch` the pitch stays within +/-89 degrees so the view
    /// never flips over the pole.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32, constrain_pitch: bool) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;

        if constrain_pitch {
            self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }

        self.update_vectors();
    }

    /// Sets the orientation directly. The new pitch is clamped.
    pub fn set_yaw_pitch(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_vectors();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    fn update_vectors(&mut self) {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        // Normalized because their length shrinks as the camera looks further up or down.
        self.right = self.front.cross(self.world_up).normalize();
        self.up = self.right.cross(self.front).normalize();
    }
}

impl Camera for FpsCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.front, self.up)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn front(&self) -> Vec3 {
        self.front
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn zoom_mut(&mut self) -> &mut f32 {
        &mut self.zoom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn camera_starts_looking_down_negative_z() {
        let camera = FpsCamera::new(Vec3::ZERO);
        assert_relative_eq!(camera.front().z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.front().x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.right().x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.up().y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn mouse_right_turns_right() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        // 900 px * 0.1 deg/px = 90 degrees.
        camera.process_mouse_movement(900.0, 0.0, true);
        assert_relative_eq!(camera.yaw(), 0.0, epsilon = 1e-4);
        assert_relative_eq!(camera.front().x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.process_mouse_movement(0.0, 5000.0, true);
        assert_relative_eq!(camera.pitch(), 89.0);

        camera.process_mouse_movement(0.0, -5000.0, true);
        assert_relative_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn pitch_unconstrained_when_asked() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.process_mouse_movement(0.0, 1000.0, false);
        assert_relative_eq!(camera.pitch(), 100.0);
    }

    #[test]
    fn set_yaw_pitch_clamps_new_pitch() {
        let mut camera = FpsCamera::new(Vec3::ZERO);
        camera.set_yaw_pitch(-90.0, 120.0);
        assert_relative_eq!(camera.pitch(), 89.0);
    }

    #[test]
    fn keyboard_moves_by_speed_times_delta() {
        let mut camera = FpsCamera::new(Vec3::new(0.0, -1.0, 3.0));
        camera.process_keyboard(CameraMovement::Forward, 2.0);
        assert_relative_eq!(camera.position().z, -2.0, epsilon = 1e-5);

        camera.process_keyboard(CameraMovement::Right, 0.4);
        assert_relative_eq!(camera.position().x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_puts_point_ahead_on_negative_z() {
        let camera = FpsCamera::new(Vec3::new(0.0, 0.0, 5.0));
        let p = camera.view_matrix().transform_point(Vec3::ZERO);
        assert_relative_eq!(p.z, -5.0, epsilon = 1e-4);
    }
}

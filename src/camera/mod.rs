//! Cameras and the rig that switches between them.
//!
//! Every camera answers the same questions through the [`Camera`] trait:
//! where it is, where it looks, and how wide its field of view is. The
//! [`CameraRig`] owns one camera of each kind and routes input to whichever
//! is active.

mod car;
mod fixed;
mod fps;

pub use car::CarCamera;
pub use fixed::{StaticCamera, StaticFollowCamera};
pub use fps::{CameraMovement, FpsCamera};

use serde::{Deserialize, Serialize};

use crate::config::CameraConfig;
use crate::math::{Mat4, Vec3};

/// Field of view every camera starts with, in degrees.
pub const DEFAULT_ZOOM: f32 = 45.0;
pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 60.0;

/// Common interface of all camera variants.
pub trait Camera {
    /// World-to-view transform.
    fn view_matrix(&self) -> Mat4;

    /// Eye position in world space.
    fn position(&self) -> Vec3;

    /// Normalized viewing direction in world space.
    fn front(&self) -> Vec3;

    /// Vertical field of view in degrees.
    fn zoom(&self) -> f32;

    fn zoom_mut(&mut self) -> &mut f32;

    /// Narrows the field of view for positive offsets (scroll up) and widens
    /// it for negative ones, keeping it within `[MIN_ZOOM, MAX_ZOOM]`.
    fn process_mouse_scroll(&mut self, y_offset: f32) {
        let zoom = self.zoom_mut();
        *zoom = (*zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }
}

/// The camera modes the rig can switch between, in cycling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraKind {
    /// Free-flying first-person camera (WASD + mouse).
    Fps,
    /// Chase camera mounted behind the car.
    #[default]
    Car,
    /// Fixed camera looking at the world origin.
    Static,
    /// Fixed camera that keeps the car in view.
    StaticFollow,
}

impl CameraKind {
    pub const ALL: [CameraKind; 4] = [
        CameraKind::Fps,
        CameraKind::Car,
        CameraKind::Static,
        CameraKind::StaticFollow,
    ];

    /// The mode after this one, wrapping around.
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for CameraKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CameraKind::Fps => write!(f, "Free"),
            CameraKind::Car => write!(f, "Chase"),
            CameraKind::Static => write!(f, "Static"),
            CameraKind::StaticFollow => write!(f, "Follow"),
        }
    }
}

/// Owns one camera of each kind and tracks which one is active.
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub fps: FpsCamera,
    pub car: CarCamera,
    pub fixed: StaticCamera,
    pub follow: StaticFollowCamera,
    active: CameraKind,
}

impl CameraRig {
    pub fn new(
        fps: FpsCamera,
        car: CarCamera,
        fixed: StaticCamera,
        follow: StaticFollowCamera,
        active: CameraKind,
    ) -> Self {
        Self {
            fps,
            car,
            fixed,
            follow,
            active,
        }
    }

    /// One camera of each kind, placed as configured.
    pub fn from_config(config: &CameraConfig) -> Self {
        let mut fps = FpsCamera::new(config.fps_position);
        fps.movement_speed = config.move_speed;
        fps.mouse_sensitivity = config.mouse_sensitivity;
        Self::new(
            fps,
            CarCamera::default(),
            StaticCamera::new(config.static_position),
            StaticFollowCamera::new(config.follow_position),
            config.initial,
        )
    }

    pub fn active_kind(&self) -> CameraKind {
        self.active
    }

    pub fn set_active(&mut self, kind: CameraKind) {
        if kind != self.active {
            log::info!("Camera: {kind}");
        }
        self.active = kind;
    }

    /// Switches to the next camera mode and returns it.
    pub fn cycle(&mut self) -> CameraKind {
        self.set_active(self.active.next());
        self.active
    }

    pub fn active(&self) -> &dyn Camera {
        match self.active {
            CameraKind::Fps => &self.fps,
            CameraKind::Car => &self.car,
            CameraKind::Static => &self.fixed,
            CameraKind::StaticFollow => &self.follow,
        }
    }

    pub fn active_mut(&mut self) -> &mut dyn Camera {
        match self.active {
            CameraKind::Fps => &mut self.fps,
            CameraKind::Car => &mut self.car,
            CameraKind::Static => &mut self.fixed,
            CameraKind::StaticFollow => &mut self.follow,
        }
    }

    /// Updates the cameras that depend on the car's placement.
    pub fn track_car(&mut self, car_position: Vec3, car_matrix: &Mat4) {
        self.car.track(car_position, car_matrix);
        self.follow.track(car_position);
    }

    /// Keyboard movement only steers the free camera, and only while active.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        if self.active == CameraKind::Fps {
            self.fps.process_keyboard(direction, delta_time);
        }
    }

    /// Mouse look only steers the free camera, and only while active.
    ///
    /// `x_offset` grows to the right, `y_offset` grows upward.
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        if self.active == CameraKind::Fps {
            self.fps.process_mouse_movement(x_offset, y_offset, true);
        }
    }

    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.active_mut().process_mouse_scroll(y_offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rig(active: CameraKind) -> CameraRig {
        CameraRig::from_config(&CameraConfig {
            initial: active,
            ..Default::default()
        })
    }

    #[test]
    fn cycle_visits_every_mode_and_wraps() {
        let mut rig = rig(CameraKind::Fps);
        assert_eq!(rig.cycle(), CameraKind::Car);
        assert_eq!(rig.cycle(), CameraKind::Static);
        assert_eq!(rig.cycle(), CameraKind::StaticFollow);
        assert_eq!(rig.cycle(), CameraKind::Fps);
    }

    #[test]
    fn scroll_zooms_in_and_clamps() {
        let mut rig = rig(CameraKind::Car);
        rig.process_mouse_scroll(5.0);
        assert_relative_eq!(rig.active().zoom(), 40.0);

        rig.process_mouse_scroll(100.0);
        assert_relative_eq!(rig.active().zoom(), MIN_ZOOM);

        rig.process_mouse_scroll(-100.0);
        assert_relative_eq!(rig.active().zoom(), MAX_ZOOM);
    }

    #[test]
    fn scroll_only_affects_active_camera() {
        let mut rig = rig(CameraKind::Car);
        rig.process_mouse_scroll(10.0);
        assert_relative_eq!(rig.fps.zoom(), DEFAULT_ZOOM);
        assert_relative_eq!(rig.car.zoom(), 35.0);
    }

    #[test]
    fn keyboard_ignored_unless_free_camera_active() {
        let mut rig = rig(CameraKind::Car);
        let before = rig.fps.position();
        rig.process_keyboard(CameraMovement::Forward, 1.0);
        rig.process_mouse_movement(100.0, 0.0);
        assert_eq!(rig.fps.position(), before);
        assert_relative_eq!(rig.fps.yaw(), -90.0);

        rig.set_active(CameraKind::Fps);
        rig.process_keyboard(CameraMovement::Forward, 1.0);
        assert_ne!(rig.fps.position(), before);
    }

    #[test]
    fn track_car_updates_dependent_cameras() {
        let mut rig = rig(CameraKind::StaticFollow);
        let car_position = Vec3::new(4.0, 0.0, -2.0);
        rig.track_car(car_position, &Mat4::translation_vec(car_position));

        let expected = (car_position - rig.follow.position()).normalize();
        let front = rig.active().front();
        assert_relative_eq!(front.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(front.z, expected.z, epsilon = 1e-5);
        assert_relative_eq!(rig.car.position().z, -1.0, epsilon = 1e-5);
    }
}

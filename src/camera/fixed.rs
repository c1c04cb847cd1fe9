//! Cameras bolted to a fixed spot in the world.
//!
//! Both use +Z as their up vector, which suits overhead placements above the
//! track. Neither may sit directly on the Z axis of its target.

use super::{Camera, DEFAULT_ZOOM};
use crate::math::{Mat4, Vec3};

const STATIC_UP: Vec3 = Vec3::Z;

/// Fixed camera looking at the world origin.
#[derive(Debug, Clone)]
pub struct StaticCamera {
    position: Vec3,
    zoom: f32,
}

impl StaticCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Camera for StaticCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, STATIC_UP)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn front(&self) -> Vec3 {
        (-self.position).normalize()
    }

    fn zoom(&self) -> f32 {
        self.zoom
    }

    fn zoom_mut(&mut self) -> &mut f32 {
        &mut self.zoom
    }
}

/// Fixed camera that turns to keep the car in view.
#[derive(Debug, Clone)]
pub struct StaticFollowCamera {
    position: Vec3,
    car_position: Vec3,
    zoom: f32,
}

impl StaticFollowCamera {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            car_position: Vec3::ZERO,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn track(&mut self, car_position: Vec3) {
        self.car_position = car_position;
    }
}

impl Camera for StaticFollowCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.car_position, STATIC_UP)
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn front(&self) -> Vec3 {
        (self.car_position - self.position).normalize()
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
    fn static_camera_centers_origin() {
        let camera = StaticCamera::new(Vec3::new(0.0, 10.0, 0.0));
        let p = camera.view_matrix().transform_point(Vec3::ZERO);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, -10.0, epsilon = 1e-5);
    }

    #[test]
    fn follow_camera_stays_put_and_centers_car() {
        let mut camera = StaticFollowCamera::new(Vec3::new(0.0, 3.0, 5.0));
        let car = Vec3::new(8.8, -1.77, 0.0);
        camera.track(car);

        assert_eq!(camera.position(), Vec3::new(0.0, 3.0, 5.0));
        let p = camera.view_matrix().transform_point(car);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-4);
    }
}

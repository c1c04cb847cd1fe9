//! Chase camera mounted behind the car.

use super::{Camera, DEFAULT_ZOOM};
use crate::math::{Mat4, Vec3, Vec4};

/// Offset of the eye behind the car, in the car's local frame.
pub const CHASE_DISTANCE: f32 = 1.0;
pub const CHASE_HEIGHT: f32 = 0.3;

/// Looks at the car from a fixed offset in the car's own frame, so the view
/// turns with it. World up is always +Y.
#[derive(Debug, Clone)]
pub struct CarCamera {
    position: Vec3,
    car_position: Vec3,
    zoom: f32,
    pub distance: f32,
    pub height: f32,
}

impl Default for CarCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -3.0),
            car_position: Vec3::new(0.0, 0.0, -2.0),
            zoom: DEFAULT_ZOOM,
            distance: CHASE_DISTANCE,
            height: CHASE_HEIGHT,
        }
    }
}

impl CarCamera {
    /// Re-mounts the camera on the car.
    ///
    /// `car_matrix` is the car's placement (translation and heading, without
    /// the mesh scale); the car faces its local -Z, so +Z is behind it.
    pub fn track(&mut self, car_position: Vec3, car_matrix: &Mat4) {
        self.car_position = car_position;
        self.position = (*car_matrix * Vec4::point(0.0, self.height, self.distance)).to_vec3();
    }

    pub fn car_position(&self) -> Vec3 {
        self.car_position
    }
}

impl Camera for CarCamera {
    fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.car_position, Vec3::Y)
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
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn sits_behind_and_above_the_car() {
        let mut camera = CarCamera::default();
        let car = Vec3::new(8.8, -1.77, 0.0);
        camera.track(car, &Mat4::translation_vec(car));

        assert_relative_eq!(camera.position().x, 8.8, epsilon = 1e-5);
        assert_relative_eq!(camera.position().y, -1.47, epsilon = 1e-5);
        assert_relative_eq!(camera.position().z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn turns_with_the_car() {
        let mut camera = CarCamera::default();
        // Car turned 90 degrees left now faces -X, so the camera sits at +X.
        camera.track(Vec3::ZERO, &Mat4::rotation_y(FRAC_PI_2));

        assert_relative_eq!(camera.position().x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.position().z, 0.0, epsilon = 1e-5);
        assert!(camera.front().x < 0.0);
    }

    #[test]
    fn car_is_centered_in_view() {
        let mut camera = CarCamera::default();
        let car = Vec3::new(2.0, 0.0, 2.0);
        camera.track(car, &Mat4::translation_vec(car));

        let p = camera.view_matrix().transform_point(car);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-5);
        assert!(p.z < 0.0);
    }
}

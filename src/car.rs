//! The drivable car.

use crate::math::{Mat4, Vec3};
use crate::transform::Transform;

/// Steering input for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriveInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Position and heading of the car on the track.
///
/// The car faces its local -Z axis. Heading is measured in degrees about +Y;
/// increasing it turns the car left.
#[derive(Debug, Clone)]
pub struct Car {
    transform: Transform,
    /// Units per second.
    pub speed: f32,
    /// Degrees per second.
    pub turn_rate: f32,
}

impl Car {
    pub fn new(position: Vec3, heading: f32, speed: f32, turn_rate: f32) -> Self {
        let mut transform = Transform::at(position);
        transform.set_heading(heading.to_radians());
        Self {
            transform,
            speed,
            turn_rate,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position()
    }

    /// Heading in degrees.
    pub fn heading(&self) -> f32 {
        self.transform.heading().to_degrees()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Placement of the car: translation then heading, without any mesh scale.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix()
    }

    /// Unit vector the car drives along.
    pub fn front(&self) -> Vec3 {
        self.transform.forward()
    }

    /// Advances the car by one frame of input.
    pub fn drive(&mut self, input: DriveInput, delta_time: f32) {
        let velocity = self.speed * delta_time;
        let front = self.front();

        if input.forward {
            self.transform.translate(front * velocity);
        }
        if input.backward {
            self.transform.translate(-front * velocity);
        }

        let turn = self.turn_rate.to_radians() * delta_time;
        if input.left {
            self.transform.rotate_y(turn);
        }
        if input.right {
            self.transform.rotate_y(-turn);
        }
    }
}

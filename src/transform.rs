//! Placement of an object in the world.

use crate::math::{Mat4, Vec3};

/// Position, orientation and size of an object.
///
/// Rotation is stored as Euler angles in radians and applied yaw (Y) first,
/// then pitch (X), then roll (Z), so the heading of a vehicle stays a pure
/// rotation about world +Y. Setters return `&mut Self` for chaining.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity orientation and scale at `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = position;
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        self.position += delta;
        self
    }

    /// Euler angles (pitch, yaw, roll) in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = rotation;
        self
    }

    /// Yaw in radians; positive turns counter-clockwise seen from above.
    pub fn heading(&self) -> f32 {
        self.rotation.y
    }

    pub fn set_heading(&mut self, heading: f32) -> &mut Self {
        self.rotation.y = heading;
        self
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation.y += angle;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = scale;
        self
    }

    fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_x(self.rotation.x)
            * Mat4::rotation_z(self.rotation.z)
    }

    /// `T * Ry * Rx * Rz * S`.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::translation_vec(self.position)
            * self.rotation_matrix()
            * Mat4::scaling(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Carries object-space normals into world space.
    pub fn normal_matrix(&self) -> Mat4 {
        self.to_matrix().normal_matrix()
    }

    /// Unit vector along the object's local -Z axis, in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation_matrix()
            .transform_direction(Vec3::new(0.0, 0.0, -1.0))
            .normalize()
    }
}

//! Lighting model: a directional sun, a spot light, and distance fog.
//!
//! Each light contributes a Phong term:
//!
//! ```text
//! ambient  = light.ambient  * surface.diffuse
//! diffuse  = light.diffuse  * max(n . l, 0) * surface.diffuse
//! specular = light.specular * max(v . reflect(-l, n), 0)^shininess * surface.specular
//! ```
//!
//! The spot light additionally scales all three terms by distance attenuation
//! and by a soft cone falloff between its inner and outer cut-off.

use serde::{Deserialize, Serialize};

use crate::math::Vec3;

/// Material properties at one shaded point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

/// Returns the (diffuse, specular) factors for a light arriving from `light_dir`.
///
/// All vectors are unit length and point away from the surface.
fn phong_factors(normal: Vec3, view_dir: Vec3, light_dir: Vec3, shininess: f32) -> (f32, f32) {
    let diff = normal.dot(light_dir).max(0.0);
    let reflect_dir = (-light_dir).reflect(normal);
    let spec = view_dir.dot(reflect_dir).max(0.0).powf(shininess);
    (diff, spec)
}

/// A light infinitely far away whose rays are all parallel, like the sun.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionalLight {
    /// The direction the light travels (not where it comes from).
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: Vec3::new(-0.2, -1.0, -0.3),
            ambient: Vec3::splat(0.1),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(1.0),
        }
    }
}

impl DirectionalLight {
    pub fn shade(&self, normal: Vec3, view_dir: Vec3, surface: &Surface) -> Vec3 {
        let light_dir = (-self.direction).normalize();
        let (diff, spec) = phong_factors(normal, view_dir, light_dir, surface.shininess);

        self.ambient.mul_elem(surface.diffuse)
            + self.diffuse.mul_elem(surface.diffuse) * diff
            + self.specular.mul_elem(surface.specular) * spec
    }
}

/// A cone of light with a soft edge and distance attenuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    /// Cosine of the inner cone half-angle; full intensity inside it.
    pub cut_off: f32,
    /// Cosine of the outer cone half-angle; no light outside it.
    pub outer_cut_off: f32,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            direction: Vec3::new(0.0, 0.0, -1.0),
            cut_off: 12.5f32.to_radians().cos(),
            outer_cut_off: 20.0f32.to_radians().cos(),
            ambient: Vec3::splat(0.2),
            diffuse: Vec3::splat(0.5),
            specular: Vec3::splat(1.0),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
        }
    }
}

impl SpotLight {
    /// Points the light from `position` along `direction`.
    pub fn aim(&mut self, position: Vec3, direction: Vec3) {
        self.position = position;
        self.direction = direction.normalize();
    }

    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }

    /// Cone falloff for a unit vector pointing from the surface to the light.
    ///
    /// 1 inside the inner cone, 0 outside the outer cone, linear in the
    /// cosine between them.
    pub fn intensity(&self, light_dir: Vec3) -> f32 {
        let theta = light_dir.dot(-self.direction.normalize());
        let epsilon = self.cut_off - self.outer_cut_off;
        if epsilon.abs() <= f32::EPSILON {
            return if theta >= self.cut_off { 1.0 } else { 0.0 };
        }
        ((theta - self.outer_cut_off) / epsilon).clamp(0.0, 1.0)
    }

    pub fn shade(&self, position: Vec3, normal: Vec3, view_dir: Vec3, surface: &Surface) -> Vec3 {
        let to_light = self.position - position;
        let distance = to_light.magnitude();
        let light_dir = to_light.normalize();
        let (diff, spec) = phong_factors(normal, view_dir, light_dir, surface.shininess);

        let scale = self.attenuation(distance) * self.intensity(light_dir);

        (self.ambient.mul_elem(surface.diffuse)
            + self.diffuse.mul_elem(surface.diffuse) * diff
            + self.specular.mul_elem(surface.specular) * spec)
            * scale
    }
}

/// How fog thickens with distance from the eye.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FogMode {
    /// No fog before `start`, fully fogged beyond `end`.
    Linear { start: f32, end: f32 },
    /// Visibility decays as `exp(-density * distance)`.
    Exponential { density: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fog {
    pub color: Vec3,
    pub mode: FogMode,
}

impl Default for Fog {
    fn default() -> Self {
        Self {
            color: Vec3::splat(0.05),
            mode: FogMode::Linear {
                start: 5.0,
                end: 40.0,
            },
        }
    }
}

impl Fog {
    /// Fraction of the surface colour that survives at `distance`, in `[0, 1]`.
    pub fn factor(&self, distance: f32) -> f32 {
        match self.mode {
            FogMode::Linear { start, end } => {
                if end <= start {
                    return if distance < start { 1.0 } else { 0.0 };
                }
                ((end - distance) / (end - start)).clamp(0.0, 1.0)
            }
            FogMode::Exponential { density } => (-density * distance).exp().clamp(0.0, 1.0),
        }
    }

    pub fn apply(&self, color: Vec3, distance: f32) -> Vec3 {
        self.color.lerp(color, self.factor(distance))
    }
}

/// Everything the fragment shader needs to light a pixel.
#[derive(Debug, Clone, Copy)]
pub struct Lighting {
    pub sun: DirectionalLight,
    pub spot: Option<SpotLight>,
    pub fog: Option<Fog>,
    pub eye: Vec3,
}

impl Lighting {
    /// Colour of a surface point, fog included.
    pub fn shade(&self, position: Vec3, normal: Vec3, surface: &Surface) -> Vec3 {
        let to_eye = self.eye - position;
        let view_dir = to_eye.normalize();

        let mut color = self.sun.shade(normal, view_dir, surface);
        if let Some(spot) = &self.spot {
            color += spot.shade(position, normal, view_dir, surface);
        }

        match &self.fog {
            Some(fog) => fog.apply(color, to_eye.magnitude()),
            None => color,
        }
    }
}

//! Fragment shaders.

use super::rasterizer::{Fragment, FragmentShader};
use crate::colors;
use crate::light::Lighting;
use crate::material::Material;

/// Per-pixel Phong lighting of a textured material, with fog.
pub struct PhongShader<'a> {
    material: &'a Material,
    lighting: &'a Lighting,
}

impl<'a> PhongShader<'a> {
    pub fn new(material: &'a Material, lighting: &'a Lighting) -> Self {
        Self { material, lighting }
    }
}

impl FragmentShader for PhongShader<'_> {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> u32 {
        let normal = fragment.normal.normalize();
        let surface = self.material.surface(fragment.uv);
        colors::from_vec3(self.lighting.shade(fragment.world, normal, &surface))
    }
}

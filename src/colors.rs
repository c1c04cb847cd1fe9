//! Packed ARGB8888 colour helpers.
//!
//! Colours travel through the pipeline as `u32` in `0xAARRGGBB` layout (the
//! layout of the SDL streaming texture), and as linear `Vec3` in `[0, 1]`
//! while lighting is computed.

use crate::math::Vec3;

pub const WIREFRAME: u32 = 0xFF00FF7F;

/// Packs floating-point RGBA in `[0, 1]` into ARGB8888. Values are clamped.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    let to_byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0 + 0.5) as u32;
    (to_byte(a) << 24) | (to_byte(r) << 16) | (to_byte(g) << 8) | to_byte(b)
}

/// Unpacks the RGB channels of an ARGB8888 colour into `[0, 1]`.
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let channel = |shift: u32| ((color >> shift) & 0xFF) as f32 / 255.0;
    (channel(16), channel(8), channel(0))
}

#[inline]
pub fn to_vec3(color: u32) -> Vec3 {
    let (r, g, b) = unpack_color(color);
    Vec3::new(r, g, b)
}

#[inline]
pub fn from_vec3(color: Vec3) -> u32 {
    pack_color(color.x, color.y, color.z, 1.0)
}

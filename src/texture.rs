use std::path::Path;

use crate::colors;
use crate::error::{Error, Result};
use crate::math::Vec3;

/// A 2D image sampled by the fragment shader.
#[derive(Debug, Clone)]
pub struct Texture {
    data: Vec<u32>, // ARGB8888, row-major, top row first
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from any image file `image` can decode (PNG, JPG, TGA, ...).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| Error::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = img.dimensions();

        let data: Vec<u32> = img
            .pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        log::debug!("Loaded texture {} ({width}x{height})", path.display());
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a texture from raw ARGB pixels.
    ///
    /// Returns `None` if the pixel count does not match the dimensions.
    pub fn from_pixels(width: u32, height: u32, data: Vec<u32>) -> Option<Self> {
        if width == 0 || height == 0 || data.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            data,
            width,
            height,
        })
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// # UV Coordinate Convention
    /// - (0,0) is bottom-left in OBJ convention, but rows are stored top-first,
    ///   so V is flipped
    /// - UVs outside [0,1] wrap (repeat mode)
    #[inline]
    pub fn sample(&self, u: f32, v: f32) -> u32 {
        let u = u.rem_euclid(1.0);
        let v = (1.0 - v).rem_euclid(1.0);

        let x = ((u * self.width as f32) as u32).min(self.width - 1);
        let y = ((v * self.height as f32) as u32).min(self.height - 1);

        self.data[(y * self.width + x) as usize]
    }

    /// Sample as linear RGB in `[0, 1]`.
    #[inline]
    pub fn sample_rgb(&self, u: f32, v: f32) -> Vec3 {
        colors::to_vec3(self.sample(u, v))
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

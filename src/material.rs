//! Surface materials read from MTL files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::light::Surface;
use crate::math::{Vec2, Vec3};
use crate::texture::Texture;

pub const DEFAULT_SHININESS: f32 = 32.0;

#[derive(Debug, Clone)]
pub struct Material {
    pub name: String,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
    pub diffuse_texture: Option<Rc<Texture>>,
    pub specular_texture: Option<Rc<Texture>>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "default".into(),
            diffuse: Vec3::splat(0.8),
            specular: Vec3::splat(0.5),
            shininess: DEFAULT_SHININESS,
            diffuse_texture: None,
            specular_texture: None,
        }
    }
}

impl Material {
    /// Converts an MTL entry, loading its texture maps relative to `base_dir`.
    ///
    /// Textures already in `cache` are shared. A texture that fails to load is
    /// logged and skipped; the flat colour is used in its place.
    pub fn from_mtl(
        mtl: &tobj::Material,
        base_dir: &Path,
        cache: &mut HashMap<PathBuf, Rc<Texture>>,
    ) -> Self {
        let defaults = Material::default();
        let shininess = mtl
            .shininess
            .filter(|&ns| ns > 0.0)
            .unwrap_or(DEFAULT_SHININESS);

        Self {
            name: mtl.name.clone(),
            diffuse: mtl.diffuse.map(Vec3::from).unwrap_or(defaults.diffuse),
            specular: mtl.specular.map(Vec3::from).unwrap_or(defaults.specular),
            shininess,
            diffuse_texture: mtl
                .diffuse_texture
                .as_deref()
                .and_then(|file| load_cached(base_dir, file, cache)),
            specular_texture: mtl
                .specular_texture
                .as_deref()
                .and_then(|file| load_cached(base_dir, file, cache)),
        }
    }

    /// Material response at texture coordinate `uv`.
    #[inline]
    pub fn surface(&self, uv: Vec2) -> Surface {
        Surface {
            diffuse: match &self.diffuse_texture {
                Some(tex) => tex.sample_rgb(uv.x, uv.y),
                None => self.diffuse,
            },
            specular: match &self.specular_texture {
                Some(tex) => tex.sample_rgb(uv.x, uv.y),
                None => self.specular,
            },
            shininess: self.shininess,
        }
    }
}

fn load_cached(
    base_dir: &Path,
    file: &str,
    cache: &mut HashMap<PathBuf, Rc<Texture>>,
) -> Option<Rc<Texture>> {
    // MTL files exported on Windows often use backslashes.
    let path = base_dir.join(file.replace('\\', "/"));
    if let Some(texture) = cache.get(&path) {
        return Some(Rc::clone(texture));
    }
    match Texture::from_file(&path) {
        Ok(texture) => {
            let texture = Rc::new(texture);
            cache.insert(path, Rc::clone(&texture));
            Some(texture)
        }
        Err(e) => {
            log::warn!("{e}; falling back to flat colour");
            None
        }
    }
}

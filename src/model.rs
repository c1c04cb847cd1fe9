//! 3D model representation containing multiple meshes.
//!
//! A [`Model`] is every mesh and material loaded from one OBJ file, placed in
//! the world by a [`Transform`].

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};
use crate::material::Material;
use crate::math::{Mat4, Vec3};
use crate::mesh::Mesh;
use crate::transform::Transform;

pub struct Model {
    name: String,
    meshes: Vec<Mesh>,
    materials: Vec<Material>,
    transform: Transform,
    /// Applied before `transform`; corrects asset scale and orientation.
    local: Mat4,
    /// Replaces the sun's ambient term while this model is drawn.
    ambient_override: Option<Vec3>,
}

impl Model {
    /// Create a new empty model with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meshes: Vec::new(),
            materials: Vec::new(),
            transform: Transform::default(),
            local: Mat4::identity(),
            ambient_override: None,
        }
    }

    /// Load a model from an OBJ file and its MTL library.
    ///
    /// Every object/group in the file becomes a separate mesh. Faces are
    /// triangulated. A missing or broken MTL file only loses the materials.
    pub fn from_obj(name: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (models, materials) =
            tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS).map_err(|source| Error::Mesh {
                path: path.to_path_buf(),
                source,
            })?;

        let materials = materials.unwrap_or_else(|e| {
            log::warn!("No materials for {}: {e}", path.display());
            Vec::new()
        });

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut texture_cache = HashMap::new();
        let materials: Vec<Material> = materials
            .iter()
            .map(|mtl| Material::from_mtl(mtl, base_dir, &mut texture_cache))
            .collect();

        let mut model = Self::new(name);
        model.materials = materials;
        for m in &models {
            let mesh = Mesh::from_tobj(m);
            log::debug!("  mesh '{}': {} triangles", mesh.name(), mesh.triangle_count());
            model.add_mesh(mesh);
        }

        log::info!(
            "Loaded model '{}' from {}: {} meshes, {} triangles, {} materials, {} textures",
            model.name,
            path.display(),
            model.meshes.len(),
            model.triangle_count(),
            model.materials.len(),
            texture_cache.len(),
        );
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ============ Placement ============

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    pub fn set_local_matrix(&mut self, local: Mat4) {
        self.local = local;
    }

    /// Full model-to-world matrix: `transform * local`.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.to_matrix() * self.local
    }

    pub fn ambient_override(&self) -> Option<Vec3> {
        self.ambient_override
    }

    pub fn set_ambient_override(&mut self, ambient: Option<Vec3>) {
        self.ambient_override = ambient;
    }

    // ============ Geometry ============

    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    pub fn add_mesh(&mut self, mesh: Mesh) {
        self.meshes.push(mesh);
    }

    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Axis-aligned bounds of all vertices in model space, or `None` if empty.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.meshes
            .iter()
            .flat_map(|mesh| mesh.vertices().iter().map(|v| v.position))
            .fold(None, |acc, p| match acc {
                None => Some((p, p)),
                Some((min, max)) => Some((min.min(p), max.max(p))),
            })
    }

    // ============ Materials ============

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn add_material(&mut self, material: Material) -> usize {
        self.materials.push(material);
        self.materials.len() - 1
    }

    /// Material for a mesh, if its index is valid.
    pub fn material_for(&self, mesh: &Mesh) -> Option<&Material> {
        mesh.material().and_then(|i| self.materials.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Vertex;

    fn vertex(x: f32, y: f32, z: f32) -> Vertex {
        Vertex {
            position: Vec3::new(x, y, z),
            ..Default::default()
        }
    }

    #[test]
    fn bounds_cover_all_meshes() {
        let mut model = Model::new("m");
        assert!(model.bounds().is_none());

        model.add_mesh(Mesh::new("a", vec![vertex(-1.0, 0.0, 2.0)], vec![], None));
        model.add_mesh(Mesh::new("b", vec![vertex(3.0, -4.0, 0.0)], vec![], None));

        let (min, max) = model.bounds().unwrap();
        assert_eq!(min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(max, Vec3::new(3.0, 0.0, 2.0));
    }

    #[test]
    fn model_matrix_applies_local_first() {
        let mut model = Model::new("car");
        model.set_local_matrix(Mat4::scaling_uniform(0.5));
        model.transform_mut().set_position(Vec3::new(10.0, 0.0, 0.0));

        let p = model.model_matrix().transform_point(Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(p, Vec3::new(11.0, 0.0, 0.0));
    }

    #[test]
    fn invalid_material_index_is_ignored() {
        let mut model = Model::new("m");
        let mesh = Mesh::new("a", vec![], vec![], Some(3));
        assert!(model.material_for(&mesh).is_none());

        let index = model.add_material(Material::default());
        let mesh = Mesh::new("b", vec![], vec![], Some(index));
        assert!(model.material_for(&mesh).is_some());
    }

    #[test]
    fn from_obj_reports_missing_file() {
        let err = Model::from_obj("nothing", "no/such/model.obj").err().unwrap();
        assert!(matches!(err, Error::Mesh { .. }));
    }
}

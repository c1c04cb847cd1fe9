//! Indexed triangle meshes.

use crate::math::{Vec2, Vec3};

/// One mesh vertex with every attribute the shader interpolates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A single-indexed triangle list sharing one material.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    material: Option<usize>,
}

impl Mesh {
    /// Builds a mesh from vertices and triangle indices.
    ///
    /// Trailing indices that do not form a full triangle are dropped.
    pub fn new(
        name: impl Into<String>,
        vertices: Vec<Vertex>,
        mut indices: Vec<u32>,
        material: Option<usize>,
    ) -> Self {
        indices.truncate(indices.len() - indices.len() % 3);
        Self {
            name: name.into(),
            vertices,
            indices,
            material,
        }
    }

    /// Converts a `tobj` mesh loaded with single indexing.
    ///
    /// Normals are generated when the file has none.
    pub fn from_tobj(model: &tobj::Model) -> Self {
        let mesh = &model.mesh;
        let count = mesh.positions.len() / 3;
        let has_normals = mesh.normals.len() == count * 3;
        let has_uvs = mesh.texcoords.len() == count * 2;

        let vertices = (0..count)
            .map(|i| Vertex {
                position: Vec3::new(
                    mesh.positions[i * 3],
                    mesh.positions[i * 3 + 1],
                    mesh.positions[i * 3 + 2],
                ),
                normal: if has_normals {
                    Vec3::new(
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    )
                } else {
                    Vec3::ZERO
                },
                uv: if has_uvs {
                    Vec2::new(mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1])
                } else {
                    Vec2::ZERO
                },
            })
            .collect();

        let mut result = Self::new(
            model.name.clone(),
            vertices,
            mesh.indices.clone(),
            mesh.material_id,
        );
        if !has_normals {
            result.generate_normals();
        }
        result
    }

    /// Replaces vertex normals with area-weighted averages of face normals.
    pub fn generate_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.vertices.len()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            if a >= normals.len() || b >= normals.len() || c >= normals.len() {
                continue;
            }
            let p0 = self.vertices[a].position;
            // Unnormalized: its length is twice the triangle area.
            let face_normal =
                (self.vertices[b].position - p0).cross(self.vertices[c].position - p0);
            normals[a] += face_normal;
            normals[b] += face_normal;
            normals[c] += face_normal;
        }

        for (vertex, normal) in self.vertices.iter_mut().zip(normals) {
            vertex.normal = normal.normalize();
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Index into the owning model's material list.
    pub fn material(&self) -> Option<usize> {
        self.material
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles, skipping any that reference missing vertices.
    pub fn triangles(&self) -> impl Iterator<Item = [&Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            Some([
                self.vertices.get(tri[0] as usize)?,
                self.vertices.get(tri[1] as usize)?,
                self.vertices.get(tri[2] as usize)?,
            ])
        })
    }
}

//! Clip-space clipping against the homogeneous clip cube.
//!
//! Triangles are clipped after projection and before the perspective divide.
//! The clip volume is the OpenGL-style cube:
//!
//! ```text
//! -w <= x <= w
//! -w <= y <= w
//! -w <= z <= w
//! ```
//!
//! Clipping against the near plane keeps w positive for every vertex that
//! reaches the rasterizer.

use crate::math::{Vec2, Vec3, Vec4};

/// A vertex in homogeneous clip space carrying everything the fragment
/// shader interpolates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipVertex {
    /// Position in clip space, before the perspective divide.
    pub position: Vec4,
    /// Position in world space, used for lighting and fog.
    pub world: Vec3,
    /// World-space normal (not necessarily unit length).
    pub normal: Vec3,
    pub uv: Vec2,
}

impl ClipVertex {
    /// Linearly interpolate all attributes between two vertices.
    ///
    /// Interpolation in clip space is linear in world space, so no
    /// perspective correction is needed here.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            world: self.world.lerp(other.world, t),
            normal: self.normal.lerp(other.normal, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

/// The 6 planes of the canonical clip-space cube.
///
/// The signed distance is positive inside the clip volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    /// x >= -w
    Left,
    /// x <= w
    Right,
    /// y >= -w
    Bottom,
    /// y <= w
    Top,
    /// z >= -w
    Near,
    /// z <= w
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Near,
        ClipPlane::Far,
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
    ];

    #[inline]
    pub fn signed_distance(&self, p: Vec4) -> f32 {
        match self {
            Self::Left => p.w + p.x,
            Self::Right => p.w - p.x,
            Self::Bottom => p.w + p.y,
            Self::Top => p.w - p.y,
            Self::Near => p.w + p.z,
            Self::Far => p.w - p.z,
        }
    }
}

/// A convex polygon in clip space.
///
/// A triangle grows by at most one vertex per plane, so clipping never
/// produces more than 9 vertices.
#[derive(Clone, Debug, Default)]
pub struct ClipPolygon {
    vertices: Vec<ClipVertex>,
}

impl ClipPolygon {
    pub fn from_triangle(v0: ClipVertex, v1: ClipVertex, v2: ClipVertex) -> Self {
        let mut vertices = Vec::with_capacity(9);
        vertices.extend([v0, v1, v2]);
        Self { vertices }
    }

    pub fn vertices(&self) -> &[ClipVertex] {
        &self.vertices
    }

    /// Returns true if the polygon has been completely clipped away.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Sutherland-Hodgman against a single plane.
    pub fn clip_against_plane(&self, plane: ClipPlane) -> Self {
        if self.is_empty() {
            return Self::default();
        }

        let mut output = Vec::with_capacity(self.vertices.len() + 1);
        for (i, current) in self.vertices.iter().enumerate() {
            let next = &self.vertices[(i + 1) % self.vertices.len()];
            let d1 = plane.signed_distance(current.position);
            let d2 = plane.signed_distance(next.position);

            let current_inside = d1 >= 0.0;
            let next_inside = d2 >= 0.0;

            if current_inside {
                output.push(*current);
            }
            if current_inside != next_inside {
                output.push(current.lerp(next, d1 / (d1 - d2)));
            }
        }

        Self { vertices: output }
    }

    /// Fan triangulation; the polygon is convex after clipping.
    pub fn triangulate(&self) -> impl Iterator<Item = [&ClipVertex; 3]> + '_ {
        (1..self.vertices.len().saturating_sub(1))
            .map(move |i| [&self.vertices[0], &self.vertices[i], &self.vertices[i + 1]])
    }
}

/// Clips a triangle against all six planes of the clip cube.
///
/// Triangles entirely inside are returned untouched; triangles entirely
/// outside any one plane are rejected without clipping.
pub fn clip_triangle(v0: ClipVertex, v1: ClipVertex, v2: ClipVertex) -> ClipPolygon {
    let mut needs_clip = false;
    for plane in ClipPlane::ALL {
        let d = [
            plane.signed_distance(v0.position),
            plane.signed_distance(v1.position),
            plane.signed_distance(v2.position),
        ];
        if d.iter().all(|&d| d < 0.0) {
            return ClipPolygon::default();
        }
        needs_clip |= d.iter().any(|&d| d < 0.0);
    }

    let mut polygon = ClipPolygon::from_triangle(v0, v1, v2);
    if needs_clip {
        for plane in ClipPlane::ALL {
            if polygon.is_empty() {
                break;
            }
            polygon = polygon.clip_against_plane(plane);
        }
    }
    polygon
}

//! Triangle rasterization using edge functions.
//!
//! For each pixel centre in the triangle's bounding box, three edge functions
//! give the barycentric weights. Attributes are interpolated perspective
//! correctly: each is weighted by `1/w`, summed, and divided by the
//! interpolated `1/w`.

use super::clipper::ClipVertex;
use super::framebuffer::FrameBuffer;
use crate::math::{Vec2, Vec3};

/// A vertex after the perspective divide and viewport mapping.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterVertex {
    /// Screen x in pixels, left to right.
    pub x: f32,
    /// Screen y in pixels, top to bottom.
    pub y: f32,
    /// Reciprocal of clip-space w; also the depth value.
    pub inv_w: f32,
    pub world: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl RasterVertex {
    /// Perspective divide and viewport transform. `v.position.w` must be positive.
    pub fn from_clip(v: &ClipVertex, width: u32, height: u32) -> Self {
        let inv_w = 1.0 / v.position.w;
        let ndc_x = v.position.x * inv_w;
        let ndc_y = v.position.y * inv_w;
        Self {
            x: (ndc_x + 1.0) * 0.5 * width as f32,
            y: (1.0 - ndc_y) * 0.5 * height as f32,
            inv_w,
            world: v.world,
            normal: v.normal,
            uv: v.uv,
        }
    }
}

/// One covered pixel with its interpolated attributes.
#[derive(Clone, Copy, Debug)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    pub depth: f32,
    pub world: Vec3,
    /// Interpolated normal; not renormalized.
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Computes the final colour of a fragment.
pub trait FragmentShader {
    fn shade(&self, fragment: &Fragment) -> u32;
}

impl<F> FragmentShader for F
where
    F: Fn(&Fragment) -> u32,
{
    fn shade(&self, fragment: &Fragment) -> u32 {
        self(fragment)
    }
}

/// Edge function for point p relative to edge (a -> b).
///
/// In screen space (y down) this is positive when p lies counter-clockwise
/// of the edge as seen in NDC (y up).
#[inline]
fn edge_function(ax: f32, ay: f32, bx: f32, by: f32, px: f32, py: f32) -> f32 {
    (px - ax) * (by - ay) - (py - ay) * (bx - ax)
}

/// Twice the signed screen-space area of a triangle.
///
/// Positive for triangles wound counter-clockwise in NDC, which are the
/// front faces.
#[inline]
pub fn signed_area(tri: &[RasterVertex; 3]) -> f32 {
    let [a, b, c] = tri;
    edge_function(a.x, a.y, b.x, b.y, c.x, c.y)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Fills a triangle of either winding, returning the number of
    /// fragments that passed the depth test.
    pub fn fill_triangle<S: FragmentShader + ?Sized>(
        &self,
        tri: &[RasterVertex; 3],
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        let [v0, v1, v2] = tri;

        let area = signed_area(tri);
        if area.abs() < f32::EPSILON {
            return 0;
        }
        let inv_area = 1.0 / area;

        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(buffer.width() as i32 - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(buffer.height() as i32 - 1);

        let mut written = 0;
        for y in min_y..=max_y {
            let py = y as f32 + 0.5;
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;

                // Normalized barycentrics; all non-negative inside for either winding.
                let l0 = edge_function(v1.x, v1.y, v2.x, v2.y, px, py) * inv_area;
                let l1 = edge_function(v2.x, v2.y, v0.x, v0.y, px, py) * inv_area;
                let l2 = edge_function(v0.x, v0.y, v1.x, v1.y, px, py) * inv_area;
                if l0 < 0.0 || l1 < 0.0 || l2 < 0.0 {
                    continue;
                }

                let depth = l0 * v0.inv_w + l1 * v1.inv_w + l2 * v2.inv_w;
                if !buffer.depth_test(x, y, depth) {
                    continue;
                }

                let p0 = l0 * v0.inv_w / depth;
                let p1 = l1 * v1.inv_w / depth;
                let p2 = l2 * v2.inv_w / depth;

                let fragment = Fragment {
                    x,
                    y,
                    depth,
                    world: v0.world * p0 + v1.world * p1 + v2.world * p2,
                    normal: v0.normal * p0 + v1.normal * p1 + v2.normal * p2,
                    uv: v0.uv * p0 + v1.uv * p1 + v2.uv * p2,
                };
                let color = shader.shade(&fragment);
                buffer.set_pixel_with_depth(x, y, depth, color);
                written += 1;
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn vertex(x: f32, y: f32, inv_w: f32, u: f32) -> RasterVertex {
        RasterVertex {
            x,
            y,
            inv_w,
            world: Vec3::ZERO,
            normal: Vec3::Y,
            uv: Vec2::new(u, 0.0),
        }
    }

    fn solid(color: u32) -> impl Fn(&Fragment) -> u32 {
        move |_| color
    }

    #[test]
    fn covers_pixels_inside_for_both_windings() {
        let mut color = vec![0u32; 16];
        let mut depth = vec![0.0f32; 16];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 4, 4);

        let ccw = [vertex(0.0, 0.0, 1.0, 0.0), vertex(0.0, 4.0, 1.0, 0.0), vertex(4.0, 0.0, 1.0, 0.0)];
        let far = |v: RasterVertex| RasterVertex { inv_w: 0.5, ..v };
        let cw = [far(ccw[0]), far(ccw[2]), far(ccw[1])];
        let r = EdgeFunctionRasterizer::new();

        let a = r.fill_triangle(&ccw, &mut fb, &solid(1));
        assert!(a > 0);
        assert_eq!(fb.get_pixel(0, 0), Some(1));
        assert_eq!(fb.get_pixel(3, 3), Some(0));

        // Behind the first triangle everywhere.
        let b = r.fill_triangle(&cw, &mut fb, &solid(2));
        assert_eq!(b, 0);
    }

    #[test]
    fn degenerate_triangle_draws_nothing() {
        let mut color = vec![0u32; 16];
        let mut depth = vec![0.0f32; 16];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 4, 4);
        let line = [vertex(0.0, 0.0, 1.0, 0.0), vertex(2.0, 2.0, 1.0, 0.0), vertex(4.0, 4.0, 1.0, 0.0)];
        assert_eq!(EdgeFunctionRasterizer::new().fill_triangle(&line, &mut fb, &solid(1)), 0);
    }

    #[test]
    fn front_faces_have_positive_area() {
        // Counter-clockwise in NDC becomes clockwise on a y-down screen.
        let clip = |x: f32, y: f32| ClipVertex {
            position: crate::math::Vec4::new(x, y, 0.0, 1.0),
            world: Vec3::ZERO,
            normal: Vec3::Z,
            uv: Vec2::ZERO,
        };
        let tri = [
            RasterVertex::from_clip(&clip(0.0, 0.0), 100, 100),
            RasterVertex::from_clip(&clip(0.5, 0.0), 100, 100),
            RasterVertex::from_clip(&clip(0.0, 0.5), 100, 100),
        ];
        assert!(signed_area(&tri) > 0.0);
        assert!(signed_area(&[tri[0], tri[2], tri[1]]) < 0.0);
    }

    #[test]
    fn interpolation_is_perspective_correct() {
        // A span whose right end is 3x further away than its left end.
        let mut color = vec![0u32; 64];
        let mut depth = vec![0.0f32; 64];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 64, 1);

        let near = 1.0;
        let far = 1.0 / 3.0;
        let tri = [
            vertex(0.0, -10.0, near, 0.0),
            vertex(64.0, 0.5, far, 1.0),
            vertex(0.0, 10.0, near, 0.0),
        ];

        let seen = std::cell::RefCell::new(Vec::new());
        let record = |f: &Fragment| {
            seen.borrow_mut().push((f.x, f.uv.x, f.depth));
            0
        };
        EdgeFunctionRasterizer::new().fill_triangle(&tri, &mut fb, &record);

        let seen = seen.into_inner();
        let &(x, u, d) = seen
            .iter()
            .find(|(x, _, _)| *x == 31)
            .expect("pixel 31 is covered");

        // Screen-space halfway in x, but depth and u follow 1/w.
        let s = (x as f32 + 0.5) / 64.0;
        let expected_depth = near + (far - near) * s;
        assert_relative_eq!(d, expected_depth, epsilon = 1e-4);
        assert_relative_eq!(u, s * far / expected_depth, epsilon = 1e-4);
        assert!(u < s);
    }
}

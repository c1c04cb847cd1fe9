//! Owns the colour and depth buffers and drives models through the pipeline.

use super::clipper::{clip_triangle, ClipVertex};
use super::framebuffer::FrameBuffer;
use super::rasterizer::{signed_area, EdgeFunctionRasterizer, RasterVertex};
use super::shader::PhongShader;
use super::RenderMode;
use crate::colors;
use crate::light::Lighting;
use crate::material::Material;
use crate::math::{Mat4, Vec4};
use crate::model::Model;

/// Wireframes render slightly in front of the filled triangles they outline.
const WIREFRAME_DEPTH_BIAS: f32 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub mode: RenderMode,
    pub backface_culling: bool,
    pub wireframe_color: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            mode: RenderMode::Filled,
            backface_culling: false,
            wireframe_color: colors::WIREFRAME,
        }
    }
}

/// Per-draw triangle counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawStats {
    /// Triangles (after clipping) sent to the rasterizer.
    pub drawn: usize,
    /// Triangles discarded as back faces.
    pub culled: usize,
    /// Source triangles entirely outside the view volume.
    pub rejected: usize,
}

impl std::ops::AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.drawn += rhs.drawn;
        self.culled += rhs.culled;
        self.rejected += rhs.rejected;
    }
}

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
    rasterizer: EdgeFunctionRasterizer,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![0; size],
            depth_buffer: vec![0.0; size], // 0.0 = infinitely far (1/w where w -> infinity)
            width,
            height,
            rasterizer: EdgeFunctionRasterizer::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![0; size];
        self.depth_buffer = vec![0.0; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width over height, or 1 for an empty buffer.
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Clears colour to `color` and depth to infinitely far.
    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(0.0);
    }

    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        (x < self.width && y < self.height)
            .then(|| self.color_buffer[(y * self.width + x) as usize])
    }

    /// The colour buffer as bytes, laid out for an ARGB8888 streaming texture.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }

    /// Draws every mesh of `model`.
    ///
    /// `view_projection` maps world space to clip space. When the model has an
    /// ambient override it replaces the sun's ambient term for this draw only.
    pub fn draw_model(
        &mut self,
        model: &Model,
        view_projection: &Mat4,
        lighting: &Lighting,
        options: &RenderOptions,
    ) -> DrawStats {
        let model_matrix = model.model_matrix();
        let normal_matrix = model_matrix.normal_matrix();
        let mvp = *view_projection * model_matrix;

        let mut lighting = *lighting;
        if let Some(ambient) = model.ambient_override() {
            lighting.sun.ambient = ambient;
        }

        let fallback = Material::default();
        let mut stats = DrawStats::default();

        for mesh in model.meshes() {
            let material = model.material_for(mesh).unwrap_or(&fallback);
            let shader = PhongShader::new(material, &lighting);

            for tri in mesh.triangles() {
                let [v0, v1, v2] = tri.map(|v| ClipVertex {
                    position: mvp * Vec4::from_vec3(v.position, 1.0),
                    world: model_matrix.transform_point(v.position),
                    normal: normal_matrix.transform_direction(v.normal),
                    uv: v.uv,
                });

                let polygon = clip_triangle(v0, v1, v2);
                if polygon.is_empty() {
                    stats.rejected += 1;
                    continue;
                }

                for clipped in polygon.triangulate() {
                    let screen =
                        clipped.map(|v| RasterVertex::from_clip(v, self.width, self.height));

                    if options.backface_culling && signed_area(&screen) <= 0.0 {
                        stats.culled += 1;
                        continue;
                    }

                    if options.mode.fills() {
                        let mut buffer = FrameBuffer::new(
                            &mut self.color_buffer,
                            &mut self.depth_buffer,
                            self.width,
                            self.height,
                        );
                        self.rasterizer.fill_triangle(&screen, &mut buffer, &shader);
                    }
                    if options.mode.outlines() {
                        self.draw_triangle_wireframe(&screen, options.wireframe_color);
                    }
                    stats.drawn += 1;
                }
            }
        }

        stats
    }

    pub fn draw_triangle_wireframe(&mut self, tri: &[RasterVertex; 3], color: u32) {
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            self.draw_line(&tri[a], &tri[b], color);
        }
    }

    /// Draws a depth-tested line between two screen vertices.
    pub fn draw_line(&mut self, a: &RasterVertex, b: &RasterVertex, color: u32) {
        self.draw_line_bresenham(
            a.x as i32,
            a.y as i32,
            a.inv_w + WIREFRAME_DEPTH_BIAS,
            b.x as i32,
            b.y as i32,
            b.inv_w + WIREFRAME_DEPTH_BIAS,
            color,
        );
    }

    /// Bresenham's line algorithm with 1/w linearly interpolated along the line.
    ///
    /// For each step along the major axis, an integer error term decides
    /// whether to also step along the minor axis.
    #[allow(clippy::too_many_arguments)]
    fn draw_line_bresenham(
        &mut self,
        x0: i32,
        y0: i32,
        depth0: f32,
        x1: i32,
        y1: i32,
        depth1: f32,
        color: u32,
    ) {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let steps = dx.max(dy);

        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };

        let mut buffer = self.as_framebuffer();
        let mut err = dx - dy;
        let (mut x, mut y) = (x0, y0);

        for step in 0..=steps {
            let t = if steps == 0 {
                0.0
            } else {
                step as f32 / steps as f32
            };
            buffer.set_pixel_with_depth(x, y, depth0 + t * (depth1 - depth0), color);

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += step_x;
            }
            if e2 < dx {
                err += dx;
                y += step_y;
            }
        }
    }
}

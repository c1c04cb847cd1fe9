use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphics3d::light::{DirectionalLight, Lighting};
use graphics3d::material::Material;
use graphics3d::math::{Mat4, Vec2, Vec3};
use graphics3d::mesh::{Mesh, Vertex};
use graphics3d::model::Model;
use graphics3d::render::{
    EdgeFunctionRasterizer, Fragment, FrameBuffer, PhongShader, RasterVertex, RenderOptions,
    Renderer,
};

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn vertex(x: f32, y: f32) -> RasterVertex {
    RasterVertex {
        x,
        y,
        inv_w: 1.0,
        world: Vec3::new(x / 100.0, 0.0, y / 100.0),
        normal: Vec3::Y,
        uv: Vec2::new(x / BUFFER_WIDTH as f32, y / BUFFER_HEIGHT as f32),
    }
}

fn triangles() -> [(&'static str, [RasterVertex; 3]); 3] {
    [
        (
            "small",
            [vertex(100.0, 100.0), vertex(120.0, 100.0), vertex(110.0, 120.0)],
        ),
        (
            "medium",
            [vertex(100.0, 100.0), vertex(300.0, 100.0), vertex(200.0, 300.0)],
        ),
        (
            "large",
            [vertex(50.0, 50.0), vertex(750.0, 100.0), vertex(400.0, 550.0)],
        ),
    ]
}

fn lighting() -> Lighting {
    Lighting {
        sun: DirectionalLight::default(),
        spot: None,
        fog: None,
        eye: Vec3::new(0.0, 5.0, 0.0),
    }
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let rasterizer = EdgeFunctionRasterizer::new();
    let material = Material::default();
    let lighting = lighting();
    let phong = PhongShader::new(&material, &lighting);
    let flat = |_: &Fragment| 0xFFFF0000u32;

    for (name, triangle) in triangles() {
        group.bench_with_input(BenchmarkId::new("flat", name), &triangle, |b, tri| {
            let mut color = vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
            let mut depth = vec![0.0f32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
            b.iter(|| {
                depth.fill(0.0);
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                rasterizer.fill_triangle(black_box(tri), &mut fb, &flat)
            });
        });

        group.bench_with_input(BenchmarkId::new("phong", name), &triangle, |b, tri| {
            let mut color = vec![0u32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
            let mut depth = vec![0.0f32; (BUFFER_WIDTH * BUFFER_HEIGHT) as usize];
            b.iter(|| {
                depth.fill(0.0);
                let mut fb = FrameBuffer::new(&mut color, &mut depth, BUFFER_WIDTH, BUFFER_HEIGHT);
                rasterizer.fill_triangle(black_box(tri), &mut fb, &phong)
            });
        });
    }

    group.finish();
}

/// A flat `n` x `n` grid of quads in the XZ plane, centred on the origin.
fn grid(n: u32) -> Model {
    let mut vertices = Vec::new();
    for z in 0..=n {
        for x in 0..=n {
            vertices.push(Vertex {
                position: Vec3::new(x as f32 - n as f32 / 2.0, 0.0, z as f32 - n as f32 / 2.0),
                normal: Vec3::Y,
                uv: Vec2::new(x as f32 / n as f32, z as f32 / n as f32),
            });
        }
    }
    let mut indices = Vec::new();
    for z in 0..n {
        for x in 0..n {
            let i = z * (n + 1) + x;
            indices.extend([i, i + n + 1, i + 1, i + 1, i + n + 1, i + n + 2]);
        }
    }
    let mut model = Model::new("grid");
    model.add_mesh(Mesh::new("grid", vertices, indices, None));
    model
}

fn benchmark_model(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_model");
    let projection = Mat4::perspective_rh(45f32.to_radians(), 800.0 / 600.0, 0.1, 100.0);
    let view = Mat4::look_at_rh(Vec3::new(0.0, 8.0, 12.0), Vec3::ZERO, Vec3::Y);
    let view_projection = projection * view;
    let lighting = lighting();
    let options = RenderOptions::default();

    for n in [8, 32, 64] {
        let model = grid(n);
        group.bench_with_input(BenchmarkId::new("grid", n), &model, |b, model| {
            let mut renderer = Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                renderer.clear(0xFF000000);
                renderer.draw_model(black_box(model), &view_projection, &lighting, &options)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_model);
criterion_main!(benches);

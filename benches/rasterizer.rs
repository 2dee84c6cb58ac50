use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use image::{Rgb, RgbImage};
use rastery::math::{Vec2, Vec3, Vec4};
use rastery::mesh::{Corner, Face, Mesh};
use rastery::render::{DepthBuffer, EdgeFunctionRasterizer, FrameBuffer, Renderer, Triangle};
use rastery::Texture;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn create_buffers() -> (RgbImage, DepthBuffer) {
    (
        RgbImage::new(BUFFER_WIDTH, BUFFER_HEIGHT),
        DepthBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT),
    )
}

fn screen_triangle(points: [(f32, f32); 3]) -> Triangle {
    Triangle::new(
        points.map(|(x, y)| Vec4::new(x, y, 0.0, 1.0)),
        [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.5, 1.0)],
        [1.0, 0.5, 0.25],
    )
}

fn small_triangle() -> Triangle {
    screen_triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])
}

fn medium_triangle() -> Triangle {
    screen_triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])
}

fn large_triangle() -> Triangle {
    screen_triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])
}

fn checker_texture() -> Texture {
    Texture::new(RgbImage::from_fn(256, 256, |x, y| {
        if (x / 32 + y / 32) % 2 == 0 {
            Rgb([230, 230, 230])
        } else {
            Rgb([40, 40, 160])
        }
    }))
}

fn benchmark_fill_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_triangle");

    let rasterizer = EdgeFunctionRasterizer::default();
    let texture = checker_texture();

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        // Fresh buffers per batch: a cleared z-buffer lets every pixel through.
        group.bench_with_input(BenchmarkId::new("flat", name), &triangle, |b, tri| {
            b.iter_batched_ref(
                create_buffers,
                |(color, depth)| {
                    let mut fb = FrameBuffer::new(color, depth);
                    rasterizer.fill_triangle(black_box(tri), &mut fb, None)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("textured", name), &triangle, |b, tri| {
            b.iter_batched_ref(
                create_buffers,
                |(color, depth)| {
                    let mut fb = FrameBuffer::new(color, depth);
                    rasterizer.fill_triangle(black_box(tri), &mut fb, Some(&texture))
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

/// A 20x20 grid of small triangles covering NDC.
fn grid_mesh() -> Mesh {
    let mut mesh = Mesh::new();
    let n = mesh.push_normal(Vec3::new(0.0, 0.0, -1.0));
    for row in 0..20 {
        for col in 0..20 {
            let x = -1.0 + col as f32 * 0.1;
            let y = -1.0 + row as f32 * 0.1;
            let corners = [(x, y), (x + 0.09, y), (x + 0.045, y + 0.08)].map(|(px, py)| {
                Corner::new(mesh.push_position(Vec3::new(px, py, 0.0)), Corner::MISSING, n)
            });
            mesh.push_face(Face::new(corners[0], corners[1], corners[2]));
        }
    }
    mesh
}

fn benchmark_draw_mesh(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_mesh");
    let mesh = grid_mesh();

    group.bench_function("grid_400_triangles", |b| {
        b.iter_batched_ref(
            || Renderer::new(BUFFER_WIDTH, BUFFER_HEIGHT),
            |renderer| renderer.draw(black_box(&mesh)),
            BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, benchmark_fill_triangle, benchmark_draw_mesh);
criterion_main!(benches);

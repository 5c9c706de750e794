use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use softpipe::math::vec2::Vec2;
use softpipe::math::vec4::Vec4;
use softpipe::render::{fill_triangle_solid, fill_triangle_textured, FrameBuffer, Triangle};
use softpipe::Texture;

const BUFFER_WIDTH: u32 = 800;
const BUFFER_HEIGHT: u32 = 600;

fn triangle(points: [(f32, f32); 3]) -> Triangle {
    Triangle {
        points: points.map(|(x, y)| Vec4::new(x, y, 0.5, 2.0)),
        tex_coords: [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.5, 1.0),
        ],
        color: 0xFFFF0000,
        intensity: 1.0,
    }
}

fn small_triangle() -> Triangle {
    triangle([(100.0, 100.0), (120.0, 100.0), (110.0, 120.0)])
}

fn medium_triangle() -> Triangle {
    triangle([(100.0, 100.0), (300.0, 100.0), (200.0, 300.0)])
}

fn large_triangle() -> Triangle {
    triangle([(50.0, 50.0), (750.0, 100.0), (400.0, 550.0)])
}

fn checkerboard() -> Texture {
    let pixels = (0..64u32 * 64)
        .map(|i| {
            if ((i % 64) / 8 + (i / 64) / 8) % 2 == 0 {
                0xFFFFFFFF
            } else {
                0xFF000000
            }
        })
        .collect();
    Texture::from_pixels(64, 64, pixels)
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");
    let texture = checkerboard();

    for (name, tri) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("solid", name), &tri, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear_depth();
                fill_triangle_solid(black_box(tri), &mut fb);
            });
        });

        group.bench_with_input(BenchmarkId::new("textured", name), &tri, |b, tri| {
            let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
            b.iter(|| {
                fb.clear_depth();
                fill_triangle_textured(black_box(tri), &mut fb, &texture);
            });
        });
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    // A grid of small triangles covering most of the buffer
    let triangles: Vec<Triangle> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = col as f32 * 40.0;
                let y = row as f32 * 30.0;
                triangle([(x, y), (x + 35.0, y), (x + 17.5, y + 25.0)])
            })
        })
        .collect();

    group.bench_function("solid_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear_depth();
            for tri in &triangles {
                fill_triangle_solid(black_box(tri), &mut fb);
            }
        });
    });

    let texture = checkerboard();
    group.bench_function("textured_400_triangles", |b| {
        let mut fb = FrameBuffer::new(BUFFER_WIDTH, BUFFER_HEIGHT);
        b.iter(|| {
            fb.clear_depth();
            for tri in &triangles {
                fill_triangle_textured(black_box(tri), &mut fb, &texture);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles);
criterion_main!(benches);

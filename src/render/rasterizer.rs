//! Scanline triangle rasterization.
//!
//! Triangles are decomposed into a flat-bottom and a flat-top half
//! around the middle vertex's scanline. Each scanline's span is derived
//! from the inverse slopes of its bounding edges; every pixel in a span
//! gets barycentric weights against the screen-space triangle, a
//! perspective-correct depth from the interpolated reciprocal-w, and a
//! depth-tested color write.
//!
//! Attribute interpolation is perspective-correct: each vertex attribute
//! is weighted by that vertex's 1/w, summed, then divided back by the
//! interpolated 1/w. Plain screen-space interpolation would slide
//! texels toward the far end of a foreshortened triangle.

use super::framebuffer::FrameBuffer;
use super::Triangle;
use crate::colors;
use crate::math::{vec2::Vec2, vec3::Vec3, vec4::Vec4};
use crate::texture::Texture;

/// A triangle prepared for scanning: vertices sorted by ascending
/// screen Y, x/y snapped to integer pixel coordinates, and each w
/// replaced by its reciprocal so the per-pixel work is multiply-only.
struct ScreenTriangle {
    x: [i32; 3],
    y: [i32; 3],
    points: [Vec4; 3],
    uvs: [Vec2; 3],
}

impl ScreenTriangle {
    fn prepare(mut points: [Vec4; 3], mut uvs: [Vec2; 3], flip_v: bool) -> Self {
        if flip_v {
            // Texture rows grow downward while V grows upward
            for uv in &mut uvs {
                uv.y = 1.0 - uv.y;
            }
        }

        let mut x = points.map(|p| p.x as i32);
        let mut y = points.map(|p| p.y as i32);

        let mut swap = |a: usize, b: usize, x: &mut [i32; 3], y: &mut [i32; 3]| {
            x.swap(a, b);
            y.swap(a, b);
            points.swap(a, b);
            uvs.swap(a, b);
        };

        // Three compares sort three vertices
        if y[0] > y[1] {
            swap(0, 1, &mut x, &mut y);
        }
        if y[1] > y[2] {
            swap(1, 2, &mut x, &mut y);
        }
        if y[0] > y[1] {
            swap(0, 1, &mut x, &mut y);
        }

        for (i, p) in points.iter_mut().enumerate() {
            p.x = x[i] as f32;
            p.y = y[i] as f32;
            p.w = 1.0 / p.w;
        }

        Self { x, y, points, uvs }
    }

    fn vertex_xy(&self, i: usize) -> Vec2 {
        Vec2::new(self.points[i].x, self.points[i].y)
    }

    /// Interpolated 1/w at the given barycentric weights.
    fn reciprocal_w(&self, weights: Vec3) -> f32 {
        self.points[0].w * weights.x
            + self.points[1].w * weights.y
            + self.points[2].w * weights.z
    }

    /// Perspective-correct UV at the given barycentric weights.
    fn uv(&self, weights: Vec3, reciprocal_w: f32) -> (f32, f32) {
        let u = self.uvs[0].x * self.points[0].w * weights.x
            + self.uvs[1].x * self.points[1].w * weights.y
            + self.uvs[2].x * self.points[2].w * weights.z;
        let v = self.uvs[0].y * self.points[0].w * weights.x
            + self.uvs[1].y * self.points[1].w * weights.y
            + self.uvs[2].y * self.points[2].w * weights.z;

        (u / reciprocal_w, v / reciprocal_w)
    }
}

/// Barycentric weights of point `p` in triangle `abc`.
///
/// Alpha and beta come from signed sub-areas against the full triangle
/// area; gamma is `1 - alpha - beta` rather than a third area ratio, so
/// the three always partition unity even under rounding.
fn barycentric_weights(a: Vec2, b: Vec2, c: Vec2, p: Vec2) -> Vec3 {
    let ac = c - a;
    let ab = b - a;
    let ap = p - a;
    let pc = c - p;
    let pb = b - p;

    let inv_area = 1.0 / (ac.x * ab.y - ac.y * ab.x);

    let alpha = (pc.x * pb.y - pc.y * pb.x) * inv_area;
    let beta = (ac.x * ap.y - ac.y * ap.x) * inv_area;
    let gamma = 1.0 - alpha - beta;

    Vec3::new(alpha, beta, gamma)
}

/// Walk every covered pixel of the triangle: flat-bottom half from the
/// top vertex down to the middle scanline, flat-top half below it.
/// Spans are half-open `[x_start, x_end)`; degenerate halves contribute
/// no scanlines.
fn scan_triangle(tri: &ScreenTriangle, fb: &mut FrameBuffer, mut plot: impl FnMut(&mut FrameBuffer, i32, i32)) {
    let [x0, x1, x2] = tri.x;
    let [y0, y1, y2] = tri.y;

    let mut upper_slope = 0.0;
    let mut long_slope = 0.0;
    if y1 != y0 {
        upper_slope = (x1 - x0) as f32 / (y1 - y0).abs() as f32;
    }
    if y2 != y0 {
        long_slope = (x2 - x0) as f32 / (y2 - y0).abs() as f32;
    }

    // Upper half: bounded by edges v0->v1 and v0->v2
    if y1 != y0 {
        for y in y0..=y1 {
            let mut x_start = (x1 as f32 + (y - y1) as f32 * upper_slope) as i32;
            let mut x_end = (x0 as f32 + (y - y0) as f32 * long_slope) as i32;
            if x_end < x_start {
                std::mem::swap(&mut x_start, &mut x_end);
            }
            for x in x_start..x_end {
                plot(fb, x, y);
            }
        }
    }

    // Lower half: bounded by edges v1->v2 and v0->v2
    if y2 != y1 {
        let lower_slope = (x2 - x1) as f32 / (y2 - y1).abs() as f32;
        for y in y1..=y2 {
            let mut x_start = (x1 as f32 + (y - y1) as f32 * lower_slope) as i32;
            let mut x_end = (x0 as f32 + (y - y0) as f32 * long_slope) as i32;
            if x_end < x_start {
                std::mem::swap(&mut x_start, &mut x_end);
            }
            for x in x_start..x_end {
                plot(fb, x, y);
            }
        }
    }
}

/// Fill a triangle with its intensity-scaled base color.
pub fn fill_triangle_solid(triangle: &Triangle, fb: &mut FrameBuffer) {
    let tri = ScreenTriangle::prepare(triangle.points, triangle.tex_coords, false);
    let color = colors::apply_intensity(triangle.color, triangle.intensity);

    scan_triangle(&tri, fb, |fb, x, y| {
        let weights =
            barycentric_weights(tri.vertex_xy(0), tri.vertex_xy(1), tri.vertex_xy(2), Vec2::new(x as f32, y as f32));
        let depth = 1.0 - tri.reciprocal_w(weights);
        if fb.test_and_set_depth(x, y, depth) {
            fb.set_pixel(x, y, color);
        }
    });
}

/// Fill a triangle by sampling its texture with perspective-correct
/// UVs, scaled by the face light intensity.
pub fn fill_triangle_textured(triangle: &Triangle, fb: &mut FrameBuffer, texture: &Texture) {
    let tri = ScreenTriangle::prepare(triangle.points, triangle.tex_coords, true);
    let intensity = triangle.intensity;

    scan_triangle(&tri, fb, |fb, x, y| {
        let weights =
            barycentric_weights(tri.vertex_xy(0), tri.vertex_xy(1), tri.vertex_xy(2), Vec2::new(x as f32, y as f32));
        let reciprocal_w = tri.reciprocal_w(weights);
        let depth = 1.0 - reciprocal_w;

        // Test depth before the UV math so occluded pixels cost nothing
        if fb.test_and_set_depth(x, y, depth) {
            let (u, v) = tri.uv(weights, reciprocal_w);
            let texel = texture.sample(u, v);
            fb.set_pixel(x, y, colors::apply_intensity(texel, intensity));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle(points: [Vec4; 3], color: u32) -> Triangle {
        Triangle {
            points,
            tex_coords: [Vec2::ZERO; 3],
            color,
            intensity: 1.0,
        }
    }

    #[test]
    fn barycentric_weights_partition_unity() {
        let a = Vec2::new(10.0, 10.0);
        let b = Vec2::new(90.0, 20.0);
        let c = Vec2::new(40.0, 80.0);

        for p in [
            Vec2::new(45.0, 35.0),
            Vec2::new(12.0, 11.0),
            Vec2::new(60.0, 40.0),
            Vec2::new(200.0, -50.0), // outside points partition unity too
        ] {
            let w = barycentric_weights(a, b, c, p);
            assert_relative_eq!(w.x + w.y + w.z, 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn barycentric_weights_at_vertices_are_unit() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 10.0);

        let wa = barycentric_weights(a, b, c, a);
        assert_relative_eq!(wa.x, 1.0);
        assert_relative_eq!(wa.y, 0.0);
        assert_relative_eq!(wa.z, 0.0);

        let wb = barycentric_weights(a, b, c, b);
        assert_relative_eq!(wb.y, 1.0);

        let wc = barycentric_weights(a, b, c, c);
        assert_relative_eq!(wc.z, 1.0);
    }

    #[test]
    fn interpolation_reproduces_vertex_attributes() {
        // Different w per vertex so the perspective correction actually runs
        let tri = ScreenTriangle::prepare(
            [
                Vec4::new(0.0, 0.0, 0.5, 2.0),
                Vec4::new(20.0, 0.0, 0.5, 3.0),
                Vec4::new(0.0, 20.0, 0.5, 4.0),
            ],
            [
                Vec2::new(0.25, 0.75),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
            ],
            false,
        );

        let at_v0 = Vec3::new(1.0, 0.0, 0.0);
        let recip = tri.reciprocal_w(at_v0);
        assert_relative_eq!(recip, 0.5, epsilon = 1e-6);

        let (u, v) = tri.uv(at_v0, recip);
        assert_relative_eq!(u, 0.25, epsilon = 1e-6);
        assert_relative_eq!(v, 0.75, epsilon = 1e-6);
    }

    #[test]
    fn solid_fill_writes_shaded_color() {
        let mut fb = FrameBuffer::new(100, 100);
        let tri = triangle(
            [
                Vec4::new(10.0, 10.0, 0.5, 1.0),
                Vec4::new(90.0, 10.0, 0.5, 1.0),
                Vec4::new(50.0, 90.0, 0.5, 1.0),
            ],
            0xFFFFFFFF,
        );
        let mut half = tri;
        half.intensity = 0.5;

        fill_triangle_solid(&half, &mut fb);
        assert_eq!(fb.pixel(50, 40), Some(0xFF7F7F7F));
    }

    #[test]
    fn depth_test_is_draw_order_independent() {
        let points_near = [
            Vec4::new(0.0, 0.0, 0.5, 2.0),
            Vec4::new(80.0, 0.0, 0.5, 2.0),
            Vec4::new(0.0, 80.0, 0.5, 2.0),
        ];
        // Same screen footprint, twice as deep: 1 - 1/4 > 1 - 1/2
        let points_far = points_near.map(|p| Vec4::new(p.x, p.y, p.z, 4.0));

        let near = triangle(points_near, 0xFF0000FF);
        let far = triangle(points_far, 0xFFFF0000);

        let mut fb = FrameBuffer::new(100, 100);
        fill_triangle_solid(&far, &mut fb);
        fill_triangle_solid(&near, &mut fb);
        assert_eq!(fb.pixel(20, 20), Some(0xFF0000FF));

        let mut fb = FrameBuffer::new(100, 100);
        fill_triangle_solid(&near, &mut fb);
        fill_triangle_solid(&far, &mut fb);
        assert_eq!(fb.pixel(20, 20), Some(0xFF0000FF));
    }

    #[test]
    fn textured_fill_samples_texture() {
        // 2x2 texture: red green / blue white
        let texture = Texture::from_pixels(
            2,
            2,
            vec![0xFFFF0000, 0xFF00FF00, 0xFF0000FF, 0xFFFFFFFF],
        );

        // Constant UV over the whole triangle: every covered pixel must
        // sample the same texel. V=0.25 flips to 0.75 -> texel row 1.
        let uv = Vec2::new(0.25, 0.25);
        let tri = Triangle {
            points: [
                Vec4::new(10.0, 10.0, 0.5, 1.0),
                Vec4::new(90.0, 10.0, 0.5, 1.0),
                Vec4::new(50.0, 90.0, 0.5, 1.0),
            ],
            tex_coords: [uv, uv, uv],
            color: colors::WHITE,
            intensity: 1.0,
        };

        let mut fb = FrameBuffer::new(100, 100);
        fill_triangle_textured(&tri, &mut fb, &texture);
        assert_eq!(fb.pixel(50, 40), Some(0xFF0000FF));
    }

    #[test]
    fn offscreen_spans_are_clipped_by_buffer_bounds() {
        let mut fb = FrameBuffer::new(20, 20);
        let tri = triangle(
            [
                Vec4::new(-50.0, -10.0, 0.5, 1.0),
                Vec4::new(60.0, -10.0, 0.5, 1.0),
                Vec4::new(10.0, 60.0, 0.5, 1.0),
            ],
            0xFFFFFFFF,
        );
        // Must not panic; the buffer drops out-of-range writes
        fill_triangle_solid(&tri, &mut fb);
        assert_eq!(fb.pixel(10, 10), Some(0xFFFFFFFF));
    }

    #[test]
    fn zero_area_triangle_rasterizes_nothing() {
        let mut fb = FrameBuffer::new(20, 20);
        let tri = triangle(
            [
                Vec4::new(5.0, 5.0, 0.5, 1.0),
                Vec4::new(5.0, 5.0, 0.5, 1.0),
                Vec4::new(5.0, 5.0, 0.5, 1.0),
            ],
            0xFFFFFFFF,
        );
        fill_triangle_solid(&tri, &mut fb);
        for y in 0..20 {
            for x in 0..20 {
                assert_eq!(fb.pixel(x, y), Some(colors::BACKGROUND));
            }
        }
    }
}

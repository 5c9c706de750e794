//! Rasterization: buffer state and the scanline triangle filler.

mod framebuffer;
mod rasterizer;

pub use framebuffer::FrameBuffer;
pub use rasterizer::{fill_triangle_solid, fill_triangle_textured};

use crate::math::{vec2::Vec2, vec4::Vec4};

/// A triangle ready for rasterization.
///
/// `points` hold screen-space x/y in pixels, NDC depth in z, and the
/// camera-space depth in w (the perspective divisor). Triangles are
/// built per clip fragment during the frame and consumed immediately;
/// none survives into the next frame.
#[derive(Clone, Copy, Debug)]
pub struct Triangle {
    pub points: [Vec4; 3],
    pub tex_coords: [Vec2; 3],
    /// Packed base color of the source face.
    pub color: u32,
    /// Flat per-face light intensity, shared by every fragment the
    /// source face was clipped into.
    pub intensity: f32,
}

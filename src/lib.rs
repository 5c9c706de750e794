//! A CPU-based software 3D rasterizer.
//!
//! Meshes of textured triangles go in; a color buffer and a per-pixel
//! depth buffer come out, computed entirely on the CPU. SDL2 is used
//! only to put the finished buffer on screen.
//!
//! # Quick Start
//!
//! ```ignore
//! use softpipe::prelude::*;
//!
//! let mut window = Window::new("demo", 800, 600)?;
//! let mut engine = Engine::new(800, 600);
//! engine.set_mesh(Mesh::cube());
//! ```

pub mod camera;
pub mod clipping;
pub mod colors;
pub mod engine;
pub mod light;
pub mod math;
pub mod mesh;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;
pub mod window;

// Re-export the types most consumers need at the crate root
pub use engine::{CullMode, Engine, RenderConfig, RenderMode};
pub use mesh::{Face, LoadError, Mesh};
pub use projection::Projection;
pub use texture::Texture;
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softpipe::prelude::*;
/// ```
pub mod prelude {
    // Pipeline
    pub use crate::engine::{CullMode, Engine, RenderConfig, RenderMode};

    // Scene
    pub use crate::camera::Camera;
    pub use crate::light::DirectionalLight;
    pub use crate::mesh::{Face, Mesh};
    pub use crate::projection::Projection;
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec2::Vec2;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Window
    pub use crate::window::{FrameLimiter, Window, WindowEvent};
}

//! The rendering pipeline.
//!
//! [`Engine`] owns the frame buffers, the per-frame triangle list and
//! the scene state (mesh, camera, light, projection). Each frame runs
//! two phases:
//!
//! 1. [`Engine::update`] — transform every face into camera space, cull
//!    back faces, clip against the view frustum, project and screen-map
//!    the surviving fragments into render-ready triangles.
//! 2. [`Engine::render`] — clear the buffers and rasterize the triangle
//!    list according to the active [`RenderConfig`].
//!
//! The triangle list is cleared, not freed, at the start of each update,
//! so steady-state frames perform no allocation.

use crate::camera::Camera;
use crate::clipping::{ClipVertex, Polygon, ViewFrustum};
use crate::colors;
use crate::light::DirectionalLight;
use crate::math::mat4::Mat4;
use crate::math::vec4::Vec4;
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::{self, FrameBuffer, Triangle};

const DEFAULT_FOV_Y_DEGREES: f32 = 60.0;
const DEFAULT_Z_NEAR: f32 = 0.1;
const DEFAULT_Z_FAR: f32 = 100.0;
const GRID_SPACING: i32 = 10;

/// Whether triangles facing away from the camera are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    #[default]
    Back,
    None,
}

/// Rendering mode presets, mirroring the keyboard toggles of the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Wireframe only (key: 2)
    Wireframe,
    /// Wireframe + vertex markers (key: 1)
    WireframeVertices,
    /// Filled with the face color (key: 3)
    Solid,
    /// Filled + wireframe (key: 4)
    SolidWireframe,
    /// Textured (key: 5)
    #[default]
    Textured,
    /// Textured + wireframe (key: 6)
    TexturedWireframe,
}

/// Explicit render configuration, owned by the pipeline rather than
/// living in process-wide state, so independent engines can coexist.
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub cull_mode: CullMode,
    pub render_mode: RenderMode,
    pub draw_grid: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cull_mode: CullMode::Back,
            render_mode: RenderMode::Textured,
            draw_grid: true,
        }
    }
}

pub struct Engine {
    framebuffer: FrameBuffer,
    triangles: Vec<Triangle>,
    mesh: Mesh,
    camera: Camera,
    light: DirectionalLight,
    projection: Projection,
    projection_matrix: Mat4,
    frustum: ViewFrustum,
    config: RenderConfig,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        let projection = Projection::new(
            DEFAULT_FOV_Y_DEGREES.to_radians(),
            width as f32 / height as f32,
            DEFAULT_Z_NEAR,
            DEFAULT_Z_FAR,
        );

        Self {
            framebuffer: FrameBuffer::new(width, height),
            triangles: Vec::new(),
            mesh: Mesh::new(vec![], vec![]),
            camera: Camera::default(),
            light: DirectionalLight::default(),
            projection_matrix: projection.matrix(),
            frustum: projection.view_frustum(),
            projection,
            config: RenderConfig::default(),
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.mesh = mesh;
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn light_mut(&mut self) -> &mut DirectionalLight {
        &mut self.light
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Rebuild the buffers, projection matrix and frustum for a new
    /// viewport size. This is the only place projection state changes.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.framebuffer = FrameBuffer::new(width, height);
        self.projection.set_aspect_ratio(width as f32 / height as f32);
        self.projection_matrix = self.projection.matrix();
        self.frustum = self.projection.view_frustum();
    }

    /// The triangles produced by the last [`Engine::update`].
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// The rendered frame as bytes (ARGB8888), for presentation.
    pub fn frame_buffer_bytes(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    /// Run the per-frame geometry pipeline, rebuilding the triangle list.
    pub fn update(&mut self) {
        self.triangles.clear();

        let world = self.mesh.transform().to_matrix();
        let view = self.camera.view_matrix();
        let view_world = view * world;

        let half_width = self.framebuffer.width() as f32 / 2.0;
        let half_height = self.framebuffer.height() as f32 / 2.0;

        for face in self.mesh.faces() {
            let vertices = [
                self.mesh.vertices()[face.a as usize],
                self.mesh.vertices()[face.b as usize],
                self.mesh.vertices()[face.c as usize],
            ];

            // Model -> world -> camera space in one transform
            let camera_space = vertices.map(|v| (view_world * Vec4::from(v)).to_vec3());

            let ab = camera_space[1] - camera_space[0];
            let ac = camera_space[2] - camera_space[0];
            let normal = ab.cross(ac).normalize();

            // The eye sits at the camera-space origin, so the ray from
            // the face back to it is the negated first vertex
            let camera_ray = -camera_space[0];
            if self.config.cull_mode == CullMode::Back && normal.dot(camera_ray) < 0.0 {
                continue;
            }

            // One intensity per source face; every fragment the face is
            // clipped into inherits it
            let intensity = self.light.intensity(normal);

            let polygon = Polygon::from_triangle(
                ClipVertex::new(camera_space[0], face.a_uv),
                ClipVertex::new(camera_space[1], face.b_uv),
                ClipVertex::new(camera_space[2], face.c_uv),
            );
            let clipped = self.frustum.clip_polygon(polygon);

            for (v0, v1, v2) in clipped.triangulate() {
                let points = [v0, v1, v2].map(|cv| {
                    let ndc =
                        (self.projection_matrix * Vec4::from(cv.position)).perspective_divide();

                    // Scale into the viewport, flip Y (screen Y grows
                    // downward) and translate to the viewport center.
                    // w still carries the camera-space depth.
                    Vec4::new(
                        ndc.x * half_width + half_width,
                        -ndc.y * half_height + half_height,
                        ndc.z,
                        ndc.w,
                    )
                });

                self.triangles.push(Triangle {
                    points,
                    tex_coords: [v0.uv, v1.uv, v2.uv],
                    color: face.color,
                    intensity,
                });
            }
        }
    }

    /// Rasterize the current triangle list into the frame buffer.
    pub fn render(&mut self) {
        let fb = &mut self.framebuffer;
        fb.clear(colors::BACKGROUND);
        fb.clear_depth();

        if self.config.draw_grid {
            fb.draw_grid(GRID_SPACING, colors::GRID);
        }

        let (fill_solid, fill_textured, wireframe, vertices) = match self.config.render_mode {
            RenderMode::Wireframe => (false, false, true, false),
            RenderMode::WireframeVertices => (false, false, true, true),
            RenderMode::Solid => (true, false, false, false),
            RenderMode::SolidWireframe => (true, false, true, false),
            RenderMode::Textured => (false, true, false, false),
            RenderMode::TexturedWireframe => (false, true, true, false),
        };

        for triangle in &self.triangles {
            if fill_textured {
                match self.mesh.texture() {
                    Some(texture) => render::fill_triangle_textured(triangle, fb, texture),
                    None => render::fill_triangle_solid(triangle, fb),
                }
            } else if fill_solid {
                render::fill_triangle_solid(triangle, fb);
            }
        }

        for triangle in &self.triangles {
            let [p0, p1, p2] = triangle.points;
            if wireframe {
                fb.draw_line(
                    p0.x as i32, p0.y as i32, p0.w, p1.x as i32, p1.y as i32, p1.w,
                    colors::WIREFRAME,
                );
                fb.draw_line(
                    p1.x as i32, p1.y as i32, p1.w, p2.x as i32, p2.y as i32, p2.w,
                    colors::WIREFRAME,
                );
                fb.draw_line(
                    p2.x as i32, p2.y as i32, p2.w, p0.x as i32, p0.y as i32, p0.w,
                    colors::WIREFRAME,
                );
            }
            if vertices {
                for point in &triangle.points {
                    fb.draw_rect(
                        point.x as i32 - 2,
                        point.y as i32 - 2,
                        4,
                        4,
                        colors::VERTEX_MARKER,
                    );
                }
            }
        }
    }
}

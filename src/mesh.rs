//! Mesh storage: vertices, faces and the per-mesh transform.

use std::fmt;
use std::path::Path;

use crate::colors;
use crate::math::{vec2::Vec2, vec3::Vec3};
use crate::texture::Texture;
use crate::transform::Transform;

/// A triangle of the mesh: three indices into the vertex array plus the
/// per-corner texture coordinates and a packed base color. Immutable
/// after load.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Face {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub a_uv: Vec2,
    pub b_uv: Vec2,
    pub c_uv: Vec2,
    pub color: u32,
}

/// Errors raised while loading a mesh from disk.
#[derive(Debug)]
pub enum LoadError {
    /// The OBJ file could not be read or parsed.
    Obj(tobj::LoadError),
    /// The file parsed but contained no triangle geometry.
    NoGeometry,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Obj(e) => write!(f, "failed to load OBJ file: {e}"),
            LoadError::NoGeometry => write!(f, "OBJ file contains no triangle geometry"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Obj(e) => Some(e),
            LoadError::NoGeometry => None,
        }
    }
}

impl From<tobj::LoadError> for LoadError {
    fn from(e: tobj::LoadError) -> Self {
        LoadError::Obj(e)
    }
}

/// A renderable mesh: contiguous vertex and face storage populated once
/// at load time, an optional texture, and the object's transform.
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Face>,
    texture: Option<Texture>,
    transform: Transform,
}

impl Mesh {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Face>) -> Self {
        Self {
            vertices,
            faces,
            texture: None,
            transform: Transform::default(),
        }
    }

    /// The reference cube: 8 vertices, 12 faces, each cube side mapped
    /// to the full texture.
    pub fn cube() -> Self {
        Self::new(CUBE_VERTICES.to_vec(), CUBE_FACES.to_vec())
    }

    /// Load the first model from a Wavefront OBJ file.
    ///
    /// Faces are triangulated on load and indexed against a single
    /// vertex stream, so texture coordinates line up with positions.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let (models, _materials) = tobj::load_obj(
            path.as_ref(),
            &tobj::LoadOptions {
                triangulate: true,
                single_index: true,
                ..Default::default()
            },
        )?;

        let model = models.into_iter().next().ok_or(LoadError::NoGeometry)?;
        let mesh = model.mesh;
        if mesh.indices.is_empty() {
            return Err(LoadError::NoGeometry);
        }

        let vertices: Vec<Vec3> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();

        let uv_at = |index: u32| -> Vec2 {
            if mesh.texcoords.is_empty() {
                Vec2::ZERO
            } else {
                let i = index as usize * 2;
                Vec2::new(mesh.texcoords[i], mesh.texcoords[i + 1])
            }
        };

        let faces: Vec<Face> = mesh
            .indices
            .chunks_exact(3)
            .map(|idx| Face {
                a: idx[0],
                b: idx[1],
                c: idx[2],
                a_uv: uv_at(idx[0]),
                b_uv: uv_at(idx[1]),
                c_uv: uv_at(idx[2]),
                color: colors::WHITE,
            })
            .collect();

        Ok(Self::new(vertices, faces))
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn set_texture(&mut self, texture: Texture) {
        self.texture = Some(texture);
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

const fn cube_face(a: u32, b: u32, c: u32) -> Face {
    Face {
        a,
        b,
        c,
        a_uv: Vec2::new(0.0, 0.0),
        b_uv: Vec2::new(0.0, 1.0),
        c_uv: Vec2::new(1.0, 1.0),
        color: colors::WHITE,
    }
}

const fn cube_face_alt(a: u32, b: u32, c: u32) -> Face {
    Face {
        a,
        b,
        c,
        a_uv: Vec2::new(0.0, 0.0),
        b_uv: Vec2::new(1.0, 1.0),
        c_uv: Vec2::new(1.0, 0.0),
        color: colors::WHITE,
    }
}

pub const CUBE_FACES: [Face; 12] = [
    // Front
    cube_face(0, 1, 2),
    cube_face_alt(0, 2, 3),
    // Right
    cube_face(3, 2, 4),
    cube_face_alt(3, 4, 5),
    // Back
    cube_face(5, 4, 6),
    cube_face_alt(5, 6, 7),
    // Left
    cube_face(7, 6, 1),
    cube_face_alt(7, 1, 0),
    // Top
    cube_face(1, 6, 4),
    cube_face_alt(1, 4, 2),
    // Bottom
    cube_face(5, 7, 0),
    cube_face_alt(5, 0, 3),
];

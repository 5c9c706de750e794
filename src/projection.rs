//! Perspective projection parameters.
//!
//! [`Projection`] is the single source of truth for FOV, aspect ratio
//! and the near/far planes. Both the projection matrix and the
//! view-space clipping frustum are derived from it, so they can never
//! disagree; they are rebuilt only when a parameter changes.

use crate::clipping::ViewFrustum;
use crate::math::mat4::Mat4;

#[derive(Debug, Clone, Copy)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    /// Horizontal field of view, derived from the vertical FOV and the
    /// aspect ratio: `tan(fov_x/2) = aspect * tan(fov_y/2)`.
    pub fn fov_x(&self) -> f32 {
        2.0 * (self.aspect_ratio * (self.fov_y / 2.0).tan()).atan()
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Update the aspect ratio, typically on window resize.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// The perspective projection matrix for these parameters.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// The view-space frustum planes for these parameters.
    pub fn view_frustum(&self) -> ViewFrustum {
        ViewFrustum::new(self.fov_x(), self.fov_y, self.z_near, self.z_far)
    }
}

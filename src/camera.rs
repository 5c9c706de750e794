//! Look-at camera.
//!
//! The camera is described by an eye position, a look-at target and a
//! world-up vector; the view matrix derived from them maps world space
//! into camera space, with the eye at the origin looking down +Z.

use crate::math::{mat4::Mat4, vec3::Vec3};

#[derive(Clone, Copy, Debug)]
pub struct Camera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
}

impl Camera {
    /// Camera at `position` looking at `target`, with world up (0,1,0).
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self {
            position,
            target,
            up: Vec3::UP,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
    }

    /// The view matrix for the current eye/target/up.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }
}

impl Default for Camera {
    /// Camera at the origin looking along +Z.
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::FORWARD)
    }
}

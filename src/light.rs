//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light illuminating the scene uniformly from a direction.
///
/// Models a distant source like the sun, where all rays are effectively
/// parallel.
pub struct DirectionalLight {
    /// The normalized direction the light is pointing (not where it comes from).
    direction: Vec3,
}

impl DirectionalLight {
    /// Create a directional light pointing in the given direction.
    /// The direction is normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        Self {
            direction: direction.normalize(),
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction.normalize();
    }

    /// Lambertian intensity for a face with the given unit normal.
    ///
    /// Returns the raw `-dot(normal, direction)` — a surface facing the
    /// light yields 1.0, a surface facing away yields a negative value.
    /// Clamping to [0, 1] happens when the intensity is applied to a
    /// color (`colors::apply_intensity`).
    pub fn intensity(&self, normal: Vec3) -> f32 {
        -normal.dot(self.direction)
    }
}

impl Default for DirectionalLight {
    /// Light pointing into the scene, along +Z.
    fn default() -> Self {
        Self::new(Vec3::FORWARD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn surface_facing_light_is_fully_lit() {
        // Light travels along +Z, surface normal points back at it
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0));
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(light.intensity(normal), 1.0);
    }

    #[test]
    fn surface_facing_away_goes_negative() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 1.0));
        let normal = Vec3::new(0.0, 0.0, 1.0);
        assert_relative_eq!(light.intensity(normal), -1.0);
    }

    #[test]
    fn grazing_angle_matches_cosine() {
        // Light straight down, normal at 45 degrees
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0));
        let normal = Vec3::new(0.0, 1.0, 1.0).normalize();
        assert_relative_eq!(light.intensity(normal), 0.707, epsilon = 1e-3);
    }

    #[test]
    fn direction_is_normalized_on_construction() {
        let light = DirectionalLight::new(Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(light.direction().magnitude(), 1.0, epsilon = 1e-6);
    }
}

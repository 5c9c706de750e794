//! View-space frustum clipping.
//!
//! Triangles are clipped against the six frustum planes with the
//! Sutherland-Hodgman algorithm before projection, so geometry crossing
//! the camera plane never reaches the perspective divide. Clipped
//! polygons are fanned back into triangles for the rasterizer.
//!
//! # Boundary policy
//!
//! A vertex counts as inside a plane only when its signed distance is
//! strictly positive; edges crossing a plane are detected by a sign
//! change of the two distances. A vertex lying exactly on a plane is
//! therefore never emitted directly — it can only be re-introduced by
//! the crossing interpolation.

use crate::math::{vec2::Vec2, vec3::Vec3};

/// Capacity of a clip polygon.
///
/// Clipping a triangle against a convex half-space adds at most one net
/// vertex, so six planes bound a 3-vertex input at 9; one slot of margin
/// on top of that.
pub const MAX_POLYGON_VERTICES: usize = 10;

/// A plane defined by a point on it and its unit normal.
/// The normal points toward the "inside" (visible) half-space.
#[derive(Clone, Copy)]
pub struct Plane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Plane {
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self { point, normal }
    }

    /// Signed distance from a position to this plane.
    /// Positive = inside (same side as the normal), negative = outside.
    pub fn signed_distance(&self, position: Vec3) -> f32 {
        (position - self.point).dot(self.normal)
    }
}

/// A polygon vertex carrying everything clipping must interpolate:
/// camera-space position and texture coordinate.
#[derive(Clone, Copy)]
pub struct ClipVertex {
    pub position: Vec3,
    pub uv: Vec2,
}

impl ClipVertex {
    pub fn new(position: Vec3, uv: Vec2) -> Self {
        Self { position, uv }
    }

    /// Interpolate position and UV toward `other` at parameter `t`.
    /// Used where a polygon edge crosses a clipping plane.
    fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            uv: self.uv.lerp(other.uv, t),
        }
    }
}

const EMPTY_VERTEX: ClipVertex = ClipVertex {
    position: Vec3::ZERO,
    uv: Vec2::ZERO,
};

/// A fixed-capacity polygon, the intermediate form geometry takes while
/// being clipped. Storage is inline so per-frame clipping never
/// allocates.
#[derive(Clone, Copy)]
pub struct Polygon {
    vertices: [ClipVertex; MAX_POLYGON_VERTICES],
    len: usize,
}

impl Polygon {
    /// Create a polygon from the three corners of a triangle.
    pub fn from_triangle(v0: ClipVertex, v1: ClipVertex, v2: ClipVertex) -> Self {
        let mut vertices = [EMPTY_VERTEX; MAX_POLYGON_VERTICES];
        vertices[0] = v0;
        vertices[1] = v1;
        vertices[2] = v2;
        Self { vertices, len: 3 }
    }

    fn empty() -> Self {
        Self {
            vertices: [EMPTY_VERTEX; MAX_POLYGON_VERTICES],
            len: 0,
        }
    }

    fn push(&mut self, vertex: ClipVertex) {
        debug_assert!(
            self.len < MAX_POLYGON_VERTICES,
            "clip polygon exceeded its worst-case vertex bound"
        );
        self.vertices[self.len] = vertex;
        self.len += 1;
    }

    pub fn vertex_count(&self) -> usize {
        self.len
    }

    pub fn vertices(&self) -> &[ClipVertex] {
        &self.vertices[..self.len]
    }

    /// True once fewer than 3 vertices remain — nothing left to render.
    pub fn is_degenerate(&self) -> bool {
        self.len < 3
    }

    /// Clip this polygon against a single plane (Sutherland-Hodgman).
    ///
    /// Walks every edge (previous → current). A sign change in the two
    /// signed distances emits the interpolated intersection vertex; a
    /// strictly-inside current vertex is then emitted unchanged.
    pub fn clip_against_plane(&self, plane: &Plane) -> Self {
        let mut output = Self::empty();
        if self.len == 0 {
            return output;
        }

        let mut prev = &self.vertices[self.len - 1];
        let mut prev_dist = plane.signed_distance(prev.position);

        for current in &self.vertices[..self.len] {
            let curr_dist = plane.signed_distance(current.position);

            // Edge crosses the plane: emit the intersection point
            if prev_dist * curr_dist < 0.0 {
                let t = prev_dist / (prev_dist - curr_dist);
                output.push(prev.lerp(current, t));
            }

            if curr_dist > 0.0 {
                output.push(*current);
            }

            prev = current;
            prev_dist = curr_dist;
        }

        output
    }

    /// Fan-triangulate from vertex 0.
    ///
    /// Yields `vertex_count - 2` triangles; a degenerate polygon
    /// (clipped below 3 vertices) yields none, which is a valid result.
    pub fn triangulate(&self) -> impl Iterator<Item = (ClipVertex, ClipVertex, ClipVertex)> + '_ {
        (1..self.len.saturating_sub(1))
            .map(move |i| (self.vertices[0], self.vertices[i], self.vertices[i + 1]))
    }
}

/// The six view-space frustum planes, in clipping order:
/// left, right, top, bottom, near, far.
pub struct ViewFrustum {
    planes: [Plane; 6],
}

impl ViewFrustum {
    /// Build the frustum from the horizontal/vertical field of view and
    /// the near/far distances.
    ///
    /// The four side planes pass through the origin with normals tilted
    /// inward by half the corresponding FOV; near and far are
    /// axis-aligned at their distances.
    pub fn new(fov_x: f32, fov_y: f32, z_near: f32, z_far: f32) -> Self {
        let half_fov_x = fov_x / 2.0;
        let half_fov_y = fov_y / 2.0;
        let origin = Vec3::ZERO;

        Self {
            planes: [
                Plane::new(origin, Vec3::new(half_fov_x.cos(), 0.0, half_fov_x.sin())),
                Plane::new(origin, Vec3::new(-half_fov_x.cos(), 0.0, half_fov_x.sin())),
                Plane::new(origin, Vec3::new(0.0, -half_fov_y.cos(), half_fov_y.sin())),
                Plane::new(origin, Vec3::new(0.0, half_fov_y.cos(), half_fov_y.sin())),
                Plane::new(Vec3::new(0.0, 0.0, z_near), Vec3::new(0.0, 0.0, 1.0)),
                Plane::new(Vec3::new(0.0, 0.0, z_far), Vec3::new(0.0, 0.0, -1.0)),
            ],
        }
    }

    /// Clip a polygon against all six planes, in the fixed order above.
    /// The result may be degenerate if the polygon lies fully outside.
    pub fn clip_polygon(&self, polygon: Polygon) -> Polygon {
        let mut result = polygon;

        for plane in &self.planes {
            if result.is_degenerate() {
                break;
            }
            result = result.clip_against_plane(plane);
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn tri(p0: Vec3, p1: Vec3, p2: Vec3) -> Polygon {
        Polygon::from_triangle(
            ClipVertex::new(p0, Vec2::new(0.0, 0.0)),
            ClipVertex::new(p1, Vec2::new(1.0, 0.0)),
            ClipVertex::new(p2, Vec2::new(0.0, 1.0)),
        )
    }

    fn frustum() -> ViewFrustum {
        // 90 degree cone both ways, near 0.1, far 100
        ViewFrustum::new(FRAC_PI_2, FRAC_PI_2, 0.1, 100.0)
    }

    #[test]
    fn fully_contained_triangle_is_untouched() {
        let input = tri(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(1.0, 0.0, 5.0),
            Vec3::new(0.0, 1.0, 5.0),
        );
        let clipped = frustum().clip_polygon(input);

        assert_eq!(clipped.vertex_count(), 3);
        for (got, expected) in clipped.vertices().iter().zip(input.vertices()) {
            assert_eq!(got.position, expected.position);
            assert_eq!(got.uv, expected.uv);
        }
    }

    #[test]
    fn triangle_behind_near_plane_clips_to_empty() {
        let clipped = frustum().clip_polygon(tri(
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(1.0, 0.0, -1.0),
            Vec3::new(0.0, 1.0, -2.0),
        ));

        assert_eq!(clipped.vertex_count(), 0);
        assert_eq!(clipped.triangulate().count(), 0);
    }

    #[test]
    fn one_vertex_outside_near_plane_splits_into_quad() {
        let near = Plane::new(Vec3::new(0.0, 0.0, 0.5), Vec3::new(0.0, 0.0, 1.0));
        let input = tri(
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 2.0),
            Vec3::new(0.0, 1.0, 0.0), // behind the plane
        );

        let clipped = input.clip_against_plane(&near);

        assert_eq!(clipped.vertex_count(), 4);
        assert_eq!(clipped.triangulate().count(), 2);

        // Both intersection vertices must land exactly on the plane
        for v in clipped.vertices() {
            assert!(near.signed_distance(v.position) >= 0.0);
        }
        assert_relative_eq!(clipped.vertices()[0].position.z, 0.5, epsilon = 1e-6);
        assert_relative_eq!(clipped.vertices()[3].position.z, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn intersection_interpolates_uv() {
        let near = Plane::new(Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
        // Edge from z=0 (uv 0,0) to z=2 (uv 1,0) crosses at its midpoint
        let input = tri(
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 2.0),
        );

        let clipped = input.clip_against_plane(&near);
        let crossing = clipped
            .vertices()
            .iter()
            .find(|v| v.uv.x > 0.0 && v.uv.x < 1.0)
            .expect("expected an interpolated vertex");

        assert_relative_eq!(crossing.uv.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(crossing.position.z, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn clipping_stays_within_capacity() {
        // A triangle poking out of all four side planes produces the
        // worst-case vertex growth
        let clipped = frustum().clip_polygon(tri(
            Vec3::new(-50.0, -50.0, 2.0),
            Vec3::new(50.0, -50.0, 2.0),
            Vec3::new(0.0, 80.0, 2.0),
        ));

        assert!(clipped.vertex_count() <= MAX_POLYGON_VERTICES);
        assert!(clipped.vertex_count() > 3);
    }
}

//! Triangle primitive.
//!
//! Intersection is a plane test against the cached face normal followed
//! by a signed sub-triangle area (barycentric) inside/outside test.

use crate::entity::RayHit;
use glam::Vec2;
use lux_core::Material;
use lux_math::{
    Aabb, Ray, Vec3, BARY_EPSILON, BARY_SUM_EPSILON, PARALLEL_EPSILON, RAY_EPSILON,
};
use std::sync::Arc;

/// A mesh face: three vertices, a cached face normal, a shared material,
/// and optional per-vertex texture coordinates.
///
/// Vertices are mutable in place (animation); the face normal is
/// recomputed whenever they change.
pub struct Triangle {
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    /// Unnormalized face normal `(v1-v0) x (v2-v0)`; its squared length
    /// doubles as the total signed area for the barycentric test
    normal: Vec3,
    material: Arc<Material>,
    uvs: Option<[Vec2; 3]>,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: Arc<Material>) -> Self {
        Self {
            v0,
            v1,
            v2,
            normal: (v1 - v0).cross(v2 - v0),
            material,
            uvs: None,
        }
    }

    /// Create a triangle carrying per-vertex texture coordinates.
    pub fn with_uvs(
        v0: Vec3,
        v1: Vec3,
        v2: Vec3,
        material: Arc<Material>,
        uvs: [Vec2; 3],
    ) -> Self {
        let mut tri = Self::new(v0, v1, v2, material);
        tri.uvs = Some(uvs);
        tri
    }

    pub fn vertices(&self) -> (Vec3, Vec3, Vec3) {
        (self.v0, self.v1, self.v2)
    }

    /// Replace the vertices and recompute the face normal.
    pub fn set_vertices(&mut self, v0: Vec3, v1: Vec3, v2: Vec3) {
        self.v0 = v0;
        self.v1 = v1;
        self.v2 = v2;
        self.normal = (v1 - v0).cross(v2 - v0);
    }

    /// Unnormalized face normal.
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_triangle(self.v0, self.v1, self.v2)
    }

    /// Interpolate the texture coordinate at barycentric weights
    /// `(u, v)` of the second and third vertex.
    pub fn texcoord(&self, u: f32, v: f32) -> Option<Vec2> {
        self.uvs
            .map(|[t0, t1, t2]| t0 * (1.0 - u - v) + t1 * u + t2 * v)
    }

    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let n = self.normal;
        let area_sq = n.length_squared();
        // Collinear vertices give a (near-)zero normal; everything after
        // this divides by the area, so bail before producing NaN. The
        // threshold must stay far below any legitimately small face.
        if area_sq < f32::MIN_POSITIVE {
            return None;
        }

        // Plane intersection; reject rays (near) parallel to the plane.
        // The parallel threshold scales with |n| so the comparison is
        // effectively against the normalized normal.
        let denom = n.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON * area_sq.sqrt() {
            return None;
        }
        let t = n.dot(self.v0 - ray.origin) / denom;
        if t < RAY_EPSILON {
            return None;
        }

        // Signed sub-triangle areas relative to the hit point, projected
        // on the face normal. Each is the barycentric weight of the
        // vertex opposite the sub-triangle.
        let p = ray.at(t);
        let a0 = n.dot((self.v1 - p).cross(self.v2 - p)) / area_sq;
        let a1 = n.dot((self.v2 - p).cross(self.v0 - p)) / area_sq;
        let a2 = n.dot((self.v0 - p).cross(self.v1 - p)) / area_sq;

        if a0 < -BARY_EPSILON || a1 < -BARY_EPSILON || a2 < -BARY_EPSILON {
            return None;
        }
        if (a0 + a1 + a2 - 1.0).abs() > BARY_SUM_EPSILON {
            return None;
        }

        Some(RayHit {
            point: p,
            normal: n / area_sq.sqrt(),
            incoming: ray.direction,
            t,
            u: a1,
            v: a2,
            material: Arc::clone(&self.material),
        })
    }
}

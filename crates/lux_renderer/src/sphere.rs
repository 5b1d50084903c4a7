//! Sphere primitive.

use crate::entity::RayHit;
use lux_core::Material;
use lux_math::{Aabb, Ray, Vec3, RAY_EPSILON};
use std::sync::Arc;

/// An analytic sphere.
#[derive(Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    pub fn bounds(&self) -> Aabb {
        let r = Vec3::splat(self.radius);
        Aabb::from_points(self.center - r, self.center + r)
    }

    /// Solve |O + tD - C|^2 = r^2 and keep the smallest root beyond the
    /// self-intersection epsilon, falling back to the far root when the
    /// ray starts inside the sphere.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let oc = ray.origin - self.center;
        let half_b = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = half_b * half_b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let mut t = -half_b - sqrtd;
        if t <= RAY_EPSILON {
            t = -half_b + sqrtd;
            if t <= RAY_EPSILON {
                return None;
            }
        }

        let point = ray.at(t);
        Some(RayHit {
            point,
            normal: (point - self.center) / self.radius,
            incoming: ray.direction,
            t,
            u: 0.0,
            v: 0.0,
            material: Arc::clone(&self.material),
        })
    }
}

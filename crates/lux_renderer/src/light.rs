//! Light sources.

use crate::entity::RayHit;
use lux_core::{Color, Material};
use lux_math::{Ray, Vec3, PARALLEL_EPSILON, RAY_EPSILON};
use std::sync::Arc;

/// An infinitesimal point light. Immutable once added to a scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
}

impl PointLight {
    pub fn new(position: Vec3, color: Color) -> Self {
        Self { position, color }
    }
}

/// A rectangular emitter.
///
/// The rectangle is a visible scene entity (rays can see it), but for
/// illumination it is sampled as a single point light at its center;
/// soft shadows are out of scope.
pub struct AreaLight {
    corner: Vec3,
    edge_u: Vec3,
    edge_v: Vec3,
    color: Color,
    material: Arc<Material>,
}

impl AreaLight {
    pub fn new(corner: Vec3, edge_u: Vec3, edge_v: Vec3, color: Color) -> Self {
        // Self-lit surface: shades as its own emission color regardless
        // of direct lighting
        let material = Arc::new(Material {
            ambient: color,
            diffuse: color,
            specular: Color::ZERO,
            shininess: 1.0,
            reflectivity: 0.0,
            transmissivity: 0.0,
            ior: 1.0,
        });
        Self {
            corner,
            edge_u,
            edge_v,
            color,
            material,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }

    pub fn center(&self) -> Vec3 {
        self.corner + 0.5 * (self.edge_u + self.edge_v)
    }

    /// The point light this emitter contributes to shading.
    pub fn as_point_light(&self) -> PointLight {
        PointLight::new(self.center(), self.color)
    }

    /// Ray/rectangle intersection: plane test, then projection onto the
    /// two edges.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        let n = self.edge_u.cross(self.edge_v);
        let denom = n.dot(ray.direction);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }

        let t = n.dot(self.corner - ray.origin) / denom;
        if t < RAY_EPSILON {
            return None;
        }

        let p = ray.at(t);
        let d = p - self.corner;
        let u = d.dot(self.edge_u) / self.edge_u.length_squared();
        let v = d.dot(self.edge_v) / self.edge_v.length_squared();
        if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
            return None;
        }

        Some(RayHit {
            point: p,
            normal: n.normalize(),
            incoming: ray.direction,
            t,
            u: 0.0,
            v: 0.0,
            material: Arc::clone(&self.material),
        })
    }
}

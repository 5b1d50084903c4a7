//! Scene entity variants and the intersection result they produce.

use crate::{AreaLight, Sphere, Triangle, TriangleMesh};
use lux_core::Material;
use lux_math::{Ray, Vec3};
use std::sync::Arc;

/// Record of a ray-entity intersection, consumed by the shader.
#[derive(Clone)]
pub struct RayHit {
    /// Point of intersection
    pub point: Vec3,
    /// Unit surface normal at the intersection (outward for spheres,
    /// face normal for triangles)
    pub normal: Vec3,
    /// Unit direction the ray was traveling when it hit
    pub incoming: Vec3,
    /// Ray parameter of the intersection (distance, since directions
    /// are unit length)
    pub t: f32,
    /// Barycentric weights of the second and third vertex for triangle
    /// hits; zero for other primitives
    pub u: f32,
    pub v: f32,
    /// Material at the intersection point
    pub material: Arc<Material>,
}

impl RayHit {
    /// Squared distance from `origin` to the hit point. Nearest-hit
    /// searches and BVH child comparisons order hits by this value.
    #[inline]
    pub fn distance_squared_from(&self, origin: Vec3) -> f32 {
        self.point.distance_squared(origin)
    }
}

/// A renderable object owned by the scene.
///
/// A closed variant set: the render loop only ever needs the
/// intersect-and-material capability, so there is no open trait to
/// implement. The camera is held by the scene directly; it never
/// answers intersection queries.
pub enum SceneEntity {
    Sphere(Sphere),
    Triangle(Triangle),
    Mesh(TriangleMesh),
    AreaLight(AreaLight),
}

impl SceneEntity {
    /// Nearest intersection of `ray` with this entity, if any. Mesh
    /// entities delegate to their BVH.
    pub fn intersect(&self, ray: &Ray) -> Option<RayHit> {
        match self {
            SceneEntity::Sphere(s) => s.intersect(ray),
            SceneEntity::Triangle(t) => t.intersect(ray),
            SceneEntity::Mesh(m) => m.intersect(ray),
            SceneEntity::AreaLight(l) => l.intersect(ray),
        }
    }

    /// The entity's material. For meshes this is the representative
    /// material of the leftmost BVH leaf; `None` only for an empty mesh.
    pub fn material(&self) -> Option<Arc<Material>> {
        match self {
            SceneEntity::Sphere(s) => Some(Arc::clone(s.material())),
            SceneEntity::Triangle(t) => Some(Arc::clone(t.material())),
            SceneEntity::Mesh(m) => m.material(),
            SceneEntity::AreaLight(l) => Some(Arc::clone(l.material())),
        }
    }

    /// Mutable access for animation hooks that move mesh geometry.
    pub fn as_mesh_mut(&mut self) -> Option<&mut TriangleMesh> {
        match self {
            SceneEntity::Mesh(m) => Some(m),
            _ => None,
        }
    }
}

impl From<Sphere> for SceneEntity {
    fn from(s: Sphere) -> Self {
        SceneEntity::Sphere(s)
    }
}

impl From<Triangle> for SceneEntity {
    fn from(t: Triangle) -> Self {
        SceneEntity::Triangle(t)
    }
}

impl From<TriangleMesh> for SceneEntity {
    fn from(m: TriangleMesh) -> Self {
        SceneEntity::Mesh(m)
    }
}

impl From<AreaLight> for SceneEntity {
    fn from(l: AreaLight) -> Self {
        SceneEntity::AreaLight(l)
    }
}

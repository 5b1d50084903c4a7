//! lux renderer - CPU Whitted ray tracing
//!
//! An offline, single-shot batch renderer: camera rays are cast through
//! every pixel (with anti-aliasing and optional depth-of-field
//! sub-sampling) and shaded recursively with direct Phong illumination,
//! hard shadows, specular reflection, and refraction. Triangle meshes
//! are accelerated by a per-mesh bounding volume hierarchy.

mod animation;
mod bvh;
mod camera;
mod entity;
mod film;
mod light;
mod mesh;
mod scene;
mod shader;
mod sphere;
mod triangle;

pub use animation::Animation;
pub use bvh::Bvh;
pub use camera::Camera;
pub use entity::{RayHit, SceneEntity};
pub use film::Film;
pub use light::{AreaLight, PointLight};
pub use mesh::TriangleMesh;
pub use scene::{EntityId, Scene};
pub use shader::trace_ray;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export the math and scene-data types the public API is built from.
pub use lux_core::{Color, ConfigError, Material, Mesh, RenderSettings, SplitPolicy};
pub use lux_math::{Aabb, Ray, Vec3};

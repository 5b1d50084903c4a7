//! Camera and primary-ray generation.

use glam::Quat;
use lux_math::{Ray, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// The ray-generating viewpoint: a rigid transform plus a thin lens.
///
/// An aperture radius of zero makes a pinhole camera (no depth of
/// field). Validation of the lens parameters happens at scene setup.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Quat,
    aperture_radius: f32,
    focal_length: f32,
}

impl Camera {
    /// A pinhole camera at `position` looking along its rotated -Z axis.
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            aperture_radius: 0.0,
            focal_length: 1.0,
        }
    }

    /// Configure the thin lens for depth of field.
    pub fn with_lens(mut self, aperture_radius: f32, focal_length: f32) -> Self {
        self.aperture_radius = aperture_radius;
        self.focal_length = focal_length;
        self
    }

    pub fn aperture_radius(&self) -> f32 {
        self.aperture_radius
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Generate a primary ray for a camera-space view direction.
    ///
    /// With the aperture open, a lens point is drawn uniformly from a
    /// disk in the sensor plane (polar method: `r = sqrt(U) * radius`,
    /// `theta = 2 pi U'`) and the ray fires from there toward the focal
    /// point, so geometry at the focal distance stays sharp.
    pub fn primary_ray<R: Rng>(&self, direction: Vec3, rng: &mut R) -> Ray {
        let world_dir = self.rotation * direction.normalize_or_zero();

        if self.aperture_radius > 0.0 {
            let focal_point = self.position + world_dir * self.focal_length;

            let r = rng.gen::<f32>().sqrt() * self.aperture_radius;
            let theta = rng.gen::<f32>() * TAU;
            let lens_offset =
                self.rotation * Vec3::new(r * theta.cos(), r * theta.sin(), 0.0);

            let origin = self.position + lens_offset;
            Ray::new(origin, focal_point - origin)
        } else {
            Ray::new(self.position, world_dir)
        }
    }
}

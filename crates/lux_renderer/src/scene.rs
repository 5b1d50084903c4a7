//! Scene container and the render loop.

use crate::{Animation, AreaLight, Camera, Film, PointLight, SceneEntity};
use lux_core::{Color, ConfigError, RenderSettings};
use lux_math::Vec3;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::fmt;

/// Handle to an entity owned by a scene. Entities are never removed,
/// so a handle stays valid for the life of the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EntityId(usize);

/// Everything a render pass needs: entities, lights, camera, ambient
/// term, animation hooks, and the sampling configuration.
pub struct Scene {
    entities: Vec<SceneEntity>,
    lights: Vec<PointLight>,
    animations: Vec<Animation>,
    ambient: Color,
    camera: Camera,
    settings: RenderSettings,
}

impl Scene {
    /// Build a scene, validating the camera and sampling configuration
    /// up front. Rendering itself cannot fail.
    pub fn new(camera: Camera, settings: RenderSettings) -> Result<Self, ConfigError> {
        if camera.focal_length() <= 0.0 {
            return Err(ConfigError::NonPositiveFocalLength(camera.focal_length()));
        }
        if camera.aperture_radius() < 0.0 {
            return Err(ConfigError::NegativeAperture(camera.aperture_radius()));
        }
        if settings.aa_multiplier < 1 {
            return Err(ConfigError::ZeroAaMultiplier);
        }
        if settings.dof_samples < 1 {
            return Err(ConfigError::ZeroDofSamples);
        }
        if settings.hfov_degrees <= 0.0 || settings.hfov_degrees >= 180.0 {
            return Err(ConfigError::InvalidFieldOfView(settings.hfov_degrees));
        }

        Ok(Self {
            entities: Vec::new(),
            lights: Vec::new(),
            animations: Vec::new(),
            ambient: Color::ONE,
            camera,
            settings,
        })
    }

    pub fn add_entity(&mut self, entity: impl Into<SceneEntity>) -> EntityId {
        self.entities.push(entity.into());
        EntityId(self.entities.len() - 1)
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    /// Add a rectangular emitter: it becomes both a visible entity and a
    /// point light at its center.
    pub fn add_area_light(&mut self, light: AreaLight) -> EntityId {
        self.lights.push(light.as_point_light());
        self.add_entity(light)
    }

    pub fn add_animation(&mut self, animation: Animation) {
        self.animations.push(animation);
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut SceneEntity> {
        self.entities.get_mut(id.0)
    }

    pub fn set_ambient(&mut self, ambient: Color) {
        self.ambient = ambient;
    }

    pub fn ambient(&self) -> Color {
        self.ambient
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn entities(&self) -> &[SceneEntity] {
        &self.entities
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    /// Render one frame at scene time `time` into `film`. A zero-area
    /// film is a no-op.
    ///
    /// Animation hooks run serially first, then any dirtied mesh BVH is
    /// rebuilt, and only then does the (read-only) parallel sampling
    /// pass start. Rows are distributed across the rayon pool, each
    /// with its own RNG.
    pub fn render(&mut self, film: &mut Film, time: f32) {
        if film.width() == 0 || film.height() == 0 {
            log::warn!("render skipped: film has zero area");
            return;
        }

        let mut animations = std::mem::take(&mut self.animations);
        for animation in &mut animations {
            if let Some(entity) = self.entities.get_mut(animation.target().0) {
                animation.run(entity, time);
            }
        }
        self.animations = animations;

        for entity in &mut self.entities {
            if let Some(mesh) = entity.as_mesh_mut() {
                mesh.rebuild_if_dirty();
            }
        }

        let width = film.width();
        let height = film.height();
        let aa = self.settings.aa_multiplier;
        let dof = if self.camera.aperture_radius() > 0.0 {
            self.settings.dof_samples
        } else {
            1
        };
        let samples_per_pixel = (aa * dof).pow(2);

        log::info!(
            "rendering {width}x{height}, {samples_per_pixel} samples/pixel, \
             {} entities, {} lights",
            self.entities.len(),
            self.lights.len()
        );

        // Horizontal field of view sets the screen-plane half-width; the
        // half-height follows from the aspect ratio.
        let tan_half = (self.settings.hfov_degrees.to_radians() / 2.0).tan();
        let aspect = width as f32 / height as f32;

        let scene = &*self;
        film.pixels
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(y, row)| {
                let mut rng = SmallRng::from_entropy();
                for (x, pixel) in row.iter_mut().enumerate() {
                    let mut accumulated = Color::ZERO;
                    for sy in 0..aa {
                        for sx in 0..aa {
                            // Sub-pixel sample centers on a uniform grid
                            let rx = x as f32 + (sx as f32 + 0.5) / aa as f32;
                            let ry = y as f32 + (sy as f32 + 0.5) / aa as f32;

                            let px = (2.0 * rx / width as f32 - 1.0) * tan_half;
                            let py = (1.0 - 2.0 * ry / height as f32) * tan_half / aspect;
                            let direction = Vec3::new(px, py, -1.0);

                            for _ in 0..dof * dof {
                                let ray = scene.camera.primary_ray(direction, &mut rng);
                                accumulated += crate::trace_ray(scene, &ray, 0);
                            }
                        }
                    }
                    *pixel = accumulated / samples_per_pixel as f32;
                }
            });
    }
}

// Animation hooks are opaque closures, so summarize the collections
// instead of deriving.
impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("entities", &self.entities.len())
            .field("lights", &self.lights.len())
            .field("animations", &self.animations.len())
            .field("ambient", &self.ambient)
            .field("camera", &self.camera)
            .field("settings", &self.settings)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere, TriangleMesh};
    use glam::Quat;
    use lux_core::Mesh;
    use std::sync::Arc;

    fn test_camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 0.0), Quat::IDENTITY)
    }

    #[test]
    fn test_rejects_bad_lens() {
        let camera = test_camera().with_lens(0.1, 0.0);
        let err = Scene::new(camera, RenderSettings::default()).unwrap_err();
        assert_eq!(err, ConfigError::NonPositiveFocalLength(0.0));

        let camera = test_camera().with_lens(-0.1, 5.0);
        let err = Scene::new(camera, RenderSettings::default()).unwrap_err();
        assert_eq!(err, ConfigError::NegativeAperture(-0.1));
    }

    #[test]
    fn test_rejects_bad_sampling_config() {
        let mut settings = RenderSettings::default();
        settings.aa_multiplier = 0;
        assert_eq!(
            Scene::new(test_camera(), settings).unwrap_err(),
            ConfigError::ZeroAaMultiplier
        );

        let mut settings = RenderSettings::default();
        settings.dof_samples = 0;
        assert_eq!(
            Scene::new(test_camera(), settings).unwrap_err(),
            ConfigError::ZeroDofSamples
        );

        let mut settings = RenderSettings::default();
        settings.hfov_degrees = 180.0;
        assert_eq!(
            Scene::new(test_camera(), settings).unwrap_err(),
            ConfigError::InvalidFieldOfView(180.0)
        );
    }

    #[test]
    fn test_debug_summarizes_contents() {
        let mut scene = Scene::new(test_camera(), RenderSettings::default()).unwrap();
        scene.add_light(PointLight::new(Vec3::Y, Color::ONE));
        scene.add_entity(Sphere::new(
            Vec3::ZERO,
            1.0,
            Arc::new(Material::default()),
        ));

        let text = format!("{scene:?}");
        assert!(text.contains("entities: 1"));
        assert!(text.contains("lights: 1"));
    }

    #[test]
    fn test_zero_area_film_is_a_no_op() {
        let mut scene = Scene::new(test_camera(), RenderSettings::default()).unwrap();
        scene.render(&mut Film::new(0, 0), 0.0);
        scene.render(&mut Film::new(4, 0), 0.0);
        scene.render(&mut Film::new(0, 4), 0.0);
    }

    #[test]
    fn test_empty_scene_renders_black() {
        let mut scene = Scene::new(test_camera(), RenderSettings::default()).unwrap();
        let mut film = Film::new(8, 8);
        scene.render(&mut film, 0.0);
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(film.get(x, y), Color::ZERO);
            }
        }
    }

    #[test]
    fn test_sphere_covers_center_pixel() {
        let mut scene = Scene::new(test_camera(), RenderSettings::default()).unwrap();
        scene.set_ambient(Color::ONE);
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Arc::new(Material::diffuse(Color::ONE)),
        ));

        let mut film = Film::new(9, 9);
        scene.render(&mut film, 0.0);

        // Center pixel sees the sphere, the corner sees background
        assert!(film.get(4, 4).length() > 0.0);
        assert_eq!(film.get(0, 0), Color::ZERO);
    }

    #[test]
    fn test_aa_average_matches_flat_field() {
        // A scene that shades identically everywhere on screen (one
        // huge ambient-only sphere enclosing the camera) must render the
        // same under aa = 1 and aa = 4.
        let enclosing = Sphere::new(
            Vec3::ZERO,
            100.0,
            Arc::new(Material {
                ambient: Color::new(0.3, 0.5, 0.7),
                diffuse: Color::ZERO,
                specular: Color::ZERO,
                ..Default::default()
            }),
        );

        let mut plain = Scene::new(test_camera(), RenderSettings::default()).unwrap();
        plain.add_entity(enclosing.clone());

        let mut settings = RenderSettings::default();
        settings.aa_multiplier = 4;
        let mut sampled = Scene::new(test_camera(), settings).unwrap();
        sampled.add_entity(enclosing);

        let mut film_a = Film::new(4, 4);
        let mut film_b = Film::new(4, 4);
        plain.render(&mut film_a, 0.0);
        sampled.render(&mut film_b, 0.0);

        for y in 0..4 {
            for x in 0..4 {
                assert!((film_a.get(x, y) - film_b.get(x, y)).length() < 1e-4);
            }
        }
    }

    #[test]
    fn test_animation_moves_mesh() {
        let mut scene = Scene::new(test_camera(), RenderSettings::default()).unwrap();
        scene.set_ambient(Color::ONE);

        // Small quad straight ahead
        let mesh = Mesh::new(
            vec![
                Vec3::new(-0.5, -0.5, -5.0),
                Vec3::new(0.5, -0.5, -5.0),
                Vec3::new(0.5, 0.5, -5.0),
                Vec3::new(-0.5, 0.5, -5.0),
            ],
            vec![0, 1, 2, 0, 2, 3],
            None,
        );
        let id = scene.add_entity(TriangleMesh::from_mesh(
            &mesh,
            Arc::new(Material::diffuse(Color::ONE)),
            lux_core::SplitPolicy::default(),
        ));

        // Slide the quad out of frame as time advances
        scene.add_animation(Animation::new(id, |entity, time| {
            if let Some(mesh) = entity.as_mesh_mut() {
                mesh.apply_transform(Vec3::new(time * 100.0, 0.0, 0.0), Quat::IDENTITY, Vec3::ZERO);
            }
        }));

        let mut film = Film::new(9, 9);
        scene.render(&mut film, 0.0);
        assert!(film.get(4, 4).length() > 0.0);

        scene.render(&mut film, 1.0);
        assert_eq!(film.get(4, 4), Color::ZERO);
    }
}

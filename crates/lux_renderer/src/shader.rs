//! Recursive Whitted shader.

use crate::entity::RayHit;
use crate::Scene;
use lux_core::Color;
use lux_math::{Ray, Vec3, RAY_EPSILON};
use std::sync::Arc;

/// Shade one ray against the scene.
///
/// Nearest-hit search over all entities, then ambient + per-light Phong
/// terms with hard shadows, then recursive reflection and refraction.
/// Recursion is bounded only by the depth counter; mirror loops
/// truncate naturally at the limit. Every failure mode (no hit, depth
/// exhausted, degenerate geometry) contributes black.
pub fn trace_ray(scene: &Scene, ray: &Ray, depth: u32) -> Color {
    if depth >= scene.settings().max_depth {
        return Color::ZERO;
    }

    let Some((entity_index, hit)) = nearest_hit(scene, ray) else {
        return Color::ZERO;
    };
    let material = Arc::clone(&hit.material);

    let mut color = material.ambient * scene.ambient();

    // Surface normal on the side the ray arrived from; shading, shadow
    // offsets, and reflection all use this side.
    let facing = if hit.incoming.dot(hit.normal) < 0.0 {
        hit.normal
    } else {
        -hit.normal
    };
    let shadow_origin = hit.point + facing * RAY_EPSILON;

    for light in scene.lights() {
        let to_light = light.position - shadow_origin;
        let light_distance = to_light.length();
        if light_distance <= RAY_EPSILON {
            continue;
        }
        let l = to_light / light_distance;

        if occluded(scene, entity_index, shadow_origin, l, light_distance) {
            continue;
        }

        let n_dot_l = facing.dot(l);
        if n_dot_l > 0.0 {
            color += material.diffuse * light.color * n_dot_l;
        }

        // Specular: light direction mirrored about the normal, against
        // the direction back to the camera
        let r = 2.0 * facing.dot(l) * facing - l;
        let r_dot_v = r.dot(-hit.incoming).max(0.0);
        if r_dot_v > 0.0 {
            color += material.specular * light.color * r_dot_v.powf(material.shininess);
        }
    }

    if material.is_reflective() {
        let reflected = reflect(hit.incoming, facing);
        let ray = Ray::new(hit.point + facing * RAY_EPSILON, reflected);
        color += material.reflectivity * trace_ray(scene, &ray, depth + 1);
    }

    if material.is_transmissive() {
        // Entering or exiting decides the normal orientation and which
        // way the index-of-refraction ratio goes.
        let entering = hit.incoming.dot(hit.normal) < 0.0;
        let (n, eta) = if entering {
            (hit.normal, 1.0 / material.ior)
        } else {
            (-hit.normal, material.ior)
        };

        match refract(hit.incoming, n, eta) {
            Some(transmitted) => {
                // New origin sits past the surface, along the direction
                // of travel
                let ray = Ray::new(hit.point - n * RAY_EPSILON, transmitted);
                color += material.transmissivity * trace_ray(scene, &ray, depth + 1);
            }
            None => {
                // Total internal reflection: reflect instead, weighted
                // by the reflectivity
                let reflected = reflect(hit.incoming, n);
                let ray = Ray::new(hit.point + n * RAY_EPSILON, reflected);
                color += material.reflectivity * trace_ray(scene, &ray, depth + 1);
            }
        }
    }

    color
}

/// Nearest hit over all scene entities by squared distance from the ray
/// origin, along with the index of the entity that produced it.
fn nearest_hit(scene: &Scene, ray: &Ray) -> Option<(usize, RayHit)> {
    let mut best: Option<(usize, RayHit)> = None;
    let mut best_d2 = f32::INFINITY;

    for (index, entity) in scene.entities().iter().enumerate() {
        if let Some(hit) = entity.intersect(ray) {
            let d2 = hit.distance_squared_from(ray.origin);
            if d2 < best_d2 {
                best_d2 = d2;
                best = Some((index, hit));
            }
        }
    }

    best
}

/// Whether anything other than the shaded entity blocks the segment
/// from `origin` toward the light.
fn occluded(scene: &Scene, skip: usize, origin: Vec3, dir: Vec3, light_distance: f32) -> bool {
    let ray = Ray::new(origin, dir);
    for (index, entity) in scene.entities().iter().enumerate() {
        if index == skip {
            continue;
        }
        if let Some(hit) = entity.intersect(&ray) {
            // Strictly between the surface and the light; the epsilon on
            // the far end keeps a light's own geometry (which sits at
            // exactly the light distance) from shadowing it
            if hit.t > RAY_EPSILON && hit.t + RAY_EPSILON < light_distance {
                return true;
            }
        }
    }
    false
}

/// Mirror `d` about the normal `n`.
#[inline]
pub(crate) fn reflect(d: Vec3, n: Vec3) -> Vec3 {
    d - 2.0 * d.dot(n) * n
}

/// Snell's law. `n` must oppose `d` (the surface side the ray arrives
/// from); `eta` is the ratio of refractive indices across the boundary.
/// Returns `None` under total internal reflection.
#[inline]
pub(crate) fn refract(d: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = -d.dot(n);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        None
    } else {
        Some(eta * d + (eta * cos_i - k.sqrt()) * n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Camera, Material, PointLight, RenderSettings, Sphere, Triangle};
    use glam::Quat;

    fn empty_scene(max_depth: u32) -> Scene {
        let settings = RenderSettings {
            max_depth,
            ..Default::default()
        };
        Scene::new(Camera::new(Vec3::new(0.0, 0.0, 5.0), Quat::IDENTITY), settings).unwrap()
    }

    fn big_floor(material: Arc<Material>) -> Triangle {
        Triangle::new(
            Vec3::new(-100.0, 0.0, -100.0),
            Vec3::new(0.0, 0.0, 100.0),
            Vec3::new(100.0, 0.0, -100.0),
            material,
        )
    }

    #[test]
    fn test_background_is_black() {
        let scene = empty_scene(4);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(trace_ray(&scene, &ray, 0), Color::ZERO);
    }

    #[test]
    fn test_depth_limit_returns_black() {
        let mut scene = empty_scene(0);
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, -3.0),
            1.0,
            Arc::new(Material::diffuse(Color::ONE)),
        ));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(trace_ray(&scene, &ray, 0), Color::ZERO);
    }

    #[test]
    fn test_ambient_term() {
        let mut scene = empty_scene(4);
        scene.set_ambient(Color::splat(0.5));

        let material = Arc::new(Material {
            ambient: Color::new(0.2, 0.4, 0.6),
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            ..Default::default()
        });
        scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, material));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = trace_ray(&scene, &ray, 0);
        assert!((color - Color::new(0.1, 0.2, 0.3)).length() < 1e-5);
    }

    #[test]
    fn test_shadow_occlusion() {
        let floor_material = Arc::new(Material {
            ambient: Color::ZERO,
            diffuse: Color::ONE,
            specular: Color::ZERO,
            ..Default::default()
        });

        // Surface point directly below the light, occluder halfway up
        let mut shadowed = empty_scene(4);
        shadowed.add_entity(big_floor(Arc::clone(&floor_material)));
        shadowed.add_entity(Sphere::new(
            Vec3::new(0.0, 2.5, 0.0),
            0.5,
            Arc::new(Material::diffuse(Color::ONE)),
        ));
        shadowed.add_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE));

        let mut lit = empty_scene(4);
        lit.add_entity(big_floor(floor_material));
        lit.add_light(PointLight::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE));

        let ray = Ray::new(Vec3::new(0.0, 1.0, 1.0), Vec3::new(0.0, -1.0, -1.0));

        let dark = trace_ray(&shadowed, &ray, 0);
        assert_eq!(dark, Color::ZERO);

        let bright = trace_ray(&lit, &ray, 0);
        assert!(bright.length() > 0.1);
    }

    #[test]
    fn test_facing_mirrors_terminate_finite() {
        let mirror = Arc::new(Material::mirror());
        let mut scene = empty_scene(8);

        // Two parallel mirror panes either side of the origin
        scene.add_entity(Triangle::new(
            Vec3::new(-50.0, -50.0, -2.0),
            Vec3::new(50.0, -50.0, -2.0),
            Vec3::new(0.0, 50.0, -2.0),
            Arc::clone(&mirror),
        ));
        scene.add_entity(Triangle::new(
            Vec3::new(-50.0, -50.0, 2.0),
            Vec3::new(0.0, 50.0, 2.0),
            Vec3::new(50.0, -50.0, 2.0),
            mirror,
        ));
        scene.set_ambient(Color::splat(0.1));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = trace_ray(&scene, &ray, 0);
        assert!(color.is_finite());
        assert!(!color.is_nan());
    }

    #[test]
    fn test_reflection_sees_the_other_object() {
        let mut scene = empty_scene(4);
        scene.add_entity(Triangle::new(
            Vec3::new(-50.0, -50.0, -2.0),
            Vec3::new(50.0, -50.0, -2.0),
            Vec3::new(0.0, 50.0, -2.0),
            Arc::new(Material::mirror()),
        ));
        // Glowing (high-ambient) sphere behind the camera
        let glow = Arc::new(Material {
            ambient: Color::ONE,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            ..Default::default()
        });
        scene.add_entity(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, glow));
        scene.set_ambient(Color::ONE);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = trace_ray(&scene, &ray, 0);
        // Mirror's own ambient is zero, so everything seen is the
        // reflected sphere
        assert!((color - Color::ONE).length() < 1e-4);
    }

    #[test]
    fn test_refract_normal_incidence_is_undeflected() {
        let d = Vec3::new(0.0, 0.0, -1.0);
        let n = Vec3::new(0.0, 0.0, 1.0);
        for eta in [1.0 / 1.5, 1.5, 1.0] {
            let t = refract(d, n, eta).unwrap();
            assert!((t - d).length() < 1e-6);
        }
    }

    #[test]
    fn test_refract_total_internal_reflection() {
        // 60 degrees incidence from glass to air: sin > 1, no solution
        let d = Vec3::new(3f32.sqrt() / 2.0, -0.5, 0.0).normalize();
        let n = Vec3::Y;
        assert!(refract(d, n, 1.5).is_none());
        // The same geometry entering glass refracts fine
        assert!(refract(d, n, 1.0 / 1.5).is_some());
    }

    #[test]
    fn test_transmissive_sphere_dead_center_passes_straight_through() {
        let mut scene = empty_scene(8);
        scene.add_entity(Sphere::new(
            Vec3::new(0.0, 0.0, -5.0),
            1.0,
            Arc::new(Material::glass(1.5)),
        ));
        // Glowing wall behind the sphere, only reachable straight ahead
        let glow = Arc::new(Material {
            ambient: Color::ONE,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            ..Default::default()
        });
        scene.add_entity(Triangle::new(
            Vec3::new(-0.1, -0.1, -20.0),
            Vec3::new(0.1, -0.1, -20.0),
            Vec3::new(0.0, 0.1, -20.0),
            glow,
        ));
        scene.set_ambient(Color::ONE);

        // Dead-center ray: refraction at both surfaces is at normal
        // incidence, so the ray continues undeflected and reaches the
        // tiny wall
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = trace_ray(&scene, &ray, 0);
        // Two interfaces attenuate by the transmissivity each; faint
        // internal-reflection bounces add a little on top
        let expected = Material::glass(1.5).transmissivity.powi(2);
        assert!((color.x - expected).abs() < 0.05, "got {color:?}");
        assert!(color.x >= expected - 1e-4);
    }

    #[test]
    fn test_reflect_helper() {
        let d = Vec3::new(1.0, -1.0, 0.0).normalize();
        let r = reflect(d, Vec3::Y);
        assert!((r - Vec3::new(1.0, 1.0, 0.0).normalize()).length() < 1e-6);
    }
}

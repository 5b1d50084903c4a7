//! Showcase scene.
//!
//! Renders a small Whitted scene (glass, mirror, and diffuse spheres
//! over a gray floor, lit by a ceiling panel) and saves it as a PNG.

use anyhow::Context;
use glam::Quat;
use lux_renderer::{
    AreaLight, Camera, Color, Film, Material, Mesh, PointLight, RenderSettings, Scene, Sphere,
    TriangleMesh, Vec3,
};
use std::sync::Arc;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let camera = Camera::new(Vec3::new(0.0, 1.5, 6.0), Quat::IDENTITY).with_lens(0.05, 6.0);

    let settings = RenderSettings {
        aa_multiplier: 2,
        dof_samples: 2,
        ..Default::default()
    };

    let mut scene = Scene::new(camera, settings)?;
    scene.set_ambient(Color::splat(0.4));
    build_scene(&mut scene);

    let mut film = Film::new(800, 450);

    let start = std::time::Instant::now();
    scene.render(&mut film, 0.0);
    println!("Rendered in {:?}", start.elapsed());

    let filename = "showcase.png";
    image::RgbaImage::from_raw(film.width(), film.height(), film.to_rgba8())
        .context("film buffer size mismatch")?
        .save(filename)
        .with_context(|| format!("failed to save {filename}"))?;
    println!("Saved to {filename}");

    Ok(())
}

fn build_scene(scene: &mut Scene) {
    // Floor: a big quad, exercising the mesh + BVH path
    let floor = Mesh::new(
        vec![
            Vec3::new(-20.0, 0.0, -20.0),
            Vec3::new(-20.0, 0.0, 20.0),
            Vec3::new(20.0, 0.0, 20.0),
            Vec3::new(20.0, 0.0, -20.0),
        ],
        vec![0, 1, 2, 0, 2, 3],
        None,
    );
    scene.add_entity(TriangleMesh::from_mesh(
        &floor,
        Arc::new(Material::diffuse(Color::splat(0.6))),
        Default::default(),
    ));

    scene.add_entity(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::glass(1.5)),
    ));
    scene.add_entity(Sphere::new(
        Vec3::new(-2.5, 1.0, -1.0),
        1.0,
        Arc::new(Material::diffuse(Color::new(0.7, 0.25, 0.2))),
    ));
    scene.add_entity(Sphere::new(
        Vec3::new(2.5, 1.0, -1.0),
        1.0,
        Arc::new(Material::mirror()),
    ));

    scene.add_area_light(AreaLight::new(
        Vec3::new(-1.5, 6.0, -1.5),
        Vec3::new(3.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 3.0),
        Color::splat(0.9),
    ));
    scene.add_light(PointLight::new(
        Vec3::new(-6.0, 4.0, 5.0),
        Color::splat(0.35),
    ));
}

//! Phong surface materials.

use lux_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (linear RGB, values typically 0-1 but unclamped)
pub type Color = Vec3;

/// Surface shading parameters for the Whitted shader.
///
/// Materials are immutable and shared by reference (`Arc`) across the
/// triangles and primitives that use them. `reflectivity` and
/// `transmissivity` are independent weights; they are not required to
/// sum to one or less.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Ambient response color, modulated by the scene's ambient light
    pub ambient: Color,
    /// Lambertian diffuse color
    pub diffuse: Color,
    /// Specular highlight color
    pub specular: Color,
    /// Phong shininess exponent
    pub shininess: f32,
    /// Mirror reflection weight in [0, 1]
    pub reflectivity: f32,
    /// Transmission weight in [0, 1]
    pub transmissivity: f32,
    /// Refractive index (> 0; 1.0 = air, 1.5 = glass)
    pub ior: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::splat(0.1),
            diffuse: Color::splat(0.7),
            specular: Color::splat(0.2),
            shininess: 16.0,
            reflectivity: 0.0,
            transmissivity: 0.0,
            ior: 1.0,
        }
    }
}

impl Material {
    /// A plain diffuse material with matching ambient response.
    pub fn diffuse(color: Color) -> Self {
        Self {
            ambient: color * 0.1,
            diffuse: color,
            ..Default::default()
        }
    }

    /// A perfect mirror.
    pub fn mirror() -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ONE,
            shininess: 64.0,
            reflectivity: 1.0,
            ..Default::default()
        }
    }

    /// A clear transmissive material with the given refractive index.
    pub fn glass(ior: f32) -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ONE,
            shininess: 64.0,
            reflectivity: 0.1,
            transmissivity: 0.9,
            ior,
        }
    }

    /// Whether the reflection recursion fires for this material.
    pub fn is_reflective(&self) -> bool {
        self.reflectivity > 0.0
    }

    /// Whether the refraction recursion fires for this material.
    pub fn is_transmissive(&self) -> bool {
        self.transmissivity > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material_is_opaque() {
        let m = Material::default();
        assert!(!m.is_reflective());
        assert!(!m.is_transmissive());
    }

    #[test]
    fn test_glass_recurses_both_ways() {
        let m = Material::glass(1.5);
        assert!(m.is_reflective());
        assert!(m.is_transmissive());
        assert_eq!(m.ior, 1.5);
    }
}

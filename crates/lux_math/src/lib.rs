// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod ray;

pub use aabb::Aabb;
pub use ray::Ray;

/// Minimum ray parameter accepted by intersection tests.
///
/// Guards against self-intersection when a secondary ray starts on the
/// surface it was spawned from.
pub const RAY_EPSILON: f32 = 1e-4;

/// Below this |normal . direction| a ray counts as parallel to a plane.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Tolerance for barycentric inside/outside classification.
pub const BARY_EPSILON: f32 = 1e-5;

/// Tolerance on the three barycentric components summing to one.
pub const BARY_SUM_EPSILON: f32 = 1e-3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_quat_rotation() {
        let q = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let v = q * Vec3::X;
        assert!((v - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-6);
    }
}

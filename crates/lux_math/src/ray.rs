use crate::Vec3;

/// A half-line in 3D space.
///
/// Not every producer hands us a unit direction, so `new` normalizes it;
/// every consumer may rely on `direction` being unit length. A degenerate
/// zero direction is kept as zero and resolves to "hits nothing".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray with a normalized direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

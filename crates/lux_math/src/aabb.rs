use crate::{Ray, Vec3, RAY_EPSILON};

/// Minimum per-axis thickness of a constructed box. A box flat on an
/// axis would give that slab an empty parameter interval and the test
/// would miss everything lying in its plane.
const MIN_THICKNESS: f32 = 1e-4;

/// Axis-aligned bounding box, defined by component-wise lower and upper
/// corner points. `min < max` holds per axis for any box built through
/// the constructors below; flat inputs are padded to `MIN_THICKNESS`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corner points (in any order).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
        .pad_to_minimums()
    }

    /// AABB over a triangle's three vertices, padded on any flat axis.
    pub fn from_triangle(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self {
            min: v0.min(v1).min(v2),
            max: v0.max(v1).max(v2),
        }
        .pad_to_minimums()
    }

    /// Expand any axis thinner than `MIN_THICKNESS` so axis-aligned
    /// geometry still has a nonempty slab interval.
    fn pad_to_minimums(mut self) -> Self {
        let delta = MIN_THICKNESS / 2.0;
        for axis in 0..3 {
            if self.max[axis] - self.min[axis] < MIN_THICKNESS {
                self.min[axis] -= delta;
                self.max[axis] += delta;
            }
        }
        self
    }

    /// Smallest AABB containing both inputs.
    pub fn union(a: &Aabb, b: &Aabb) -> Self {
        Self {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Grow the box to contain a single point.
    pub fn point_union(&self, p: Vec3) -> Self {
        Self {
            min: self.min.min(p),
            max: self.max.max(p),
        }
    }

    /// Center point of the box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Index (0=X, 1=Y, 2=Z) of the axis with the largest extent.
    pub fn longest_axis(&self) -> usize {
        let size = self.max - self.min;
        if size.x > size.y && size.x > size.z {
            0
        } else if size.y > size.z {
            1
        } else {
            2
        }
    }

    /// Slab-method ray/box test over the parameter range
    /// `[RAY_EPSILON, +inf)`.
    ///
    /// A zero direction component makes the reciprocal infinite: the slab
    /// parameters come out as same-signed infinities when the origin lies
    /// outside that slab (a miss) and as `(-inf, +inf)` when it lies
    /// inside (always within). An origin exactly on a slab boundary
    /// produces `0 * inf = NaN`, which `f32::max`/`f32::min` ignore, so
    /// that boundary counts as inside. No NaN ever escapes this function.
    pub fn intersects(&self, ray: &Ray) -> bool {
        let mut t_min = RAY_EPSILON;
        let mut t_max = f32::INFINITY;

        // X axis
        let inv = 1.0 / ray.direction.x;
        let mut t0 = (self.min.x - ray.origin.x) * inv;
        let mut t1 = (self.max.x - ray.origin.x) * inv;
        if inv < 0.0 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t0.max(t_min);
        t_max = t1.min(t_max);
        if t_max <= t_min {
            return false;
        }

        // Y axis
        let inv = 1.0 / ray.direction.y;
        let mut t0 = (self.min.y - ray.origin.y) * inv;
        let mut t1 = (self.max.y - ray.origin.y) * inv;
        if inv < 0.0 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t0.max(t_min);
        t_max = t1.min(t_max);
        if t_max <= t_min {
            return false;
        }

        // Z axis
        let inv = 1.0 / ray.direction.z;
        let mut t0 = (self.min.z - ray.origin.z) * inv;
        let mut t1 = (self.max.z - ray.origin.z) * inv;
        if inv < 0.0 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t0.max(t_min);
        t_max = t1.min(t_max);

        t_max > t_min
    }

    /// Whether a point lies inside the box (boundary inclusive).
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// An empty box: union with it is the identity.
    pub const EMPTY: Aabb = Aabb {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };
}

use crate::{Interval, Ray, Vec3};

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// Stored as a center point plus non-negative half-extents along each axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    /// Create an AABB from its center and half-extents.
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Create an AABB from two corner points (in any order).
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self {
            center: (min + max) * 0.5,
            half_extents: (max - min) * 0.5,
        }
    }

    /// Minimum corner.
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    /// Maximum corner.
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self::from_points(box0.min().min(box1.min()), box0.max().max(box1.max()))
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Uses the slab method. Axis-parallel rays produce infinite slab
    /// distances, which the min/max comparisons handle correctly.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let min = self.min();
        let max = self.max();

        for axis in 0..3 {
            let adinv = 1.0 / r.direction[axis];
            let mut t0 = (min[axis] - r.origin[axis]) * adinv;
            let mut t1 = (max[axis] - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }
}

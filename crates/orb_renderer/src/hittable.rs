//! Hittable trait and HitRecord for ray-object intersection.

use orb_math::{Aabb, Interval, Ray, Vec2, Vec3};

/// Smallest ray parameter accepted for secondary and shadow rays.
///
/// Keeps a ray leaving a surface from re-hitting that surface at t ~ 0
/// ("shadow acne").
pub const RAY_T_MIN: f32 = 1e-3;

/// Handle to a material in the scene's material pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub usize);

/// Record of a ray-object intersection.
///
/// Lives for one scatter step. The normal is the geometric outward normal
/// and is *not* flipped toward the ray; use [`HitRecord::front_face`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub p: Vec3,
    /// Unit outward surface normal
    pub normal: Vec3,
    /// Surface texture coordinate
    pub uv: Vec2,
    /// Material at the intersection point
    pub material: MaterialId,
    /// Index of the primitive that was hit
    pub primitive: usize,
}

impl HitRecord {
    /// Whether the ray arrived from the side the normal points to.
    #[inline]
    pub fn front_face(&self, ray: &Ray) -> bool {
        ray.direction.dot(self.normal) < 0.0
    }

    /// Keep whichever of two optional hits is closer.
    pub fn closer(a: Option<HitRecord>, b: Option<HitRecord>) -> Option<HitRecord> {
        match (a, b) {
            (Some(a), Some(b)) => Some(if b.t < a.t { b } else { a }),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Closest intersection with parameter strictly inside `ray_t`.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// Get the axis-aligned bounding box of this object.
    fn bounding_box(&self) -> Aabb;
}

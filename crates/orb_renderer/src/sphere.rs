//! Sphere primitive for ray tracing.

use crate::hittable::{HitRecord, Hittable, MaterialId};
use orb_math::{Aabb, Interval, Ray, Vec2, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: MaterialId,
    /// Position of this sphere in the scene's primitive list.
    index: usize,
    bbox: Aabb,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// The radius is expected to be positive; the scene builder rejects
    /// anything else before a sphere is constructed.
    pub fn new(center: Vec3, radius: f32, material: MaterialId, index: usize) -> Self {
        let bbox = Aabb::new(center, Vec3::splat(radius));

        Self {
            center,
            radius,
            material,
            index,
            bbox,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> MaterialId {
        self.material
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// UV for a point on the unit sphere: x and z remapped from [-1, 1]
    /// to [0, 1], y treated as up.
    #[inline]
    fn get_sphere_uv(n: Vec3) -> Vec2 {
        Vec2::new(0.5 * n.x + 0.5, 0.5 * n.z + 0.5)
    }

    fn record(&self, ray: &Ray, t: f32) -> HitRecord {
        let p = ray.at(t);
        let normal = (p - self.center).normalize();

        HitRecord {
            t,
            p,
            normal,
            uv: Self::get_sphere_uv(normal),
            material: self.material,
            primitive: self.index,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // a t^2 + 2 b t + c = 0
        let oc = ray.origin - self.center;
        let a = ray.direction.length_squared();
        let b = oc.dot(ray.direction);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = b * b - a * c;

        // Tangent rays and NaN both miss
        if !(discriminant > 0.0) || !(a > 0.0) {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (-b - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (-b + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        Some(self.record(ray, root))
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

//! Direct illumination from analytic lights.
//!
//! Lights take the BVH explicitly when shading so that the occlusion
//! query is visible in the signature rather than captured in a closure.

use crate::bvh::Bvh;
use crate::hittable::{HitRecord, RAY_T_MIN};
use crate::material::{tangent_frame, Material};
use crate::sampler::{halton_disk, SampleCounter};
use orb_math::{Color, Interval, Ray, Vec3};

#[derive(Debug)]
pub enum Light {
    Directional(DirectionalLight),
}

impl Light {
    pub fn directional(direction: Vec3, color: Color, luminance: f32) -> Self {
        Light::Directional(DirectionalLight::new(direction, color, luminance))
    }

    /// Outgoing radiance toward `view_origin` due to this light.
    pub fn shade(&self, bvh: &Bvh, material: &Material, rec: &HitRecord, view_origin: Vec3) -> Color {
        match self {
            Light::Directional(light) => light.shade(bvh, material, rec, view_origin),
        }
    }
}

/// Light arriving from a fixed direction, like the sun.
#[derive(Debug)]
pub struct DirectionalLight {
    /// Unit vector pointing toward the light
    direction: Vec3,
    color: Color,
    luminance: f32,
    /// Half-angle of the light's disk in radians; 0 gives hard shadows
    angular_radius: f32,
    samples: SampleCounter,
}

impl DirectionalLight {
    pub fn new(direction: Vec3, color: Color, luminance: f32) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            luminance,
            angular_radius: 0.0,
            samples: SampleCounter::default(),
        }
    }

    /// Give the light an apparent size, softening its shadows.
    pub fn with_angular_radius(mut self, radians: f32) -> Self {
        self.angular_radius = radians.max(0.0);
        self
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Direction of the shadow ray for this sample.
    fn sample_direction(&self) -> Vec3 {
        if self.angular_radius <= 0.0 {
            return self.direction;
        }

        let disk = halton_disk(self.samples.next(), 2, 3) * self.angular_radius.tan();
        let (b1, b2) = tangent_frame(self.direction);
        (self.direction + disk.x * b1 + disk.y * b2).normalize()
    }

    pub fn shade(&self, bvh: &Bvh, material: &Material, rec: &HitRecord, view_origin: Vec3) -> Color {
        let Some(surface) = material.surface(rec.uv) else {
            return Color::ZERO;
        };

        let l = self.sample_direction();
        let n_dot_l = rec.normal.dot(l);
        if n_dot_l <= 0.0 {
            return Color::ZERO;
        }

        // Hard visibility test: any hit toward the light blocks it
        let shadow_ray = Ray::new(rec.p, l);
        if bvh.occluded(&shadow_ray, Interval::from_min(RAY_T_MIN)) {
            return Color::ZERO;
        }

        let irradiance = self.luminance * self.color * n_dot_l;

        let v = (view_origin - rec.p).normalize_or_zero();
        let h = (l + v).normalize_or_zero();
        let n_dot_h = rec.normal.dot(h).max(0.0);
        let l_dot_h = l.dot(h).max(0.0);

        let fresnel = schlick(surface.specular, l_dot_h);
        let lobe = (surface.smoothness + 8.0) / 8.0 * n_dot_h.powf(surface.smoothness);
        let brdf = surface.albedo * (Color::ONE - fresnel) + fresnel * lobe;

        irradiance * brdf
    }
}

/// Schlick's approximation of Fresnel reflectance.
#[inline]
pub fn schlick(f0: Color, cos_theta: f32) -> Color {
    f0 + (Color::ONE - f0) * (1.0 - cos_theta.clamp(0.0, 1.0)).powi(5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bvh::SplitAxis;
    use crate::hittable::{Hittable, MaterialId};
    use crate::Sphere;
    use orb_math::Vec2;

    fn ground_hit(bvh: &Bvh) -> HitRecord {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 0.0), -Vec3::Y);
        bvh.hit(&ray, Interval::from_min(RAY_T_MIN)).unwrap()
    }

    fn single_sphere() -> Bvh {
        // Top of this sphere sits at the origin
        let ground = Sphere::new(Vec3::new(0.0, -100.0, 0.0), 100.0, MaterialId(0), 0);
        Bvh::build(vec![ground], SplitAxis::RoundRobin).unwrap()
    }

    #[test]
    fn test_schlick_limits() {
        let f0 = Color::splat(0.04);
        assert!((schlick(f0, 1.0) - f0).length() < 1e-6);
        assert!((schlick(f0, 0.0) - Color::ONE).length() < 1e-6);
    }

    #[test]
    fn test_unoccluded_diffuse_light() {
        let bvh = single_sphere();
        let rec = ground_hit(&bvh);
        let material = Material::opaque(Color::new(0.5, 0.5, 0.5), 16.0);
        let light = Light::directional(Vec3::Y, Color::ONE, 2.0);

        let radiance = light.shade(&bvh, &material, &rec, Vec3::new(3.0, 4.0, 0.0));
        assert!(radiance.min_element() > 0.0);
        // Diffuse part alone: 2 * 0.5 * (1 - F)
        assert!(radiance.x > 0.9 && radiance.x < 1.5, "radiance {radiance:?}");
    }

    #[test]
    fn test_light_below_horizon_contributes_nothing() {
        let bvh = single_sphere();
        let rec = ground_hit(&bvh);
        let material = Material::opaque(Color::ONE, 16.0);
        let light = Light::directional(-Vec3::Y, Color::ONE, 100.0);

        assert_eq!(light.shade(&bvh, &material, &rec, Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_occluder_casts_hard_shadow() {
        let ground = Sphere::new(Vec3::new(0.0, -100.0, 0.0), 100.0, MaterialId(0), 0);
        let blocker = Sphere::new(Vec3::new(0.0, 10.0, 0.0), 1.0, MaterialId(1), 1);
        let bvh = Bvh::build(vec![ground, blocker], SplitAxis::RoundRobin).unwrap();

        let rec = HitRecord {
            t: 1.0,
            p: Vec3::ZERO,
            normal: Vec3::Y,
            uv: Vec2::splat(0.5),
            material: MaterialId(0),
            primitive: 0,
        };
        let material = Material::opaque(Color::ONE, 16.0);

        let overhead = Light::directional(Vec3::Y, Color::ONE, 100.0);
        assert_eq!(overhead.shade(&bvh, &material, &rec, Vec3::new(0.0, 1.0, 5.0)), Color::ZERO);

        let slanted = Light::directional(Vec3::new(1.0, 1.0, 0.0), Color::ONE, 100.0);
        assert!(slanted.shade(&bvh, &material, &rec, Vec3::new(0.0, 1.0, 5.0)).x > 0.0);
    }

    #[test]
    fn test_emissive_surfaces_are_not_lit() {
        let bvh = single_sphere();
        let rec = ground_hit(&bvh);
        let material = Material::emissive(1.0, Color::ONE);
        let light = Light::directional(Vec3::Y, Color::ONE, 100.0);

        assert_eq!(light.shade(&bvh, &material, &rec, Vec3::Y), Color::ZERO);
    }

    #[test]
    fn test_specular_highlight_peaks_at_mirror_direction() {
        let bvh = single_sphere();
        let rec = ground_hit(&bvh);
        let material = Material::metal(Color::splat(0.9), 64.0);
        let light = Light::directional(Vec3::new(1.0, 1.0, 0.0), Color::ONE, 1.0);

        let mirror = light.shade(&bvh, &material, &rec, Vec3::new(-5.0, 5.0, 0.0));
        let off_axis = light.shade(&bvh, &material, &rec, Vec3::new(5.0, 5.0, 0.0));
        assert!(mirror.x > off_axis.x * 10.0, "mirror {mirror:?} off-axis {off_axis:?}");
    }

    #[test]
    fn test_soft_shadow_directions_stay_in_cone() {
        let light = DirectionalLight::new(Vec3::new(0.0, 1.0, 1.0), Color::ONE, 1.0)
            .with_angular_radius(0.1);

        for _ in 0..200 {
            let d = light.sample_direction();
            assert!((d.length() - 1.0).abs() < 1e-5);
            assert!(d.dot(light.direction()) >= 0.1f32.cos() - 1e-5);
        }
    }
}

//! Recursive path integrator.
//!
//! Radiance at a hit is its emission, plus direct light from every light,
//! plus the attenuated radiance of one scattered path. Paths end when a
//! ray escapes to the sky, a material absorbs it, or the depth limit is hit.
//! There is no Russian roulette, so a shallow depth limit darkens scenes
//! dominated by mirrors and glass.

use crate::scene::Scene;
use orb_math::{Color, Ray, Vec2, Vec3};

/// Depth-limited path tracer over a [`Scene`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathIntegrator {
    max_depth: u32,
    /// Viewer position used for the specular term of direct lighting
    view_origin: Vec3,
}

impl PathIntegrator {
    pub fn new(max_depth: u32, view_origin: Vec3) -> Self {
        Self {
            max_depth,
            view_origin,
        }
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Radiance carried back along `ray`.
    ///
    /// `depth` counts bounces already taken; primary rays pass 0.
    pub fn ray_color(&self, scene: &Scene, ray: &Ray, depth: u32) -> Color {
        let Some(rec) = scene.closest_hit(ray) else {
            return scene.sky().emit(Vec2::ZERO);
        };

        let material = scene.material(rec.material);
        let emitted = material.emit(rec.uv);
        let direct = material.shade(&rec, scene.lights(), scene.bvh(), self.view_origin);

        // Scatter before the depth check so sample counters advance on every hit
        let indirect = match material.scatter(ray, &rec) {
            Some(result) if depth < self.max_depth => {
                result.attenuation * self.ray_color(scene, &result.scattered, depth + 1)
            }
            _ => Color::ZERO,
        };

        emitted + direct + indirect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::Light;
    use crate::material::Material;
    use crate::scene::SceneBuilder;

    fn mirror_box_scene(sky: Color) -> Scene {
        let mut builder = SceneBuilder::new();
        builder
            .add_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, Material::metal(Color::splat(0.5), 0.0))
            .unwrap();
        builder.sky(Material::emissive(1.0, sky));
        builder.build().unwrap()
    }

    #[test]
    fn test_miss_returns_sky() {
        let scene = mirror_box_scene(Color::new(0.2, 0.4, 0.8));
        let integrator = PathIntegrator::new(50, Vec3::ZERO);

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        assert_eq!(integrator.ray_color(&scene, &ray, 0), Color::new(0.2, 0.4, 0.8));
    }

    #[test]
    fn test_mirror_attenuates_sky() {
        let scene = mirror_box_scene(Color::ONE);
        let integrator = PathIntegrator::new(50, Vec3::ZERO);

        // Straight back off the mirror into the sky at half strength
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let color = integrator.ray_color(&scene, &ray, 0);
        assert!((color - Color::splat(0.5)).length() < 1e-5, "color {color:?}");
    }

    #[test]
    fn test_depth_limit_stops_recursion() {
        let scene = mirror_box_scene(Color::ONE);
        let integrator = PathIntegrator::new(1, Vec3::ZERO);

        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(integrator.ray_color(&scene, &ray, 0).x > 0.0);
        assert_eq!(integrator.ray_color(&scene, &ray, 1), Color::ZERO);
    }

    #[test]
    fn test_emissive_sphere_adds_its_emission() {
        let mut builder = SceneBuilder::new();
        builder
            .add_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, Material::emissive(3.0, Color::ONE))
            .unwrap();
        let scene = builder.build().unwrap();
        let integrator = PathIntegrator::new(50, Vec3::ZERO);

        let color = integrator.ray_color(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z), 0);
        assert_eq!(color, Color::splat(3.0));
    }

    #[test]
    fn test_direct_light_reaches_diffuse_surface() {
        let mut builder = SceneBuilder::new();
        builder
            .add_sphere(Vec3::new(0.0, 0.0, -3.0), 1.0, Material::opaque(Color::splat(0.5), 8.0))
            .unwrap();
        builder.add_light(Light::directional(Vec3::Z, Color::ONE, 1.0));
        let scene = builder.build().unwrap();
        let integrator = PathIntegrator::new(4, Vec3::ZERO);

        // Black sky: only the light can contribute
        let color = integrator.ray_color(&scene, &Ray::new(Vec3::ZERO, -Vec3::Z), 0);
        assert!(color.x > 0.4, "color {color:?}");
    }
}

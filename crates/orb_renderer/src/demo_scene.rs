//! The default scene: a field of small random spheres around three large ones.

use crate::bvh::SplitAxis;
use crate::error::RenderResult;
use crate::light::Light;
use crate::material::Material;
use crate::scene::{Scene, SceneBuilder};
use crate::texture::Texture;
use orb_math::{Color, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 0x5eed;

/// Exposure (in stops) that brings the sky and sun into display range.
pub const DEMO_EXPOSURE: f32 = -15.0;

const SKY_LUMINANCE: f32 = 8000.0;
const SUN_LUMINANCE: f32 = 40000.0;
const SMALL_RADIUS: f32 = 0.2;

/// Build the demo scene. The same seed always yields the same scene.
pub fn demo_scene(seed: u64, split: SplitAxis) -> RenderResult<Scene> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut builder = SceneBuilder::new();
    builder.split(split);

    // Ground
    let checker = Texture::checker(Color::new(0.9, 0.9, 0.9), Color::new(0.2, 0.3, 0.1), 2500.0);
    builder.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, Material::opaque(checker, 16.0))?;

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f32 = rng.gen();
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                SMALL_RADIUS,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );

            let material = if choose_mat < 0.8 {
                let albedo = Color::new(
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                    rng.gen::<f32>() * rng.gen::<f32>(),
                );
                Material::opaque(albedo, 8.0 * (4.0 + rng.gen::<f32>()))
            } else if choose_mat < 0.95 {
                let reflectance = Color::new(
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                    0.5 * (1.0 + rng.gen::<f32>()),
                );
                Material::metal(reflectance, 0.0)
            } else {
                Material::transparent(1.5, 8.0 * (4.0 + rng.gen::<f32>()))
            };

            builder.add_sphere(center, SMALL_RADIUS, material)?;
        }
    }

    builder.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, Material::transparent(1.5, 16.0))?;
    builder.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, Material::opaque(Color::new(0.4, 0.2, 0.1), 16.0))?;
    builder.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, Material::metal(Color::new(0.7, 0.6, 0.5), 0.0))?;

    builder
        .sky(Material::emissive(SKY_LUMINANCE, Color::new(0.85, 0.91, 0.98)))
        .add_light(Light::directional(
            Vec3::new(1.0, 1.0, 1.0),
            Color::new(1.0, 0.97, 0.88),
            SUN_LUMINANCE,
        ));

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use orb_math::Ray;

    #[test]
    fn test_demo_scene_layout() {
        let scene = demo_scene(DEFAULT_SEED, SplitAxis::RoundRobin).unwrap();

        // Ground, 22x22 grid, three large spheres
        assert_eq!(scene.sphere_count(), 1 + 22 * 22 + 3);
        assert_eq!(scene.lights().len(), 1);
        assert!(scene.sky().is_emissive());
        assert_eq!(scene.bvh().node_count(), 2 * scene.sphere_count() - 1);
    }

    #[test]
    fn test_same_seed_same_scene() {
        let a = demo_scene(42, SplitAxis::RoundRobin).unwrap();
        let b = demo_scene(42, SplitAxis::RoundRobin).unwrap();
        let c = demo_scene(43, SplitAxis::RoundRobin).unwrap();

        assert_eq!(a.bvh().primitives(), b.bvh().primitives());
        assert_ne!(a.bvh().primitives(), c.bvh().primitives());
    }

    #[test]
    fn test_ground_is_below_everything() {
        let scene = demo_scene(DEFAULT_SEED, SplitAxis::Random { seed: 1 }).unwrap();

        let down = Ray::new(Vec3::new(0.5, 50.0, 30.0), -Vec3::Y);
        let rec = scene.closest_hit(&down).unwrap();
        assert_eq!(rec.primitive, 0);
        assert!(rec.p.y < 0.0 && rec.p.y > -0.5);

        let up = Ray::new(Vec3::new(0.0, 5.0, 0.0), Vec3::Y);
        assert!(scene.bvh().hit(&up, orb_math::Interval::from_min(1e-3)).is_none());
    }
}

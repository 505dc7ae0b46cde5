//! Scene description: spheres in a BVH, the material pool, lights and sky.

use crate::bvh::{Bvh, SplitAxis};
use crate::error::{RenderError, RenderResult};
use crate::hittable::{HitRecord, Hittable, MaterialId, RAY_T_MIN};
use crate::light::Light;
use crate::material::Material;
use crate::sphere::Sphere;
use orb_math::{Color, Interval, Ray, Vec3};

/// Collects spheres, lights and the sky before building the BVH.
#[derive(Debug)]
pub struct SceneBuilder {
    spheres: Vec<Sphere>,
    materials: Vec<Material>,
    lights: Vec<Light>,
    sky: Material,
    split: SplitAxis,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self {
            spheres: Vec::new(),
            materials: Vec::new(),
            lights: Vec::new(),
            sky: Material::emissive(0.0, Color::ZERO),
            split: SplitAxis::default(),
        }
    }

    /// Add a sphere that owns `material`. Returns the sphere's index.
    pub fn add_sphere(&mut self, center: Vec3, radius: f32, material: Material) -> RenderResult<usize> {
        let index = self.spheres.len();
        if !(radius > 0.0) || !radius.is_finite() || !center.is_finite() {
            return Err(RenderError::InvalidSphere { index, radius });
        }

        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        self.spheres.push(Sphere::new(center, radius, id, index));
        Ok(index)
    }

    pub fn add_light(&mut self, light: Light) -> &mut Self {
        self.lights.push(light);
        self
    }

    /// Material returned for rays that escape the scene. Expected to be emissive.
    pub fn sky(&mut self, sky: Material) -> &mut Self {
        if !sky.is_emissive() {
            log::warn!("sky material is not emissive, escaping rays will be black");
        }
        self.sky = sky;
        self
    }

    pub fn split(&mut self, split: SplitAxis) -> &mut Self {
        self.split = split;
        self
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn build(self) -> RenderResult<Scene> {
        let bvh = Bvh::build(self.spheres, self.split)?;

        log::info!(
            "Scene built: {} spheres, {} lights, BVH {} nodes, depth {}",
            bvh.primitives().len(),
            self.lights.len(),
            bvh.node_count(),
            bvh.depth()
        );

        Ok(Scene {
            bvh,
            materials: self.materials,
            lights: self.lights,
            sky: self.sky,
        })
    }
}

/// An immutable, shareable scene.
///
/// Only the sample counters inside materials and lights change while
/// rendering, and those are atomic.
#[derive(Debug)]
pub struct Scene {
    bvh: Bvh,
    materials: Vec<Material>,
    lights: Vec<Light>,
    sky: Material,
}

impl Scene {
    /// Closest intersection along `ray`, skipping the self-intersection bias.
    pub fn closest_hit(&self, ray: &Ray) -> Option<HitRecord> {
        self.bvh.hit(ray, Interval::from_min(RAY_T_MIN))
    }

    pub fn occluded(&self, ray: &Ray) -> bool {
        self.bvh.occluded(ray, Interval::from_min(RAY_T_MIN))
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn bvh(&self) -> &Bvh {
        &self.bvh
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn sky(&self) -> &Material {
        &self.sky
    }

    pub fn sphere_count(&self) -> usize {
        self.bvh.primitives().len()
    }
}

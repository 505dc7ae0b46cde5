//! Orb renderer - progressive CPU path tracing for sphere scenes.
//!
//! Spheres live in a BVH; materials scatter with Halton low-discrepancy
//! samples drawn from per-material atomic counters, and a frame driver
//! accumulates one sample per pixel per call before tonemapping.

mod bvh;
mod camera;
mod config;
mod demo_scene;
mod error;
mod film;
mod hittable;
mod integrator;
mod light;
mod material;
mod renderer;
mod sampler;
mod scene;
mod sphere;
mod texture;

pub use bvh::{closest_hit_linear, Bvh, BvhNode, SplitAxis};
pub use camera::Camera;
pub use config::{BvhConfig, CameraConfig, RenderConfig};
pub use demo_scene::{demo_scene, DEFAULT_SEED, DEMO_EXPOSURE};
pub use error::{RenderError, RenderResult};
pub use film::{aces_tonemap, gamma_encode, pack_argb, to_display, unpack_rgba, Film};
pub use hittable::{HitRecord, Hittable, MaterialId, RAY_T_MIN};
pub use integrator::PathIntegrator;
pub use light::{schlick, DirectionalLight, Light};
pub use material::{
    fresnel, normal_reflectance, reflect, refract, tangent_frame, Emissive, Material, Metal,
    OpaqueDielectric, ScatterResult, SurfaceResponse, TransparentDielectric, OPAQUE_FRESNEL_IOR,
};
pub use renderer::{Frame, Renderer};
pub use sampler::{halton, halton_2d, halton_disk, halton_hemisphere, SampleCounter};
pub use scene::{Scene, SceneBuilder};
pub use sphere::Sphere;
pub use texture::Texture;

/// Re-export the math types used throughout the public API.
pub use orb_math::{Aabb, Color, Interval, Ray, Vec2, Vec3};

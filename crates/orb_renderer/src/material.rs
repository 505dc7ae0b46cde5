//! Materials describing how light interacts with surfaces.
//!
//! A material is a closed set of variants dispatched by `match`. Scattering
//! variants own [`SampleCounter`]s so that successive calls draw successive
//! Halton samples. The counters are the only mutable state in a material;
//! they are atomics so one material can be shared by every render thread.

use crate::bvh::Bvh;
use crate::hittable::HitRecord;
use crate::light::Light;
use crate::sampler::{halton, halton_hemisphere, SampleCounter};
use crate::texture::Texture;
use orb_math::{Color, Ray, Vec2, Vec3};

/// Index of refraction used for the reflect-or-diffuse decision of
/// [`OpaqueDielectric`], independent of any visual IOR.
pub const OPAQUE_FRESNEL_IOR: f32 = 1.3;

/// Halton bases used by the scattering variants.
const OPAQUE_REFLECT_BASE: u32 = 3;
const OPAQUE_DIFFUSE_BASES: (u32, u32) = (5, 7);
const TRANSPARENT_BASE: u32 = 7;

/// Outcome of a successful scatter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterResult {
    pub attenuation: Color,
    pub scattered: Ray,
}

/// Surface terms consumed by direct lighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceResponse {
    /// Diffuse albedo
    pub albedo: Color,
    /// Specular reflectance at normal incidence (Schlick F0)
    pub specular: Color,
    /// Specular exponent; higher is tighter
    pub smoothness: f32,
}

/// Pure specular reflector.
#[derive(Debug)]
pub struct Metal {
    reflectance: Texture,
    smoothness: f32,
}

/// Diffuse base with a Fresnel-weighted specular coat.
#[derive(Debug)]
pub struct OpaqueDielectric {
    albedo: Texture,
    smoothness: f32,
    reflection_samples: SampleCounter,
    diffuse_samples: SampleCounter,
}

/// Clear refractive glass.
#[derive(Debug)]
pub struct TransparentDielectric {
    ior: f32,
    smoothness: f32,
    samples: SampleCounter,
}

/// Light source surface; also used for the sky.
#[derive(Debug)]
pub struct Emissive {
    luminance: f32,
    color: Texture,
}

#[derive(Debug)]
pub enum Material {
    Metal(Metal),
    Opaque(OpaqueDielectric),
    Transparent(TransparentDielectric),
    Emissive(Emissive),
}

impl Material {
    pub fn metal(reflectance: impl Into<Texture>, smoothness: f32) -> Self {
        Material::Metal(Metal {
            reflectance: reflectance.into(),
            smoothness,
        })
    }

    pub fn opaque(albedo: impl Into<Texture>, smoothness: f32) -> Self {
        Material::Opaque(OpaqueDielectric {
            albedo: albedo.into(),
            smoothness,
            reflection_samples: SampleCounter::default(),
            diffuse_samples: SampleCounter::default(),
        })
    }

    pub fn transparent(ior: f32, smoothness: f32) -> Self {
        Material::Transparent(TransparentDielectric {
            ior,
            smoothness,
            samples: SampleCounter::default(),
        })
    }

    /// Emits `luminance * color(uv)`.
    pub fn emissive(luminance: f32, color: impl Into<Texture>) -> Self {
        Material::Emissive(Emissive {
            luminance,
            color: color.into(),
        })
    }

    /// Scatter an incoming ray.
    ///
    /// Returns `None` when the ray is absorbed. Each sample counter of the
    /// material advances exactly once per call, whichever branch is taken.
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord) -> Option<ScatterResult> {
        match self {
            Material::Metal(m) => m.scatter(ray_in, rec),
            Material::Opaque(m) => m.scatter(ray_in, rec),
            Material::Transparent(m) => m.scatter(ray_in, rec),
            Material::Emissive(_) => None,
        }
    }

    /// Radiance emitted at `uv`. Black for everything but [`Emissive`].
    pub fn emit(&self, uv: Vec2) -> Color {
        match self {
            Material::Emissive(e) => e.luminance * e.color.evaluate(uv),
            _ => Color::ZERO,
        }
    }

    /// Terms for direct lighting, or `None` if the surface is not lit.
    pub fn surface(&self, uv: Vec2) -> Option<SurfaceResponse> {
        match self {
            Material::Metal(m) => Some(SurfaceResponse {
                albedo: Color::ZERO,
                specular: m.reflectance.evaluate(uv),
                smoothness: m.smoothness,
            }),
            Material::Opaque(m) => Some(SurfaceResponse {
                albedo: m.albedo.evaluate(uv),
                specular: Color::splat(normal_reflectance(OPAQUE_FRESNEL_IOR)),
                smoothness: m.smoothness,
            }),
            Material::Transparent(m) => Some(SurfaceResponse {
                albedo: Color::ZERO,
                specular: Color::splat(normal_reflectance(m.ior)),
                smoothness: m.smoothness,
            }),
            Material::Emissive(_) => None,
        }
    }

    /// Direct illumination from every light at this hit.
    pub fn shade(&self, rec: &HitRecord, lights: &[Light], bvh: &Bvh, view_origin: Vec3) -> Color {
        lights
            .iter()
            .map(|light| light.shade(bvh, self, rec, view_origin))
            .sum()
    }

    pub fn is_emissive(&self) -> bool {
        matches!(self, Material::Emissive(_))
    }
}

impl Metal {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.unit_direction(), rec.normal);

        // Only scatter if the reflected ray is in the same hemisphere as the normal
        if reflected.dot(rec.normal) > 0.0 {
            Some(ScatterResult {
                attenuation: self.reflectance.evaluate(rec.uv),
                scattered: Ray::new(rec.p, reflected),
            })
        } else {
            None
        }
    }
}

impl OpaqueDielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord) -> Option<ScatterResult> {
        let reflect_sample = halton(self.reflection_samples.next(), OPAQUE_REFLECT_BASE);
        let (base1, base2) = OPAQUE_DIFFUSE_BASES;
        let local = halton_hemisphere(self.diffuse_samples.next(), base1, base2);

        let unit_direction = ray_in.unit_direction();
        let cos_incident = (-unit_direction).dot(rec.normal);
        let will_reflect =
            cos_incident > 0.0 && fresnel(cos_incident, OPAQUE_FRESNEL_IOR) > reflect_sample;

        if will_reflect {
            return Some(ScatterResult {
                attenuation: Color::ONE,
                scattered: Ray::new(rec.p, reflect(unit_direction, rec.normal)),
            });
        }

        let (b1, b2) = tangent_frame(rec.normal);
        let direction = local.x * b1 + local.y * b2 + local.z * rec.normal;

        Some(ScatterResult {
            attenuation: self.albedo.evaluate(rec.uv),
            scattered: Ray::new(rec.p, direction.normalize()),
        })
    }
}

impl TransparentDielectric {
    fn scatter(&self, ray_in: &Ray, rec: &HitRecord) -> Option<ScatterResult> {
        let sample = halton(self.samples.next(), TRANSPARENT_BASE);
        let unit_direction = ray_in.unit_direction();
        let d_dot_n = unit_direction.dot(rec.normal);

        // Leaving the medium: flip the normal and the index ratio
        let (outward_normal, ni_over_nt, cos_incident) = if d_dot_n > 0.0 {
            (-rec.normal, self.ior, d_dot_n)
        } else {
            (rec.normal, 1.0 / self.ior, -d_dot_n)
        };

        // No refraction means total internal reflection
        let direction = match refract(unit_direction, outward_normal, ni_over_nt) {
            Some(refracted) if fresnel(cos_incident, self.ior) <= sample => refracted.normalize(),
            _ => reflect(unit_direction, rec.normal),
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract unit vector `i` through a surface with normal `n` facing against it.
///
/// Returns `None` on total internal reflection.
pub fn refract(i: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let i_dot_n = i.dot(n);
    let k = 1.0 - eta * eta * (1.0 - i_dot_n * i_dot_n);
    if k > 0.0 {
        Some(eta * i - (eta * i_dot_n + k.sqrt()) * n)
    } else {
        None
    }
}

/// Unpolarized Fresnel reflectance of a dielectric interface.
///
/// `cos_incident` is the cosine between the incident direction and the
/// normal; `ior` the relative index of refraction. Result is in [0, 1].
pub fn fresnel(cos_incident: f32, ior: f32) -> f32 {
    let c = cos_incident.clamp(0.0, 1.0);
    let g = (ior * ior + c * c - 1.0).max(0.0).sqrt();
    let g_plus_c = g + c;
    let g_minus_c = g - c;

    if g_plus_c <= 0.0 {
        return 1.0;
    }

    let a = g_minus_c / g_plus_c;
    let b = (c * g_plus_c - 1.0) / (c * g_minus_c + 1.0);
    (0.5 * a * a * (1.0 + b * b)).clamp(0.0, 1.0)
}

/// Reflectance at normal incidence, ((n - 1) / (n + 1))^2.
#[inline]
pub fn normal_reflectance(ior: f32) -> f32 {
    let r0 = (ior - 1.0) / (ior + 1.0);
    r0 * r0
}

/// Two unit tangents completing `n` to a right-handed orthonormal basis.
///
/// The helper axis is world X unless `|n.x| >= 0.5`, then world Y.
pub fn tangent_frame(n: Vec3) -> (Vec3, Vec3) {
    let up = if n.x.abs() < 0.5 { Vec3::X } else { Vec3::Y };
    let b1 = up.cross(n).normalize();
    let b2 = n.cross(b1);
    (b1, b2)
}

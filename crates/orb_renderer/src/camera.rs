//! Thin-lens camera for primary ray generation.

use orb_math::{Ray, Vec2, Vec3};

/// Camera generating primary rays through a thin lens.
///
/// The image plane sits one unit in front of the origin. Rays are aimed at
/// the point `focal_length` along the pinhole direction, so anything at that
/// distance stays sharp whatever the aperture.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Vec3,
    lower_left: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    u: Vec3,
    v: Vec3,
    aperture: f32,
    focal_length: f32,
}

impl Camera {
    /// Build a camera at `origin` looking toward `look_at`.
    ///
    /// `vfov` is the vertical field of view in degrees, `aspect` is
    /// width / height, and `aperture` is the lens diameter.
    pub fn new(
        origin: Vec3,
        look_at: Vec3,
        vfov: f32,
        aspect: f32,
        focal_length: f32,
        aperture: f32,
    ) -> Self {
        let half_height = (vfov.to_radians() / 2.0).tan();
        let half_width = aspect * half_height;

        let w = (origin - look_at).normalize_or_zero();
        let w = if w == Vec3::ZERO { Vec3::Z } else { w };

        // Straight up or down: Y is parallel to w, fall back to Z as up
        let up = if w.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let u = up.cross(w).normalize();
        let v = w.cross(u);

        let focal_length = if focal_length > 0.0 {
            focal_length
        } else {
            if aperture > 0.0 {
                log::warn!("focal length {focal_length} is not positive, focusing at the image plane");
            }
            1.0
        };

        Self {
            origin,
            lower_left: origin - half_width * u - half_height * v - w,
            horizontal: 2.0 * half_width * u,
            vertical: 2.0 * half_height * v,
            u,
            v,
            aperture: aperture.max(0.0),
            focal_length,
        }
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn aperture(&self) -> f32 {
        self.aperture
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Generate the ray through image coordinate `uv`.
    ///
    /// `uv` spans [0, 1]^2 with (0, 0) at the lower left. `lens` is a point
    /// in the unit disk choosing where on the aperture the ray starts.
    pub fn get_ray(&self, uv: Vec2, lens: Vec2) -> Ray {
        let on_plane = self.lower_left + uv.x * self.horizontal + uv.y * self.vertical;
        let pinhole = (on_plane - self.origin).normalize();
        let focal_point = self.origin + self.focal_length * pinhole;

        let radius = self.aperture / 2.0;
        let offset = radius * (lens.x * self.u + lens.y * self.v);
        let origin = self.origin + offset;

        Ray::new(origin, (focal_point - origin).normalize())
    }
}

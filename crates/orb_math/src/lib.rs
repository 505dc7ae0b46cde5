// Re-export glam for convenience
pub use glam::*;

// Orb math types
mod aabb;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use interval::Interval;
pub use ray::Ray;

/// Linear RGB color (components nominally 0-1, unbounded for radiance).
pub type Color = Vec3;

//! Render configuration.
//!
//! Everything here is plain data with serde support so that a driver can
//! load it from JSON and override individual fields.

use crate::bvh::SplitAxis;
use crate::camera::Camera;
use crate::error::{RenderError, RenderResult};
use orb_math::Vec3;
use serde::{Deserialize, Serialize};

/// Camera placement and lens settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub origin: Vec3,
    pub look_at: Vec3,
    /// Vertical field of view in degrees
    pub vertical_fov: f32,
    /// Lens diameter; 0 is a pinhole
    pub aperture: f32,
    /// Focus distance, `None` focuses on `look_at`
    pub focal_length: Option<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::new(12.0, 2.0, -2.5),
            look_at: Vec3::new(0.0, 1.0, 0.0),
            vertical_fov: 25.0,
            aperture: 0.4,
            focal_length: None,
        }
    }
}

impl CameraConfig {
    pub fn focus_distance(&self) -> f32 {
        self.focal_length
            .unwrap_or_else(|| (self.origin - self.look_at).length())
    }

    /// Build the camera for an image of the given aspect ratio.
    pub fn build(&self, aspect: f32) -> Camera {
        Camera::new(
            self.origin,
            self.look_at,
            self.vertical_fov,
            aspect,
            self.focus_distance(),
            self.aperture,
        )
    }
}

/// Acceleration structure settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BvhConfig {
    pub split: SplitAxis,
}

/// Settings for a progressive render session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Maximum number of bounces per path
    pub max_depth: u32,
    /// Exposure in stops; samples are scaled by 2^exposure
    pub exposure: f32,
    pub camera: CameraConfig,
    pub bvh: BvhConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            max_depth: 50,
            exposure: 0.0,
            camera: CameraConfig::default(),
            bvh: BvhConfig::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_exposure(mut self, exposure: f32) -> Self {
        self.exposure = exposure;
        self
    }

    pub fn with_camera(mut self, camera: CameraConfig) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_split(mut self, split: SplitAxis) -> Self {
        self.bvh.split = split;
        self
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Linear scale applied to every sample before accumulation.
    pub fn exposure_scale(&self) -> f32 {
        self.exposure.exp2()
    }

    pub fn validate(&self) -> RenderResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.max_depth == 0 {
            return Err(RenderError::InvalidDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!((config.width, config.height), (1280, 720));
        assert_eq!(config.max_depth, 50);
        assert_eq!(config.exposure_scale(), 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_degenerate_settings() {
        let config = RenderConfig::default().with_resolution(0, 720);
        assert_eq!(
            config.validate(),
            Err(RenderError::InvalidResolution { width: 0, height: 720 })
        );

        let config = RenderConfig::default().with_max_depth(0);
        assert_eq!(config.validate(), Err(RenderError::InvalidDepth));
    }

    #[test]
    fn test_focus_defaults_to_look_at_distance() {
        let camera = CameraConfig {
            origin: Vec3::new(0.0, 3.0, 4.0),
            look_at: Vec3::ZERO,
            ..Default::default()
        };
        assert!((camera.focus_distance() - 5.0).abs() < 1e-6);

        let camera = CameraConfig {
            focal_length: Some(2.0),
            ..camera
        };
        assert_eq!(camera.focus_distance(), 2.0);
    }

    #[test]
    fn test_exposure_scale() {
        let config = RenderConfig::default().with_exposure(-15.0);
        assert!((config.exposure_scale() - 1.0 / 32768.0).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RenderConfig =
            serde_json::from_str(r#"{ "width": 320, "bvh": { "split": { "kind": "random", "seed": 9 } } }"#)
                .unwrap();

        assert_eq!(config.width, 320);
        assert_eq!(config.height, 720);
        assert_eq!(config.bvh.split, SplitAxis::Random { seed: 9 });
        assert_eq!(config.camera, CameraConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = RenderConfig::default()
            .with_resolution(64, 48)
            .with_split(SplitAxis::Random { seed: 3 });
        let json = serde_json::to_string(&config).unwrap();
        let back: RenderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}

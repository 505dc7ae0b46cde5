//! Errors raised while building a scene or configuring a render.
//!
//! Nothing in the per-ray path returns an error: misses, total internal
//! reflection and exhausted depth are ordinary branches.

use thiserror::Error;

/// Errors that can occur before rendering starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("scene contains no primitives")]
    EmptyScene,

    #[error("sphere {index} is invalid (radius {radius})")]
    InvalidSphere { index: usize, radius: f32 },

    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { width: u32, height: u32 },

    #[error("maximum path depth must be at least 1")]
    InvalidDepth,
}

pub type RenderResult<T> = Result<T, RenderError>;

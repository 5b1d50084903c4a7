//! Fail-fast configuration errors.
//!
//! Geometric degeneracies never raise errors (they resolve to no-hit);
//! only invalid configuration is rejected, and it is rejected at scene
//! setup time rather than during per-pixel shading.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("focal length must be positive, got {0}")]
    NonPositiveFocalLength(f32),

    #[error("aperture radius must be zero or positive, got {0}")]
    NegativeAperture(f32),

    #[error("anti-aliasing multiplier must be at least 1")]
    ZeroAaMultiplier,

    #[error("depth-of-field sample multiplier must be at least 1")]
    ZeroDofSamples,

    #[error("horizontal field of view must be in (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),
}

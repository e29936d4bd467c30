//! Error types for locmatch.

use thiserror::Error;

/// Result alias for locmatch operations.
pub type LocMatchResult<T> = std::result::Result<T, LocMatchError>;

/// Errors that can occur while loading, correlating or locating.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LocMatchError {
    /// An input image is missing data, e.g. it decoded to zero pixels.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    /// Width or height is zero, or their product overflows.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Stride is smaller than the row width.
    #[error("stride {stride} is smaller than width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer cannot hold the requested image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// The template does not fit inside the scene.
    #[error(
        "template {template_width}x{template_height} exceeds scene {scene_width}x{scene_height}"
    )]
    DimensionMismatch {
        template_width: usize,
        template_height: usize,
        scene_width: usize,
        scene_height: usize,
    },
    /// Every score on the surface is NaN or infinite.
    #[error("surface has no finite scores")]
    NoFiniteScores,
    /// A matrix with zero Euclidean norm cannot be normalized.
    #[error("matrix has zero norm")]
    ZeroNorm,
    /// The template has no energy or variance for a normalized metric.
    #[error("degenerate template: {reason}")]
    DegenerateTemplate { reason: &'static str },
    /// The image file does not exist.
    #[error("image not found: {path}")]
    FileNotFound { path: String },
    /// The image file exists but could not be decoded.
    #[error("failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    /// Writing an image failed.
    #[error("image i/o error: {reason}")]
    ImageIo { reason: String },
}

impl LocMatchError {
    /// Returns true when the error means an input image could not be obtained.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            LocMatchError::FileNotFound { .. }
                | LocMatchError::Decode { .. }
                | LocMatchError::InvalidInput(_)
        )
    }
}

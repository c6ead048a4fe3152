//! Error types for landmesh

use thiserror::Error;

/// Core landmesh errors
#[derive(Error, Debug)]
pub enum LandmeshError {
    // Configuration errors
    #[error("Configuration conflict: {0}")]
    ConfigurationConflict(String),

    #[error("Invalid camera scale: {0} (must be finite and > 0)")]
    InvalidCameraScale(f64),

    #[error("Invalid field of view: {0} degrees (must be within (0, 180))")]
    InvalidFieldOfView(f64),

    #[error("Malformed focal length: {0:?} (expected SENSOR/LENS)")]
    MalformedFocalLength(String),

    #[error("Invalid video metadata: {0}")]
    InvalidVideoMetadata(String),

    // Landmark errors
    #[error("Inconsistent point count at frame {frame}: expected {expected}, got {actual}")]
    InconsistentPointCount {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Landmark index {index} out of range for {point_count} points")]
    LandmarkIndexOutOfRange { index: usize, point_count: usize },

    #[error("Head width landmarks must differ, both are {0}")]
    IdenticalHeadIndices(usize),

    // Cache format errors
    #[error("Buffer too short: expected {expected}, got {actual}")]
    BufferTooShort { expected: usize, actual: usize },

    #[error("Invalid vertex cache: {0}")]
    InvalidCacheFormat(String),

    #[error("Frame order violated: {0}")]
    FrameOrder(String),

    // Collaborator errors
    #[error("Landmark source error: {0}")]
    Source(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for landmesh operations
pub type LandmeshResult<T> = Result<T, LandmeshError>;

//! Video metadata supplied by the landmark source

use crate::{LandmeshError, LandmeshResult};

/// Dimensions and frame rate of the source video
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

impl VideoMetadata {
    pub fn new(width: u32, height: u32, fps: f64) -> Self {
        Self { width, height, fps }
    }

    /// Reject metadata the pipeline cannot time-stamp or normalize
    pub fn validate(&self) -> LandmeshResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(LandmeshError::InvalidVideoMetadata(format!(
                "frame size {}x{}",
                self.width, self.height
            )));
        }
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(LandmeshError::InvalidVideoMetadata(format!(
                "frame rate {}",
                self.fps
            )));
        }
        Ok(())
    }

    /// Width over height, applied uniformly to every frame
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    /// Same video with a different frame rate
    pub fn with_fps(self, fps: f64) -> Self {
        Self { fps, ..self }
    }
}

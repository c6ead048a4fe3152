//! Pipeline configuration

use landmesh_core::CameraConfig;
use landmesh_recon::{HeadIndices, DEFAULT_WINDOW};

/// Pipeline configuration
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineConfig {
    /// Camera inputs, resolved when the pipeline is built
    pub camera: CameraConfig,
    /// Landmarks spanning the head width
    pub head_indices: HeadIndices,
    /// Neighbours averaged on each side when smoothing the reference
    pub window: usize,
    /// Frame rate to use instead of the source metadata
    pub fps_override: Option<f64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            camera: CameraConfig::orthographic(),
            head_indices: HeadIndices::default(),
            window: DEFAULT_WINDOW,
            fps_override: None,
        }
    }
}

impl PipelineConfig {
    /// Perspective reconstruction from a horizontal field of view
    pub fn perspective_fov(fov: f64) -> Self {
        PipelineConfig {
            camera: CameraConfig::with_fov(fov),
            ..Default::default()
        }
    }

    pub fn with_head_indices(mut self, head_indices: HeadIndices) -> Self {
        self.head_indices = head_indices;
        self
    }

    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    pub fn with_fps(mut self, fps: f64) -> Self {
        self.fps_override = Some(fps);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.window, 3);
        assert_eq!(config.head_indices, HeadIndices::new(234, 454));
        assert!(config.camera.fov.is_none());
        assert!(config.fps_override.is_none());
    }

    #[test]
    fn test_builder() {
        let config = PipelineConfig::perspective_fov(60.0)
            .with_window(5)
            .with_head_indices(HeadIndices::new(1, 2))
            .with_fps(25.0);

        assert_eq!(config.camera.fov, Some(60.0));
        assert_eq!(config.window, 5);
        assert_eq!(config.head_indices, HeadIndices::new(1, 2));
        assert_eq!(config.fps_override, Some(25.0));
    }
}

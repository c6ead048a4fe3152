//! Camera back-projection
//!
//! Orthographic mode recentres and flips the normalized coordinates.
//! Perspective mode assumes the smoothed reference width is a fixed
//! real-world width, derives an object-space scale from it, and pushes the
//! landmark through a pinhole model scaled by the camera factor. The result
//! is divided by the camera factor again so both modes land in a comparable
//! coordinate range.

use landmesh_core::{CameraModel, Landmark, Mesh, Vertex};
use tracing::debug;

use crate::SmoothedScale;

/// Smoothed widths at or below this are treated as a failed detection.
///
/// Widths are in normalized image units, so this is well under a pixel for
/// any real frame size while still far above f32 landmark resolution.
pub const DEGENERATE_WIDTH_EPSILON: f64 = 1e-4;

/// Result of projecting one frame
#[derive(Debug, Clone, PartialEq)]
pub enum FrameProjection {
    /// Reconstructed vertices, one per landmark
    Projected(Vec<Vertex>),
    /// No mesh was detected for this frame
    DetectionGap,
    /// Smoothed reference width too close to zero to scale by
    DegenerateWidth,
    /// Reconstruction produced a non-finite coordinate
    NonFinite,
}

impl FrameProjection {
    pub fn is_projected(&self) -> bool {
        matches!(self, FrameProjection::Projected(_))
    }

    /// Vertices to write. Anything but a projection becomes the origin.
    pub fn into_vertices(self, point_count: usize) -> Vec<Vertex> {
        match self {
            FrameProjection::Projected(vertices) => vertices,
            _ => zero_frame(point_count),
        }
    }
}

/// `point_count` vertices at the origin
pub fn zero_frame(point_count: usize) -> Vec<Vertex> {
    vec![Vertex::ZERO; point_count]
}

/// Maps landmarks to output vertices under a fixed camera
#[derive(Debug, Clone, Copy)]
pub struct BackProjector {
    camera: CameraModel,
    aspect_ratio: f64,
}

impl BackProjector {
    pub fn new(camera: CameraModel, aspect_ratio: f64) -> Self {
        Self {
            camera,
            aspect_ratio,
        }
    }

    pub fn camera(&self) -> CameraModel {
        self.camera
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    /// Orthographic projection of one landmark
    pub fn orthographic(&self, landmark: &Landmark) -> Vertex {
        let x = landmark.x as f64;
        let y = landmark.y as f64;
        let z = landmark.z as f64;

        Vertex::from_f64(x - 0.5, -(y - 0.5) / self.aspect_ratio, -z)
    }

    /// Perspective projection of one landmark
    pub fn perspective(
        &self,
        camera_scale: f64,
        smoothed: &SmoothedScale,
        landmark: &Landmark,
    ) -> Vertex {
        let x = landmark.x as f64;
        let y = landmark.y as f64;
        let z = landmark.z as f64;

        let scale = smoothed.scale();
        let z_cam = (z - smoothed.depth) * camera_scale * scale + scale;
        let x_cam = (x - 0.5) * camera_scale * z_cam;
        let y_cam = (y - 0.5) * camera_scale / self.aspect_ratio * z_cam;

        Vertex::from_f64(
            x_cam / camera_scale,
            -y_cam / camera_scale,
            -z_cam / camera_scale,
        )
    }

    /// Project a whole frame.
    ///
    /// `smoothed` is only consulted in perspective mode.
    pub fn project_frame(
        &self,
        mesh: Option<&Mesh>,
        smoothed: Option<&SmoothedScale>,
    ) -> FrameProjection {
        let Some(mesh) = mesh else {
            return FrameProjection::DetectionGap;
        };

        let vertices: Vec<Vertex> = match self.camera {
            CameraModel::Orthographic => mesh.iter().map(|l| self.orthographic(l)).collect(),
            CameraModel::Perspective { scale: camera_scale } => {
                let Some(smoothed) = smoothed else {
                    debug!("perspective frame without a reference measurement");
                    return FrameProjection::DetectionGap;
                };
                if !is_usable_width(smoothed.width2d) {
                    return FrameProjection::DegenerateWidth;
                }
                mesh.iter()
                    .map(|l| self.perspective(camera_scale, smoothed, l))
                    .collect()
            }
        };

        if vertices.iter().all(Vertex::is_finite) {
            FrameProjection::Projected(vertices)
        } else {
            FrameProjection::NonFinite
        }
    }
}

#[inline]
fn is_usable_width(width2d: f64) -> bool {
    width2d.is_finite() && width2d.abs() > DEGENERATE_WIDTH_EPSILON
}

//! Synthetic landmark sequences
//!
//! Landmarks are laid out on an ellipse around a moving face centre. The
//! two head-width landmarks sit on the horizontal extremes so the reference
//! width tracks the face radius. The radius breathes over time to mimic the
//! head moving towards and away from the camera.

use std::f32::consts::TAU;

use landmesh_core::{Landmark, Mesh, VideoMetadata};
use landmesh_recon::HeadIndices;
use landmesh_runtime::MemorySource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// MediaPipe face mesh point count
pub const FACE_MESH_POINTS: usize = 468;

/// Synthetic sequence parameters
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub frames: usize,
    pub point_count: usize,
    pub head_indices: HeadIndices,
    /// Probability a frame has no detection
    pub dropout: f64,
    /// Uniform per-coordinate noise amplitude
    pub jitter: f32,
    pub metadata: VideoMetadata,
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            point_count: FACE_MESH_POINTS,
            head_indices: HeadIndices::default(),
            dropout: 0.0,
            jitter: 0.0,
            metadata: VideoMetadata::new(1280, 720, 30.0),
            seed: 0x1A9D_3E5A,
        }
    }
}

impl SyntheticConfig {
    /// Small mesh, quick to run
    pub fn small() -> Self {
        Self {
            frames: 24,
            point_count: 8,
            head_indices: HeadIndices::new(0, 4),
            metadata: VideoMetadata::new(640, 480, 24.0),
            ..Default::default()
        }
    }

    /// Noisy tracking with lost frames
    pub fn noisy() -> Self {
        Self {
            dropout: 0.15,
            jitter: 0.002,
            ..Default::default()
        }
    }
}

/// Generator of synthetic face sequences
pub struct SyntheticFace {
    config: SyntheticConfig,
    rng: StdRng,
}

impl SyntheticFace {
    pub fn new(config: SyntheticConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &SyntheticConfig {
        &self.config
    }

    /// Face mesh for frame `index`, ignoring dropout
    pub fn mesh_at(&mut self, index: usize) -> Mesh {
        let t = index as f32 / self.config.metadata.fps as f32;
        let cx = 0.5 + 0.05 * (0.7 * t).sin();
        let cy = 0.45 + 0.03 * (0.5 * t).cos();
        let radius = 0.15 * (1.0 + 0.1 * (0.9 * t).sin());
        let n = self.config.point_count;

        let mut mesh: Mesh = (0..n)
            .map(|k| {
                let angle = TAU * k as f32 / n as f32;
                let depth = -0.05 * angle.cos().abs();
                Landmark::new(
                    cx + radius * angle.sin() + self.noise(),
                    cy + 1.3 * radius * angle.cos() + self.noise(),
                    depth + self.noise(),
                )
            })
            .collect();

        let HeadIndices { left, right } = self.config.head_indices;
        if left < n {
            mesh[left] = Landmark::new(cx - radius + self.noise(), cy, self.noise());
        }
        if right < n {
            mesh[right] = Landmark::new(cx + radius + self.noise(), cy, self.noise());
        }
        mesh
    }

    /// Whole sequence, with detection gaps
    pub fn frames(&mut self) -> Vec<Option<Mesh>> {
        (0..self.config.frames)
            .map(|i| {
                let mesh = self.mesh_at(i);
                if self.config.dropout > 0.0 && self.rng.gen_bool(self.config.dropout) {
                    None
                } else {
                    Some(mesh)
                }
            })
            .collect()
    }

    pub fn source(&mut self) -> MemorySource {
        MemorySource::new(self.config.metadata, self.frames())
    }

    /// Sequence as a JSON landmark dump
    pub fn to_json(&mut self) -> String {
        let frames: Vec<serde_json::Value> = self
            .frames()
            .into_iter()
            .map(|frame| match frame {
                None => serde_json::Value::Null,
                Some(mesh) => mesh
                    .iter()
                    .map(|l| serde_json::json!([l.x, l.y, l.z]))
                    .collect(),
            })
            .collect();

        let meta = self.config.metadata;
        serde_json::json!({
            "width": meta.width,
            "height": meta.height,
            "fps": meta.fps,
            "frames": frames,
        })
        .to_string()
    }

    fn noise(&mut self) -> f32 {
        if self.config.jitter > 0.0 {
            self.rng.gen_range(-self.config.jitter..self.config.jitter)
        } else {
            0.0
        }
    }
}

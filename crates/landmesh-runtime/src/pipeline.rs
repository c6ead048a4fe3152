//! Landmark-to-vertex-cache pipeline

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use landmesh_core::{
    timestamps, CameraModel, LandmeshError, LandmeshResult, Mesh, VideoMetadata,
};
use landmesh_recon::{extract_all, BackProjector, FrameProjection, ScaleSmoother, SmoothedScale};
use landmesh_wire::{CacheHeader, VertexCacheWriter};
use tracing::{debug, info, warn};

use crate::{LandmarkSource, PipelineConfig};

/// Every frame of a source, drained and checked
#[derive(Debug, Clone)]
pub struct LandmarkSequence {
    pub metadata: VideoMetadata,
    pub frames: Vec<Option<Mesh>>,
    /// Length of the first detected mesh, 0 if nothing was detected
    pub point_count: usize,
}

impl LandmarkSequence {
    /// Drain a source. Every detected mesh must match the first one's length.
    pub fn collect<S: LandmarkSource + ?Sized>(source: &mut S) -> LandmeshResult<Self> {
        let metadata = source.metadata();
        let mut frames = Vec::new();
        let mut point_count: Option<usize> = None;

        while let Some(frame) = source.next_frame() {
            let frame = frame?;
            let index = frames.len();

            match &frame {
                Some(mesh) => match point_count {
                    None => {
                        debug!(frame = index, points = mesh.len(), "point count established");
                        point_count = Some(mesh.len());
                    }
                    Some(expected) if expected != mesh.len() => {
                        return Err(LandmeshError::InconsistentPointCount {
                            frame: index,
                            expected,
                            actual: mesh.len(),
                        });
                    }
                    Some(_) => {}
                },
                None => debug!(frame = index, "no face detected"),
            }

            frames.push(frame);
        }

        Ok(LandmarkSequence {
            metadata,
            frames,
            point_count: point_count.unwrap_or(0),
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn detected_count(&self) -> usize {
        self.frames.iter().filter(|f| f.is_some()).count()
    }

    /// Nothing to write: no frames, or no frame with a detection
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() || self.point_count == 0
    }
}

/// Per-run frame tallies
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames: usize,
    pub projected: usize,
    pub detection_gaps: usize,
    pub degenerate_width: usize,
    pub non_finite: usize,
}

impl PipelineStats {
    fn record(&mut self, index: usize, projection: &FrameProjection) {
        self.frames += 1;
        match projection {
            FrameProjection::Projected(_) => self.projected += 1,
            FrameProjection::DetectionGap => {
                debug!(frame = index, "detection gap, writing origin vertices");
                self.detection_gaps += 1;
            }
            FrameProjection::DegenerateWidth => {
                warn!(frame = index, "degenerate reference width, writing origin vertices");
                self.degenerate_width += 1;
            }
            FrameProjection::NonFinite => {
                warn!(frame = index, "non-finite reconstruction, writing origin vertices");
                self.non_finite += 1;
            }
        }
    }

    /// Frames written as origin vertices
    pub fn fallback_frames(&self) -> usize {
        self.detection_gaps + self.degenerate_width + self.non_finite
    }
}

/// How a run ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Cache written
    Written {
        frame_count: usize,
        point_count: usize,
        stats: PipelineStats,
    },
    /// Nothing detected, nothing written
    Empty { frame_count: usize },
}

/// Configured pipeline with a resolved camera
#[derive(Clone, Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    camera: CameraModel,
}

impl Pipeline {
    /// Resolve and check the configuration. No source is touched here.
    pub fn new(config: PipelineConfig) -> LandmeshResult<Self> {
        let camera = config.camera.resolve()?;
        if camera.is_perspective() {
            config.head_indices.ensure_distinct()?;
        }
        if let Some(fps) = config.fps_override {
            if !fps.is_finite() || fps <= 0.0 {
                return Err(LandmeshError::InvalidVideoMetadata(format!(
                    "frame rate override {}",
                    fps
                )));
            }
        }
        info!(%camera, window = config.window, "pipeline configured");
        Ok(Pipeline { config, camera })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn camera(&self) -> CameraModel {
        self.camera
    }

    /// Check metadata, then drain the source
    pub fn read<S>(&self, source: &mut S) -> LandmeshResult<LandmarkSequence>
    where
        S: LandmarkSource + ?Sized,
    {
        let mut metadata = source.metadata();
        if let Some(fps) = self.config.fps_override {
            metadata = metadata.with_fps(fps);
        }
        metadata.validate()?;

        let mut sequence = LandmarkSequence::collect(source)?;
        sequence.metadata = metadata;

        info!(
            frames = sequence.frame_count(),
            detected = sequence.detected_count(),
            points = sequence.point_count,
            "landmarks read"
        );
        Ok(sequence)
    }

    /// Everything that must hold before output is produced
    pub fn validate(&self, sequence: &LandmarkSequence) -> LandmeshResult<()> {
        if self.camera.is_perspective() && sequence.point_count > 0 {
            self.config.head_indices.validate(sequence.point_count)?;
        }
        Ok(())
    }

    /// Smoothed reference per frame; empty in orthographic mode
    pub fn smoothed_scales(&self, sequence: &LandmarkSequence) -> Vec<Option<SmoothedScale>> {
        if !self.camera.is_perspective() {
            return Vec::new();
        }
        let measurements = extract_all(&sequence.frames, self.config.head_indices);
        ScaleSmoother::new(self.config.window).smooth_all(&measurements)
    }

    /// Reconstruct every frame and stream the cache into `sink`
    pub fn encode<W: Write>(
        &self,
        sequence: &LandmarkSequence,
        sink: W,
    ) -> LandmeshResult<(W, PipelineStats)> {
        self.validate(sequence)?;

        let header = CacheHeader::new(sequence.frame_count(), sequence.point_count)?;
        let stamps = timestamps(sequence.frame_count(), sequence.metadata.fps);
        let projector = BackProjector::new(self.camera, sequence.metadata.aspect_ratio());
        let smoothed = self.smoothed_scales(sequence);

        let mut writer = VertexCacheWriter::new(sink, header, &stamps)?;
        let mut stats = PipelineStats::default();

        for (index, mesh) in sequence.frames.iter().enumerate() {
            let scale = smoothed.get(index).and_then(Option::as_ref);
            let projection = projector.project_frame(mesh.as_ref(), scale);
            stats.record(index, &projection);
            writer.write_frame(&projection.into_vertices(sequence.point_count))?;
        }

        let sink = writer.finish()?;
        Ok((sink, stats))
    }

    /// Run against any sink. Nothing is written for an empty sequence.
    pub fn run<S, W>(&self, source: &mut S, sink: W) -> LandmeshResult<PipelineOutcome>
    where
        S: LandmarkSource + ?Sized,
        W: Write,
    {
        let sequence = self.read(source)?;
        if sequence.is_empty() {
            return Ok(Self::empty(&sequence));
        }
        let (_, stats) = self.encode(&sequence, sink)?;
        Ok(Self::written(&sequence, stats))
    }

    /// Run and write the cache to `path`.
    ///
    /// The file is only created once the sequence has been read and checked.
    /// A failed write removes the partial file.
    pub fn run_to_path<S>(&self, source: &mut S, path: &Path) -> LandmeshResult<PipelineOutcome>
    where
        S: LandmarkSource + ?Sized,
    {
        let sequence = self.read(source)?;
        if sequence.is_empty() {
            return Ok(Self::empty(&sequence));
        }
        self.validate(&sequence)?;

        let file = File::create(path)?;
        match self.encode(&sequence, BufWriter::new(file)) {
            Ok((_, stats)) => {
                info!(path = %path.display(), "vertex cache written");
                Ok(Self::written(&sequence, stats))
            }
            Err(e) => {
                if let Err(rm) = fs::remove_file(path) {
                    warn!(path = %path.display(), error = %rm, "could not remove partial cache");
                }
                Err(e)
            }
        }
    }

    fn empty(sequence: &LandmarkSequence) -> PipelineOutcome {
        info!(frames = sequence.frame_count(), "no face detected in any frame, nothing written");
        PipelineOutcome::Empty {
            frame_count: sequence.frame_count(),
        }
    }

    fn written(sequence: &LandmarkSequence, stats: PipelineStats) -> PipelineOutcome {
        info!(
            frames = stats.frames,
            projected = stats.projected,
            fallback = stats.fallback_frames(),
            "reconstruction finished"
        );
        PipelineOutcome::Written {
            frame_count: sequence.frame_count(),
            point_count: sequence.point_count,
            stats,
        }
    }
}

//! End-to-end pipeline scenarios
//!
//! Drives the full pipeline over synthetic sequences and checks the
//! resulting vertex caches.

use landmesh_core::{LandmeshResult, Mesh, VideoMetadata};
use landmesh_runtime::{JsonLandmarkSource, MemorySource, Pipeline, PipelineConfig, PipelineOutcome};
use landmesh_wire::VertexCache;

use crate::{SyntheticConfig, SyntheticFace};

/// Run the pipeline over a synthetic face and capture the output bytes
pub fn run_synthetic(
    config: PipelineConfig,
    synthetic: SyntheticConfig,
) -> LandmeshResult<(PipelineOutcome, Vec<u8>)> {
    let pipeline = Pipeline::new(config)?;
    let mut source = SyntheticFace::new(synthetic).source();
    let mut out = Vec::new();
    let outcome = pipeline.run(&mut source, &mut out)?;
    Ok((outcome, out))
}

/// Run the pipeline over explicit frames
pub fn run_frames(
    config: PipelineConfig,
    metadata: VideoMetadata,
    frames: Vec<Option<Mesh>>,
) -> LandmeshResult<(PipelineOutcome, Vec<u8>)> {
    let pipeline = Pipeline::new(config)?;
    let mut source = MemorySource::new(metadata, frames);
    let mut out = Vec::new();
    let outcome = pipeline.run(&mut source, &mut out)?;
    Ok((outcome, out))
}

/// Run the pipeline over a JSON landmark dump
pub fn run_json(config: PipelineConfig, json: &str) -> LandmeshResult<(PipelineOutcome, Vec<u8>)> {
    let pipeline = Pipeline::new(config)?;
    let mut source = JsonLandmarkSource::from_json(json)?;
    let mut out = Vec::new();
    let outcome = pipeline.run(&mut source, &mut out)?;
    Ok((outcome, out))
}

/// Decode a cache and check the layout invariants every run must hold
pub fn check_cache(bytes: &[u8], fps: f64) -> LandmeshResult<VertexCache> {
    let cache = VertexCache::decode(bytes)?;
    assert_eq!(cache.timestamps.len(), cache.header.frame_count);
    assert_eq!(cache.frames.len(), cache.header.frame_count);
    for (i, t) in cache.timestamps.iter().enumerate() {
        assert_eq!(*t, (i as f64 / fps) as f32, "time stamp {}", i);
    }
    for frame in &cache.frames {
        assert_eq!(frame.len(), cache.header.point_count);
        assert!(frame.iter().all(|v| v.is_finite()));
    }
    Ok(cache)
}

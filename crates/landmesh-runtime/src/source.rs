//! Landmark sources
//!
//! A source yields, once and in order, either a detected mesh or nothing
//! for every frame of a video, plus the video's metadata. Detection itself
//! happens elsewhere; a source only hands over its results.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use landmesh_core::{Landmark, LandmeshError, LandmeshResult, Mesh, VideoMetadata};
use serde::Deserialize;

/// Lazy, finite, non-restartable sequence of per-frame detections
pub trait LandmarkSource {
    /// Metadata of the source video
    fn metadata(&self) -> VideoMetadata;

    /// Next frame: `None` once exhausted, `Some(Ok(None))` for a frame
    /// where detection failed
    fn next_frame(&mut self) -> Option<LandmeshResult<Option<Mesh>>>;
}

/// Source over frames already held in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    metadata: VideoMetadata,
    frames: std::vec::IntoIter<Option<Mesh>>,
}

impl MemorySource {
    pub fn new(metadata: VideoMetadata, frames: Vec<Option<Mesh>>) -> Self {
        Self {
            metadata,
            frames: frames.into_iter(),
        }
    }
}

impl LandmarkSource for MemorySource {
    fn metadata(&self) -> VideoMetadata {
        self.metadata
    }

    fn next_frame(&mut self) -> Option<LandmeshResult<Option<Mesh>>> {
        self.frames.next().map(Ok)
    }
}

/// On-disk landmark dump
///
/// ```json
/// { "width": 1280, "height": 720, "fps": 30.0,
///   "frames": [null, [[0.51, 0.42, -0.03], ...]] }
/// ```
#[derive(Debug, Deserialize)]
struct LandmarkDump {
    width: u32,
    height: u32,
    fps: f64,
    frames: Vec<Option<Vec<[f32; 3]>>>,
}

/// Source reading a JSON landmark dump
#[derive(Debug)]
pub struct JsonLandmarkSource {
    metadata: VideoMetadata,
    frames: std::vec::IntoIter<Option<Vec<[f32; 3]>>>,
}

impl JsonLandmarkSource {
    pub fn open(path: impl AsRef<Path>) -> LandmeshResult<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> LandmeshResult<Self> {
        let dump: LandmarkDump =
            serde_json::from_reader(reader).map_err(|e| LandmeshError::Source(e.to_string()))?;

        Ok(JsonLandmarkSource {
            metadata: VideoMetadata::new(dump.width, dump.height, dump.fps),
            frames: dump.frames.into_iter(),
        })
    }

    pub fn from_json(json: &str) -> LandmeshResult<Self> {
        Self::from_reader(json.as_bytes())
    }

    /// Frames not yet yielded
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl LandmarkSource for JsonLandmarkSource {
    fn metadata(&self) -> VideoMetadata {
        self.metadata
    }

    fn next_frame(&mut self) -> Option<LandmeshResult<Option<Mesh>>> {
        let frame = self.frames.next()?;
        Some(Ok(frame.map(|points| points.into_iter().map(Landmark::from).collect())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DUMP: &str = r#"{
        "width": 640,
        "height": 480,
        "fps": 24.0,
        "frames": [
            [[0.5, 0.5, 0.0], [0.25, 0.75, -0.1]],
            null,
            [[0.5, 0.5, 0.0], [0.3, 0.7, -0.2]]
        ]
    }"#;

    #[test]
    fn test_json_metadata() {
        let source = JsonLandmarkSource::from_json(DUMP).unwrap();
        assert_eq!(source.metadata(), VideoMetadata::new(640, 480, 24.0));
        assert_eq!(source.remaining(), 3);
    }

    #[test]
    fn test_json_frames_in_order() {
        let mut source = JsonLandmarkSource::from_json(DUMP).unwrap();

        let first = source.next_frame().unwrap().unwrap().unwrap();
        assert_eq!(first[1], Landmark::new(0.25, 0.75, -0.1));

        assert!(source.next_frame().unwrap().unwrap().is_none());

        let third = source.next_frame().unwrap().unwrap().unwrap();
        assert_eq!(third.len(), 2);

        assert!(source.next_frame().is_none());
        assert!(source.next_frame().is_none());
    }

    #[test]
    fn test_json_malformed() {
        let result = JsonLandmarkSource::from_json(r#"{"width": 640, "frames": []}"#);
        assert!(matches!(result, Err(LandmeshError::Source(_))));
    }

    #[test]
    fn test_json_bad_triple() {
        let json = r#"{"width": 1, "height": 1, "fps": 1.0, "frames": [[[0.5, 0.5]]]}"#;
        assert!(JsonLandmarkSource::from_json(json).is_err());
    }

    #[test]
    fn test_json_missing_file() {
        let result = JsonLandmarkSource::open("/nonexistent/landmarks.json");
        assert!(matches!(result, Err(LandmeshError::Io(_))));
    }

    #[test]
    fn test_memory_source() {
        let meta = VideoMetadata::new(2, 2, 10.0);
        let mut source = MemorySource::new(meta, vec![None, Some(vec![Landmark::default()])]);

        assert!(source.next_frame().unwrap().unwrap().is_none());
        assert_eq!(source.next_frame().unwrap().unwrap().unwrap().len(), 1);
        assert!(source.next_frame().is_none());
    }
}

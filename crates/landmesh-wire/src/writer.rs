//! Streaming vertex cache writer
//!
//! The header and time stamps go out on construction; frames follow one at
//! a time in index order. The writer refuses anything that would break the
//! layout declared by the header.

use std::io::Write;

use bytes::{BufMut, BytesMut};
use landmesh_core::{LandmeshError, LandmeshResult, Vertex};
use tracing::trace;

use crate::{CacheHeader, HEADER_SIZE};

/// Writes one vertex cache to a sink
pub struct VertexCacheWriter<W: Write> {
    sink: W,
    header: CacheHeader,
    frames_written: usize,
    scratch: BytesMut,
}

impl<W: Write> VertexCacheWriter<W> {
    /// Write the header and time stamp block
    pub fn new(mut sink: W, header: CacheHeader, timestamps: &[f32]) -> LandmeshResult<Self> {
        if timestamps.len() != header.frame_count {
            return Err(LandmeshError::FrameOrder(format!(
                "{} time stamps for {} frames",
                timestamps.len(),
                header.frame_count
            )));
        }

        let mut scratch = BytesMut::with_capacity(HEADER_SIZE + header.timestamps_len());
        header.serialize(&mut scratch);
        for t in timestamps {
            scratch.put_f32(*t);
        }
        sink.write_all(&scratch)?;
        scratch.clear();

        Ok(VertexCacheWriter {
            sink,
            header,
            frames_written: 0,
            scratch,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// Append the next frame
    pub fn write_frame(&mut self, vertices: &[Vertex]) -> LandmeshResult<()> {
        if self.frames_written >= self.header.frame_count {
            return Err(LandmeshError::FrameOrder(format!(
                "frame {} beyond declared count {}",
                self.frames_written, self.header.frame_count
            )));
        }
        if vertices.len() != self.header.point_count {
            return Err(LandmeshError::FrameOrder(format!(
                "frame {} has {} vertices, header declares {}",
                self.frames_written,
                vertices.len(),
                self.header.point_count
            )));
        }

        self.scratch.reserve(self.header.frame_len());
        for v in vertices {
            self.scratch.put_f32(v.x);
            self.scratch.put_f32(v.y);
            self.scratch.put_f32(v.z);
        }
        self.sink.write_all(&self.scratch)?;
        self.scratch.clear();

        trace!(frame = self.frames_written, "vertex frame written");
        self.frames_written += 1;
        Ok(())
    }

    /// Check every declared frame was written, flush, and hand back the sink
    pub fn finish(mut self) -> LandmeshResult<W> {
        if self.frames_written != self.header.frame_count {
            return Err(LandmeshError::FrameOrder(format!(
                "{} of {} frames written",
                self.frames_written, self.header.frame_count
            )));
        }
        self.sink.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(frames: usize, points: usize) -> CacheHeader {
        CacheHeader::new(frames, points).unwrap()
    }

    #[test]
    fn test_write_layout() {
        let mut writer = VertexCacheWriter::new(Vec::new(), header(1, 1), &[0.0]).unwrap();
        writer.write_frame(&[Vertex::new(1.0, -2.0, 0.5)]).unwrap();
        let bytes = writer.finish().unwrap();

        let mut expected = vec![0, 0, 0, 1, 0, 0, 0, 1];
        expected.extend_from_slice(&0.0f32.to_be_bytes());
        expected.extend_from_slice(&1.0f32.to_be_bytes());
        expected.extend_from_slice(&(-2.0f32).to_be_bytes());
        expected.extend_from_slice(&0.5f32.to_be_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_timestamp_count_mismatch() {
        let result = VertexCacheWriter::new(Vec::new(), header(2, 1), &[0.0]);
        assert!(matches!(result, Err(LandmeshError::FrameOrder(_))));
    }

    #[test]
    fn test_too_many_frames() {
        let mut writer = VertexCacheWriter::new(Vec::new(), header(1, 1), &[0.0]).unwrap();
        writer.write_frame(&[Vertex::ZERO]).unwrap();
        let result = writer.write_frame(&[Vertex::ZERO]);
        assert!(matches!(result, Err(LandmeshError::FrameOrder(_))));
    }

    #[test]
    fn test_wrong_vertex_count() {
        let mut writer = VertexCacheWriter::new(Vec::new(), header(1, 2), &[0.0]).unwrap();
        let result = writer.write_frame(&[Vertex::ZERO]);
        assert!(matches!(result, Err(LandmeshError::FrameOrder(_))));
        assert_eq!(writer.frames_written(), 0);
    }

    #[test]
    fn test_finish_with_missing_frames() {
        let mut writer = VertexCacheWriter::new(Vec::new(), header(2, 1), &[0.0, 0.5]).unwrap();
        writer.write_frame(&[Vertex::ZERO]).unwrap();
        assert!(matches!(writer.finish(), Err(LandmeshError::FrameOrder(_))));
    }

    #[test]
    fn test_io_failure_surfaces() {
        struct FailingSink;
        impl Write for FailingSink {
            fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let result = VertexCacheWriter::new(FailingSink, header(1, 1), &[0.0]);
        assert!(matches!(result, Err(LandmeshError::Io(_))));
    }
}

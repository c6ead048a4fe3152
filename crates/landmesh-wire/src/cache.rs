//! In-memory vertex cache
//!
//! Holds a complete cache for encoding in one go or after decoding a file.

use bytes::{Buf, BufMut, BytesMut};
use landmesh_core::{LandmeshError, LandmeshResult, Vertex};

use crate::{CacheHeader, HEADER_SIZE};

/// Complete vertex cache
#[derive(Clone, Debug, PartialEq)]
pub struct VertexCache {
    pub header: CacheHeader,
    pub timestamps: Vec<f32>,
    pub frames: Vec<Vec<Vertex>>,
}

impl VertexCache {
    /// Decode a complete cache. Trailing bytes are rejected.
    pub fn decode(data: &[u8]) -> LandmeshResult<Self> {
        let header = CacheHeader::parse(data)?;

        let expected = header.expected_len();
        if data.len() < expected {
            return Err(LandmeshError::BufferTooShort {
                expected,
                actual: data.len(),
            });
        }
        if data.len() > expected {
            return Err(LandmeshError::InvalidCacheFormat(format!(
                "{} trailing bytes",
                data.len() - expected
            )));
        }

        let mut buf = &data[HEADER_SIZE..];

        let timestamps: Vec<f32> = (0..header.frame_count).map(|_| buf.get_f32()).collect();

        let frames: Vec<Vec<Vertex>> = (0..header.frame_count)
            .map(|_| {
                (0..header.point_count)
                    .map(|_| {
                        let x = buf.get_f32();
                        let y = buf.get_f32();
                        let z = buf.get_f32();
                        Vertex::new(x, y, z)
                    })
                    .collect()
            })
            .collect();

        Ok(VertexCache {
            header,
            timestamps,
            frames,
        })
    }

    /// Encode the whole cache to bytes
    pub fn encode(&self) -> LandmeshResult<Vec<u8>> {
        let frame_count = self.header.frame_count;
        if self.timestamps.len() != frame_count || self.frames.len() != frame_count {
            return Err(LandmeshError::FrameOrder(format!(
                "header declares {} frames, have {} time stamps and {} frames",
                self.header.frame_count,
                self.timestamps.len(),
                self.frames.len()
            )));
        }

        let mut buf = BytesMut::with_capacity(self.header.expected_len());
        self.header.serialize(&mut buf);
        for t in &self.timestamps {
            buf.put_f32(*t);
        }
        for (i, frame) in self.frames.iter().enumerate() {
            if frame.len() != self.header.point_count {
                return Err(LandmeshError::FrameOrder(format!(
                    "frame {} has {} vertices, header declares {}",
                    i,
                    frame.len(),
                    self.header.point_count
                )));
            }
            for v in frame {
                buf.put_f32(v.x);
                buf.put_f32(v.y);
                buf.put_f32(v.z);
            }
        }
        Ok(buf.to_vec())
    }

    /// Frame `index`, if in range
    pub fn frame(&self, index: usize) -> Option<&[Vertex]> {
        self.frames.get(index).map(Vec::as_slice)
    }
}

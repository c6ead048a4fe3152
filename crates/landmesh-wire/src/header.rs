//! Vertex cache header
//!
//! Header is 8 bytes:
//! - Bytes 0-3: Frame count (BE, signed)
//! - Bytes 4-7: Point count (BE, signed)

use bytes::{Buf, BufMut};
use landmesh_core::{LandmeshError, LandmeshResult};

/// Header size in bytes
pub const HEADER_SIZE: usize = 8;

/// Size of one f32 on the wire
pub const FLOAT_SIZE: usize = 4;

/// Size of one (x, y, z) vertex on the wire
pub const VERTEX_SIZE: usize = 3 * FLOAT_SIZE;

/// Frame and point counts of a cache
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheHeader {
    pub frame_count: usize,
    pub point_count: usize,
}

impl CacheHeader {
    /// Both counts must fit the signed 32-bit wire fields
    pub fn new(frame_count: usize, point_count: usize) -> LandmeshResult<Self> {
        for (name, value) in [("frame count", frame_count), ("point count", point_count)] {
            if i32::try_from(value).is_err() {
                return Err(LandmeshError::InvalidCacheFormat(format!(
                    "{} {} exceeds i32",
                    name, value
                )));
            }
        }
        Ok(CacheHeader {
            frame_count,
            point_count,
        })
    }

    /// Bytes of one frame's vertex block
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.point_count * VERTEX_SIZE
    }

    /// Bytes of the time stamp block
    #[inline]
    pub fn timestamps_len(&self) -> usize {
        self.frame_count * FLOAT_SIZE
    }

    /// Exact size of a complete cache with this header.
    ///
    /// Saturates instead of overflowing for headers read from untrusted input.
    pub fn expected_len(&self) -> usize {
        self.point_count
            .saturating_mul(VERTEX_SIZE)
            .saturating_mul(self.frame_count)
            .saturating_add(self.frame_count.saturating_mul(FLOAT_SIZE))
            .saturating_add(HEADER_SIZE)
    }

    /// Parse header from bytes
    pub fn parse(mut buf: &[u8]) -> LandmeshResult<Self> {
        if buf.len() < HEADER_SIZE {
            return Err(LandmeshError::BufferTooShort {
                expected: HEADER_SIZE,
                actual: buf.len(),
            });
        }

        let frame_count = buf.get_i32();
        let point_count = buf.get_i32();

        let frame_count = usize::try_from(frame_count).map_err(|_| {
            LandmeshError::InvalidCacheFormat(format!("negative frame count {}", frame_count))
        })?;
        let point_count = usize::try_from(point_count).map_err(|_| {
            LandmeshError::InvalidCacheFormat(format!("negative point count {}", point_count))
        })?;

        Ok(CacheHeader {
            frame_count,
            point_count,
        })
    }

    /// Serialize header into a buffer
    pub fn serialize<B: BufMut>(&self, buf: &mut B) {
        buf.put_i32(self.frame_count as i32);
        buf.put_i32(self.point_count as i32);
    }

    /// Serialize header to a new Vec
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(HEADER_SIZE);
        self.serialize(&mut buf);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        let header = CacheHeader::new(3, 468).unwrap();
        let bytes = header.to_bytes();

        assert_eq!(bytes.len(), HEADER_SIZE);
        assert_eq!(&bytes[0..4], &[0, 0, 0, 3]);
        assert_eq!(&bytes[4..8], &[0, 0, 0x01, 0xD4]);
    }

    #[test]
    fn test_header_parse() {
        let parsed = CacheHeader::parse(&[0, 0, 0, 2, 0, 0, 0, 5]).unwrap();
        assert_eq!(parsed, CacheHeader::new(2, 5).unwrap());
    }

    #[test]
    fn test_header_too_short() {
        let result = CacheHeader::parse(&[0u8; 5]);
        assert!(matches!(
            result,
            Err(LandmeshError::BufferTooShort {
                expected: 8,
                actual: 5
            })
        ));
    }

    #[test]
    fn test_header_negative_count() {
        let mut bytes = CacheHeader::new(1, 1).unwrap().to_bytes();
        bytes[0] = 0xFF;
        assert!(matches!(
            CacheHeader::parse(&bytes),
            Err(LandmeshError::InvalidCacheFormat(_))
        ));
    }

    #[test]
    fn test_header_rejects_oversized_count() {
        let too_many = i32::MAX as usize + 1;
        assert!(CacheHeader::new(too_many, 1).is_err());
    }

    #[test]
    fn test_expected_len() {
        let header = CacheHeader::new(2, 3).unwrap();
        // 8 + 2 * 4 + 2 * 3 * 12
        assert_eq!(header.expected_len(), 88);
    }
}

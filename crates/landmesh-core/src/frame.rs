//! Frame indices and time stamps
//!
//! Frames are numbered from zero in source order. The time stamp of a frame
//! is `index / fps` seconds.

use std::fmt;

/// Zero-based position of a frame in the source video
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameIndex(pub usize);

impl FrameIndex {
    pub const ZERO: FrameIndex = FrameIndex(0);

    #[inline]
    pub fn new(index: usize) -> Self {
        FrameIndex(index)
    }

    /// Time stamp in seconds
    #[inline]
    pub fn timestamp(self, fps: f64) -> f32 {
        (self.0 as f64 / fps) as f32
    }

    #[inline]
    pub fn next(self) -> Self {
        FrameIndex(self.0 + 1)
    }
}

impl fmt::Debug for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Time stamps for `frame_count` frames at `fps`
pub fn timestamps(frame_count: usize, fps: f64) -> Vec<f32> {
    (0..frame_count)
        .map(|i| FrameIndex(i).timestamp(fps))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp() {
        assert_eq!(FrameIndex::ZERO.timestamp(24.0), 0.0);
        assert_eq!(FrameIndex::new(12).timestamp(24.0), 0.5);
        assert_eq!(FrameIndex::new(48).timestamp(24.0), 2.0);
    }

    #[test]
    fn test_timestamps_monotonic() {
        let stamps = timestamps(100, 30.0);
        assert_eq!(stamps.len(), 100);
        assert_eq!(stamps[0], 0.0);
        for pair in stamps.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        assert!((stamps[30] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_timestamps_empty() {
        assert!(timestamps(0, 30.0).is_empty());
    }

    #[test]
    fn test_frame_index_next() {
        assert_eq!(FrameIndex::new(4).next(), FrameIndex::new(5));
        assert_eq!(format!("{:?}", FrameIndex::new(7)), "Frame(7)");
    }
}

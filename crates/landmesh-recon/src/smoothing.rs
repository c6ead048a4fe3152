//! Temporal scale smoothing
//!
//! The per-frame reference width is noisy. Each frame averages its own
//! measurement with up to `window` neighbours on each side, walking outward
//! and stopping at the first frame without a measurement. The two sides are
//! independent, so a gap only truncates the side it sits on.

use crate::ReferenceMeasurement;

/// Default neighbours averaged on each side
pub const DEFAULT_WINDOW: usize = 3;

/// Averaged reference for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedScale {
    /// Averaged head width
    pub width2d: f64,
    /// Averaged head depth
    pub depth: f64,
    /// Frames that contributed, including the frame itself
    pub count: usize,
}

impl SmoothedScale {
    /// Object-space scale, `1 / width2d`
    #[inline]
    pub fn scale(&self) -> f64 {
        1.0 / self.width2d
    }
}

/// Symmetric window smoother over a read-only measurement arena
#[derive(Debug, Clone, Copy)]
pub struct ScaleSmoother {
    window: usize,
}

impl Default for ScaleSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl ScaleSmoother {
    pub fn new(window: usize) -> Self {
        Self { window }
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Smoothed reference for frame `index`.
    ///
    /// Returns `None` when the frame has no measurement of its own.
    pub fn smooth_at(
        &self,
        measurements: &[Option<ReferenceMeasurement>],
        index: usize,
    ) -> Option<SmoothedScale> {
        let own = measurements.get(index).copied().flatten()?;

        let mut sum_w2d = own.width2d;
        let mut sum_wz = own.depth;
        let mut count = 1usize;

        let forward =
            (1..=self.window).map_while(|j| measurements.get(index + j).copied().flatten());
        let backward = (1..=self.window).map_while(|j| {
            let i = index.checked_sub(j)?;
            measurements[i]
        });

        for m in forward.chain(backward) {
            sum_w2d += m.width2d;
            sum_wz += m.depth;
            count += 1;
        }

        Some(SmoothedScale {
            width2d: sum_w2d / count as f64,
            depth: sum_wz / count as f64,
            count,
        })
    }

    /// Smoothed reference for every frame, in frame order
    pub fn smooth_all(
        &self,
        measurements: &[Option<ReferenceMeasurement>],
    ) -> Vec<Option<SmoothedScale>> {
        (0..measurements.len())
            .map(|i| self.smooth_at(measurements, i))
            .collect()
    }
}

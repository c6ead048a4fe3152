//! Reference measurement - head width and depth from two fixed landmarks

use landmesh_core::{Landmark, LandmeshError, LandmeshResult, Mesh};

/// Landmark indices spanning the head width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadIndices {
    pub left: usize,
    pub right: usize,
}

impl Default for HeadIndices {
    fn default() -> Self {
        // MediaPipe face mesh: left and right face contour
        Self {
            left: 234,
            right: 454,
        }
    }
}

impl HeadIndices {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    /// Equal indices measure a zero width on every frame
    pub fn ensure_distinct(&self) -> LandmeshResult<()> {
        if self.left == self.right {
            return Err(LandmeshError::IdenticalHeadIndices(self.left));
        }
        Ok(())
    }

    /// Both indices must differ and address a landmark of every mesh
    pub fn validate(&self, point_count: usize) -> LandmeshResult<()> {
        self.ensure_distinct()?;
        for index in [self.left, self.right] {
            if index >= point_count {
                return Err(LandmeshError::LandmarkIndexOutOfRange { index, point_count });
            }
        }
        Ok(())
    }

    fn pick<'a>(&self, mesh: &'a [Landmark]) -> Option<(&'a Landmark, &'a Landmark)> {
        Some((mesh.get(self.left)?, mesh.get(self.right)?))
    }
}

/// Per-frame scale reference
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceMeasurement {
    /// Distance between the two head landmarks
    pub width2d: f64,
    /// Mean depth of the two head landmarks
    pub depth: f64,
}

impl ReferenceMeasurement {
    pub fn new(width2d: f64, depth: f64) -> Self {
        Self { width2d, depth }
    }

    /// Measure a detected mesh. `None` if an index is outside the mesh.
    pub fn measure(mesh: &[Landmark], indices: HeadIndices) -> Option<Self> {
        let (a, b) = indices.pick(mesh)?;
        Some(ReferenceMeasurement {
            width2d: a.distance(b),
            depth: (a.z as f64 + b.z as f64) / 2.0,
        })
    }

    /// Absent mesh gives an absent measurement
    pub fn extract(mesh: Option<&Mesh>, indices: HeadIndices) -> Option<Self> {
        mesh.and_then(|m| Self::measure(m, indices))
    }
}

/// Measure every frame, keeping frame order
pub fn extract_all(
    frames: &[Option<Mesh>],
    indices: HeadIndices,
) -> Vec<Option<ReferenceMeasurement>> {
    frames
        .iter()
        .map(|frame| ReferenceMeasurement::extract(frame.as_ref(), indices))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh_with(left: Landmark, right: Landmark) -> Mesh {
        vec![Landmark::default(), left, Landmark::default(), right]
    }

    #[test]
    fn test_measure() {
        let mesh = mesh_with(Landmark::new(0.2, 0.5, 0.1), Landmark::new(0.8, 0.5, 0.3));
        let m = ReferenceMeasurement::measure(&mesh, HeadIndices::new(1, 3)).unwrap();

        let expected_width = (0.6f64 * 0.6 + 0.2 * 0.2).sqrt();
        assert!((m.width2d - expected_width).abs() < 1e-6);
        assert!((m.depth - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_absent_mesh() {
        assert!(ReferenceMeasurement::extract(None, HeadIndices::new(0, 1)).is_none());
    }

    #[test]
    fn test_index_outside_mesh() {
        let mesh = vec![Landmark::default(); 2];
        assert!(ReferenceMeasurement::measure(&mesh, HeadIndices::new(0, 5)).is_none());
    }

    #[test]
    fn test_validate_indices() {
        let indices = HeadIndices::default();
        assert!(indices.validate(478).is_ok());
        assert!(matches!(
            indices.validate(300),
            Err(LandmeshError::LandmarkIndexOutOfRange {
                index: 454,
                point_count: 300
            })
        ));
    }

    #[test]
    fn test_identical_indices_rejected() {
        let indices = HeadIndices::new(1, 1);
        assert!(matches!(
            indices.ensure_distinct(),
            Err(LandmeshError::IdenticalHeadIndices(1))
        ));
        assert!(matches!(
            indices.validate(10),
            Err(LandmeshError::IdenticalHeadIndices(1))
        ));
    }

    #[test]
    fn test_extract_all_keeps_gaps() {
        let mesh = mesh_with(Landmark::new(0.4, 0.5, 0.0), Landmark::new(0.6, 0.5, 0.0));
        let frames = vec![Some(mesh.clone()), None, Some(mesh)];
        let measurements = extract_all(&frames, HeadIndices::new(1, 3));

        assert_eq!(measurements.len(), 3);
        assert!(measurements[0].is_some());
        assert!(measurements[1].is_none());
        assert!(measurements[2].is_some());
    }
}

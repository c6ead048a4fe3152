//! Camera model selection
//!
//! The camera is described by a single dimensionless scale factor, derived
//! either from a horizontal field of view or from a sensor/focal-length
//! ratio. With neither, landmarks are reconstructed orthographically.

use std::fmt;
use std::str::FromStr;

use crate::{LandmeshError, LandmeshResult};

/// Camera model, fixed for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CameraModel {
    #[default]
    Orthographic,
    /// Pinhole camera with `scale = 2 * tan(fov / 2)`
    Perspective { scale: f64 },
}

impl CameraModel {
    /// Perspective camera from a horizontal field of view in degrees
    pub fn from_fov(fov_degrees: f64) -> LandmeshResult<Self> {
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(LandmeshError::InvalidFieldOfView(fov_degrees));
        }
        Self::perspective(2.0 * (fov_degrees / 2.0).to_radians().tan())
    }

    /// Perspective camera from physical optics
    pub fn from_focal_length(focal: FocalLength) -> LandmeshResult<Self> {
        Self::perspective(focal.sensor / focal.lens)
    }

    /// Perspective camera from a raw scale factor
    pub fn perspective(scale: f64) -> LandmeshResult<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(LandmeshError::InvalidCameraScale(scale));
        }
        Ok(CameraModel::Perspective { scale })
    }

    pub fn is_perspective(&self) -> bool {
        matches!(self, CameraModel::Perspective { .. })
    }

    /// Camera scale, if perspective
    pub fn scale(&self) -> Option<f64> {
        match self {
            CameraModel::Orthographic => None,
            CameraModel::Perspective { scale } => Some(*scale),
        }
    }
}

impl fmt::Display for CameraModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraModel::Orthographic => write!(f, "orthographic"),
            CameraModel::Perspective { scale } => write!(f, "perspective(scale={:.6})", scale),
        }
    }
}

/// Sensor size over lens focal length, written `SENSOR/LENS`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocalLength {
    pub sensor: f64,
    pub lens: f64,
}

impl FromStr for FocalLength {
    type Err = LandmeshError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LandmeshError::MalformedFocalLength(s.to_string());

        let mut parts = s.split('/');
        let (Some(sensor), Some(lens), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(malformed());
        };

        Ok(FocalLength {
            sensor: sensor.parse().map_err(|_| malformed())?,
            lens: lens.parse().map_err(|_| malformed())?,
        })
    }
}

impl fmt::Display for FocalLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.sensor, self.lens)
    }
}

/// Camera inputs as supplied by the caller, before resolution
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraConfig {
    /// Horizontal field of view in degrees
    pub fov: Option<f64>,
    /// Sensor/lens ratio
    pub focal_length: Option<FocalLength>,
}

impl CameraConfig {
    pub fn orthographic() -> Self {
        Self::default()
    }

    pub fn with_fov(fov: f64) -> Self {
        Self {
            fov: Some(fov),
            focal_length: None,
        }
    }

    pub fn with_focal_length(focal_length: FocalLength) -> Self {
        Self {
            fov: None,
            focal_length: Some(focal_length),
        }
    }

    /// Resolve to a camera model. Must run before any frame is read.
    pub fn resolve(&self) -> LandmeshResult<CameraModel> {
        match (self.fov, self.focal_length) {
            (Some(_), Some(_)) => Err(LandmeshError::ConfigurationConflict(
                "field of view and focal length are mutually exclusive".into(),
            )),
            (Some(fov), None) => CameraModel::from_fov(fov),
            (None, Some(focal)) => CameraModel::from_focal_length(focal),
            (None, None) => Ok(CameraModel::Orthographic),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fov_scale() {
        let camera = CameraModel::from_fov(90.0).unwrap();
        let scale = camera.scale().unwrap();
        assert!((scale - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_focal_length_scale() {
        let focal: FocalLength = "36/50".parse().unwrap();
        let camera = CameraModel::from_focal_length(focal).unwrap();
        assert!((camera.scale().unwrap() - 0.72).abs() < 1e-12);
    }

    #[test]
    fn test_focal_length_parse() {
        let focal: FocalLength = "23.5/35".parse().unwrap();
        assert_eq!(focal.sensor, 23.5);
        assert_eq!(focal.lens, 35.0);
    }

    #[test]
    fn test_focal_length_malformed() {
        for bad in ["", "36", "36/", "/50", "36/50/1", "a/50", "36/b", " 36/50", "36/50 "] {
            let result = bad.parse::<FocalLength>();
            assert!(
                matches!(result, Err(LandmeshError::MalformedFocalLength(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_zero_lens_rejected() {
        let focal: FocalLength = "36/0".parse().unwrap();
        let result = CameraModel::from_focal_length(focal);
        assert!(matches!(result, Err(LandmeshError::InvalidCameraScale(_))));
    }

    #[test]
    fn test_fov_outside_half_turn_rejected() {
        for fov in [0.0, -40.0, 180.0, 400.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(CameraModel::from_fov(fov), Err(LandmeshError::InvalidFieldOfView(_))),
                "accepted {}",
                fov
            );
        }
    }

    #[test]
    fn test_resolve_orthographic() {
        assert_eq!(
            CameraConfig::orthographic().resolve().unwrap(),
            CameraModel::Orthographic
        );
    }

    #[test]
    fn test_resolve_conflict() {
        let config = CameraConfig {
            fov: Some(60.0),
            focal_length: Some(FocalLength {
                sensor: 36.0,
                lens: 50.0,
            }),
        };
        assert!(matches!(
            config.resolve(),
            Err(LandmeshError::ConfigurationConflict(_))
        ));
    }

    #[test]
    fn test_resolve_fov() {
        let camera = CameraConfig::with_fov(60.0).resolve().unwrap();
        assert!(camera.is_perspective());
    }

    proptest! {
        #[test]
        fn prop_fov_in_range_gives_valid_scale(fov in 0.01f64..179.99) {
            let camera = CameraModel::from_fov(fov).unwrap();
            let scale = camera.scale().unwrap();
            prop_assert!(scale.is_finite());
            prop_assert!(scale > 0.0);
        }
    }
}

use std::path::PathBuf;

use clap::Parser;
use landmesh_core::{CameraConfig, FocalLength};
use landmesh_recon::{HeadIndices, DEFAULT_WINDOW};
use landmesh_runtime::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "landmesh")]
#[command(author, version, long_about = None)]
#[command(about = "Convert facial landmark dumps into MDD vertex caches")]
pub struct Args {
    /// Landmark dump (JSON)
    #[arg(required = true)]
    pub input: PathBuf,

    /// Output vertex cache (default: input with .mdd extension)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Horizontal field of view in degrees (perspective reconstruction)
    #[arg(long, conflicts_with = "focal_len")]
    pub fov: Option<f64>,

    /// Sensor size over lens focal length, e.g. 36/50 (perspective reconstruction)
    #[arg(long)]
    pub focal_len: Option<FocalLength>,

    /// Frames averaged on each side when smoothing the head width
    #[arg(short, long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Landmark indices spanning the head width, as LEFT,RIGHT
    #[arg(long, value_parser = parse_head_indices, default_value = "234,454")]
    pub head_indices: HeadIndices,

    /// Frame rate to use instead of the one in the dump
    #[arg(long)]
    pub fps: Option<f64>,

    /// More logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.input.with_extension("mdd"))
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            camera: CameraConfig {
                fov: self.fov,
                focal_length: self.focal_len,
            },
            head_indices: self.head_indices,
            window: self.window,
            fps_override: self.fps,
        }
    }
}

fn parse_head_indices(s: &str) -> Result<HeadIndices, String> {
    let (left, right) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LEFT,RIGHT, got {:?}", s))?;
    let left = left
        .parse()
        .map_err(|_| format!("invalid landmark index {:?}", left))?;
    let right = right
        .parse()
        .map_err(|_| format!("invalid landmark index {:?}", right))?;
    Ok(HeadIndices::new(left, right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["landmesh", "faces/take1.json"]).unwrap();

        assert_eq!(args.output_path(), PathBuf::from("faces/take1.mdd"));
        assert_eq!(args.window, 3);
        assert_eq!(args.head_indices, HeadIndices::new(234, 454));

        let config = args.pipeline_config();
        assert_eq!(config.camera, CameraConfig::orthographic());
    }

    #[test]
    fn test_focal_len() {
        let args = Args::try_parse_from(["landmesh", "in.json", "--focal-len", "36/50"]).unwrap();
        assert_eq!(
            args.focal_len,
            Some(FocalLength {
                sensor: 36.0,
                lens: 50.0
            })
        );
    }

    #[test]
    fn test_malformed_focal_len() {
        assert!(Args::try_parse_from(["landmesh", "in.json", "--focal-len", "36x50"]).is_err());
        assert!(Args::try_parse_from(["landmesh", "in.json", "--focal-len", "36/50/2"]).is_err());
    }

    #[test]
    fn test_fov_and_focal_len_conflict() {
        let result =
            Args::try_parse_from(["landmesh", "in.json", "--fov", "60", "--focal-len", "36/50"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_head_indices() {
        assert_eq!(parse_head_indices("10,20").unwrap(), HeadIndices::new(10, 20));
        assert!(parse_head_indices("10").is_err());
        assert!(parse_head_indices("10,x").is_err());
        assert!(parse_head_indices("-1,3").is_err());
    }

    #[test]
    fn test_explicit_output_and_verbosity() {
        let args = Args::try_parse_from([
            "landmesh", "in.json", "-o", "out/face.mdd", "-vv", "--fps", "25",
        ])
        .unwrap();
        assert_eq!(args.output_path(), PathBuf::from("out/face.mdd"));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.pipeline_config().fps_override, Some(25.0));
    }
}

//! landmesh - facial landmark dump to MDD vertex cache
//!
//! Usage:
//!   landmesh take1.json                       # orthographic, writes take1.mdd
//!   landmesh take1.json --fov 63              # perspective from field of view
//!   landmesh take1.json --focal-len 36/50     # perspective from sensor/lens
//!   landmesh take1.json -o face.mdd -vv       # explicit output, debug logging

mod args;

use anyhow::{Context, Result};
use clap::Parser;
use landmesh_runtime::{init_tracing, JsonLandmarkSource, Pipeline, PipelineOutcome};

use args::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose).context("installing log subscriber")?;
    tracing::debug!(?args, "arguments parsed");

    // Camera conflicts are reported before the input is opened
    let pipeline = Pipeline::new(args.pipeline_config()).context("invalid configuration")?;

    let mut source = JsonLandmarkSource::open(&args.input)
        .with_context(|| format!("reading landmarks from {}", args.input.display()))?;

    let output = args.output_path();
    let outcome = pipeline
        .run_to_path(&mut source, &output)
        .with_context(|| format!("writing vertex cache {}", output.display()))?;

    match outcome {
        PipelineOutcome::Written {
            frame_count,
            point_count,
            stats,
        } => {
            println!(
                "Wrote {} frames x {} points to {} ({} without a usable face)",
                frame_count,
                point_count,
                output.display(),
                stats.fallback_frames()
            );
        }
        PipelineOutcome::Empty { frame_count } => {
            println!(
                "No face detected in {} frames; nothing written",
                frame_count
            );
        }
    }

    Ok(())
}

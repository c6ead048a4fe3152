//! landmesh Runtime - Pipeline orchestration
//!
//! The pipeline is a batch transform:
//! 1. Resolve the camera model (before touching the source)
//! 2. Drain the landmark source, fixing the point count
//! 3. Measure the head reference on every frame
//! 4. Smooth the reference over a symmetric window
//! 5. Back-project every frame
//! 6. Stream the vertex cache to the sink in frame order

pub mod config;
pub mod pipeline;
pub mod source;
pub mod telemetry;

pub use config::*;
pub use pipeline::*;
pub use source::*;
pub use telemetry::*;

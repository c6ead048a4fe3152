//! landmesh Wire Format - Vertex cache (MDD) encoding
//!
//! A vertex cache is big-endian throughout:
//! - Header: frame count (i32), point count (i32)
//! - Time stamps: one f32 per frame
//! - Frames: point count (x, y, z) f32 triples per frame
//!
//! The writer streams frames to any `std::io::Write` sink; the decoder
//! parses a complete file back for verification.

pub mod cache;
pub mod header;
pub mod writer;

pub use cache::*;
pub use header::*;
pub use writer::*;

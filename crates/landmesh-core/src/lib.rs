//! landmesh Core - Fundamental types and primitives
//!
//! This crate defines the types shared by every stage of the pipeline:
//! - Landmarks, meshes and output vertices
//! - Frame indices and time stamps
//! - Video metadata (dimensions, frame rate)
//! - Camera model selection
//! - The error type

pub mod camera;
pub mod error;
pub mod frame;
pub mod landmark;
pub mod video;

pub use camera::*;
pub use error::*;
pub use frame::*;
pub use landmark::*;
pub use video::*;

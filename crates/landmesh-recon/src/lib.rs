//! landmesh Reconstruction
//!
//! Turns normalized landmarks into reconstructed vertex positions.
//!
//! # Stages
//!
//! - Reference measurement: head width and mean depth from two fixed landmarks
//! - Temporal scale smoothing: symmetric window over the measurements,
//!   truncated at the first gap on each side
//! - Back-projection: orthographic, or perspective scaled by the smoothed
//!   reference width
//!
//! Every stage is a pure per-frame function over read-only inputs.

pub mod projection;
pub mod reference;
pub mod smoothing;

pub use projection::*;
pub use reference::*;
pub use smoothing::*;

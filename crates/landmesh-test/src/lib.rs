//! landmesh Test Harness
//!
//! This crate provides:
//! - Seeded synthetic face sequences with motion, jitter and detection gaps
//! - JSON landmark dumps built from those sequences
//! - End-to-end pipeline scenarios

pub mod scenarios;
pub mod synthetic;

pub use scenarios::*;
pub use synthetic::*;

//! # Config Crate
//!
//! Centralized configuration constants for the B-rep mesh assembly pipeline.
//! Type sentinels, option defaults, diagnostic levels and buffer strides are
//! defined here so that the engine and its consumers agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{MISSING_FACE_TYPE, COORDS_PER_VERTEX};
//!
//! // A face the kernel could not triangulate carries the sentinel type
//! let face_types = [0, MISSING_FACE_TYPE, 3];
//! assert_eq!(face_types.iter().filter(|t| **t == MISSING_FACE_TYPE).count(), 1);
//!
//! // Flat coordinate buffers hold three floats per vertex
//! let vertices = [0.0f32; 12];
//! assert_eq!(vertices.len() / COORDS_PER_VERTEX, 4);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Renderer-Facing**: Strides match the flat buffers handed to renderers
//! - **Kernel-Compatible**: Sentinels never collide with kernel type codes

pub mod constants;

#[cfg(test)]
mod tests;

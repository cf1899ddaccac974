//! # B-rep Mesh
//!
//! Mesh assembly and synthesis for B-rep tessellation results.
//! Turns per-face triangulations and per-edge polylines into one set of
//! flat, renderer-ready buffers.
//!
//! ## Architecture
//!
//! ```text
//! Kernel → ShapeRecords → concat → [normals] → [edges] → precision → MeshBuffers
//! ```
//!
//! ## Stages
//!
//! - **Concatenation**: per-face local indices re-based into one global mesh
//! - **Normal synthesis**: area-weighted vertex normals when the kernel has none
//! - **Edge synthesis**: triangle-boundary wireframe when the shape has no edges
//! - **Precision conversion**: `f64` working coordinates narrowed to `f32`
//! - **Handoff**: owned, move-only [`MeshBuffers`] returned to the caller
//!
//! ## Usage
//!
//! ```rust
//! use brep_mesh::{tessellate, CollectingSink, RecordedShape, TessellateOptions};
//! use glam::DVec3;
//!
//! let mut shape = RecordedShape::cuboid(DVec3::new(10.0, 20.0, 30.0));
//! let options = TessellateOptions::new(0.1).with_debug(1);
//! let mut sink = CollectingSink::new();
//!
//! let mesh = tessellate(&mut shape, &options, &mut sink).unwrap();
//! assert_eq!(mesh.triangle_count(), 12);
//! assert!(!sink.has_errors());
//! ```

pub mod buffers;
pub mod concat;
pub mod diagnostics;
pub mod edges;
pub mod error;
pub mod handoff;
pub mod kernel;
pub mod normals;
pub mod options;
pub mod precision;
pub mod record;
pub mod tessellate;

pub use buffers::{EdgeView, FaceView, MeshBuffers, MeshParts};
pub use diagnostics::{
    CollectingSink, Diagnostic, DiagnosticSink, NullSink, Severity, Stage, StderrSink,
};
pub use error::{KernelError, RecordError, TessellateError, TessellateResult};
pub use kernel::{Kernel, MeshingStatus, RecordedShape};
pub use options::{MeshingParams, TessellateOptions};
pub use record::{CurveKind, EdgeRecord, FaceRecord, Orientation, ShapeRecords, SurfaceKind};
pub use tessellate::{assemble, tessellate};

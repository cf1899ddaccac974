//! # Configuration Constants
//!
//! Centralized constants for the mesh assembly pipeline.
//!
//! ## Categories
//!
//! - **Sentinels**: Type codes marking degraded or synthesized primitives
//! - **Defaults**: Tessellation option defaults
//! - **Diagnostics**: Debug level thresholds
//! - **Strides**: Element counts per primitive in the flat output buffers
//! - **Limits**: Bounds imposed by the output index type

// =============================================================================
// SENTINEL CONSTANTS
// =============================================================================

/// Face type recorded for a face without usable triangulation.
///
/// Kernel surface type codes are non-negative, so a negative value can never
/// be mistaken for a real surface classification.
///
/// # Example
///
/// ```rust
/// use config::constants::MISSING_FACE_TYPE;
///
/// let face_type = MISSING_FACE_TYPE;
/// assert!(face_type < 0);
/// ```
pub const MISSING_FACE_TYPE: i32 = -1;

/// Edge type recorded for an edge without a polygon on its triangulation.
pub const MISSING_EDGE_TYPE: i32 = -1;

/// Edge type recorded for edges derived from triangle boundaries.
///
/// Distinct from [`MISSING_EDGE_TYPE`] and from every kernel curve type, so
/// consumers can tell synthesized wireframes apart from B-rep edges.
///
/// # Example
///
/// ```rust
/// use config::constants::{MISSING_EDGE_TYPE, SYNTHESIZED_EDGE_TYPE};
///
/// assert_ne!(SYNTHESIZED_EDGE_TYPE, MISSING_EDGE_TYPE);
/// assert!(SYNTHESIZED_EDGE_TYPE < 0);
/// ```
pub const SYNTHESIZED_EDGE_TYPE: i32 = -2;

// =============================================================================
// OPTION DEFAULTS
// =============================================================================

/// Default angular tolerance (radians) handed to the kernel mesher.
///
/// # Example
///
/// ```rust
/// use config::constants::DEFAULT_ANGULAR_TOLERANCE;
///
/// let user_value: Option<f64> = None;
/// let angular_tolerance = user_value.unwrap_or(DEFAULT_ANGULAR_TOLERANCE);
/// assert_eq!(angular_tolerance, 0.3);
/// ```
pub const DEFAULT_ANGULAR_TOLERANCE: f64 = 0.3;

/// Faces are tessellated unless the caller opts out.
pub const DEFAULT_COMPUTE_FACES: bool = true;

/// Edges are tessellated unless the caller opts out.
pub const DEFAULT_COMPUTE_EDGES: bool = true;

/// Kernel meshing and record collection run in parallel by default.
pub const DEFAULT_PARALLEL: bool = true;

/// Diagnostics are silent by default.
pub const DEFAULT_DEBUG_LEVEL: u8 = 0;

/// Stage timings are not reported by default.
pub const DEFAULT_TIMEIT: bool = false;

// =============================================================================
// DIAGNOSTIC LEVELS
// =============================================================================

/// Minimum debug level at which warnings and info messages are reported.
pub const DEBUG_LEVEL_INFO: u8 = 1;

/// Minimum debug level at which per-primitive debug messages are reported.
pub const DEBUG_LEVEL_DEBUG: u8 = 2;

/// Minimum debug level at which per-vertex trace messages are reported.
///
/// # Example
///
/// ```rust
/// use config::constants::{DEBUG_LEVEL_DEBUG, DEBUG_LEVEL_INFO, DEBUG_LEVEL_TRACE};
///
/// assert!(DEBUG_LEVEL_INFO < DEBUG_LEVEL_DEBUG);
/// assert!(DEBUG_LEVEL_DEBUG < DEBUG_LEVEL_TRACE);
/// ```
pub const DEBUG_LEVEL_TRACE: u8 = 3;

// =============================================================================
// BUFFER STRIDES
// =============================================================================

/// Floats per vertex in the flat position and normal buffers.
pub const COORDS_PER_VERTEX: usize = 3;

/// Indices per triangle in the flat index buffer.
pub const INDICES_PER_TRIANGLE: usize = 3;

/// Floats per segment in the flat segment buffer (two endpoints).
pub const COORDS_PER_SEGMENT: usize = 6;

/// Segments emitted for every synthesized triangle edge.
pub const SEGMENTS_PER_SYNTHESIZED_EDGE: u32 = 3;

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Maximum number of vertices in one assembled mesh.
///
/// Global triangle indices are stored as `u32`.
///
/// # Example
///
/// ```rust
/// use config::constants::MAX_VERTICES;
///
/// let vertex_count = 1_000_000usize;
/// assert!(vertex_count <= MAX_VERTICES);
/// ```
pub const MAX_VERTICES: usize = u32::MAX as usize;

/// Tolerance on the length of a unit normal after narrowing to `f32`.
pub const NORMAL_LENGTH_TOLERANCE: f32 = 1e-4;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Checks whether a face or edge type code is one of the sentinels.
///
/// # Example
///
/// ```rust
/// use config::constants::{is_sentinel_type, MISSING_FACE_TYPE, SYNTHESIZED_EDGE_TYPE};
///
/// assert!(is_sentinel_type(MISSING_FACE_TYPE));
/// assert!(is_sentinel_type(SYNTHESIZED_EDGE_TYPE));
/// assert!(!is_sentinel_type(0));
/// ```
#[inline]
pub fn is_sentinel_type(value: i32) -> bool {
    value < 0
}

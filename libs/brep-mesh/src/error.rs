//! # Mesh Assembly Errors
//!
//! Error types for record validation, kernel access and mesh assembly.

use std::collections::TryReserveError;
use thiserror::Error;

/// Problems with a single face or edge record.
///
/// A record error never aborts a run: the orchestrator degrades the offending
/// primitive to its sentinel record and reports a warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A triangle references a node the face does not have.
    #[error("triangle {triangle} references vertex {index} but the face has {vertex_count} vertices")]
    IndexOutOfRange {
        triangle: usize,
        index: i64,
        vertex_count: usize,
    },

    /// Normals are present but not one per vertex.
    #[error("face has {normals} normals for {vertices} vertices")]
    NormalCountMismatch { normals: usize, vertices: usize },
}

/// Errors reported by the tessellation kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    /// The face has no triangulation attached.
    #[error("triangulation is null for face {face}")]
    MissingTriangulation { face: usize },

    /// The edge has no polygon on the triangulation of its face.
    #[error("no face polygon for edge {edge}")]
    MissingPolygon { edge: usize },

    /// The edge does not bound any face.
    #[error("no face ancestors for edge {edge}")]
    NoAncestorFace { edge: usize },

    /// The kernel produced a record the engine cannot use.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    /// Shape-level kernel failure.
    #[error("kernel failure: {0}")]
    Failure(String),
}

impl KernelError {
    /// Creates a shape-level failure.
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    /// Returns true if the error only affects one face or edge.
    ///
    /// Such errors degrade the primitive instead of aborting the shape.
    pub fn is_per_primitive(&self) -> bool {
        !matches!(self, Self::Failure(_))
    }
}

/// Errors that abort mesh assembly for a whole shape.
#[derive(Debug, Error)]
pub enum TessellateError {
    /// Kernel-level failure; no buffers are produced for the shape.
    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),

    /// Options rejected before the kernel is invoked.
    #[error("Invalid options: {message}")]
    InvalidOptions { message: String },

    /// Global indices would not fit the output index type.
    #[error("Too many vertices: {count} (max: {max})")]
    TooManyVertices { count: usize, max: usize },

    /// A working buffer could not be allocated.
    #[error("Allocation of {len} elements for {buffer} failed")]
    Allocation {
        buffer: &'static str,
        len: usize,
        #[source]
        source: TryReserveError,
    },

    /// Records disagree with the totals computed for them.
    #[error("{what} count mismatch: expected {expected}, got {actual}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A per-primitive count does not fit the output count type.
    #[error("Too many {what}: {count} (max: {max})")]
    CountOverflow {
        what: &'static str,
        count: usize,
        max: usize,
    },

    /// Output buffers break one of their invariants.
    #[error("Validation failed: {message}")]
    Validation { message: String },
}

impl TessellateError {
    /// Creates an invalid options error.
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a count mismatch error.
    pub fn count_mismatch(what: &'static str, expected: usize, actual: usize) -> Self {
        Self::CountMismatch {
            what,
            expected,
            actual,
        }
    }
}

/// Result type alias for mesh assembly.
pub type TessellateResult<T> = Result<T, TessellateError>;

/// Allocates an empty vector able to hold `len` elements without reallocating.
///
/// Allocation failure is reported instead of aborting the process.
pub(crate) fn try_buffer<T>(buffer: &'static str, len: usize) -> TessellateResult<Vec<T>> {
    let mut values = Vec::new();
    values
        .try_reserve_exact(len)
        .map_err(|source| TessellateError::Allocation {
            buffer,
            len,
            source,
        })?;
    Ok(values)
}

/// Converts a per-primitive count to the `u32` used by the count tables.
pub(crate) fn to_count(what: &'static str, count: usize) -> TessellateResult<u32> {
    u32::try_from(count).map_err(|_| TessellateError::CountOverflow {
        what,
        count,
        max: u32::MAX as usize,
    })
}

//! # Mesh Concatenation
//!
//! Merges independently indexed per-face triangulations into one globally
//! indexed mesh, and per-edge polylines into one segment buffer.
//!
//! ## Algorithm
//!
//! Two cursors walk the output: a vertex cursor and a triangle cursor. Each
//! face is appended at the cursors, its triangle indices shifted by the
//! vertex cursor, then both cursors advance by the face's counts. Faces are
//! processed in kernel order; degraded faces append nothing but still occupy
//! their slot in the per-face tables.

use crate::error::{to_count, try_buffer, TessellateError, TessellateResult};
use crate::record::{EdgeRecord, FaceRecord};
use config::constants::MAX_VERTICES;
use glam::DVec3;

// =============================================================================
// TOTALS
// =============================================================================

/// Sizes of the global face buffers, computed before concatenation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FaceTotals {
    pub faces: usize,
    pub vertices: usize,
    pub triangles: usize,
}

impl FaceTotals {
    /// Sums the counts of all face records.
    pub fn of(faces: &[FaceRecord]) -> Self {
        faces.iter().fold(
            Self {
                faces: faces.len(),
                ..Self::default()
            },
            |totals, face| Self {
                vertices: totals.vertices + face.vertex_count(),
                triangles: totals.triangles + face.triangle_count(),
                ..totals
            },
        )
    }
}

/// Total segment count of all edge records.
pub fn total_segments(edges: &[EdgeRecord]) -> usize {
    edges.iter().map(EdgeRecord::segment_count).sum()
}

// =============================================================================
// WORKING BUFFERS
// =============================================================================

/// Globally indexed face geometry at working precision.
#[derive(Debug, Default, PartialEq)]
pub struct FaceBuffers {
    pub vertices: Vec<DVec3>,
    /// Empty until filled by the kernel or the normal synthesizer
    pub normals: Vec<DVec3>,
    pub triangles: Vec<[u32; 3]>,
    pub triangles_per_face: Vec<u32>,
    pub face_types: Vec<i32>,
}

impl FaceBuffers {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// Concatenated edge geometry at working precision.
#[derive(Debug, Default, PartialEq)]
pub struct EdgeBuffers {
    pub segments: Vec<[DVec3; 2]>,
    pub segments_per_edge: Vec<u32>,
    pub edge_types: Vec<i32>,
}

impl EdgeBuffers {
    /// Returns the number of edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_types.len()
    }

    /// Returns the number of segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

// =============================================================================
// CONCATENATION
// =============================================================================

/// Concatenates face records into global buffers, consuming them.
///
/// Normals are copied only when `has_normals` is set; otherwise the normal
/// buffer stays empty for the synthesizer to fill. Copied normals are
/// normalized; zero-length or non-finite ones become [`DVec3::ZERO`].
///
/// Local indices are assumed valid; see [`FaceRecord::validate`].
///
/// # Errors
///
/// - [`TessellateError::TooManyVertices`] if global indices overflow `u32`
/// - [`TessellateError::CountOverflow`] if a face has more than `u32::MAX`
///   triangles
/// - [`TessellateError::Allocation`] if a buffer cannot be reserved
/// - [`TessellateError::CountMismatch`] if the records disagree with `totals`
///   or a face claims normals it does not have
///
/// # Example
///
/// ```rust
/// use brep_mesh::concat::{concatenate_faces, FaceTotals};
/// use brep_mesh::FaceRecord;
/// use glam::DVec3;
///
/// let tri = || FaceRecord::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y], None, vec![[0, 1, 2]], 0);
/// let faces = vec![tri(), tri()];
/// let totals = FaceTotals::of(&faces);
///
/// let buffers = concatenate_faces(faces, totals, false).unwrap();
/// assert_eq!(buffers.triangles, vec![[0, 1, 2], [3, 4, 5]]);
/// ```
pub fn concatenate_faces(
    faces: Vec<FaceRecord>,
    totals: FaceTotals,
    has_normals: bool,
) -> TessellateResult<FaceBuffers> {
    if totals.vertices > MAX_VERTICES {
        return Err(TessellateError::TooManyVertices {
            count: totals.vertices,
            max: MAX_VERTICES,
        });
    }
    if faces.len() != totals.faces {
        return Err(TessellateError::count_mismatch("face", totals.faces, faces.len()));
    }

    let mut buffers = FaceBuffers {
        vertices: try_buffer("vertices", totals.vertices)?,
        normals: try_buffer("normals", if has_normals { totals.vertices } else { 0 })?,
        triangles: try_buffer("triangles", totals.triangles)?,
        triangles_per_face: try_buffer("triangles_per_face", totals.faces)?,
        face_types: try_buffer("face_types", totals.faces)?,
    };

    let mut vertex_cursor = 0usize;
    let mut triangle_cursor = 0usize;

    for face in faces {
        if vertex_cursor + face.vertex_count() > totals.vertices {
            return Err(TessellateError::count_mismatch(
                "vertex",
                totals.vertices,
                vertex_cursor + face.vertex_count(),
            ));
        }
        if triangle_cursor + face.triangle_count() > totals.triangles {
            return Err(TessellateError::count_mismatch(
                "triangle",
                totals.triangles,
                triangle_cursor + face.triangle_count(),
            ));
        }

        // Bounded by MAX_VERTICES above
        let base = vertex_cursor as u32;

        buffers.vertices.extend_from_slice(&face.vertices);
        if has_normals {
            match &face.normals {
                Some(normals) if normals.len() == face.vertex_count() => {
                    buffers
                        .normals
                        .extend(normals.iter().map(|n| n.normalize_or_zero()));
                }
                Some(normals) => {
                    return Err(TessellateError::count_mismatch(
                        "normal",
                        face.vertex_count(),
                        normals.len(),
                    ));
                }
                None if face.vertex_count() == 0 => {}
                None => {
                    return Err(TessellateError::count_mismatch(
                        "normal",
                        face.vertex_count(),
                        0,
                    ));
                }
            }
        }

        buffers
            .triangles
            .extend(face.triangles.iter().map(|tri| tri.map(|i| i + base)));

        buffers
            .triangles_per_face
            .push(to_count("triangles", face.triangle_count())?);
        buffers.face_types.push(face.face_type);

        vertex_cursor += face.vertex_count();
        triangle_cursor += face.triangle_count();
    }

    if vertex_cursor != totals.vertices {
        return Err(TessellateError::count_mismatch("vertex", totals.vertices, vertex_cursor));
    }
    if triangle_cursor != totals.triangles {
        return Err(TessellateError::count_mismatch(
            "triangle",
            totals.triangles,
            triangle_cursor,
        ));
    }

    Ok(buffers)
}

/// Concatenates edge records into one segment buffer, consuming them.
///
/// Segments carry coordinates, not indices, so nothing is re-based.
pub fn concatenate_edges(
    edges: Vec<EdgeRecord>,
    total_segments: usize,
) -> TessellateResult<EdgeBuffers> {
    let mut buffers = EdgeBuffers {
        segments: try_buffer("segments", total_segments)?,
        segments_per_edge: try_buffer("segments_per_edge", edges.len())?,
        edge_types: try_buffer("edge_types", edges.len())?,
    };

    for edge in edges {
        buffers.segments.extend_from_slice(&edge.segments);
        buffers
            .segments_per_edge
            .push(to_count("segments", edge.segment_count())?);
        buffers.edge_types.push(edge.edge_type);
    }

    if buffers.segment_count() != total_segments {
        return Err(TessellateError::count_mismatch(
            "segment",
            total_segments,
            buffers.segment_count(),
        ));
    }

    Ok(buffers)
}

//! # Mesh Buffers
//!
//! The renderer-ready result of one tessellation run.
//!
//! All coordinate buffers are flat `f32` arrays; index, count and type
//! tables keep their integer types. The buffers are owned and move-only:
//! whoever holds a [`MeshBuffers`] owns every array in it, and dropping it
//! releases them.
//!
//! ## Layout
//!
//! ```text
//! vertices            [x, y, z, ...]                3 × vertex count
//! normals             [nx, ny, nz, ...]             3 × vertex count
//! triangles           [i0, i1, i2, ...]             3 × triangle count
//! triangles_per_face  [n, ...]                      face count
//! face_types          [t, ...]                      face count
//! segments            [x0, y0, z0, x1, y1, z1, ...] 6 × segment count
//! segments_per_edge   [n, ...]                      edge count
//! edge_types          [t, ...]                      edge count
//! object_vertices     [x, y, z, ...]                3 × object vertex count
//! ```
//!
//! Triangles of face `i` follow those of faces `0..i` in `triangles`; the
//! same holds for segments of edges.

use crate::error::{TessellateError, TessellateResult};
use config::constants::{
    COORDS_PER_SEGMENT, COORDS_PER_VERTEX, INDICES_PER_TRIANGLE, NORMAL_LENGTH_TOLERANCE,
};
use serde::Serialize;

/// Flat mesh buffers handed to the consumer.
///
/// # Example
///
/// ```rust
/// use brep_mesh::{assemble, FaceRecord, NullSink, ShapeRecords, TessellateOptions};
/// use glam::DVec3;
///
/// let records = ShapeRecords {
///     faces: vec![FaceRecord::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y], None, vec![[0, 1, 2]], 0)],
///     ..ShapeRecords::default()
/// };
/// let options = TessellateOptions::new(0.1);
/// let mesh = assemble(records, &options, &mut NullSink).unwrap();
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.triangles(), &[0, 1, 2]);
/// assert_eq!(mesh.edge_count(), 1);
/// ```
#[derive(Debug, PartialEq, Serialize)]
pub struct MeshBuffers {
    vertices: Vec<f32>,
    normals: Vec<f32>,
    triangles: Vec<u32>,
    triangles_per_face: Vec<u32>,
    face_types: Vec<i32>,
    segments: Vec<f32>,
    segments_per_edge: Vec<u32>,
    edge_types: Vec<i32>,
    object_vertices: Vec<f32>,
}

/// The raw arrays of a [`MeshBuffers`], for consumers that take ownership.
#[derive(Debug, Default, PartialEq)]
pub struct MeshParts {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub triangles: Vec<u32>,
    pub triangles_per_face: Vec<u32>,
    pub face_types: Vec<i32>,
    pub segments: Vec<f32>,
    pub segments_per_edge: Vec<u32>,
    pub edge_types: Vec<i32>,
    pub object_vertices: Vec<f32>,
}

/// Triangles of one face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceView<'a> {
    /// Position in kernel face order
    pub index: usize,
    pub face_type: i32,
    /// Global vertex indices, three per triangle
    pub triangles: &'a [u32],
}

impl FaceView<'_> {
    /// Returns the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / INDICES_PER_TRIANGLE
    }
}

/// Segments of one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeView<'a> {
    /// Position in kernel edge order
    pub index: usize,
    pub edge_type: i32,
    /// Endpoint coordinates, six per segment
    pub segments: &'a [f32],
}

impl EdgeView<'_> {
    /// Returns the number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len() / COORDS_PER_SEGMENT
    }
}

impl MeshBuffers {
    /// Wraps buffers produced by the handoff without re-checking them.
    pub(crate) fn from_valid_parts(parts: MeshParts) -> Self {
        Self {
            vertices: parts.vertices,
            normals: parts.normals,
            triangles: parts.triangles,
            triangles_per_face: parts.triangles_per_face,
            face_types: parts.face_types,
            segments: parts.segments,
            segments_per_edge: parts.segments_per_edge,
            edge_types: parts.edge_types,
            object_vertices: parts.object_vertices,
        }
    }

    /// Consumes the buffers and returns the raw arrays.
    pub fn into_parts(self) -> MeshParts {
        MeshParts {
            vertices: self.vertices,
            normals: self.normals,
            triangles: self.triangles,
            triangles_per_face: self.triangles_per_face,
            face_types: self.face_types,
            segments: self.segments,
            segments_per_edge: self.segments_per_edge,
            edge_types: self.edge_types,
            object_vertices: self.object_vertices,
        }
    }

    // -------------------------------------------------------------------------
    // Buffers
    // -------------------------------------------------------------------------

    /// Vertex positions as `[x, y, z, ...]`.
    pub fn vertices(&self) -> &[f32] {
        &self.vertices
    }

    /// Vertex normals as `[nx, ny, nz, ...]`, unit length or zero.
    pub fn normals(&self) -> &[f32] {
        &self.normals
    }

    /// Global triangle indices as `[i0, i1, i2, ...]`.
    pub fn triangles(&self) -> &[u32] {
        &self.triangles
    }

    pub fn triangles_per_face(&self) -> &[u32] {
        &self.triangles_per_face
    }

    pub fn face_types(&self) -> &[i32] {
        &self.face_types
    }

    /// Segment endpoints as `[x0, y0, z0, x1, y1, z1, ...]`.
    pub fn segments(&self) -> &[f32] {
        &self.segments
    }

    pub fn segments_per_edge(&self) -> &[u32] {
        &self.segments_per_edge
    }

    pub fn edge_types(&self) -> &[i32] {
        &self.edge_types
    }

    /// Topological vertex positions as `[x, y, z, ...]`.
    pub fn object_vertices(&self) -> &[f32] {
        &self.object_vertices
    }

    // -------------------------------------------------------------------------
    // Counts
    // -------------------------------------------------------------------------

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / COORDS_PER_VERTEX
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / INDICES_PER_TRIANGLE
    }

    pub fn face_count(&self) -> usize {
        self.face_types.len()
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len() / COORDS_PER_SEGMENT
    }

    pub fn edge_count(&self) -> usize {
        self.edge_types.len()
    }

    pub fn object_vertex_count(&self) -> usize {
        self.object_vertices.len() / COORDS_PER_VERTEX
    }

    /// Returns true if there are no triangles, segments or object vertices.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty() && self.segments.is_empty() && self.object_vertices.is_empty()
    }

    // -------------------------------------------------------------------------
    // Per-primitive views
    // -------------------------------------------------------------------------

    /// Iterates faces in kernel order with their slice of `triangles`.
    pub fn faces(&self) -> impl Iterator<Item = FaceView<'_>> + '_ {
        let ranges = split_ranges(&self.triangles_per_face, INDICES_PER_TRIANGLE);
        ranges
            .zip(&self.face_types)
            .enumerate()
            .map(move |(index, (range, &face_type))| FaceView {
                index,
                face_type,
                triangles: self.triangles.get(range).unwrap_or(&[]),
            })
    }

    /// Iterates edges in kernel order with their slice of `segments`.
    pub fn edges(&self) -> impl Iterator<Item = EdgeView<'_>> + '_ {
        let ranges = split_ranges(&self.segments_per_edge, COORDS_PER_SEGMENT);
        ranges
            .zip(&self.edge_types)
            .enumerate()
            .map(move |(index, (range, &edge_type))| EdgeView {
                index,
                edge_type,
                segments: self.segments.get(range).unwrap_or(&[]),
            })
    }

    /// Triangle indices of face `index`, or `None` past the last face.
    pub fn face_triangles(&self, index: usize) -> Option<&[u32]> {
        self.faces().nth(index).map(|face| face.triangles)
    }

    /// Segment coordinates of edge `index`, or `None` past the last edge.
    pub fn edge_segments(&self, index: usize) -> Option<&[f32]> {
        self.edges().nth(index).map(|edge| edge.segments)
    }

    // -------------------------------------------------------------------------
    // Validation
    // -------------------------------------------------------------------------

    /// Re-checks every buffer invariant.
    pub fn validate(&self) -> TessellateResult<()> {
        check_stride("vertices", self.vertices.len(), COORDS_PER_VERTEX)?;
        check_stride("triangles", self.triangles.len(), INDICES_PER_TRIANGLE)?;
        check_stride("segments", self.segments.len(), COORDS_PER_SEGMENT)?;
        check_stride("object_vertices", self.object_vertices.len(), COORDS_PER_VERTEX)?;

        if self.normals.len() != self.vertices.len() {
            return Err(TessellateError::validation(format!(
                "{} normal coordinates for {} vertex coordinates",
                self.normals.len(),
                self.vertices.len()
            )));
        }
        if self.triangles_per_face.len() != self.face_types.len() {
            return Err(TessellateError::validation(format!(
                "{} triangle counts for {} faces",
                self.triangles_per_face.len(),
                self.face_types.len()
            )));
        }
        if self.segments_per_edge.len() != self.edge_types.len() {
            return Err(TessellateError::validation(format!(
                "{} segment counts for {} edges",
                self.segments_per_edge.len(),
                self.edge_types.len()
            )));
        }

        check_counts(
            "triangles_per_face",
            &self.triangles_per_face,
            self.triangles.len() / INDICES_PER_TRIANGLE,
        )?;
        check_counts(
            "segments_per_edge",
            &self.segments_per_edge,
            self.segments.len() / COORDS_PER_SEGMENT,
        )?;

        let vertex_count = self.vertices.len() / COORDS_PER_VERTEX;
        if let Some(&index) = self.triangles.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(TessellateError::validation(format!(
                "triangle index {index} out of range for {vertex_count} vertices"
            )));
        }

        for (i, normal) in self.normals.chunks_exact(COORDS_PER_VERTEX).enumerate() {
            let length_sq: f32 = normal.iter().map(|c| c * c).sum();
            let is_zero = length_sq == 0.0;
            let is_unit = (length_sq.sqrt() - 1.0).abs() <= NORMAL_LENGTH_TOLERANCE;
            if !(is_zero || is_unit) {
                return Err(TessellateError::validation(format!(
                    "normal {i} has length {}",
                    length_sq.sqrt()
                )));
            }
        }

        Ok(())
    }
}

impl TryFrom<MeshParts> for MeshBuffers {
    type Error = TessellateError;

    /// Rebuilds buffers from raw arrays, rejecting inconsistent ones.
    fn try_from(parts: MeshParts) -> TessellateResult<Self> {
        let buffers = Self::from_valid_parts(parts);
        buffers.validate()?;
        Ok(buffers)
    }
}

/// Turns per-primitive counts into consecutive ranges of a flat buffer.
fn split_ranges(
    counts: &[u32],
    stride: usize,
) -> impl Iterator<Item = std::ops::Range<usize>> + '_ {
    counts.iter().scan(0usize, move |start, &count| {
        let end = *start + count as usize * stride;
        let range = *start..end;
        *start = end;
        Some(range)
    })
}

fn check_stride(name: &str, len: usize, stride: usize) -> TessellateResult<()> {
    if len % stride != 0 {
        return Err(TessellateError::validation(format!(
            "{name} has {len} elements, not a multiple of {stride}"
        )));
    }
    Ok(())
}

fn check_counts(name: &str, counts: &[u32], expected: usize) -> TessellateResult<()> {
    let sum: usize = counts.iter().map(|&c| c as usize).sum();
    if sum != expected {
        return Err(TessellateError::validation(format!(
            "{name} sums to {sum}, buffer holds {expected}"
        )));
    }
    Ok(())
}

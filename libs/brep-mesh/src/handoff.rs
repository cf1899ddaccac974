//! # Buffer Handoff
//!
//! Converts the working-precision buffers of one run into the owned
//! [`MeshBuffers`] handed to the consumer.
//!
//! The working buffers are consumed: coordinates are narrowed into fresh
//! `f32` arrays and the `f64` originals are dropped here, while index, count
//! and type tables are moved without copying.

use crate::buffers::{MeshBuffers, MeshParts};
use crate::concat::{EdgeBuffers, FaceBuffers};
use crate::error::{try_buffer, TessellateResult};
use crate::precision::{narrow_into, point_coords, segment_coords};
use config::constants::{COORDS_PER_SEGMENT, COORDS_PER_VERTEX, INDICES_PER_TRIANGLE};
use glam::DVec3;
use std::iter;

/// Everything assembled for one shape, at working precision.
#[derive(Debug, Default)]
pub struct WorkingBuffers {
    pub faces: FaceBuffers,
    pub edges: EdgeBuffers,
    pub object_vertices: Vec<DVec3>,
}

/// Narrows and packages the working buffers.
///
/// Normals are expected to be complete. A vertex without one is handed off
/// with the zero vector. Every output array is reserved up front, so either
/// all buffers are produced or none are.
///
/// # Errors
///
/// [`TessellateError::Allocation`](crate::TessellateError::Allocation) if an
/// output array cannot be reserved.
///
/// # Example
///
/// ```rust
/// use brep_mesh::concat::FaceBuffers;
/// use brep_mesh::handoff::{hand_off, WorkingBuffers};
/// use glam::DVec3;
///
/// let working = WorkingBuffers {
///     faces: FaceBuffers {
///         vertices: vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///         normals: vec![DVec3::Z; 3],
///         triangles: vec![[0, 1, 2]],
///         triangles_per_face: vec![1],
///         face_types: vec![0],
///     },
///     ..WorkingBuffers::default()
/// };
///
/// let mesh = hand_off(working).unwrap();
/// assert_eq!(mesh.vertices().len(), 9);
/// assert_eq!(mesh.normals()[2], 1.0);
/// ```
pub fn hand_off(working: WorkingBuffers) -> TessellateResult<MeshBuffers> {
    let WorkingBuffers {
        faces,
        edges,
        object_vertices,
    } = working;

    let FaceBuffers {
        vertices,
        normals,
        triangles,
        triangles_per_face,
        face_types,
    } = faces;

    let coords = vertices.len().saturating_mul(COORDS_PER_VERTEX);

    let mut flat_vertices = try_buffer("vertices", coords)?;
    let mut flat_normals = try_buffer("normals", coords)?;
    let mut flat_triangles =
        try_buffer("triangles", triangles.len().saturating_mul(INDICES_PER_TRIANGLE))?;
    let mut flat_segments =
        try_buffer("segments", edges.segments.len().saturating_mul(COORDS_PER_SEGMENT))?;
    let mut flat_object_vertices =
        try_buffer("object_vertices", object_vertices.len().saturating_mul(COORDS_PER_VERTEX))?;

    narrow_into(&mut flat_vertices, point_coords(&vertices));
    let padded = normals
        .iter()
        .copied()
        .chain(iter::repeat(DVec3::ZERO))
        .take(vertices.len());
    narrow_into(&mut flat_normals, padded.flat_map(|n| n.to_array()));
    flat_triangles.extend(triangles.into_iter().flatten());
    narrow_into(&mut flat_segments, segment_coords(&edges.segments));
    narrow_into(&mut flat_object_vertices, point_coords(&object_vertices));

    let parts = MeshParts {
        vertices: flat_vertices,
        normals: flat_normals,
        triangles: flat_triangles,
        triangles_per_face,
        face_types,
        segments: flat_segments,
        segments_per_edge: edges.segments_per_edge,
        edge_types: edges.edge_types,
        object_vertices: flat_object_vertices,
    };

    Ok(MeshBuffers::from_valid_parts(parts))
}

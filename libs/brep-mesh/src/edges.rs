//! # Edge Synthesis
//!
//! Wireframe edges derived from triangle boundaries, for shapes whose kernel
//! reported no B-rep edges.
//!
//! Every triangle `(v0, v1, v2)` becomes one edge of three segments
//! `v0 → v1`, `v1 → v2`, `v2 → v0`. Edges shared by neighbouring triangles
//! are emitted once per triangle.

use crate::concat::EdgeBuffers;
use crate::error::{try_buffer, TessellateResult};
use config::constants::{SEGMENTS_PER_SYNTHESIZED_EDGE, SYNTHESIZED_EDGE_TYPE};
use glam::DVec3;

/// Builds one synthesized edge per triangle.
///
/// Edge types are [`SYNTHESIZED_EDGE_TYPE`].
///
/// # Panics
///
/// Panics if a triangle index is not below `vertices.len()`.
///
/// # Example
///
/// ```rust
/// use brep_mesh::edges::synthesize_edges;
/// use glam::DVec3;
///
/// let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y];
/// let edges = synthesize_edges(&vertices, &[[0, 1, 2]]).unwrap();
/// assert_eq!(edges.edge_count(), 1);
/// assert_eq!(edges.segment_count(), 3);
/// ```
pub fn synthesize_edges(
    vertices: &[DVec3],
    triangles: &[[u32; 3]],
) -> TessellateResult<EdgeBuffers> {
    let per_edge = SEGMENTS_PER_SYNTHESIZED_EDGE as usize;

    let mut buffers = EdgeBuffers {
        segments: try_buffer("segments", triangles.len() * per_edge)?,
        segments_per_edge: try_buffer("segments_per_edge", triangles.len())?,
        edge_types: try_buffer("edge_types", triangles.len())?,
    };

    for tri in triangles {
        let [a, b, c] = tri.map(|i| vertices[i as usize]);
        buffers.segments.extend_from_slice(&[[a, b], [b, c], [c, a]]);
        buffers.segments_per_edge.push(SEGMENTS_PER_SYNTHESIZED_EDGE);
        buffers.edge_types.push(SYNTHESIZED_EDGE_TYPE);
    }

    Ok(buffers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_triangle_is_closed_loop() {
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y];
        let edges = synthesize_edges(&vertices, &[[0, 1, 2]]).unwrap();

        assert_eq!(
            edges.segments,
            vec![
                [DVec3::ZERO, DVec3::X],
                [DVec3::X, DVec3::Y],
                [DVec3::Y, DVec3::ZERO],
            ]
        );
        assert_eq!(edges.segments_per_edge, vec![3]);
        assert_eq!(edges.edge_types, vec![SYNTHESIZED_EDGE_TYPE]);
    }

    #[test]
    fn test_counts_follow_triangles() {
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y];
        let triangles = [[0, 1, 2], [0, 2, 3]];
        let edges = synthesize_edges(&vertices, &triangles).unwrap();

        assert_eq!(edges.edge_count(), 2);
        assert_eq!(edges.segment_count(), 6);
        assert_eq!(edges.segments_per_edge.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_no_triangles() {
        let edges = synthesize_edges(&[DVec3::ONE], &[]).unwrap();
        assert_eq!(edges, EdgeBuffers::default());
    }
}

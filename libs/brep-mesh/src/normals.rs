//! # Normal Synthesis
//!
//! Smooth per-vertex normals for meshes whose kernel supplied none.
//!
//! Every triangle adds its unnormalized face normal to each of its three
//! vertices, so larger triangles weigh more. Accumulators are normalized at
//! the end; a vertex without a usable contribution gets the zero vector.

use crate::error::{try_buffer, TessellateResult};
use glam::DVec3;

/// Unnormalized normal of triangle `(v0, v1, v2)`: `(v2 - v1) × (v0 - v1)`.
///
/// Counter-clockwise winding seen from the tip of the normal. The length is
/// twice the triangle area.
#[inline]
pub fn face_normal(v0: DVec3, v1: DVec3, v2: DVec3) -> DVec3 {
    (v2 - v1).cross(v0 - v1)
}

/// Computes one unit normal per vertex from globally indexed triangles.
///
/// Vertices touched by no triangle, or only by zero-area ones, get
/// [`DVec3::ZERO`]. The result never contains NaN or infinity.
///
/// # Panics
///
/// Panics if a triangle index is not below `vertices.len()`.
///
/// # Example
///
/// ```rust
/// use brep_mesh::normals::synthesize_normals;
/// use glam::DVec3;
///
/// let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y];
/// let normals = synthesize_normals(&vertices, &[[0, 1, 2]]).unwrap();
/// assert!(normals.iter().all(|n| *n == DVec3::Z));
/// ```
pub fn synthesize_normals(
    vertices: &[DVec3],
    triangles: &[[u32; 3]],
) -> TessellateResult<Vec<DVec3>> {
    let mut normals = try_buffer("normals", vertices.len())?;
    normals.resize(vertices.len(), DVec3::ZERO);

    for tri in triangles {
        let [i0, i1, i2] = tri.map(|i| i as usize);
        let normal = face_normal(vertices[i0], vertices[i1], vertices[i2]);

        normals[i0] += normal;
        normals[i1] += normal;
        normals[i2] += normal;
    }

    // Normalize
    for normal in &mut normals {
        *normal = normal.normalize_or_zero();
    }

    Ok(normals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_triangle_points_up() {
        let vertices = [
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ];
        let normals = synthesize_normals(&vertices, &[[0, 1, 2]]).unwrap();
        for n in normals {
            assert_relative_eq!(n.length(), 1.0, epsilon = 1e-12);
            assert_relative_eq!(n.z, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_flipped_winding_points_down() {
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y];
        let normals = synthesize_normals(&vertices, &[[0, 2, 1]]).unwrap();
        assert!(normals.iter().all(|n| *n == DVec3::NEG_Z));
    }

    #[test]
    fn test_face_normal_length_is_twice_area() {
        let n = face_normal(DVec3::ZERO, DVec3::new(2.0, 0.0, 0.0), DVec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(n.length(), 4.0);
    }

    #[test]
    fn test_shared_vertex_blends_by_area() {
        // Two triangles meeting at a right angle along the X axis
        let vertices = [
            DVec3::ZERO,
            DVec3::X,
            DVec3::Y,
            DVec3::Z,
        ];
        let normals = synthesize_normals(&vertices, &[[0, 1, 2], [0, 3, 1]]).unwrap();

        // Vertex 2 only sees the XY triangle, vertex 3 only the XZ one
        assert_relative_eq!(normals[2].z, 1.0, epsilon = 1e-12);
        assert_relative_eq!(normals[3].y, 1.0, epsilon = 1e-12);

        // Shared vertices get the bisector
        let expected = DVec3::new(0.0, 1.0, 1.0).normalize();
        assert_relative_eq!(normals[0].dot(expected), 1.0, epsilon = 1e-12);
        assert_relative_eq!(normals[1].dot(expected), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_unreferenced_vertex_is_zero() {
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::ONE];
        let normals = synthesize_normals(&vertices, &[[0, 1, 2]]).unwrap();
        assert_eq!(normals[3], DVec3::ZERO);
    }

    #[test]
    fn test_degenerate_triangle_is_zero_not_nan() {
        // Collinear points
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::new(2.0, 0.0, 0.0)];
        let normals = synthesize_normals(&vertices, &[[0, 1, 2]]).unwrap();
        for n in normals {
            assert!(n.is_finite());
            assert_eq!(n, DVec3::ZERO);
        }
    }

    #[test]
    fn test_opposite_triangles_cancel_to_zero() {
        let vertices = [DVec3::ZERO, DVec3::X, DVec3::Y];
        let normals = synthesize_normals(&vertices, &[[0, 1, 2], [0, 2, 1]]).unwrap();
        assert!(normals.iter().all(|n| *n == DVec3::ZERO));
    }

    #[test]
    fn test_no_vertices() {
        assert!(synthesize_normals(&[], &[]).unwrap().is_empty());
    }
}

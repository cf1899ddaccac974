//! # Face and Edge Records
//!
//! Per-primitive tessellation results as produced by the kernel adapter.
//! Each record is indexed locally; the concatenator re-bases them into the
//! global buffers and consumes them.

use crate::error::RecordError;
use config::constants::{is_sentinel_type, MISSING_EDGE_TYPE, MISSING_FACE_TYPE};
use glam::DVec3;
use serde::{Deserialize, Serialize};

// =============================================================================
// CLASSIFIERS
// =============================================================================

/// Surface classification of a face, as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceKind {
    Plane = 0,
    Cylinder = 1,
    Cone = 2,
    Sphere = 3,
    Torus = 4,
    BezierSurface = 5,
    BSplineSurface = 6,
    SurfaceOfRevolution = 7,
    SurfaceOfExtrusion = 8,
    OffsetSurface = 9,
    OtherSurface = 10,
}

impl SurfaceKind {
    const ALL: [SurfaceKind; 11] = [
        Self::Plane,
        Self::Cylinder,
        Self::Cone,
        Self::Sphere,
        Self::Torus,
        Self::BezierSurface,
        Self::BSplineSurface,
        Self::SurfaceOfRevolution,
        Self::SurfaceOfExtrusion,
        Self::OffsetSurface,
        Self::OtherSurface,
    ];

    /// Returns the integer code stored in `face_types`.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Looks up the kind for a `face_types` code. Sentinels map to `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

/// Curve classification of an edge, as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveKind {
    Line = 0,
    Circle = 1,
    Ellipse = 2,
    Hyperbola = 3,
    Parabola = 4,
    BezierCurve = 5,
    BSplineCurve = 6,
    OffsetCurve = 7,
    OtherCurve = 8,
}

impl CurveKind {
    const ALL: [CurveKind; 9] = [
        Self::Line,
        Self::Circle,
        Self::Ellipse,
        Self::Hyperbola,
        Self::Parabola,
        Self::BezierCurve,
        Self::BSplineCurve,
        Self::OffsetCurve,
        Self::OtherCurve,
    ];

    /// Returns the integer code stored in `edge_types`.
    #[inline]
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Looks up the kind for an `edge_types` code. Sentinels map to `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        usize::try_from(code)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

/// Orientation of a face within its shape.
///
/// Reversed faces have their triangle winding flipped; internal faces have
/// their normals flipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Forward,
    Reversed,
    Internal,
    External,
}

// =============================================================================
// FACE RECORD
// =============================================================================

/// Tessellation of a single face.
///
/// Triangle indices reference `vertices` of this face only, zero-based.
///
/// # Example
///
/// ```rust
/// use brep_mesh::FaceRecord;
/// use glam::DVec3;
///
/// let face = FaceRecord::new(
///     vec![DVec3::ZERO, DVec3::X, DVec3::Y],
///     None,
///     vec![[0, 1, 2]],
///     0,
/// );
/// assert_eq!(face.vertex_count(), 3);
/// assert!(face.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    /// Node positions
    pub vertices: Vec<DVec3>,
    /// Per-node normals, all or nothing
    pub normals: Option<Vec<DVec3>>,
    /// Local triangle indices
    pub triangles: Vec<[u32; 3]>,
    /// Surface type code, or [`MISSING_FACE_TYPE`]
    pub face_type: i32,
}

impl FaceRecord {
    /// Creates a face record from already zero-based data.
    pub fn new(
        vertices: Vec<DVec3>,
        normals: Option<Vec<DVec3>>,
        triangles: Vec<[u32; 3]>,
        face_type: i32,
    ) -> Self {
        Self {
            vertices,
            normals,
            triangles,
            face_type,
        }
    }

    /// The zero-length record standing in for a face without triangulation.
    pub fn missing() -> Self {
        Self {
            vertices: Vec::new(),
            normals: None,
            triangles: Vec::new(),
            face_type: MISSING_FACE_TYPE,
        }
    }

    /// Builds a record from a kernel triangulation with 1-based node indices.
    ///
    /// Reversed faces get their winding flipped by swapping the second and
    /// third index. Supplied normals are normalized (zero stays zero) and
    /// flipped for internal faces.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::IndexOutOfRange`] for index `0` or any index
    /// past the node count, and [`RecordError::NormalCountMismatch`] when
    /// the normals are not one per node.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::{FaceRecord, Orientation};
    /// use glam::DVec3;
    ///
    /// let nodes = vec![DVec3::ZERO, DVec3::X, DVec3::Y];
    /// let face = FaceRecord::from_one_based(nodes, None, &[[1, 2, 3]], Orientation::Reversed, 0)
    ///     .unwrap();
    /// assert_eq!(face.triangles, vec![[0, 2, 1]]);
    /// ```
    pub fn from_one_based(
        nodes: Vec<DVec3>,
        normals: Option<Vec<DVec3>>,
        triangles: &[[i32; 3]],
        orientation: Orientation,
        face_type: i32,
    ) -> Result<Self, RecordError> {
        let vertex_count = nodes.len();

        let to_local = |triangle: usize, index: i32| -> Result<u32, RecordError> {
            let out_of_range = RecordError::IndexOutOfRange {
                triangle,
                index: i64::from(index),
                vertex_count,
            };
            let local = u32::try_from(index)
                .ok()
                .and_then(|i| i.checked_sub(1))
                .ok_or(out_of_range.clone())?;
            if local as usize >= vertex_count {
                return Err(out_of_range);
            }
            Ok(local)
        };

        let mut local_triangles = Vec::with_capacity(triangles.len());
        for (t, &[a, b, c]) in triangles.iter().enumerate() {
            let a = to_local(t, a)?;
            let b = to_local(t, b)?;
            let c = to_local(t, c)?;
            local_triangles.push(match orientation {
                Orientation::Reversed => [a, c, b],
                _ => [a, b, c],
            });
        }

        let normals = match normals {
            Some(normals) if normals.len() != vertex_count => {
                return Err(RecordError::NormalCountMismatch {
                    normals: normals.len(),
                    vertices: vertex_count,
                });
            }
            Some(normals) => Some(
                normals
                    .into_iter()
                    .map(|n| {
                        let n = n.normalize_or_zero();
                        if orientation == Orientation::Internal {
                            -n
                        } else {
                            n
                        }
                    })
                    .collect(),
            ),
            None => None,
        };

        Ok(Self {
            vertices: nodes,
            normals,
            triangles: local_triangles,
            face_type,
        })
    }

    /// Returns the number of nodes.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Returns true if the kernel supplied normals for this face.
    #[inline]
    pub fn has_normals(&self) -> bool {
        self.normals.is_some()
    }

    /// Returns true for the degraded sentinel record.
    ///
    /// Any negative type code counts: faces have no other sentinel.
    #[inline]
    pub fn is_missing(&self) -> bool {
        is_sentinel_type(self.face_type)
    }

    /// Returns the surface classification, if the type code is not a sentinel.
    pub fn kind(&self) -> Option<SurfaceKind> {
        SurfaceKind::from_code(self.face_type)
    }

    /// Checks that normals match the nodes and all indices are local.
    pub fn validate(&self) -> Result<(), RecordError> {
        let vertex_count = self.vertices.len();

        if let Some(normals) = &self.normals {
            if normals.len() != vertex_count {
                return Err(RecordError::NormalCountMismatch {
                    normals: normals.len(),
                    vertices: vertex_count,
                });
            }
        }

        for (t, triangle) in self.triangles.iter().enumerate() {
            if let Some(&index) = triangle.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(RecordError::IndexOutOfRange {
                    triangle: t,
                    index: i64::from(index),
                    vertex_count,
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// EDGE RECORD
// =============================================================================

/// Tessellation of a single edge as a list of line segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Segment endpoints in world coordinates
    pub segments: Vec<[DVec3; 2]>,
    /// Curve type code, or [`MISSING_EDGE_TYPE`]
    pub edge_type: i32,
}

impl EdgeRecord {
    /// Creates an edge record from segments.
    pub fn new(segments: Vec<[DVec3; 2]>, edge_type: i32) -> Self {
        Self {
            segments,
            edge_type,
        }
    }

    /// The zero-length record standing in for an edge without a polygon.
    pub fn missing() -> Self {
        Self {
            segments: Vec::new(),
            edge_type: MISSING_EDGE_TYPE,
        }
    }

    /// Builds consecutive segments from a polyline of `n` points.
    ///
    /// Produces `n - 1` segments; fewer than two points yield none.
    ///
    /// # Example
    ///
    /// ```rust
    /// use brep_mesh::EdgeRecord;
    /// use glam::DVec3;
    ///
    /// let edge = EdgeRecord::from_polyline(&[DVec3::ZERO, DVec3::X, DVec3::ONE], 0);
    /// assert_eq!(edge.segment_count(), 2);
    /// assert_eq!(edge.segments[1], [DVec3::X, DVec3::ONE]);
    /// ```
    pub fn from_polyline(points: &[DVec3], edge_type: i32) -> Self {
        let segments = points.windows(2).map(|pair| [pair[0], pair[1]]).collect();
        Self {
            segments,
            edge_type,
        }
    }

    /// Returns the number of segments.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the degraded sentinel record.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.edge_type == MISSING_EDGE_TYPE
    }

    /// Returns the curve classification, if the type code is not a sentinel.
    pub fn kind(&self) -> Option<CurveKind> {
        CurveKind::from_code(self.edge_type)
    }
}

// =============================================================================
// SHAPE RECORDS
// =============================================================================

/// Everything the kernel produced for one shape.
///
/// Faces and edges are in kernel enumeration order, which consumers rely on
/// to map `face_types` and `edge_types` back to the source topology.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecords {
    pub faces: Vec<FaceRecord>,
    pub edges: Vec<EdgeRecord>,
    /// Positions of the topological vertices
    pub object_vertices: Vec<DVec3>,
}

impl ShapeRecords {
    /// Creates empty records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there is nothing to assemble.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty() && self.edges.is_empty() && self.object_vertices.is_empty()
    }
}

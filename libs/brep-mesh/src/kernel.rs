//! # Tessellation Kernel
//!
//! The seam between the engine and the B-rep kernel that meshes a shape.
//!
//! A [`Kernel`] meshes its shape once, then hands out one record per face
//! and per edge, in the kernel's own enumeration order, plus the positions
//! of the topological vertices. [`RecordedShape`] is an in-memory kernel
//! replaying prepared records.

use crate::error::KernelError;
use crate::options::MeshingParams;
use crate::record::{CurveKind, EdgeRecord, FaceRecord, Orientation, SurfaceKind};
use glam::DVec3;

/// Outcome of [`Kernel::mesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MeshingStatus {
    /// Mesher completed
    pub done: bool,
    /// Kernel status flags; zero when meshing was clean
    pub flags: u32,
}

impl MeshingStatus {
    /// A completed run without status flags.
    pub fn done() -> Self {
        Self { done: true, flags: 0 }
    }
}

/// A B-rep kernel holding one shape.
///
/// `face` and `edge` are read from several threads when record collection
/// runs in parallel, hence the `Sync` bound.
pub trait Kernel: Sync {
    /// Meshes the shape with the given tolerances.
    ///
    /// An `Err` aborts the run for this shape.
    fn mesh(&mut self, params: &MeshingParams) -> Result<MeshingStatus, KernelError>;

    /// Number of faces in enumeration order.
    fn face_count(&self) -> usize;

    /// Tessellation of face `index`, with zero-based local indices.
    ///
    /// Per-face errors degrade the face; [`KernelError::Failure`] aborts.
    fn face(&self, index: usize) -> Result<FaceRecord, KernelError>;

    /// Number of edges in enumeration order.
    fn edge_count(&self) -> usize;

    /// Polyline of edge `index` on the triangulation of an adjacent face.
    ///
    /// Per-edge errors degrade the edge; [`KernelError::Failure`] aborts.
    fn edge(&self, index: usize) -> Result<EdgeRecord, KernelError>;

    /// Positions of the topological vertices.
    fn vertices(&self) -> Result<Vec<DVec3>, KernelError>;
}

// =============================================================================
// RECORDED SHAPE
// =============================================================================

/// In-memory kernel serving prepared face and edge results.
///
/// Records only become readable after [`Kernel::mesh`] has run, mirroring a
/// kernel whose triangulations are attached by the mesher.
///
/// # Example
///
/// ```rust
/// use brep_mesh::{tessellate, NullSink, RecordedShape, TessellateOptions};
/// use glam::DVec3;
///
/// let mut shape = RecordedShape::cuboid(DVec3::ONE);
/// let mesh = tessellate(&mut shape, &TessellateOptions::new(0.1), &mut NullSink).unwrap();
///
/// assert_eq!(mesh.face_count(), 6);
/// assert_eq!(mesh.triangle_count(), 12);
/// assert_eq!(mesh.edge_count(), 12);
/// assert_eq!(mesh.object_vertex_count(), 8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordedShape {
    faces: Vec<Result<FaceRecord, KernelError>>,
    edges: Vec<Result<EdgeRecord, KernelError>>,
    vertices: Vec<DVec3>,
    mesh_failure: Option<String>,
    status_flags: u32,
    meshed: bool,
    last_params: Option<MeshingParams>,
}

impl RecordedShape {
    /// Creates a shape without faces, edges or vertices.
    pub fn new() -> Self {
        Self::default()
    }

    /// An axis-aligned box from the origin to `size`.
    ///
    /// Six planar faces of two triangles each, with outward normals, twelve
    /// straight edges and eight vertices.
    pub fn cuboid(size: DVec3) -> Self {
        let corner = |i: usize| {
            DVec3::new(
                (i & 1) as f64 * size.x,
                ((i >> 1) & 1) as f64 * size.y,
                ((i >> 2) & 1) as f64 * size.z,
            )
        };

        // Corner loops, counter-clockwise seen from outside
        let sides: [([usize; 4], DVec3); 6] = [
            ([0, 2, 3, 1], DVec3::NEG_Z),
            ([4, 5, 7, 6], DVec3::Z),
            ([0, 1, 5, 4], DVec3::NEG_Y),
            ([2, 6, 7, 3], DVec3::Y),
            ([0, 4, 6, 2], DVec3::NEG_X),
            ([1, 3, 7, 5], DVec3::X),
        ];

        let mut shape = Self::new();
        for (corners, normal) in sides {
            let face = FaceRecord::from_one_based(
                corners.map(corner).to_vec(),
                Some(vec![normal; 4]),
                &[[1, 2, 3], [1, 3, 4]],
                Orientation::Forward,
                SurfaceKind::Plane.code(),
            );
            shape.faces.push(face.map_err(KernelError::from));
        }

        for i in 0..8 {
            for bit in [1, 2, 4] {
                if i & bit == 0 {
                    shape = shape.with_edge(EdgeRecord::from_polyline(
                        &[corner(i), corner(i | bit)],
                        CurveKind::Line.code(),
                    ));
                }
            }
        }

        (0..8).fold(shape, |shape, i| shape.with_vertex(corner(i)))
    }

    pub fn with_face(mut self, face: FaceRecord) -> Self {
        self.faces.push(Ok(face));
        self
    }

    /// Adds a face whose triangulation is missing.
    pub fn with_missing_face(mut self) -> Self {
        let face = self.faces.len();
        self.faces.push(Err(KernelError::MissingTriangulation { face }));
        self
    }

    /// Adds a face that fails with the given error.
    pub fn with_face_error(mut self, error: KernelError) -> Self {
        self.faces.push(Err(error));
        self
    }

    pub fn with_edge(mut self, edge: EdgeRecord) -> Self {
        self.edges.push(Ok(edge));
        self
    }

    /// Adds an edge without a polygon on its face triangulation.
    pub fn with_missing_edge(mut self) -> Self {
        let edge = self.edges.len();
        self.edges.push(Err(KernelError::MissingPolygon { edge }));
        self
    }

    /// Adds an edge that fails with the given error.
    pub fn with_edge_error(mut self, error: KernelError) -> Self {
        self.edges.push(Err(error));
        self
    }

    pub fn with_vertex(mut self, vertex: DVec3) -> Self {
        self.vertices.push(vertex);
        self
    }

    /// Makes [`Kernel::mesh`] fail with a shape-level error.
    pub fn with_mesh_failure(mut self, message: impl Into<String>) -> Self {
        self.mesh_failure = Some(message.into());
        self
    }

    /// Status flags reported by a completed mesh run.
    pub fn with_status_flags(mut self, flags: u32) -> Self {
        self.status_flags = flags;
        self
    }

    /// Returns true once [`Kernel::mesh`] has succeeded.
    pub fn is_meshed(&self) -> bool {
        self.meshed
    }

    /// Parameters of the last [`Kernel::mesh`] call.
    pub fn last_params(&self) -> Option<MeshingParams> {
        self.last_params
    }
}

impl Kernel for RecordedShape {
    fn mesh(&mut self, params: &MeshingParams) -> Result<MeshingStatus, KernelError> {
        self.last_params = Some(*params);
        if let Some(message) = &self.mesh_failure {
            return Err(KernelError::failure(message.clone()));
        }
        self.meshed = true;
        Ok(MeshingStatus {
            done: true,
            flags: self.status_flags,
        })
    }

    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn face(&self, index: usize) -> Result<FaceRecord, KernelError> {
        let face = self
            .faces
            .get(index)
            .ok_or_else(|| KernelError::failure(format!("face {index} out of range")))?;
        if !self.meshed {
            return Err(KernelError::MissingTriangulation { face: index });
        }
        face.clone()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edge(&self, index: usize) -> Result<EdgeRecord, KernelError> {
        let edge = self
            .edges
            .get(index)
            .ok_or_else(|| KernelError::failure(format!("edge {index} out of range")))?;
        if !self.meshed {
            return Err(KernelError::MissingPolygon { edge: index });
        }
        edge.clone()
    }

    fn vertices(&self) -> Result<Vec<DVec3>, KernelError> {
        Ok(self.vertices.clone())
    }
}

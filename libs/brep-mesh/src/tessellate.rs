//! # Tessellation Orchestrator
//!
//! Drives one shape from kernel to [`MeshBuffers`].
//!
//! ## Pipeline
//!
//! ```text
//! mesh → faces → edges → vertices → concatenate → [normals] → [edge synthesis] → handoff
//! ```
//!
//! Collection from the kernel may run in parallel; everything after it is
//! sequential and deterministic, so assembling the same records twice yields
//! identical buffers.
//!
//! ## Degradation
//!
//! A face or edge the kernel cannot deliver is replaced by its zero-length
//! sentinel record and reported as a warning. The remaining primitives keep
//! their positions. Shape-level kernel failures abort the run.

use crate::buffers::MeshBuffers;
use crate::concat::{concatenate_edges, concatenate_faces, total_segments, FaceTotals};
use crate::diagnostics::{Diagnostic, DiagnosticSink, Reporter, Severity, Stage};
use crate::edges::synthesize_edges;
use crate::error::{KernelError, TessellateResult};
use crate::handoff::{hand_off, WorkingBuffers};
use crate::kernel::Kernel;
use crate::normals::synthesize_normals;
use crate::options::TessellateOptions;
use crate::record::{EdgeRecord, FaceRecord, ShapeRecords};
use rayon::prelude::*;

/// Meshes the kernel's shape and assembles the result.
///
/// # Errors
///
/// Invalid options, a failed mesher, a shape-level kernel failure or an
/// assembly error. Each is also reported to `sink` as an error diagnostic.
pub fn tessellate(
    kernel: &mut impl Kernel,
    options: &TessellateOptions,
    sink: &mut dyn DiagnosticSink,
) -> TessellateResult<MeshBuffers> {
    let mut reporter = Reporter::new(sink, options.debug, options.timeit);
    options
        .validate()
        .map_err(|e| reporter.fail(Stage::Options, e))?;

    let total = reporter.start();

    if options.compute_faces || options.compute_edges {
        let timer = reporter.start();
        let status = kernel
            .mesh(&options.meshing_params())
            .map_err(|e| reporter.fail(Stage::Meshing, e))?;
        if !status.done {
            let error = KernelError::failure("mesher did not complete");
            return Err(reporter.fail(Stage::Meshing, error).into());
        }
        if status.flags != 0 {
            reporter.info(
                Stage::Meshing,
                format!("mesher status flags {:#x}", status.flags),
            );
        }
        reporter.finish(timer, Stage::Meshing, "mesh shape", 1);
    }

    let faces = if options.compute_faces {
        let timer = reporter.start();
        let results = collect(kernel.face_count(), options.parallel, |i| kernel.face(i));
        let faces = resolve(results, Stage::Faces, FaceRecord::missing, &mut reporter)?;
        reporter.finish(timer, Stage::Faces, "collect faces", 1);
        faces
    } else {
        Vec::new()
    };

    let edges = if options.compute_edges {
        let timer = reporter.start();
        let results = collect(kernel.edge_count(), options.parallel, |i| kernel.edge(i));
        let edges = resolve(results, Stage::Edges, EdgeRecord::missing, &mut reporter)?;
        reporter.finish(timer, Stage::Edges, "collect edges", 1);
        edges
    } else {
        Vec::new()
    };

    let timer = reporter.start();
    let object_vertices = kernel
        .vertices()
        .map_err(|e| reporter.fail(Stage::Vertices, e))?;
    reporter.finish(timer, Stage::Vertices, "collect vertices", 1);

    let records = ShapeRecords {
        faces,
        edges,
        object_vertices,
    };
    let mesh = assemble_with(records, options, &mut reporter)?;

    reporter.finish(total, Stage::Total, "overall", 0);
    Ok(mesh)
}

/// Assembles already collected records into [`MeshBuffers`].
///
/// Faces whose records are malformed are degraded like kernel failures.
/// Normals are synthesized unless every face with vertices carries them;
/// edges are synthesized when `compute_edges` is set and there are no edge
/// records.
///
/// # Example
///
/// ```rust
/// use brep_mesh::{assemble, CollectingSink, FaceRecord, ShapeRecords, TessellateOptions};
/// use glam::DVec3;
///
/// let records = ShapeRecords {
///     faces: vec![FaceRecord::new(vec![DVec3::ZERO, DVec3::X, DVec3::Y], None, vec![[0, 1, 2]], 0)],
///     ..ShapeRecords::default()
/// };
/// let mut sink = CollectingSink::new();
/// let mesh = assemble(records, &TessellateOptions::new(0.1), &mut sink).unwrap();
///
/// assert_eq!(&mesh.normals()[..3], &[0.0, 0.0, 1.0]);
/// assert_eq!(mesh.edge_types(), &[-2]);
/// ```
pub fn assemble(
    records: ShapeRecords,
    options: &TessellateOptions,
    sink: &mut dyn DiagnosticSink,
) -> TessellateResult<MeshBuffers> {
    let mut reporter = Reporter::new(sink, options.debug, options.timeit);
    let total = reporter.start();
    let mesh = assemble_with(records, options, &mut reporter)?;
    reporter.finish(total, Stage::Total, "overall", 0);
    Ok(mesh)
}

fn assemble_with(
    records: ShapeRecords,
    options: &TessellateOptions,
    reporter: &mut Reporter<'_>,
) -> TessellateResult<MeshBuffers> {
    let ShapeRecords {
        mut faces,
        edges,
        object_vertices,
    } = records;

    for (index, face) in faces.iter_mut().enumerate() {
        if let Err(e) = face.validate() {
            reporter.warning_for(Stage::Faces, index, KernelError::from(e).to_string());
            *face = FaceRecord::missing();
        }
    }

    if reporter.enabled(Severity::Debug) {
        for (index, face) in faces.iter().enumerate() {
            reporter.emit(
                Diagnostic::new(
                    Severity::Debug,
                    Stage::Faces,
                    format!(
                        "type {}, {} vertices, {} triangles",
                        face.face_type,
                        face.vertex_count(),
                        face.triangle_count()
                    ),
                )
                .with_primitive(index),
            );
        }
    }

    let has_normals = has_normals(&faces);
    let totals = FaceTotals::of(&faces);
    reporter.info(
        Stage::Concatenation,
        format!(
            "{} faces, {} vertices, {} triangles",
            totals.faces, totals.vertices, totals.triangles
        ),
    );

    let timer = reporter.start();
    let mut face_buffers = concatenate_faces(faces, totals, has_normals)
        .map_err(|e| reporter.fail(Stage::Concatenation, e))?;
    reporter.finish(timer, Stage::Concatenation, "concatenate faces", 2);

    if !has_normals {
        let timer = reporter.start();
        face_buffers.normals = synthesize_normals(&face_buffers.vertices, &face_buffers.triangles)
            .map_err(|e| reporter.fail(Stage::Normals, e))?;
        reporter.finish(timer, Stage::Normals, "synthesize normals", 2);
        reporter.info(
            Stage::Normals,
            format!("synthesized {} normals", face_buffers.normals.len()),
        );
    }

    let edge_buffers = if options.compute_edges && edges.is_empty() {
        let timer = reporter.start();
        let buffers = synthesize_edges(&face_buffers.vertices, &face_buffers.triangles)
            .map_err(|e| reporter.fail(Stage::EdgeSynthesis, e))?;
        reporter.finish(timer, Stage::EdgeSynthesis, "synthesize edges", 2);
        reporter.info(
            Stage::EdgeSynthesis,
            format!("synthesized {} edges", buffers.edge_count()),
        );
        buffers
    } else {
        let timer = reporter.start();
        let segments = total_segments(&edges);
        let buffers = concatenate_edges(edges, segments)
            .map_err(|e| reporter.fail(Stage::Concatenation, e))?;
        reporter.finish(timer, Stage::Concatenation, "concatenate edges", 2);
        buffers
    };

    if reporter.enabled(Severity::Trace) {
        for (index, vertex) in object_vertices.iter().enumerate() {
            reporter.emit(
                Diagnostic::new(Severity::Trace, Stage::Vertices, format!("{vertex}"))
                    .with_primitive(index),
            );
        }
    }

    let timer = reporter.start();
    let mesh = hand_off(WorkingBuffers {
        faces: face_buffers,
        edges: edge_buffers,
        object_vertices,
    })
    .map_err(|e| reporter.fail(Stage::Handoff, e))?;
    reporter.finish(timer, Stage::Handoff, "hand off buffers", 2);

    Ok(mesh)
}

/// True when every face that has vertices also has normals, and at least
/// one face has vertices.
fn has_normals(faces: &[FaceRecord]) -> bool {
    let mut with_vertices = faces.iter().filter(|f| f.vertex_count() > 0).peekable();
    with_vertices.peek().is_some() && with_vertices.all(FaceRecord::has_normals)
}

/// Fetches `count` records in enumeration order, optionally in parallel.
fn collect<T, F>(count: usize, parallel: bool, fetch: F) -> Vec<Result<T, KernelError>>
where
    T: Send,
    F: Fn(usize) -> Result<T, KernelError> + Sync + Send,
{
    if parallel {
        (0..count).into_par_iter().map(fetch).collect()
    } else {
        (0..count).map(fetch).collect()
    }
}

/// Replaces per-primitive failures with sentinel records.
///
/// The first shape-level failure aborts.
fn resolve<T>(
    results: Vec<Result<T, KernelError>>,
    stage: Stage,
    missing: fn() -> T,
    reporter: &mut Reporter<'_>,
) -> TessellateResult<Vec<T>> {
    let mut records = Vec::with_capacity(results.len());
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(e) if e.is_per_primitive() => {
                reporter.warning_for(stage, index, e.to_string());
                records.push(missing());
            }
            Err(e) => return Err(reporter.fail(stage, e).into()),
        }
    }
    Ok(records)
}

use brep_mesh::{
    assemble, tessellate, CollectingSink, EdgeRecord, FaceRecord, KernelError, NullSink,
    RecordedShape, Severity, ShapeRecords, SurfaceKind, TessellateError, TessellateOptions,
};
use config::constants::{MISSING_EDGE_TYPE, MISSING_FACE_TYPE, SYNTHESIZED_EDGE_TYPE};
use glam::{DVec3, Vec3};

fn vertex(mesh: &brep_mesh::MeshBuffers, index: u32) -> Vec3 {
    Vec3::from_slice(&mesh.vertices()[index as usize * 3..])
}

fn normal(mesh: &brep_mesh::MeshBuffers, index: u32) -> Vec3 {
    Vec3::from_slice(&mesh.normals()[index as usize * 3..])
}

#[test]
fn box_produces_full_buffer_set() {
    let mut shape = RecordedShape::cuboid(DVec3::new(1.0, 2.0, 3.0));
    let mesh = tessellate(&mut shape, &TessellateOptions::new(0.1), &mut NullSink).unwrap();

    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.edge_count(), 12);
    assert_eq!(mesh.segment_count(), 12);
    assert_eq!(mesh.object_vertex_count(), 8);
    assert!(mesh
        .face_types()
        .iter()
        .all(|&t| t == SurfaceKind::Plane.code()));
    mesh.validate().unwrap();
}

#[test]
fn box_faces_reference_their_own_vertices() {
    let mut shape = RecordedShape::cuboid(DVec3::ONE);
    let mesh = tessellate(&mut shape, &TessellateOptions::new(0.1), &mut NullSink).unwrap();

    for face in mesh.faces() {
        let base = face.index as u32 * 4;
        assert_eq!(face.triangle_count(), 2);
        assert!(face.triangles.iter().all(|&i| (base..base + 4).contains(&i)));
    }
}

#[test]
fn box_winding_agrees_with_kernel_normals() {
    let mut shape = RecordedShape::cuboid(DVec3::splat(5.0));
    let mesh = tessellate(&mut shape, &TessellateOptions::new(0.1), &mut NullSink).unwrap();

    for tri in mesh.triangles().chunks_exact(3) {
        let (a, b, c) = (vertex(&mesh, tri[0]), vertex(&mesh, tri[1]), vertex(&mesh, tri[2]));
        let winding = (c - b).cross(a - b);
        for &i in tri {
            assert!(winding.dot(normal(&mesh, i)) > 0.0);
        }
    }
}

#[test]
fn second_face_is_offset_by_first_vertex_count() {
    let tri = |offset: DVec3| {
        FaceRecord::new(
            vec![offset, offset + DVec3::X, offset + DVec3::Y],
            None,
            vec![[0, 1, 2]],
            0,
        )
    };
    let records = ShapeRecords {
        faces: vec![tri(DVec3::ZERO), tri(DVec3::Z)],
        ..ShapeRecords::default()
    };
    let mesh = assemble(records, &TessellateOptions::new(0.1), &mut NullSink).unwrap();

    assert_eq!(mesh.triangles(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(mesh.face_triangles(1), Some(&[3, 4, 5][..]));
}

#[test]
fn flat_triangle_without_normals_gets_z_normals_and_synthesized_edge() {
    let records = ShapeRecords {
        faces: vec![FaceRecord::new(
            vec![DVec3::ZERO, DVec3::X, DVec3::Y],
            None,
            vec![[0, 1, 2]],
            0,
        )],
        ..ShapeRecords::default()
    };
    let mesh = assemble(records, &TessellateOptions::new(0.1), &mut NullSink).unwrap();

    assert_eq!(mesh.normals(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
    assert_eq!(mesh.edge_types(), &[SYNTHESIZED_EDGE_TYPE]);
    assert_eq!(mesh.segments_per_edge(), &[3]);
    assert_eq!(
        mesh.segments(),
        &[
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, //
            1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, 0.0, 0.0,
        ]
    );
}

#[test]
fn degraded_primitives_keep_their_slots() {
    let mut shape = RecordedShape::cuboid(DVec3::ONE);
    // Rebuild with a hole in the middle of both tables
    let mut faces = Vec::new();
    let mut edges = Vec::new();
    {
        use brep_mesh::Kernel;
        shape.mesh(&TessellateOptions::new(0.1).meshing_params()).unwrap();
        for i in 0..shape.face_count() {
            faces.push(shape.face(i).unwrap());
        }
        for i in 0..shape.edge_count() {
            edges.push(shape.edge(i).unwrap());
        }
    }

    let mut patched = RecordedShape::new();
    for (i, face) in faces.into_iter().enumerate() {
        patched = if i == 2 {
            patched.with_missing_face()
        } else {
            patched.with_face(face)
        };
    }
    for (i, edge) in edges.into_iter().enumerate() {
        patched = if i == 5 {
            patched.with_edge_error(KernelError::NoAncestorFace { edge: 5 })
        } else {
            patched.with_edge(edge)
        };
    }

    let mut sink = CollectingSink::new();
    let options = TessellateOptions::new(0.1).with_debug(1);
    let mesh = tessellate(&mut patched, &options, &mut sink).unwrap();

    assert_eq!(mesh.face_count(), 6);
    assert_eq!(mesh.face_types()[2], MISSING_FACE_TYPE);
    assert_eq!(mesh.triangles_per_face(), &[2, 2, 0, 2, 2, 2]);
    assert_eq!(mesh.triangle_count(), 10);
    assert_eq!(mesh.edge_types()[5], MISSING_EDGE_TYPE);
    assert_eq!(mesh.segments_per_edge()[5], 0);
    assert_eq!(mesh.segment_count(), 11);
    mesh.validate().unwrap();

    let warned: Vec<_> = sink
        .with_severity(Severity::Warning)
        .map(|d| (d.stage, d.primitive))
        .collect();
    assert_eq!(warned.len(), 2);
    assert!(warned.contains(&(brep_mesh::Stage::Faces, Some(2))));
    assert!(warned.contains(&(brep_mesh::Stage::Edges, Some(5))));
}

#[test]
fn kernel_failure_produces_no_buffers() {
    let mut shape = RecordedShape::cuboid(DVec3::ONE)
        .with_edge_error(KernelError::failure("Standard_ConstructionError"));
    let mut sink = CollectingSink::new();
    let result = tessellate(&mut shape, &TessellateOptions::new(0.1), &mut sink);

    match result {
        Err(TessellateError::Kernel(KernelError::Failure(message))) => {
            assert!(message.contains("Standard_ConstructionError"));
        }
        other => panic!("expected kernel failure, got {other:?}"),
    }
    assert_eq!(sink.with_severity(Severity::Error).count(), 1);
}

#[test]
fn empty_shape_gives_empty_buffers() {
    let mut shape = RecordedShape::new();
    let mesh = tessellate(&mut shape, &TessellateOptions::new(0.1), &mut NullSink).unwrap();

    assert!(mesh.is_empty());
    assert!(mesh.vertices().is_empty());
    assert!(mesh.normals().is_empty());
    assert_eq!(mesh.face_count(), 0);
    assert_eq!(mesh.edge_count(), 0);
}

#[test]
fn parallel_and_sequential_collection_agree() {
    let options = TessellateOptions::new(0.1);
    let mut a = RecordedShape::cuboid(DVec3::new(3.0, 1.0, 2.0));
    let mut b = a.clone();

    let parallel = tessellate(&mut a, &options.with_parallel(true), &mut NullSink).unwrap();
    let sequential = tessellate(&mut b, &options.with_parallel(false), &mut NullSink).unwrap();

    assert_eq!(parallel, sequential);
    assert_eq!(a.last_params().map(|p| p.parallel), Some(true));
    assert_eq!(b.last_params().map(|p| p.parallel), Some(false));
}

#[test]
fn assembling_twice_is_byte_identical() {
    let mut shape = RecordedShape::cuboid(DVec3::new(0.1, 0.2, 0.3));
    let options = TessellateOptions::new(0.01);

    let first = tessellate(&mut shape, &options, &mut NullSink).unwrap();
    let second = tessellate(&mut shape, &options, &mut NullSink).unwrap();

    let bits = |values: &[f32]| values.iter().map(|v| v.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(first.vertices()), bits(second.vertices()));
    assert_eq!(bits(first.normals()), bits(second.normals()));
    assert_eq!(bits(first.segments()), bits(second.segments()));
    assert_eq!(first.into_parts(), second.into_parts());
}

#[test]
fn serialized_buffers_use_flat_arrays() {
    let mut shape = RecordedShape::cuboid(DVec3::ONE);
    let mesh = tessellate(&mut shape, &TessellateOptions::new(0.1), &mut NullSink).unwrap();
    let json = serde_json::to_value(&mesh).unwrap();

    let len = |key: &str| json[key].as_array().map(Vec::len);
    assert_eq!(len("vertices"), Some(72));
    assert_eq!(len("normals"), Some(72));
    assert_eq!(len("triangles"), Some(36));
    assert_eq!(len("triangles_per_face"), Some(6));
    assert_eq!(len("face_types"), Some(6));
    assert_eq!(len("segments"), Some(72));
    assert_eq!(len("segments_per_edge"), Some(12));
    assert_eq!(len("edge_types"), Some(12));
    assert_eq!(len("object_vertices"), Some(24));
}

#[test]
fn edges_only_run_skips_faces() {
    let mut shape = RecordedShape::cuboid(DVec3::ONE);
    let options = TessellateOptions::new(0.1).with_faces(false);
    let mesh = tessellate(&mut shape, &options, &mut NullSink).unwrap();

    assert_eq!(mesh.face_count(), 0);
    assert_eq!(mesh.edge_count(), 12);
    assert!(mesh
        .edges()
        .all(|edge| edge.segment_count() == 1 && edge.edge_type == 0));
}

#[test]
fn polyline_edges_split_into_segments() {
    let arc: Vec<DVec3> = (0..=8)
        .map(|i| {
            let angle = f64::from(i) * std::f64::consts::FRAC_PI_8 / 2.0;
            DVec3::new(angle.cos(), angle.sin(), 0.0)
        })
        .collect();
    let records = ShapeRecords {
        edges: vec![EdgeRecord::from_polyline(&arc, 1), EdgeRecord::missing()],
        ..ShapeRecords::default()
    };
    let mesh = assemble(records, &TessellateOptions::new(0.1), &mut NullSink).unwrap();

    assert_eq!(mesh.segments_per_edge(), &[8, 0]);
    assert_eq!(mesh.edge_segments(0).map(<[f32]>::len), Some(48));
    assert_eq!(mesh.edge_segments(1), Some(&[][..]));
}

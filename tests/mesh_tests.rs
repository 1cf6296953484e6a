use ellipsoid_sweep::{
    CollisionDetector, CollisionError, CollisionMesh, CollisionPacket, DegeneratePolicy,
    DetectionStats, MeshBuilder, Vec3, VertexLayout,
};

const QUAD: [f32; 12] = [
    0.0, 0.0, 0.0, //
    1.0, 0.0, 0.0, //
    1.0, 1.0, 0.0, //
    0.0, 1.0, 0.0,
];

#[test]
fn rejects_buffer_not_divisible_by_stride() {
    let err = CollisionMesh::build(&[0.0; 10], None, false).unwrap_err();
    assert_eq!(
        err,
        CollisionError::VertexStride {
            stride: 3,
            offset: 0,
            len: 10
        }
    );
}

#[test]
fn rejects_non_triangle_topology() {
    let err = CollisionMesh::build(&QUAD, None, false).unwrap_err();
    assert_eq!(
        err,
        CollisionError::TriangleTopology {
            what: "vertices",
            count: 4
        }
    );

    let err = CollisionMesh::build(&QUAD, Some(&[0, 1, 2, 3]), false).unwrap_err();
    assert_eq!(
        err,
        CollisionError::TriangleTopology {
            what: "indices",
            count: 4
        }
    );
}

#[test]
fn rejects_out_of_range_index() {
    let err = CollisionMesh::build(&QUAD, Some(&[0, 1, 9]), false).unwrap_err();
    assert_eq!(
        err,
        CollisionError::IndexOutOfRange {
            index: 9,
            vertex_count: 4
        }
    );
}

#[test]
fn rejects_two_dimensional_positions() {
    let layout = VertexLayout {
        stride: 2,
        position_offset: 0,
        position_components: 2,
    };
    let err = MeshBuilder::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0])
        .layout(layout)
        .build()
        .unwrap_err();
    assert_eq!(err, CollisionError::PositionComponents(2));
}

#[test]
fn rejects_degenerate_triangles_by_default() {
    let err = CollisionMesh::build(&QUAD, Some(&[0, 1, 2, 0, 2, 2]), false).unwrap_err();
    assert_eq!(err, CollisionError::DegenerateTriangle(1));
    assert_eq!(err.to_string(), "triangle 1 has zero area");
}

#[test]
fn kept_degenerate_triangle_is_culled_by_detector() {
    let mesh = MeshBuilder::new(vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0])
        .degenerate_policy(DegeneratePolicy::Keep)
        .build()
        .expect("keep policy accepts zero-area triangles");

    let plane = mesh.plane(0).unwrap();
    assert_eq!(plane.normal, Vec3::ZERO);

    let mut packet =
        CollisionPacket::sphere(Vec3::new(1.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -10.0), 1.0).unwrap();
    let mut stats = DetectionStats::default();
    assert!(!CollisionDetector::new().detect_with_stats(&mesh, &mut packet, &mut stats));
    assert_eq!(stats.culled, 1);
    assert!(packet.nearest_distance().is_infinite());
}

#[test]
fn winding_flag_flips_plane_orientation() {
    let ccw = CollisionMesh::build(&QUAD, Some(&[0, 1, 2]), false).unwrap();
    let cw = CollisionMesh::build(&QUAD, Some(&[0, 1, 2]), true).unwrap();

    assert!(!ccw.is_clockwise());
    assert!(cw.is_clockwise());
    assert!((ccw.plane(0).unwrap().normal - Vec3::Z).length() < 1e-6);
    assert!((cw.plane(0).unwrap().normal + Vec3::Z).length() < 1e-6);

    // Only the mesh whose outward normal faces the falling sphere is solid from above.
    let detector = CollisionDetector::new();
    let mut packet =
        CollisionPacket::sphere(Vec3::new(0.7, 0.2, 3.0), Vec3::new(0.0, 0.0, -5.0), 0.5).unwrap();
    assert!(detector.detect(&ccw, &mut packet));
    assert!(!detector.detect(&cw, &mut packet));
}

#[test]
fn welding_collapses_sliver_triangles() {
    let vertices = vec![
        0.0, 0.0, 0.0, //
        1.0, 0.0, 0.0, //
        0.0, 1.0, 0.0, //
        1.0, 0.0, 0.0, //
        1.0005, 0.0, 0.0, //
        1.0, 1.0, 0.0,
    ];

    let mesh = MeshBuilder::new(vertices)
        .weld_vertices(0.01)
        .degenerate_policy(DegeneratePolicy::Skip)
        .build()
        .unwrap();

    assert_eq!(mesh.num_triangles(), 1);
    assert_eq!(mesh.triangle(0).unwrap(), [Vec3::ZERO, Vec3::X, Vec3::Y]);
}

#[test]
fn buffers_match_triangle_count() {
    let mesh = CollisionMesh::build(&QUAD, Some(&[0, 1, 2, 0, 2, 3]), false).unwrap();

    assert_eq!(mesh.num_triangles(), 2);
    assert_eq!(mesh.triangle_vertices().len(), 2 * 9);
    assert_eq!(mesh.planes().len(), 2 * 4);
    assert_eq!(mesh.triangles().count(), 2);
    assert_eq!(mesh.bounds().min, Vec3::ZERO);
    assert_eq!(mesh.bounds().max, Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(
        &mesh.triangle_vertices()[9..18],
        &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0]
    );
}

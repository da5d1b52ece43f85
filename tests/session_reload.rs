mod util;

use mesh_normalize::grid::{ImplicitGrid, StructuredGrid};
use mesh_normalize::mesh_error::MeshNormalizeError;
use mesh_normalize::normalize::{GridNormalizer, MeshPart, NormalizeConfig, ReloadParts};
use mesh_normalize::session::Session;
use mesh_normalize::topology::CellType;
use util::*;

#[test]
fn default_reload_only_replaces_fields() {
    let path = write_temp("fields.vtk", &tet_vtk([1.0, 2.0, 3.0, 4.0], [0.0, 0.0, 1.0]));
    let mut session = Session::new(NormalizeConfig::default());
    let first = session.load_file(&path).unwrap().clone();

    std::fs::write(&path, tet_vtk([5.0, 6.0, 7.0, 8.0], [0.0, 0.0, 9.0])).unwrap();
    let report = session.reload_file(&path, ReloadParts::default()).unwrap();
    assert_eq!(report.replaced, vec![MeshPart::Fields]);
    assert!(report.is_complete());

    let mesh = session.mesh().unwrap();
    assert_eq!(mesh.fields["Temperature"]["X1"].values, vec![5.0, 6.0, 7.0, 8.0]);
    // Geometry is untouched even though the file moved the apex.
    assert_eq!(mesh.vertices, first.vertices);
    assert_eq!(mesh.bounds, first.bounds);

    let report = session.reload_file(&path, ReloadParts::all()).unwrap();
    assert_eq!(report.replaced.len(), 4);
    let mesh = session.mesh().unwrap();
    assert_eq!(mesh.vertices[11], 9.0);
    assert_eq!(mesh.bounding_box()[5], 9.0);
    std::fs::remove_file(path).unwrap();
}

#[test]
fn reload_before_load_is_a_full_load() {
    let mut session = Session::default();
    assert!(session.mesh().is_none());
    let report = session
        .reload(&unit_tet(), ReloadParts::default())
        .unwrap();
    assert_eq!(
        report.replaced,
        vec![
            MeshPart::Vertices,
            MeshPart::Faces,
            MeshPart::Tetrahedra,
            MeshPart::Fields
        ]
    );
    assert_eq!(session.mesh().unwrap().tetrahedra, vec![0, 1, 2, 3]);
}

#[test]
fn unsupported_file_type_keeps_the_current_mesh() {
    let mut session = Session::default();
    session.load(&unit_tet()).unwrap();
    assert_eq!(
        session.load_file("scene.vtp").map(|m| m.vertex_count()),
        Err(MeshNormalizeError::UnsupportedFileType("vtp".into()))
    );
    assert_eq!(
        session.reload_file("scene.xyz", ReloadParts::all()),
        Err(MeshNormalizeError::UnsupportedFileType("xyz".into()))
    );
    assert_eq!(session.mesh().unwrap().vertex_count(), 4);

    session.clear();
    assert!(session.mesh().is_none());
}

#[test]
fn failing_parts_keep_their_previous_buffers() {
    let normalizer = GridNormalizer::default();
    let mut mesh = normalizer.normalize(&unit_tet()).unwrap();
    let before = mesh.clone();

    let mut points = UNIT_TET_POINTS.to_vec();
    points[3] = [0.0, 0.0, 2.0];
    let broken = RawGrid {
        arrays: Some(vec![scalars("T", &[1.0, 2.0, 3.0, 4.0])]),
        ..RawGrid::new(points, vec![(CellType::Tetrahedron, vec![0, 1, 2, 9])])
    };
    let report = normalizer
        .reload(&mut mesh, &broken, ReloadParts::all())
        .unwrap();

    assert_eq!(report.replaced, vec![MeshPart::Vertices, MeshPart::Fields]);
    let failed: Vec<MeshPart> = report.failed.iter().map(|(part, _)| *part).collect();
    assert_eq!(failed, vec![MeshPart::Faces, MeshPart::Tetrahedra]);
    assert!(report.failed.iter().all(|(_, err)| matches!(
        err,
        MeshNormalizeError::CellIndexOutOfRange { index: 9, .. }
    )));

    assert_eq!(mesh.faces, before.faces);
    assert_eq!(mesh.tetrahedra, before.tetrahedra);
    assert_eq!(mesh.vertices[11], 2.0);
    assert_eq!(mesh.bounding_box()[5], 2.0);
    assert_eq!(mesh.fields["T"]["X1"].max, 4.0);
}

#[test]
fn unsupported_kind_aborts_reload_untouched() {
    let normalizer = GridNormalizer::default();
    let mut mesh = normalizer.normalize(&unit_tet()).unwrap();
    let before = mesh.clone();
    let image = ImplicitGrid::image([2, 2, 2], [0.0; 3], [1.0; 3]);
    assert_eq!(
        normalizer.reload(&mut mesh, &image, ReloadParts::all()),
        Err(MeshNormalizeError::UnsupportedGridKind("StructuredPoints".into()))
    );
    assert_eq!(mesh, before);
}

#[test]
fn structured_reload_goes_through_append() {
    let mut session = Session::default();
    let grid = StructuredGrid::uniform_box([2, 2, 2], [0.0; 3], [1.0; 3]).unwrap();
    session.load(&grid).unwrap();
    assert!(session.mesh().unwrap().fields.is_empty());

    let grid = grid
        .try_with_point_array(scalars("p", &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]))
        .unwrap();
    let report = session.reload(&grid, ReloadParts::default()).unwrap();
    assert!(report.is_complete());
    assert_eq!(session.mesh().unwrap().fields["p"]["X1"].max, 7.0);
    assert_eq!(session.mesh().unwrap().triangle_count(), 12);
}

mod util;

use mesh_normalize::grid::{GridKind, GridProvider};
use mesh_normalize::io::{GridReader, VtuReader, read_grid_file};
use mesh_normalize::mesh_error::MeshNormalizeError;
use mesh_normalize::normalize::GridNormalizer;
use util::*;

const TET_AND_TRIANGLE: &str = r#"<?xml version="1.0"?>
<VTKFile type="UnstructuredGrid" version="1.0" byte_order="LittleEndian">
  <UnstructuredGrid>
    <Piece NumberOfPoints="5" NumberOfCells="2">
      <PointData Scalars="Temperature">
        <DataArray type="Float32" Name="Temperature" format="ascii">10 20 30 40 50</DataArray>
        <DataArray type="Float64" Name="velocity" NumberOfComponents="2"
                   ComponentName0="u" ComponentName1="v" format="ascii">
          1 0  2 0  3 1  4 1  5 -1
        </DataArray>
      </PointData>
      <CellData>
        <DataArray type="Int32" Name="region" format="ascii">1 2</DataArray>
      </CellData>
      <Points>
        <DataArray type="Float32" NumberOfComponents="3" format="ascii">
          0 0 0  1 0 0  0 1 0  0 0 1  5 5 5
        </DataArray>
      </Points>
      <Cells>
        <DataArray type="Int64" Name="connectivity" format="ascii">0 1 2 3  1 2 4</DataArray>
        <DataArray type="Int64" Name="offsets" format="ascii">4 7</DataArray>
        <DataArray type="UInt8" Name="types" format="ascii">10 5</DataArray>
      </Cells>
    </Piece>
  </UnstructuredGrid>
</VTKFile>
"#;

#[test]
fn unstructured_grid_with_point_data() {
    let grid = VtuReader.read(TET_AND_TRIANGLE.as_bytes()).unwrap();
    assert_eq!(grid.kind(), GridKind::Unstructured);
    assert_eq!(grid.cell_count(), 2);
    assert_eq!(grid.point(4), [5.0, 5.0, 5.0]);

    let mesh = GridNormalizer::default().normalize(&grid).unwrap();
    assert_eq!(mesh.tetrahedra, vec![0, 1, 2, 3]);
    // Four tet faces plus the standalone triangle.
    assert_eq!(mesh.triangle_count(), 5);
    assert_eq!(&mesh.faces[12..], &[1, 2, 4]);
    assert_well_formed(&mesh);

    let names: Vec<&str> = mesh.fields.names().collect();
    assert_eq!(names, ["Temperature", "velocity"]);
    assert_eq!(mesh.fields["Temperature"]["X1"].max, 50.0);
    let velocity = &mesh.fields["velocity"];
    let components: Vec<&str> = velocity.component_names().collect();
    assert_eq!(components, ["u", "v"]);
    assert_eq!(velocity["v"].values, vec![0.0, 0.0, 1.0, 1.0, -1.0]);
    assert_eq!(velocity["v"].min, -1.0);
}

#[test]
fn vtu_files_load_through_dispatch() {
    let path = write_temp("scene.VTU", TET_AND_TRIANGLE);
    let grid = read_grid_file(&path).unwrap();
    assert_eq!(grid.point_count(), 5);
    std::fs::remove_file(path).unwrap();
}

#[test]
fn malformed_documents_are_parse_errors() {
    let piece = |body: &str| {
        format!(
            r#"<VTKFile type="UnstructuredGrid"><UnstructuredGrid>{body}</UnstructuredGrid></VTKFile>"#
        )
    };
    let cases = [
        piece(""),
        piece(r#"<Piece NumberOfPoints="2" NumberOfCells="0">
            <Points><DataArray NumberOfComponents="3" format="ascii">0 0 0</DataArray></Points>
            </Piece>"#),
        piece(r#"<Piece NumberOfPoints="1" NumberOfCells="1">
            <Points><DataArray NumberOfComponents="3" format="ascii">0 0 0</DataArray></Points>
            </Piece>"#),
        piece(r#"<Piece NumberOfPoints="1" NumberOfCells="0">
            <Points><DataArray NumberOfComponents="3" format="appended" offset="0"/></Points>
            </Piece>"#),
        piece(r#"<Piece NumberOfPoints="1" NumberOfCells="0">
            <Points><DataArray NumberOfComponents="3" format="ascii">0 0 x</DataArray></Points>
            </Piece>"#),
        piece(r#"<Piece NumberOfPoints="99999999999999999999999" NumberOfCells="0"/>"#),
    ];
    for src in &cases {
        assert!(
            matches!(
                VtuReader.read(src.as_bytes()),
                Err(MeshNormalizeError::MeshIoParse(_))
            ),
            "accepted: {src}"
        );
    }
}

#[test]
fn point_data_length_is_checked() {
    let src = TET_AND_TRIANGLE.replace("10 20 30 40 50", "10 20 30");
    assert!(matches!(
        VtuReader.read(src.as_bytes()),
        Err(MeshNormalizeError::FieldLengthMismatch { .. })
    ));
}

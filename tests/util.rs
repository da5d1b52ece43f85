#![allow(dead_code)]
use mesh_normalize::{
    field::{DataArray, FieldArray},
    grid::{CellIter, GridKind, GridProvider, Polygons, UnstructuredGrid},
    grid::unstructured::boundary_polygons,
    mesh_error::MeshNormalizeError,
    normalize::NormalizedMesh,
    topology::{CellRef, CellType},
};

pub const UNIT_TET_POINTS: [[f64; 3]; 4] = [
    [0.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
];

/// One linear tetrahedron over the unit corner points.
pub fn unit_tet() -> UnstructuredGrid {
    UnstructuredGrid::new(UNIT_TET_POINTS.to_vec())
        .try_with_cell(CellType::Tetrahedron, vec![0, 1, 2, 3])
        .unwrap()
}

/// One quadratic tetrahedron: unit corners followed by the six mid-edge
/// nodes of edges (0,1) (1,2) (0,2) (0,3) (1,3) (2,3).
pub fn quadratic_tet() -> UnstructuredGrid {
    let c = UNIT_TET_POINTS;
    let mid = |a: usize, b: usize| {
        [
            0.5 * (c[a][0] + c[b][0]),
            0.5 * (c[a][1] + c[b][1]),
            0.5 * (c[a][2] + c[b][2]),
        ]
    };
    let mut points = c.to_vec();
    for (a, b) in [(0, 1), (1, 2), (0, 2), (0, 3), (1, 3), (2, 3)] {
        points.push(mid(a, b));
    }
    UnstructuredGrid::new(points)
        .try_with_cell(CellType::QuadraticTetrahedron, (0..10).collect())
        .unwrap()
}

/// Two tetrahedra glued along the face (1, 2, 3).
pub fn two_tets() -> UnstructuredGrid {
    let mut points = UNIT_TET_POINTS.to_vec();
    points.push([1.0, 1.0, 1.0]);
    UnstructuredGrid::new(points)
        .try_with_cell(CellType::Tetrahedron, vec![0, 1, 2, 3])
        .unwrap()
        .try_with_cell(CellType::Tetrahedron, vec![1, 2, 3, 4])
        .unwrap()
}

/// Unit tet plus a unit hexahedron sharing no points.
pub fn tet_and_hex() -> UnstructuredGrid {
    let mut points = UNIT_TET_POINTS.to_vec();
    for z in [2.0, 3.0] {
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)] {
            points.push([x, y, z]);
        }
    }
    UnstructuredGrid::new(points)
        .try_with_cell(CellType::Hexahedron, (4..12).collect())
        .unwrap()
        .try_with_cell(CellType::Tetrahedron, vec![0, 1, 2, 3])
        .unwrap()
}

/// A single-component array named `name`.
pub fn scalars(name: &str, values: &[f64]) -> DataArray {
    DataArray::scalars(name, values.to_vec())
}

/// Provider over raw cells that skips all validation, so it can hand the
/// engine dangling indices.
pub struct RawGrid {
    pub points: Vec<[f64; 3]>,
    pub cells: Vec<(CellType, Vec<usize>)>,
    pub arrays: Option<Vec<DataArray>>,
    pub has_cells: bool,
}

impl RawGrid {
    pub fn new(points: Vec<[f64; 3]>, cells: Vec<(CellType, Vec<usize>)>) -> Self {
        Self {
            points,
            cells,
            arrays: None,
            has_cells: true,
        }
    }

    fn cell_refs(&self) -> impl Iterator<Item = CellRef<'_>> {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, (kind, ids))| CellRef::new(i, *kind, ids))
    }
}

impl GridProvider for RawGrid {
    fn kind(&self) -> GridKind {
        GridKind::Unstructured
    }

    fn point_count(&self) -> usize {
        self.points.len()
    }

    fn point(&self, index: usize) -> [f64; 3] {
        self.points[index]
    }

    fn cells(&self) -> Option<CellIter<'_>> {
        if self.has_cells {
            Some(Box::new(self.cell_refs()))
        } else {
            None
        }
    }

    fn boundary_surface(&self) -> Result<Polygons, MeshNormalizeError> {
        Ok(boundary_polygons(self.cell_refs()))
    }

    fn append_to_unstructured(&self) -> Result<UnstructuredGrid, MeshNormalizeError> {
        Err(MeshNormalizeError::UnsupportedGridKind("raw".into()))
    }

    fn point_arrays(&self) -> Option<Vec<&dyn FieldArray>> {
        self.arrays
            .as_ref()
            .map(|arrays| arrays.iter().map(|a| a as &dyn FieldArray).collect())
    }
}

/// Every structural property a normalized mesh must satisfy.
pub fn assert_well_formed(mesh: &NormalizedMesh) {
    assert_eq!(mesh.vertices.len() % 3, 0);
    assert_eq!(mesh.faces.len() % 3, 0);
    assert_eq!(mesh.tetrahedra.len() % 4, 0);
    let n = mesh.vertex_count() as u32;
    for &i in mesh.faces.iter().chain(&mesh.tetrahedra) {
        assert!(i < n, "index {i} out of range for {n} vertices");
    }
}

/// Write `contents` to a per-process temp file called `name`.
pub fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("mesh-normalize-{}-{name}", std::process::id()));
    std::fs::write(&path, contents).unwrap();
    path
}

/// Legacy VTK unit tetrahedron with a scalar temperature field.
pub fn tet_vtk(temperatures: [f64; 4], apex: [f64; 3]) -> String {
    let [t0, t1, t2, t3] = temperatures;
    let [x, y, z] = apex;
    format!(
        "# vtk DataFile Version 3.0\n\
         unit tet\n\
         ASCII\n\
         DATASET UNSTRUCTURED_GRID\n\
         POINTS 4 float\n\
         0 0 0\n1 0 0\n0 1 0\n{x} {y} {z}\n\
         CELLS 1 5\n\
         4 0 1 2 3\n\
         CELL_TYPES 1\n\
         10\n\
         POINT_DATA 4\n\
         SCALARS Temperature float\n\
         LOOKUP_TABLE default\n\
         {t0} {t1} {t2} {t3}\n"
    )
}

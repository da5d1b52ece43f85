//! Explicit points + mixed-kind cells.
//!
//! Cells are validated on insertion: every point id must exist and
//! fixed-arity kinds must carry exactly their number of ids. The boundary
//! surface is derived by face incidence counting: a face of a volumetric
//! cell is external when exactly one cell references it.

use std::collections::HashMap;

use crate::field::{DataArray, FieldArray, PointData};
use crate::grid::{CellIter, GridKind, GridProvider, Polygons};
use crate::mesh_error::MeshNormalizeError;
use crate::topology::faces::{face_key, local_faces};
use crate::topology::{Cell, CellRef, CellType};

/// An in-memory unstructured (or polygonal) grid.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnstructuredGrid {
    polygonal: bool,
    points: Vec<[f64; 3]>,
    cells: Vec<Cell>,
    point_data: PointData,
}

impl UnstructuredGrid {
    /// An unstructured grid over `points` with no cells.
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        Self {
            points,
            ..Self::default()
        }
    }

    /// A polygonal surface grid over `points` with no cells.
    pub fn polydata(points: Vec<[f64; 3]>) -> Self {
        Self {
            polygonal: true,
            points,
            ..Self::default()
        }
    }

    /// Append a cell and return its index.
    pub fn try_add_cell(
        &mut self,
        kind: CellType,
        point_ids: Vec<usize>,
    ) -> Result<usize, MeshNormalizeError> {
        let cell = self.cells.len();
        if let Some(expected) = kind.expected_point_count() {
            if point_ids.len() != expected {
                return Err(MeshNormalizeError::InvalidCell {
                    cell,
                    kind: kind.to_string(),
                    expected,
                    found: point_ids.len(),
                });
            }
        }
        if let Some(&index) = point_ids.iter().find(|&&i| i >= self.points.len()) {
            return Err(MeshNormalizeError::CellIndexOutOfRange {
                cell,
                index,
                point_count: self.points.len(),
            });
        }
        self.cells.push(Cell::new(kind, point_ids));
        Ok(cell)
    }

    /// Builder form of [`try_add_cell`](Self::try_add_cell).
    pub fn try_with_cell(
        mut self,
        kind: CellType,
        point_ids: Vec<usize>,
    ) -> Result<Self, MeshNormalizeError> {
        self.try_add_cell(kind, point_ids)?;
        Ok(self)
    }

    /// Attach a point field array; it must carry one tuple per point.
    pub fn try_add_point_array(&mut self, array: DataArray) -> Result<(), MeshNormalizeError> {
        self.point_data.try_add(array, self.points.len())
    }

    /// Builder form of [`try_add_point_array`](Self::try_add_point_array).
    pub fn try_with_point_array(mut self, array: DataArray) -> Result<Self, MeshNormalizeError> {
        self.try_add_point_array(array)?;
        Ok(self)
    }

    #[inline]
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    #[inline]
    pub fn cell_list(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn point_data(&self) -> &PointData {
        &self.point_data
    }

    #[inline]
    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn from_parts(
        polygonal: bool,
        points: Vec<[f64; 3]>,
        cells: Vec<Cell>,
        point_data: PointData,
    ) -> Self {
        Self {
            polygonal,
            points,
            cells,
            point_data,
        }
    }
}

impl GridProvider for UnstructuredGrid {
    fn kind(&self) -> GridKind {
        if self.polygonal {
            GridKind::PolyData
        } else {
            GridKind::Unstructured
        }
    }

    fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn point(&self, index: usize) -> [f64; 3] {
        self.points[index]
    }

    fn cells(&self) -> Option<CellIter<'_>> {
        Some(Box::new(
            self.cells.iter().enumerate().map(|(i, c)| c.view(i)),
        ))
    }

    fn boundary_surface(&self) -> Result<Polygons, MeshNormalizeError> {
        Ok(boundary_polygons(
            self.cells.iter().enumerate().map(|(i, c)| c.view(i)),
        ))
    }

    fn append_to_unstructured(&self) -> Result<UnstructuredGrid, MeshNormalizeError> {
        Ok(Self {
            polygonal: false,
            ..self.clone()
        })
    }

    fn point_arrays(&self) -> Option<Vec<&dyn FieldArray>> {
        Some(self.point_data.field_arrays())
    }
}

enum Candidate {
    Surface(Vec<usize>),
    Face { points: Vec<usize>, key: Vec<usize> },
}

/// Boundary polygons of a cell traversal.
///
/// Surface cells are passed through as polygons; each face of a volumetric
/// cell is kept when no other cell shares it. Output follows cell traversal
/// order and, within a cell, face-table order. 0-D and 1-D cells contribute
/// nothing.
pub fn boundary_polygons<'a>(cells: impl IntoIterator<Item = CellRef<'a>>) -> Polygons {
    let mut candidates = Vec::new();
    let mut incidence: HashMap<Vec<usize>, usize> = HashMap::new();

    for cell in cells {
        match cell.dimension() {
            2 => surface_cell_polygons(cell, &mut candidates),
            3 => {
                let Some(faces) = local_faces(cell.kind) else {
                    continue;
                };
                for face in faces {
                    if face.iter().any(|&i| i >= cell.len()) {
                        continue;
                    }
                    let points: Vec<usize> = face.iter().map(|&i| cell.point_ids[i]).collect();
                    let key = face_key(&points);
                    *incidence.entry(key.clone()).or_default() += 1;
                    candidates.push(Candidate::Face { points, key });
                }
            }
            _ => {}
        }
    }

    candidates
        .into_iter()
        .filter_map(|candidate| match candidate {
            Candidate::Surface(points) => Some(points),
            Candidate::Face { points, key } => (incidence.get(&key) == Some(&1)).then_some(points),
        })
        .collect()
}

fn surface_cell_polygons(cell: CellRef<'_>, out: &mut Vec<Candidate>) {
    let ids = cell.point_ids;
    match cell.kind {
        CellType::Pixel if ids.len() == 4 => {
            out.push(Candidate::Surface(vec![ids[0], ids[1], ids[3], ids[2]]));
        }
        CellType::TriangleStrip => {
            for (i, w) in ids.windows(3).enumerate() {
                let tri = if i % 2 == 0 {
                    vec![w[0], w[1], w[2]]
                } else {
                    vec![w[1], w[0], w[2]]
                };
                out.push(Candidate::Surface(tri));
            }
        }
        // Higher-order triangle / quad: keep the corner polygon.
        CellType::Other(_) => {
            if let Some(corners) = cell.kind.surface_corner_count().filter(|&n| ids.len() >= n) {
                out.push(Candidate::Surface(ids[..corners].to_vec()));
            }
        }
        CellType::Triangle | CellType::Quadrilateral | CellType::Polygon => {
            out.push(Candidate::Surface(ids.to_vec()));
        }
        _ => {}
    }
}

//! Curvilinear structured grids.
//!
//! Points are stored in lattice order with `i` fastest, then `j`, then `k`.
//! The lattice has no explicit cell list, so [`GridProvider::cells`] reports
//! no iteration capability; the normalizer appends the grid to an
//! [`UnstructuredGrid`] first. Appending emits one cell per lattice cell in
//! the same `i`-fastest order: hexahedra when all three axes have extent,
//! quadrilaterals for a single layer, segments for a line and a vertex for a
//! single point.

use crate::field::{DataArray, FieldArray, PointData};
use crate::grid::{CellIter, GridKind, GridProvider, Polygons, UnstructuredGrid};
use crate::mesh_error::MeshNormalizeError;
use crate::topology::{Cell, CellType};

/// An in-memory curvilinear lattice.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StructuredGrid {
    dimensions: [usize; 3],
    points: Vec<[f64; 3]>,
    point_data: PointData,
}

impl StructuredGrid {
    /// Build a lattice with `dimensions` points per axis.
    ///
    /// Fails if the point count does not match the lattice size.
    pub fn try_new(
        dimensions: [usize; 3],
        points: Vec<[f64; 3]>,
    ) -> Result<Self, MeshNormalizeError> {
        let expected = dimensions
            .iter()
            .try_fold(1usize, |acc, &n| acc.checked_mul(n))
            .ok_or_else(|| {
                MeshNormalizeError::InvalidGrid(format!(
                    "structured dimensions {dimensions:?} overflow the point count"
                ))
            })?;
        if expected != points.len() {
            return Err(MeshNormalizeError::InvalidGrid(format!(
                "structured dimensions {dimensions:?} need {expected} points, got {}",
                points.len()
            )));
        }
        Ok(Self {
            dimensions,
            points,
            point_data: PointData::new(),
        })
    }

    /// Uniform box `[min, max]` with `dimensions` points per axis.
    pub fn uniform_box(
        dimensions: [usize; 3],
        min: [f64; 3],
        max: [f64; 3],
    ) -> Result<Self, MeshNormalizeError> {
        let step = |axis: usize| {
            if dimensions[axis] > 1 {
                (max[axis] - min[axis]) / (dimensions[axis] - 1) as f64
            } else {
                0.0
            }
        };
        let (dx, dy, dz) = (step(0), step(1), step(2));
        let mut points = Vec::with_capacity(dimensions.iter().product());
        for k in 0..dimensions[2] {
            let z = min[2] + dz * k as f64;
            for j in 0..dimensions[1] {
                let y = min[1] + dy * j as f64;
                for i in 0..dimensions[0] {
                    let x = min[0] + dx * i as f64;
                    points.push([x, y, z]);
                }
            }
        }
        Self::try_new(dimensions, points)
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
    pub fn dimensions(&self) -> [usize; 3] {
        self.dimensions
    }

    #[inline]
    pub fn point_data(&self) -> &PointData {
        &self.point_data
    }
}

impl GridProvider for StructuredGrid {
    fn kind(&self) -> GridKind {
        GridKind::Structured
    }

    fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    fn point(&self, index: usize) -> [f64; 3] {
        self.points[index]
    }

    fn cells(&self) -> Option<CellIter<'_>> {
        None
    }

    fn boundary_surface(&self) -> Result<Polygons, MeshNormalizeError> {
        self.append_to_unstructured()?.boundary_surface()
    }

    fn append_to_unstructured(&self) -> Result<UnstructuredGrid, MeshNormalizeError> {
        Ok(UnstructuredGrid::from_parts(
            false,
            self.points.clone(),
            lattice_cells(self.dimensions),
            self.point_data.clone(),
        ))
    }

    fn point_arrays(&self) -> Option<Vec<&dyn FieldArray>> {
        Some(self.point_data.field_arrays())
    }
}

// Corner offsets along the active axes, in VTK corner order.
const HEX_CORNERS: &[&[usize]] = &[
    &[0, 0, 0],
    &[1, 0, 0],
    &[1, 1, 0],
    &[0, 1, 0],
    &[0, 0, 1],
    &[1, 0, 1],
    &[1, 1, 1],
    &[0, 1, 1],
];
const QUAD_CORNERS: &[&[usize]] = &[&[0, 0], &[1, 0], &[1, 1], &[0, 1]];
const SEGMENT_CORNERS: &[&[usize]] = &[&[0], &[1]];

/// Explicit cells of a point lattice with `dims` points per axis.
pub fn lattice_cells(dims: [usize; 3]) -> Vec<Cell> {
    if dims.contains(&0) {
        return Vec::new();
    }
    let active: Vec<usize> = (0..3).filter(|&a| dims[a] > 1).collect();
    let index = |p: [usize; 3]| p[0] + dims[0] * (p[1] + dims[1] * p[2]);
    let (kind, corners) = match active.len() {
        3 => (CellType::Hexahedron, HEX_CORNERS),
        2 => (CellType::Quadrilateral, QUAD_CORNERS),
        1 => (CellType::Segment, SEGMENT_CORNERS),
        _ => return vec![Cell::new(CellType::Vertex, vec![0])],
    };

    let extent = |a: usize| if dims[a] > 1 { dims[a] - 1 } else { 1 };
    let mut cells = Vec::with_capacity(extent(0) * extent(1) * extent(2));
    for k in 0..extent(2) {
        for j in 0..extent(1) {
            for i in 0..extent(0) {
                let base = [i, j, k];
                let ids = corners
                    .iter()
                    .map(|offsets| {
                        let mut p = base;
                        for (&axis, &off) in active.iter().zip(offsets.iter()) {
                            p[axis] += off;
                        }
                        index(p)
                    })
                    .collect();
                cells.push(Cell::new(kind, ids));
            }
        }
    }
    cells
}

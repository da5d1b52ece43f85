//! Implicit axis-aligned lattices (image data and rectilinear grids).
//!
//! Points are generated from per-axis coordinates instead of being stored.
//! These grids have no direct points+cells model in this crate: they answer
//! point and bounds queries but refuse boundary extraction and conversion,
//! so the normalizer rejects them with
//! [`MeshNormalizeError::UnsupportedGridKind`].

use crate::field::{DataArray, FieldArray, PointData};
use crate::grid::{Bounds, CellIter, GridKind, GridProvider, Polygons, UnstructuredGrid};
use crate::mesh_error::MeshNormalizeError;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ImplicitGrid {
    kind: GridKind,
    axes: [Vec<f64>; 3],
    point_data: PointData,
}

impl ImplicitGrid {
    /// Uniform lattice (`STRUCTURED_POINTS`).
    pub fn image(dimensions: [usize; 3], origin: [f64; 3], spacing: [f64; 3]) -> Self {
        let axis = |a: usize| {
            (0..dimensions[a])
                .map(|i| origin[a] + spacing[a] * i as f64)
                .collect::<Vec<_>>()
        };
        Self {
            kind: GridKind::StructuredPoints,
            axes: [axis(0), axis(1), axis(2)],
            point_data: PointData::new(),
        }
    }

    /// Rectilinear lattice from explicit per-axis coordinates.
    pub fn rectilinear(x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        Self {
            kind: GridKind::Rectilinear,
            axes: [x, y, z],
            point_data: PointData::new(),
        }
    }

    /// Attach a point field array; it must carry one tuple per point.
    pub fn try_add_point_array(&mut self, array: DataArray) -> Result<(), MeshNormalizeError> {
        let count = self.point_count();
        self.point_data.try_add(array, count)
    }

    pub fn dimensions(&self) -> [usize; 3] {
        [self.axes[0].len(), self.axes[1].len(), self.axes[2].len()]
    }

    fn unsupported(&self) -> MeshNormalizeError {
        MeshNormalizeError::UnsupportedGridKind(self.kind.name().to_string())
    }
}

impl GridProvider for ImplicitGrid {
    fn kind(&self) -> GridKind {
        self.kind
    }

    fn point_count(&self) -> usize {
        self.axes.iter().map(Vec::len).product()
    }

    fn point(&self, index: usize) -> [f64; 3] {
        let [nx, ny, _] = self.dimensions();
        let i = index % nx;
        let j = (index / nx) % ny;
        let k = index / (nx * ny);
        [self.axes[0][i], self.axes[1][j], self.axes[2][k]]
    }

    fn cells(&self) -> Option<CellIter<'_>> {
        None
    }

    fn boundary_surface(&self) -> Result<Polygons, MeshNormalizeError> {
        Err(self.unsupported())
    }

    fn append_to_unstructured(&self) -> Result<UnstructuredGrid, MeshNormalizeError> {
        Err(self.unsupported())
    }

    fn point_arrays(&self) -> Option<Vec<&dyn FieldArray>> {
        Some(self.point_data.field_arrays())
    }

    fn bounds(&self) -> Option<Bounds> {
        if self.point_count() == 0 {
            return None;
        }
        let span = |a: usize| crate::field::fold_range(self.axes[a].iter().copied());
        let ((xmin, xmax), (ymin, ymax), (zmin, zmax)) = (span(0), span(1), span(2));
        Some(Bounds {
            xmin,
            xmax,
            ymin,
            ymax,
            zmin,
            zmax,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_points_follow_lattice_order() {
        let grid = ImplicitGrid::image([2, 3, 1], [0.0, 0.0, 5.0], [0.5, 1.0, 1.0]);
        assert_eq!(grid.point_count(), 6);
        assert_eq!(grid.point(3), [0.5, 1.0, 5.0]);
        assert_eq!(
            grid.bounds().unwrap().as_array(),
            [0.0, 0.5, 0.0, 2.0, 5.0, 5.0]
        );
    }

    #[test]
    fn conversion_is_refused() {
        let grid = ImplicitGrid::rectilinear(vec![0.0, 1.0], vec![0.0], vec![0.0]);
        assert_eq!(
            grid.append_to_unstructured(),
            Err(MeshNormalizeError::UnsupportedGridKind(
                "RectilinearGrid".into()
            ))
        );
        assert!(grid.boundary_surface().is_err());
    }
}

//! Grid file readers.
//!
//! Readers sit outside the normalization core and hand it a [`Grid`], which
//! talks to the core only through [`GridProvider`]. [`read_grid_file`]
//! picks a reader from the file extension.

pub mod vtk;
pub mod vtu;

use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::field::{DataArray, FieldArray};
use crate::grid::{
    Bounds, CellIter, GridKind, GridProvider, ImplicitGrid, Polygons, StructuredGrid,
    UnstructuredGrid,
};
use crate::mesh_error::MeshNormalizeError;

pub use vtk::LegacyVtkReader;
pub use vtu::VtuReader;

/// Trait for readers that produce an in-memory grid.
pub trait GridReader {
    /// Parse a grid from a reader.
    fn read<R: Read>(&self, reader: R) -> Result<Grid, MeshNormalizeError>;
}

/// Any grid a reader can produce.
#[derive(Clone, Debug, PartialEq)]
pub enum Grid {
    /// Unstructured and polygonal grids.
    Unstructured(UnstructuredGrid),
    Structured(StructuredGrid),
    /// Image data and rectilinear grids.
    Implicit(ImplicitGrid),
}

impl Grid {
    fn provider(&self) -> &dyn GridProvider {
        match self {
            Grid::Unstructured(g) => g,
            Grid::Structured(g) => g,
            Grid::Implicit(g) => g,
        }
    }

    /// Number of cells the dataset defines, explicit or implicit.
    pub fn cell_count(&self) -> usize {
        match self {
            Grid::Unstructured(g) => g.num_cells(),
            Grid::Structured(g) => lattice_cell_count(g.dimensions()),
            Grid::Implicit(g) => lattice_cell_count(g.dimensions()),
        }
    }

    /// Attach a point field array; it must carry one tuple per point.
    pub fn try_add_point_array(&mut self, array: DataArray) -> Result<(), MeshNormalizeError> {
        match self {
            Grid::Unstructured(g) => g.try_add_point_array(array),
            Grid::Structured(g) => g.try_add_point_array(array),
            Grid::Implicit(g) => g.try_add_point_array(array),
        }
    }
}

fn lattice_cell_count(dims: [usize; 3]) -> usize {
    if dims.contains(&0) {
        return 0;
    }
    dims.iter().map(|&n| n.saturating_sub(1).max(1)).product()
}

impl GridProvider for Grid {
    fn kind(&self) -> GridKind {
        self.provider().kind()
    }

    fn point_count(&self) -> usize {
        self.provider().point_count()
    }

    fn point(&self, index: usize) -> [f64; 3] {
        self.provider().point(index)
    }

    fn cells(&self) -> Option<CellIter<'_>> {
        self.provider().cells()
    }

    fn boundary_surface(&self) -> Result<Polygons, MeshNormalizeError> {
        self.provider().boundary_surface()
    }

    fn append_to_unstructured(&self) -> Result<UnstructuredGrid, MeshNormalizeError> {
        self.provider().append_to_unstructured()
    }

    fn point_arrays(&self) -> Option<Vec<&dyn FieldArray>> {
        self.provider().point_arrays()
    }

    fn bounds(&self) -> Option<Bounds> {
        self.provider().bounds()
    }
}

/// Read a grid file, choosing the reader by extension.
///
/// Legacy `.vtk` and XML `.vtu` files are understood (case-insensitive);
/// any other extension fails with
/// [`MeshNormalizeError::UnsupportedFileType`] before the file is opened.
pub fn read_grid_file(path: impl AsRef<Path>) -> Result<Grid, MeshNormalizeError> {
    let path = path.as_ref();
    match path.extension().and_then(OsStr::to_str) {
        Some(ext) if ext.eq_ignore_ascii_case("vtk") => {
            let file = File::open(path)?;
            LegacyVtkReader.read(BufReader::new(file))
        }
        Some(ext) if ext.eq_ignore_ascii_case("vtu") => {
            let file = File::open(path)?;
            VtuReader.read(BufReader::new(file))
        }
        Some(ext) => Err(MeshNormalizeError::UnsupportedFileType(ext.to_string())),
        None => Err(MeshNormalizeError::UnsupportedFileType(
            path.display().to_string(),
        )),
    }
}

//! Grid Provider Interface and in-memory grid adapters.
//!
//! The normalization engine never touches a concrete geometry library; it
//! consumes anything implementing [`GridProvider`]: point access, optional
//! cell iteration, boundary extraction, structured-to-unstructured
//! conversion, point field arrays and bounds.
//!
//! Three adapters are provided:
//! - [`UnstructuredGrid`]: explicit points + mixed-kind cells (also used for
//!   polygonal surface grids, see [`GridKind::PolyData`]).
//! - [`StructuredGrid`]: curvilinear `i×j×k` lattice of explicit points;
//!   must be appended to an unstructured grid before decomposition.
//! - [`ImplicitGrid`]: image-data and rectilinear lattices, which have no
//!   direct points+cells model and are rejected by the normalizer.

pub mod implicit;
pub mod structured;
pub mod unstructured;

use crate::field::FieldArray;
use crate::mesh_error::MeshNormalizeError;
use crate::topology::CellRef;

pub use implicit::ImplicitGrid;
pub use structured::StructuredGrid;
pub use unstructured::UnstructuredGrid;

/// Boxed cell traversal handed out by providers.
pub type CellIter<'a> = Box<dyn Iterator<Item = CellRef<'a>> + 'a>;

/// Boundary polygons as lists of point indices.
pub type Polygons = Vec<Vec<usize>>;

/// Dataset kinds a provider can report.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GridKind {
    /// Explicit points and mixed-kind cells.
    Unstructured,
    /// Explicit points and polygonal surface cells.
    PolyData,
    /// Curvilinear lattice of explicit points.
    Structured,
    /// Uniform lattice defined by origin and spacing.
    StructuredPoints,
    /// Axis-aligned lattice defined by per-axis coordinates.
    Rectilinear,
}

/// How the normalizer reaches a points+cells representation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GridRoute {
    /// Use the grid as-is.
    Direct,
    /// Run `append_to_unstructured` first.
    Append,
    /// No path to points+cells.
    Unsupported,
}

impl GridKind {
    /// Dataset name as used by VTK.
    pub fn name(self) -> &'static str {
        match self {
            GridKind::Unstructured => "UnstructuredGrid",
            GridKind::PolyData => "PolyData",
            GridKind::Structured => "StructuredGrid",
            GridKind::StructuredPoints => "StructuredPoints",
            GridKind::Rectilinear => "RectilinearGrid",
        }
    }

    pub fn route(self) -> GridRoute {
        match self {
            GridKind::Unstructured | GridKind::PolyData => GridRoute::Direct,
            GridKind::Structured => GridRoute::Append,
            GridKind::StructuredPoints | GridKind::Rectilinear => GridRoute::Unsupported,
        }
    }
}

/// Axis-aligned bounding box `(xmin, xmax, ymin, ymax, zmin, zmax)`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bounds {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub zmin: f64,
    pub zmax: f64,
}

impl Bounds {
    /// Tight bounds of a point cloud, `None` when it is empty.
    pub fn from_points(points: impl IntoIterator<Item = [f64; 3]>) -> Option<Self> {
        let mut points = points.into_iter();
        let [x, y, z] = points.next()?;
        let init = Bounds {
            xmin: x,
            xmax: x,
            ymin: y,
            ymax: y,
            zmin: z,
            zmax: z,
        };
        Some(points.fold(init, |b, [x, y, z]| Bounds {
            xmin: b.xmin.min(x),
            xmax: b.xmax.max(x),
            ymin: b.ymin.min(y),
            ymax: b.ymax.max(y),
            zmin: b.zmin.min(z),
            zmax: b.zmax.max(z),
        }))
    }

    /// The six scalars in `(xmin, xmax, ymin, ymax, zmin, zmax)` order.
    #[inline]
    pub fn as_array(&self) -> [f64; 6] {
        [
            self.xmin, self.xmax, self.ymin, self.ymax, self.zmin, self.zmax,
        ]
    }
}

/// Capability interface over a computational grid.
///
/// Implementations are read-only snapshots: the engine only ever borrows a
/// provider immutably and never mutates it.
pub trait GridProvider {
    /// Dataset kind, deciding how the grid is normalized.
    fn kind(&self) -> GridKind;

    /// Number of points.
    fn point_count(&self) -> usize;

    /// Coordinates of point `index`.
    ///
    /// # Panics
    /// May panic if `index >= point_count()`.
    fn point(&self, index: usize) -> [f64; 3];

    /// Cells in traversal order, or `None` when the provider has no cell
    /// iteration capability (treated as zero cells).
    fn cells(&self) -> Option<CellIter<'_>>;

    /// Outer boundary polygons: external faces of volumetric cells and the
    /// grid's own surface cells, in traversal order.
    fn boundary_surface(&self) -> Result<Polygons, MeshNormalizeError>;

    /// Convert the grid to an explicit unstructured grid.
    fn append_to_unstructured(&self) -> Result<UnstructuredGrid, MeshNormalizeError>;

    /// Point-attached field arrays, or `None` when the provider has no
    /// point-data store at all.
    fn point_arrays(&self) -> Option<Vec<&dyn FieldArray>>;

    /// Bounding box of all points, `None` when there are none.
    fn bounds(&self) -> Option<Bounds> {
        Bounds::from_points((0..self.point_count()).map(|i| self.point(i)))
    }
}

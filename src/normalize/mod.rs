//! Grid normalization: one provider snapshot in, one [`NormalizedMesh`] out.
//!
//! The [`GridNormalizer`] decides how a grid reaches a points+cells
//! representation (directly, via an append to an unstructured grid, or not
//! at all) and runs the four extractors on it. Vertices are always built
//! first so a grid without points fails before any other buffer exists.
//!
//! # Example
//! ```rust
//! use mesh_normalize::field::DataArray;
//! use mesh_normalize::grid::UnstructuredGrid;
//! use mesh_normalize::normalize::GridNormalizer;
//! use mesh_normalize::topology::CellType;
//!
//! let grid = UnstructuredGrid::new(vec![
//!     [0.0, 0.0, 0.0],
//!     [1.0, 0.0, 0.0],
//!     [0.0, 1.0, 0.0],
//!     [0.0, 0.0, 1.0],
//! ])
//! .try_with_cell(CellType::Tetrahedron, vec![0, 1, 2, 3])?
//! .try_with_point_array(DataArray::scalars("T", vec![1.0, 2.0, 3.0, 4.0]))?;
//!
//! let mesh = GridNormalizer::default().normalize(&grid)?;
//! assert_eq!(mesh.tetrahedra, vec![0, 1, 2, 3]);
//! assert_eq!(mesh.faces.len(), 12);
//! assert_eq!(mesh.fields["T"]["X1"].max, 4.0);
//! # Ok::<(), mesh_normalize::mesh_error::MeshNormalizeError>(())
//! ```

pub mod config;

use serde::Serialize;

pub use config::NormalizeConfig;

use crate::extract::{
    aggregate_fields_with, decompose_volume_with, extract_vertices, triangulate_surface,
};
use crate::field::FieldSet;
use crate::grid::{Bounds, GridProvider, GridRoute, UnstructuredGrid};
use crate::mesh_error::MeshNormalizeError;

/// Renderer-ready buffers of one grid.
///
/// Every index in `faces` and `tetrahedra` is below the vertex count
/// (`vertices.len() / 3`).
///
/// Serializes `fields` as field name → component name →
/// `{array, min, max}`. Magnitude ranges, when computed, go to a separate
/// `magnitudes` map keyed by field name.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedMesh {
    /// `[x0, y0, z0, x1, ...]`.
    pub vertices: Vec<f32>,
    /// Triangle index triples.
    pub faces: Vec<u32>,
    /// Linear tetrahedron index quadruples.
    pub tetrahedra: Vec<u32>,
    /// Bounding box of all points.
    pub bounds: Bounds,
    /// Flattened point fields.
    pub fields: FieldSet,
}

impl NormalizedMesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.faces.len() / 3
    }

    #[inline]
    pub fn tetrahedron_count(&self) -> usize {
        self.tetrahedra.len() / 4
    }

    /// Bounding box as `[xmin, xmax, ymin, ymax, zmin, zmax]`.
    #[inline]
    pub fn bounding_box(&self) -> [f64; 6] {
        self.bounds.as_array()
    }
}

impl Serialize for NormalizedMesh {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("NormalizedMesh", 6)?;
        state.serialize_field("vertices", &self.vertices)?;
        state.serialize_field("faces", &self.faces)?;
        state.serialize_field("tetrahedra", &self.tetrahedra)?;
        state.serialize_field("bounds", &self.bounds)?;
        state.serialize_field("fields", &self.fields)?;
        let magnitudes = self.fields.magnitudes();
        if magnitudes.is_empty() {
            state.skip_field("magnitudes")?;
        } else {
            state.serialize_field("magnitudes", &magnitudes)?;
        }
        state.end()
    }
}

/// One of the independently replaceable parts of a [`NormalizedMesh`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum MeshPart {
    Vertices,
    Faces,
    Tetrahedra,
    Fields,
}

/// Which parts a reload recomputes. Defaults to fields only.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, Serialize)]
#[serde(default)]
pub struct ReloadParts {
    pub vertices: bool,
    pub faces: bool,
    pub tetrahedra: bool,
    pub fields: bool,
}

impl Default for ReloadParts {
    fn default() -> Self {
        Self {
            vertices: false,
            faces: false,
            tetrahedra: false,
            fields: true,
        }
    }
}

impl ReloadParts {
    /// Every part.
    pub fn all() -> Self {
        Self {
            vertices: true,
            faces: true,
            tetrahedra: true,
            fields: true,
        }
    }

    /// Requested parts in reload order.
    pub fn requested(&self) -> impl Iterator<Item = MeshPart> + use<> {
        [
            (self.vertices, MeshPart::Vertices),
            (self.faces, MeshPart::Faces),
            (self.tetrahedra, MeshPart::Tetrahedra),
            (self.fields, MeshPart::Fields),
        ]
        .into_iter()
        .filter_map(|(on, part)| on.then_some(part))
    }
}

/// Outcome of a partial reload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReloadReport {
    /// Parts whose buffers were replaced.
    pub replaced: Vec<MeshPart>,
    /// Parts that failed and kept their previous buffer.
    pub failed: Vec<(MeshPart, MeshNormalizeError)>,
}

impl ReloadReport {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Builds [`NormalizedMesh`]es from grid providers.
#[derive(Clone, Debug, Default)]
pub struct GridNormalizer {
    config: NormalizeConfig,
}

impl GridNormalizer {
    pub fn new(config: NormalizeConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &NormalizeConfig {
        &self.config
    }

    /// Normalize a grid into a fresh mesh.
    ///
    /// Structured grids are appended to an unstructured grid first; grid
    /// kinds without a points+cells path fail with
    /// [`MeshNormalizeError::UnsupportedGridKind`].
    pub fn normalize<G>(&self, grid: &G) -> Result<NormalizedMesh, MeshNormalizeError>
    where
        G: GridProvider + ?Sized,
    {
        match grid.kind().route() {
            GridRoute::Direct => self.build(grid),
            GridRoute::Append => self.build(&append(grid)?),
            GridRoute::Unsupported => Err(unsupported(grid)),
        }
    }

    /// Recompute the requested parts of `mesh` from `grid`.
    ///
    /// Each part is all-or-nothing: a failing part keeps its previous buffer
    /// and is reported in [`ReloadReport::failed`], while parts already
    /// replaced stay replaced. Reloading vertices also refreshes the bounds.
    /// Only grid-kind resolution failures abort the whole reload.
    pub fn reload<G>(
        &self,
        mesh: &mut NormalizedMesh,
        grid: &G,
        parts: ReloadParts,
    ) -> Result<ReloadReport, MeshNormalizeError>
    where
        G: GridProvider + ?Sized,
    {
        match grid.kind().route() {
            GridRoute::Direct => Ok(self.reload_parts(mesh, grid, parts)),
            GridRoute::Append => Ok(self.reload_parts(mesh, &append(grid)?, parts)),
            GridRoute::Unsupported => Err(unsupported(grid)),
        }
    }

    fn build<G>(&self, grid: &G) -> Result<NormalizedMesh, MeshNormalizeError>
    where
        G: GridProvider + ?Sized,
    {
        let vertices = extract_vertices(grid)?;
        let bounds = grid.bounds().ok_or(MeshNormalizeError::EmptyGeometry)?;
        let faces = triangulate_surface(grid)?;
        let tetrahedra = decompose_volume_with(grid, self.config.dropped_cells)?;
        let fields = aggregate_fields_with(grid, self.config.compute_magnitude)?;
        log::debug!(
            "normalized {}: {} vertices, {} triangles, {} tetrahedra, {} fields",
            grid.kind().name(),
            vertices.len() / 3,
            faces.len() / 3,
            tetrahedra.len() / 4,
            fields.len()
        );
        Ok(NormalizedMesh {
            vertices,
            faces,
            tetrahedra,
            bounds,
            fields,
        })
    }

    fn reload_parts<G>(
        &self,
        mesh: &mut NormalizedMesh,
        grid: &G,
        parts: ReloadParts,
    ) -> ReloadReport
    where
        G: GridProvider + ?Sized,
    {
        let mut report = ReloadReport::default();
        for part in parts.requested() {
            let outcome = match part {
                MeshPart::Vertices => extract_vertices(grid).and_then(|vertices| {
                    let bounds = grid.bounds().ok_or(MeshNormalizeError::EmptyGeometry)?;
                    mesh.vertices = vertices;
                    mesh.bounds = bounds;
                    Ok(())
                }),
                MeshPart::Faces => triangulate_surface(grid).map(|faces| mesh.faces = faces),
                MeshPart::Tetrahedra => decompose_volume_with(grid, self.config.dropped_cells)
                    .map(|tetrahedra| mesh.tetrahedra = tetrahedra),
                MeshPart::Fields => aggregate_fields_with(grid, self.config.compute_magnitude)
                    .map(|fields| mesh.fields = fields),
            };
            match outcome {
                Ok(()) => report.replaced.push(part),
                Err(err) => {
                    log::warn!("reload of {part:?} failed, keeping previous buffer: {err}");
                    report.failed.push((part, err));
                }
            }
        }
        report
    }
}

fn append<G>(grid: &G) -> Result<UnstructuredGrid, MeshNormalizeError>
where
    G: GridProvider + ?Sized,
{
    log::debug!(
        "appending {} with {} points to an unstructured grid",
        grid.kind().name(),
        grid.point_count()
    );
    grid.append_to_unstructured()
}

fn unsupported<G>(grid: &G) -> MeshNormalizeError
where
    G: GridProvider + ?Sized,
{
    MeshNormalizeError::UnsupportedGridKind(grid.kind().name().to_string())
}

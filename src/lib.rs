#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-normalize
//!
//! mesh-normalize turns computational grids into flat, renderer-ready
//! buffers: `f32` vertex triples, `u32` surface triangles, `u32` linear
//! tetrahedra and per-component point field buffers with exact value
//! ranges.
//!
//! ## Features
//! - A capability trait ([`grid::GridProvider`]) over unstructured,
//!   polygonal, structured and implicit grids, with in-memory adapters
//! - Surface triangulation of boundary polygons with a fixed quad diagonal
//! - Volume decomposition of linear and quadratic tetrahedra
//! - Field flattening with provider-exact per-component ranges
//! - Partial reload of individual buffers
//! - A legacy VTK reader and a little-endian wire encoding
//! - Optional `rayon` feature for parallel field flattening
//!
//! ## Usage
//! ```rust
//! use mesh_normalize::prelude::*;
//!
//! let grid = StructuredGrid::uniform_box([3, 3, 3], [0.0; 3], [1.0; 3])?;
//! let mesh = GridNormalizer::default().normalize(&grid)?;
//! assert_eq!(mesh.vertex_count(), 27);
//! assert_eq!(mesh.triangle_count(), 48);
//! assert!(mesh.tetrahedra.is_empty());
//! # Ok::<(), MeshNormalizeError>(())
//! ```
//!
//! ## Logging
//! The crate logs through the [`log`] facade and never installs a logger.

pub mod extract;
pub mod field;
pub mod grid;
pub mod io;
pub mod mesh_error;
pub mod normalize;
pub mod session;
pub mod topology;
pub mod wire;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::extract::{
        DroppedCellPolicy, aggregate_fields, decompose_volume, extract_vertices,
        triangulate_surface,
    };
    pub use crate::field::{DataArray, FieldArray, FieldSet};
    pub use crate::grid::{
        Bounds, GridKind, GridProvider, ImplicitGrid, StructuredGrid, UnstructuredGrid,
    };
    pub use crate::io::{Grid, GridReader, LegacyVtkReader, VtuReader, read_grid_file};
    pub use crate::mesh_error::MeshNormalizeError;
    pub use crate::normalize::{
        GridNormalizer, MeshPart, NormalizeConfig, NormalizedMesh, ReloadParts, ReloadReport,
    };
    pub use crate::session::Session;
    pub use crate::topology::CellType;
}

//! The four extractors that flatten a grid provider into renderer buffers.
//!
//! Each extractor is a pure function over an immutable provider borrow and
//! either returns a complete buffer or fails without exposing partial output.
//!
//! - [`vertices`]: point coordinates → `f32` triples
//! - [`surface`]: boundary polygons → `u32` triangles
//! - [`volume`]: volumetric cells → `u32` linear tetrahedra
//! - [`fields`]: point field arrays → per-component buffers with ranges

pub mod fields;
pub mod surface;
pub mod vertices;
pub mod volume;

pub use fields::{aggregate_fields, aggregate_fields_with};
pub use surface::{triangulate_polygon, triangulate_surface};
pub use vertices::extract_vertices;
pub use volume::{
    DroppedCellPolicy, QUADRATIC_TETRA_DECOMPOSITION, decompose_volume, decompose_volume_with,
};

use crate::mesh_error::MeshNormalizeError;

/// Check `index` against the point count and narrow it to the 32-bit index
/// contract. `cell` is the traversal position reported on failure.
#[inline]
pub(crate) fn output_index(
    cell: usize,
    index: usize,
    point_count: usize,
) -> Result<u32, MeshNormalizeError> {
    if index >= point_count {
        return Err(MeshNormalizeError::CellIndexOutOfRange {
            cell,
            index,
            point_count,
        });
    }
    u32::try_from(index).map_err(|_| MeshNormalizeError::IndexOverflow(index))
}

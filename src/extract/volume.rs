//! Volume decomposition into linear tetrahedra.
//!
//! Only two volumetric kinds are reduced:
//! - [`CellType::Tetrahedron`] is emitted as-is;
//! - [`CellType::QuadraticTetrahedron`] is split into eight linear
//!   tetrahedra by [`QUADRATIC_TETRA_DECOMPOSITION`].
//!
//! Cells of dimension 0–2 are skipped. Other volumetric kinds are dropped
//! according to the [`DroppedCellPolicy`] (silently by default).

use std::collections::BTreeMap;

use crate::extract::output_index;
use crate::grid::GridProvider;
use crate::mesh_error::MeshNormalizeError;
use crate::topology::{CellRef, CellType};

/// Split of a quadratic tetrahedron into eight linear tetrahedra.
///
/// Entries are positions in the 10-id cell list (`p0..p3` corners,
/// `p4..p9` mid-edge nodes); sub-tetrahedra are emitted in this order.
pub const QUADRATIC_TETRA_DECOMPOSITION: [[usize; 4]; 8] = [
    [0, 4, 6, 7],
    [1, 4, 5, 8],
    [2, 5, 6, 9],
    [3, 7, 8, 9],
    [6, 4, 7, 8],
    [4, 5, 6, 8],
    [5, 8, 9, 6],
    [6, 7, 8, 9],
];

/// What to do with volumetric cells that cannot be decomposed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DroppedCellPolicy {
    /// Drop them silently.
    #[default]
    Ignore,
    /// Drop them and log one warning per kind with the number dropped.
    Warn,
    /// Fail on the first one.
    Error,
}

/// Decompose all volumetric cells, silently dropping unsupported kinds.
pub fn decompose_volume<G>(grid: &G) -> Result<Vec<u32>, MeshNormalizeError>
where
    G: GridProvider + ?Sized,
{
    decompose_volume_with(grid, DroppedCellPolicy::Ignore)
}

/// Decompose all volumetric cells into `[a, b, c, d, ...]` quadruples.
///
/// Tetrahedra are appended in cell traversal order. A provider without cell
/// iteration yields an empty buffer.
pub fn decompose_volume_with<G>(
    grid: &G,
    policy: DroppedCellPolicy,
) -> Result<Vec<u32>, MeshNormalizeError>
where
    G: GridProvider + ?Sized,
{
    let Some(cells) = grid.cells() else {
        return Ok(Vec::new());
    };
    let point_count = grid.point_count();
    let mut out = Vec::new();
    let mut dropped: BTreeMap<u8, (CellType, usize)> = BTreeMap::new();

    for cell in cells {
        if cell.dimension() != 3 {
            continue;
        }
        if !decompose_cell(cell, point_count, &mut out)? {
            match policy {
                DroppedCellPolicy::Ignore => {}
                DroppedCellPolicy::Warn => {
                    dropped
                        .entry(cell.kind.vtk_code())
                        .or_insert((cell.kind, 0))
                        .1 += 1;
                }
                DroppedCellPolicy::Error => {
                    return Err(MeshNormalizeError::UnsupportedCell {
                        cell: cell.index,
                        kind: cell.kind.to_string(),
                    });
                }
            }
        }
    }

    for (kind, count) in dropped.values() {
        log::warn!("Dropped {count} volumetric cell(s) of unsupported kind {kind}");
    }
    Ok(out)
}

/// Append the tetrahedra of one volumetric cell to `out`.
///
/// Returns `Ok(false)` when the kind is not decomposable; nothing is
/// appended in that case or on error.
pub fn decompose_cell(
    cell: CellRef<'_>,
    point_count: usize,
    out: &mut Vec<u32>,
) -> Result<bool, MeshNormalizeError> {
    let ids = cell.point_ids;
    match cell.kind {
        CellType::Tetrahedron => {
            check_arity(&cell, 4)?;
            let mut tet = [0u32; 4];
            for (slot, &id) in tet.iter_mut().zip(ids) {
                *slot = output_index(cell.index, id, point_count)?;
            }
            out.extend(tet);
            Ok(true)
        }
        CellType::QuadraticTetrahedron => {
            check_arity(&cell, 10)?;
            let mut local = [0u32; 10];
            for (slot, &id) in local.iter_mut().zip(ids) {
                *slot = output_index(cell.index, id, point_count)?;
            }
            out.reserve(QUADRATIC_TETRA_DECOMPOSITION.len() * 4);
            for sub in &QUADRATIC_TETRA_DECOMPOSITION {
                out.extend(sub.iter().map(|&i| local[i]));
            }
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn check_arity(cell: &CellRef<'_>, expected: usize) -> Result<(), MeshNormalizeError> {
    if cell.len() != expected {
        return Err(MeshNormalizeError::InvalidCell {
            cell: cell.index,
            kind: cell.kind.to_string(),
            expected,
            found: cell.len(),
        });
    }
    Ok(())
}

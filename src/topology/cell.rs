//! Read-only cell views handed out by grid providers.

use crate::topology::cell_type::CellType;

/// A borrowed view of one cell in a provider's topology.
///
/// `index` is the cell's position in the provider's traversal order; it is
/// only used for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRef<'a> {
    pub index: usize,
    pub kind: CellType,
    pub point_ids: &'a [usize],
}

impl<'a> CellRef<'a> {
    #[inline]
    pub fn new(index: usize, kind: CellType, point_ids: &'a [usize]) -> Self {
        Self {
            index,
            kind,
            point_ids,
        }
    }

    /// Topological dimension of the cell (0–3).
    #[inline]
    pub fn dimension(&self) -> u8 {
        self.kind.dimension()
    }

    /// Number of point ids referenced by the cell.
    #[inline]
    pub fn len(&self) -> usize {
        self.point_ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.point_ids.is_empty()
    }
}

/// An owned cell record, as stored by in-memory grids.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub kind: CellType,
    pub point_ids: Vec<usize>,
}

impl Cell {
    pub fn new(kind: CellType, point_ids: Vec<usize>) -> Self {
        Self { kind, point_ids }
    }

    /// Borrow this cell as a [`CellRef`] at traversal position `index`.
    #[inline]
    pub fn view(&self, index: usize) -> CellRef<'_> {
        CellRef::new(index, self.kind, &self.point_ids)
    }
}

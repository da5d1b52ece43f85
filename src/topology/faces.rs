//! Local face tables for volumetric cells.
//!
//! Each table lists the faces of a cell kind as positions into the cell's
//! point list, ordered so that the face normal points out of the cell
//! (VTK orientation). Quadratic tetrahedra expose their corner triangles only.
//!
//! - [`CellType::Tetrahedron`]: `(0,1,2,3)`
//! - [`CellType::Hexahedron`]: `0..=3` bottom face, `4..=7` top face.
//! - [`CellType::Voxel`]: lattice order, `x` fastest then `y` then `z`.
//! - [`CellType::Prism`]: bottom triangle `(0,1,2)`, top triangle `(3,4,5)`.
//! - [`CellType::Pyramid`]: base quad `(0,1,2,3)`, apex `4`.

use crate::topology::cell_type::CellType;

const TETRA_FACES: &[&[usize]] = &[&[0, 1, 3], &[1, 2, 3], &[2, 0, 3], &[0, 2, 1]];

const HEXAHEDRON_FACES: &[&[usize]] = &[
    &[0, 4, 7, 3],
    &[1, 2, 6, 5],
    &[0, 1, 5, 4],
    &[3, 7, 6, 2],
    &[0, 3, 2, 1],
    &[4, 5, 6, 7],
];

const VOXEL_FACES: &[&[usize]] = &[
    &[0, 4, 6, 2],
    &[1, 3, 7, 5],
    &[0, 1, 5, 4],
    &[2, 6, 7, 3],
    &[0, 2, 3, 1],
    &[4, 5, 7, 6],
];

const PRISM_FACES: &[&[usize]] = &[
    &[0, 1, 2],
    &[3, 5, 4],
    &[0, 3, 4, 1],
    &[1, 4, 5, 2],
    &[2, 5, 3, 0],
];

const PYRAMID_FACES: &[&[usize]] = &[
    &[0, 3, 2, 1],
    &[0, 1, 4],
    &[1, 2, 4],
    &[2, 3, 4],
    &[3, 0, 4],
];

/// Local faces of a volumetric cell kind, or `None` when the kind has no
/// face table (non-volumetric or unknown kinds).
pub fn local_faces(kind: CellType) -> Option<&'static [&'static [usize]]> {
    match kind {
        CellType::Tetrahedron | CellType::QuadraticTetrahedron => Some(TETRA_FACES),
        CellType::Hexahedron => Some(HEXAHEDRON_FACES),
        CellType::Voxel => Some(VOXEL_FACES),
        CellType::Prism => Some(PRISM_FACES),
        CellType::Pyramid => Some(PYRAMID_FACES),
        _ => None,
    }
}

/// Canonical key of a face: its point ids sorted ascending.
pub fn face_key(points: &[usize]) -> Vec<usize> {
    let mut key = points.to_vec();
    key.sort_unstable();
    key
}

//! Cell kind metadata for grid cells.
//!
//! Kinds follow the VTK cell taxonomy so that legacy VTK files map onto them
//! one to one. Point ordering within a cell follows the VTK conventions; in
//! particular a [`CellType::QuadraticTetrahedron`] lists its four corners
//! `p0..p3` followed by the mid-edge nodes of edges
//! `(0,1) (1,2) (0,2) (0,3) (1,3) (2,3)` as `p4..p9`.

use std::fmt;

/// Common cell kinds for grid elements.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum CellType {
    /// 0D vertex.
    Vertex,
    /// 0D set of vertices.
    PolyVertex,
    /// 1D segment/edge.
    Segment,
    /// 1D connected chain of segments.
    PolyLine,
    /// 2D simplex (triangle).
    Triangle,
    /// 2D strip of triangles sharing edges.
    TriangleStrip,
    /// 2D polygon with an arbitrary number of vertices.
    Polygon,
    /// 2D axis-aligned quad in lattice order `(0,1,3,2)`.
    Pixel,
    /// 2D tensor-product cell (quad).
    Quadrilateral,
    /// 3D simplex (tet).
    Tetrahedron,
    /// 3D axis-aligned hex in lattice order.
    Voxel,
    /// 3D tensor-product cell (hex).
    Hexahedron,
    /// 3D wedge/prism.
    Prism,
    /// 3D pyramid.
    Pyramid,
    /// Second-order tetrahedron: 4 corners plus 6 mid-edge nodes.
    QuadraticTetrahedron,
    /// Any other VTK cell code, kept so it can be reported and skipped.
    Other(u8),
}

impl Default for CellType {
    fn default() -> Self {
        CellType::Vertex
    }
}

impl CellType {
    /// Returns the topological dimension of the cell.
    ///
    /// Codes without a dedicated variant use the dimension VTK assigns them;
    /// unassigned codes are treated as volumetric.
    pub fn dimension(self) -> u8 {
        match self {
            CellType::Vertex | CellType::PolyVertex => 0,
            CellType::Segment | CellType::PolyLine => 1,
            CellType::Triangle
            | CellType::TriangleStrip
            | CellType::Polygon
            | CellType::Pixel
            | CellType::Quadrilateral => 2,
            CellType::Tetrahedron
            | CellType::Voxel
            | CellType::Hexahedron
            | CellType::Prism
            | CellType::Pyramid
            | CellType::QuadraticTetrahedron => 3,
            CellType::Other(code) => vtk_code_dimension(code),
        }
    }

    /// Corner count of a higher-order surface kind whose point list starts
    /// with its linear corners (quadratic, biquadratic, Lagrange, Bezier).
    pub fn surface_corner_count(self) -> Option<usize> {
        match self {
            CellType::Other(22 | 34 | 61 | 69 | 76) => Some(3),
            CellType::Other(23 | 28 | 30 | 62 | 70 | 77) => Some(4),
            _ => None,
        }
    }

    /// Number of point ids a cell of this kind must carry, when fixed.
    pub fn expected_point_count(self) -> Option<usize> {
        match self {
            CellType::Vertex => Some(1),
            CellType::Segment => Some(2),
            CellType::Triangle => Some(3),
            CellType::Pixel | CellType::Quadrilateral | CellType::Tetrahedron => Some(4),
            CellType::Pyramid => Some(5),
            CellType::Prism => Some(6),
            CellType::Voxel | CellType::Hexahedron => Some(8),
            CellType::QuadraticTetrahedron => Some(10),
            CellType::PolyVertex
            | CellType::PolyLine
            | CellType::TriangleStrip
            | CellType::Polygon
            | CellType::Other(_) => None,
        }
    }

    /// Maps a VTK cell type code onto a kind.
    pub fn from_vtk_code(code: u8) -> CellType {
        match code {
            1 => CellType::Vertex,
            2 => CellType::PolyVertex,
            3 => CellType::Segment,
            4 => CellType::PolyLine,
            5 => CellType::Triangle,
            6 => CellType::TriangleStrip,
            7 => CellType::Polygon,
            8 => CellType::Pixel,
            9 => CellType::Quadrilateral,
            10 => CellType::Tetrahedron,
            11 => CellType::Voxel,
            12 => CellType::Hexahedron,
            13 => CellType::Prism,
            14 => CellType::Pyramid,
            24 => CellType::QuadraticTetrahedron,
            other => CellType::Other(other),
        }
    }

    /// The VTK cell type code of this kind.
    pub fn vtk_code(self) -> u8 {
        match self {
            CellType::Vertex => 1,
            CellType::PolyVertex => 2,
            CellType::Segment => 3,
            CellType::PolyLine => 4,
            CellType::Triangle => 5,
            CellType::TriangleStrip => 6,
            CellType::Polygon => 7,
            CellType::Pixel => 8,
            CellType::Quadrilateral => 9,
            CellType::Tetrahedron => 10,
            CellType::Voxel => 11,
            CellType::Hexahedron => 12,
            CellType::Prism => 13,
            CellType::Pyramid => 14,
            CellType::QuadraticTetrahedron => 24,
            CellType::Other(code) => code,
        }
    }
}

fn vtk_code_dimension(code: u8) -> u8 {
    match code {
        0 => 0,
        21 | 35 | 51 | 60 | 68 | 75 => 1,
        22 | 23 | 28 | 30 | 34 | 36 | 52 | 53 | 54 | 61 | 62 | 63 | 69 | 70 | 76 | 77 => 2,
        _ => 3,
    }
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellType::Other(code) => write!(f, "vtk cell type {code}"),
            kind => write!(f, "{kind:?}"),
        }
    }
}

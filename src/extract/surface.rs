//! Surface triangulation.
//!
//! The provider's boundary polygons are split into triangles:
//! - quadrilaterals always use the `(p0,p2)` diagonal: `(p0,p1,p2)`,
//!   `(p0,p2,p3)`;
//! - every other polygon is fanned from `p0`: `(p0,pi,pi+1)` for
//!   `i = 1..k-2`.
//!
//! Triangles are emitted in the provider's polygon order.

use itertools::Itertools;

use crate::extract::output_index;
use crate::grid::GridProvider;
use crate::mesh_error::MeshNormalizeError;

/// Triangulate one polygon into `out`. Polygons with fewer than three ids
/// contribute nothing.
pub fn triangulate_polygon(polygon: &[u32], out: &mut Vec<u32>) {
    match polygon {
        [p0, p1, p2, p3] => out.extend([*p0, *p1, *p2, *p0, *p2, *p3]),
        [p0, rest @ ..] if rest.len() >= 2 => {
            for (a, b) in rest.iter().tuple_windows() {
                out.extend([*p0, *a, *b]);
            }
        }
        _ => {}
    }
}

/// Triangulate the grid's boundary surface.
///
/// A grid without cells yields an empty buffer.
pub fn triangulate_surface<G>(grid: &G) -> Result<Vec<u32>, MeshNormalizeError>
where
    G: GridProvider + ?Sized,
{
    let point_count = grid.point_count();
    let polygons = grid.boundary_surface()?;
    let mut out = Vec::with_capacity(polygons.len() * 3);
    let mut ids = Vec::new();
    for (poly, polygon) in polygons.iter().enumerate() {
        ids.clear();
        for &index in polygon {
            ids.push(output_index(poly, index, point_count)?);
        }
        triangulate_polygon(&ids, &mut out);
    }
    Ok(out)
}

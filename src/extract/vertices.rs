//! Vertex extraction.

use crate::grid::GridProvider;
use crate::mesh_error::MeshNormalizeError;

/// Flatten point coordinates into `[x0, y0, z0, x1, ...]` in point order.
///
/// Fails with [`MeshNormalizeError::EmptyGeometry`] when the provider has no
/// points.
pub fn extract_vertices<G>(grid: &G) -> Result<Vec<f32>, MeshNormalizeError>
where
    G: GridProvider + ?Sized,
{
    let count = grid.point_count();
    if count == 0 {
        return Err(MeshNormalizeError::EmptyGeometry);
    }
    let mut out = Vec::with_capacity(count * 3);
    for i in 0..count {
        let [x, y, z] = grid.point(i);
        out.extend([x as f32, y as f32, z as f32]);
    }
    Ok(out)
}

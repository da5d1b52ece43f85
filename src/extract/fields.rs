//! Field aggregation.
//!
//! Every point array is flattened component by component: component `c`
//! becomes a buffer of one `f32` per point, named after the provider's
//! component name or `X{c+1}` when there is none, with the provider's exact
//! `(min, max)` for that component. Field and component order follow the
//! provider. No magnitude component is ever added to the component list; a
//! magnitude range can be requested separately.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::field::{ComponentSummary, FieldArray, FieldSet, FieldSummary, ValueRange};
use crate::grid::GridProvider;
use crate::mesh_error::MeshNormalizeError;

/// Flatten all point arrays without magnitude ranges.
pub fn aggregate_fields<G>(grid: &G) -> Result<FieldSet, MeshNormalizeError>
where
    G: GridProvider + ?Sized,
{
    aggregate_fields_with(grid, false)
}

/// Flatten all point arrays; with `compute_magnitude` each summary also
/// carries the range of the per-point Euclidean norm.
///
/// A provider without a point-data store yields an empty set.
pub fn aggregate_fields_with<G>(
    grid: &G,
    compute_magnitude: bool,
) -> Result<FieldSet, MeshNormalizeError>
where
    G: GridProvider + ?Sized,
{
    let Some(arrays) = grid.point_arrays() else {
        return Ok(FieldSet::new());
    };
    let point_count = grid.point_count();
    for array in &arrays {
        if array.tuple_count() != point_count {
            return Err(MeshNormalizeError::FieldLengthMismatch {
                field: array.name().to_string(),
                expected: point_count,
                found: array.tuple_count(),
            });
        }
    }

    #[cfg(feature = "rayon")]
    let fields = arrays
        .par_iter()
        .map(|array| summarize_array(*array, compute_magnitude))
        .collect::<Vec<_>>();
    #[cfg(not(feature = "rayon"))]
    let fields = arrays
        .iter()
        .map(|array| summarize_array(*array, compute_magnitude))
        .collect::<Vec<_>>();

    Ok(fields.into_iter().collect())
}

/// Name of component `c`: the provider's, or `X{c+1}`.
pub fn component_name(array: &dyn FieldArray, component: usize) -> String {
    array
        .component_name(component)
        .map(str::to_string)
        .unwrap_or_else(|| format!("X{}", component + 1))
}

/// Flatten one array into its per-component summaries.
pub fn summarize_array(array: &dyn FieldArray, compute_magnitude: bool) -> FieldSummary {
    let tuples = array.tuple_count();
    let components = (0..array.component_count())
        .map(|c| {
            let (min, max) = array.range(c);
            ComponentSummary {
                name: component_name(array, c),
                values: (0..tuples).map(|t| array.value(t, c) as f32).collect(),
                min,
                max,
            }
        })
        .collect();
    FieldSummary {
        name: array.name().to_string(),
        components,
        magnitude: compute_magnitude.then(|| ValueRange::from(array.magnitude_range())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::DataArray;

    #[test]
    fn unnamed_components_are_numbered_from_one() {
        let arr = DataArray::try_new("velocity", 3, vec![0.0; 6]).unwrap();
        let summary = summarize_array(&arr, false);
        let names: Vec<&str> = summary.component_names().collect();
        assert_eq!(names, ["X1", "X2", "X3"]);
        assert!(summary.magnitude.is_none());
    }

    #[test]
    fn provider_names_win() {
        let arr = DataArray::try_new("velocity", 2, vec![1.0, 2.0])
            .unwrap()
            .try_with_component_names(["u", "v"])
            .unwrap();
        let summary = summarize_array(&arr, true);
        assert_eq!(summary["v"].values, vec![2.0]);
        assert_eq!(summary["u"].min, 1.0);
        let mag = summary.magnitude.unwrap();
        assert!((mag.max - 5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn components_are_split_per_point() {
        let arr = DataArray::try_new("v", 2, vec![1.0, 10.0, 2.0, 20.0, 3.0, 30.0]).unwrap();
        let summary = summarize_array(&arr, false);
        assert_eq!(summary["X1"].values, vec![1.0, 2.0, 3.0]);
        assert_eq!(summary["X2"].values, vec![10.0, 20.0, 30.0]);
        assert_eq!(summary["X2"].range(), ValueRange { min: 10.0, max: 30.0 });
    }
}

//! Per-point field arrays.
//!
//! A field array is a named, multi-component array with one tuple per point.
//! Providers expose their arrays through the [`FieldArray`] trait; the
//! in-memory grids store them as [`DataArray`]s collected in a [`PointData`]
//! store, which enforces that every array has exactly one tuple per point.
//!
//! Flattened, renderer-ready summaries produced by the field aggregator live
//! in [`summary`].

pub mod summary;

use crate::mesh_error::MeshNormalizeError;

pub use summary::{ComponentSummary, FieldMagnitudes, FieldSet, FieldSummary, ValueRange};

/// Read access to one named, multi-component per-point array.
///
/// Values are addressed as `(tuple, component)`; the tuple index is the point
/// index of the grid the array is attached to.
pub trait FieldArray: Send + Sync {
    /// Name of the array.
    fn name(&self) -> &str;

    /// Number of scalar components per tuple.
    fn component_count(&self) -> usize;

    /// Number of tuples (one per point).
    fn tuple_count(&self) -> usize;

    /// Provider-supplied component name, if any.
    fn component_name(&self, component: usize) -> Option<&str>;

    /// Scalar value of `component` at `tuple`.
    fn value(&self, tuple: usize, component: usize) -> f64;

    /// Exact `(min, max)` over all tuples of `component`.
    ///
    /// NaN values are ignored. An array with no tuples reports
    /// `(f64::INFINITY, f64::NEG_INFINITY)`.
    fn range(&self, component: usize) -> (f64, f64) {
        fold_range((0..self.tuple_count()).map(|t| self.value(t, component)))
    }

    /// Exact `(min, max)` of the Euclidean norm of each tuple.
    fn magnitude_range(&self) -> (f64, f64) {
        let components = self.component_count();
        fold_range((0..self.tuple_count()).map(|t| {
            (0..components)
                .map(|c| {
                    let v = self.value(t, c);
                    v * v
                })
                .sum::<f64>()
                .sqrt()
        }))
    }
}

/// Fold values into an exact `(min, max)` pair, skipping NaN.
pub fn fold_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// An owned field array stored tuple-major: `values[tuple * components + c]`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DataArray {
    name: String,
    components: usize,
    component_names: Vec<Option<String>>,
    values: Vec<f64>,
}

impl DataArray {
    /// Build an array from tuple-major values.
    ///
    /// Fails if `components` is zero or `values` is not a whole number of
    /// tuples.
    pub fn try_new(
        name: impl Into<String>,
        components: usize,
        values: Vec<f64>,
    ) -> Result<Self, MeshNormalizeError> {
        let name = name.into();
        if components == 0 {
            return Err(MeshNormalizeError::InvalidField {
                field: name,
                reason: "component count must be non-zero".into(),
            });
        }
        if values.len() % components != 0 {
            return Err(MeshNormalizeError::InvalidField {
                field: name,
                reason: format!(
                    "{} values do not form whole tuples of {components} components",
                    values.len()
                ),
            });
        }
        Ok(Self {
            name,
            components,
            component_names: Vec::new(),
            values,
        })
    }

    /// Single-component array.
    pub fn scalars(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            components: 1,
            component_names: Vec::new(),
            values,
        }
    }

    /// Attach provider names to the components, in component order.
    ///
    /// Fails if the number of names differs from the component count.
    pub fn try_with_component_names<I, S>(mut self, names: I) -> Result<Self, MeshNormalizeError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<Option<String>> = names.into_iter().map(|n| Some(n.into())).collect();
        if names.len() != self.components {
            return Err(MeshNormalizeError::InvalidField {
                field: self.name,
                reason: format!(
                    "{} component names for {} components",
                    names.len(),
                    self.components
                ),
            });
        }
        self.component_names = names;
        Ok(self)
    }

    /// Tuple-major backing values.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The tuple stored for point `tuple`.
    #[inline]
    pub fn tuple(&self, tuple: usize) -> &[f64] {
        let start = tuple * self.components;
        &self.values[start..start + self.components]
    }
}

impl FieldArray for DataArray {
    fn name(&self) -> &str {
        &self.name
    }

    fn component_count(&self) -> usize {
        self.components
    }

    fn tuple_count(&self) -> usize {
        self.values.len() / self.components
    }

    fn component_name(&self, component: usize) -> Option<&str> {
        self.component_names.get(component)?.as_deref()
    }

    #[inline]
    fn value(&self, tuple: usize, component: usize) -> f64 {
        self.values[tuple * self.components + component]
    }

    fn range(&self, component: usize) -> (f64, f64) {
        fold_range(
            self.values
                .iter()
                .skip(component)
                .step_by(self.components)
                .copied(),
        )
    }
}

/// Ordered store of the point-attached arrays of one grid.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointData {
    arrays: Vec<DataArray>,
}

impl PointData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an array, checking it carries one tuple per point.
    pub fn try_add(
        &mut self,
        array: DataArray,
        point_count: usize,
    ) -> Result<(), MeshNormalizeError> {
        let found = array.tuple_count();
        if found != point_count {
            return Err(MeshNormalizeError::FieldLengthMismatch {
                field: array.name,
                expected: point_count,
                found,
            });
        }
        self.arrays.push(array);
        Ok(())
    }

    /// Arrays in insertion order.
    #[inline]
    pub fn arrays(&self) -> &[DataArray] {
        &self.arrays
    }

    /// First array called `name`.
    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name == name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Trait-object views of the arrays, in insertion order.
    pub fn field_arrays(&self) -> Vec<&dyn FieldArray> {
        self.arrays.iter().map(|a| a as &dyn FieldArray).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_exact() {
        let arr = DataArray::scalars("s", vec![1.0, -2.5, 7.0]);
        assert_eq!(arr.range(0), (-2.5, 7.0));
    }

    #[test]
    fn range_per_component_and_skips_nan() {
        let arr =
            DataArray::try_new("v", 2, vec![1.0, 10.0, f64::NAN, -4.0, 3.0, 2.0]).unwrap();
        assert_eq!(arr.tuple_count(), 3);
        assert_eq!(arr.range(0), (1.0, 3.0));
        assert_eq!(arr.range(1), (-4.0, 10.0));
    }

    #[test]
    fn magnitude_range_uses_tuple_norms() {
        let arr = DataArray::try_new("v", 2, vec![3.0, 4.0, 0.0, 1.0]).unwrap();
        assert_eq!(arr.magnitude_range(), (1.0, 5.0));
    }

    #[test]
    fn malformed_arrays_are_rejected() {
        assert!(matches!(
            DataArray::try_new("bad", 0, vec![]),
            Err(MeshNormalizeError::InvalidField { .. })
        ));
        assert!(matches!(
            DataArray::try_new("bad", 3, vec![1.0, 2.0]),
            Err(MeshNormalizeError::InvalidField { .. })
        ));
        let arr = DataArray::try_new("v", 2, vec![0.0; 4]).unwrap();
        assert!(arr.try_with_component_names(["x"]).is_err());
    }

    #[test]
    fn point_data_checks_tuple_count() {
        let mut data = PointData::new();
        let err = data
            .try_add(DataArray::scalars("t", vec![1.0, 2.0]), 3)
            .unwrap_err();
        assert_eq!(
            err,
            MeshNormalizeError::FieldLengthMismatch {
                field: "t".into(),
                expected: 3,
                found: 2,
            }
        );
        data.try_add(DataArray::scalars("t", vec![1.0, 2.0, 3.0]), 3)
            .unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.get("t").unwrap().tuple(2), &[3.0]);
    }

    #[test]
    fn component_names_are_optional() {
        let arr = DataArray::try_new("v", 2, vec![0.0; 2])
            .unwrap()
            .try_with_component_names(["u", "w"])
            .unwrap();
        assert_eq!(arr.component_name(1), Some("w"));
        assert_eq!(DataArray::scalars("s", vec![]).component_name(0), None);
    }
}

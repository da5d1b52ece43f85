//! Flattened field summaries handed to the rendering consumer.
//!
//! A [`FieldSet`] maps field name → [`FieldSummary`], which maps component
//! name → [`ComponentSummary`]. Both mappings keep the provider's ordering and
//! can be indexed by name: `fields["Temperature"]["X1"]`.

use serde::Serialize;
use std::ops::Index;

/// Inclusive value range of a component or magnitude.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl From<(f64, f64)> for ValueRange {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

/// One flattened component: `values[i]` is the component at point `i`.
///
/// Serializes as `{"array": [...], "min": .., "max": ..}`; the name is the
/// key in the enclosing field map.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ComponentSummary {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "array")]
    pub values: Vec<f32>,
    pub min: f64,
    pub max: f64,
}

impl ComponentSummary {
    #[inline]
    pub fn range(&self) -> ValueRange {
        ValueRange {
            min: self.min,
            max: self.max,
        }
    }
}

/// All components of one field, in provider order.
///
/// Serializes as a map keyed by component name. The magnitude range is not
/// part of that map; see [`FieldSet::magnitudes`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSummary {
    pub name: String,
    pub components: Vec<ComponentSummary>,
    /// Range of the per-point Euclidean norm, only when requested by
    /// configuration. Never part of `components`.
    pub magnitude: Option<ValueRange>,
}

impl FieldSummary {
    /// First component called `name`.
    pub fn component(&self, name: &str) -> Option<&ComponentSummary> {
        self.components.iter().find(|c| c.name == name)
    }

    /// Component names in order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.iter().map(|c| c.name.as_str())
    }
}

impl Serialize for FieldSummary {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.components.iter().map(|c| (c.name.as_str(), c)))
    }
}

impl Index<&str> for FieldSummary {
    type Output = ComponentSummary;

    /// # Panics
    /// Panics if no component is called `name`.
    fn index(&self, name: &str) -> &ComponentSummary {
        self.component(name)
            .unwrap_or_else(|| panic!("no component `{name}` in field `{}`", self.name))
    }
}

/// Ordered mapping of field name to flattened components.
///
/// Serializes as a map keyed by field name, in provider order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSet {
    fields: Vec<FieldSummary>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: FieldSummary) {
        self.fields.push(field);
    }

    /// First field called `name`.
    pub fn get(&self, name: &str) -> Option<&FieldSummary> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldSummary> {
        self.fields.iter()
    }

    /// Field names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Magnitude ranges of the fields that carry one, keyed by field name.
    pub fn magnitudes(&self) -> FieldMagnitudes<'_> {
        FieldMagnitudes { set: self }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for FieldSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.fields.iter().map(|f| (f.name.as_str(), f)))
    }
}

/// Serializable view of the magnitude ranges in a [`FieldSet`].
#[derive(Clone, Copy, Debug)]
pub struct FieldMagnitudes<'a> {
    set: &'a FieldSet,
}

impl<'a> FieldMagnitudes<'a> {
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, ValueRange)> + use<'a> {
        self.set
            .fields
            .iter()
            .filter_map(|f| f.magnitude.map(|m| (f.name.as_str(), m)))
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl Serialize for FieldMagnitudes<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl FromIterator<FieldSummary> for FieldSet {
    fn from_iter<T: IntoIterator<Item = FieldSummary>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a FieldSummary;
    type IntoIter = std::slice::Iter<'a, FieldSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl Index<&str> for FieldSet {
    type Output = FieldSummary;

    /// # Panics
    /// Panics if no field is called `name`.
    fn index(&self, name: &str) -> &FieldSummary {
        self.get(name)
            .unwrap_or_else(|| panic!("no field `{name}`"))
    }
}

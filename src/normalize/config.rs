//! Normalizer configuration.

use serde::{Deserialize, Serialize};

use crate::extract::DroppedCellPolicy;
use crate::mesh_error::MeshNormalizeError;

/// Options controlling a [`GridNormalizer`](crate::normalize::GridNormalizer).
///
/// Missing keys fall back to their defaults when deserializing:
///
/// ```rust
/// use mesh_normalize::extract::DroppedCellPolicy;
/// use mesh_normalize::normalize::NormalizeConfig;
///
/// let config = NormalizeConfig::from_json(r#"{ "dropped_cells": "warn" }"#)?;
/// assert_eq!(config.dropped_cells, DroppedCellPolicy::Warn);
/// assert!(!config.compute_magnitude);
/// # Ok::<(), mesh_normalize::mesh_error::MeshNormalizeError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Handling of volumetric cells the decomposer cannot reduce.
    pub dropped_cells: DroppedCellPolicy,
    /// Attach a magnitude range to each field summary.
    pub compute_magnitude: bool,
}

impl NormalizeConfig {
    /// Parse a JSON configuration document.
    pub fn from_json(text: &str) -> Result<Self, MeshNormalizeError> {
        serde_json::from_str(text).map_err(|e| MeshNormalizeError::InvalidConfig(e.to_string()))
    }
}

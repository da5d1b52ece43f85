//! Explicit load/reload context.
//!
//! A [`Session`] owns the configured normalizer and the most recently
//! loaded mesh. Callers pass it around instead of relying on a global
//! "current scene".

use std::path::Path;

use crate::grid::GridProvider;
use crate::io::read_grid_file;
use crate::mesh_error::MeshNormalizeError;
use crate::normalize::{GridNormalizer, NormalizeConfig, NormalizedMesh, ReloadParts, ReloadReport};

#[derive(Clone, Debug, Default)]
pub struct Session {
    normalizer: GridNormalizer,
    mesh: Option<NormalizedMesh>,
}

impl Session {
    pub fn new(config: NormalizeConfig) -> Self {
        Self {
            normalizer: GridNormalizer::new(config),
            mesh: None,
        }
    }

    /// The current mesh, if anything was loaded.
    #[inline]
    pub fn mesh(&self) -> Option<&NormalizedMesh> {
        self.mesh.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &NormalizeConfig {
        self.normalizer.config()
    }

    /// Normalize `grid` and make it the current mesh. On failure the
    /// previous mesh is kept.
    pub fn load<G>(&mut self, grid: &G) -> Result<&NormalizedMesh, MeshNormalizeError>
    where
        G: GridProvider + ?Sized,
    {
        let mesh = self.normalizer.normalize(grid)?;
        Ok(self.mesh.insert(mesh))
    }

    /// Read and load a grid file.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&NormalizedMesh, MeshNormalizeError> {
        let grid = read_grid_file(path.as_ref())?;
        log::debug!("loading {}", path.as_ref().display());
        self.load(&grid)
    }

    /// Recompute `parts` of the current mesh from `grid`.
    ///
    /// Without a current mesh this is a full load and every part is
    /// reported as replaced.
    pub fn reload<G>(
        &mut self,
        grid: &G,
        parts: ReloadParts,
    ) -> Result<ReloadReport, MeshNormalizeError>
    where
        G: GridProvider + ?Sized,
    {
        match self.mesh.as_mut() {
            Some(mesh) => self.normalizer.reload(mesh, grid, parts),
            None => {
                self.load(grid)?;
                Ok(ReloadReport {
                    replaced: ReloadParts::all().requested().collect(),
                    failed: Vec::new(),
                })
            }
        }
    }

    /// Read a grid file and reload `parts` from it.
    pub fn reload_file(
        &mut self,
        path: impl AsRef<Path>,
        parts: ReloadParts,
    ) -> Result<ReloadReport, MeshNormalizeError> {
        let grid = read_grid_file(path.as_ref())?;
        log::debug!("reloading {}", path.as_ref().display());
        self.reload(&grid, parts)
    }

    /// Drop the current mesh.
    pub fn clear(&mut self) {
        self.mesh = None;
    }
}

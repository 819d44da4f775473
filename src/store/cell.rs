use crate::grading::GradingConfig;
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::storage::{load_grading_config, save_grading_config};

/// The single current grading configuration, persisted on every change.
///
/// Front ends hold one cell and hand `get()` snapshots to the engine; the
/// engine never sees the cell.
#[derive(Debug)]
pub struct ConfigCell {
    config: GradingConfig,
    path: PathBuf,
}

impl ConfigCell {
    /// Load from `path`, falling back to defaults.
    pub fn load(path: PathBuf) -> Self {
        let config = load_grading_config(&path);
        Self { config, path }
    }

    pub fn get(&self) -> &GradingConfig {
        &self.config
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Apply `f` to the configuration. Saves and returns true when the value
    /// changed; an unchanged value is neither saved nor reported.
    ///
    /// A failed save leaves the new value in memory and returns the error.
    pub fn update<F>(&mut self, f: F) -> Result<bool>
    where
        F: FnOnce(&mut GradingConfig),
    {
        let mut next = self.config.clone();
        f(&mut next);
        if next == self.config {
            return Ok(false);
        }
        self.config = next;
        save_grading_config(&self.path, &self.config)?;
        Ok(true)
    }

    /// Like [`Self::update`] for edits that can fail; nothing changes on error.
    pub fn try_update<F>(&mut self, f: F) -> Result<bool>
    where
        F: FnOnce(&mut GradingConfig) -> Result<()>,
    {
        let mut next = self.config.clone();
        f(&mut next)?;
        self.update(|config| *config = next)
    }

    /// Restore and save the default configuration.
    pub fn reset(&mut self) -> Result<()> {
        self.config = GradingConfig::default();
        save_grading_config(&self.path, &self.config)
    }
}

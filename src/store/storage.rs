use crate::grading::GradingConfig;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Fixed key the grading configuration is stored under.
pub const STORAGE_KEY: &str = "cijfer-calculator-config";

/// Get the default state file path (~/.config/cijfer/cijfer-calculator-config.json)
pub fn get_state_path() -> Result<PathBuf> {
    Ok(crate::config::get_config_dir()?.join(format!("{}.json", STORAGE_KEY)))
}

/// Load the persisted grading configuration.
///
/// Never fails: a missing file gives the defaults, and so does a file that
/// cannot be read or parsed (a warning is logged).
pub fn load_grading_config(path: &Path) -> GradingConfig {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no stored configuration, using defaults");
        return GradingConfig::default();
    }

    match read_config(path) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), method = %config.method, "loaded stored configuration");
            config
        }
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                "Ignoring stored configuration: {:#}",
                e
            );
            GradingConfig::default()
        }
    }
}

fn read_config(path: &Path) -> Result<GradingConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open state file at {}", path.display()))?;
    let config = serde_json::from_reader(file).context("Failed to parse stored configuration")?;
    Ok(config)
}

/// Save the grading configuration to a JSON file atomically
///
/// Uses atomic-write-file so the file is never left half-written.
/// Creates the parent directory if it doesn't exist.
pub fn save_grading_config(path: &Path, config: &GradingConfig) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    serde_json::to_writer_pretty(&mut file, config)
        .context("Failed to serialize grading configuration")?;

    file.commit().context("Failed to save grading configuration")?;

    tracing::debug!(path = %path.display(), "saved configuration");
    Ok(())
}

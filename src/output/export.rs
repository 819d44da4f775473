use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

/// Default file name for a table export.
pub const EXPORT_FILE_NAME: &str = "cijfertabel.tsv";

/// Write exported text to `path` atomically, with a trailing newline.
pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    crate::config::ensure_parent_dir(path)?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(contents.as_bytes())
        .and_then(|_| file.write_all(b"\n"))
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save export to {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "wrote export");
    Ok(())
}

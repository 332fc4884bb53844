// src/file.rs

use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv::to_export_string;
use crate::error::Result;
use crate::record::ScoredWineRecord;

/// Write ranked rows according to `ExportOptions` (path, headers, format).
/// Returns the final path written to, or `None` when exporting is off.
pub fn write_export(export: &ExportOptions, rows: &[ScoredWineRecord]) -> Result<Option<PathBuf>> {
    let Some(path) = export.out_path() else { return Ok(None) };

    match export.format.delim() {
        Some(sep) => {
            ensure_parent(&path)?;
            let contents = to_export_string(rows, export.include_headers, sep);
            fs::write(&path, contents)?;
        }
        None => {
            debug_assert_eq!(export.format, ExportFormat::Json);
            crate::store::save_json(&path, rows)?;
        }
    }

    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(Some(path))
}

/// Create the parent directory of `path` if it has one.
pub fn ensure_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn ensure_directory(dir: &Path) -> io::Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(io::Error::other(format!(
            "Path exists but is not a directory: {}", dir.display()
        )));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}

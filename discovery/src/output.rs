//! Catalog artifact writing.

use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use help_catalog_core::Catalog;
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::OutputError;

/// File name of the artifact for `program` (e.g. `verdi_cli.json`).
pub fn artifact_file_name(program: &str) -> String {
    let stem = Path::new(program)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(program);
    format!("{stem}_cli.json")
}

/// Default artifact location: next to the running executable, falling back
/// to the current directory when the executable path is unknown.
pub fn default_output_path(program: &str) -> PathBuf {
    let dir = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));
    dir.join(artifact_file_name(program))
}

/// Renders the catalog as a JSON array pretty-printed with 2-space indent.
pub fn render_catalog(catalog: &Catalog) -> Result<String, OutputError> {
    Ok(serde_json::to_string_pretty(catalog)?)
}

/// Writes the catalog to `path`.
///
/// The JSON is written to a temporary file in the destination directory
/// and then renamed over `path`, so readers never observe a partial file.
pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<(), OutputError> {
    let rendered = render_catalog(catalog)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let io_err = |source: std::io::Error| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(&dir).map_err(io_err)?;
    let mut tmp = NamedTempFile::new_in(&dir).map_err(io_err)?;
    tmp.write_all(rendered.as_bytes()).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|source| OutputError::Persist {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), entries = catalog.len(), "Wrote catalog");
    Ok(())
}
